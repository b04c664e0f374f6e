// src/services/forms.rs

//! Submission-target and continuation-signal tracking.
//!
//! Every response embeds the target of the next form post in a form's
//! `action` attribute, and signals further result pages with a submit
//! button carrying a known label. Both can change between pages, so each
//! response is re-scanned.

use scraper::{ElementRef, Html};

use crate::error::{AppError, Result};
use crate::utils::selector;

const FORM: &str = "form";
const SUBMIT_INPUT: &str = r#"input[type="submit"]"#;

/// What a scan of a result page's forms yielded.
#[derive(Debug, Clone, Default)]
pub struct FormScan {
    /// Action of the authoritative form, if any form was present
    pub action: Option<String>,

    /// Name/value of the submit control whose value matched the "next
    /// page" label
    pub next_control: Option<(String, String)>,
}

impl FormScan {
    pub fn has_continuation(&self) -> bool {
        self.next_control.is_some()
    }
}

/// Landing-page scan: exactly one form is expected, and its action is the
/// initial submission target.
pub fn scan_landing_form(doc: &Html) -> Result<String> {
    let form_sel = selector(FORM)?;
    let forms: Vec<ElementRef> = doc.select(&form_sel).collect();

    if forms.len() != 1 {
        return Err(AppError::structure(format!(
            "ambiguous submission target: {} forms on landing page",
            forms.len()
        )));
    }

    forms[0]
        .value()
        .attr("action")
        .map(str::to_string)
        .ok_or_else(|| AppError::structure("landing form has no action attribute"))
}

/// Result-page scan. Zero forms is tolerated (an empty result set renders
/// none) and means no continuation. Otherwise the last form in page order
/// is authoritative.
pub fn scan_result_forms(doc: &Html, next_label: &str) -> Result<FormScan> {
    let form_sel = selector(FORM)?;
    let Some(form) = doc.select(&form_sel).last() else {
        return Ok(FormScan::default());
    };

    let action = form.value().attr("action").map(str::to_string);
    let next_control = next_control(form, next_label)?;

    Ok(FormScan {
        action,
        next_control,
    })
}

/// Find the submit input whose value matches the next-page label exactly.
fn next_control(form: ElementRef, next_label: &str) -> Result<Option<(String, String)>> {
    let submit_sel = selector(SUBMIT_INPUT)?;
    for input in form.select(&submit_sel) {
        let value = input.value().attr("value").unwrap_or("");
        if value == next_label {
            let name = input.value().attr("name").unwrap_or("").to_string();
            return Ok(Some((name, value.to_string())));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEXT_LABEL: &str = "NEXT 10 >";

    fn page(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn test_landing_single_form_yields_action() {
        let doc = page(r#"<form action="http://example.com/post.html"></form>"#);
        assert_eq!(
            scan_landing_form(&doc).unwrap(),
            "http://example.com/post.html"
        );
    }

    #[test]
    fn test_landing_multiple_forms_is_ambiguous() {
        let doc = page(r#"<form action="/a"></form><form action="/b"></form>"#);
        assert!(scan_landing_form(&doc).is_err());
    }

    #[test]
    fn test_landing_no_forms_is_ambiguous() {
        let doc = page("<p>nothing here</p>");
        assert!(scan_landing_form(&doc).is_err());
    }

    #[test]
    fn test_result_page_without_forms_has_no_continuation() {
        let doc = page("<p>Your search returns no match.</p>");
        let scan = scan_result_forms(&doc, NEXT_LABEL).unwrap();
        assert_eq!(scan.action, None);
        assert!(!scan.has_continuation());
    }

    #[test]
    fn test_result_page_last_form_is_authoritative() {
        let doc = page(concat!(
            r#"<form action="/old"></form>"#,
            r#"<form action="/new"><input type="submit" name="input.next" value="NEXT 10 >"></form>"#,
        ));
        let scan = scan_result_forms(&doc, NEXT_LABEL).unwrap();
        assert_eq!(scan.action.as_deref(), Some("/new"));
        assert_eq!(
            scan.next_control,
            Some(("input.next".to_string(), "NEXT 10 >".to_string()))
        );
    }

    #[test]
    fn test_continuation_requires_exact_label() {
        let doc = page(concat!(
            r#"<form action="/post">"#,
            r#"<input type="submit" name="search" value="SEARCH">"#,
            r#"<input type="submit" name="input.next" value="NEXT 10">"#,
            "</form>",
        ));
        let scan = scan_result_forms(&doc, NEXT_LABEL).unwrap();
        assert_eq!(scan.action.as_deref(), Some("/post"));
        assert!(!scan.has_continuation());
    }
}
