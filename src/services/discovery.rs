// src/services/discovery.rs

//! Jurisdiction discovery from the landing page's selection controls.
//!
//! Runs exactly once, immediately after the first landing-page fetch. The
//! discovered lists are immutable for the rest of the crawl.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::Dimension;
use crate::utils::selector;

const STATE_SELECT: &str = r#"select[name="input.state"]"#;
const COUNTRY_SELECT: &str = r#"select[name="input.country"]"#;

/// Parse the landing page's state and country selectors into the two
/// dimension lists.
pub fn discover_dimensions(doc: &Html) -> Result<(Vec<Dimension>, Vec<Dimension>)> {
    let states = options(doc, STATE_SELECT, "state")?
        .into_iter()
        .map(|(value, text)| Dimension::state(&value, &text))
        .collect();

    let countries = options(doc, COUNTRY_SELECT, "country")?
        .into_iter()
        .filter_map(|(value, text)| match value.split_once(',') {
            Some((abbrev, name)) => Some(Dimension::country(abbrev, name)),
            None => {
                log::warn!("skipping malformed country option: {value:?} ({text})");
                None
            }
        })
        .collect();

    Ok((states, countries))
}

/// Collect a selector's (value, text) option pairs, skipping the leading
/// placeholder option.
fn options(doc: &Html, css: &str, what: &str) -> Result<Vec<(String, String)>> {
    let select_sel = selector(css)?;
    let option_sel = selector("option")?;

    let select = doc
        .select(&select_sel)
        .next()
        .ok_or_else(|| AppError::structure(format!("{what} selector missing from landing page")))?;

    Ok(select
        .select(&option_sel)
        .skip(1)
        .filter_map(|option| {
            let value = option.value().attr("value")?.trim().to_string();
            let text = option.text().collect::<String>().trim().to_string();
            Some((value, text))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DimensionKind;

    const LANDING: &str = r#"
        <html><body><form action="/post.html">
        <select name="input.state">
            <option value="">Select a state</option>
            <option value="NY ">New York</option>
            <option value="NJ">New Jersey</option>
        </select>
        <select name="input.country">
            <option value="">Select a country</option>
            <option value="CAN,Canada">Canada</option>
        </select>
        </form></body></html>
    "#;

    #[test]
    fn test_discovers_both_dimension_lists() {
        let doc = Html::parse_document(LANDING);
        let (states, countries) = discover_dimensions(&doc).unwrap();

        assert_eq!(states.len(), 2);
        assert_eq!(states[0].kind, DimensionKind::State);
        assert_eq!(states[0].code, "NY");
        assert_eq!(states[0].label, "New York");

        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].kind, DimensionKind::Country);
        assert_eq!(countries[0].code, "CAN,Canada");
        assert_eq!(countries[0].label, "Canada");
    }

    #[test]
    fn test_placeholder_option_is_skipped() {
        let doc = Html::parse_document(LANDING);
        let (states, _) = discover_dimensions(&doc).unwrap();
        assert!(states.iter().all(|d| !d.code.is_empty()));
    }

    #[test]
    fn test_missing_state_selector_is_structural() {
        let doc = Html::parse_document(
            r#"<html><body><select name="input.country"></select></body></html>"#,
        );
        assert!(discover_dimensions(&doc).is_err());
    }

    #[test]
    fn test_malformed_country_option_is_skipped() {
        let doc = Html::parse_document(
            r#"
            <select name="input.state"><option value="">-</option></select>
            <select name="input.country">
                <option value="">-</option>
                <option value="NOCOMMA">Broken</option>
                <option value="MEX,Mexico">Mexico</option>
            </select>
            "#,
        );
        let (_, countries) = discover_dimensions(&doc).unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].code, "MEX,Mexico");
    }
}
