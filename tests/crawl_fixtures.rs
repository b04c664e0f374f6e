//! Fixture-driven walk of the crawl stages: landing-page discovery, result
//! page parsing per dimension, and cross-dimension deduplication.

use scraper::Html;

use archive_crawler::models::{Dimension, DimensionKind, PageQuery, ResultRecord, SearchConfig};
use archive_crawler::services::{Deduplicator, discovery, extract, forms};

const NEXT_LABEL: &str = "NEXT 10 >";

const LANDING: &str = r#"
<html><body>
<form action="http://archive.example.com/cgi-bin/search/1234">
<select name="input.state">
    <option value="">Choose a state</option>
    <option value="NY">New York</option>
</select>
<select name="input.country">
    <option value="">Choose a country</option>
    <option value="CAN,Canada">Canada</option>
</select>
</form>
</body></html>
"#;

fn result_page(rows: &[&[&str]]) -> String {
    let body: String = rows
        .iter()
        .map(|cells| {
            let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
            format!(r##"<tr bgcolor="#FFFFFF">{tds}</tr>"##)
        })
        .collect();
    format!(
        r#"<html><body>
        <form action="http://archive.example.com/cgi-bin/search/5678"></form>
        <table width="750"><tr><td>First Name</td><td>Last Name</td></tr>{body}</table>
        </body></html>"#
    )
}

// Shared finisher appears under both the NY and Canada filters.
const SHARED: &[&str] = &["Jane", "Doe", "F30", "101", "TeamX", "CAN", "Canada", "1", "x"];
const NY_ONLY: &[&str] = &["John", "Smith", "M41", "202", "TeamY", "USA", "United States", "2", "x"];

#[test]
fn single_page_crawl_over_both_dimensions_dedupes_the_union() {
    let doc = Html::parse_document(LANDING);
    let action = forms::scan_landing_form(&doc).unwrap();
    assert_eq!(action, "http://archive.example.com/cgi-bin/search/1234");

    let (states, countries) = discovery::discover_dimensions(&doc).unwrap();
    assert_eq!(states, vec![Dimension::state("NY", "New York")]);
    assert_eq!(countries, vec![Dimension::country("CAN", "Canada")]);

    let pages = [
        (&states[0], result_page(&[NY_ONLY, SHARED])),
        (&countries[0], result_page(&[SHARED])),
    ];

    let mut dedupe = Deduplicator::new();
    let mut collected: Vec<ResultRecord> = Vec::new();

    for (dimension, page) in &pages {
        // first-page query for the dimension; no continuation control on
        // these fixtures, so each walk ends after one page
        let query = PageQuery::first(dimension, &SearchConfig::default());
        assert_eq!(query.page, 0);

        let doc = Html::parse_document(page);
        let scan = forms::scan_result_forms(&doc, NEXT_LABEL).unwrap();
        assert_eq!(
            scan.action.as_deref(),
            Some("http://archive.example.com/cgi-bin/search/5678")
        );
        assert!(!scan.has_continuation());

        assert!(!extract::page_has_no_results(page));
        for record in extract::extract_records(&doc).unwrap() {
            if dedupe.accept(&record) {
                collected.push(record);
            }
        }
    }

    // union of both dimensions with the shared finisher kept once
    assert_eq!(collected.len(), 2);
    assert_eq!(collected[0].first_name, "John");
    assert_eq!(collected[1].first_name, "Jane");
    assert_eq!(collected[1].country, "CAN");
}

#[test]
fn no_match_page_terminates_a_dimension_immediately() {
    let page = r#"<html><body>Your search returns no match.</body></html>"#;
    let doc = Html::parse_document(page);

    // no forms on the empty-result page: tolerated, no continuation
    let scan = forms::scan_result_forms(&doc, NEXT_LABEL).unwrap();
    assert!(!scan.has_continuation());
    assert!(extract::page_has_no_results(page));
}

#[test]
fn continuation_signal_survives_a_target_change() {
    let first = r##"<html><body>
        <form action="http://archive.example.com/cgi-bin/search/9999">
        <input type="submit" name="input.next" value="NEXT 10 >">
        </form>
        <table width="750"><tr bgcolor="#FFFFFF"><td>Jane</td><td>Doe</td><td>x</td></tr></table>
        </body></html>"##;

    let doc = Html::parse_document(first);
    let scan = forms::scan_result_forms(&doc, NEXT_LABEL).unwrap();

    // the next post goes to the refreshed target with just the marker
    assert_eq!(
        scan.action.as_deref(),
        Some("http://archive.example.com/cgi-bin/search/9999")
    );
    let control = scan.next_control.unwrap();
    let dim = Dimension::state("NY", "New York");
    let query = PageQuery::continuation(&dim, 1, control);
    assert_eq!(
        query.params,
        vec![("input.next".to_string(), "NEXT 10 >".to_string())]
    );
    assert_eq!(query.dimension.kind, DimensionKind::State);
}
