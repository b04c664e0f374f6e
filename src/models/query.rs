// src/models/query.rs

//! Parameters for one page request of a dimension's walk.

use crate::cache;
use crate::models::{Dimension, SearchConfig};

/// Form field enumerating the inputs the archive's htmlos backend expects
/// on a first-page search.
const FIELD_LIST_KEY: &str = "AESTIVACVNLIST";
const FIELD_LIST: &str =
    "input.searchyear,input.top,input.agegroup,team_code,input.state,input.country,input.top.wc";

/// The parameters for one page request: the full search set for page 0, a
/// single "next page" submit marker for later pages.
#[derive(Debug, Clone)]
pub struct PageQuery<'a> {
    pub dimension: &'a Dimension,

    /// 0-based page index within the dimension's walk
    pub page: usize,

    /// The form-encoded body that gets POSTed
    pub params: Vec<(String, String)>,
}

impl<'a> PageQuery<'a> {
    /// Build the first-page query: dimension selector plus the archive's
    /// fixed search defaults.
    pub fn first(dimension: &'a Dimension, search: &SearchConfig) -> Self {
        let params = vec![
            (FIELD_LIST_KEY.to_string(), FIELD_LIST.to_string()),
            ("input.searchyear".to_string(), search.year.to_string()),
            ("input.top".to_string(), search.top.to_string()),
            ("input.top.wc".to_string(), search.top_wc.to_string()),
            (
                "search.method".to_string(),
                dimension.kind.search_method().to_string(),
            ),
            ("top.type".to_string(), "B".to_string()),
            ("top.wc.type".to_string(), "P".to_string()),
            ("top.wc.gender".to_string(), "B".to_string()),
            (
                dimension.kind.input_field().to_string(),
                dimension.code.clone(),
            ),
        ];

        Self {
            dimension,
            page: 0,
            params,
        }
    }

    /// Build a continuation query carrying only the "next page" submit
    /// control scraped from the previous response.
    pub fn continuation(dimension: &'a Dimension, page: usize, control: (String, String)) -> Self {
        Self {
            dimension,
            page,
            params: vec![control],
        }
    }

    /// Cache key for this query. Covers the search method, dimension code,
    /// page index and every form parameter, independent of parameter order.
    pub fn fingerprint(&self) -> String {
        let mut keyed = self.params.clone();
        keyed.push((
            "crawl.method".to_string(),
            self.dimension.kind.search_method().to_string(),
        ));
        keyed.push(("crawl.dimension".to_string(), self.dimension.code.clone()));
        keyed.push(("crawl.page".to_string(), self.page.to_string()));
        cache::fingerprint(&keyed)
    }
}
