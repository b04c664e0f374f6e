// src/services/walker.rs

//! Per-dimension pagination walker.
//!
//! Walks one jurisdiction's result pages in order: the first page submits
//! the full search, later pages replay the "next page" control scraped
//! from the previous response, until no continuation signal remains.

use reqwest::Method;
use scraper::Html;

use crate::cache::ResponseCache;
use crate::error::{AppError, Result};
use crate::models::{Config, Dimension, PageQuery, ResultRecord};
use crate::services::extract;
use crate::services::forms;
use crate::services::session::CrawlSession;

/// What one dimension's walk produced.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub records: Vec<ResultRecord>,
    pub pages: usize,

    /// True when a malformed page cut the walk short
    pub parse_skipped: bool,
}

/// Single-use walker for one dimension.
pub struct PageWalker<'a> {
    session: &'a mut CrawlSession,
    cache: &'a mut ResponseCache,
    config: &'a Config,
}

impl<'a> PageWalker<'a> {
    pub fn new(
        session: &'a mut CrawlSession,
        cache: &'a mut ResponseCache,
        config: &'a Config,
    ) -> Self {
        Self {
            session,
            cache,
            config,
        }
    }

    /// Crawl every result page for one dimension.
    ///
    /// Starts with a fresh landing-page visit: the archive associates one
    /// submission target per visit, and a target left over from another
    /// dimension's walk cannot be trusted.
    pub async fn walk(mut self, dimension: &Dimension) -> Result<WalkOutcome> {
        self.session.reset();
        let landing = self
            .session
            .fetch(&self.config.crawler.site_root, Method::GET, None)
            .await?;
        let action = {
            let doc = Html::parse_document(&landing);
            forms::scan_landing_form(&doc)?
        };
        self.session.set_submit_target(&action);

        let mut outcome = WalkOutcome::default();
        let mut page = 0;
        let mut next_control: Option<(String, String)> = None;

        loop {
            let query = match next_control.take() {
                None => PageQuery::first(dimension, &self.config.search),
                Some(control) => PageQuery::continuation(dimension, page, control),
            };

            let body = self.submit(&query).await?;
            outcome.pages += 1;

            match self.parse_page(&body) {
                Ok((records, control)) => {
                    outcome.records.extend(records);
                    match control {
                        Some(control) => next_control = Some(control),
                        None => break,
                    }
                }
                Err(AppError::Parse(message)) => {
                    log::warn!(
                        "{}: malformed page {page}, skipping rest of dimension: {message}",
                        dimension.label
                    );
                    outcome.parse_skipped = true;
                    break;
                }
                Err(other) => return Err(other),
            }

            page += 1;
            if page >= self.config.crawler.max_pages {
                log::warn!(
                    "{}: page ceiling ({}) reached, stopping walk",
                    dimension.label,
                    self.config.crawler.max_pages
                );
                break;
            }
        }

        Ok(outcome)
    }

    /// Submit one page query through the cache.
    async fn submit(&mut self, query: &PageQuery<'_>) -> Result<String> {
        let key = query.fingerprint();
        if let Some(body) = self.cache.get(&key).await {
            log::debug!(
                "cache hit for {} page {}",
                query.dimension.label,
                query.page
            );
            return Ok(body);
        }

        let target = self.session.submit_target()?.to_string();
        let body = self
            .session
            .fetch(&target, Method::POST, Some(&query.params))
            .await?;
        self.cache.put(&key, &body).await;
        Ok(body)
    }

    /// Refresh the submission target from the page, then extract records
    /// and the continuation control.
    fn parse_page(
        &mut self,
        body: &str,
    ) -> Result<(Vec<ResultRecord>, Option<(String, String)>)> {
        let doc = Html::parse_document(body);
        let scan = forms::scan_result_forms(&doc, &self.config.search.next_page_label)?;
        if let Some(action) = &scan.action {
            self.session.set_submit_target(action);
        }

        if extract::page_has_no_results(body) {
            return Ok((Vec::new(), None));
        }

        let records = extract::extract_records(&doc)?;
        Ok((records, scan.next_control))
    }
}
