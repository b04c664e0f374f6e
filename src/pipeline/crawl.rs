// src/pipeline/crawl.rs

//! The full crawl: discovery, per-dimension walks, deduplication.

use reqwest::Method;
use scraper::Html;

use crate::cache::ResponseCache;
use crate::error::Result;
use crate::models::{Config, ResultRecord};
use crate::services::{CrawlSession, Deduplicator, PageWalker, discovery, forms};

/// Summary of a crawl run.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    pub records: Vec<ResultRecord>,
    pub dimension_total: usize,
    pub pages_fetched: usize,
    pub parse_skips: usize,
    pub duplicates_dropped: usize,
}

/// Crawl every discovered jurisdiction and return the deduplicated record
/// set. Strictly sequential: one dimension, one page, one request at a
/// time.
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome> {
    let mut session = CrawlSession::new(&config.crawler)?;
    let mut cache = ResponseCache::connect(&config.crawler.cache_addr).await;

    let landing = session
        .fetch(&config.crawler.site_root, Method::GET, None)
        .await?;
    let (action, states, countries) = {
        let doc = Html::parse_document(&landing);
        let action = forms::scan_landing_form(&doc)?;
        let dimensions = discovery::discover_dimensions(&doc)?;
        (action, dimensions.0, dimensions.1)
    };
    session.set_submit_target(&action);

    log::info!(
        "discovered {} states and {} countries",
        states.len(),
        countries.len()
    );

    let mut dedupe = Deduplicator::new();
    let mut outcome = CrawlOutcome {
        dimension_total: states.len() + countries.len(),
        ..CrawlOutcome::default()
    };

    for dimension in states.iter().chain(countries.iter()) {
        log::info!("crawling {} ({})", dimension.label, dimension.code);

        let walk = PageWalker::new(&mut session, &mut cache, config)
            .walk(dimension)
            .await?;

        log::info!(
            "{}: {} records over {} pages",
            dimension.label,
            walk.records.len(),
            walk.pages
        );

        outcome.pages_fetched += walk.pages;
        if walk.parse_skipped {
            outcome.parse_skips += 1;
        }
        for record in walk.records {
            if dedupe.accept(&record) {
                outcome.records.push(record);
            } else {
                outcome.duplicates_dropped += 1;
            }
        }
    }

    Ok(outcome)
}
