// src/services/session.rs

//! Rate-limited crawl session.
//!
//! Owns the HTTP client, the rotating Referer, the current submission
//! target and the request pacing state. All mutation happens between
//! sequential steps; there is no concurrent access.

use std::time::Duration;

use reqwest::{Client, Method, header};
use tokio::time::Instant;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;
use crate::utils;

/// Enforces a minimum interval between request issue times by sleeping in
/// coarse increments. Only guarantees a lower bound, never exactness.
pub struct RequestPacer {
    spacing: Duration,
    poll: Duration,
    last: Option<Instant>,
}

impl RequestPacer {
    pub fn new(spacing: Duration) -> Self {
        let poll = spacing.min(Duration::from_secs(1));
        Self {
            spacing,
            poll,
            last: None,
        }
    }

    /// Wait until at least the configured spacing has elapsed since the
    /// previous call, then mark the new issue time.
    pub async fn pace(&mut self) {
        if let Some(last) = self.last {
            while last.elapsed() < self.spacing {
                tokio::time::sleep(self.poll).await;
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Mutable crawl state threaded through every component call.
pub struct CrawlSession {
    client: Client,
    origin: String,
    pacer: RequestPacer,
    last_url: Option<Url>,
    submit_target: Option<String>,
}

impl CrawlSession {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self {
            client: utils::http::create_client(config)?,
            origin: config.origin.clone(),
            pacer: RequestPacer::new(Duration::from_secs(config.request_spacing_secs)),
            last_url: None,
            submit_target: None,
        })
    }

    /// The URL the next form post must be sent to.
    ///
    /// Errors when no target has been tracked yet; posting to a target that
    /// was not refreshed from the latest response is an invariant violation.
    pub fn submit_target(&self) -> Result<&str> {
        self.submit_target
            .as_deref()
            .ok_or_else(|| AppError::structure("no submission target on record"))
    }

    /// Track a new submission target, resolving it against the URL of the
    /// response it came from.
    pub fn set_submit_target(&mut self, action: &str) {
        let resolved = match &self.last_url {
            Some(base) => utils::resolve_url(base, action),
            None => action.to_string(),
        };
        log::debug!("new submission target: {resolved}");
        self.submit_target = Some(resolved);
    }

    /// Forget the submission target and Referer ahead of a fresh
    /// landing-page visit. Request pacing carries across the reset.
    pub fn reset(&mut self) {
        self.submit_target = None;
        self.last_url = None;
    }

    /// Issue one rate-limited request and return the response body.
    ///
    /// Attaches the static Origin header and, on every request after the
    /// session's first, a Referer equal to the previous response's resolved
    /// URL. Non-2xx statuses are fatal and carry the body as diagnostic.
    pub async fn fetch(
        &mut self,
        url: &str,
        method: Method,
        form: Option<&[(String, String)]>,
    ) -> Result<String> {
        self.pacer.pace().await;

        let mut request = self
            .client
            .request(method, url)
            .header(header::ORIGIN, self.origin.as_str());
        if let Some(referer) = &self.last_url {
            request = request.header(header::REFERER, referer.as_str());
        }
        if let Some(form) = form {
            request = request.form(form);
        }

        let response = request.send().await?;
        let status = response.status();
        let resolved = response.url().clone();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::transport(status.as_u16(), body));
        }

        log::debug!("fetched {resolved} ({status})");
        self.last_url = Some(resolved);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_pace_does_not_wait() {
        let mut pacer = RequestPacer::new(Duration::from_secs(1));
        let started = Instant::now();
        pacer.pace().await;
        assert!(started.elapsed() < Duration::from_millis(900));
    }

    #[tokio::test]
    async fn test_pace_enforces_minimum_spacing() {
        let spacing = Duration::from_millis(300);
        let mut pacer = RequestPacer::new(spacing);
        let started = Instant::now();
        pacer.pace().await;
        pacer.pace().await;
        assert!(started.elapsed() >= spacing);
    }

    #[test]
    fn test_submit_target_starts_stale() {
        let session = CrawlSession::new(&CrawlerConfig::default()).unwrap();
        assert!(session.submit_target().is_err());
    }

    #[test]
    fn test_set_submit_target_without_referer_keeps_action() {
        let mut session = CrawlSession::new(&CrawlerConfig::default()).unwrap();
        session.set_submit_target("http://example.com/post.html");
        assert_eq!(
            session.submit_target().unwrap(),
            "http://example.com/post.html"
        );
    }

    #[test]
    fn test_reset_clears_target() {
        let mut session = CrawlSession::new(&CrawlerConfig::default()).unwrap();
        session.set_submit_target("http://example.com/post.html");
        session.reset();
        assert!(session.submit_target().is_err());
    }
}
