//! Google backend
//!
//! Scrapes the classic HTML results page. Google is quick to serve a
//! `/sorry/` interstitial or CAPTCHA to scrapers, so both are reported as
//! [`FailureKind::Blocked`] rather than as an empty result set.

use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;
use url::Url;

use super::http::HttpFetcher;
use super::{selector, SearchBackend};
use crate::error::{FailureKind, StrategyFailure};
use crate::types::Candidate;

pub const NAME: &str = "google";

/// Text of the notice Google shows when a query has no matches
const NO_MATCH_NOTICE: &str = "did not match any documents";

/// Google HTML backend
pub struct GoogleBackend {
    http: Arc<HttpFetcher>,
    base_url: String,
}

impl GoogleBackend {
    pub fn new(http: Arc<HttpFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SearchBackend for GoogleBackend {
    fn name(&self) -> &str {
        NAME
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, StrategyFailure> {
        let url = format!("{}/search", self.base_url);
        let num = limit.to_string();
        let request = self
            .http
            .get(&url)
            .query(&[("q", query), ("num", num.as_str()), ("hl", "en")]);

        let page = self.http.fetch_page(NAME, request).await?;
        if page.final_url.path().starts_with("/sorry") {
            return Err(StrategyFailure::new(
                NAME,
                FailureKind::Blocked,
                "redirected to the unusual traffic page",
            ));
        }

        parse_google_html(&page.body)
    }
}

/// Unwrap Google's `/url?q=<target>&...` redirect links
fn extract_url(href: &str) -> Option<String> {
    if href.starts_with("/url?") {
        let base = Url::parse("https://www.google.com").ok()?;
        let parsed = base.join(href).ok()?;
        return parsed
            .query_pairs()
            .find(|(key, _)| key == "q" || key == "url")
            .map(|(_, value)| value.into_owned());
    }
    if href.starts_with('/') || href.starts_with('#') {
        // Internal navigation (images tab, "more results", anchors)
        return None;
    }
    Some(href.to_string())
}

/// Parse a Google HTML results page into candidates
pub(crate) fn parse_google_html(html: &str) -> Result<Vec<Candidate>, StrategyFailure> {
    let document = Html::parse_document(html);
    let sel = |css: &str| selector(NAME, css);

    let blocked_sel = sel("form#captcha-form, #recaptcha, div.g-recaptcha")?;
    if document.select(&blocked_sel).next().is_some() {
        return Err(StrategyFailure::new(
            NAME,
            FailureKind::Blocked,
            "captcha page returned",
        ));
    }

    let result_sel = sel("div.g")?;
    let title_sel = sel("h3")?;
    let link_sel = sel("a[href]")?;
    let snippet_sel = sel("div.VwiC3b")?;

    let mut candidates = Vec::new();
    let mut malformed = 0usize;

    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else {
            malformed += 1;
            continue;
        };
        let Some(href) = element
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            malformed += 1;
            continue;
        };

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>());

        candidates.push(Candidate {
            title: Some(title_el.text().collect()),
            url: extract_url(href),
            snippet,
        });
    }

    tracing::debug!(count = candidates.len(), malformed, "Google results parsed");

    if candidates.is_empty() && !html.contains(NO_MATCH_NOTICE) {
        return Err(StrategyFailure::new(
            NAME,
            FailureKind::Parse,
            format!("no results extracted ({malformed} malformed blocks)"),
        ));
    }

    Ok(candidates)
}
