//! DuckDuckGo backend
//!
//! Scrapes the JavaScript-free HTML endpoint (`/html/`), which tolerates
//! automated requests better than the main site. Result links are wrapped
//! in `//duckduckgo.com/l/?uddg=<target>` redirects that are unwrapped here.

use async_trait::async_trait;
use scraper::Html;
use std::sync::Arc;
use url::Url;

use super::http::HttpFetcher;
use super::{selector, SearchBackend};
use crate::error::{FailureKind, StrategyFailure};
use crate::types::Candidate;

pub const NAME: &str = "duckduckgo";

/// DuckDuckGo HTML backend
pub struct DuckDuckGoBackend {
    http: Arc<HttpFetcher>,
    base_url: String,
}

impl DuckDuckGoBackend {
    pub fn new(http: Arc<HttpFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoBackend {
    fn name(&self) -> &str {
        NAME
    }

    async fn search(&self, query: &str, _limit: usize) -> Result<Vec<Candidate>, StrategyFailure> {
        let url = format!("{}/html/", self.base_url);
        let request = self.http.post(&url).form(&[("q", query)]);

        let page = self.http.fetch_page(NAME, request).await?;
        parse_duckduckgo_html(&page.body)
    }
}

/// Extract the real target from a DuckDuckGo redirect link
fn extract_url(href: &str) -> Option<String> {
    let full_href = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&full_href).ok()?;

    let is_redirect = parsed
        .host_str()
        .is_some_and(|h| h.ends_with("duckduckgo.com"))
        && parsed.path().starts_with("/l/");
    if is_redirect {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "uddg")
            .map(|(_, value)| value.into_owned())
    } else {
        Some(full_href)
    }
}

/// Parse a DuckDuckGo HTML results page into candidates
///
/// A page that yields no candidates is only accepted as an empty result
/// set when it carries DuckDuckGo's "no results" notice. A bare `#links`
/// container or result blocks missing their title link are a parse
/// failure so the next strategy gets a chance.
pub(crate) fn parse_duckduckgo_html(html: &str) -> Result<Vec<Candidate>, StrategyFailure> {
    let document = Html::parse_document(html);
    let sel = |css: &str| selector(NAME, css);

    let blocked_sel = sel(".anomaly-modal__modal, form#challenge-form, form[action*=\"anomaly\"]")?;
    if document.select(&blocked_sel).next().is_some() {
        return Err(StrategyFailure::new(
            NAME,
            FailureKind::Blocked,
            "anomaly challenge page returned",
        ));
    }

    let result_sel = sel(".result:not(.result--ad), .web-result:not(.result--ad)")?;
    let title_sel = sel("a.result__a")?;
    let snippet_sel = sel(".result__snippet")?;

    let mut candidates = Vec::new();
    let mut malformed = 0usize;

    for element in document.select(&result_sel) {
        let Some(title_el) = element.select(&title_sel).next() else {
            malformed += 1;
            continue;
        };

        let title = title_el.text().collect::<String>();
        let url = title_el.value().attr("href").and_then(extract_url);
        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>());

        candidates.push(Candidate {
            title: Some(title),
            url,
            snippet,
        });
    }

    tracing::debug!(
        count = candidates.len(),
        malformed,
        "DuckDuckGo results parsed"
    );

    if candidates.is_empty() {
        let no_results_sel = sel(".no-results")?;
        if document.select(&no_results_sel).next().is_none() {
            return Err(StrategyFailure::new(
                NAME,
                FailureKind::Parse,
                format!("no results extracted ({malformed} malformed blocks)"),
            ));
        }
    }

    Ok(candidates)
}
