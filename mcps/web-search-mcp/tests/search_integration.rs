//! End-to-end fallback tests against mocked search engines

use mcp_common::{content_json, EmbeddableError, EmbeddableMcp};
use web_search_mcp::{Config, FailureKind, SearchError, Searcher, WebSearchMcpServer};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DDG_RESULTS: &str = r#"<html><body><div id="links">
  <div class="result results_links web-result">
    <h2 class="result__title">
      <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fchoosealicense.com%2Flicenses%2F&amp;rut=x">Licenses | Choose a License</a>
    </h2>
    <a class="result__snippet">Open source licenses grant others permission to use the software.</a>
  </div>
  <div class="result results_links web-result">
    <h2 class="result__title">
      <a class="result__a" href="https://opensource.org/licenses">OSI Approved Licenses</a>
    </h2>
  </div>
</div></body></html>"#;

const DDG_NO_RESULTS: &str = r#"<html><body><div id="links">
  <div class="no-results">No results.</div>
</div></body></html>"#;

const GOOGLE_RESULTS: &str = r#"<html><body><div id="search">
  <div class="g">
    <a href="/url?q=https://www.gnu.org/licenses/license-list.html&amp;sa=U"><h3>Various Licenses</h3></a>
    <div class="VwiC3b">Comments on many free software licenses.</div>
  </div>
</div></body></html>"#;

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.duckduckgo.url = server.uri();
    config.google.url = server.uri();
    config.search.timeout_seconds = 2;
    config.search.user_agent = Some("web-search-mcp-test".to_string());
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

#[tokio::test]
async fn test_duckduckgo_serves_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .and(body_string_contains("q=open+source+license+comparison"))
        .and(header("user-agent", "web-search-mcp-test"))
        .respond_with(html(DDG_RESULTS))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html(GOOGLE_RESULTS))
        .expect(0)
        .mount(&server)
        .await;

    let searcher = Searcher::from_config(&config_for(&server)).unwrap();
    let outcome = searcher
        .search_outcome("open source license comparison", 10)
        .await
        .unwrap();

    assert_eq!(outcome.backend, "duckduckgo");
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].url, "https://choosealicense.com/licenses/");
    assert_eq!(outcome.results[0].title, "Licenses | Choose a License");
    assert_eq!(outcome.results[1].url, "https://opensource.org/licenses");
    assert_eq!(outcome.results[1].snippet, "");
}

#[tokio::test]
async fn test_falls_back_to_google_when_duckduckgo_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "open source license comparison"))
        .and(query_param("num", "10"))
        .respond_with(html(GOOGLE_RESULTS))
        .expect(1)
        .mount(&server)
        .await;

    let searcher = Searcher::from_config(&config_for(&server)).unwrap();
    let outcome = searcher
        .search_outcome("open source license comparison", 10)
        .await
        .unwrap();

    assert_eq!(outcome.backend, "google");
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(
        outcome.results[0].url,
        "https://www.gnu.org/licenses/license-list.html"
    );
}

#[tokio::test]
async fn test_empty_duckduckgo_page_does_not_fall_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(html(DDG_NO_RESULTS))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html(GOOGLE_RESULTS))
        .expect(0)
        .mount(&server)
        .await;

    let searcher = Searcher::from_config(&config_for(&server)).unwrap();
    let results = searcher.search("zzqxv nothing matches", 10).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_unrecognized_duckduckgo_markup_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(html(
            r#"<html><body><div id="links">
              <div class="result web-result"><a class="result__link" href="https://a.example/">A</a></div>
            </div></body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html(GOOGLE_RESULTS))
        .expect(1)
        .mount(&server)
        .await;

    let searcher = Searcher::from_config(&config_for(&server)).unwrap();
    let outcome = searcher.search_outcome("rust", 10).await.unwrap();
    assert_eq!(outcome.backend, "google");
    assert_eq!(outcome.results.len(), 1);
}

#[tokio::test]
async fn test_all_strategies_failing_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(html("<html><body><p>Something unexpected</p></body></html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let searcher = Searcher::from_config(&config_for(&server)).unwrap();
    let err = searcher.search("rust", 10).await.unwrap_err();

    match err {
        SearchError::SearchUnavailable { attempts } => {
            assert_eq!(attempts.len(), 2);
            assert_eq!(attempts[0].strategy, "duckduckgo");
            assert_eq!(attempts[0].kind, FailureKind::Parse);
            assert_eq!(attempts[1].strategy, "google");
            assert_eq!(attempts[1].kind, FailureKind::HttpStatus(500));
        }
        other => panic!("expected SearchUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_backend_times_out_and_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(html(DDG_RESULTS).set_delay(std::time::Duration::from_secs(5)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html(GOOGLE_RESULTS))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.search.timeout_seconds = 1;
    let searcher = Searcher::from_config(&config).unwrap();
    let outcome = searcher.search_outcome("rust", 10).await.unwrap();
    assert_eq!(outcome.backend, "google");
}

#[tokio::test]
async fn test_tool_call_through_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(html(GOOGLE_RESULTS))
        .mount(&server)
        .await;

    let mcp = WebSearchMcpServer::new(config_for(&server)).unwrap();
    let result = mcp
        .call_tool(
            "search_web",
            serde_json::json!({ "topic": "open source license comparison", "num_results": 5 }),
        )
        .await
        .unwrap();

    assert!(!result.is_error.unwrap_or(false));
    let body = content_json(&result).unwrap();
    assert_eq!(body["topic"], "open source license comparison");
    assert_eq!(body["backend"], "google");
    assert_eq!(body["count"], body["results"].as_array().unwrap().len());
}

#[tokio::test]
async fn test_tool_call_reports_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let mcp = WebSearchMcpServer::new(config_for(&server)).unwrap();
    let result = mcp
        .call_tool("search_web", serde_json::json!({ "topic": "rust" }))
        .await
        .unwrap();

    assert!(result.is_error.unwrap_or(false));
    let body = content_json(&result).unwrap();
    assert_eq!(body["attempts"][0]["kind"]["type"], "blocked");
    assert_eq!(body["attempts"][1]["kind"]["type"], "blocked");
}

#[tokio::test]
async fn test_blank_topic_never_reaches_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(html(DDG_RESULTS))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(html(GOOGLE_RESULTS))
        .expect(0)
        .mount(&server)
        .await;

    let mcp = WebSearchMcpServer::new(config_for(&server)).unwrap();
    let result = mcp
        .call_tool("search_web", serde_json::json!({ "topic": "  \t " }))
        .await;
    assert!(matches!(result, Err(EmbeddableError::McpError(_))));
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_live_search() {
    let searcher = Searcher::from_config(&Config::default()).unwrap();
    let results = searcher
        .search("open source license comparison", 5)
        .await
        .unwrap();
    assert!(results.len() <= 5);
    for result in &results {
        assert!(result.url.starts_with("http"));
    }
}
