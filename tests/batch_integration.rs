//! End-to-end batch tests: query file in, result files out.
//!
//! Backends point at a `wiremock` server; artifacts land in a temp dir.

use std::sync::Arc;

use dork_harvester::{load_queries, FileSink, QueryBatchRunner};
use dork_search::engines::{BingAdapter, DuckDuckGoAdapter, YahooAdapter};
use dork_search::{BackendAdapter, HarvestConfig, HttpTransport, MultiBackendHarvester};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn links_page(urls: &[&str]) -> String {
    let anchors: String = urls
        .iter()
        .map(|u| format!("<a href=\"{u}\">{u}</a>\n"))
        .collect();
    format!("<html><body>{anchors}<a href=\"/relative\">skip</a></body></html>")
}

fn runner(uri: &str, out: &std::path::Path) -> QueryBatchRunner<HttpTransport, FileSink> {
    let config = HarvestConfig {
        page_delay_ms: 0,
        timeout_seconds: 5,
        ..Default::default()
    };
    let transport = Arc::new(HttpTransport::new(&config).expect("client"));
    let adapters: Vec<Arc<dyn BackendAdapter>> = vec![
        Arc::new(BingAdapter::with_base_url(format!("{uri}/bing"))),
        Arc::new(DuckDuckGoAdapter::with_template(format!("{uri}/ddg?q={{query}}"))),
        Arc::new(YahooAdapter::with_template(format!("{uri}/yahoo?p={{query}}"))),
    ];
    let harvester = MultiBackendHarvester::new(config, transport)
        .expect("valid config")
        .with_adapters(adapters);
    QueryBatchRunner::new(harvester, FileSink::new(out))
}

#[tokio::test]
async fn query_file_produces_one_artifact_per_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bing"))
        .and(query_param("q", "inurl:admin login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(links_page(&["https://a.com/", "https://b.com/"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ddg"))
        .and(query_param("q", "inurl:admin login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(links_page(&["https://b.com/", "https://c.com/"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bing"))
        .and(query_param("q", "filetype:pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_string(links_page(&["https://docs.example/x.pdf"])))
        .mount(&server)
        .await;
    // Everything else (Yahoo, DuckDuckGo for the second query) is empty.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let query_file = dir.path().join("dorks.txt");
    std::fs::write(&query_file, "  inurl:admin login \n\n filetype:pdf\n").expect("write queries");
    let queries = load_queries(&query_file).expect("load");

    let out = dir.path().join("results");
    let summary = runner(&server.uri(), &out)
        .run(&queries, &CancellationToken::new())
        .await;

    assert_eq!(summary.written, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.total_urls, 4);

    let first = std::fs::read_to_string(out.join("search_results_inurl:admin_login.txt"))
        .expect("first artifact");
    let mut lines = first.lines();
    assert_eq!(
        lines.next(),
        Some("Total 3 unique URLs found for 'inurl:admin login' from all search engines:")
    );
    let mut urls: Vec<&str> = lines.collect();
    urls.sort_unstable();
    assert_eq!(urls, vec!["https://a.com/", "https://b.com/", "https://c.com/"]);

    let second = std::fs::read_to_string(out.join("search_results_filetype:pdf.txt"))
        .expect("second artifact");
    assert!(second.starts_with("Total 1 unique URLs found for 'filetype:pdf'"));
    assert!(second.contains("https://docs.example/x.pdf\n"));
}

#[tokio::test]
async fn unreachable_backends_still_write_an_empty_artifact() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let summary = runner(&server.uri(), dir.path())
        .run(&["down".to_string()], &CancellationToken::new())
        .await;

    assert_eq!(summary.failed, 1);
    let content =
        std::fs::read_to_string(dir.path().join("search_results_down.txt")).expect("artifact");
    assert_eq!(
        content,
        "Total 0 unique URLs found for 'down' from all search engines:\n"
    );
}

#[tokio::test]
async fn cancelled_batch_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(links_page(&["https://slow.example/"]))
                .set_delay(std::time::Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let dir = tempfile::tempdir().expect("tempdir");
    let summary = runner(&server.uri(), dir.path())
        .run(&["slow".to_string(), "later".to_string()], &cancel)
        .await;

    assert!(summary.cancelled);
    assert_eq!(summary.written, 0);
    let entries = std::fs::read_dir(dir.path()).expect("read dir").count();
    assert_eq!(entries, 0);
}
