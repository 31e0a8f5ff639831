//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end. Failures wiremock cannot produce
//! (truncated bodies, refused connections) use raw TCP fixtures.

use smap::crawler::CrawlStats;
use smap::{Client, Config, SiteMap, SmapError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "test-robot";

fn test_config(ignore_robots: bool) -> Config {
    Config::new(4, ignore_robots, USER_AGENT)
}

fn root_of(server: &MockServer) -> Url {
    Url::parse(&server.uri()).expect("Failed to parse mock server URI")
}

/// An HTML page whose body holds one anchor per href
fn html_page(hrefs: &[&str]) -> ResponseTemplate {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!("<a href=\"{}\">{}</a>\n", href, href))
        .collect();
    let body = format!(
        "<!DOCTYPE html><html><head><title>Title</title></head><body>\n{}</body></html>",
        anchors
    );
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

async fn mount_page(server: &MockServer, page_path: &str, hrefs: &[&str]) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_page(hrefs))
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(response)
        .mount(server)
        .await;
}

/// `/` -> `/1/` -> `/2/` -> {`/`, `/1/`}
async fn mount_ring(server: &MockServer) {
    mount_page(server, "/", &["/1/"]).await;
    mount_page(server, "/1/", &["/2/"]).await;
    mount_page(server, "/2/", &["/", "/1/"]).await;
}

async fn crawl(server: &MockServer, config: Config) -> (SiteMap, CrawlStats) {
    let client = Client::new(config).expect("Failed to create client");
    client
        .crawl_with_stats(&root_of(server))
        .await
        .expect("Crawl failed")
}

fn paths(sitemap: &SiteMap) -> Vec<&str> {
    sitemap.paths()
}

fn link_paths(sitemap: &SiteMap, page: &str) -> Vec<String> {
    sitemap.get(page).expect("page missing").links.paths()
}

fn linked_from_paths(sitemap: &SiteMap, page: &str) -> Vec<String> {
    let mut paths = sitemap.get(page).expect("page missing").linked_from.paths();
    paths.sort();
    paths
}

/// Checks the properties every finished crawl must hold
fn assert_consistent(sitemap: &SiteMap, stats: &CrawlStats) {
    assert_eq!(stats.jobs_created, stats.jobs_completed);
    assert_eq!(stats.jobs_created, stats.paths_scheduled);
    assert_eq!(stats.pages_mapped + stats.pages_failed, stats.jobs_completed);

    for page in sitemap.pages() {
        for link in &page.links {
            assert_ne!(link.path(), page.path(), "self link on {}", page.path());
            assert_ne!(link.url, page.url, "self link on {}", page.path());

            let target = sitemap
                .get(link.path())
                .unwrap_or_else(|| panic!("{} links to missing {}", page.path(), link.path()));
            assert!(
                target.linked_from.iter().any(|from| from.url == page.url),
                "{} is missing a backlink from {}",
                link.path(),
                page.path()
            );
        }
    }
}

/// Serves every connection a response whose body is shorter than its
/// Content-Length, then closes the socket
async fn truncated_body_server(content_type: &'static str) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local address");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: 100\r\n\r\nUser-agent",
                    content_type
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    Url::parse(&format!("http://{}/", addr)).expect("Failed to build fixture URL")
}

/// A root URL on a port nothing listens on
fn refused_root() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local address");
    drop(listener);
    Url::parse(&format!("http://{}/", addr)).expect("Failed to build fixture URL")
}

#[tokio::test]
async fn test_ring_site() {
    let server = MockServer::start().await;
    mount_ring(&server).await;

    let (sitemap, stats) = crawl(&server, test_config(false)).await;

    assert_eq!(paths(&sitemap), vec!["/", "/1/", "/2/"]);
    assert_eq!(link_paths(&sitemap, "/"), vec!["/1/"]);
    assert_eq!(link_paths(&sitemap, "/1/"), vec!["/2/"]);
    assert_eq!(link_paths(&sitemap, "/2/"), vec!["/", "/1/"]);

    assert_eq!(linked_from_paths(&sitemap, "/"), vec!["/2/"]);
    assert_eq!(linked_from_paths(&sitemap, "/1/"), vec!["/", "/2/"]);
    assert_eq!(linked_from_paths(&sitemap, "/2/"), vec!["/1/"]);

    assert_eq!(stats.jobs_created, 3);
    assert_eq!(stats.pages_failed, 0);
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_ring_edges_flag_known_targets() {
    let server = MockServer::start().await;
    mount_ring(&server).await;

    let (sitemap, _) = crawl(&server, test_config(false)).await;

    let page2 = sitemap.get("/2/").expect("page missing");
    assert!(page2.links.iter().all(|link| link.already_scheduled));

    let root = sitemap.get("/").expect("page missing");
    assert!(!root.links.iter().next().expect("no links").already_scheduled);
}

#[tokio::test]
async fn test_redirect() {
    let server = MockServer::start().await;
    mount_page(&server, "/", &["/1/"]).await;
    Mock::given(method("GET"))
        .and(path("/1/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/2/"))
        .mount(&server)
        .await;
    mount_page(&server, "/2/", &["/"]).await;

    let (sitemap, stats) = crawl(&server, test_config(false)).await;

    let redirected = sitemap.get("/1/").expect("redirected page missing");
    assert!(redirected.is_redirect);
    assert_eq!(
        redirected.redirects_to.as_ref().map(|url| url.path()),
        Some("/2/")
    );
    assert_eq!(link_paths(&sitemap, "/"), vec!["/1/"]);
    assert_eq!(link_paths(&sitemap, "/1/"), vec!["/"]);

    // Redirect targets are recorded, not crawled
    assert!(!sitemap.contains("/2/"));

    assert!(!sitemap.get("/").expect("root missing").is_redirect);
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_error_page_is_pruned() {
    let server = MockServer::start().await;
    mount_page(&server, "/", &["/1/", "/3/"]).await;
    mount_page(&server, "/1/", &["/3/", "/"]).await;
    Mock::given(method("GET"))
        .and(path("/3/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let (sitemap, stats) = crawl(&server, test_config(false)).await;

    assert_eq!(paths(&sitemap), vec!["/", "/1/"]);
    assert_eq!(link_paths(&sitemap, "/"), vec!["/1/"]);
    assert_eq!(link_paths(&sitemap, "/1/"), vec!["/"]);

    assert_eq!(stats.pages_failed, 1);
    assert_eq!(stats.links_pruned, 2);
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_non_html_page_is_pruned() {
    let server = MockServer::start().await;
    mount_page(&server, "/", &["/1/", "/data/"]).await;
    mount_page(&server, "/1/", &[]).await;
    Mock::given(method("GET"))
        .and(path("/data/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let (sitemap, stats) = crawl(&server, test_config(false)).await;

    assert_eq!(paths(&sitemap), vec!["/", "/1/"]);
    assert_eq!(link_paths(&sitemap, "/"), vec!["/1/"]);
    assert_eq!(stats.pages_failed, 1);
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_robots_disallow() {
    let server = MockServer::start().await;
    mount_robots(
        &server,
        ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /1/\n"),
    )
    .await;
    mount_page(&server, "/", &["/1/", "/2/"]).await;
    mount_page(&server, "/2/", &["/1/", "/"]).await;
    Mock::given(method("GET"))
        .and(path("/1/"))
        .respond_with(html_page(&["/"]))
        .expect(0)
        .mount(&server)
        .await;

    let (sitemap, stats) = crawl(&server, test_config(false)).await;

    assert_eq!(paths(&sitemap), vec!["/", "/2/"]);
    assert_eq!(link_paths(&sitemap, "/"), vec!["/2/"]);
    assert_eq!(link_paths(&sitemap, "/2/"), vec!["/"]);
    assert!(sitemap
        .pages()
        .all(|page| !page.linked_from.paths().contains(&"/1/".to_string())));
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_robots_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /\n"))
        .expect(0)
        .mount(&server)
        .await;
    mount_ring(&server).await;

    let (sitemap, stats) = crawl(&server, test_config(true)).await;

    assert_eq!(paths(&sitemap), vec!["/", "/1/", "/2/"]);
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_robots_server_error_allows_all() {
    let server = MockServer::start().await;
    mount_robots(&server, ResponseTemplate::new(503)).await;
    mount_ring(&server).await;

    let (sitemap, stats) = crawl(&server, test_config(false)).await;

    assert_eq!(paths(&sitemap), vec!["/", "/1/", "/2/"]);
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_robots_truncated_body_is_fatal() {
    let root = truncated_body_server("text/plain").await;
    let client = Client::new(test_config(false)).expect("Failed to create client");

    let err = client.crawl(&root).await.unwrap_err();
    assert!(matches!(err, SmapError::RobotsRead { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_robots_connection_refused_is_fatal() {
    let client = Client::new(test_config(false)).expect("Failed to create client");

    let err = client.crawl(&refused_root()).await.unwrap_err();
    assert!(matches!(err, SmapError::RobotsFetch { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_truncated_page_fails_only_that_page() {
    let root = truncated_body_server("text/html").await;
    let client = Client::new(test_config(true)).expect("Failed to create client");

    let (sitemap, stats) = client
        .crawl_with_stats(&root)
        .await
        .expect("page failures must not fail the crawl");

    assert!(sitemap.is_empty());
    assert_eq!(stats.pages_failed, 1);
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_duplicate_anchors_recorded_per_occurrence() {
    let server = MockServer::start().await;
    mount_page(&server, "/", &["/1/", "/1", "1/"]).await;
    Mock::given(method("GET"))
        .and(path("/1/"))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&server)
        .await;

    let (sitemap, stats) = crawl(&server, test_config(false)).await;

    assert_eq!(link_paths(&sitemap, "/"), vec!["/1/", "/1/", "/1/"]);
    let flags: Vec<bool> = sitemap
        .get("/")
        .expect("root missing")
        .links
        .iter()
        .map(|link| link.already_scheduled)
        .collect();
    assert_eq!(flags, vec![false, true, true]);

    assert_eq!(linked_from_paths(&sitemap, "/1/"), vec!["/", "/", "/"]);
    assert_eq!(stats.jobs_created, 2);
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_filters_foreign_and_protected_links() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        &[
            "/",
            "https://other.example/1/",
            "/cdn-cgi/l/email-protection#abc",
            "mailto:someone@example.com",
            "/1/",
        ],
    )
    .await;
    mount_page(&server, "/1/", &["/1/"]).await;

    let (sitemap, stats) = crawl(&server, test_config(false)).await;

    assert_eq!(paths(&sitemap), vec!["/", "/1/"]);
    assert_eq!(link_paths(&sitemap, "/"), vec!["/1/"]);
    assert!(link_paths(&sitemap, "/1/").is_empty());
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_dense_site_terminates() {
    let server = MockServer::start().await;

    let page_paths: Vec<String> = (1..=30).map(|i| format!("/{}/", i)).collect();
    let hrefs: Vec<&str> = page_paths.iter().map(String::as_str).collect();

    mount_page(&server, "/", &hrefs).await;
    for page_path in &page_paths {
        mount_page(&server, page_path, &hrefs).await;
    }

    let (sitemap, stats) = crawl(&server, test_config(false)).await;

    assert_eq!(sitemap.len(), 31);
    assert_eq!(stats.jobs_created, 31);
    assert_eq!(linked_from_paths(&sitemap, "/5/").len(), 30);
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_single_worker() {
    let server = MockServer::start().await;
    mount_ring(&server).await;

    let (sitemap, stats) = crawl(&server, Config::new(1, false, USER_AGENT)).await;

    assert_eq!(paths(&sitemap), vec!["/", "/1/", "/2/"]);
    assert_consistent(&sitemap, &stats);
}

#[tokio::test]
async fn test_user_agent_header_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(wiremock::matchers::header("user-agent", USER_AGENT))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&server)
        .await;

    let (sitemap, _) = crawl(&server, test_config(false)).await;
    assert_eq!(paths(&sitemap), vec!["/"]);
}

#[tokio::test]
async fn test_non_root_target_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_page(&[]))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(test_config(false)).expect("Failed to create client");
    let target = root_of(&server).join("/blog/").expect("Failed to build target");

    let err = client.crawl(&target).await.unwrap_err();
    assert!(matches!(err, SmapError::InvalidTarget { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_invalid_worker_count_rejected() {
    let err = Client::new(Config::new(-2, false, USER_AGENT)).unwrap_err();
    assert!(matches!(err, SmapError::Config(_)));
    assert!(err.to_string().contains("max_workers must be above 0"));
}

#[tokio::test]
async fn test_client_reused_across_crawls() {
    let first = MockServer::start().await;
    mount_ring(&first).await;
    let second = MockServer::start().await;
    mount_page(&second, "/", &[]).await;

    let client = Client::new(test_config(false)).expect("Failed to create client");

    let first_map = client.crawl(&root_of(&first)).await.expect("first crawl failed");
    let second_map = client.crawl(&root_of(&second)).await.expect("second crawl failed");

    assert_eq!(first_map.len(), 3);
    assert_eq!(second_map.len(), 1);
}

#[tokio::test]
async fn test_json_export() {
    let server = MockServer::start().await;
    mount_ring(&server).await;

    let (sitemap, _) = crawl(&server, test_config(false)).await;
    let json = smap::output::to_json(&sitemap).expect("Failed to render JSON");
    let value: serde_json::Value = serde_json::from_str(&json).expect("invalid JSON");

    assert_eq!(value["/"]["path"], "/");
    assert_eq!(value["/"]["links"], serde_json::json!(["/1/"]));
    assert_eq!(value["/"]["is_redirect"], false);
    assert_eq!(value["/"]["redirects_to"], serde_json::Value::Null);
    assert_eq!(value["/2/"]["links"], serde_json::json!(["/", "/1/"]));
}
