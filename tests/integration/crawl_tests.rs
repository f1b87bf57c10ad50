//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a paginated WARN listing and run the
//! full crawl, filter and alert cycle end-to-end over HTTP.

use warn_alerts::config::{CrawlerConfig, UserAgentConfig};
use warn_alerts::crawler::{Coordinator, HttpFetcher};
use warn_alerts::filter::filter_records;
use warn_alerts::output::{format_alert, summary_message};
use warn_alerts::url::{listing_url, parse_origin};
use warn_alerts::WarnError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEADERS: &str = "<tr><th>Company Name</th><th>State Notification Date</th>\
    <th>Layoff Date</th><th>Employees Affected</th><th>Industry</th><th>Attachment</th></tr>";

/// Renders one listing row; an empty date leaves the date cell blank
fn row(company: &str, date: &str, token: &str) -> String {
    format!(
        r#"<tr>
            <td><b>{company}</b><br/>100 Main St, Miami, FL</td>
            <td>{date}</td><td>06/01/2025</td><td>45</td><td>Health Care</td>
            <td><form method="post"><input type="hidden" name="file" value="{token}"/>
                <input type="submit" value="Download"/></form></td>
        </tr>"#
    )
}

/// Renders a listing page with a pager row linking to `pages`
///
/// The pager also carries an off-site share link that must never be fetched.
fn listing_page(rows: &[String], pages: &[u32]) -> String {
    let mut html = format!(
        "<html><head><title>WARN Notices</title></head><body>\
         <nav><a href=\"/Home/About\">About</a></nav><table>{}",
        HEADERS
    );
    for r in rows {
        html.push_str(r);
    }
    if !pages.is_empty() {
        html.push_str("<tr><td colspan=\"6\">");
        html.push_str(
            "<a href=\"https://www.facebook.com/sharer/sharer.php?u=warn&amp;page=share\">Share</a> ",
        );
        for n in pages {
            html.push_str(&format!(
                "<a href=\"/WarnList/Records?year=2025&amp;page={}\">{}</a> ",
                n, n
            ));
        }
        html.push_str("</td></tr>");
    }
    html.push_str("</table></body></html>");
    html
}

fn crawler_config() -> CrawlerConfig {
    CrawlerConfig {
        request_timeout_secs: 5,
        crawl_deadline_secs: 30,
        max_pages: 10,
    }
}

/// Builds an HTTP-backed coordinator pointed at the mock server
fn create_coordinator(server: &MockServer) -> Coordinator<HttpFetcher> {
    let origin = parse_origin(&server.uri()).expect("Failed to parse mock origin");
    let seed = listing_url(&origin, 2025);
    let fetcher = HttpFetcher::new(&UserAgentConfig::default(), &crawler_config())
        .expect("Failed to build HTTP fetcher");
    Coordinator::new(fetcher, origin, seed, crawler_config())
}

/// Mounts page 2 before the seed so the seed mock never answers it
async fn mount_page(server: &MockServer, page: Option<&str>, body: String, status: u16) {
    let mock = Mock::given(method("GET")).and(path("/WarnList/Records"));
    let mock = match page {
        Some(n) => mock.and(query_param("page", n)),
        None => mock.and(query_param("year", "2025")),
    };
    mock.respond_with(
        ResponseTemplate::new(status).set_body_raw(body.into_bytes(), "text/html; charset=utf-8"),
    )
    .expect(1)
    .mount(server)
    .await;
}

#[tokio::test]
async fn test_crawl_two_pages() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        Some("2"),
        listing_page(&[row("Globex Health", "02/03/2025", "globex.pdf")], &[1, 2]),
        200,
    )
    .await;
    mount_page(
        &mock_server,
        None,
        listing_page(
            &[
                row("Acme Corp", "01/15/2025", "acme.pdf"),
                row("Dateless Inc", "", "dateless.pdf"),
            ],
            &[1, 2],
        ),
        200,
    )
    .await;

    let outcome = create_coordinator(&mock_server)
        .run()
        .await
        .expect("Crawl failed");

    let names: Vec<&str> = outcome
        .records
        .iter()
        .map(|r| r.company_name.as_str())
        .collect();
    assert_eq!(names, vec!["Acme Corp", "Globex Health"]);

    let acme = &outcome.records[0];
    assert_eq!(acme.state_notification_date, "01/15/2025");
    assert_eq!(acme.employees_affected.as_deref(), Some("45"));
    assert_eq!(
        acme.filename_url,
        format!("{}/WarnList/DownloadAzureFile?file=acme.pdf", mock_server.uri())
    );

    // Page 1 links back to the seed and must not be fetched again
    assert_eq!(outcome.report.pages_fetched, 2);
    assert_eq!(outcome.report.pages_skipped, 0);
    assert_eq!(outcome.report.records, 2);
    assert_eq!(outcome.report.visited.len(), 2);
}

#[tokio::test]
async fn test_seed_server_error_is_fatal() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, None, "Service Unavailable".to_string(), 500).await;

    let result = create_coordinator(&mock_server).run().await;

    match result {
        Err(WarnError::Transport { status, url }) => {
            assert_eq!(status, 500);
            assert!(url.contains("/WarnList/Records"));
        }
        other => panic!("Expected transport error, got {:?}", other.map(|o| o.records)),
    }
}

#[tokio::test]
async fn test_later_page_failure_discards_records() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, Some("2"), String::new(), 404).await;
    mount_page(
        &mock_server,
        None,
        listing_page(&[row("Acme Corp", "01/15/2025", "acme.pdf")], &[2]),
        200,
    )
    .await;

    let result = create_coordinator(&mock_server).run().await;
    assert!(matches!(
        result,
        Err(WarnError::Transport { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_malformed_page_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        Some("2"),
        listing_page(&[row("Globex Health", "02/03/2025", "globex.pdf")], &[]),
        200,
    )
    .await;

    // The seed's table has no notification date column but still links on
    let malformed = "<html><body><table>\
        <tr><th>Company Name</th><th>Posted</th></tr>\
        <tr><td><b>Acme Corp</b></td><td>yesterday</td></tr>\
        <tr><td colspan=\"2\"><a href=\"/WarnList/Records?year=2025&amp;page=2\">2</a></td></tr>\
        </table></body></html>"
        .to_string();
    mount_page(&mock_server, None, malformed, 200).await;

    let outcome = create_coordinator(&mock_server)
        .run()
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].company_name, "Globex Health");
    assert_eq!(outcome.report.pages_fetched, 2);
    assert_eq!(outcome.report.pages_skipped, 1);
    assert_eq!(outcome.report.pages_processed(), 1);
}

#[tokio::test]
async fn test_crawl_filter_and_alert() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        Some("2"),
        listing_page(
            &[
                row("UHealth Jackson", "03/10/2025", "jackson.pdf"),
                row("Sunshine Grocers", "03/11/2025", "grocers.pdf"),
            ],
            &[],
        ),
        200,
    )
    .await;
    mount_page(
        &mock_server,
        None,
        listing_page(&[row("UHEALTH Tower", "01/15/2025", "tower.pdf")], &[2]),
        200,
    )
    .await;

    let outcome = create_coordinator(&mock_server)
        .run()
        .await
        .expect("Crawl failed");
    assert_eq!(outcome.records.len(), 3);

    let result = filter_records(&outcome.records, &["uhealth"]);
    assert_eq!(result.count, 2);
    assert_eq!(
        summary_message(result.count),
        "Returned 2 record(s) that matched, please review!"
    );

    let alert = format_alert(&result.records);
    let stanzas: Vec<&str> = alert.split("\n\n").collect();
    assert_eq!(stanzas.len(), 2);
    assert!(stanzas[0].starts_with("Company Name: UHEALTH Tower\n"));
    assert!(stanzas[1].starts_with("Company Name: UHealth Jackson\n"));
    assert!(alert.contains("PDF Attachment: "));
    assert!(alert.contains("DownloadAzureFile?file=jackson.pdf"));

    let none = filter_records(&outcome.records, &["initech"]);
    assert_eq!(
        summary_message(none.count),
        "Returned 0 record(s), no matches found."
    );
}
