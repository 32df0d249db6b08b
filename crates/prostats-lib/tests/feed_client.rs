//! End-to-end run of the driver against a local HTTP feed.

use prostats_lib::{
    CancellationToken, ClientConfig, FeedClient, RetryPolicy, StatsOutcome, get_match_statistics,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const PAGE_2023: &str = r#"[
    {"match_id": 7003, "start_time": 1700000300, "duration": 1000, "radiant_score": 10, "dire_score": 8, "league_name": "A"},
    {"match_id": 7002, "start_time": 1700000200, "duration": 2200, "radiant_score": 15, "dire_score": 12, "league_name": "A"},
    {"match_id": 7001, "start_time": 1700000100, "duration": 3000, "radiant_score": 20, "dire_score": 25, "league_name": "B"}
]"#;

// 2022-11-14
const PAGE_2022: &str = r#"[
    {"match_id": 6999, "start_time": 1668400000, "duration": 2000, "radiant_score": 1, "dire_score": 1}
]"#;

/// Serves one scripted `(status, body)` per connection and records request lines.
async fn serve(responses: Vec<(u16, &'static str)>) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);

    tokio::spawn(async move {
        for (status, body) in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let line = String::from_utf8_lossy(&buf)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();
            log.lock().unwrap().push(line);

            let reason = if status == 429 { "Too Many Requests" } else { "OK" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}"), requests)
}

#[tokio::test]
async fn rate_limited_feed_is_paginated_to_the_year_boundary() {
    let (base_url, requests) = serve(vec![
        (429, r#"{"error": "rate limit exceeded"}"#),
        (429, r#"{"error": "rate limit exceeded"}"#),
        (200, PAGE_2023),
        (200, PAGE_2022),
    ])
    .await;

    let client = FeedClient::new(ClientConfig {
        base_url,
        retry: RetryPolicy::fixed(Duration::from_millis(10), 3),
        ..Default::default()
    })
    .unwrap();

    let outcome = get_match_statistics(&client, 2023, &CancellationToken::new())
        .await
        .unwrap();

    let StatsOutcome::Report(report) = outcome else {
        panic!("expected a report");
    };
    assert_eq!(report.total_matches(), 3);
    assert_eq!(report.longest_match_id(), 7001);
    assert_eq!(report.shortest_match_id(), 7003);
    assert_eq!(report.pages_scanned(), 2);

    let requests = requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![
            "GET /proMatches HTTP/1.1".to_string(),
            "GET /proMatches HTTP/1.1".to_string(),
            "GET /proMatches HTTP/1.1".to_string(),
            "GET /proMatches?less_than_match_id=7001 HTTP/1.1".to_string(),
        ]
    );
}
