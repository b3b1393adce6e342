//! Summary client over a real socket

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use recap_core::config::RecapConfig;
use recap_core::summary::{SummaryClient, SummaryError, SummaryOutcome, UreqTransport};

/// Serve one request with the given status line and body; returns the request body
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/v1", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8(request_body).unwrap()
    });

    (base_url, handle)
}

fn config_for(base_url: String) -> RecapConfig {
    RecapConfig {
        api_key: "sk-local".to_string(),
        api_base_url: base_url,
        request_timeout_secs: Some(10),
        ..Default::default()
    }
}

#[test]
fn test_error_status_returns_original_content() {
    let (base_url, server) = serve_once(
        "500 Internal Server Error",
        r#"{"error":{"message":"The server had an error"}}"#,
    );
    let client = SummaryClient::new(UreqTransport::new(Some(std::time::Duration::from_secs(10))));

    let outcome = client.summarize("Original digest.", &config_for(base_url));
    server.join().unwrap();

    assert_eq!(outcome.text(), "Original digest.");
    assert_eq!(
        outcome,
        SummaryOutcome::FellBack {
            text: "Original digest.".to_string(),
            reason: SummaryError::Status {
                status: 500,
                message: "The server had an error".to_string(),
            },
        }
    );
}

#[test]
fn test_success_over_http() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Short recap."},"finish_reason":"stop"}]}"#,
    );
    let client = SummaryClient::new(UreqTransport::default());

    let summary = client.summarize_text("Long digest.", &config_for(base_url));
    let request = server.join().unwrap();

    assert_eq!(summary, "Short recap.");
    let json: serde_json::Value = serde_json::from_str(&request).unwrap();
    assert_eq!(json["model"], "gpt-4o-mini");
    assert!(json["messages"][1]["content"]
        .as_str()
        .unwrap()
        .ends_with("Long digest."));
}

#[test]
fn test_unreachable_endpoint_falls_back() {
    // Bind then drop to get a port nobody listens on
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = SummaryClient::new(UreqTransport::default());
    let config = config_for(format!("http://127.0.0.1:{}/v1", port));

    match client.summarize("Kept.", &config) {
        SummaryOutcome::FellBack { text, reason } => {
            assert_eq!(text, "Kept.");
            assert!(matches!(reason, SummaryError::Transport(_)));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}
