use super::*;
use serde_json::json;

#[test]
fn success_returns_data() {
    let env = parse_envelope(200, r#"{"success": true, "data": {"stream_url": "s"}}"#).unwrap();
    assert_eq!(env, Envelope::Ready(Some(json!({"stream_url": "s"}))));

    let empty = parse_envelope(200, r#"{"success": true}"#).unwrap();
    assert_eq!(empty, Envelope::Ready(None));
}

#[test]
fn unsuccessful_envelope_is_invalid_request() {
    let err = parse_envelope(200, r#"{"success": false, "message": "bad timeline"}"#).unwrap_err();
    assert!(matches!(err, VideodbError::InvalidRequest(_)));
    assert_eq!(err.to_string(), "invalid request: Invalid request: bad timeline");
}

#[test]
fn non_json_body_is_invalid_request() {
    let err = parse_envelope(200, "<html>oops</html>").unwrap_err();
    assert!(matches!(err, VideodbError::InvalidRequest(_)));
    assert!(err.to_string().contains("<html>oops</html>"));
}

#[test]
fn http_401_is_authentication() {
    let err = parse_envelope(401, r#"{"message": "Invalid API key"}"#).unwrap_err();
    assert!(matches!(err, VideodbError::Authentication(_)));
    assert_eq!(err.to_string(), "authentication error: Error: Invalid API key");
}

#[test]
fn other_http_errors_are_invalid_request() {
    let err = parse_envelope(404, r#"{"message": "not found"}"#).unwrap_err();
    assert_eq!(err.to_string(), "invalid request: Invalid request: not found");

    let no_msg = parse_envelope(500, r#"{"error": 1}"#).unwrap_err();
    assert!(no_msg.to_string().contains("Unknown error"));

    let text = parse_envelope(502, "Bad Gateway").unwrap_err();
    assert!(matches!(text, VideodbError::InvalidRequest(_)));
    assert!(text.to_string().contains("Bad Gateway"));
}

#[test]
fn processing_async_returns_nothing() {
    let env = parse_envelope(
        200,
        r#"{"status": "processing", "request_type": "async", "data": {}}"#,
    )
    .unwrap();
    assert_eq!(env, Envelope::Accepted);
}

#[test]
fn processing_sync_points_at_output_url() {
    let env = parse_envelope(
        200,
        r#"{"status": "processing", "data": {"output_url": "https://api.example/out/1"}}"#,
    )
    .unwrap();
    assert_eq!(
        env,
        Envelope::Processing {
            output_url: "https://api.example/out/1".to_string()
        }
    );

    let missing = parse_envelope(200, r#"{"status": "processing", "request_type": "sync"}"#);
    assert!(matches!(missing, Err(VideodbError::InvalidRequest(_))));
}

#[test]
fn poll_step_waits_while_processing() {
    assert_eq!(poll_step(&json!({"status": "processing"})), None);
    assert_eq!(
        poll_step(&json!({"status": "in progress", "data": {"percentage": 40}})),
        None
    );

    let done = json!({"status": "done", "success": true, "data": {"stream_url": "s"}});
    assert_eq!(poll_step(&done), Some(done.clone()));

    let wrapped = json!({"status": "done", "response": {"success": true, "data": 1}});
    assert_eq!(poll_step(&wrapped), Some(json!({"success": true, "data": 1})));
}

#[test]
fn finish_polled_applies_success_rule() {
    assert_eq!(
        finish_polled(&json!({"success": true, "data": {"a": 1}})).unwrap(),
        Some(json!({"a": 1}))
    );
    let err = finish_polled(&json!({"success": false, "message": "render failed"})).unwrap_err();
    assert_eq!(err.to_string(), "invalid request: Invalid request: render failed");
}

#[test]
fn headers_are_prefixed_and_kebab_cased() {
    let formatted = format_headers(&[
        ("Team_ID".to_string(), "t-1".to_string()),
        ("trace".to_string(), "abc".to_string()),
    ]);
    assert_eq!(
        formatted,
        vec![
            ("x-team-id".to_string(), "t-1".to_string()),
            ("x-trace".to_string(), "abc".to_string()),
        ]
    );
}

#[test]
fn client_header_names_crate_version() {
    assert_eq!(
        client_header_value(),
        format!("videodb-rust/{}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn urls_join_with_single_slash() {
    assert_eq!(join_url("https://api.videodb.io", "timeline"), "https://api.videodb.io/timeline");
    assert_eq!(join_url("http://h/", "/editor"), "http://h/editor");
}

#[test]
fn new_rejects_invalid_config() {
    assert!(matches!(
        HttpClient::new(&ClientConfig::new("")),
        Err(VideodbError::Authentication(_))
    ));
    let bad_header = HttpClient::new(&ClientConfig::new("k").header("bad header", "v"));
    assert!(matches!(bad_header, Err(VideodbError::InvalidArgument(_))));
}

#[test]
fn new_keeps_endpoint() {
    let client = HttpClient::new(&ClientConfig::new("k").base_url("http://localhost:9/")).unwrap();
    assert_eq!(client.base_url(), "http://localhost:9");
}

// Minimal HTTP/1.1 server: one response per connection, every request recorded.
struct LocalServer {
    base_url: String,
    requests: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

impl LocalServer {
    fn start(reply: impl Fn(usize, &str, &str) -> (u16, String) + Send + 'static) -> Self {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));

        let seen = requests.clone();
        let base = base_url.clone();
        std::thread::spawn(move || {
            for (idx, stream) in listener.incoming().enumerate() {
                let Ok(mut stream) = stream else { break };
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                let head_end = loop {
                    let n = stream.read(&mut chunk).unwrap_or(0);
                    if n == 0 {
                        break None;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                        break Some(pos + 4);
                    }
                };
                let Some(head_end) = head_end else { continue };
                let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
                let content_length = head
                    .lines()
                    .filter_map(|l| l.split_once(':'))
                    .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                while buf.len() < head_end + content_length {
                    let n = stream.read(&mut chunk).unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }
                let request = String::from_utf8_lossy(&buf).to_string();

                let (status, body) = reply(idx, &base, &request);
                seen.lock().unwrap().push(request);
                let resp = format!(
                    "HTTP/1.1 {status} Status\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(resp.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { base_url, requests }
    }

    fn config(&self) -> ClientConfig {
        ClientConfig::new("k1")
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(5))
            .poll_interval(Duration::from_millis(10))
            .poll_timeout(Duration::from_secs(5))
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[test]
fn post_sends_default_and_extra_headers() {
    let server = LocalServer::start(|_, _, _| {
        (200, r#"{"success": true, "data": {"stream_url": "s"}}"#.to_string())
    });
    let client = HttpClient::new(&server.config().header("my_hdr", "v")).unwrap();

    let data = client.post("timeline", &json!({"request_type": "compile"})).unwrap();
    assert_eq!(data, Some(json!({"stream_url": "s"})));

    let reqs = server.requests();
    assert_eq!(reqs.len(), 1);
    let req = reqs[0].to_lowercase();
    assert!(req.starts_with("post /timeline http/1.1"), "{req}");
    assert!(req.contains("x-access-token: k1"));
    assert!(req.contains("x-my-hdr: v"));
    assert!(req.contains(&format!("x-videodb-client: {}", client_header_value())));
    assert!(req.contains("content-type: application/json"));
    assert!(req.ends_with(r#"{"request_type":"compile"}"#));
}

#[test]
fn every_method_reaches_the_api() {
    let server = LocalServer::start(|_, _, req| {
        let method = req.split_whitespace().next().unwrap_or_default().to_string();
        (200, format!(r#"{{"success": true, "data": {{"method": "{method}"}}}}"#))
    });
    let client = HttpClient::new(&server.config()).unwrap();

    let body = json!({"name": "x"});
    let got = [
        client.get("collection/default").unwrap(),
        client.put("collection/default", &body).unwrap(),
        client.patch("collection/default", &body).unwrap(),
        client.delete("collection/default").unwrap(),
    ];
    let methods: Vec<_> = got
        .iter()
        .map(|d| d.as_ref().unwrap()["method"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(methods, vec!["GET", "PUT", "PATCH", "DELETE"]);
    assert!(
        server
            .requests()
            .iter()
            .all(|r| r.split_whitespace().nth(1) == Some("/collection/default"))
    );
}

#[test]
fn sync_processing_is_polled_until_done() {
    let server = LocalServer::start(|idx, base, _| match idx {
        0 => (
            200,
            format!(r#"{{"status": "processing", "data": {{"output_url": "{base}/out/1"}}}}"#),
        ),
        1 => (200, r#"{"status": "processing", "data": {"percentage": 50}}"#.to_string()),
        _ => (
            200,
            r#"{"status": "done", "response": {"success": true, "data": {"stream_url": "s"}}}"#
                .to_string(),
        ),
    });
    let client = HttpClient::new(&server.config()).unwrap();

    let data = client.post("editor", &json!({})).unwrap();
    assert_eq!(data, Some(json!({"stream_url": "s"})));

    let reqs = server.requests();
    assert_eq!(reqs.len(), 3);
    assert!(reqs[1].starts_with("GET /out/1 "));
    assert!(reqs[2].starts_with("GET /out/1 "));
}

#[test]
fn polled_failure_is_invalid_request() {
    let server = LocalServer::start(|idx, base, _| match idx {
        0 => (
            200,
            format!(r#"{{"status": "processing", "data": {{"output_url": "{base}/out/2"}}}}"#),
        ),
        _ => (200, r#"{"success": false, "message": "render failed"}"#.to_string()),
    });
    let client = HttpClient::new(&server.config()).unwrap();
    let err = client.post("editor", &json!({})).unwrap_err();
    assert_eq!(err.to_string(), "invalid request: Invalid request: render failed");
}

#[test]
fn stuck_output_times_out() {
    let server = LocalServer::start(|idx, base, _| match idx {
        0 => (
            200,
            format!(r#"{{"status": "processing", "data": {{"output_url": "{base}/out/3"}}}}"#),
        ),
        _ => (200, r#"{"status": "in progress"}"#.to_string()),
    });
    let cfg = server.config().poll_timeout(Duration::from_millis(100));
    let client = HttpClient::new(&cfg).unwrap();

    let err = client.post("editor", &json!({})).unwrap_err();
    assert!(matches!(err, VideodbError::Timeout(_)));
    assert!(server.requests().len() >= 2);
}

#[test]
fn unbounded_poll_deadline_does_not_overflow() {
    let server = LocalServer::start(|idx, base, _| match idx {
        0 => (
            200,
            format!(r#"{{"status": "processing", "data": {{"output_url": "{base}/out/4"}}}}"#),
        ),
        1 => (200, r#"{"status": "processing"}"#.to_string()),
        _ => (200, r#"{"success": true, "data": {"ok": true}}"#.to_string()),
    });
    let cfg = server.config().poll_timeout(Duration::MAX);
    let client = HttpClient::new(&cfg).unwrap();

    assert_eq!(
        client.post("editor", &json!({})).unwrap(),
        Some(json!({"ok": true}))
    );
}

#[test]
fn http_status_errors_map_through_transport() {
    let server = LocalServer::start(|_, _, _| (401, r#"{"message": "Invalid API key"}"#.to_string()));
    let client = HttpClient::new(&server.config()).unwrap();
    let err = client.get("collection").unwrap_err();
    assert!(matches!(err, VideodbError::Authentication(_)));
}
