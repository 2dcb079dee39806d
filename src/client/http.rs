use std::time::{Duration, Instant};

use anyhow::Context;
use reqwest::{
    Method,
    blocking::Client,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;

use crate::{
    client::config::ClientConfig,
    foundation::error::{VideodbError, VideodbResult},
};

const STATUS_PROCESSING: &str = "processing";
const STATUS_IN_PROGRESS: &str = "in progress";

/// `x-videodb-client` value sent with every request.
pub fn client_header_value() -> String {
    format!("videodb-rust/{}", env!("CARGO_PKG_VERSION"))
}

/// Blocking JSON client for the VideoDB REST API.
///
/// Every call returns the envelope's `data` payload, or `None` when the API
/// accepted an async job without returning data.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl HttpClient {
    /// Build a client with the authentication and client headers installed.
    pub fn new(config: &ClientConfig) -> VideodbResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        insert_header(&mut headers, "x-access-token", config.api_key())?;
        insert_header(&mut headers, "x-videodb-client", &client_header_value())?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (key, value) in format_headers(config.extra_headers()) {
            insert_header(&mut headers, &key, &value)?;
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .use_rustls_tls()
            .build()
            .context("build http client")?;

        tracing::debug!(base_url = %config.endpoint(), "initialized http client");
        Ok(Self {
            client,
            base_url: config.endpoint().to_string(),
            poll_interval: config.poll_every(),
            poll_timeout: config.poll_deadline(),
        })
    }

    /// The API endpoint requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base_url}/{path}`.
    pub fn get(&self, path: &str) -> VideodbResult<Option<Value>> {
        self.request(Method::GET, path, None)
    }

    /// `POST {base_url}/{path}` with a JSON body.
    pub fn post(&self, path: &str, body: &Value) -> VideodbResult<Option<Value>> {
        self.request(Method::POST, path, Some(body))
    }

    /// `PUT {base_url}/{path}` with a JSON body.
    pub fn put(&self, path: &str, body: &Value) -> VideodbResult<Option<Value>> {
        self.request(Method::PUT, path, Some(body))
    }

    /// `PATCH {base_url}/{path}` with a JSON body.
    pub fn patch(&self, path: &str, body: &Value) -> VideodbResult<Option<Value>> {
        self.request(Method::PATCH, path, Some(body))
    }

    /// `DELETE {base_url}/{path}`.
    pub fn delete(&self, path: &str) -> VideodbResult<Option<Value>> {
        self.request(Method::DELETE, path, None)
    }

    #[tracing::instrument(skip(self, body), fields(base_url = %self.base_url))]
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> VideodbResult<Option<Value>> {
        let url = join_url(&self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().map_err(transport_error)?;
        let status = resp.status().as_u16();
        let text = resp.text().map_err(transport_error)?;
        tracing::debug!(status, bytes = text.len(), "response received");

        match parse_envelope(status, &text)? {
            Envelope::Ready(data) => Ok(data),
            Envelope::Accepted => {
                tracing::debug!("async job accepted");
                Ok(None)
            }
            Envelope::Processing { output_url } => {
                let final_envelope = self.poll_output(&output_url)?;
                finish_polled(&final_envelope)
            }
        }
    }

    /// Poll `url` until its status leaves `processing`/`in progress`.
    ///
    /// Transport failures while polling are retried until the deadline.
    /// A deadline past the clock's range means poll forever.
    fn poll_output(&self, url: &str) -> VideodbResult<Value> {
        let deadline = Instant::now().checked_add(self.poll_timeout);
        loop {
            match self.fetch_json(url) {
                Ok(body) => {
                    if let Some(done) = poll_step(&body) {
                        return Ok(done);
                    }
                    let percentage = body
                        .get("data")
                        .and_then(|d| d.get("percentage"))
                        .and_then(Value::as_f64);
                    tracing::debug!(?percentage, "waiting for processing to complete");
                }
                Err(err) => tracing::debug!(error = %err, "poll attempt failed"),
            }
            if let Some(deadline) = deadline
                && Instant::now()
                    .checked_add(self.poll_interval)
                    .is_none_or(|next| next > deadline)
            {
                return Err(VideodbError::timeout(format!(
                    "Timeout error: output still processing after {}s",
                    self.poll_timeout.as_secs()
                )));
            }
            std::thread::sleep(self.poll_interval);
        }
    }

    fn fetch_json(&self, url: &str) -> VideodbResult<Value> {
        let text = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.text())
            .map_err(transport_error)?;
        serde_json::from_str(&text)
            .map_err(|_| VideodbError::invalid_request(format!("Invalid request: {text}")))
    }
}

fn insert_header(headers: &mut HeaderMap, key: &str, value: &str) -> VideodbResult<()> {
    let name = HeaderName::from_bytes(key.as_bytes())
        .map_err(|_| VideodbError::invalid_argument(format!("invalid header name '{key}'")))?;
    let value = HeaderValue::from_str(value)
        .map_err(|_| VideodbError::invalid_argument(format!("invalid value for header '{key}'")))?;
    headers.insert(name, value);
    Ok(())
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Turn caller header keys into `x-<lowercase, '_' as '-'>` form.
pub(crate) fn format_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(k, v)| (format!("x-{}", k.to_lowercase().replace('_', "-")), v.clone()))
        .collect()
}

#[derive(Debug, PartialEq)]
pub(crate) enum Envelope {
    /// `success: true`; carries `data` when present.
    Ready(Option<Value>),
    /// Async job accepted; nothing to return.
    Accepted,
    /// Sync job still running; final envelope lives at `output_url`.
    Processing { output_url: String },
}

/// Classify one HTTP response by status code and envelope fields.
pub(crate) fn parse_envelope(status: u16, body: &str) -> VideodbResult<Envelope> {
    let json: Option<Value> = serde_json::from_str(body).ok();

    if status >= 400 {
        let message = match &json {
            Some(v) => v
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string(),
            None => body.to_string(),
        };
        return Err(if status == 401 {
            VideodbError::authentication(format!("Error: {message}"))
        } else {
            VideodbError::invalid_request(format!("Invalid request: {message}"))
        });
    }

    let json = json.ok_or_else(|| VideodbError::invalid_request(format!("Invalid request: {body}")))?;

    if json.get("status").and_then(Value::as_str) == Some(STATUS_PROCESSING) {
        let request_type = json
            .get("request_type")
            .and_then(Value::as_str)
            .unwrap_or("sync");
        match request_type {
            "async" => return Ok(Envelope::Accepted),
            "sync" => {
                let output_url = json
                    .get("data")
                    .and_then(|d| d.get("output_url"))
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        VideodbError::invalid_request(
                            "Invalid request: processing response is missing output_url",
                        )
                    })?;
                return Ok(Envelope::Processing {
                    output_url: output_url.to_string(),
                });
            }
            _ => {}
        }
    }

    finish_polled(&json).map(Envelope::Ready)
}

/// Apply the success rule to a final envelope.
pub(crate) fn finish_polled(json: &Value) -> VideodbResult<Option<Value>> {
    if json.get("success").and_then(Value::as_bool) == Some(true) {
        return Ok(json.get("data").filter(|d| !d.is_null()).cloned());
    }
    let message = json
        .get("message")
        .map(|m| m.as_str().map(str::to_string).unwrap_or_else(|| m.to_string()))
        .unwrap_or_else(|| "None".to_string());
    Err(VideodbError::invalid_request(format!(
        "Invalid request: {message}"
    )))
}

/// `None` while the output is still processing; otherwise the final envelope.
pub(crate) fn poll_step(body: &Value) -> Option<Value> {
    match body.get("status").and_then(Value::as_str) {
        Some(STATUS_PROCESSING | STATUS_IN_PROGRESS) => None,
        _ => Some(body.get("response").filter(|r| !r.is_null()).unwrap_or(body).clone()),
    }
}

pub(crate) fn transport_error(err: reqwest::Error) -> VideodbError {
    if err.is_timeout() {
        VideodbError::timeout("Timeout error: Request timed out")
    } else if err.is_connect() {
        VideodbError::invalid_request("Invalid request: Connection error")
    } else {
        VideodbError::invalid_request(format!("Invalid request: {err}"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/client/http.rs"]
mod tests;
