use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::errors::ReplayError;
use crate::http_request::{Header, HttpRequest};

/// The request captured by the proxy, baked into the binary at build time.
pub const EMBEDDED_CAPTURE: &str = include_str!("../capture/request.json");

#[derive(Debug, Deserialize)]
struct CapturedHeader {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct CapturedRequest {
    method: String,
    #[serde(default)]
    host: Option<String>,
    url: String,
    #[serde(default)]
    headers: Vec<CapturedHeader>,
    #[serde(default)]
    body: Option<String>,
    /// Byte-exact body for captures that aren't valid utf-8.
    #[serde(default)]
    body_bytes: Option<Vec<u8>>,
}

impl CapturedRequest {
    fn full_url(&self) -> Result<String, ReplayError> {
        if !self.url.starts_with('/') {
            return Ok(self.url.clone());
        }
        // path-only urls are completed from the captured host
        return match &self.host {
            Some(host) if !host.is_empty() => Ok(format!("https://{}{}", host, self.url)),
            _ => Err(ReplayError::InvalidCapture {
                reason: format!("url '{}' is a path but no host was captured", self.url),
            }),
        };
    }

    fn take_body(&mut self) -> Result<Option<Vec<u8>>, ReplayError> {
        return match (self.body.take(), self.body_bytes.take()) {
            (Some(_), Some(_)) => Err(ReplayError::InvalidCapture {
                reason: "only one of body and body_bytes may be set".to_string(),
            }),
            (Some(text), None) => Ok(Some(text.into_bytes())),
            (None, bytes) => Ok(bytes),
        };
    }
}

pub fn parse_capture(document: &str) -> Result<HttpRequest, ReplayError> {
    let mut captured: CapturedRequest = serde_json::from_str(document)
        .map_err(|e| ReplayError::InvalidCapture { reason: e.to_string() })?;

    if captured.method.trim().is_empty() {
        return Err(ReplayError::InvalidCapture { reason: "method is empty".to_string() });
    }

    let url = captured.full_url()?;
    let body = captured.take_body()?;
    return Ok(HttpRequest {
        method: captured.method,
        url,
        headers: captured.headers.iter()
            .map(|h| Header::new(&h.name, &h.value))
            .collect(),
        body,
    });
}

pub fn embedded_base_request() -> Result<HttpRequest, ReplayError> {
    return parse_capture(EMBEDDED_CAPTURE);
}

pub fn parse_capture_file(path: &Path) -> Result<HttpRequest> {
    let document = fs::read_to_string(path)
        .with_context(|| format!("couldn't open capture file {}", path.display()))?;
    let request = parse_capture(&document)
        .with_context(|| format!("while parsing capture file {}", path.display()))?;
    return Ok(request);
}
