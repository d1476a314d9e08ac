use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Method, Url};

use crate::errors::ReplayError;
use crate::http_request::{Header, HttpRequest};
use crate::http_response::HttpResponse;

#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// The replay tool always runs with this off so 3xx responses come back as-is.
    pub follow_redirects: bool,
    /// `None` keeps the client's default.
    pub timeout: Option<Duration>,
}

pub struct ExecutionContext {
    pub client: Client,
}

impl ExecutionContext {
    pub fn new(config: &TransportConfig) -> Result<ExecutionContext, ReplayError> {
        let policy = if config.follow_redirects { Policy::default() } else { Policy::none() };
        let mut builder = Client::builder()
            .redirect(policy)
            .pool_max_idle_per_host(0)
            // bodies and content-encoding go back to the caller untouched
            .no_gzip()
            .no_brotli()
            .no_deflate();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ReplayError::invalid_request(format!("could not build http client: {}", e)))?;
        return Ok(ExecutionContext { client });
    }
}

impl HttpRequest {
    pub fn wire_method(&self) -> Result<Method, ReplayError> {
        return Method::from_bytes(self.method.as_bytes())
            .map_err(|_| ReplayError::invalid_request(format!("'{}' is not a valid http method", self.method)));
    }

    pub fn wire_url(&self) -> Result<Url, ReplayError> {
        return self.url.parse::<Url>()
            .map_err(|e| ReplayError::invalid_request(format!("{} @ '{}'", e, self.url)));
    }

    pub fn wire_headers(&self) -> Result<HeaderMap, ReplayError> {
        let mut map = HeaderMap::new();
        for header in self.headers.iter() {
            let name = HeaderName::from_bytes(header.name.as_bytes())
                .map_err(|_| ReplayError::invalid_request(format!("'{}' is not a valid header name", header.name)))?;
            let value = HeaderValue::from_str(&header.value)
                .map_err(|_| ReplayError::invalid_request(format!("invalid value for header '{}'", header.name)))?;
            map.append(name, value);
        }
        return Ok(map);
    }
}

fn unreachable(url: &Url, source: reqwest::Error) -> ReplayError {
    return ReplayError::UnreachableTarget { url: url.to_string(), source };
}

/// Sends the request once. Any http status, including redirects and errors, is a response.
pub fn execute_http_request(http_request: &HttpRequest, context: &ExecutionContext) -> Result<HttpResponse, ReplayError> {
    let method = http_request.wire_method()?;
    let url = http_request.wire_url()?;
    let headers = http_request.wire_headers()?;

    let mut req = context.client
        .request(method.clone(), url.clone())
        .headers(headers);
    if let Some(body) = &http_request.body {
        req = req.body(body.clone());
    }

    info!("{} {}", method, url);
    let res = req.send().map_err(|e| {
        if e.is_builder() {
            ReplayError::invalid_request(e.to_string())
        } else {
            unreachable(&url, e)
        }
    })?;

    let status = res.status().as_u16();
    let headers: Vec<Header> = res.headers().iter()
        .map(|(name, value)| Header::new(name.as_str(), &String::from_utf8_lossy(value.as_bytes())))
        .collect();
    let bytes = res.bytes().map_err(|e| unreachable(&url, e))?;
    debug!("received {} with {} header(s) and {} body byte(s)", status, headers.len(), bytes.len());

    return Ok(HttpResponse::new(status, headers, String::from_utf8_lossy(&bytes).into_owned()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn request(method: &str, url: &str, headers: Vec<Header>) -> HttpRequest {
        return HttpRequest { method: method.to_string(), url: url.to_string(), headers, body: None };
    }

    #[test_case("GET")]
    #[test_case("PROPFIND"; "extension method")]
    #[test_case("get"; "lowercase is kept")]
    fn wire_method_accepts_tokens(method: &str) {
        let wire = request(method, "http://localhost/", vec![]).wire_method().unwrap();
        assert_eq!(wire.as_str(), method);
    }

    #[test_case("GE T"; "space")]
    #[test_case(""; "empty")]
    fn wire_method_rejects_illegal_tokens(method: &str) {
        let err = request(method, "http://localhost/", vec![]).wire_method().unwrap_err();
        assert!(matches!(err, ReplayError::InvalidRequest { .. }));
    }

    #[test]
    fn wire_url_rejects_garbage() {
        let err = request("GET", "not a url", vec![]).wire_url().unwrap_err();
        assert!(matches!(err, ReplayError::InvalidRequest { .. }));
    }

    #[test]
    fn wire_headers_keep_duplicates() {
        let req = request("GET", "http://localhost/", vec![
            Header::new("Cookie", "a=1"),
            Header::new("cookie", "b=2"),
        ]);
        let map = req.wire_headers().unwrap();
        let cookies: Vec<&str> = map.get_all("cookie").iter().map(|v| v.to_str().unwrap()).collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
    }

    #[test]
    fn wire_headers_reject_bad_name() {
        let req = request("GET", "http://localhost/", vec![Header::new("bad name", "v")]);
        assert!(matches!(req.wire_headers(), Err(ReplayError::InvalidRequest { .. })));
    }

    #[test]
    fn context_builds_without_redirects() {
        assert!(ExecutionContext::new(&TransportConfig::default()).is_ok());
    }
}
