use std::io::Write;

use anyhow::{Context, Result};

use crate::http_request::{HttpRequest, OverrideSet};
use crate::http_request_executor::{execute_http_request, ExecutionContext, TransportConfig};
use crate::http_response::HttpResponse;
use crate::raw_http::{render_request, render_response};
use crate::request_resolver::resolve_request;

#[derive(Debug, Default)]
pub struct ReplayOptions {
    pub overrides: OverrideSet,
    pub print_request: bool,
    pub print_response: bool,
    pub dry_run: bool,
    pub transport: TransportConfig,
}

/// Resolves the base request against the options, sends it once and reports on `out`.
///
/// Returns `None` for dry runs.
pub fn replay_request<W: Write>(base: &HttpRequest, options: ReplayOptions, out: &mut W) -> Result<Option<HttpResponse>> {
    let request = resolve_request(base, options.overrides);

    if options.print_request {
        writeln!(out, "{}", render_request(&request))?;
    }
    if options.dry_run {
        return Ok(None);
    }

    let context = ExecutionContext::new(&options.transport)?;
    let response = execute_http_request(&request, &context)
        .with_context(|| format!("while replaying {} {}", request.method, request.url))?;
    drop(context);

    if options.print_response {
        writeln!(out, "{}", render_response(&response))?;
    } else {
        writeln!(out, "{}", response.summary())?;
    }
    return Ok(Some(response));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ReplayError;
    use crate::http_request::Header;

    fn base(url: &str) -> HttpRequest {
        return HttpRequest {
            method: "get".to_string(),
            url: url.to_string(),
            headers: vec![Header::new("Host", "localhost"), Header::new("Accept", "*/*")],
            body: None,
        };
    }

    #[test]
    fn dry_run_prints_request_only() {
        let mut options = ReplayOptions { print_request: true, dry_run: true, ..Default::default() };
        options.overrides.add_header("X-Replay: 1").unwrap();
        let mut out = Vec::new();
        let response = replay_request(&base("http://localhost/x"), options, &mut out).unwrap();
        assert!(response.is_none());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "GET http://localhost/x HTTP/1.1\r\nAccept: */*\r\nX-Replay: 1\r\n\r\n\n"
        );
    }

    #[test]
    fn invalid_url_fails_before_sending() {
        let options = ReplayOptions { print_request: true, ..Default::default() };
        let mut out = Vec::new();
        let err = replay_request(&base("::not a url::"), options, &mut out).unwrap_err();
        assert!(matches!(err.downcast_ref::<ReplayError>(), Some(ReplayError::InvalidRequest { .. })));
        // the request was printed before the failure
        assert!(String::from_utf8(out).unwrap().starts_with("GET ::not a url:: HTTP/1.1\r\n"));
    }
}
