use log::debug;

use crate::http_request::{Header, HttpRequest, OverrideSet};

const CONTENT_LENGTH: &str = "Content-Length";

/// Merges the base request with the overrides into the request that gets sent.
///
/// Added headers are appended even when the name already exists, removals then
/// drop every matching entry. A replaced body only keeps `Content-Length` in
/// sync when the header was present before.
pub fn resolve_request(base: &HttpRequest, overrides: OverrideSet) -> HttpRequest {
    let mut headers = base.headers.clone();
    for header in overrides.headers_to_add.iter() {
        debug!("adding header {}: {}", header.name, header.value);
        headers.push(header.clone());
    }

    let mut request = HttpRequest {
        method: overrides.method.clone().unwrap_or_else(|| base.method.clone()),
        url: overrides.url.clone().unwrap_or_else(|| base.url.clone()),
        headers,
        body: base.body.clone(),
    };

    for name in overrides.headers_to_remove() {
        let removed = request.remove_headers(name);
        debug!("removed {} header(s) named {}", removed, name);
    }

    if let Some(body) = overrides.body {
        if request.remove_headers(CONTENT_LENGTH) > 0 {
            debug!("updating {} to {}", CONTENT_LENGTH, body.len());
            request.headers.push(Header::new(CONTENT_LENGTH, &body.len().to_string()));
        }
        request.body = Some(body);
    }

    return request;
}
