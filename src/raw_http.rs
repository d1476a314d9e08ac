//! Wire-format text of a request or response, for display only.

use crate::http_request::{Header, HttpRequest};
use crate::http_response::HttpResponse;

const CRLF: &str = "\r\n";

fn write_headers<'a>(out: &mut String, headers: impl Iterator<Item = &'a Header>) {
    for header in headers {
        out.push_str(&format!("{}: {}{}", header.name, header.value, CRLF));
    }
    out.push_str(CRLF);
}

/// Every byte maps to the code point of the same value, so binary bodies never fail to render.
fn latin1(bytes: &[u8]) -> String {
    return bytes.iter().map(|&b| b as char).collect();
}

pub fn render_request(request: &HttpRequest) -> String {
    let mut out = format!("{} {} HTTP/1.1{}", request.method.to_uppercase(), request.url, CRLF);
    // host is implied by the url
    write_headers(&mut out, request.headers.iter().filter(|h| !h.is_named("host")));
    if let Some(body) = &request.body {
        out.push_str(&latin1(body));
    }
    return out;
}

pub fn render_response(response: &HttpResponse) -> String {
    let mut out = format!("HTTP/1.1 {} {}{}", response.status_code, response.reason_phrase, CRLF);
    write_headers(&mut out, response.headers.iter());
    out.push_str(&response.body);
    return out;
}
