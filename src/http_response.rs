use reqwest::StatusCode;

use crate::http_request::Header;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub reason_phrase: String,
    pub headers: Vec<Header>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status_code: u16, headers: Vec<Header>, body: String) -> HttpResponse {
        return HttpResponse {
            status_code,
            reason_phrase: reason_phrase(status_code).to_string(),
            headers,
            body,
        };
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        return self.headers.iter()
            .find(|h| h.is_named(name))
            .map(|h| h.value.as_str());
    }

    pub fn summary(&self) -> String {
        return format!("Status: {} {}", self.status_code, self.reason_phrase);
    }
}

/// Standard reason phrase, `Unknown` for codes the table doesn't know.
pub fn reason_phrase(status_code: u16) -> &'static str {
    return StatusCode::from_u16(status_code)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(200, "OK")]
    #[test_case(301, "Moved Permanently")]
    #[test_case(404, "Not Found")]
    #[test_case(503, "Service Unavailable")]
    #[test_case(399, "Unknown"; "unassigned")]
    #[test_case(42, "Unknown"; "out of range")]
    fn reason_phrase_from_table(code: u16, expected: &str) {
        assert_eq!(reason_phrase(code), expected);
    }

    #[test]
    fn summary_line() {
        let response = HttpResponse::new(404, vec![], String::new());
        assert_eq!(response.summary(), "Status: 404 Not Found");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let response = HttpResponse::new(301, vec![Header::new("location", "/next")], String::new());
        assert_eq!(response.header("Location"), Some("/next"));
        assert_eq!(response.header("Server"), None);
    }
}
