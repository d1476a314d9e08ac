use crate::errors::ReplayError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: &str, value: &str) -> Header {
        return Header { name: name.to_string(), value: value.to_string() };
    }

    /// Parses a `name: value` override, splitting on the first colon.
    pub fn parse_override(raw: &str) -> Result<Header, ReplayError> {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| ReplayError::MalformedHeaderOverride(raw.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ReplayError::MalformedHeaderOverride(raw.to_string()));
        }
        return Ok(Header::new(name, value.trim()));
    }

    pub fn is_named(&self, name: &str) -> bool {
        return self.name.eq_ignore_ascii_case(name);
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<Header>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        return self.headers.iter()
            .filter(|h| h.is_named(name))
            .map(|h| h.value.as_str())
            .collect();
    }

    /// Drops every header with the given name, returns how many were removed.
    pub fn remove_headers(&mut self, name: &str) -> usize {
        let before = self.headers.len();
        self.headers.retain(|h| !h.is_named(name));
        return before - self.headers.len();
    }
}

/// Runtime modifications applied on top of the base request.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    pub method: Option<String>,
    pub url: Option<String>,
    pub headers_to_add: Vec<Header>,
    // stored lowercased
    headers_to_remove: Vec<String>,
    pub body: Option<Vec<u8>>,
}

impl OverrideSet {
    pub fn new() -> OverrideSet {
        return OverrideSet::default();
    }

    pub fn add_header(&mut self, raw: &str) -> Result<(), ReplayError> {
        self.headers_to_add.push(Header::parse_override(raw)?);
        return Ok(());
    }

    pub fn remove_header(&mut self, name: &str) {
        let name = name.trim().to_ascii_lowercase();
        if !self.headers_to_remove.contains(&name) {
            self.headers_to_remove.push(name);
        }
    }

    pub fn removes(&self, name: &str) -> bool {
        return self.headers_to_remove.iter().any(|r| name.eq_ignore_ascii_case(r));
    }

    pub fn headers_to_remove(&self) -> &[String] {
        return &self.headers_to_remove;
    }
}
