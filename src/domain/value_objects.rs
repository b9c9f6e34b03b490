use std::fmt;

/// HTTP method as typed on the command line.
///
/// Any token is accepted and kept verbatim; whether the transport can send
/// it is decided at execution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method(String);

impl Method {
    pub const DEFAULT: &'static str = "GET";

    /// Resolves the `-X` value, falling back to `GET` when it is missing or empty.
    ///
    /// # Arguments
    /// * `raw` - The value given to `--request`, if any
    ///
    /// # Returns
    /// * `Method` - The method to send, never empty
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some(method) if !method.is_empty() => Method(method.to_string()),
            _ => Method(Self::DEFAULT.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Method {
    fn default() -> Self {
        Method(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Header name/value pairs resolved from raw `Name: Value` strings.
///
/// Keeps insertion order. A repeated name overwrites the earlier value in
/// place, the way a keyed map would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedHeaders(Vec<(String, String)>);

impl ResolvedHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the mapping from command-line header strings.
    ///
    /// Each entry is split on its first colon only and both halves are
    /// trimmed. Entries without a colon are dropped silently.
    pub fn from_raw(raw_headers: &[String]) -> Self {
        let mut headers = Self::new();
        for raw in raw_headers {
            if let Some((name, value)) = raw.split_once(':') {
                headers.insert(name.trim(), value.trim());
            }
        }
        headers
    }

    pub fn insert(&mut self, name: &str, value: &str) {
        match self.0.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.0.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
