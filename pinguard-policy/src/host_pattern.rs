//! Hostname normalisation and the `HostPattern` matcher.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowercases `host` and strips all leading and trailing `.` characters.
pub fn normalize(host: &str) -> String {
    host.to_lowercase()
        .trim_matches('.')
        .to_string()
}

/// A host-matching pattern: either an exact hostname or a single-level
/// wildcard (`*.example.com` matches `api.example.com` but not
/// `example.com` or `a.b.example.com`).
///
/// Serializes as its canonical `rawValue` string rather than a tagged
/// object, so hand-authored policy JSON stays readable: `"*.example.com"`
/// round-trips directly, with no `{"type": "WILDCARD", ...}` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostPattern {
    Exact(String),
    Wildcard(String),
}

impl HostPattern {
    /// Parses a pattern string. Always succeeds: a pattern that normalizes
    /// to literally `*` (e.g. `"*."`) becomes `Wildcard("")`, a suffix that
    /// can never match any non-empty hostname, rather than an error.
    pub fn parse(pattern: &str) -> HostPattern {
        let normalized = normalize(pattern);
        match normalized.strip_prefix("*.") {
            Some(suffix) => HostPattern::Wildcard(normalize(suffix)),
            None if normalized == "*" => HostPattern::Wildcard(String::new()),
            None => HostPattern::Exact(normalized),
        }
    }

    /// The canonical string form: `s` for exact, `"*." + s` for wildcard.
    pub fn raw_value(&self) -> String {
        match self {
            HostPattern::Exact(s) => s.clone(),
            HostPattern::Wildcard(s) => format!("*.{s}"),
        }
    }

    /// The wildcard suffix's length, used by the resolver to break ties
    /// between multiple matching wildcard patterns. Only meaningful for
    /// `Wildcard` patterns.
    pub fn wildcard_specificity(&self) -> usize {
        match self {
            HostPattern::Wildcard(s) => s.len(),
            HostPattern::Exact(_) => 0,
        }
    }

    /// Tests whether this pattern matches `host`. An empty normalized host
    /// never matches anything.
    pub fn matches(&self, host: &str) -> bool {
        let host = normalize(host);
        if host.is_empty() {
            return false;
        }
        match self {
            HostPattern::Exact(p) => *p == host,
            HostPattern::Wildcard(s) => {
                // An empty suffix (the degenerate `*` pattern) can never
                // match anything, by definition rather than by the label
                // arithmetic below.
                if s.is_empty() {
                    return false;
                }
                let host_labels: Vec<&str> = host.split('.').collect();
                let suffix_labels: Vec<&str> = s.split('.').collect();
                host_labels.len() == suffix_labels.len() + 1
                    && host_labels[host_labels.len() - suffix_labels.len()..] == suffix_labels[..]
            }
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for HostPattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.raw_value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for HostPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(HostPattern::parse(&raw))
    }
}
