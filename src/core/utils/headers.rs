//! Headers module
//!
//! This module provides constants for HTTP headers and the [`Headers`]
//! multimap.

pub(crate) const ACCEPT: &str = "Accept";
pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const CONTENT_LENGTH: &str = "Content-Length";
pub(crate) const APPLICATION_JSON: &str = "application/json";
pub(crate) const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Ordered header multimap.
///
/// Keeps insertion order and allows the same key more than once. Key lookup
/// is case-insensitive, stored keys keep the case they were added with.
///
/// # Examples
/// ```
/// use restcall::core::Headers;
///
/// let mut headers = Headers::new();
/// headers.add("X-Tag", "a");
/// headers.add("Accept", "application/json");
/// headers.add("x-tag", "b");
///
/// assert_eq!(headers.get_all("X-TAG"), vec!["a", "b"]);
/// assert_eq!(headers.len(), 3);
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty multimap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` for `key`.
    pub fn add<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.entries.push((key.into(), value.into()));
    }

    /// Drop every value stored for `key`.
    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
    }

    /// Replace every value stored for `key` with a single `value`.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        self.remove(&key);
        self.entries.push((key, value.into()));
    }

    /// Append every pair from `other`, keeping its order.
    pub fn extend<I, K, V>(&mut self, other: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        other.into_iter().for_each(|(k, v)| self.add(k, v));
    }

    /// First value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// All values stored for `key`, in insertion order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
            .collect()
    }

    /// Whether at least one value is stored for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the multimap is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        headers.extend(iter);
        headers
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
