use std::fmt::Display;

use url::form_urlencoded;

/// Default Spring page size used by the list endpoints
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Query string builder that drops absent and empty values.
#[derive(Debug, Clone, Default)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key=value`, skipping the pair when the value renders empty.
    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value));
        }
        self
    }

    pub fn opt<V: Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Repeat `key` once per non-empty value.
    pub fn list<V: Display>(self, key: &str, values: impl IntoIterator<Item = V>) -> Self {
        values
            .into_iter()
            .fold(self, |query, value| query.param(key, value))
    }

    pub fn pageable(self, pageable: &Pageable) -> Self {
        self.param("page", pageable.page)
            .param("size", pageable.size)
            .opt("sort", pageable.sort.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `""` when empty, else `?k=v&...` with form encoding.
    pub fn render(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        format!("?{}", serializer.finish())
    }
}

/// Spring-style paging: `?page=0&size=20&sort=field,asc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    pub page: u32,
    pub size: u32,
    pub sort: Option<String>,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl Pageable {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    /// First page holding up to `size` records.
    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }

    pub fn sorted(mut self, field: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.sort = Some(format!("{},{}", field, direction));
        self
    }

    pub fn query(&self) -> String {
        QueryString::new().pageable(self).render()
    }
}

/// Percent-encode a single path segment (emails, role names, codes).
///
/// Unreserved marks `! ' ( ) * - . _ ~` stay literal.
pub fn encode_segment(segment: &str) -> String {
    // '%' itself is escaped as %25, so these escapes cannot overlap
    const KEEP: [(&str, &str); 5] = [
        ("%21", "!"),
        ("%27", "'"),
        ("%28", "("),
        ("%29", ")"),
        ("%7E", "~"),
    ];
    let encoded = form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    KEEP.iter()
        .fold(encoded, |acc, (escaped, mark)| acc.replace(escaped, mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_renders_nothing() {
        assert_eq!(QueryString::new().render(), "");
        assert_eq!(
            QueryString::new()
                .param("name", "")
                .opt::<&str>("title", None)
                .render(),
            ""
        );
    }

    #[test]
    fn test_default_pageable() {
        assert_eq!(Pageable::default().query(), "?page=0&size=20");
        assert_eq!(
            Pageable::first(50).sorted("lastName", true).query(),
            "?page=0&size=50&sort=lastName%2Casc"
        );
    }

    #[test]
    fn test_list_repeats_key_and_skips_blanks() {
        let query = QueryString::new().list("status", ["Active", "", "Completed"]);
        assert_eq!(query.render(), "?status=Active&status=Completed");
    }

    #[test]
    fn test_values_are_encoded() {
        let query = QueryString::new().param("name", "Ava Vale").param("q", "a&b");
        assert_eq!(query.render(), "?name=Ava+Vale&q=a%26b");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("ava@example.com"), "ava%40example.com");
        assert_eq!(encode_segment("CS 101/A"), "CS%20101%2FA");
    }

    #[test]
    fn test_encode_segment_keeps_unreserved_marks() {
        assert_eq!(encode_segment("o'neil(1)!~*"), "o'neil(1)!~*");
        assert_eq!(encode_segment("100%21"), "100%2521");
    }
}
