use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("Unsupported method: {}", other)),
        }
    }
}

/// One logical call: method, optional JSON body and header overrides.
///
/// The same options are reused verbatim for the retry after a token refresh.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    /// Merged over the defaults; a caller-supplied `Authorization` or
    /// `Content-Type` replaces the client's.
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("Delete".parse::<Method>().unwrap(), Method::Delete);
        assert!("PATCH".parse::<Method>().is_err());
    }

    #[test]
    fn test_default_options_are_bodyless_get() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::Get);
        assert!(options.body.is_none());
        assert!(options.headers.is_empty());
    }
}
