use serde::{Deserialize, Serialize};

/// Envelope every backend response is wrapped in: `{ success, message, data }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// Spring Data page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: Option<i64>,
    #[serde(default)]
    pub total_pages: Option<i64>,
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: None,
            total_pages: None,
            number: None,
            size: None,
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Total number of matching records, falling back to what this page holds.
    pub fn total(&self) -> i64 {
        self.total_elements.unwrap_or(self.content.len() as i64)
    }

    /// Replace the content while keeping the paging metadata.
    pub fn with_content<U>(self, content: Vec<U>) -> Page<U> {
        Page {
            content,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
        }
    }
}
