use serde::{Deserialize, Deserializer, Serialize};

/// One page of a paginated list response.
///
/// The backend reports `-1` for a missing next/previous page; those
/// decode to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default, deserialize_with = "page_number")]
    pub next_page: Option<u32>,
    #[serde(default, deserialize_with = "page_number")]
    pub previous_page: Option<u32>,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default = "one")]
    pub total_pages: u32,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// A single page holding `data`.
    pub fn single(data: Vec<T>) -> Self {
        Self {
            next_page: None,
            previous_page: None,
            total_items: data.len() as u64,
            total_pages: 1,
            data,
        }
    }
}

fn one() -> u32 {
    1
}

fn page_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|n| u32::try_from(n).ok()).filter(|n| *n > 0))
}

/// `{"status": .., "data": ..}` wrapper used by non-paginated endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Acknowledgement body of a mutating call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}
