//! Cursor-based pagination.

use serde::{Deserialize, Serialize};

/// Pagination state returned with every page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor for the next page, if the upstream has one and gave a usable cursor.
    pub fn next_cursor(&self) -> Option<&str> {
        if !self.has_next_page {
            return None;
        }
        self.end_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// One page of items fetched from the Admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, has_next_page: bool, end_cursor: Option<String>) -> Self {
        Self {
            items,
            page_info: PageInfo {
                has_next_page,
                end_cursor,
            },
        }
    }

    /// A terminal page with no items.
    pub fn empty() -> Self {
        Self::new(Vec::new(), false, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cursor() {
        let info = PageInfo {
            has_next_page: true,
            end_cursor: Some("abc".to_string()),
        };
        assert_eq!(info.next_cursor(), Some("abc"));

        let info = PageInfo {
            has_next_page: true,
            end_cursor: Some(String::new()),
        };
        assert_eq!(info.next_cursor(), None);

        let info = PageInfo {
            has_next_page: false,
            end_cursor: Some("abc".to_string()),
        };
        assert_eq!(info.next_cursor(), None);
    }
}
