//! Cursor pagination and infinite-scroll triggering.

use serde::{Deserialize, Serialize};

/// How far ahead of the viewport (in CSS pixels) the next page is requested.
pub const LOAD_AHEAD_MARGIN_PX: u32 = 400;

/// Cursor pagination info, as returned alongside every connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether there's a next page.
    #[serde(default)]
    pub has_next_page: bool,
    /// Whether there's a previous page.
    #[serde(default)]
    pub has_previous_page: bool,
    /// Cursor of the first node on this page.
    #[serde(default)]
    pub start_cursor: Option<String>,
    /// Cursor of the last node on this page.
    #[serde(default)]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor to pass as `after` when requesting the next page.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_next_page {
            self.end_cursor.as_deref()
        } else {
            None
        }
    }

    /// Cursor to pass as `before` when requesting the previous page.
    pub fn previous_cursor(&self) -> Option<&str> {
        if self.has_previous_page {
            self.start_cursor.as_deref()
        } else {
            None
        }
    }
}

/// A list of nodes with optional page info (`{ nodes, pageInfo }`).
///
/// A missing `nodes` array decodes as empty rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// The nodes on this page.
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
    /// Pagination info, absent for unpaginated lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

impl<T> Connection<T> {
    /// Create an unpaginated connection.
    pub fn new(nodes: Vec<T>) -> Self {
        Self {
            nodes,
            page_info: None,
        }
    }

    /// Check if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on this page.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over the nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.nodes.iter()
    }

    /// Whether another page can be requested.
    pub fn has_next_page(&self) -> bool {
        self.page_info
            .as_ref()
            .map(|p| p.has_next_page)
            .unwrap_or(false)
    }
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<'a, T> IntoIterator for &'a Connection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Infinite-scroll trigger for a paginated list.
///
/// The list renders an invisible sentinel after its last node; when the
/// sentinel comes within [`LOAD_AHEAD_MARGIN_PX`] of the viewport the next
/// page is requested, unless one is already loading.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoLoad;

impl AutoLoad {
    /// Decide whether the next page should be requested now.
    pub fn should_request_next(
        sentinel_visible: bool,
        is_loading: bool,
        page_info: Option<&PageInfo>,
    ) -> bool {
        sentinel_visible && !is_loading && page_info.map(|p| p.has_next_page).unwrap_or(false)
    }

    /// Whether a sentinel at `distance_px` below the viewport bottom is within the margin.
    pub fn sentinel_in_range(distance_px: i64) -> bool {
        distance_px <= i64::from(LOAD_AHEAD_MARGIN_PX)
    }
}
