//! Collection pagination primitives.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Page sizes the API is willing to serve.
pub const ALLOWED_PAGE_SIZES: [u32; 3] = [10, 25, 100];

/// Default page size when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Minimum length of a search term.
pub const MIN_SEARCH_LEN: usize = 2;

/// Sort direction for an ordered listing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl core::str::FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(DomainError::validation(format!(
                "sort order must be ASC or DESC, got '{other}'"
            ))),
        }
    }
}

/// Pagination/search parameters for collection endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub search: Option<String>,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
        }
    }
}

impl PageRequest {
    pub fn validate(&self) -> DomainResult<()> {
        if self.page < 1 {
            return Err(DomainError::validation("page must be >= 1"));
        }
        if !ALLOWED_PAGE_SIZES.contains(&self.page_size) {
            return Err(DomainError::validation(
                "page_size must be one of 10, 25, 100",
            ));
        }
        if let Some(search) = &self.search {
            if search.chars().count() < MIN_SEARCH_LEN {
                return Err(DomainError::validation(format!(
                    "search must be at least {MIN_SEARCH_LEN} characters"
                )));
            }
        }
        Ok(())
    }

    /// Zero-based offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }
}

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_page: u32,
}

impl<T> Page<T> {
    /// Slice `items` (already filtered and ordered) down to the requested page.
    pub fn paginate(items: Vec<T>, request: &PageRequest) -> Self {
        let total_page = total_pages(items.len(), request.page_size);
        let items = items
            .into_iter()
            .skip(request.offset())
            .take(request.page_size as usize)
            .collect();

        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total_page,
        }
    }
}

/// Number of pages needed to hold `total` items.
pub fn total_pages(total: usize, page_size: u32) -> u32 {
    (total as u32).div_ceil(page_size.max(1))
}
