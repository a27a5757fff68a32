//! List query builder shared by every collection endpoint.

use std::fmt;

/// Default number of records per page on list screens.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Sort order for list results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (oldest/smallest first).
    Asc,
    /// Descending order (newest/largest first). This is the default.
    #[default]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Pagination, search, sort and free-form filters for a list request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    /// Page number (1-indexed). Defaults to 1.
    pub page: u64,
    /// Results per page. Defaults to [`DEFAULT_PAGE_SIZE`].
    pub limit: u64,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: SortDirection,
    /// Extra `key=value` filters, e.g. `status=active`, sent in insertion order.
    pub filters: Vec<(String, String)>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            sort_by: None,
            sort_direction: SortDirection::Desc,
            filters: Vec::new(),
        }
    }
}

impl ListQuery {
    /// Sets the page number (1-indexed). Zero is treated as 1.
    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the number of results per page. Zero is treated as 1.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = if search.is_empty() {
            None
        } else {
            Some(search.to_string())
        };
        self
    }

    pub fn with_sort_by(mut self, field: &str) -> Self {
        self.sort_by = Some(field.to_string());
        self
    }

    pub fn with_sort_direction(mut self, direction: SortDirection) -> Self {
        self.sort_direction = direction;
        self
    }

    /// Adds an equality filter. Repeating a key sends it twice.
    pub fn with_filter(mut self, key: &str, value: &str) -> Self {
        self.filters.push((key.to_string(), value.to_string()));
        self
    }

    /// Query string pairs in a stable order: page, limit, search, sort, filters.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sortBy".to_string(), sort_by.clone()));
            pairs.push(("sortOrder".to_string(), self.sort_direction.to_string()));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs
    }
}
