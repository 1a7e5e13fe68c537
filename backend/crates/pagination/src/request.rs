//! Validated page requests.

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not supply one.
pub const DEFAULT_PER_PAGE: u32 = 10;
/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Errors raised while validating raw pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers are one-based.
    #[error("page must be at least 1")]
    InvalidPage,
    /// Page size fell outside `1..=MAX_PER_PAGE`.
    #[error("perPage must be between 1 and {max}, got {value}")]
    InvalidPerPage {
        /// Upper bound for the page size.
        max: u32,
        /// Value supplied by the caller.
        value: u32,
    },
}

/// Validated pagination request.
///
/// ## Invariants
/// - `page >= 1`.
/// - `1 <= per_page <= MAX_PER_PAGE`.
/// - `search`, when present, is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
    search: Option<String>,
}

impl PageRequest {
    /// Validate raw values, applying defaults for missing ones.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::InvalidPage`] for page zero and
    /// [`PageRequestError::InvalidPerPage`] for a page size outside
    /// `1..=MAX_PER_PAGE`.
    pub fn new(
        page: Option<u32>,
        per_page: Option<u32>,
        search: Option<String>,
    ) -> Result<Self, PageRequestError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        if page == 0 {
            return Err(PageRequestError::InvalidPage);
        }

        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(PageRequestError::InvalidPerPage {
                max: MAX_PER_PAGE,
                value: per_page,
            });
        }

        Ok(Self {
            page,
            per_page,
            search: normalise_search(search),
        })
    }

    /// First page with the default size and no search filter.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            search: None,
        }
    }

    /// Replace the search term, trimming it and dropping blank values.
    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = normalise_search(search);
        self
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Substring filter, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

fn normalise_search(search: Option<String>) -> Option<String> {
    search
        .map(|raw| raw.trim().to_owned())
        .filter(|term| !term.is_empty())
}
