//! Paginated response envelopes.

use serde::{Deserialize, Serialize};

use crate::PageRequest;

/// Metadata describing where a page sits in the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    page: u32,
    per_page: u32,
    count: u64,
    max_page: u64,
}

impl PageMeta {
    /// Build metadata for `request` over a result set of `count` items.
    ///
    /// `max_page` is zero when there are no matches.
    #[must_use]
    pub fn new(request: &PageRequest, count: u64) -> Self {
        Self {
            page: request.page(),
            per_page: request.per_page(),
            count,
            max_page: count.div_ceil(u64::from(request.per_page())),
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Total number of matching items across all pages.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Last page that contains items.
    #[must_use]
    pub const fn max_page(&self) -> u64 {
        self.max_page
    }
}

/// One page of items plus its [`PageMeta`].
///
/// Serialises as `{"data": [...], "meta": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    data: Vec<T>,
    meta: PageMeta,
}

impl<T> Page<T> {
    /// Wrap `data` as the page described by `request` over `count` matches.
    #[must_use]
    pub fn new(data: Vec<T>, request: &PageRequest, count: u64) -> Self {
        Self {
            data,
            meta: PageMeta::new(request, count),
        }
    }

    /// An empty page for `request`.
    #[must_use]
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Items on this page.
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Page metadata.
    #[must_use]
    pub const fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Convert every item while keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn request(page: u32, per_page: u32) -> PageRequest {
        PageRequest::new(Some(page), Some(per_page), None).expect("valid request")
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(250, 100, 3)]
    fn max_page_rounds_up(#[case] count: u64, #[case] per_page: u32, #[case] expected: u64) {
        let meta = PageMeta::new(&request(1, per_page), count);
        assert_eq!(meta.max_page(), expected);
        assert_eq!(meta.count(), count);
    }

    #[rstest]
    fn map_preserves_meta() {
        let page = Page::new(vec![1, 2, 3], &request(2, 3), 8);
        let mapped = page.map(|value| value * 10);
        assert_eq!(mapped.data(), &[10, 20, 30]);
        assert_eq!(mapped.meta().page(), 2);
        assert_eq!(mapped.meta().max_page(), 3);
    }

    #[rstest]
    fn serialises_data_and_camel_case_meta() {
        let page = Page::new(vec!["a"], &request(1, 10), 1);
        let value = serde_json::to_value(&page).expect("page serialises");
        assert_eq!(
            value,
            json!({
                "data": ["a"],
                "meta": { "page": 1, "perPage": 10, "count": 1, "maxPage": 1 }
            })
        );
    }
}
