//! One page of a larger result list
//!
//! [`Page`] is a snapshot of a single page of results together with the
//! pagination arithmetic derived at construction time: the total page
//! count, the element count on this page, and first/last boundary
//! queries. It represents an already-computed page; it does not slice
//! data out of any source.
//!
//! By default page numbering starts at 0 (offset-style). Services that
//! number pages from 1 switch the origin with
//! [`Page::using_one_as_first_page`].
//!
//! # Example
//!
//! ```rust
//! use heron_service::page::Page;
//! use heron_service::sort::Sort;
//!
//! let page = Page::of(0, 20, 45, vec!["a", "b", "c"])?
//!     .with_sort(Sort::of_ascending("name")?);
//!
//! assert_eq!(page.total_pages(), 3);
//! assert!(page.is_first());
//! assert!(!page.is_last());
//! assert!(page.is_sorted());
//! # Ok::<(), heron_service::preconditions::PreconditionError>(())
//! ```

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::preconditions::{check_positive, check_positive_or_zero, PreconditionError};
use crate::sort::Sort;

/// The page index considered "first".
///
/// Out-of-domain origins are unrepresentable: the boundary formulas in
/// [`Page::is_first`] and [`Page::is_last`] are only defined for these
/// two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageOrigin {
    /// Offset-style paging: the first page is index 0.
    #[default]
    Zero,
    /// Ordinal-style paging: the first page is index 1.
    One,
}

impl PageOrigin {
    /// Index of the first page under this origin.
    #[must_use]
    pub const fn first_page_index(self) -> u64 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

impl Serialize for PageOrigin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.first_page_index())
    }
}

/// One page of an overall list of results.
///
/// Built through [`Page::of`], which validates its inputs and computes
/// the derived counts once. The descriptor is a snapshot: the totals are
/// not recomputed after construction. Sort, page origin, and
/// supplementary data are attached afterwards through builder-style
/// transitions that keep the same logical identity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    content: Vec<T>,
    size: u64,
    number: u64,
    number_of_elements: u64,
    total_pages: u64,
    total_elements: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<Sort>,
    paging_starts_with: PageOrigin,
    supplementary_data: Map<String, Value>,
}

impl<T> Page<T> {
    /// Builds a page from the page number, the page size limit, the
    /// total element count across all pages, and this page's content.
    ///
    /// The page number must be zero or positive, the size strictly
    /// positive, and the total zero or positive; the first failed check
    /// is returned and nothing is constructed. An empty content list is
    /// valid (and usual for out-of-range page numbers, which are
    /// representable on purpose: the factory does not compare `number`
    /// against the computed page count).
    pub fn of(
        page_number: i64,
        size: i64,
        total_elements: i64,
        content: Vec<T>,
    ) -> Result<Self, PreconditionError> {
        check_positive_or_zero(page_number)?;
        check_positive(size)?;
        check_positive_or_zero(total_elements)?;

        let size = size as u64;
        let total_elements = total_elements as u64;
        Ok(Self {
            number_of_elements: content.len() as u64,
            total_pages: total_pages_for(total_elements, size),
            content,
            size,
            number: page_number as u64,
            total_elements,
            sort: None,
            paging_starts_with: PageOrigin::Zero,
            supplementary_data: Map::new(),
        })
    }

    /// Attaches the sort that was applied to the data.
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Numbers pages from 0 (the default).
    #[must_use]
    pub fn using_zero_as_first_page(mut self) -> Self {
        self.paging_starts_with = PageOrigin::Zero;
        self
    }

    /// Numbers pages from 1.
    #[must_use]
    pub fn using_one_as_first_page(mut self) -> Self {
        self.paging_starts_with = PageOrigin::One;
        self
    }

    /// Replaces the supplementary data wholesale. Not a merge.
    #[must_use]
    pub fn with_supplementary_data(mut self, data: Map<String, Value>) -> Self {
        self.supplementary_data = data;
        self
    }

    /// The content on this specific page.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// The size limit of the pagination. The last page will often hold
    /// fewer items than this.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// The number of this page, interpreted under
    /// [`paging_starts_with`](Page::paging_starts_with).
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// The number of items on this page.
    #[must_use]
    pub const fn number_of_elements(&self) -> u64 {
        self.number_of_elements
    }

    /// The total page count, derived from the size and the total
    /// element count at construction time.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// The total number of items in the overall result list.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// The sort applied to the data, if any.
    #[must_use]
    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// The page origin in effect.
    #[must_use]
    pub const fn paging_starts_with(&self) -> PageOrigin {
        self.paging_starts_with
    }

    /// Extra data related to the page, opaque to this crate.
    #[must_use]
    pub fn supplementary_data(&self) -> &Map<String, Value> {
        &self.supplementary_data
    }

    /// Whether this is the first page under the current origin.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.number == self.paging_starts_with.first_page_index()
    }

    /// Whether this is the last page under the current origin.
    ///
    /// The last valid index is `total_pages - 1` when pages are
    /// numbered from 0 and `total_pages` when numbered from 1;
    /// rearranged here to stay in unsigned arithmetic when the page
    /// count is 0.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.number + (1 - self.paging_starts_with.first_page_index()) == self.total_pages
    }

    /// Whether a sort has been attached.
    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.sort.is_some()
    }
}

/// Ceiling division: `(total + size - 1) / size`, safe for `size >= 1`.
const fn total_pages_for(total: u64, size: u64) -> u64 {
    total.saturating_add(size).saturating_sub(1) / size
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preconditions::PreconditionError;
    use serde_json::json;

    fn items(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({ "id": i })).collect()
    }

    #[test]
    fn test_of_derives_counts() {
        let page = Page::of(0, 20, 45, items(20)).unwrap();
        assert_eq!(page.size(), 20);
        assert_eq!(page.number(), 0);
        assert_eq!(page.number_of_elements(), 20);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.total_elements(), 45);
        assert!(page.sort().is_none());
        assert!(page.supplementary_data().is_empty());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(Page::of(0, 20, 0, items(0)).unwrap().total_pages(), 0);
        assert_eq!(Page::of(0, 20, 1, items(1)).unwrap().total_pages(), 1);
        assert_eq!(Page::of(0, 20, 20, items(20)).unwrap().total_pages(), 1);
        assert_eq!(Page::of(0, 20, 21, items(20)).unwrap().total_pages(), 2);
        assert_eq!(Page::of(0, 20, 100, items(20)).unwrap().total_pages(), 5);
        assert_eq!(Page::of(0, 20, 101, items(20)).unwrap().total_pages(), 6);
    }

    #[test]
    fn test_negative_page_number_rejected() {
        let err = Page::of(-1, 10, 100, items(0)).unwrap_err();
        assert_eq!(
            err,
            PreconditionError::State(Some("value must be positive or zero".to_string()))
        );
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = Page::of(1, 0, 100, items(0)).unwrap_err();
        assert_eq!(
            err,
            PreconditionError::State(Some("value must be a positive number".to_string()))
        );
    }

    #[test]
    fn test_negative_total_rejected() {
        assert!(Page::of(1, 10, -1, items(0)).is_err());
    }

    #[test]
    fn test_empty_content_is_valid() {
        let page = Page::of(7, 10, 30, items(0)).unwrap();
        assert_eq!(page.number_of_elements(), 0);
        // Out-of-range page numbers are representable, not an error.
        assert_eq!(page.number(), 7);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_boundaries_with_zero_origin() {
        let first = Page::of(0, 20, 100, items(20)).unwrap();
        assert!(first.is_first());
        assert!(!first.is_last());

        let middle = Page::of(2, 20, 100, items(20)).unwrap();
        assert!(!middle.is_first());
        assert!(!middle.is_last());

        let last = Page::of(4, 20, 100, items(20)).unwrap();
        assert!(!last.is_first());
        assert!(last.is_last());
    }

    #[test]
    fn test_boundaries_with_one_origin() {
        let first = Page::of(1, 20, 100, items(20))
            .unwrap()
            .using_one_as_first_page();
        assert!(first.is_first());
        assert!(!first.is_last());

        let last = Page::of(5, 20, 100, items(20))
            .unwrap()
            .using_one_as_first_page();
        assert!(!last.is_first());
        assert!(last.is_last());

        // Page 0 exists under a one origin but is neither first nor last.
        let zero = Page::of(0, 20, 100, items(20))
            .unwrap()
            .using_one_as_first_page();
        assert!(!zero.is_first());
        assert!(!zero.is_last());
    }

    #[test]
    fn test_boundaries_with_no_pages() {
        let empty = Page::of(0, 20, 0, items(0)).unwrap();
        assert!(empty.is_first());
        assert!(!empty.is_last());

        // Under a one origin an empty result set makes page 0 the last
        // page (`number == total_pages`).
        let empty = Page::of(0, 20, 0, items(0)).unwrap().using_one_as_first_page();
        assert!(!empty.is_first());
        assert!(empty.is_last());
    }

    #[test]
    fn test_origin_can_be_switched_back() {
        let page = Page::of(0, 20, 100, items(20))
            .unwrap()
            .using_one_as_first_page()
            .using_zero_as_first_page();
        assert_eq!(page.paging_starts_with(), PageOrigin::Zero);
        assert!(page.is_first());
    }

    #[test]
    fn test_single_page_is_first_and_last() {
        let page = Page::of(0, 20, 5, items(5)).unwrap();
        assert!(page.is_first());
        assert!(page.is_last());
    }

    #[test]
    fn test_with_sort() {
        let page = Page::of(0, 20, 5, items(5)).unwrap();
        assert!(!page.is_sorted());

        let page = page.with_sort(Sort::of_ascending("name").unwrap());
        assert!(page.is_sorted());
        assert_eq!(page.sort().unwrap().property(), "name");
    }

    #[test]
    fn test_supplementary_data_replaced_wholesale() {
        let mut first = Map::new();
        first.insert("alpha".to_string(), json!(1));
        let mut second = Map::new();
        second.insert("beta".to_string(), json!(2));

        let page = Page::of(0, 20, 5, items(5))
            .unwrap()
            .with_supplementary_data(first)
            .with_supplementary_data(second);

        assert!(page.supplementary_data().get("alpha").is_none());
        assert_eq!(page.supplementary_data().get("beta"), Some(&json!(2)));
    }

    #[test]
    fn test_wire_shape() {
        let page = Page::of(1, 2, 5, vec![json!("a"), json!("b")])
            .unwrap()
            .with_sort(Sort::of_descending("name").unwrap());
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(
            value,
            json!({
                "content": ["a", "b"],
                "size": 2,
                "number": 1,
                "numberOfElements": 2,
                "totalPages": 3,
                "totalElements": 5,
                "sort": {
                    "property": "name",
                    "direction": "DESC",
                    "ignoreCase": false,
                    "ascending": false,
                },
                "pagingStartsWith": 0,
                "supplementaryData": {},
            })
        );
    }

    #[test]
    fn test_wire_shape_omits_absent_sort() {
        let page = Page::of(0, 2, 0, items(0)).unwrap().using_one_as_first_page();
        let value = serde_json::to_value(&page).unwrap();
        assert!(value.get("sort").is_none());
        assert_eq!(value["pagingStartsWith"], json!(1));
    }

    #[test]
    fn test_into_response_is_ok_json() {
        let page = Page::of(0, 2, 2, items(2)).unwrap();
        let response = page.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
