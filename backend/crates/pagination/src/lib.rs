//! Page-number pagination primitives shared by microblog backend endpoints.
//!
//! A [`PageRequest`] carries a validated one-based page number, a bounded page
//! size and an optional substring search term. Adapters slice their result
//! sets with [`PageRequest::offset`] and [`PageRequest::limit`] and wrap the
//! slice in a [`Page`], whose [`PageMeta`] reports the total match count and
//! the last reachable page.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(Some(2), Some(10), None).expect("valid request");
//! assert_eq!(request.offset(), 10);
//!
//! let page = Page::new(vec!["post"], &request, 11);
//! assert_eq!(page.meta().max_page(), 2);
//! ```

mod page;
mod request;

pub use page::{Page, PageMeta};
pub use request::{DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE, PageRequest, PageRequestError};
