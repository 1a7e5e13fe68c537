//! Shared validation helpers for inbound HTTP adapters.
//!
//! Handlers parse raw path, query and body values into domain types here so
//! every validation failure reaches clients as `400 invalid_request` with a
//! `details` object naming the offending field.

use std::fmt::Display;

use pagination::{PageRequest, PageRequestError};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::domain::{Error, PostId};

/// Validation error codes placed in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidField,
    InvalidPostId,
    InvalidPagination,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidField => "invalid_field",
            Self::InvalidPostId => "invalid_post_id",
            Self::InvalidPagination => "invalid_pagination",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// A required body field was absent or blank.
pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// A field failed its domain constructor; the constructor's message is kept.
pub(crate) fn invalid_field_error(field: FieldName, reason: impl Display) -> Error {
    field_error(field, ErrorCode::InvalidField, reason.to_string())
}

/// Parse a `{postId}` path segment.
pub(crate) fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    raw.parse::<PostId>().map_err(|_| {
        Error::invalid_request("postId must be a positive integer").with_details(json!({
            "field": "postId",
            "value": raw,
            "code": ErrorCode::InvalidPostId.as_str(),
        }))
    })
}

/// Pagination query string shared by every listing endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PageQuery {
    /// One-based page number; defaults to 1.
    #[param(minimum = 1, example = 1)]
    pub page: Option<u32>,
    /// Page size between 1 and 100; defaults to 10.
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub per_page: Option<u32>,
    /// Case-insensitive substring filter on post text.
    pub search: Option<String>,
}

/// Validate `page`, `perPage` and `search` query parameters.
pub(crate) fn parse_page_request(query: PageQuery) -> Result<PageRequest, Error> {
    PageRequest::new(query.page, query.per_page, query.search).map_err(|err| {
        let field = match err {
            PageRequestError::InvalidPage => FieldName::new("page"),
            PageRequestError::InvalidPerPage { .. } => FieldName::new("perPage"),
        };
        field_error(field, ErrorCode::InvalidPagination, err.to_string())
    })
}

/// Require an optional body value, reporting it as missing when blank.
pub(crate) fn required(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}
