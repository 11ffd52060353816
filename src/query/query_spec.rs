//! Listing queries: field selection, filters, sorting and paging.

use std::fmt;
use std::str::FromStr;

use crate::query::params::{
    insert_fields, insert_filters, insert_sort, limit_offset_param, page_param, QueryParams,
};

/// Operator applied when a filter does not name one.
pub const DEFAULT_FILTER_OPERATOR: &str = "CONTAINS";

/// Default page size for listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A filter value and its comparison operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    /// The value to compare against.
    pub value: String,
    /// The comparison operator (e.g. `CONTAINS`, `=`).
    pub operator: String,
}

impl Filter {
    /// Creates a filter using [`DEFAULT_FILTER_OPERATOR`].
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_operator(value, DEFAULT_FILTER_OPERATOR)
    }

    /// Creates a filter with an explicit operator.
    #[must_use]
    pub fn with_operator(value: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            operator: operator.into(),
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<V: Into<String>, O: Into<String>> From<(V, O)> for Filter {
    fn from((value, operator): (V, O)) -> Self {
        Self::with_operator(value, operator)
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Describes a listing request.
///
/// Filters and sort keys keep the order they were added in.
///
/// # Example
///
/// ```rust
/// use drupal_services::{Filter, QuerySpec, SortOrder};
///
/// let query = QuerySpec::new()
///     .fields(["sku", "title"])
///     .filter("title", "shirt")
///     .filter("status", Filter::with_operator("1", "="))
///     .sort("created", SortOrder::Desc)
///     .page(3)
///     .pagesize(10);
///
/// let params = query.limit_offset_params();
/// assert_eq!(params.get("fields"), Some("sku,title"));
/// assert_eq!(params.get("filter_op[title]"), Some("CONTAINS"));
/// assert_eq!(params.get("offset"), Some("20"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuerySpec {
    fields: Option<Vec<String>>,
    filters: Vec<(String, Filter)>,
    sort: Vec<(String, SortOrder)>,
    page: u32,
    pagesize: u32,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            fields: None,
            filters: Vec::new(),
            sort: Vec::new(),
            page: 1,
            pagesize: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QuerySpec {
    /// Creates a query for the first page with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the returned fields.
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a filter on `field`. A repeated field replaces the earlier filter.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, filter: impl Into<Filter>) -> Self {
        let field = field.into();
        let filter = filter.into();
        match self.filters.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = filter,
            None => self.filters.push((field, filter)),
        }
        self
    }

    /// Adds a sort key. A repeated field keeps its position and takes the new order.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        let field = field.into();
        match self.sort.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = order,
            None => self.sort.push((field, order)),
        }
        self
    }

    /// Sets the page number (1-based).
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn pagesize(mut self, pagesize: u32) -> Self {
        self.pagesize = pagesize;
        self
    }

    /// Returns the page number.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn current_pagesize(&self) -> u32 {
        self.pagesize
    }

    /// Returns the fields, filters and sort keys, without paging.
    #[must_use]
    pub fn filter_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        insert_fields(&mut params, self.fields.as_deref());
        insert_filters(
            &mut params,
            self.filters.iter().map(|(field, filter)| (field.as_str(), filter)),
        );
        insert_sort(
            &mut params,
            self.sort.iter().map(|(field, order)| (field.as_str(), *order)),
        );
        params
    }

    /// Filter params plus `page`/`pagesize`.
    #[must_use]
    pub fn page_params(&self) -> QueryParams {
        let mut params = self.filter_params();
        params.extend(page_param(self.page, self.pagesize));
        params
    }

    /// Filter params plus `limit`/`offset`.
    #[must_use]
    pub fn limit_offset_params(&self) -> QueryParams {
        let mut params = self.filter_params();
        params.extend(limit_offset_param(self.page, self.pagesize));
        params
    }
}
