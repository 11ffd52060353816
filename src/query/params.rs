//! Ordered query parameters and the Services parameter encodings.

use std::fmt;

use crate::query::{Filter, SortOrder};

/// An ordered list of query parameters.
///
/// Inserting a key that already exists replaces its value in place, so the
/// original position is kept.
///
/// # Example
///
/// ```rust
/// use drupal_services::QueryParams;
///
/// let mut params = QueryParams::new();
/// params.insert("page", "1");
/// params.insert("pagesize", "20");
/// params.insert("page", "3");
///
/// assert_eq!(params.to_query_string(), "page=3&pagesize=20");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the parameters as key/value pairs.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Copies every parameter of `other` into `self`.
    pub fn extend(&mut self, other: Self) {
        for (key, value) in other.0 {
            self.insert(key, value);
        }
    }

    /// Encodes the parameters as a URL query string, without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Adds `fields=a,b,c`. Does nothing for `None`.
pub fn insert_fields<S: AsRef<str>>(params: &mut QueryParams, fields: Option<&[S]>) {
    if let Some(fields) = fields {
        let joined = fields
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        params.insert("fields", joined);
    }
}

/// Adds `filter[field]=value` and `filter_op[field]=operator` per filter.
pub fn insert_filters<'a, I>(params: &mut QueryParams, filters: I)
where
    I: IntoIterator<Item = (&'a str, &'a Filter)>,
{
    for (field, filter) in filters {
        params.insert(format!("filter[{field}]"), filter.value.as_str());
        params.insert(format!("filter_op[{field}]"), filter.operator.as_str());
    }
}

/// Adds parallel `sort_by` and `sort_order` lists. Does nothing when empty.
pub fn insert_sort<'a, I>(params: &mut QueryParams, sort: I)
where
    I: IntoIterator<Item = (&'a str, SortOrder)>,
{
    let (fields, orders): (Vec<&str>, Vec<String>) = sort
        .into_iter()
        .map(|(field, order)| (field, order.to_string()))
        .unzip();
    if fields.is_empty() {
        return;
    }
    params.insert("sort_by", fields.join(","));
    params.insert("sort_order", orders.join(","));
}

/// Page-number pagination used by node and file listings.
#[must_use]
pub fn page_param(page: u32, pagesize: u32) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("page", page.to_string());
    params.insert("pagesize", pagesize.to_string());
    params
}

/// Limit/offset pagination used by product and order listings.
///
/// Pages start at 1; page 0 is treated as page 1.
#[must_use]
pub fn limit_offset_param(page: u32, pagesize: u32) -> QueryParams {
    let offset = u64::from(page.max(1) - 1) * u64::from(pagesize);
    let mut params = QueryParams::new();
    params.insert("limit", pagesize.to_string());
    params.insert("offset", offset.to_string());
    params
}
