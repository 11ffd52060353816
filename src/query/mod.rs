//! Query parameter building for Services listings.
//!
//! Services index endpoints accept a small set of parameters:
//!
//! - `fields=a,b` restricts the returned fields
//! - `filter[field]=value` with `filter_op[field]=OPERATOR` filters results
//! - `sort_by=a,b` with `sort_order=ASC,DESC` sorts results
//! - `page`/`pagesize` (nodes, files) or `limit`/`offset` (products, orders)
//!   selects a page
//!
//! [`QuerySpec`] describes a listing and produces a [`QueryParams`] in either
//! paging encoding.

mod params;
mod query_spec;

pub use params::{
    insert_fields, insert_filters, insert_sort, limit_offset_param, page_param, QueryParams,
};
pub use query_spec::{Filter, QuerySpec, SortOrder, DEFAULT_FILTER_OPERATOR, DEFAULT_PAGE_SIZE};
