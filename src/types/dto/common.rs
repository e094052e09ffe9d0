use poem_openapi::{ApiResponse, Object};

use crate::query::{Pagination, SortOrder};

/// Pagination echo attached to list responses
#[derive(Object, Debug)]
pub struct PaginationMeta {
    pub limit: u64,
    pub offset: u64,
    /// Total records matching the filter, counted before paging
    pub record_count: Option<u64>,
    /// Total page count derived from record_count and limit
    pub total: Option<u64>,
}

impl From<Pagination> for PaginationMeta {
    fn from(pagination: Pagination) -> Self {
        Self {
            limit: pagination.limit,
            offset: pagination.offset,
            record_count: pagination.record_count,
            total: pagination.total,
        }
    }
}

/// Sort echo attached to list responses
#[derive(Object, Debug)]
pub struct SortOrderMeta {
    pub sort: String,
    pub order: String,
}

impl From<SortOrder> for SortOrderMeta {
    fn from(sort_order: SortOrder) -> Self {
        Self {
            sort: sort_order.sort,
            order: sort_order.order,
        }
    }
}

/// Empty 200 for updates, deletes and resets
#[derive(ApiResponse, Debug)]
pub enum CompletedResponse {
    #[oai(status = 200)]
    Ok,
}
