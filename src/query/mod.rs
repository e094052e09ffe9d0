//! Query composition engine.
//!
//! Turns untrusted filter/sort/pagination input into bounded, deterministic
//! sea-orm queries. Filters compile to `Condition` trees (see [`filters`]),
//! sort fields are checked against a per-entity allow-list before any query
//! runs, and paged reads execute count-then-page so the reported total always
//! reflects the same predicate set as the returned page.

pub mod filters;

use std::str::FromStr;

use sea_orm::{
    Condition, ConnectionTrait, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::errors::InternalError;

pub use filters::{AdminFilter, UserFilter};

/// Requested sort field and direction, straight from the query string.
#[derive(Debug, Clone)]
pub struct SortOrder {
    pub sort: String,
    pub order: String,
}

impl SortOrder {
    /// Default ordering: the entity's natural key, ascending.
    pub fn initial() -> Self {
        Self {
            sort: "id".to_string(),
            order: "asc".to_string(),
        }
    }

    /// A sort order is valid iff the direction is asc/desc (case-insensitive)
    /// and the field is "id" or one of the caller-supplied sortable fields.
    ///
    /// Callers must reject invalid sort orders before running any query;
    /// there is no silent fallback to a default.
    pub fn validate(&self, optional_sorts: &[&str]) -> bool {
        match self.order.to_lowercase().as_str() {
            "asc" | "desc" => {}
            _ => return false,
        }

        self.sort == "id" || optional_sorts.contains(&self.sort.as_str())
    }

    pub fn direction(&self) -> Order {
        if self.order.eq_ignore_ascii_case("desc") {
            Order::Desc
        } else {
            Order::Asc
        }
    }
}

/// Pagination window, enriched with totals after execution.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
    pub record_count: Option<u64>,
    pub total: Option<u64>,
}

impl Pagination {
    pub const MAX_LIMIT: u64 = 1000;

    pub fn new(limit: u64, offset: u64) -> Result<Self, InternalError> {
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(InternalError::validation(format!(
                "limit must be between 1 and {}",
                Self::MAX_LIMIT
            )));
        }

        Ok(Self {
            limit,
            offset,
            record_count: None,
            total: None,
        })
    }

    /// Derive the total page count from the record count.
    ///
    /// Only computed when a record count is present; an absent count leaves
    /// the total absent rather than defaulting it.
    pub fn calculate_total(&mut self) {
        if let Some(record_count) = self.record_count {
            self.total = Some(record_count.div_ceil(self.limit));
        }
    }
}

/// Fetch one page of an entity together with its many-to-one relation.
///
/// Execution order is fixed: when pagination is requested the unbounded
/// count query runs first over the exact same predicate set, then limit and
/// offset are applied to the data query. The relation is joined eagerly; a
/// missing related row yields `None`, never an error.
pub async fn find_page<E, R, C>(
    db: &C,
    condition: Condition,
    sort_order: &SortOrder,
    mut pagination: Option<&mut Pagination>,
) -> Result<Vec<(E::Model, Option<R::Model>)>, InternalError>
where
    E: EntityTrait + sea_orm::Related<R>,
    E::Model: Send + Sync,
    R: EntityTrait,
    C: ConnectionTrait,
{
    let mut query = E::find()
        .find_also_related(R::default())
        .filter(condition.clone());

    if let Some(pagination) = pagination.as_deref_mut() {
        let record_count = E::find()
            .filter(condition)
            .count(db)
            .await
            .map_err(|e| InternalError::database("count_records", e))?;
        pagination.record_count = Some(record_count);

        query = query.limit(pagination.limit).offset(pagination.offset);
    }

    let column = E::Column::from_str(&sort_order.sort)
        .map_err(|_| InternalError::validation(format!("unsortable field: {}", sort_order.sort)))?;
    query = query.order_by(column, sort_order.direction());

    query
        .all(db)
        .await
        .map_err(|e| InternalError::database("find_page", e))
}

/// Fetch a single record matching the condition, with its relation joined.
///
/// The condition is a partially-populated filter, so get-by-id and
/// get-by-username share this one code path. Zero matching rows is a typed
/// not-found error, never a zero-value success.
pub async fn find_one<E, R, C>(
    db: &C,
    condition: Condition,
) -> Result<(E::Model, Option<R::Model>), InternalError>
where
    E: EntityTrait + sea_orm::Related<R>,
    R: EntityTrait,
    C: ConnectionTrait,
{
    E::find()
        .find_also_related(R::default())
        .filter(condition)
        .one(db)
        .await
        .map_err(|e| InternalError::database("find_one", e))?
        .ok_or_else(|| InternalError::not_found(E::default().table_name().to_owned()))
}
