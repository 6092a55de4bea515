//! Shared list contract used by every resource listing.
//!
//! `page` is 1-based; `limit` falls back to a per-resource default. Out-of-range pages
//! are not an error: they produce an empty slice while `total` and `totalPages` still
//! describe the full filtered set.

use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};
use ts_rs::TS;
use utoipa::ToSchema;

/// Upper bound applied to any client-supplied `limit`.
pub const MAX_LIMIT: u32 = 100;

/// Reads a raw `page` or `limit` query value. Anything that is not a non-negative
/// integer (`-1`, `abc`, empty) is treated as absent, so the listing falls back to its
/// defaults instead of rejecting the request.
pub fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

/// A resolved page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Resolves raw query values. Zero or missing values take the defaults (page 1,
    /// `default_limit`); `limit` is capped at `MAX_LIMIT`.
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .min(MAX_LIMIT);
        Self { page, limit }
    }

    /// Single page spanning the whole collection. Internal lookups only.
    pub fn all() -> Self {
        Self {
            page: 1,
            limit: u32::MAX,
        }
    }

    /// Rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Slices an already filtered and sorted collection to this page.
    pub fn slice<T>(&self, items: Vec<T>) -> Paged<T> {
        let total = items.len() as u64;
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let items = items
            .into_iter()
            .skip(start)
            .take(self.limit as usize)
            .collect();
        Paged { items, total }
    }
}

/// One page of rows plus the size of the whole filtered set.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Paged<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(total: u64, request: PageRequest) -> Self {
        Self {
            total,
            page: request.page,
            limit: request.limit,
            total_pages: total.div_ceil(u64::from(request.limit)),
        }
    }
}

/// Listing
///
/// Response envelope `{ success, <key>: [...], pagination }`. The collection key differs
/// per resource (`users`, `bookings`, `logs`, ...), so serialization is written by hand.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    key: &'static str,
    items: Vec<T>,
    pagination: Pagination,
}

impl<T> Listing<T> {
    pub fn new(key: &'static str, page: Paged<T>, request: PageRequest) -> Self {
        Self {
            key,
            pagination: Pagination::new(page.total, request),
            items: page.items,
        }
    }
}

impl<T: Serialize> Serialize for Listing<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("success", &true)?;
        map.serialize_entry(self.key, &self.items)?;
        map.serialize_entry("pagination", &self.pagination)?;
        map.end()
    }
}
