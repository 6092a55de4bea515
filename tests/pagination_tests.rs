use masahatak_admin::pagination::{Listing, MAX_LIMIT, PageRequest, Pagination};
use serde_json::json;

// --- PageRequest ---

#[test]
fn test_page_request_defaults_and_cap() {
    assert_eq!(
        PageRequest::new(None, None, 20),
        PageRequest { page: 1, limit: 20 }
    );
    // Zero is treated as missing.
    assert_eq!(
        PageRequest::new(Some(0), Some(0), 10),
        PageRequest { page: 1, limit: 10 }
    );
    assert_eq!(PageRequest::new(Some(3), Some(500), 10).limit, MAX_LIMIT);
}

#[test]
fn test_offset_is_page_minus_one_times_limit() {
    assert_eq!(PageRequest::new(Some(1), Some(10), 10).offset(), 0);
    assert_eq!(PageRequest::new(Some(4), Some(25), 10).offset(), 75);
}

#[test]
fn test_slice_keeps_the_full_total() {
    let items: Vec<u32> = (1..=7).collect();

    let page = PageRequest::new(Some(2), Some(3), 10).slice(items.clone());
    assert_eq!(page.items, vec![4, 5, 6]);
    assert_eq!(page.total, 7);

    let last = PageRequest::new(Some(3), Some(3), 10).slice(items.clone());
    assert_eq!(last.items, vec![7]);

    let beyond = PageRequest::new(Some(9), Some(3), 10).slice(items);
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 7);
}

#[test]
fn test_all_returns_everything() {
    let page = PageRequest::all().slice(vec!["a", "b", "c"]);
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total, 3);
}

// --- Pagination ---

#[test]
fn test_total_pages_rounds_up() {
    let request = PageRequest::new(Some(1), Some(10), 10);
    assert_eq!(Pagination::new(0, request).total_pages, 0);
    assert_eq!(Pagination::new(10, request).total_pages, 1);
    assert_eq!(Pagination::new(11, request).total_pages, 2);
}

#[test]
fn test_listing_serializes_under_its_resource_key() {
    let request = PageRequest::new(Some(2), Some(2), 10);
    let page = request.slice(vec!["u1", "u2", "u3", "u4", "u5"]);

    let value = serde_json::to_value(Listing::new("users", page, request)).unwrap();

    assert_eq!(
        value,
        json!({
            "success": true,
            "users": ["u3", "u4"],
            "pagination": { "total": 5, "page": 2, "limit": 2, "totalPages": 3 }
        })
    );
}

#[test]
fn test_mapped_page_keeps_total() {
    let request = PageRequest::new(Some(1), Some(1), 10);
    let page = request.slice(vec![1, 2, 3]).map(|n| n * 10);
    assert_eq!(page.items, vec![10]);
    assert_eq!(page.total, 3);
}
