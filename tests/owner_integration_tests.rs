mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, booking, provider, request, workspace};
use masahatak_admin::{
    models::{AccountStatus, AdminRole, BookingStatus},
    repository::Repository,
};
use serde_json::json;
use uuid::Uuid;

// --- Profile ---

#[tokio::test]
async fn test_owner_profile_get_and_partial_update() {
    let app = TestApp::new();
    let (admin, token) = app.login_as("admin@masahatak.com", AdminRole::Admin).await;
    let owner = provider("Desk Hub", AccountStatus::Active);
    app.repo.insert_provider(owner.clone()).await.unwrap();

    let (status, body) = app.get(&format!("/api/owners/{}", owner.id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["owner"]["businessName"], "Desk Hub");

    let (status, body) = app
        .get(&format!("/api/owners/{}", Uuid::new_v4()), &token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Owner not found");

    let (status, body) = app
        .send(request(
            Method::PUT,
            &format!("/api/owners/{}", owner.id),
            Some(&token),
            Some(json!({
                "businessName": "Desk Hub Amman",
                "contactEmail": " hello@deskhub.jo ",
                "contactPhone": "  "
            })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Owner profile updated successfully");

    let stored = app.repo.get_provider(owner.id).await.unwrap().unwrap();
    assert_eq!(stored.business_name, "Desk Hub Amman");
    assert_eq!(stored.email, "hello@deskhub.jo");
    assert_eq!(stored.phone, None);
    assert_eq!(stored.full_name, "Owner");
    assert_eq!(stored.updated_by, Some(admin.id));

    let actions: Vec<String> = app
        .repo
        .audit_entries()
        .await
        .into_iter()
        .map(|entry| entry.action)
        .collect();
    assert_eq!(actions, vec!["provider.profile_updated"]);
}

#[tokio::test]
async fn test_owner_email_must_stay_unique() {
    let app = TestApp::new();
    let (_, token) = app.login_as("admin@masahatak.com", AdminRole::Admin).await;
    let owner = provider("First Space", AccountStatus::Active);
    let rival = provider("Second Space", AccountStatus::Active);
    app.repo.insert_provider(owner.clone()).await.unwrap();
    app.repo.insert_provider(rival.clone()).await.unwrap();

    let (status, body) = app
        .send(request(
            Method::PUT,
            &format!("/api/owners/{}", owner.id),
            Some(&token),
            Some(json!({ "contactEmail": rival.email })),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already in use");
}

// --- Spaces ---

#[tokio::test]
async fn test_create_space_validates_and_starts_pending() {
    let app = TestApp::new();
    let (_, token) = app.login_as("admin@masahatak.com", AdminRole::Admin).await;
    let owner = provider("Desk Hub", AccountStatus::Active);
    app.repo.insert_provider(owner.clone()).await.unwrap();

    let create = |payload| request(Method::POST, "/api/owners/spaces", Some(&token), Some(payload));

    let (status, body) = app
        .send(create(json!({ "providerId": owner.id, "name": "  " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Provider, name and location are required");

    let (status, _) = app
        .send(create(json!({
            "providerId": owner.id, "name": "Loft", "location": "Amman", "pricePerHour": -1
        })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(create(json!({
            "providerId": Uuid::new_v4(), "name": "Loft", "location": "Amman"
        })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Owner not found");

    let (status, body) = app
        .send(create(json!({
            "providerId": owner.id, "name": "Loft", "location": "Amman", "pricePerHour": 7.5
        })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Space created successfully, pending admin approval"
    );
    let space_id: Uuid = body["spaceId"].as_str().unwrap().parse().unwrap();

    let stored = app.repo.get_workspace(space_id).await.unwrap().unwrap();
    assert_eq!(stored.status, AccountStatus::Pending);
    assert_eq!(stored.owner_id, owner.id);
    assert_eq!(stored.price_per_hour, 7.5);
}

#[tokio::test]
async fn test_owner_spaces_are_scoped_filtered_and_paged() {
    let app = TestApp::new();
    let (_, token) = app.login_as("admin@masahatak.com", AdminRole::Admin).await;
    let owner = Uuid::new_v4();
    app.repo
        .insert_workspace(workspace(owner, "Active Desk"))
        .await
        .unwrap();
    let mut pending = workspace(owner, "Pending Desk");
    pending.status = AccountStatus::Pending;
    app.repo.insert_workspace(pending).await.unwrap();
    app.repo
        .insert_workspace(workspace(Uuid::new_v4(), "Someone Else"))
        .await
        .unwrap();

    let (status, body) = app
        .get(&format!("/api/owners/{owner}/spaces"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["spaces"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 2);
    assert_eq!(body["pagination"]["limit"], 20);

    let (_, body) = app
        .get(&format!("/api/owners/{owner}/spaces?status=pending"), &token)
        .await;
    let spaces = body["spaces"].as_array().unwrap();
    assert_eq!(spaces.len(), 1);
    assert_eq!(spaces[0]["spaceName"], "Pending Desk");
}

#[tokio::test]
async fn test_update_and_remove_space() {
    let app = TestApp::new();
    let (_, token) = app.login_as("admin@masahatak.com", AdminRole::Admin).await;
    let space = workspace(Uuid::new_v4(), "Old Name");
    app.repo.insert_workspace(space.clone()).await.unwrap();
    let uri = format!("/api/owners/spaces/{}", space.id);

    let (status, _) = app
        .send(request(
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "name": "New Name", "pricePerHour": 12.0, "location": "" })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let stored = app.repo.get_workspace(space.id).await.unwrap().unwrap();
    assert_eq!(stored.space_name, "New Name");
    assert_eq!(stored.location, "Amman");
    assert_eq!(stored.price_per_hour, 12.0);
    assert_eq!(stored.status, AccountStatus::Active);

    let (status, body) = app
        .send(request(
            Method::PUT,
            &format!("/api/owners/spaces/{}", Uuid::new_v4()),
            Some(&token),
            Some(json!({ "name": "Ghost" })),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Space not found");

    let (status, _) = app
        .send(request(Method::DELETE, &uri, Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.repo.get_workspace(space.id).await.unwrap().is_none());

    let (status, _) = app
        .send(request(Method::DELETE, &uri, Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- Blocked dates ---

#[tokio::test]
async fn test_block_dates_validation() {
    let app = TestApp::new();
    let (_, token) = app.login_as("admin@masahatak.com", AdminRole::Admin).await;
    let space = workspace(Uuid::new_v4(), "Quiet Room");
    app.repo.insert_workspace(space.clone()).await.unwrap();
    let uri = format!("/api/owners/spaces/{}/blocks", space.id);

    let cases = [
        (json!({ "startDate": "2025-06-01" }), "Start date and end date are required"),
        (
            json!({ "startDate": "June first", "endDate": "2025-06-02" }),
            "Invalid date format",
        ),
        (
            json!({ "startDate": "2025-06-05", "endDate": "2025-06-01" }),
            "End date must not be before start date",
        ),
    ];
    for (payload, message) in cases {
        let (status, body) = app
            .send(request(Method::POST, &uri, Some(&token), Some(payload)))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], message);
    }

    let (status, body) = app
        .send(request(
            Method::POST,
            &format!("/api/owners/spaces/{}/blocks", Uuid::new_v4()),
            Some(&token),
            Some(json!({ "startDate": "2025-06-01", "endDate": "2025-06-02" })),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Space not found");
}

#[tokio::test]
async fn test_block_dates_show_on_workspace_and_can_be_lifted() {
    let app = TestApp::new();
    let (_, token) = app.login_as("admin@masahatak.com", AdminRole::Admin).await;
    let space = workspace(Uuid::new_v4(), "Quiet Room");
    app.repo.insert_workspace(space.clone()).await.unwrap();

    let (status, body) = app
        .send(request(
            Method::POST,
            &format!("/api/owners/spaces/{}/blocks", space.id),
            Some(&token),
            Some(json!({ "startDate": "2025-06-01", "endDate": "2025-06-03T18:00:00Z" })),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Dates blocked successfully");
    let block_id = body["blockId"].as_str().unwrap().to_string();

    let (_, body) = app
        .get(&format!("/api/workspaces/{}", space.id), &token)
        .await;
    let blocks = body["blockedDates"].as_array().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["startDate"], "2025-06-01T00:00:00Z");
    assert_eq!(blocks[0]["endDate"], "2025-06-03T18:00:00Z");

    // A block is only reachable under its own workspace.
    let (status, body) = app
        .send(request(
            Method::DELETE,
            &format!("/api/owners/spaces/{}/blocks/{block_id}", Uuid::new_v4()),
            Some(&token),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Block not found");

    let lift = format!("/api/owners/spaces/{}/blocks/{block_id}", space.id);
    let (status, _) = app
        .send(request(Method::DELETE, &lift, Some(&token), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        app.repo
            .list_workspace_blocks(space.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_removing_a_space_drops_its_blocks() {
    let app = TestApp::new();
    let (_, token) = app.login_as("admin@masahatak.com", AdminRole::Admin).await;
    let space = workspace(Uuid::new_v4(), "Short Lived");
    app.repo.insert_workspace(space.clone()).await.unwrap();

    app.send(request(
        Method::POST,
        &format!("/api/owners/spaces/{}/blocks", space.id),
        Some(&token),
        Some(json!({ "startDate": "2025-07-01", "endDate": "2025-07-01" })),
    ))
    .await;
    assert_eq!(app.repo.list_workspace_blocks(space.id).await.unwrap().len(), 1);

    let (status, _) = app
        .send(request(
            Method::DELETE,
            &format!("/api/owners/spaces/{}", space.id),
            Some(&token),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        app.repo
            .list_workspace_blocks(space.id)
            .await
            .unwrap()
            .is_empty()
    );
}

// --- Bookings ---

#[tokio::test]
async fn test_owner_bookings_filter_by_provider_and_status() {
    let app = TestApp::new();
    let (_, token) = app.login_as("admin@masahatak.com", AdminRole::Admin).await;
    let owner = Uuid::new_v4();
    let space = workspace(owner, "Shared Desk");

    for status in [BookingStatus::Completed, BookingStatus::Upcoming] {
        let mut row = booking(Uuid::new_v4(), space.id, status, 30.0);
        row.provider_id = owner;
        app.repo.insert_booking(row).await.unwrap();
    }
    app.repo
        .insert_booking(booking(
            Uuid::new_v4(),
            space.id,
            BookingStatus::Completed,
            99.0,
        ))
        .await
        .unwrap();

    let (status, body) = app
        .get(&format!("/api/owners/{owner}/bookings"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookings"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 2);

    let (_, body) = app
        .get(&format!("/api/owners/{owner}/bookings?status=completed"), &token)
        .await;
    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["totalAmount"], 30.0);

    let (status, body) = app
        .get(&format!("/api/owners/{owner}/bookings?status=lost"), &token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid status 'lost'");
}

#[tokio::test]
async fn test_owner_tools_require_a_session() {
    let app = TestApp::new();

    let (status, _) = app
        .send(request(
            Method::GET,
            &format!("/api/owners/{}", Uuid::new_v4()),
            None,
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
