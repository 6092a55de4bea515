use chrono::Utc;
use masahatak_admin::{
    dto::{SendNotificationRequest, UpdateProfileRequest},
    models::{
        AccountStatus, AdminRecord, AdminRole, AdminView, Booking, BookingListItem,
        BookingStatus, Notification, RecipientType, ReviewStatus, split_platform_fee,
    },
};
use serde_json::json;
use uuid::Uuid;

// --- Enums ---

#[test]
fn test_admin_role_wire_values() {
    assert_eq!("super_admin".parse::<AdminRole>(), Ok(AdminRole::SuperAdmin));
    assert_eq!("admin".parse::<AdminRole>(), Ok(AdminRole::Admin));
    assert!("superadmin".parse::<AdminRole>().is_err());
    assert!("Admin".parse::<AdminRole>().is_err());

    assert_eq!(
        serde_json::to_value(AdminRole::SuperAdmin).unwrap(),
        json!("super_admin")
    );
}

#[test]
fn test_booking_status_uses_hyphenated_in_progress() {
    assert_eq!(BookingStatus::InProgress.to_string(), "in-progress");
    assert_eq!(
        serde_json::from_value::<BookingStatus>(json!("in-progress")).unwrap(),
        BookingStatus::InProgress
    );
    assert!(serde_json::from_value::<BookingStatus>(json!("in_progress")).is_err());
}

#[test]
fn test_active_booking_statuses() {
    assert!(BookingStatus::Completed.is_active());
    assert!(BookingStatus::InProgress.is_active());
    assert!(BookingStatus::Upcoming.is_active());
    assert!(!BookingStatus::Pending.is_active());
    assert!(!BookingStatus::Confirmed.is_active());
    assert!(!BookingStatus::Cancelled.is_active());
}

#[test]
fn test_parse_error_names_the_value() {
    let err = "archived".parse::<ReviewStatus>().unwrap_err();
    assert_eq!(err.value, "archived");
    assert!(err.to_string().contains("archived"));

    assert!(RecipientType::try_from("user".to_string()).is_ok());
    assert!(AccountStatus::try_from("closed".to_string()).is_err());
}

// --- Fee Split ---

#[test]
fn test_platform_fee_is_ten_percent_rounded_to_cents() {
    assert_eq!(split_platform_fee(120.0), (12.0, 108.0));
    assert_eq!(split_platform_fee(0.0), (0.0, 0.0));

    let (fee, provider) = split_platform_fee(33.33);
    assert_eq!(fee, 3.33);
    assert!((fee + provider - 33.33).abs() < 1e-9);
}

// --- Serialization ---

#[test]
fn test_admin_view_never_carries_the_password_hash() {
    let now = Utc::now();
    let record = AdminRecord {
        id: Uuid::new_v4(),
        email: "ops@masahatak.com".to_string(),
        full_name: "Ops".to_string(),
        password_hash: "$2b$04$secret".to_string(),
        role: AdminRole::Admin,
        status: AccountStatus::Active,
        phone: Some("+962790000000".to_string()),
        created_at: now,
        updated_at: now,
    };

    let json_output = serde_json::to_string(&AdminView::from(record)).unwrap();
    assert!(!json_output.contains("password"));
    assert!(!json_output.contains("$2b$"));
    assert!(json_output.contains(r#""fullName":"Ops""#));
    assert!(json_output.contains(r#""role":"admin""#));
}

#[test]
fn test_notification_json_uses_type_key() {
    let notif = Notification {
        id: Uuid::new_v4(),
        user_id: None,
        recipient_type: RecipientType::Admin,
        title: "Heads up".to_string(),
        message: "Something happened".to_string(),
        notification_type: "system".to_string(),
        is_read: false,
        read_at: None,
        created_at: Utc::now(),
    };

    let json_output = serde_json::to_string(&notif).unwrap();
    assert!(json_output.contains(r#""type":"system""#));
    assert!(json_output.contains(r#""recipientType":"admin""#));
    assert!(!json_output.contains("notification_type"));
    assert!(!json_output.contains("notificationType"));
}

#[test]
fn test_booking_list_item_flattens_the_booking() {
    let now = Utc::now();
    let booking = Booking {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        workspace_id: Uuid::new_v4(),
        provider_id: Uuid::new_v4(),
        booking_plan: "weekly".to_string(),
        start_date: now,
        end_date: now,
        total_amount: 70.0,
        status: BookingStatus::Upcoming,
        cancellation_reason: None,
        cancelled_by: None,
        cancelled_at: None,
        created_at: now,
    };
    let item = BookingListItem {
        booking,
        user: None,
        workspace: None,
    };

    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(value["bookingPlan"], "weekly");
    assert_eq!(value["status"], "upcoming");
    assert!(value["user"].is_null());
    assert!(value["workspace"].is_null());
    assert!(value.get("booking").is_none());
}

// --- Requests ---

#[test]
fn test_update_profile_request_optionality() {
    let partial: UpdateProfileRequest =
        serde_json::from_value(json!({ "fullName": "New Name Only" })).unwrap();
    assert_eq!(partial.full_name.as_deref(), Some("New Name Only"));
    assert!(partial.email.is_none());
    assert!(partial.phone.is_none());
}

#[test]
fn test_send_notification_request_reads_type_key() {
    let request: SendNotificationRequest = serde_json::from_value(json!({
        "userId": Uuid::nil(),
        "title": "T",
        "message": "M",
        "type": "promo"
    }))
    .unwrap();
    assert_eq!(request.notification_type.as_deref(), Some("promo"));

    let request: SendNotificationRequest = serde_json::from_value(json!({
        "userId": Uuid::nil(),
        "title": "T",
        "message": "M"
    }))
    .unwrap();
    assert!(request.notification_type.is_none());
}
