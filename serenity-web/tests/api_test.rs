use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use serenity_catalog::RoomType;
use serenity_core::account::{
    PasswordOtpRequest, PasswordResetRequest, ProfileUpdate, SignInRequest, SignInResponse,
    SignUpRequest, SignUpResponse,
};
use serenity_core::reservation::{CreateReservationRequest, ReservationCreated, ReservationRecord};
use serenity_core::{BookingBackend, CoreError, CoreResult, SessionStore};
use serenity_shared::{AccountProfile, GuestType};
use serenity_store::CatalogSource;
use serenity_web::{app, AppState};
use tokio::sync::Notify;
use tower::util::ServiceExt;

// ============================================================================
// Fake backend
// ============================================================================

#[derive(Default)]
struct FakeBackend {
    reservations: Mutex<Vec<CreateReservationRequest>>,
    /// When set, reservation creation waits until notified
    hold: Option<Arc<Notify>>,
}

fn profile() -> AccountProfile {
    serde_json::from_value(json!({
        "id": 7,
        "full_name": "Nguyen Brakemull",
        "email": "abcdefgh@gmail.com",
        "phone_number": "8123456789",
        "cccd": "123456",
        "address": "123 street, ward, city",
        "guest_type_name": "International",
        "guest_type_id": 2,
        "surcharge_rate": 0.1
    }))
    .unwrap()
}

#[async_trait]
impl BookingBackend for FakeBackend {
    async fn room_types(&self) -> CoreResult<Vec<RoomType>> {
        Ok(vec![
            RoomType::new(1, "Deluxe Room", 2, 399.0).unwrap().with_remaining(3),
            RoomType::new(4, "Family Suite", 4, 599.0).unwrap(),
            RoomType::new(9, "Garden Room", 2, 199.0).unwrap().with_remaining(0),
        ])
    }

    async fn guest_types(&self) -> CoreResult<Vec<GuestType>> {
        Ok(serde_json::from_value(json!([
            {"id": 1, "name": "Domestic"},
            {"id": 2, "name": "International", "surcharge_rate": 0.1}
        ]))
        .unwrap())
    }

    async fn create_reservation(&self, token: &str, request: &CreateReservationRequest) -> CoreResult<ReservationCreated> {
        assert_eq!(token, "token-abc");
        if let Some(hold) = &self.hold {
            hold.notified().await;
        }
        let mut reservations = self.reservations.lock().unwrap();
        reservations.push(request.clone());
        Ok(ReservationCreated { reservation_id: 100 + reservations.len() as i64, message: None })
    }

    async fn sign_in(&self, request: &SignInRequest) -> CoreResult<SignInResponse> {
        if request.password.expose() != "123456789" {
            return Err(CoreError::BackendRejected { status: 401, message: "Invalid email or password".into() });
        }
        Ok(SignInResponse { token: "token-abc".into(), user: profile() })
    }

    async fn sign_up(&self, request: &SignUpRequest) -> CoreResult<SignUpResponse> {
        let mut user = profile();
        user.full_name = request.full_name.clone();
        user.email = request.email.clone();
        Ok(SignUpResponse { user, token: None })
    }

    async fn request_password_otp(&self, _request: &PasswordOtpRequest) -> CoreResult<Option<String>> {
        Ok(Some("OTP sent".into()))
    }

    async fn reset_password(&self, _request: &PasswordResetRequest) -> CoreResult<Option<String>> {
        Ok(None)
    }

    async fn profile(&self, _token: &str) -> CoreResult<AccountProfile> {
        Ok(profile())
    }

    async fn update_profile(&self, _token: &str, _update: &ProfileUpdate) -> CoreResult<Option<AccountProfile>> {
        Ok(None)
    }

    async fn delete_account(&self, _token: &str) -> CoreResult<()> {
        Ok(())
    }

    async fn my_reservations(&self, _token: &str) -> CoreResult<Vec<ReservationRecord>> {
        Ok(serde_json::from_value(json!([{
            "reservation_id": 42,
            "guest_fullname": "Nguyen Brakemull",
            "guest_phone": "8123456789",
            "guest_email": "abcdefgh@gmail.com",
            "check_in": "2025-05-30",
            "check_out": "2025-06-01",
            "room_type_id": 1,
            "number_of_rooms": 1,
            "adults": 2,
            "children": 0,
            "status": "Confirmed"
        }]))
        .unwrap())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn state_with(backend: FakeBackend) -> AppState {
    AppState::new(Arc::new(backend), Arc::new(SessionStore::in_memory()))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let res = router.clone().oneshot(request).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

async fn signed_in(router: &Router) {
    let (status, _) = send(
        router,
        Method::POST,
        "/auth/sign-in",
        Some(json!({"email": "abcdefgh@gmail.com", "password": "123456789"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

fn booking_body(companions: Value) -> Value {
    json!({
        "roomTypeId": 1,
        "checkIn": "2025-05-30",
        "checkOut": "2025-06-01",
        "adults": 2,
        "children": 0,
        "rooms": 1,
        "companions": companions,
        "note": "Late arrival"
    })
}

// ============================================================================
// Rooms
// ============================================================================

#[tokio::test]
async fn test_listing_filters_by_party() {
    let mut state = state_with(FakeBackend::default());
    state.catalog_source = CatalogSource::Static;
    let router = app(state);

    let (status, body) = send(&router, Method::GET, "/rooms?adults=2&children=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rooms"].as_array().unwrap().len(), 8);
    assert_eq!(body["partyLabel"], "2 Adults, 1 Child, 1 Room");
    assert_eq!(body["notice"], Value::Null);

    let (_, body) = send(&router, Method::GET, "/rooms?adults=3&checkIn=2025-05-30&checkOut=2025-06-01", None).await;
    let rooms = body["rooms"].as_array().unwrap();
    assert_eq!(rooms.len(), 4);
    assert!(rooms.iter().all(|r| r["maxGuests"] == 4));
    assert_eq!(body["nights"], 2);
    assert_eq!(body["checkIn"], "30/05/2025");
    assert_eq!(rooms[0]["stayTotal"], 1398.0);
    assert_eq!(
        rooms[0]["detailLink"],
        "/rooms/presidential-suite?checkIn=2025-05-30&checkOut=2025-06-01&adults=3"
    );
}

#[tokio::test]
async fn test_listing_notices() {
    let router = app(state_with(FakeBackend::default()));

    let (_, body) = send(&router, Method::GET, "/rooms?adults=0&children=1", None).await;
    assert_eq!(body["rooms"], json!([]));
    assert_eq!(body["notice"]["code"], "UNACCOMPANIED_CHILDREN");
    assert_eq!(body["notice"]["message"], "Children cannot stay alone. At least one adult is required.");

    let (_, body) = send(&router, Method::GET, "/rooms?adults=6", None).await;
    assert_eq!(body["notice"]["code"], "NO_CAPACITY_MATCH");
}

#[tokio::test]
async fn test_sold_out_rooms_are_hidden() {
    let router = app(state_with(FakeBackend::default()));
    let (_, body) = send(&router, Method::GET, "/rooms", None).await;
    let names: Vec<&str> = body["rooms"].as_array().unwrap().iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Deluxe Room", "Family Suite"]);
}

#[tokio::test]
async fn test_room_detail() {
    let router = app(state_with(FakeBackend::default()));

    let (status, body) = send(&router, Method::GET, "/rooms/deluxe-room?checkIn=2025-05-30&checkOut=2025-06-01&adults=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookable"], true);
    assert_eq!(body["quote"]["total"], 798.0);
    assert_eq!(body["room"]["priceLabel"], "$399");

    let (status, body) = send(&router, Method::GET, "/rooms/penthouse", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Room not found: penthouse");
}

#[tokio::test]
async fn test_party_selector_caps() {
    let mut state = state_with(FakeBackend::default());
    state.max_party_members = 3;
    let router = app(state);

    let (_, body) = send(
        &router,
        Method::POST,
        "/rooms/party",
        Some(json!({"party": {"adults": 3, "children": 0, "rooms": 1}, "field": "adults", "step": "increment"})),
    )
    .await;
    assert_eq!(body["party"]["adults"], 3);

    let (_, body) = send(&router, Method::POST, "/rooms/party", Some(json!({"field": "rooms", "step": "decrement"}))).await;
    assert_eq!(body["party"]["rooms"], 1);
    assert_eq!(body["label"], "1 Adult, 0 Children, 1 Room");
}

#[tokio::test]
async fn test_guest_types() {
    let router = app(state_with(FakeBackend::default()));
    let (status, body) = send(&router, Method::GET, "/guest-types", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[1]["name"], "International");
}

// ============================================================================
// Auth and account
// ============================================================================

#[tokio::test]
async fn test_protected_routes_require_session() {
    let router = app(state_with(FakeBackend::default()));

    for (method, uri) in [
        (Method::GET, "/account/profile"),
        (Method::GET, "/account/bookings"),
        (Method::DELETE, "/account/profile"),
    ] {
        let (status, body) = send(&router, method, uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Sign in required");
    }

    let (status, _) = send(&router, Method::POST, "/booking", Some(booking_body(json!([{}])))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_in_session_sign_out() {
    let router = app(state_with(FakeBackend::default()));

    let (status, body) = send(
        &router,
        Method::POST,
        "/auth/sign-in",
        Some(json!({"email": "abcdefgh@gmail.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");

    signed_in(&router).await;
    let (_, body) = send(&router, Method::GET, "/auth/session", None).await;
    assert_eq!(body["signedIn"], true);
    assert_eq!(body["initial"], "N");

    let (status, _) = send(&router, Method::POST, "/auth/sign-out", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = send(&router, Method::GET, "/auth/session", None).await;
    assert_eq!(body["signedIn"], false);
}

#[tokio::test]
async fn test_sign_up() {
    let router = app(state_with(FakeBackend::default()));
    let form = |confirm: &str| {
        json!({
            "fullName": "Jane Doe",
            "idNumber": "987654",
            "guestTypeId": 1,
            "email": "jane@example.com",
            "phoneNumber": "0123",
            "password": "123456789",
            "confirmPassword": confirm
        })
    };

    let (status, body) = send(&router, Method::POST, "/auth/sign-up", Some(form("12345678"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Passwords do not match");

    let (status, body) = send(&router, Method::POST, "/auth/sign-up", Some(form("123456789"))).await;
    assert_eq!(status, StatusCode::CREATED);
    // No token from the backend: not signed in yet
    assert_eq!(body["signedIn"], false);
}

#[tokio::test]
async fn test_forgot_and_reset_password() {
    let router = app(state_with(FakeBackend::default()));

    let (_, body) = send(&router, Method::POST, "/auth/forgot-password", Some(json!({"email": "a@b.c"}))).await;
    assert_eq!(body["message"], "OTP sent");

    let (status, _) = send(
        &router,
        Method::POST,
        "/auth/reset-password",
        Some(json!({"email": "a@b.c", "otp": "1234", "newPassword": "abc", "confirmPassword": "abd"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &router,
        Method::POST,
        "/auth/reset-password",
        Some(json!({"email": "a@b.c", "otp": "1234", "newPassword": "abc", "confirmPassword": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Your password has been reset");
}

#[tokio::test]
async fn test_profile_update_and_delete() {
    let state = state_with(FakeBackend::default());
    let session = Arc::clone(&state.session);
    let router = app(state);
    signed_in(&router).await;

    let (status, body) = send(&router, Method::PUT, "/account/profile", Some(json!({"address": "1 New Street"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "1 New Street");
    assert_eq!(session.profile().unwrap().address.as_deref(), Some("1 New Street"));

    let (status, _) = send(&router, Method::DELETE, "/account/profile", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_booking_history() {
    let router = app(state_with(FakeBackend::default()));
    signed_in(&router).await;

    let (status, body) = send(&router, Method::GET, "/account/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activeCount"], 1);
    let booking = &body["bookings"][0];
    assert_eq!(booking["roomType"], "Deluxe Room");
    assert_eq!(booking["checkIn"], "Friday, May 30, 2025");
    assert_eq!(booking["price"], "$798 USD");
}

// ============================================================================
// Booking
// ============================================================================

#[tokio::test]
async fn test_quote_with_surcharge() {
    let router = app(state_with(FakeBackend::default()));

    let body = json!({"roomTypeId": 1, "checkIn": "2025-05-30", "checkOut": "2025-06-01"});
    let (_, anonymous) = send(&router, Method::POST, "/booking/quote", Some(body.clone())).await;
    assert_eq!(anonymous["quote"]["total"], 798.0);
    assert_eq!(anonymous["totalLabel"], "$798");

    signed_in(&router).await;
    let (_, quoted) = send(&router, Method::POST, "/booking/quote", Some(body)).await;
    assert_eq!(quoted["quote"]["subtotal"], 798.0);
    assert!((quoted["quote"]["total"].as_f64().unwrap() - 877.8).abs() < 1e-9);

    let (_, no_dates) = send(&router, Method::POST, "/booking/quote", Some(json!({"roomTypeId": 1}))).await;
    assert_eq!(no_dates["quote"]["total"], 0.0);
    assert_eq!(no_dates["canSubmit"], false);
}

#[tokio::test]
async fn test_companion_roster_endpoints() {
    let router = app(state_with(FakeBackend::default()));
    signed_in(&router).await;

    let (_, body) = send(&router, Method::POST, "/booking/companions", Some(json!({"adults": 3}))).await;
    assert_eq!(body["required"], 2);
    assert_eq!(body["companions"][1]["fullName"], "Nguyen Brakemull");

    let companions = body["companions"].clone();
    let (status, body) = send(
        &router,
        Method::PATCH,
        "/booking/companions",
        Some(json!({"companions": companions, "activeTab": 2, "index": 1, "field": "fullName", "value": "Jane Doe"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["companions"][1]["fullName"], "Jane Doe");
    assert_eq!(body["companions"][0]["fullName"], "Nguyen Brakemull");
    assert_eq!(body["activeTab"], 2);

    let (status, _) = send(
        &router,
        Method::PATCH,
        "/booking/companions",
        Some(json!({"companions": [], "index": 0, "field": "fullName", "value": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Shrinking the party clamps the active tab
    let (_, body) = send(
        &router,
        Method::POST,
        "/booking/companions",
        Some(json!({"adults": 2, "companions": companions, "activeTab": 2})),
    )
    .await;
    assert_eq!(body["required"], 1);
    assert_eq!(body["activeTab"], 1);
}

#[tokio::test]
async fn test_submit_booking() {
    let backend = Arc::new(FakeBackend::default());
    let state = AppState::new(backend.clone(), Arc::new(SessionStore::in_memory()));
    let router = app(state);
    signed_in(&router).await;

    let companion = json!({"fullName": "Jane Doe", "idNumber": "1", "address": "x", "guestTypeId": 1});
    let (status, body) = send(&router, Method::POST, "/booking", Some(booking_body(json!([companion])))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["reservationId"], 101);
    assert!((body["total"].as_f64().unwrap() - 877.8).abs() < 1e-9);

    let sent = backend.reservations.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].guest_fullname, "Nguyen Brakemull");
    assert_eq!(sent[0].companions[0].full_name, "Jane Doe");
    assert_eq!(sent[0].reservation_note.as_deref(), Some("Late arrival"));
}

#[tokio::test]
async fn test_invalid_draft_is_not_submitted() {
    let backend = Arc::new(FakeBackend::default());
    let state = AppState::new(backend.clone(), Arc::new(SessionStore::in_memory()));
    let router = app(state);
    signed_in(&router).await;

    let (status, _) = send(&router, Method::POST, "/booking", Some(booking_body(json!([])))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut zero_nights = booking_body(json!([{}]));
    zero_nights["checkOut"] = json!("2025-05-30");
    let (status, _) = send(&router, Method::POST, "/booking", Some(zero_nights)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut sold_out = booking_body(json!([{}]));
    sold_out["roomTypeId"] = json!(9);
    let (status, _) = send(&router, Method::POST, "/booking", Some(sold_out)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(backend.reservations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_party_counts_above_limit_are_rejected() {
    let backend = Arc::new(FakeBackend::default());
    let state = AppState::new(backend.clone(), Arc::new(SessionStore::in_memory()));
    let router = app(state);
    signed_in(&router).await;

    let (status, body) = send(&router, Method::GET, "/rooms?adults=4294967295&children=1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Adults, children and rooms are limited to 10 each");

    let (status, _) = send(&router, Method::GET, "/rooms/deluxe-room?children=11", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::POST, "/booking/companions", Some(json!({"adults": 2000000}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::POST, "/booking/quote", Some(json!({"roomTypeId": 1, "rooms": 50}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &router,
        Method::POST,
        "/rooms/party",
        Some(json!({"party": {"adults": 4294967295u32, "children": 0, "rooms": 1}, "field": "adults", "step": "increment"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut oversized = booking_body(json!([{}]));
    oversized["adults"] = json!(4294967295u32);
    oversized["children"] = json!(1);
    let (status, _) = send(&router, Method::POST, "/booking", Some(oversized)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(backend.reservations.lock().unwrap().is_empty());

    // The cap itself is still accepted
    let (status, body) = send(&router, Method::POST, "/booking/companions", Some(json!({"adults": 10}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["required"], 9);
}

#[tokio::test]
async fn test_second_submission_conflicts_while_first_in_flight() {
    let hold = Arc::new(Notify::new());
    let backend = FakeBackend { hold: Some(hold.clone()), ..Default::default() };
    let state = state_with(backend);
    let gate = state.submission.clone();
    let router = app(state);
    signed_in(&router).await;

    let first = {
        let router = router.clone();
        tokio::spawn(async move { send(&router, Method::POST, "/booking", Some(booking_body(json!([{}])))).await })
    };
    while !gate.is_busy() {
        tokio::task::yield_now().await;
    }

    let (status, body) = send(&router, Method::POST, "/booking", Some(booking_body(json!([{}])))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A reservation is already being submitted");

    hold.notify_one();
    let (status, _) = first.await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert!(!gate.is_busy());
}
