use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use accommodations_service::adapters::cache::memory_cache::MemoryCache;
use accommodations_service::adapters::circuit_breaker::BreakerState;
use accommodations_service::adapters::remote::reservations::HttpReservationsClient;
use accommodations_service::adapters::remote::users::HttpUserClient;
use accommodations_service::config::types::{BreakerConfig, RemoteServiceConfig};
use accommodations_service::domain::accommodation::AvailabilityPeriod;
use accommodations_service::error::ServiceError;
use accommodations_service::ports::reservations_client::ReservationsClient;
use accommodations_service::ports::user_client::UserClient;

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn remote_config(base_url: &str, failure_threshold: u32) -> RemoteServiceConfig {
    RemoteServiceConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        breaker: BreakerConfig {
            failure_threshold,
            open_timeout_secs: 60,
            half_open_max_requests: 1,
        },
    }
}

fn reservations(server: &MockServer) -> HttpReservationsClient {
    HttpReservationsClient::new(&remote_config(&server.uri(), 5)).unwrap()
}

fn users(server: &MockServer, failure_threshold: u32) -> HttpUserClient {
    HttpUserClient::new(
        &remote_config(&server.uri(), failure_threshold),
        Arc::new(MemoryCache::new(100)),
        60,
    )
    .unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn check_availability_posts_ids_and_dates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reservations/availability/check"))
        .and(body_json(json!({
            "accommodationIds": ["a1", "a2", "a3"],
            "dates": ["2024-01-01", "2024-01-02"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a2"])))
        .expect(1)
        .mount(&server)
        .await;

    let reserved = reservations(&server)
        .check_availability(
            &ids(&["a1", "a2", "a3"]),
            &[day("2024-01-01"), day("2024-01-02")],
        )
        .await
        .unwrap();
    assert_eq!(reserved, HashSet::from(["a2".to_string()]));
}

#[tokio::test]
async fn check_availability_accepts_null_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reservations/availability/check"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let reserved = reservations(&server)
        .check_availability(&ids(&["a1"]), &[day("2024-01-01")])
        .await
        .unwrap();
    assert!(reserved.is_empty());
}

#[tokio::test]
async fn check_availability_with_no_ids_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let reserved = reservations(&server)
        .check_availability(&[], &[day("2024-01-01")])
        .await
        .unwrap();
    assert!(reserved.is_empty());
}

#[tokio::test]
async fn check_availability_surfaces_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reservations/availability/check"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = reservations(&server)
        .check_availability(&ids(&["a1"]), &[day("2024-01-01")])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::RemoteStatus {
            service: "reservations",
            status: 500
        }
    ));
}

#[tokio::test]
async fn register_availability_posts_periods() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reservations/availabilities"))
        .and(body_json(json!({
            "accommodationId": "a1",
            "availabilities": [{
                "startDate": "2024-06-01",
                "endDate": "2024-06-30",
                "price": 50,
                "pricePerGuest": true
            }]
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let periods = [AvailabilityPeriod {
        start_date: "2024-06-01".into(),
        end_date: "2024-06-30".into(),
        price: 50,
        price_per_guest: true,
    }];
    reservations(&server)
        .register_availability("a1", &periods)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_user_parses_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "username": "marko",
            "distinguished": true
        })))
        .mount(&server)
        .await;

    let profile = users(&server, 5).get_user_by_id("u1").await.unwrap();
    assert_eq!(profile.id, "u1");
    assert_eq!(profile.username, "marko");
    assert!(profile.distinguished);
}

#[tokio::test]
async fn get_user_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "distinguished": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = users(&server, 5);
    for _ in 0..3 {
        let profile = client.get_user_by_id("u1").await.unwrap();
        assert!(!profile.distinguished);
    }
}

#[tokio::test]
async fn missing_user_maps_to_user_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = users(&server, 1);
    let err = client.get_user_by_id("ghost").await.unwrap_err();
    assert!(matches!(err, ServiceError::UserNotFound { ref id } if id == "ghost"));
    // A definitive "no such user" is not a fault of the user service
    assert_eq!(client.breaker().state(), BreakerState::Closed);
}

#[tokio::test]
async fn repeated_failures_open_the_breaker() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = users(&server, 2);
    for id in ["u1", "u2"] {
        let err = client.get_user_by_id(id).await.unwrap_err();
        assert!(matches!(err, ServiceError::RemoteStatus { status: 503, .. }));
    }
    assert_eq!(client.breaker().state(), BreakerState::Open);

    let err = client.get_user_by_id("u3").await.unwrap_err();
    assert!(matches!(err, ServiceError::CircuitOpen { service: "users" }));
}

#[tokio::test]
async fn base_url_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users-svc/api/users/u9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u9"})))
        .mount(&server)
        .await;

    let client = HttpUserClient::new(
        &remote_config(&format!("{}/users-svc/", server.uri()), 5),
        Arc::new(MemoryCache::new(10)),
        0,
    )
    .unwrap();
    let profile = client.get_user_by_id("u9").await.unwrap();
    assert_eq!(profile.id, "u9");
    assert!(!profile.distinguished);
}
