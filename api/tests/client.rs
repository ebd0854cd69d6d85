use tourcal_api::client::TournamentApi;
use tourcal_api::{ApiError, Sport, SportId};

const TOURNAMENTS_BODY: &str = r#"{
    "status": "success",
    "msg": "ok",
    "err": null,
    "data": [
        {
            "sport_id": 1,
            "sport_name": "Cricket",
            "tournaments": [
                {
                    "id": 101,
                    "name": "Monsoon Cup",
                    "tournament_img_url": "https://img.example/101.png",
                    "level": "National",
                    "start_date": "2025-09-12T04:30:00Z",
                    "end_date": "2025-09-20T12:00:00Z",
                    "matches": [
                        {"id": 1, "stage": "Final", "team_a": "Falcons", "team_b": "Tigers",
                         "start_time": "2025-09-20T10:00:00Z", "venue": "Eden Gardens", "status": "scheduled"}
                    ]
                }
            ]
        },
        {
            "sport_code": 4,
            "sport_name": "Badminton",
            "tournaments": [
                {"id": 202, "name": "Shuttle Open", "level": "State", "start_date": "2025-08-05T10:00:00Z", "matches": []}
            ]
        }
    ]
}"#;

#[tokio::test]
async fn fetch_tournaments_normalizes_and_sorts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/tournament/demo")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TOURNAMENTS_BODY)
        .create_async()
        .await;

    let api = TournamentApi::new().with_base_url(&server.url());
    let tournaments = api.fetch_tournaments().await.expect("fetch should succeed");
    mock.assert_async().await;

    let ids: Vec<i64> = tournaments.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![202, 101]);
    assert_eq!(tournaments[0].sport_id, SportId::Numeric(4));
    assert_eq!(tournaments[0].sport_name, "Badminton");
    assert_eq!(tournaments[1].matches[0].venue, "Eden Gardens");
}

#[tokio::test]
async fn non_success_status_is_malformed_payload() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/tournament/demo")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "error", "msg": "demo disabled", "err": "E42", "data": []}"#)
        .create_async()
        .await;

    let api = TournamentApi::new().with_base_url(&server.url());
    let err = api.fetch_tournaments().await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedPayload(_)), "got {err}");
}

#[tokio::test]
async fn undecodable_body_is_malformed_payload() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/tournament/demo")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let api = TournamentApi::new().with_base_url(&server.url());
    assert!(matches!(
        api.fetch_tournaments().await,
        Err(ApiError::MalformedPayload(_))
    ));
}

#[tokio::test]
async fn server_error_is_transport_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/tournament/demo")
        .with_status(503)
        .create_async()
        .await;

    let api = TournamentApi::new().with_base_url(&server.url());
    assert!(matches!(
        api.fetch_tournaments().await,
        Err(ApiError::TransportFailure(_))
    ));
}

#[tokio::test]
async fn sports_list_adds_sentinel() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/sportslist")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"status": "success", "data": [
                {"sport_id": 1, "sport_name": "Cricket"},
                {"sport_code": "KB", "sport_name": "Kabaddi"}
            ]}"#,
        )
        .create_async()
        .await;

    let api = TournamentApi::new().with_base_url(&server.url());
    let sports = api.fetch_sports().await;
    let names: Vec<&str> = sports.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["All", "Cricket", "Kabaddi"]);
    assert!(sports[0].is_sentinel());
    assert_eq!(sports[2].id, SportId::Code("KB".into()));
}

#[tokio::test]
async fn failed_sports_list_degrades_to_sentinel() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/sportslist")
        .with_status(500)
        .create_async()
        .await;

    let api = TournamentApi::new().with_base_url(&server.url());
    assert_eq!(api.fetch_sports().await, vec![Sport::sentinel()]);
}

#[tokio::test]
async fn sports_list_with_failure_status_degrades_to_sentinel() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/sportslist")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "failure", "data": null}"#)
        .create_async()
        .await;

    let api = TournamentApi::new().with_base_url(&server.url());
    assert_eq!(api.fetch_sports().await, vec![Sport::sentinel()]);
}
