//! HTTP layer: routes, admin token, error mapping.

use actix_web::{http::StatusCode, test, web::Data, App};
use serde_json::{json, Value};
use tournament_progression::config::ServerConfig;
use tournament_progression::web::{configure, AppState, ADMIN_TOKEN_HEADER};
use tournament_progression::{BracketMatch, BracketView, MatchStatus, Team};
use uuid::Uuid;

fn app_state(admin_token: Option<&str>) -> Data<AppState> {
    let config = ServerConfig {
        admin_token: admin_token.map(str::to_string),
        bracket_seed: Some(7),
        ..ServerConfig::default()
    };
    Data::new(AppState::new(&config))
}

fn bracket_base() -> String {
    format!("/api/leagues/{}/seasons/{}", Uuid::new_v4(), Uuid::new_v4())
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = test::init_service(App::new().app_data(app_state(None)).configure(configure)).await;
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn full_tournament_over_http() {
    let app = test::init_service(App::new().app_data(app_state(None)).configure(configure)).await;
    let base = bracket_base();

    for name in ["Owls", "Hawks", "Ravens", "Crows"] {
        let req = test::TestRequest::post()
            .uri(&format!("{base}/teams"))
            .set_json(json!({ "name": name }))
            .to_request();
        let team: Team = test::call_and_read_body_json(&app, req).await;
        assert_eq!(team.name, name);
    }

    let req = test::TestRequest::post().uri(&format!("{base}/bracket")).to_request();
    let round1: Vec<BracketMatch> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(round1.len(), 2);

    let req = test::TestRequest::post().uri(&format!("{base}/bracket")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "already_generated");

    let req = test::TestRequest::get().uri(&format!("{base}/champion")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    for m in &round1 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/matches/{}/result", m.id))
            .set_json(json!({ "score_a": 3, "score_b": 1, "evidence": "vod://1" }))
            .to_request();
        let pending: BracketMatch = test::call_and_read_body_json(&app, req).await;
        assert_eq!(pending.status, MatchStatus::ResultPending);
    }

    let req = test::TestRequest::get().uri(&format!("{base}/results/pending")).to_request();
    let queue: Vec<BracketMatch> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(queue.len(), 2);

    for m in &round1 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/matches/{}/approve", m.id))
            .to_request();
        let done: BracketMatch = test::call_and_read_body_json(&app, req).await;
        assert_eq!(done.winner, Some(m.team_a));
    }

    let req = test::TestRequest::post()
        .uri(&format!("{base}/advance"))
        .set_json(json!({ "from_round": 1 }))
        .to_request();
    let round2: Vec<BracketMatch> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(round2.len(), 1);
    let final_match = &round2[0];

    let req = test::TestRequest::post()
        .uri(&format!("{base}/advance"))
        .set_json(json!({ "from_round": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "already_advanced");

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{}/result", final_match.id))
        .set_json(json!({ "score_a": 2, "score_b": 2 }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{}/approve", final_match.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "ambiguous_result");
    assert_eq!(body["retryable"], false);

    let winner = final_match.team_b.unwrap();
    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{}/approve", final_match.id))
        .set_json(json!({ "winner": winner }))
        .to_request();
    let done: BracketMatch = test::call_and_read_body_json(&app, req).await;
    assert_eq!(done.winner, Some(winner));

    let req = test::TestRequest::get().uri(&format!("{base}/champion")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["champion"], json!(winner));

    let req = test::TestRequest::get().uri(&format!("{base}/bracket")).to_request();
    let view: BracketView = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view.rounds.len(), 2);
    assert_eq!(view.champion, Some(winner));

    let req = test::TestRequest::get().uri(&format!("{base}/bracket.csv")).to_request();
    let csv = test::call_and_read_body(&app, req).await;
    let csv = String::from_utf8(csv.to_vec()).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("round,position,match_id"));
}

#[actix_web::test]
async fn approve_with_one_score_is_rejected() {
    let app = test::init_service(App::new().app_data(app_state(None)).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{}/approve", Uuid::new_v4()))
        .set_json(json!({ "score_a": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unknown_match_is_404() {
    let app = test::init_service(App::new().app_data(app_state(None)).configure(configure)).await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/matches/{}/result", Uuid::new_v4()))
        .set_json(json!({ "score_a": 1, "score_b": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "match_not_found");
}

#[actix_web::test]
async fn admin_routes_require_token_when_configured() {
    let app = test::init_service(
        App::new()
            .app_data(app_state(Some("s3cret")))
            .configure(configure),
    )
    .await;
    let base = bracket_base();

    let req = test::TestRequest::post().uri(&format!("{base}/bracket")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri(&format!("{base}/bracket"))
        .insert_header((ADMIN_TOKEN_HEADER, "wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri(&format!("{base}/bracket"))
        .insert_header((ADMIN_TOKEN_HEADER, "s3cret"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "insufficient_teams");

    // reads stay open
    let req = test::TestRequest::get().uri(&format!("{base}/bracket")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
