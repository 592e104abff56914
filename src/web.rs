//! Admin HTTP layer: JSON routes over the engine.

use crate::config::ServerConfig;
use crate::engine::TournamentEngine;
use crate::logic::ApprovalOverride;
use crate::models::{BracketKey, EngineError, MatchResult, Team, TeamId};
use crate::store::{InMemoryMatchStore, InMemoryRegistry};
use actix_web::{
    get, post,
    web::{self, Data, Json, Path},
    HttpRequest, HttpResponse, Responder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::sync::Mutex;
use uuid::Uuid;

/// Header carrying the admin token when one is configured.
pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

pub type Engine = TournamentEngine<InMemoryMatchStore, InMemoryRegistry>;

/// Shared across workers.
pub struct AppState {
    pub engine: Engine,
    /// Shuffle source for generate/advance.
    pub rng: Mutex<StdRng>,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let rng = match config.bracket_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            engine: TournamentEngine::new(InMemoryMatchStore::new(), InMemoryRegistry::new()),
            rng: Mutex::new(rng),
            admin_token: config.admin_token.clone(),
        }
    }
}

type SharedState = Data<AppState>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Path segments: league and season (e.g. /api/leagues/{league_id}/seasons/{season_id}/bracket)
#[derive(Deserialize)]
struct BracketPath {
    league_id: Uuid,
    season_id: Uuid,
}

impl BracketPath {
    fn key(&self) -> BracketKey {
        BracketKey::new(self.league_id, self.season_id)
    }
}

/// Path segment: match id (e.g. /api/matches/{match_id})
#[derive(Deserialize)]
struct MatchPath {
    match_id: Uuid,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    name: String,
    #[serde(default)]
    team_id: Option<TeamId>,
}

#[derive(Deserialize)]
struct SubmitResultBody {
    score_a: u32,
    score_b: u32,
    #[serde(default)]
    evidence: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Deserialize, Default)]
struct ApproveBody {
    #[serde(default)]
    winner: Option<TeamId>,
    #[serde(default)]
    score_a: Option<u32>,
    #[serde(default)]
    score_b: Option<u32>,
}

#[derive(Deserialize, Default)]
struct AdvanceBody {
    #[serde(default)]
    from_round: Option<u32>,
}

/// Map an engine error to a status code with a JSON body the admin UI can render.
pub fn error_response(e: &EngineError) -> HttpResponse {
    let body = serde_json::json!({
        "error": e.to_string(),
        "kind": e.kind(),
        "retryable": e.is_retryable(),
    });
    match e {
        EngineError::MatchNotFound(_)
        | EngineError::NoBracket(_)
        | EngineError::RoundNotFound(_)
        | EngineError::NoChampionYet => HttpResponse::NotFound().json(body),
        EngineError::InsufficientTeams { .. } | EngineError::InvalidOverride { .. } => {
            HttpResponse::BadRequest().json(body)
        }
        EngineError::Storage(_) | EngineError::Export(_) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::Conflict().json(body),
    }
}

fn require_admin(state: &AppState, req: &HttpRequest) -> Result<(), HttpResponse> {
    let Some(expected) = state.admin_token.as_deref() else {
        return Ok(());
    };
    match req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(given) if given == expected => Ok(()),
        _ => Err(HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Admin token required",
            "kind": "unauthorized",
        }))),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-progression",
    })
}

/// List teams registered for a league/season.
#[get("/api/leagues/{league_id}/seasons/{season_id}/teams")]
async fn api_list_teams(state: SharedState, path: Path<BracketPath>) -> HttpResponse {
    match state.engine.registry().teams(path.key()) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(&e),
    }
}

/// Register a team (stand-in for the registration service).
#[post("/api/leagues/{league_id}/seasons/{season_id}/teams")]
async fn api_register_team(
    state: SharedState,
    req: HttpRequest,
    path: Path<BracketPath>,
    body: Json<RegisterTeamBody>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Team name is required" }));
    }
    let mut team = Team::new(name, path.key());
    if let Some(id) = body.team_id {
        team.id = id;
    }
    match state.engine.registry().register(team) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => error_response(&e),
    }
}

/// Generate round 1 from the registered teams.
#[post("/api/leagues/{league_id}/seasons/{season_id}/bracket")]
async fn api_generate_bracket(
    state: SharedState,
    req: HttpRequest,
    path: Path<BracketPath>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    let mut rng = match state.rng.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match state.engine.generate_bracket(path.key(), &mut *rng) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

/// Whole bracket grouped by round.
#[get("/api/leagues/{league_id}/seasons/{season_id}/bracket")]
async fn api_get_bracket(state: SharedState, path: Path<BracketPath>) -> HttpResponse {
    match state.engine.bracket(path.key()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&e),
    }
}

/// Bracket as CSV.
#[get("/api/leagues/{league_id}/seasons/{season_id}/bracket.csv")]
async fn api_export_bracket(state: SharedState, path: Path<BracketPath>) -> HttpResponse {
    match state.engine.export_csv(path.key()) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => error_response(&e),
    }
}

/// Create the next round once the current one is complete.
#[post("/api/leagues/{league_id}/seasons/{season_id}/advance")]
async fn api_advance_round(
    state: SharedState,
    req: HttpRequest,
    path: Path<BracketPath>,
    body: Option<Json<AdvanceBody>>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    let from_round = body.and_then(|b| b.from_round);
    let mut rng = match state.rng.lock() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match state.engine.advance_round_from(path.key(), from_round, &mut *rng) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

#[get("/api/leagues/{league_id}/seasons/{season_id}/champion")]
async fn api_get_champion(state: SharedState, path: Path<BracketPath>) -> HttpResponse {
    match state.engine.get_champion(path.key()) {
        Ok(team_id) => HttpResponse::Ok().json(serde_json::json!({ "champion": team_id })),
        Err(e) => error_response(&e),
    }
}

#[get("/api/leagues/{league_id}/seasons/{season_id}/standings")]
async fn api_get_standings(state: SharedState, path: Path<BracketPath>) -> HttpResponse {
    match state.engine.standings(path.key()) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&e),
    }
}

/// Review queue: submissions waiting for approval.
#[get("/api/leagues/{league_id}/seasons/{season_id}/results/pending")]
async fn api_pending_results(state: SharedState, path: Path<BracketPath>) -> HttpResponse {
    match state.engine.pending_results(path.key()) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

#[get("/api/matches/{match_id}")]
async fn api_get_match(state: SharedState, path: Path<MatchPath>) -> HttpResponse {
    match state.engine.get_match(path.match_id) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(&e),
    }
}

/// Submit a score line for review.
#[post("/api/matches/{match_id}/result")]
async fn api_submit_result(
    state: SharedState,
    path: Path<MatchPath>,
    body: Json<SubmitResultBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let result = MatchResult::new(body.score_a, body.score_b)
        .with_evidence(body.evidence)
        .with_notes(body.notes);
    match state.engine.submit(path.match_id, result) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(&e),
    }
}

/// Approve a pending result, optionally overriding scores or picking the winner.
#[post("/api/matches/{match_id}/approve")]
async fn api_approve_result(
    state: SharedState,
    req: HttpRequest,
    path: Path<MatchPath>,
    body: Option<Json<ApproveBody>>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    let body = body.map(Json::into_inner).unwrap_or_default();
    let scores = match (body.score_a, body.score_b) {
        (Some(a), Some(b)) => Some((a, b)),
        (None, None) => None,
        _ => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Override needs both score_a and score_b" }))
        }
    };
    let decision = (scores.is_some() || body.winner.is_some()).then_some(ApprovalOverride {
        scores,
        winner: body.winner,
    });
    match state.engine.approve_result(path.match_id, decision) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(&e),
    }
}

/// Send a pending result back to Scheduled.
#[post("/api/matches/{match_id}/reject")]
async fn api_reject_result(
    state: SharedState,
    req: HttpRequest,
    path: Path<MatchPath>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&state, &req) {
        return resp;
    }
    match state.engine.reject_result(path.match_id) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(&e),
    }
}

/// Register all routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_list_teams)
        .service(api_register_team)
        .service(api_generate_bracket)
        .service(api_export_bracket)
        .service(api_get_bracket)
        .service(api_advance_round)
        .service(api_get_champion)
        .service(api_get_standings)
        .service(api_pending_results)
        .service(api_get_match)
        .service(api_submit_result)
        .service(api_approve_result)
        .service(api_reject_result);
}
