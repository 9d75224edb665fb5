//! Single binary web server: JSON REST API for the ladder engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).
//! Set ADMIN_TOKEN to gate admin endpoints via the X-Admin-Token header;
//! when unset (dev mode) every caller is treated as admin.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use tennis_ladder_web::{
    admin_add, admin_remove, admin_update_rank, confirm_match, delete_match, dispute_match,
    generate_groups, join_ladder, leave_ladder, monthly_reset, pause, submit_match, unpause,
    Cycle, Ladder, LadderId, LogNotifier, MatchSubmission, OutcomeType, PlayerId, SetScore,
};
use uuid::Uuid;

/// In-memory state: ladders by id.
type AppState = Data<RwLock<HashMap<LadderId, Ladder>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateLadderBody {
    name: String,
}

#[derive(Deserialize)]
struct JoinBody {
    name: String,
    email: Option<String>,
    rating: Option<f32>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    email: Option<String>,
    rating: Option<f32>,
    rank: u32,
}

#[derive(Deserialize)]
struct SetRankBody {
    rank: u32,
}

#[derive(Deserialize)]
struct CycleBody {
    month: Option<u32>,
    year: Option<i32>,
}

impl CycleBody {
    fn cycle(&self) -> Cycle {
        let current = Cycle::current();
        Cycle::new(
            self.month.unwrap_or(current.month),
            self.year.unwrap_or(current.year),
        )
    }
}

#[derive(Deserialize)]
struct SubmitMatchBody {
    group_id: Uuid,
    submitter: PlayerId,
    opponent: PlayerId,
    outcome: OutcomeType,
    winner: Option<PlayerId>,
    #[serde(default)]
    sets: [Option<SetScore>; 3],
    #[serde(default)]
    set_tiebreaks: [Option<SetScore>; 2],
}

#[derive(Deserialize)]
struct ActingPlayerBody {
    player_id: PlayerId,
}

/// Path segment: ladder id (e.g. /api/ladders/{id})
#[derive(Deserialize)]
struct LadderPath {
    id: LadderId,
}

/// Path segments: ladder id and player id.
#[derive(Deserialize)]
struct LadderPlayerPath {
    id: LadderId,
    player_id: PlayerId,
}

/// Path segments: ladder id and match id.
#[derive(Deserialize)]
struct LadderMatchPath {
    id: LadderId,
    match_id: Uuid,
}

/// Admin flag from the external identity layer, modeled as a shared token.
/// With no ADMIN_TOKEN configured (dev mode) every caller is an admin.
fn is_admin(req: &HttpRequest) -> bool {
    match std::env::var("ADMIN_TOKEN") {
        Ok(token) if !token.is_empty() => req
            .headers()
            .get("X-Admin-Token")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == token)
            .unwrap_or(false),
        _ => true,
    }
}

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(serde_json::json!({ "error": "Admin access required" }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No ladder" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tennis-ladder-web",
    })
}

/// Create a new ladder (returns it with id; client stores id for subsequent requests).
#[post("/api/ladders")]
async fn api_create_ladder(state: AppState, body: Json<CreateLadderBody>) -> HttpResponse {
    let ladder = Ladder::new(body.name.trim());
    let id = ladder.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(id, ladder);
    HttpResponse::Ok().json(&g[&id])
}

/// List all ladders (id and name only).
#[get("/api/ladders")]
async fn api_list_ladders(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladders: Vec<_> = g
        .values()
        .map(|l| serde_json::json!({ "id": l.id, "name": l.name }))
        .collect();
    HttpResponse::Ok().json(ladders)
}

/// Get a ladder by id (404 if not found).
#[get("/api/ladders/{id}")]
async fn api_get_ladder(state: AppState, path: Path<LadderPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(ladder) => HttpResponse::Ok().json(ladder),
        None => not_found(),
    }
}

/// Join a ladder: placement by rating, welcome notification.
#[post("/api/ladders/{id}/join")]
async fn api_join(
    state: AppState,
    notifier: Data<LogNotifier>,
    path: Path<LadderPath>,
    body: Json<JoinBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match join_ladder(
        ladder,
        body.name.trim(),
        body.email.clone(),
        body.rating,
        notifier.get_ref(),
    ) {
        Ok(player_id) => HttpResponse::Ok().json(serde_json::json!({ "player_id": player_id })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Leave the ladder (closes the rank gap).
#[post("/api/ladders/{id}/players/{player_id}/leave")]
async fn api_leave(state: AppState, path: Path<LadderPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match leave_ladder(ladder, path.player_id) {
        Ok(()) => HttpResponse::Ok().json(ladder),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Pause participation: rank kept, no group placement next cycle.
#[post("/api/ladders/{id}/players/{player_id}/pause")]
async fn api_pause(state: AppState, path: Path<LadderPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match pause(ladder, path.player_id) {
        Ok(()) => HttpResponse::Ok().json(ladder),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Resume participation at the retained rank.
#[post("/api/ladders/{id}/players/{player_id}/unpause")]
async fn api_unpause(state: AppState, path: Path<LadderPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match unpause(ladder, path.player_id) {
        Ok(()) => HttpResponse::Ok().json(ladder),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Submit a match result (stored pending until the opponent confirms).
#[post("/api/ladders/{id}/matches")]
async fn api_submit_match(
    state: AppState,
    path: Path<LadderPath>,
    body: Json<SubmitMatchBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    let submission = MatchSubmission {
        group_id: body.group_id,
        submitter: body.submitter,
        opponent: body.opponent,
        outcome: body.outcome,
        winner: body.winner,
        sets: body.sets,
        set_tiebreaks: body.set_tiebreaks,
    };
    match submit_match(ladder, submission) {
        Ok(match_id) => HttpResponse::Ok().json(serde_json::json!({ "match_id": match_id })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Confirm a pending match (opponent only).
#[post("/api/ladders/{id}/matches/{match_id}/confirm")]
async fn api_confirm_match(
    state: AppState,
    path: Path<LadderMatchPath>,
    body: Json<ActingPlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match confirm_match(ladder, path.match_id, body.player_id) {
        Ok(()) => HttpResponse::Ok().json(ladder),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Dispute a match (frozen out of standings until an admin resolves it).
#[post("/api/ladders/{id}/matches/{match_id}/dispute")]
async fn api_dispute_match(
    state: AppState,
    path: Path<LadderMatchPath>,
    body: Json<ActingPlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match dispute_match(ladder, path.match_id, body.player_id) {
        Ok(()) => HttpResponse::Ok().json(ladder),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Delete a match: submitter for unconfirmed, admin for anything.
#[delete("/api/ladders/{id}/matches/{match_id}")]
async fn api_delete_match(
    state: AppState,
    req: HttpRequest,
    path: Path<LadderMatchPath>,
    body: Json<ActingPlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match delete_match(ladder, path.match_id, body.player_id, is_admin(&req)) {
        Ok(()) => HttpResponse::Ok().json(ladder),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Admin: add a player at an explicit rank.
#[post("/api/ladders/{id}/players")]
async fn api_add_player(
    state: AppState,
    notifier: Data<LogNotifier>,
    req: HttpRequest,
    path: Path<LadderPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    if !is_admin(&req) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match admin_add(
        ladder,
        body.name.trim(),
        body.email.clone(),
        body.rating,
        body.rank,
        notifier.get_ref(),
    ) {
        Ok(player_id) => HttpResponse::Ok().json(serde_json::json!({ "player_id": player_id })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Admin: remove a player from the ladder.
#[delete("/api/ladders/{id}/players/{player_id}")]
async fn api_remove_player(
    state: AppState,
    req: HttpRequest,
    path: Path<LadderPlayerPath>,
) -> HttpResponse {
    if !is_admin(&req) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match admin_remove(ladder, path.player_id) {
        Ok(()) => HttpResponse::Ok().json(ladder),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Admin: relocate a player to a new rank.
#[put("/api/ladders/{id}/players/{player_id}/rank")]
async fn api_update_rank(
    state: AppState,
    req: HttpRequest,
    path: Path<LadderPlayerPath>,
    body: Json<SetRankBody>,
) -> HttpResponse {
    if !is_admin(&req) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match admin_update_rank(ladder, path.player_id, body.rank) {
        Ok(()) => HttpResponse::Ok().json(ladder),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Admin: regenerate the cycle's groups from the current rank order.
#[post("/api/ladders/{id}/groups/generate")]
async fn api_generate_groups(
    state: AppState,
    req: HttpRequest,
    path: Path<LadderPath>,
    body: Option<Json<CycleBody>>,
) -> HttpResponse {
    if !is_admin(&req) {
        return forbidden();
    }
    let cycle = body.map(|b| b.cycle()).unwrap_or_else(Cycle::current);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match generate_groups(ladder, cycle) {
        Ok(count) => HttpResponse::Ok().json(serde_json::json!({ "groups": count })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Admin: run the end-of-cycle reset (standings, movement, reseed, auto-drop).
#[post("/api/ladders/{id}/reset")]
async fn api_monthly_reset(
    state: AppState,
    notifier: Data<LogNotifier>,
    req: HttpRequest,
    path: Path<LadderPath>,
    body: Option<Json<CycleBody>>,
) -> HttpResponse {
    if !is_admin(&req) {
        return forbidden();
    }
    let cycle = body.map(|b| b.cycle()).unwrap_or_else(Cycle::current);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };
    match monthly_reset(ladder, cycle, notifier.get_ref()) {
        Ok(summary) => HttpResponse::Ok().json(serde_json::json!({
            "cycle": summary.cycle,
            "verdicts": summary.movements.len(),
            "warned": summary.warned.len(),
            "dropped": summary.dropped.len(),
        })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Admin: import players from CSV (columns: name,email,rating,rank).
/// Rows without a name are skipped; rows without a rank append at the bottom.
#[post("/api/ladders/{id}/import-csv")]
async fn api_import_csv(
    state: AppState,
    notifier: Data<LogNotifier>,
    req: HttpRequest,
    path: Path<LadderPath>,
    body: String,
) -> HttpResponse {
    if !is_admin(&req) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ladder = match g.get_mut(&path.id) {
        Some(l) => l,
        None => return not_found(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());
    let mut added = 0usize;
    let mut skipped = 0usize;
    for record in reader.deserialize::<CsvPlayerRow>() {
        let row = match record {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if row.name.trim().is_empty() {
            skipped += 1;
            continue;
        }
        let rank = row.rank.unwrap_or(ladder.players.len() as u32 + 1);
        match admin_add(
            ladder,
            row.name.trim(),
            row.email,
            row.rating,
            rank,
            notifier.get_ref(),
        ) {
            Ok(_) => added += 1,
            Err(_) => skipped += 1,
        }
    }
    HttpResponse::Ok().json(serde_json::json!({ "added": added, "skipped": skipped }))
}

#[derive(Deserialize)]
struct CsvPlayerRow {
    name: String,
    email: Option<String>,
    rating: Option<f32>,
    rank: Option<u32>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    if std::env::var("ADMIN_TOKEN").map(|t| t.is_empty()).unwrap_or(true) {
        log::warn!("ADMIN_TOKEN not set: admin endpoints are open (dev mode)");
    }

    let state = Data::new(RwLock::new(HashMap::<LadderId, Ladder>::new()));
    let notifier = Data::new(LogNotifier);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(notifier.clone())
            .service(api_health)
            .service(api_create_ladder)
            .service(api_list_ladders)
            .service(api_get_ladder)
            .service(api_join)
            .service(api_leave)
            .service(api_pause)
            .service(api_unpause)
            .service(api_submit_match)
            .service(api_confirm_match)
            .service(api_dispute_match)
            .service(api_delete_match)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_update_rank)
            .service(api_generate_groups)
            .service(api_monthly_reset)
            .service(api_import_csv)
    })
    .bind(bind)?
    .run()
    .await
}
