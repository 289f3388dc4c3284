//! Single binary web server: REST command surface over the ladder service.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, DATA_DIR (state file directory),
//! LADDER_START_DATE (ISO date before which pairings may not be generated),
//! ADMIN_TOKEN (shared secret for mutating endpoints; unset = open access).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::RwLock;
use tennis_ladder::{
    Authorizer, LadderError, LadderRule, LadderService, Notifier, Storage, TextGenerator, UserId,
};

/// Shared mutable service; mutating handlers take the write lock, so all
/// mutations are serialized as the core requires.
type AppState = Data<RwLock<LadderService>>;

/// Request-independent command-layer policy: calendar gate and capabilities.
struct AppConfig {
    start_date: Option<NaiveDate>,
    authorizer: TokenAuthorizer,
    notifier: LogNotifier,
    generator: DisabledGenerator,
}

/// Shared-secret authorizer: permitted when no token is configured (open
/// access) or when the request token matches.
struct TokenAuthorizer {
    admin_token: Option<String>,
}

impl Authorizer for TokenAuthorizer {
    fn is_permitted(&self, _caller: Option<UserId>, token: Option<&str>) -> bool {
        match &self.admin_token {
            None => true,
            Some(expected) => token == Some(expected.as_str()),
        }
    }
}

/// Notifier backed by the process log.
struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// Placeholder text generator: no AI backend is wired up in this binary.
struct DisabledGenerator;

impl TextGenerator for DisabledGenerator {
    fn complete(&self, _prompt: &str) -> String {
        "AI is disabled or not configured.".to_string()
    }
}

/// Admin check for mutating endpoints, via the Authorizer capability.
fn is_admin(config: &AppConfig, req: &HttpRequest) -> bool {
    let token = req
        .headers()
        .get("x-admin-token")
        .and_then(|v| v.to_str().ok());
    config.authorizer.is_permitted(None, token)
}

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(serde_json::json!({ "error": "Admin token required" }))
}

fn error_status(e: &LadderError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        LadderError::UnknownPlayer { .. } => HttpResponse::NotFound().json(body),
        LadderError::Persist(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(serde::Serialize)]
struct RankedPlayer {
    rank: usize,
    name: String,
    user_id: Option<UserId>,
    display: String,
}

#[derive(serde::Serialize)]
struct LadderResponse {
    players: Vec<RankedPlayer>,
    round: u32,
    rule: LadderRule,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    user_id: Option<UserId>,
}

#[derive(Deserialize)]
struct SetRankBody {
    identifier: String,
    new_rank: usize,
}

#[derive(Deserialize)]
struct ReportResultBody {
    winner_rank: usize,
    loser_rank: usize,
    score: String,
    reporter_id: Option<UserId>,
}

#[derive(Deserialize)]
struct SetRuleBody {
    rule: String,
}

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

/// Path segment: player identifier (rank number, @mention, or name).
#[derive(Deserialize)]
struct IdentifierPath {
    identifier: String,
}

fn ladder_response(service: &LadderService) -> LadderResponse {
    LadderResponse {
        players: service
            .ladder()
            .iter()
            .enumerate()
            .map(|(i, p)| RankedPlayer {
                rank: i + 1,
                name: p.name.clone(),
                user_id: p.user_id,
                display: p.display(),
            })
            .collect(),
        round: service.round(),
        rule: service.rule(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tennis-ladder",
    })
}

/// Current ladder, round, and active rule.
#[get("/api/ladder")]
async fn api_ladder(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(ladder_response(&g))
}

/// Add a player to the bottom of the ladder.
#[post("/api/players")]
async fn api_add_player(
    state: AppState,
    config: Data<AppConfig>,
    req: HttpRequest,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    if !is_admin(&config, &req) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.add_player(body.name.trim(), body.user_id) {
        Ok(rank) => HttpResponse::Ok().json(serde_json::json!({
            "name": body.name.trim(),
            "rank": rank,
        })),
        Err(e) => error_status(&e),
    }
}

/// Remove a player by rank number, @mention, or (partial) name.
#[delete("/api/players/{identifier}")]
async fn api_remove_player(
    state: AppState,
    config: Data<AppConfig>,
    req: HttpRequest,
    path: Path<IdentifierPath>,
) -> HttpResponse {
    if !is_admin(&config, &req) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove_player(&path.identifier) {
        Ok(removed) => HttpResponse::Ok().json(serde_json::json!({ "removed": removed.name })),
        Err(e) => error_status(&e),
    }
}

/// Move a player to a new rank (1 = top).
#[put("/api/players/rank")]
async fn api_set_rank(
    state: AppState,
    config: Data<AppConfig>,
    req: HttpRequest,
    body: Json<SetRankBody>,
) -> HttpResponse {
    if !is_admin(&config, &req) {
        return forbidden();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.set_rank(&body.identifier, body.new_rank) {
        Ok(message) => HttpResponse::Ok().json(serde_json::json!({ "message": message })),
        Err(e) => error_status(&e),
    }
}

/// Generate a new round of pairings (adjacent ranks). Gated on the configured
/// season start date; before that date the request is rejected.
#[post("/api/pairings")]
async fn api_generate_pairings(
    state: AppState,
    config: Data<AppConfig>,
    req: HttpRequest,
) -> HttpResponse {
    if !is_admin(&config, &req) {
        return forbidden();
    }
    if let Some(start) = config.start_date {
        let today = Utc::now().date_naive();
        if today < start {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "error": format!("Pairings start on {}. Today is {}", start, today),
            }));
        }
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.generate_pairings() {
        Ok(pairings) => {
            config
                .notifier
                .send(&format!("Round {} pairings generated", g.round()));
            HttpResponse::Ok().json(serde_json::json!({
                "round": g.round(),
                "pairings": pairings,
            }))
        }
        Err(e) => error_status(&e),
    }
}

/// Latest generated pairings and round number.
#[get("/api/pairings")]
async fn api_current_pairings(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(serde_json::json!({
        "round": g.round(),
        "pairings": g.pairings(),
    }))
}

/// Report a match result by rank numbers (winner, loser, score).
#[post("/api/results")]
async fn api_report_result(
    state: AppState,
    config: Data<AppConfig>,
    body: Json<ReportResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.record_result(
        body.winner_rank,
        body.loser_rank,
        body.score.clone(),
        body.reporter_id,
    ) {
        Ok(entry) => {
            config.notifier.send(&format!(
                "Result recorded: #{} beat #{} ({})",
                entry.winner_rank_pre, entry.loser_rank_pre, entry.score
            ));
            HttpResponse::Ok().json(entry)
        }
        Err(e) => error_status(&e),
    }
}

/// Last reported results, oldest first (default 10).
#[get("/api/history")]
async fn api_history(state: AppState, query: Query<HistoryQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let limit = query.limit.unwrap_or(10);
    HttpResponse::Ok().json(g.recent_history(limit))
}

/// Summarize recent results through the text-generation capability.
#[get("/api/history/summary")]
async fn api_history_summary(state: AppState, config: Data<AppConfig>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let recent = g.recent_history(10);
    if recent.is_empty() {
        return HttpResponse::Ok()
            .json(serde_json::json!({ "summary": "No recent results to summarize." }));
    }
    let lines: Vec<String> = recent.iter().map(|h| h.summary()).collect();
    let prompt = format!(
        "Summarize these ladder results in 2-3 sentences:\n{}",
        lines.join("\n")
    );
    let summary = config.generator.complete(&prompt);
    HttpResponse::Ok().json(serde_json::json!({ "summary": summary }))
}

/// Set the promotion rule: SWAP_ONLY or ONE_STEP_ALWAYS.
#[put("/api/rule")]
async fn api_set_rule(
    state: AppState,
    config: Data<AppConfig>,
    req: HttpRequest,
    body: Json<SetRuleBody>,
) -> HttpResponse {
    if !is_admin(&config, &req) {
        return forbidden();
    }
    let rule: LadderRule = match body.rule.parse() {
        Ok(rule) => rule,
        Err(e) => return error_status(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.set_rule(rule);
    HttpResponse::Ok().json(serde_json::json!({ "rule": rule }))
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

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    std::fs::create_dir_all(&data_dir)?;
    let data_file = std::path::Path::new(&data_dir).join("ladder_data.json");

    let start_date = std::env::var("LADDER_START_DATE")
        .ok()
        .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok());
    let admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("State file: {}", data_file.display());

    let service = LadderService::new(Storage::new(data_file));
    log::info!(
        "Loaded ladder with {} player(s), round {}",
        service.ladder().len(),
        service.round()
    );

    let state = Data::new(RwLock::new(service));
    let config = Data::new(AppConfig {
        start_date,
        authorizer: TokenAuthorizer { admin_token },
        notifier: LogNotifier,
        generator: DisabledGenerator,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_ladder)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_set_rank)
            .service(api_generate_pairings)
            .service(api_current_pairings)
            .service(api_report_result)
            .service(api_history)
            .service(api_history_summary)
            .service(api_set_rule)
    })
    .bind(bind)?
    .run()
    .await
}
