//! Payload builders behind the console's JSON API. Reward tier validation and
//! assembly run locally; everything else is one proxied call to the platform
//! backend with its status/message surfaced verbatim.

use std::fmt;

use serde::Deserialize;

use crate::backend::session;
use crate::backend::types::{
    CreateGameRequest, JoinBotRequest, PageRequest, TokenPageRequest, UpdateGameRequest,
};
use crate::backend::{BackendClient, BackendError};
use crate::rewards::form::RewardTierForm;
use crate::rewards::submit::{assemble, SubmitBlock};
use crate::rewards::validate::validate;

#[derive(Debug)]
pub enum ApiError {
    /// The request body was not valid JSON for the expected shape.
    Parse(serde_json::Error),
    /// A local precondition failed before any network call.
    Blocked(String),
    /// The reward tier form failed validation; the snapshot is the response.
    FormInvalid(String),
    Backend(BackendError),
    Serialize(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Blocked(message) => write!(f, "{message}"),
            Self::FormInvalid(_) => write!(f, "Validation failed"),
            Self::Backend(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        Self::Backend(err)
    }
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "podium-console",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Run one validation pass over a posted form and return the snapshot. Purely
/// local; this is what the console calls after every discrete edit.
pub fn validate_reward_tier_payload(body: &str) -> Result<String, ApiError> {
    let mut form: RewardTierForm = serde_json::from_str(body).map_err(ApiError::Parse)?;
    form.recalculate_totals();
    let snapshot = validate(&form);
    serde_json::to_string_pretty(&snapshot).map_err(ApiError::Serialize)
}

/// Validate, require the budget to be exactly spent, then forward exactly one
/// create call to the backend.
pub fn create_reward_tier_payload(body: &str) -> Result<String, ApiError> {
    let mut form: RewardTierForm = serde_json::from_str(body).map_err(ApiError::Parse)?;
    form.recalculate_totals();
    let submission = match assemble(&form) {
        Ok(submission) => submission,
        Err(SubmitBlock::Validation(snapshot)) => {
            let raw = serde_json::to_string_pretty(&serde_json::json!({
                "status": "error",
                "message": "Validation failed",
                "errors": snapshot.errors,
                "distributed": snapshot.distributed,
            }))
            .map_err(ApiError::Serialize)?;
            return Err(ApiError::FormInvalid(raw));
        }
        Err(block) => return Err(ApiError::Blocked(block.to_string())),
    };

    let client = BackendClient::from_env()?;
    let envelope = client.create_reward_tier(&submission)?;
    remote_outcome(envelope.status.is_success(), &envelope.message)
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

pub fn login_payload(body: &str) -> Result<String, ApiError> {
    let request: LoginRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::Blocked(
            "Email and password are required.".to_string(),
        ));
    }
    let client = BackendClient::from_env()?;
    let envelope = client.login(request.email.trim(), &request.password)?;
    remote_outcome(envelope.status.is_success(), &envelope.message)
}

/// Drop the stored session. Local only; the backend keeps no session state.
pub fn logout_payload() -> Result<String, ApiError> {
    session::clear_session(session::DEFAULT_SESSION_PATH)
        .map_err(|err| ApiError::Blocked(format!("could not clear session: {err}")))?;
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "message": "Logged out.",
    }))
    .map_err(ApiError::Serialize)
}

pub fn reward_tier_list_payload() -> Result<String, ApiError> {
    let client = BackendClient::from_env()?;
    let envelope = client.get_reward_tier_list()?;
    serde_json::to_string_pretty(&serde_json::json!({
        "status": status_str(envelope.status.is_success()),
        "message": envelope.message,
        "rewardTiers": envelope.data.unwrap_or_default(),
    }))
    .map_err(ApiError::Serialize)
}

pub fn reward_tier_info_payload(id_segment: &str) -> Result<String, ApiError> {
    let reward_tier_id: i64 = id_segment
        .parse()
        .map_err(|_| ApiError::Blocked("reward tier id must be an integer".to_string()))?;
    let client = BackendClient::from_env()?;
    let envelope = client.get_reward_tier_info(reward_tier_id)?;
    let reward_sets = envelope.data.map(|d| d.reward_sets).unwrap_or_default();
    serde_json::to_string_pretty(&serde_json::json!({
        "status": status_str(envelope.status.is_success()),
        "message": envelope.message,
        "rewardSets": reward_sets,
    }))
    .map_err(ApiError::Serialize)
}

pub fn games_payload(path: &str) -> Result<String, ApiError> {
    let page = page_request_from_query(path);
    let client = BackendClient::from_env()?;
    let envelope = client.get_all_games(&page)?;
    let page_data = envelope.data;
    serde_json::to_string_pretty(&serde_json::json!({
        "status": status_str(envelope.status.is_success()),
        "message": envelope.message,
        "games": page_data.as_ref().map(|p| p.games.clone()).unwrap_or_default(),
        "totalCount": page_data.map(|p| p.total_count).unwrap_or(0),
    }))
    .map_err(ApiError::Serialize)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateGameBody {
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    tutorial_url: String,
    #[serde(default)]
    category_ids: Vec<i64>,
}

pub fn create_game_payload(body: &str) -> Result<String, ApiError> {
    let request: CreateGameBody = serde_json::from_str(body).map_err(ApiError::Parse)?;
    if request.name.trim().is_empty() {
        return Err(ApiError::Blocked("Game name is required.".to_string()));
    }
    let client = BackendClient::from_env()?;
    let envelope = client.create_game(&CreateGameRequest {
        name: request.name,
        version: request.version,
        tutorial_url: request.tutorial_url,
        category_ids: request.category_ids,
    })?;
    remote_outcome(envelope.status.is_success(), &envelope.message)
}

pub fn game_details_payload(id_segment: &str) -> Result<String, ApiError> {
    let game_id: i64 = id_segment
        .parse()
        .map_err(|_| ApiError::Blocked("game id must be an integer".to_string()))?;
    let client = BackendClient::from_env()?;
    let envelope = client.get_game_by_id(game_id)?;
    serde_json::to_string_pretty(&serde_json::json!({
        "status": status_str(envelope.status.is_success()),
        "message": envelope.message,
        "game": envelope.data,
    }))
    .map_err(ApiError::Serialize)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateGameBody {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tutorial_url: String,
    #[serde(default)]
    category_ids: Vec<i64>,
}

pub fn update_game_payload(id_segment: &str, body: &str) -> Result<String, ApiError> {
    let game_id: i64 = id_segment
        .parse()
        .map_err(|_| ApiError::Blocked("game id must be an integer".to_string()))?;
    let request: UpdateGameBody = serde_json::from_str(body).map_err(ApiError::Parse)?;
    if request.name.trim().is_empty() {
        return Err(ApiError::Blocked("Game name is required.".to_string()));
    }
    let client = BackendClient::from_env()?;
    let envelope = client.update_game(&UpdateGameRequest {
        game_id,
        name: request.name,
        description: request.description,
        tutorial_url: request.tutorial_url,
        category_ids: request.category_ids,
    })?;
    remote_outcome(envelope.status.is_success(), &envelope.message)
}

pub fn toggle_game_payload(id_segment: &str, toggle: GameToggle) -> Result<String, ApiError> {
    let game_id: i64 = id_segment
        .parse()
        .map_err(|_| ApiError::Blocked("game id must be an integer".to_string()))?;
    let client = BackendClient::from_env()?;
    let envelope = match toggle {
        GameToggle::Live => client.toggle_game_live(game_id)?,
        GameToggle::Maintenance => client.toggle_game_maintenance(game_id)?,
    };
    remote_outcome(envelope.status.is_success(), &envelope.message)
}

#[derive(Debug, Clone, Copy)]
pub enum GameToggle {
    Live,
    Maintenance,
}

pub fn categories_payload() -> Result<String, ApiError> {
    let client = BackendClient::from_env()?;
    let (categories, message) = client.get_all_categories()?;
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "message": message,
        "categories": categories,
    }))
    .map_err(ApiError::Serialize)
}

#[derive(Debug, Deserialize)]
struct CreateCategoryBody {
    #[serde(default)]
    id: i64,
    name: String,
}

pub fn create_category_payload(body: &str) -> Result<String, ApiError> {
    let request: CreateCategoryBody = serde_json::from_str(body).map_err(ApiError::Parse)?;
    if request.name.trim().is_empty() {
        return Err(ApiError::Blocked("Category name is required.".to_string()));
    }
    let client = BackendClient::from_env()?;
    let envelope = client.create_category(request.id, request.name.trim())?;
    remote_outcome(envelope.status.is_success(), &envelope.message)
}

pub fn tournaments_payload(path: &str) -> Result<String, ApiError> {
    let game_id: i64 = query_param(path, "game")
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| ApiError::Blocked("game query parameter is required".to_string()))?;
    let client = BackendClient::from_env()?;
    let envelope = client.get_tournaments_by_game(game_id)?;
    serde_json::to_string_pretty(&serde_json::json!({
        "status": status_str(envelope.status.is_success()),
        "message": envelope.message,
        "tournaments": envelope.data.unwrap_or_default(),
    }))
    .map_err(ApiError::Serialize)
}

pub fn users_payload(path: &str) -> Result<String, ApiError> {
    let page = page_request_from_query(path);
    let client = BackendClient::from_env()?;
    let envelope = client.get_all_users(&page)?;
    let page_data = envelope.data;
    serde_json::to_string_pretty(&serde_json::json!({
        "status": status_str(envelope.status.is_success()),
        "message": envelope.message,
        "users": page_data.as_ref().map(|p| p.users.clone()).unwrap_or_default(),
        "totalCount": page_data.map(|p| p.total_count).unwrap_or(0),
    }))
    .map_err(ApiError::Serialize)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BanBody {
    user_id: String,
    banned: bool,
}

pub fn user_ban_payload(body: &str) -> Result<String, ApiError> {
    let request: BanBody = serde_json::from_str(body).map_err(ApiError::Parse)?;
    if request.user_id.trim().is_empty() {
        return Err(ApiError::Blocked("userId is required.".to_string()));
    }
    let client = BackendClient::from_env()?;
    let envelope = client.update_user_ban(request.user_id.trim(), request.banned)?;
    remote_outcome(envelope.status.is_success(), &envelope.message)
}

pub fn user_wallet_payload(path: &str) -> Result<String, ApiError> {
    let email = query_param(path, "email")
        .ok_or_else(|| ApiError::Blocked("email query parameter is required".to_string()))?;
    let client = BackendClient::from_env()?;
    let envelope = client.get_user_wallet(&email)?;
    serde_json::to_string_pretty(&serde_json::json!({
        "status": status_str(envelope.status.is_success()),
        "message": envelope.message,
        "wallet": envelope.data,
    }))
    .map_err(ApiError::Serialize)
}

pub fn user_transactions_payload(path: &str) -> Result<String, ApiError> {
    let page = token_page_request_from_query(path)?;
    let client = BackendClient::from_env()?;
    let envelope = client.get_user_lifetime_transactions(&page)?;
    let page_data = envelope.data;
    serde_json::to_string_pretty(&serde_json::json!({
        "status": status_str(envelope.status.is_success()),
        "message": envelope.message,
        "transactions": page_data.as_ref().map(|p| p.items.clone()).unwrap_or_default(),
        "nextToken": page_data.as_ref().and_then(|p| p.next_token.clone()),
        "totalCount": page_data.and_then(|p| p.total_count),
    }))
    .map_err(ApiError::Serialize)
}

pub fn user_tournaments_payload(path: &str) -> Result<String, ApiError> {
    let page = token_page_request_from_query(path)?;
    let client = BackendClient::from_env()?;
    let envelope = client.get_user_tournaments(&page)?;
    let page_data = envelope.data;
    serde_json::to_string_pretty(&serde_json::json!({
        "status": status_str(envelope.status.is_success()),
        "message": envelope.message,
        "tournaments": page_data.as_ref().map(|p| p.items.clone()).unwrap_or_default(),
        "nextToken": page_data.as_ref().and_then(|p| p.next_token.clone()),
        "totalCount": page_data.and_then(|p| p.total_count),
    }))
    .map_err(ApiError::Serialize)
}

/// Mirrors the seeding form's own guards before the backend call: a real
/// tournament id and a bot role id are required.
pub fn join_bots_payload(body: &str) -> Result<String, ApiError> {
    let request: JoinBotRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    if request.tournament_id <= 0 {
        return Err(ApiError::Blocked("Enter a valid Tournament ID.".to_string()));
    }
    if request.bot_user_role_id.trim().is_empty() {
        return Err(ApiError::Blocked("Enter Bot User Role ID.".to_string()));
    }
    let client = BackendClient::from_env()?;
    let envelope = client.join_bots(&request)?;
    remote_outcome(envelope.status.is_success(), &envelope.message)
}

fn remote_outcome(success: bool, message: &str) -> Result<String, ApiError> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": status_str(success),
        "message": message,
    }))
    .map_err(ApiError::Serialize)
}

fn status_str(success: bool) -> &'static str {
    if success {
        "ok"
    } else {
        "error"
    }
}

fn query_param(path: &str, key: &str) -> Option<String> {
    let query = path.split('?').nth(1)?;
    for pair in query.split('&') {
        let mut parts = pair.splitn(2, '=');
        if parts.next()? == key {
            return parts.next().map(str::to_string).filter(|v| !v.is_empty());
        }
    }
    None
}

fn token_page_request_from_query(path: &str) -> Result<TokenPageRequest, ApiError> {
    let email = query_param(path, "email")
        .ok_or_else(|| ApiError::Blocked("email query parameter is required".to_string()))?;
    let page_size = query_param(path, "page_size")
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let next_token = query_param(path, "token").unwrap_or_default();
    Ok(TokenPageRequest {
        email,
        page_size,
        next_token,
    })
}

fn page_request_from_query(path: &str) -> PageRequest {
    let mut page = PageRequest::default();
    if let Some(filter) = query_param(path, "filter") {
        page.filter_type = filter;
    }
    if let Some(size) = query_param(path, "page_size").and_then(|v| v.parse().ok()) {
        page.page_size = size;
    }
    if let Some(number) = query_param(path, "page").and_then(|v| v.parse().ok()) {
        page.page_number = number;
    }
    page
}
