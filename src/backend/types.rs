//! Wire shapes of the remote platform backend. The backend owns all business
//! logic; these types only mirror what its endpoints accept and return.

use serde::{Deserialize, Serialize};

/// Every backend response wraps its payload in the same envelope. `status` is
/// a boolean on most endpoints but a string on a few older ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub status: StatusFlag,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusFlag {
    Bool(bool),
    Text(String),
}

impl StatusFlag {
    pub fn is_success(&self) -> bool {
        match self {
            Self::Bool(flag) => *flag,
            Self::Text(text) => {
                text.eq_ignore_ascii_case("true")
                    || text.eq_ignore_ascii_case("success")
                    || text.eq_ignore_ascii_case("ok")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Paging parameters shared by the list endpoints. Pages are 1-indexed on the
/// backend side.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub filter_type: String,
    pub page_size: u32,
    pub page_number: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            filter_type: "lifetime".to_string(),
            page_size: 10,
            page_number: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "gameTutorialURL")]
    pub tutorial_url: Option<String>,
    #[serde(default)]
    pub category_names: Vec<String>,
    #[serde(default)]
    pub is_live: Option<bool>,
    #[serde(default)]
    pub is_under_maintenance: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamesPage {
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub total_count: u64,
}

#[derive(Debug, Clone)]
pub struct CreateGameRequest {
    pub name: String,
    pub version: String,
    pub tutorial_url: String,
    pub category_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct UpdateGameRequest {
    pub game_id: i64,
    pub name: String,
    pub description: String,
    pub tutorial_url: String,
    pub category_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// The categories endpoint nests its list one level down: the envelope's data
/// is an array whose first element carries `activeCategory`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesData {
    #[serde(default)]
    pub active_category: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_players: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardTierSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardTierInfoData {
    #[serde(default)]
    pub reward_sets: Vec<RewardSet>,
}

/// One stored tier row of a reward tier breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardSet {
    pub id: i64,
    pub label: String,
    pub start_rank: i64,
    pub end_rank: i64,
    pub amount_per_user: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub is_banned: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    #[serde(default)]
    pub users: Vec<UserSummary>,
    #[serde(default)]
    pub total_count: u64,
}

/// Token-paged request the per-user history endpoints take: an empty token
/// asks for the first page, the previous response's `nextToken` for the next.
#[derive(Debug, Clone)]
pub struct TokenPageRequest {
    pub email: String,
    pub page_size: u32,
    pub next_token: String,
}

/// Token-paged response body; `next_token` is absent or empty on the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct TokenPage<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_token: Option<String>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTransaction {
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: f64,
    /// Epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTournament {
    pub tournament_id: String,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub entries_count: u32,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub cash_earned: f64,
    #[serde(default)]
    pub is_joined: bool,
    #[serde(default)]
    pub is_played: bool,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWallet {
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub deposit_balance: Option<f64>,
    #[serde(default)]
    pub winning_balance: Option<f64>,
    #[serde(default)]
    pub bonus_balance: Option<f64>,
}

/// Bot seeding request. Unlike the form-encoded endpoints, the backend takes
/// this one as a JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinBotRequest {
    pub tournament_id: i64,
    pub bot_user_role_id: String,
    pub auto_populate_remaining: bool,
    pub rank_configs: Vec<RankConfig>,
}

/// One rank group of the bot seeding form. Manual groups pin every attempt's
/// score via `scores_per_attempt`; random groups draw from the min/max bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankConfig {
    pub total_user: u32,
    pub manual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_attempt: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores_per_attempt: Option<Vec<f64>>,
    pub min_score: f64,
    pub max_score: f64,
    pub min_attempts: u32,
    pub max_attempts: u32,
}
