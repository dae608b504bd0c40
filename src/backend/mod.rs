//! Request wrappers for the remote platform backend. Every screen of the
//! console maps to one wrapper here; the backend owns the business logic and
//! these calls only move typed payloads back and forth. No retries, timeouts,
//! or cancellation: a failed call surfaces its message and leaves caller state
//! untouched so the operator can resubmit.

pub mod session;
pub mod types;

use std::fmt;

use crate::rewards::submit::RewardTierSubmission;
use types::{
    ApiEnvelope, CategoriesData, Category, CreateGameRequest, Game, GamesPage, JoinBotRequest,
    LoginData, PageRequest, RewardTierInfoData, RewardTierSummary, TokenPage, TokenPageRequest,
    TournamentSummary, UpdateGameRequest, UserTournament, UserTransaction, UserWallet, UsersPage,
};

/// Environment variable naming the backend base URL, e.g.
/// `https://platform.example.com/`.
pub const BACKEND_URL_ENV: &str = "PODIUM_BACKEND_URL";

#[derive(Debug)]
pub enum BackendError {
    /// `PODIUM_BACKEND_URL` is not set; nothing can be proxied.
    NotConfigured,
    /// Transport-level failure (DNS, refused connection, TLS, ...).
    Http(reqwest::Error),
    /// The backend answered but the envelope carried a failure status.
    Remote { message: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "{BACKEND_URL_ENV} is not set"),
            Self::Http(err) => write!(f, "{err}"),
            Self::Remote { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

pub struct BackendClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::blocking::Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Build a client from `PODIUM_BACKEND_URL` and the stored session token.
    pub fn from_env() -> Result<Self, BackendError> {
        let base_url = std::env::var(BACKEND_URL_ENV).map_err(|_| BackendError::NotConfigured)?;
        let token = session::load_session(session::DEFAULT_SESSION_PATH).map(|s| s.token);
        Ok(Self::new(base_url, token))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, String)],
    ) -> Result<ApiEnvelope<T>, BackendError> {
        let mut request = self.http.post(self.url(path)).form(fields);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request.send()?.json::<ApiEnvelope<T>>()?)
    }

    fn post_json<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>, BackendError> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request.send()?.json::<ApiEnvelope<T>>()?)
    }

    /// Log in and persist the returned bearer token for later calls.
    pub fn login(&self, email: &str, password: &str) -> Result<ApiEnvelope<LoginData>, BackendError> {
        let fields = [
            ("email", email.to_string()),
            ("password", password.to_string()),
        ];
        let envelope: ApiEnvelope<LoginData> = self.post_form("api/Auth/admin/login", &fields)?;
        if envelope.status.is_success() {
            if let Some(data) = &envelope.data {
                if let Err(err) = session::store_session(
                    session::DEFAULT_SESSION_PATH,
                    &data.token,
                    data.email.as_deref().or(Some(email)),
                ) {
                    eprintln!("warning: could not persist session: {err}");
                }
            }
        }
        Ok(envelope)
    }

    pub fn get_all_games(&self, page: &PageRequest) -> Result<ApiEnvelope<GamesPage>, BackendError> {
        let fields = [
            ("FilterType", page.filter_type.clone()),
            ("PageSize", page.page_size.to_string()),
            ("PageNumber", page.page_number.to_string()),
        ];
        self.post_form("api/Game/admin/getallgames", &fields)
    }

    pub fn create_game(
        &self,
        request: &CreateGameRequest,
    ) -> Result<ApiEnvelope<Game>, BackendError> {
        let category_ids = request
            .category_ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let fields = [
            ("Name", request.name.clone()),
            ("Version", request.version.clone()),
            ("GameTutorialURL", request.tutorial_url.clone()),
            // the backend's actual field name is misspelled; it is the contract
            ("CateoryIds", category_ids),
        ];
        self.post_form("api/Game/admin/creategame", &fields)
    }

    pub fn get_game_by_id(&self, game_id: i64) -> Result<ApiEnvelope<Game>, BackendError> {
        let fields = [("gameId", game_id.to_string())];
        self.post_form("api/Game/admin/getgamebyid", &fields)
    }

    pub fn update_game(
        &self,
        request: &UpdateGameRequest,
    ) -> Result<ApiEnvelope<Game>, BackendError> {
        let category_ids = request
            .category_ids
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let fields = [
            ("gameId", request.game_id.to_string()),
            ("Name", request.name.clone()),
            ("Description", request.description.clone()),
            ("GameTutorialURL", request.tutorial_url.clone()),
            // same misspelled field name as create; it is the contract
            ("CateoryIds", category_ids),
        ];
        self.post_form("api/Game/admin/updategame", &fields)
    }

    pub fn toggle_game_live(&self, game_id: i64) -> Result<ApiEnvelope<Game>, BackendError> {
        let fields = [("gameId", game_id.to_string())];
        self.post_form("api/Game/admin/togglegamelive", &fields)
    }

    pub fn toggle_game_maintenance(&self, game_id: i64) -> Result<ApiEnvelope<Game>, BackendError> {
        let fields = [("gameId", game_id.to_string())];
        self.post_form("api/Game/admin/togglegamemaintenance", &fields)
    }

    /// The categories list arrives nested as `data[0].activeCategory`; this
    /// wrapper flattens it for callers.
    pub fn get_all_categories(&self) -> Result<(Vec<Category>, String), BackendError> {
        let envelope: ApiEnvelope<Vec<CategoriesData>> =
            self.post_form("api/Category/admin/getallcategories", &[])?;
        if !envelope.status.is_success() {
            return Err(BackendError::Remote {
                message: envelope.message,
            });
        }
        let categories = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|d| d.active_category)
            .unwrap_or_default();
        Ok((categories, envelope.message))
    }

    pub fn create_category(&self, id: i64, name: &str) -> Result<ApiEnvelope<Category>, BackendError> {
        let fields = [("Id", id.to_string()), ("Name", name.to_string())];
        self.post_form("api/Category/admin/addcategory", &fields)
    }

    pub fn get_tournaments_by_game(
        &self,
        game_id: i64,
    ) -> Result<ApiEnvelope<Vec<TournamentSummary>>, BackendError> {
        let fields = [("gameId", game_id.to_string())];
        self.post_form("api/Tournament/admin/gettournamentsbygameid", &fields)
    }

    /// The one create call of the reward tier builder: repeated form fields,
    /// aligned by tier index, exactly once per submission.
    pub fn create_reward_tier(
        &self,
        submission: &RewardTierSubmission,
    ) -> Result<ApiEnvelope<serde_json::Value>, BackendError> {
        let fields = submission.form_fields();
        self.post_form("api/RewardTier/admin/createrewardtier", &fields)
    }

    pub fn get_reward_tier_list(
        &self,
    ) -> Result<ApiEnvelope<Vec<RewardTierSummary>>, BackendError> {
        self.post_form("api/RewardTier/admin/getrewardtierlist", &[])
    }

    pub fn get_reward_tier_info(
        &self,
        reward_tier_id: i64,
    ) -> Result<ApiEnvelope<RewardTierInfoData>, BackendError> {
        let fields = [("rewardTierId", reward_tier_id.to_string())];
        self.post_form("api/RewardTier/admin/getrewardtierinfo", &fields)
    }

    pub fn get_all_users(&self, page: &PageRequest) -> Result<ApiEnvelope<UsersPage>, BackendError> {
        let fields = [
            ("FilterType", page.filter_type.clone()),
            ("PageSize", page.page_size.to_string()),
            ("PageNumber", page.page_number.to_string()),
        ];
        self.post_form("api/User/admin/getallusers", &fields)
    }

    pub fn update_user_ban(
        &self,
        user_id: &str,
        banned: bool,
    ) -> Result<ApiEnvelope<serde_json::Value>, BackendError> {
        let fields = [
            ("UserId", user_id.to_string()),
            ("IsBanned", banned.to_string()),
        ];
        self.post_form("api/User/admin/updateuserban", &fields)
    }

    pub fn get_user_wallet(&self, email: &str) -> Result<ApiEnvelope<UserWallet>, BackendError> {
        let fields = [("email", email.to_string())];
        self.post_form("api/User/admin/getuserprofilewallet", &fields)
    }

    pub fn get_user_lifetime_transactions(
        &self,
        page: &TokenPageRequest,
    ) -> Result<ApiEnvelope<TokenPage<UserTransaction>>, BackendError> {
        let fields = [
            ("emailId", page.email.clone()),
            ("pageSize", page.page_size.to_string()),
            ("nextToken", page.next_token.clone()),
        ];
        self.post_form("api/User/admin/getuserlifetimetransactions", &fields)
    }

    pub fn get_user_tournaments(
        &self,
        page: &TokenPageRequest,
    ) -> Result<ApiEnvelope<TokenPage<UserTournament>>, BackendError> {
        let fields = [
            ("emailId", page.email.clone()),
            ("pageSize", page.page_size.to_string()),
            ("nextToken", page.next_token.clone()),
        ];
        self.post_form("api/User/admin/getusertournaments", &fields)
    }

    pub fn join_bots(
        &self,
        request: &JoinBotRequest,
    ) -> Result<ApiEnvelope<serde_json::Value>, BackendError> {
        self.post_json("api/Tournament/admin/joinbots", request)
    }
}
