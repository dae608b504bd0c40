use crate::server::api::{self, ApiError, GameToggle};
use crate::server::console;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    let route = path.split('?').next().unwrap_or(path);
    match (method, route) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: console::index_html(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/login") => respond(api::login_payload(body)),
        ("POST", "/api/logout") => respond(api::logout_payload()),
        ("POST", "/api/reward-tiers/validate") => {
            respond(api::validate_reward_tier_payload(body))
        }
        ("POST", "/api/reward-tiers") => respond(api::create_reward_tier_payload(body)),
        ("GET", "/api/reward-tiers") => respond(api::reward_tier_list_payload()),
        ("GET", route) if route.starts_with("/api/reward-tiers/") => {
            let id = route
                .trim_start_matches("/api/reward-tiers/")
                .split('/')
                .next()
                .unwrap_or("");
            respond(api::reward_tier_info_payload(id))
        }
        ("GET", "/api/games") => respond(api::games_payload(path)),
        ("POST", "/api/games") => respond(api::create_game_payload(body)),
        ("POST", route) if route.starts_with("/api/games/") && route.ends_with("/live") => {
            let id = game_id_segment(route);
            respond(api::toggle_game_payload(id, GameToggle::Live))
        }
        ("POST", route) if route.starts_with("/api/games/") && route.ends_with("/maintenance") => {
            let id = game_id_segment(route);
            respond(api::toggle_game_payload(id, GameToggle::Maintenance))
        }
        ("GET", route) if route.starts_with("/api/games/") => {
            respond(api::game_details_payload(game_id_segment(route)))
        }
        ("POST", route) if route.starts_with("/api/games/") => {
            respond(api::update_game_payload(game_id_segment(route), body))
        }
        ("GET", "/api/categories") => respond(api::categories_payload()),
        ("POST", "/api/categories") => respond(api::create_category_payload(body)),
        ("GET", "/api/tournaments") => respond(api::tournaments_payload(path)),
        ("GET", "/api/users") => respond(api::users_payload(path)),
        ("POST", "/api/users/ban") => respond(api::user_ban_payload(body)),
        ("GET", "/api/users/wallet") => respond(api::user_wallet_payload(path)),
        ("GET", "/api/users/transactions") => respond(api::user_transactions_payload(path)),
        ("GET", "/api/users/tournaments") => respond(api::user_tournaments_payload(path)),
        ("POST", "/api/bots/join") => respond(api::join_bots_payload(body)),
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn game_id_segment(route: &str) -> &str {
    route
        .trim_start_matches("/api/games/")
        .split('/')
        .next()
        .unwrap_or("")
}

fn respond(result: Result<String, ApiError>) -> HttpResponse {
    match result {
        Ok(payload) => ok_json(payload),
        Err(ApiError::Parse(err)) => error_response(
            400,
            "Bad Request",
            &format!("Invalid request body: {err}"),
        ),
        Err(ApiError::Blocked(message)) => error_response(400, "Bad Request", &message),
        Err(ApiError::FormInvalid(payload)) => HttpResponse {
            status_code: 400,
            status_text: "Bad Request",
            content_type: "application/json",
            body: payload,
        },
        Err(ApiError::Backend(err)) => match err {
            crate::backend::BackendError::NotConfigured => {
                error_response(503, "Service Unavailable", &err.to_string())
            }
            other => error_response(502, "Bad Gateway", &other.to_string()),
        },
        Err(ApiError::Serialize(err)) => {
            error_response(500, "Internal Server Error", &err.to_string())
        }
    }
}

fn ok_json(payload: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body: payload,
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
