use crate::cache::PageCache;
use crate::error::AppError;
use actix_web::{HttpResponse, Result};

pub mod auth;
pub mod check_ins;
pub mod conversations;
pub mod credits;
pub mod dashboard;
pub mod guides;
pub mod notifications;
pub mod referrals;
pub mod settings;
pub mod users;
pub mod venues;

pub use auth::{auth_config, login_page_config};
pub use check_ins::check_in_config;
pub use conversations::conversation_config;
pub use credits::credit_config;
pub use dashboard::dashboard_config;
pub use guides::guide_config;
pub use notifications::notification_config;
pub use referrals::referral_config;
pub use settings::settings_config;
pub use users::user_config;
pub use venues::venue_config;

/// Serialize a page payload, cache it under its dashboard route when the
/// render is clean, and send it. Fallback renders are never cached so the
/// next request retries the queries.
pub(crate) fn respond_page<T: serde::Serialize>(
    cache: &PageCache,
    route: &str,
    page: &T,
    cache_it: bool,
) -> Result<HttpResponse> {
    let body = serde_json::to_value(page).map_err(AppError::from)?;
    if cache_it {
        cache.store(route, body.clone());
    }
    Ok(HttpResponse::Ok().json(body))
}
