use crate::cache::PageCache;
use crate::handlers::respond_page;
use crate::middlewares::Admin;
use crate::models::{ActionResult, PrivacyForm, UsersPage};
use crate::services::ProfileService;
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use uuid::Uuid;

const USERS_ROUTE: &str = "/users";
const USERS_FALLBACK: &str = "Users are unavailable right now";

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("cookie_auth" = [])),
    responses((status = 200, description = "User list and stats", body = UsersPage))
)]
pub async fn page(
    _admin: Admin,
    profiles: web::Data<ProfileService>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    if let Some(body) = cache.get(USERS_ROUTE) {
        return Ok(HttpResponse::Ok().json(body));
    }

    let page = match profiles.page(Utc::now()).await {
        Ok(page) => page,
        Err(e) => {
            log::warn!("users page failed: {e}");
            UsersPage::unavailable(USERS_FALLBACK)
        }
    };

    respond_page(&cache, USERS_ROUTE, &page, page.notice.is_none())
}

#[utoipa::path(
    post,
    path = "/users/{id}/privacy",
    tag = "users",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Profile id")),
    request_body(content = PrivacyForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn set_privacy(
    _admin: Admin,
    profiles: web::Data<ProfileService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
    form: web::Form<PrivacyForm>,
) -> Result<HttpResponse> {
    let result = match profiles.set_privacy(id.into_inner(), form.into_inner()).await {
        Ok(()) => {
            cache.invalidate(USERS_ROUTE);
            ActionResult::success("Privacy updated")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Profile id")),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn delete(
    _admin: Admin,
    profiles: web::Data<ProfileService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let result = match profiles.delete(id.into_inner()).await {
        Ok(()) => {
            cache.invalidate(USERS_ROUTE);
            ActionResult::success("User deleted")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

pub fn user_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(page))
            .route("/{id}/privacy", web::post().to(set_privacy))
            .route("/{id}", web::delete().to(delete)),
    );
}
