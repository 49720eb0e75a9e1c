use crate::middlewares::MaybeIdentity;
use crate::models::{ActionResult, LoginForm, LoginResponse};
use crate::services::SessionService;
use crate::utils::{SESSION_COOKIE, SessionTokenService};
use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::http::header;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Signed in, session cookie set", body = LoginResponse),
        (status = 401, description = "Bad credentials or not an active admin")
    )
)]
pub async fn login(
    sessions: web::Data<SessionService>,
    tokens: web::Data<SessionTokenService>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();

    match sessions.authenticate(&form.email, &form.password).await {
        Ok((user_id, admin)) => {
            let token = match tokens.issue(user_id, &admin.email) {
                Ok(token) => token,
                Err(e) => return Ok(e.error_response()),
            };

            let cookie = Cookie::build(SESSION_COOKIE, token)
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .max_age(CookieDuration::seconds(tokens.ttl_seconds()))
                .finish();

            Ok(HttpResponse::Ok().cookie(cookie).json(json!({
                "success": true,
                "data": LoginResponse { admin }
            })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses((status = 200, description = "Session cookie cleared"))
)]
pub async fn logout() -> Result<HttpResponse> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ActionResult::success("Signed out")))
}

/// Public login page data. An already-active admin is redirected back to
/// the dashboard home.
pub async fn login_page(
    identity: MaybeIdentity,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse> {
    if let Some(identity) = identity.0
        && sessions.resolve(&identity).await.is_some()
    {
        return Ok(HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/"))
            .finish());
    }

    Ok(HttpResponse::Ok().json(json!({ "admin": null })))
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout)),
    );
}

pub fn login_page_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::get().to(login_page));
}
