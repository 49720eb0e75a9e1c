use crate::middlewares::Admin;
use crate::models::{ActionResult, AdminActiveForm, AdminCreateForm, SettingsPage};
use crate::services::AdminService;
use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

const SETTINGS_FALLBACK: &str = "Admin list is unavailable right now";

/// Settings renders per admin (it embeds the caller's own context), so it
/// never goes through the page cache.
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    security(("cookie_auth" = [])),
    responses((status = 200, description = "Current admin and allow-list", body = SettingsPage))
)]
pub async fn page(Admin(admin): Admin, admins: web::Data<AdminService>) -> Result<HttpResponse> {
    let page = match admins.list().await {
        Ok(rows) => SettingsPage {
            admin,
            admins: rows,
            notice: None,
        },
        Err(e) => {
            log::warn!("settings page failed: {e}");
            SettingsPage::unavailable(admin, SETTINGS_FALLBACK)
        }
    };

    Ok(HttpResponse::Ok().json(page))
}

#[utoipa::path(
    post,
    path = "/settings/admins",
    tag = "settings",
    security(("cookie_auth" = [])),
    request_body(content = AdminCreateForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn create_admin(
    _admin: Admin,
    admins: web::Data<AdminService>,
    form: web::Form<AdminCreateForm>,
) -> Result<HttpResponse> {
    let result = match admins.create(form.into_inner()).await {
        Ok(_) => ActionResult::success("Admin added"),
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/settings/admins/{id}/active",
    tag = "settings",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Admin id")),
    request_body(content = AdminActiveForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn set_admin_active(
    _admin: Admin,
    admins: web::Data<AdminService>,
    id: web::Path<Uuid>,
    form: web::Form<AdminActiveForm>,
) -> Result<HttpResponse> {
    let is_active = matches!(form.is_active.trim(), "true" | "on" | "1");

    let result = match admins.set_active(id.into_inner(), is_active).await {
        Ok(()) => {
            let verb = if is_active { "enabled" } else { "disabled" };
            ActionResult::success(format!("Admin {verb}"))
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

pub fn settings_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("", web::get().to(page))
            .route("/admins", web::post().to(create_admin))
            .route("/admins/{id}/active", web::post().to(set_admin_active)),
    );
}
