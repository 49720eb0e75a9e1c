use crate::cache::PageCache;
use crate::handlers::respond_page;
use crate::middlewares::Admin;
use crate::models::{ActionResult, CheckInsPage};
use crate::services::CheckInService;
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use uuid::Uuid;

const CHECK_INS_ROUTE: &str = "/check-ins";
const CHECK_INS_FALLBACK: &str = "Check-ins are unavailable right now";

#[utoipa::path(
    get,
    path = "/check-ins",
    tag = "check-ins",
    security(("cookie_auth" = [])),
    responses((status = 200, description = "Check-in list and stats", body = CheckInsPage))
)]
pub async fn page(
    _admin: Admin,
    check_ins: web::Data<CheckInService>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    if let Some(body) = cache.get(CHECK_INS_ROUTE) {
        return Ok(HttpResponse::Ok().json(body));
    }

    let page = match check_ins.page(Utc::now()).await {
        Ok(page) => page,
        Err(e) => {
            log::warn!("check-ins page failed: {e}");
            CheckInsPage::unavailable(CHECK_INS_FALLBACK)
        }
    };

    respond_page(&cache, CHECK_INS_ROUTE, &page, page.notice.is_none())
}

#[utoipa::path(
    post,
    path = "/check-ins/{id}/expire",
    tag = "check-ins",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Check-in id")),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn expire(
    _admin: Admin,
    check_ins: web::Data<CheckInService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let result = match check_ins.expire(id.into_inner()).await {
        Ok(()) => {
            cache.invalidate(CHECK_INS_ROUTE);
            ActionResult::success("Check-in expired")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    delete,
    path = "/check-ins/{id}",
    tag = "check-ins",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Check-in id")),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn delete(
    _admin: Admin,
    check_ins: web::Data<CheckInService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let result = match check_ins.delete(id.into_inner()).await {
        Ok(()) => {
            cache.invalidate(CHECK_INS_ROUTE);
            ActionResult::success("Check-in deleted")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

pub fn check_in_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/check-ins")
            .route("", web::get().to(page))
            .route("/{id}/expire", web::post().to(expire))
            .route("/{id}", web::delete().to(delete)),
    );
}
