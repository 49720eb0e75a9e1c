use crate::cache::PageCache;
use crate::handlers::respond_page;
use crate::middlewares::Admin;
use crate::models::{ActionResult, ActivityForm, NotificationsPage};
use crate::services::ActivityService;
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use uuid::Uuid;

const NOTIFICATIONS_ROUTE: &str = "/notifications";
const NOTIFICATIONS_FALLBACK: &str = "Activity feed is unavailable right now";

#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    security(("cookie_auth" = [])),
    responses((status = 200, description = "Activity feed and segment stats", body = NotificationsPage))
)]
pub async fn page(
    _admin: Admin,
    activities: web::Data<ActivityService>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    if let Some(body) = cache.get(NOTIFICATIONS_ROUTE) {
        return Ok(HttpResponse::Ok().json(body));
    }

    let page = match activities.page(Utc::now()).await {
        Ok(page) => page,
        Err(e) => {
            log::warn!("notifications page failed: {e}");
            NotificationsPage::unavailable(NOTIFICATIONS_FALLBACK)
        }
    };

    respond_page(&cache, NOTIFICATIONS_ROUTE, &page, page.notice.is_none())
}

#[utoipa::path(
    post,
    path = "/notifications",
    tag = "notifications",
    security(("cookie_auth" = [])),
    request_body(content = ActivityForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn create(
    _admin: Admin,
    activities: web::Data<ActivityService>,
    cache: web::Data<PageCache>,
    form: web::Form<ActivityForm>,
) -> Result<HttpResponse> {
    let result = match activities.create(form.into_inner()).await {
        Ok(_) => {
            cache.invalidate(NOTIFICATIONS_ROUTE);
            ActionResult::success("Activity posted")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    tag = "notifications",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Activity id")),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn delete(
    _admin: Admin,
    activities: web::Data<ActivityService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let result = match activities.delete(id.into_inner()).await {
        Ok(()) => {
            cache.invalidate(NOTIFICATIONS_ROUTE);
            ActionResult::success("Activity deleted")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

pub fn notification_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications")
            .route("", web::get().to(page))
            .route("", web::post().to(create))
            .route("/{id}", web::delete().to(delete)),
    );
}
