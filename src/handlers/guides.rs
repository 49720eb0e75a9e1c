use crate::cache::PageCache;
use crate::handlers::respond_page;
use crate::middlewares::Admin;
use crate::models::{ActionResult, GuideForm, GuidesPage};
use crate::services::GuideService;
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use uuid::Uuid;

const GUIDES_ROUTE: &str = "/guides";
const GUIDES_FALLBACK: &str = "Guides are unavailable right now";

#[utoipa::path(
    get,
    path = "/guides",
    tag = "guides",
    security(("cookie_auth" = [])),
    responses((status = 200, description = "Guide list and stats", body = GuidesPage))
)]
pub async fn page(
    _admin: Admin,
    guides: web::Data<GuideService>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    if let Some(body) = cache.get(GUIDES_ROUTE) {
        return Ok(HttpResponse::Ok().json(body));
    }

    let page = match guides.page(Utc::now()).await {
        Ok(page) => page,
        Err(e) => {
            log::warn!("guides page failed: {e}");
            GuidesPage::unavailable(GUIDES_FALLBACK)
        }
    };

    respond_page(&cache, GUIDES_ROUTE, &page, page.notice.is_none())
}

#[utoipa::path(
    post,
    path = "/guides",
    tag = "guides",
    security(("cookie_auth" = [])),
    request_body(content = GuideForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn create(
    _admin: Admin,
    guides: web::Data<GuideService>,
    cache: web::Data<PageCache>,
    form: web::Form<GuideForm>,
) -> Result<HttpResponse> {
    let result = match guides.create(form.into_inner()).await {
        Ok(_) => {
            cache.invalidate(GUIDES_ROUTE);
            ActionResult::success("Guide created")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    put,
    path = "/guides/{id}",
    tag = "guides",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Guide id")),
    request_body(content = GuideForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn update(
    _admin: Admin,
    guides: web::Data<GuideService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
    form: web::Form<GuideForm>,
) -> Result<HttpResponse> {
    let result = match guides.update(id.into_inner(), form.into_inner()).await {
        Ok(()) => {
            cache.invalidate(GUIDES_ROUTE);
            ActionResult::success("Guide updated")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    delete,
    path = "/guides/{id}",
    tag = "guides",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Guide id")),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn delete(
    _admin: Admin,
    guides: web::Data<GuideService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let result = match guides.delete(id.into_inner()).await {
        Ok(()) => {
            cache.invalidate(GUIDES_ROUTE);
            ActionResult::success("Guide deleted")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

pub fn guide_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/guides")
            .route("", web::get().to(page))
            .route("", web::post().to(create))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(delete)),
    );
}
