use crate::cache::PageCache;
use crate::handlers::respond_page;
use crate::middlewares::Admin;
use crate::models::DashboardPage;
use crate::services::DashboardService;
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;

const HOME_ROUTE: &str = "/";
const HOME_FALLBACK: &str = "Dashboard data is unavailable right now";

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    security(("cookie_auth" = [])),
    responses(
        (status = 200, description = "Home page overview", body = DashboardPage),
        (status = 303, description = "Not signed in")
    )
)]
pub async fn overview(
    _admin: Admin,
    dashboards: web::Data<DashboardService>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    if let Some(body) = cache.get(HOME_ROUTE) {
        return Ok(HttpResponse::Ok().json(body));
    }

    let page = match dashboards.overview(Utc::now()).await {
        Ok(page) => page,
        Err(e) => {
            log::warn!("dashboard overview failed: {e}");
            DashboardPage::unavailable(HOME_FALLBACK)
        }
    };

    respond_page(&cache, HOME_ROUTE, &page, page.notice.is_none())
}

pub fn dashboard_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/dashboard").route("", web::get().to(overview)));
}
