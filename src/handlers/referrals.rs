use crate::cache::PageCache;
use crate::handlers::respond_page;
use crate::middlewares::Admin;
use crate::models::{ActionResult, ReferralStatusForm, ReferralsPage};
use crate::services::ReferralService;
use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

const REFERRALS_ROUTE: &str = "/referrals";
const REFERRALS_FALLBACK: &str = "Referrals are unavailable right now";

#[utoipa::path(
    get,
    path = "/referrals",
    tag = "referrals",
    security(("cookie_auth" = [])),
    responses((status = 200, description = "Referral list and stats", body = ReferralsPage))
)]
pub async fn page(
    _admin: Admin,
    referrals: web::Data<ReferralService>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    if let Some(body) = cache.get(REFERRALS_ROUTE) {
        return Ok(HttpResponse::Ok().json(body));
    }

    let page = match referrals.page().await {
        Ok(page) => page,
        Err(e) => {
            log::warn!("referrals page failed: {e}");
            ReferralsPage::unavailable(REFERRALS_FALLBACK)
        }
    };

    respond_page(&cache, REFERRALS_ROUTE, &page, page.notice.is_none())
}

#[utoipa::path(
    post,
    path = "/referrals/{id}/status",
    tag = "referrals",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Referral id")),
    request_body(content = ReferralStatusForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn set_status(
    _admin: Admin,
    referrals: web::Data<ReferralService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
    form: web::Form<ReferralStatusForm>,
) -> Result<HttpResponse> {
    let result = match referrals.set_status(id.into_inner(), &form.status).await {
        Ok(status) => {
            cache.invalidate(REFERRALS_ROUTE);
            ActionResult::success(format!("Referral marked {}", status.as_str()))
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

pub fn referral_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/referrals")
            .route("", web::get().to(page))
            .route("/{id}/status", web::post().to(set_status)),
    );
}
