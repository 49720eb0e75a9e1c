use crate::cache::PageCache;
use crate::handlers::respond_page;
use crate::middlewares::Admin;
use crate::models::{ActionResult, CreditAdjustmentForm, CreditsPage, PayoutForm, PayoutStatusForm};
use crate::services::{CreditService, PayoutService};
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use uuid::Uuid;

const CREDITS_ROUTE: &str = "/credits";
const CREDITS_FALLBACK: &str = "Credit data is unavailable right now";

/// The credits page also carries the recent payout queue, so payout
/// mutations invalidate this route rather than one of their own.
#[utoipa::path(
    get,
    path = "/credits",
    tag = "credits",
    security(("cookie_auth" = [])),
    responses((status = 200, description = "Credit economy overview", body = CreditsPage))
)]
pub async fn page(
    _admin: Admin,
    credits: web::Data<CreditService>,
    payouts: web::Data<PayoutService>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    if let Some(body) = cache.get(CREDITS_ROUTE) {
        return Ok(HttpResponse::Ok().json(body));
    }

    let now = Utc::now();
    let page = match credits.page(now).await {
        Ok((stats, packages, transactions)) => {
            let payouts = match payouts.recent().await {
                Ok(payouts) => payouts,
                Err(e) => {
                    log::warn!("payout list failed: {e}");
                    return respond_page(
                        &cache,
                        CREDITS_ROUTE,
                        &CreditsPage::unavailable(CREDITS_FALLBACK),
                        false,
                    );
                }
            };
            CreditsPage {
                stats,
                packages,
                transactions,
                payouts,
                notice: None,
            }
        }
        Err(e) => {
            log::warn!("credits page failed: {e}");
            CreditsPage::unavailable(CREDITS_FALLBACK)
        }
    };

    respond_page(&cache, CREDITS_ROUTE, &page, page.notice.is_none())
}

#[utoipa::path(
    post,
    path = "/credits",
    tag = "credits",
    security(("cookie_auth" = [])),
    request_body(content = CreditAdjustmentForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn adjust(
    _admin: Admin,
    credits: web::Data<CreditService>,
    cache: web::Data<PageCache>,
    form: web::Form<CreditAdjustmentForm>,
) -> Result<HttpResponse> {
    let result = match credits.record_adjustment(form.into_inner()).await {
        Ok(_) => {
            cache.invalidate(CREDITS_ROUTE);
            ActionResult::success("Adjustment recorded")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    delete,
    path = "/credits/{id}",
    tag = "credits",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Transaction id")),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn delete_transaction(
    _admin: Admin,
    credits: web::Data<CreditService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let result = match credits.delete_transaction(id.into_inner()).await {
        Ok(()) => {
            cache.invalidate(CREDITS_ROUTE);
            ActionResult::success("Transaction deleted")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/credits/payouts",
    tag = "credits",
    security(("cookie_auth" = [])),
    request_body(content = PayoutForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn create_payout(
    _admin: Admin,
    payouts: web::Data<PayoutService>,
    cache: web::Data<PageCache>,
    form: web::Form<PayoutForm>,
) -> Result<HttpResponse> {
    let result = match payouts.create(form.into_inner()).await {
        Ok(_) => {
            cache.invalidate(CREDITS_ROUTE);
            ActionResult::success("Payout queued")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    post,
    path = "/credits/payouts/{id}/status",
    tag = "credits",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Payout id")),
    request_body(content = PayoutStatusForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn set_payout_status(
    _admin: Admin,
    payouts: web::Data<PayoutService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
    form: web::Form<PayoutStatusForm>,
) -> Result<HttpResponse> {
    let result = match payouts.set_status(id.into_inner(), &form.status).await {
        Ok(status) => {
            cache.invalidate(CREDITS_ROUTE);
            ActionResult::success(format!("Payout marked {}", status.as_str()))
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

pub fn credit_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/credits")
            .route("", web::get().to(page))
            .route("", web::post().to(adjust))
            .route("/payouts", web::post().to(create_payout))
            .route("/payouts/{id}/status", web::post().to(set_payout_status))
            .route("/{id}", web::delete().to(delete_transaction)),
    );
}
