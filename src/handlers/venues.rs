use crate::cache::PageCache;
use crate::handlers::respond_page;
use crate::middlewares::Admin;
use crate::models::{ActionResult, VenueForm, VenuesPage};
use crate::services::VenueService;
use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

const VENUES_ROUTE: &str = "/venues";
const VENUES_FALLBACK: &str = "Venues are unavailable right now";

#[utoipa::path(
    get,
    path = "/venues",
    tag = "venues",
    security(("cookie_auth" = [])),
    responses((status = 200, description = "Venue list and stats", body = VenuesPage))
)]
pub async fn page(
    _admin: Admin,
    venues: web::Data<VenueService>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    if let Some(body) = cache.get(VENUES_ROUTE) {
        return Ok(HttpResponse::Ok().json(body));
    }

    let page = match venues.page().await {
        Ok(page) => page,
        Err(e) => {
            log::warn!("venues page failed: {e}");
            VenuesPage::unavailable(VENUES_FALLBACK)
        }
    };

    respond_page(&cache, VENUES_ROUTE, &page, page.notice.is_none())
}

#[utoipa::path(
    post,
    path = "/venues",
    tag = "venues",
    security(("cookie_auth" = [])),
    request_body(content = VenueForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn create(
    _admin: Admin,
    venues: web::Data<VenueService>,
    cache: web::Data<PageCache>,
    form: web::Form<VenueForm>,
) -> Result<HttpResponse> {
    let result = match venues.create(form.into_inner()).await {
        Ok(_) => {
            cache.invalidate(VENUES_ROUTE);
            ActionResult::success("Venue created")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    put,
    path = "/venues/{id}",
    tag = "venues",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Venue id")),
    request_body(content = VenueForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn update(
    _admin: Admin,
    venues: web::Data<VenueService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
    form: web::Form<VenueForm>,
) -> Result<HttpResponse> {
    let result = match venues.update(id.into_inner(), form.into_inner()).await {
        Ok(()) => {
            cache.invalidate(VENUES_ROUTE);
            ActionResult::success("Venue updated")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    delete,
    path = "/venues/{id}",
    tag = "venues",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Venue id")),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn delete(
    _admin: Admin,
    venues: web::Data<VenueService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let result = match venues.delete(id.into_inner()).await {
        Ok(()) => {
            cache.invalidate(VENUES_ROUTE);
            ActionResult::success("Venue deleted")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

pub fn venue_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/venues")
            .route("", web::get().to(page))
            .route("", web::post().to(create))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(delete)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Backend;
    use crate::models::{ActionStatus, AdminContext};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;

    fn admin() -> Admin {
        Admin(AdminContext {
            id: Uuid::new_v4(),
            email: "ada@x.com".to_string(),
            role: "operator".to_string(),
            display_name: "Ada".to_string(),
        })
    }

    fn service_with_delete_result(rows_affected: u64) -> web::Data<VenueService> {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected,
            }])
            .into_connection();
        web::Data::new(VenueService::new(Backend::from_connection(conn)))
    }

    #[tokio::test]
    async fn test_delete_invalidates_only_the_venues_page() {
        let venues = service_with_delete_result(1);

        let cache = web::Data::new(PageCache::new());
        cache.store(VENUES_ROUTE, json!({"rows": 3}));
        cache.store("/credits", json!({"rows": 9}));

        let response = delete(admin(), venues, cache.clone(), web::Path::from(Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);

        assert!(cache.get(VENUES_ROUTE).is_none());
        assert_eq!(cache.get("/credits"), Some(json!({"rows": 9})));
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_the_cache_untouched() {
        let venues = service_with_delete_result(0);

        let cache = web::Data::new(PageCache::new());
        cache.store(VENUES_ROUTE, json!({"rows": 3}));

        let response = delete(admin(), venues, cache.clone(), web::Path::from(Uuid::new_v4()))
            .await
            .unwrap();

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let result: ActionResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.status, ActionStatus::Error);
        assert!(cache.get(VENUES_ROUTE).is_some());
    }
}
