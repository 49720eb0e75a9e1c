use crate::cache::PageCache;
use crate::handlers::respond_page;
use crate::middlewares::Admin;
use crate::models::{ActionResult, ConversationsPage};
use crate::services::ConversationService;
use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use uuid::Uuid;

const CONVERSATIONS_ROUTE: &str = "/conversations";
const CONVERSATIONS_FALLBACK: &str = "Conversations are unavailable right now";

#[utoipa::path(
    get,
    path = "/conversations",
    tag = "conversations",
    security(("cookie_auth" = [])),
    responses((status = 200, description = "Recent conversations and stats", body = ConversationsPage))
)]
pub async fn page(
    _admin: Admin,
    conversations: web::Data<ConversationService>,
    cache: web::Data<PageCache>,
) -> Result<HttpResponse> {
    if let Some(body) = cache.get(CONVERSATIONS_ROUTE) {
        return Ok(HttpResponse::Ok().json(body));
    }

    let page = match conversations.page(Utc::now()).await {
        Ok(page) => page,
        Err(e) => {
            log::warn!("conversations page failed: {e}");
            ConversationsPage::unavailable(CONVERSATIONS_FALLBACK)
        }
    };

    respond_page(&cache, CONVERSATIONS_ROUTE, &page, page.notice.is_none())
}

#[utoipa::path(
    delete,
    path = "/conversations/{id}",
    tag = "conversations",
    security(("cookie_auth" = [])),
    params(("id" = Uuid, Path, description = "Conversation id")),
    responses((status = 200, description = "Tagged result", body = ActionResult))
)]
pub async fn delete(
    _admin: Admin,
    conversations: web::Data<ConversationService>,
    cache: web::Data<PageCache>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let result = match conversations.delete(id.into_inner()).await {
        Ok(()) => {
            cache.invalidate(CONVERSATIONS_ROUTE);
            ActionResult::success("Conversation deleted")
        }
        Err(e) => ActionResult::error(e.form_message()),
    };
    Ok(HttpResponse::Ok().json(result))
}

pub fn conversation_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/conversations")
            .route("", web::get().to(page))
            .route("/{id}", web::delete().to(delete)),
    );
}
