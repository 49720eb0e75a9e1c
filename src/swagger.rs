use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;
use crate::utils::SESSION_COOKIE;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "cookie_auth",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::logout,
        handlers::dashboard::overview,
        handlers::venues::page,
        handlers::venues::create,
        handlers::venues::update,
        handlers::venues::delete,
        handlers::users::page,
        handlers::users::set_privacy,
        handlers::users::delete,
        handlers::check_ins::page,
        handlers::check_ins::expire,
        handlers::check_ins::delete,
        handlers::credits::page,
        handlers::credits::adjust,
        handlers::credits::delete_transaction,
        handlers::credits::create_payout,
        handlers::credits::set_payout_status,
        handlers::conversations::page,
        handlers::conversations::delete,
        handlers::notifications::page,
        handlers::notifications::create,
        handlers::notifications::delete,
        handlers::referrals::page,
        handlers::referrals::set_status,
        handlers::guides::page,
        handlers::guides::create,
        handlers::guides::update,
        handlers::guides::delete,
        handlers::settings::page,
        handlers::settings::create_admin,
        handlers::settings::set_admin_active,
    ),
    components(
        schemas(
            ActionStatus,
            ActionResult,
            AdminContext,
            LoginForm,
            LoginResponse,
            AdminRow,
            SettingsPage,
            AdminCreateForm,
            AdminActiveForm,
            DashboardStats,
            AlertEntry,
            UpcomingVenue,
            DashboardPage,
            VenueRow,
            VenueStats,
            VenuesPage,
            VenueForm,
            UserRow,
            UserStats,
            UsersPage,
            PrivacyForm,
            CheckInRow,
            CheckInStats,
            CheckInsPage,
            CreditRow,
            PackageBucket,
            CreditStats,
            CreditsPage,
            CreditAdjustmentForm,
            ConversationRow,
            ConversationStats,
            ConversationsPage,
            ActivityRow,
            SegmentBucket,
            ActivityStats,
            NotificationsPage,
            ActivityForm,
            ReferralStatus,
            ReferralRow,
            ReferralStats,
            ReferralsPage,
            ReferralStatusForm,
            PayoutStatus,
            PayoutRow,
            PayoutForm,
            PayoutStatusForm,
            GuideRow,
            GuideStats,
            GuidesPage,
            GuideForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Sign in and out of the dashboard"),
        (name = "dashboard", description = "Home page overview"),
        (name = "venues", description = "Venue management"),
        (name = "users", description = "User management"),
        (name = "check-ins", description = "Check-in moderation"),
        (name = "credits", description = "Credit economy and payouts"),
        (name = "conversations", description = "Conversation moderation"),
        (name = "notifications", description = "Activity feed management"),
        (name = "referrals", description = "Referral pipeline"),
        (name = "guides", description = "In-app guide content"),
        (name = "settings", description = "Admin allow-list"),
    ),
    info(
        title = "NightOwl Ops API",
        version = "1.0.0",
        description = "Operations dashboard REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
