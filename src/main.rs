use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use nightowl_ops::{
    cache::PageCache,
    config::Config,
    database::Backend,
    handlers,
    middlewares::{SessionMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::SessionTokenService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration");

    // Missing credentials leave the handle in degraded mode rather than
    // refusing to start; pages render placeholders until it is configured.
    let backend = Backend::connect(&config.backend)
        .await
        .expect("Failed to connect to the backend");
    if backend.is_available() {
        log::info!("backend connected");
    }

    let tokens = SessionTokenService::new(&config.session.secret, config.session.ttl_seconds);

    let session_service = SessionService::new(backend.clone());
    let dashboard_service = DashboardService::new(backend.clone());
    let venue_service = VenueService::new(backend.clone());
    let profile_service = ProfileService::new(backend.clone());
    let check_in_service = CheckInService::new(backend.clone());
    let credit_service = CreditService::new(backend.clone());
    let payout_service = PayoutService::new(backend.clone());
    let conversation_service = ConversationService::new(backend.clone());
    let activity_service = ActivityService::new(backend.clone());
    let referral_service = ReferralService::new(backend.clone());
    let guide_service = GuideService::new(backend.clone());
    let admin_service = AdminService::new(backend.clone());

    let page_cache = web::Data::new(PageCache::new());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(SessionMiddleware::new(tokens.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(session_service.clone()))
            .app_data(web::Data::new(dashboard_service.clone()))
            .app_data(web::Data::new(venue_service.clone()))
            .app_data(web::Data::new(profile_service.clone()))
            .app_data(web::Data::new(check_in_service.clone()))
            .app_data(web::Data::new(credit_service.clone()))
            .app_data(web::Data::new(payout_service.clone()))
            .app_data(web::Data::new(conversation_service.clone()))
            .app_data(web::Data::new(activity_service.clone()))
            .app_data(web::Data::new(referral_service.clone()))
            .app_data(web::Data::new(guide_service.clone()))
            .app_data(web::Data::new(admin_service.clone()))
            .app_data(page_cache.clone())
            .configure(swagger_config)
            .configure(handlers::login_page_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::dashboard_config)
                    .configure(handlers::venue_config)
                    .configure(handlers::user_config)
                    .configure(handlers::check_in_config)
                    .configure(handlers::credit_config)
                    .configure(handlers::conversation_config)
                    .configure(handlers::notification_config)
                    .configure(handlers::referral_config)
                    .configure(handlers::guide_config)
                    .configure(handlers::settings_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
