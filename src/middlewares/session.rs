use crate::error::AppError;
use crate::models::{AdminContext, SessionIdentity};
use crate::services::SessionService;
use crate::utils::{SESSION_COOKIE, SessionTokenService};
use actix_web::http::Method;
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, web,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            exact_paths: vec![
                "/login",
                "/swagger-ui",
                "/swagger-ui/",
                "/api-docs/openapi.json",
                "/api/v1/auth/login",
            ],
            prefix_paths: vec!["/swagger-ui/", "/api-docs/"],
        }
    }

    fn is_public_path(&self, path: &str) -> bool {
        if self.exact_paths.contains(&path) {
            return true;
        }
        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

/// Parses and verifies the session cookie. A valid cookie puts a
/// `SessionIdentity` into request extensions; gated paths without one are
/// answered with a redirect to the login page. The allow-list lookup
/// itself happens in the `Admin` extractor, per request.
pub struct SessionMiddleware {
    tokens: SessionTokenService,
}

impl SessionMiddleware {
    pub fn new(tokens: SessionTokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service,
            tokens: self.tokens.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: S,
    tokens: SessionTokenService,
    public_paths: PublicPaths,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Let CORS preflights through untouched.
        if req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        // A valid cookie yields an identity even on public paths; the
        // login page uses it to redirect signed-in admins away.
        let identity = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| self.tokens.verify(cookie.value()).ok())
            .and_then(|claims| {
                let user_id = claims.user_id().ok()?;
                Some(SessionIdentity {
                    user_id,
                    email: claims.email,
                })
            });

        let has_identity = identity.is_some();
        if let Some(identity) = identity {
            req.extensions_mut().insert(identity);
        }

        if self.public_paths.is_public_path(req.path()) || has_identity {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let error = AppError::NotSignedIn;
        Box::pin(async move { Err(error.into()) })
    }
}

/// Extractor for handlers gated on an active allow-list admin. Resolution
/// fails closed: no identity, no allow-list row, inactive flag, or a query
/// failure all end in the login redirect.
pub struct Admin(pub AdminContext);

impl FromRequest for Admin {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<SessionIdentity>().cloned();
        let sessions = req.app_data::<web::Data<SessionService>>().cloned();

        Box::pin(async move {
            let identity = identity.ok_or(AppError::NotSignedIn)?;
            let sessions = sessions.ok_or_else(|| {
                AppError::InternalError("Session service not configured".to_string())
            })?;

            match sessions.resolve(&identity).await {
                Some(admin) => Ok(Admin(admin)),
                None => Err(AppError::NotSignedIn.into()),
            }
        })
    }
}

/// Identity extractor for routes that only need to know who (if anyone)
/// is signed in, without requiring admin status.
pub struct MaybeIdentity(pub Option<SessionIdentity>);

impl FromRequest for MaybeIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeIdentity(
            req.extensions().get::<SessionIdentity>().cloned(),
        )))
    }
}
