//! Resource-level permission guard.
//!
//! [`RequirePermission`] wraps an Actix resource whose path carries a
//! `{uuid}` segment. Before the wrapped handler runs (and before its body is
//! read) the guard asks the [`AuthorizationPolicy`] port whether the session
//! subject holds the required capability on that object:
//!
//! - allowed: the request continues to the handler;
//! - denied for an anonymous caller: `401 Unauthorized`;
//! - denied for an authenticated caller: `403 Forbidden`;
//! - policy failure: `500`, redacted.
//!
//! [`AuthorizationPolicy`]: crate::domain::ports::AuthorizationPolicy

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::web;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{Capability, CapabilityDomain, Error, PermissionTarget};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Path parameter holding the target object's identifier.
pub const TARGET_PARAM: &str = "uuid";

/// Middleware factory requiring `capability` on the object named by the
/// `{uuid}` path segment.
///
/// # Examples
/// ```
/// use actix_web::{HttpResponse, web};
/// use backend::domain::{Capability, CapabilityDomain};
/// use backend::inbound::http::permission::RequirePermission;
///
/// let resource = web::resource("/communities/{uuid}/logo")
///     .wrap(RequirePermission::new(CapabilityDomain::Community, Capability::Write))
///     .route(web::post().to(|| async { HttpResponse::Created().finish() }));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequirePermission {
    domain: CapabilityDomain,
    capability: Capability,
}

impl RequirePermission {
    #[must_use]
    pub const fn new(domain: CapabilityDomain, capability: Capability) -> Self {
        Self { domain, capability }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            domain: self.domain,
            capability: self.capability,
        }))
    }
}

/// Service wrapper produced by [`RequirePermission`].
pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    domain: CapabilityDomain,
    capability: Capability,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let domain = self.domain;
        let capability = self.capability;
        Box::pin(async move {
            match authorize(&req, domain, capability).await {
                Ok(()) => service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body),
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}

fn unresolved(domain: CapabilityDomain, raw: &str) -> Error {
    Error::not_found(format!(
        "The given uuid did not resolve to a {} on the server: {raw}",
        domain.noun()
    ))
}

async fn authorize(
    req: &ServiceRequest,
    domain: CapabilityDomain,
    capability: Capability,
) -> Result<(), Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state is not configured"))?;
    let raw = req
        .match_info()
        .get(TARGET_PARAM)
        .ok_or_else(|| Error::internal("permission guard mounted without a uuid segment"))?;
    let id = Uuid::parse_str(raw).map_err(|_| unresolved(domain, raw))?;
    let target = PermissionTarget::new(domain, id);
    let subject = SessionContext::new(req.get_session()).subject()?;

    let allowed = state
        .authorization
        .has_permission(&subject, &target, capability)
        .await
        .map_err(|err| Error::internal(format!("permission check failed: {err}")))?;

    if allowed {
        debug!(%subject, %target, %capability, "permission granted");
        return Ok(());
    }
    warn!(%subject, %target, %capability, "permission denied");
    if subject.is_authenticated() {
        Err(Error::forbidden(format!(
            "You do not have {capability} permission on {target}"
        )))
    } else {
        Err(Error::unauthorized("Authentication is required"))
    }
}
