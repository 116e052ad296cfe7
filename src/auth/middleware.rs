use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::Identity;
use crate::auth::token::TokenService;

/// Returns true for routes that never require authentication: registration,
/// login and the health check.
fn is_public_path(path: &str) -> bool {
    path.starts_with("/auth/") || path == "/actuator/health"
}

/// Request authenticator.
///
/// A stateless per-request filter: it reads the bearer token from the
/// `Authorization` header, verifies it, and on success attaches the resolved
/// username as the request's [`Identity`]. It never rejects at this layer.
/// A missing or invalid token simply leaves the request without an identity;
/// handlers that require one fail with 401 through the `Identity` extractor.
/// Public paths are passed through untouched.
pub struct Authenticator {
    tokens: TokenService,
}

impl Authenticator {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authenticator
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthenticatorService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticatorService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthenticatorService<S> {
    service: S,
    tokens: TokenService,
}

impl<S, B> Service<ServiceRequest> for AuthenticatorService<S>
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
        if is_public_path(req.path()) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        if let Some(token) = bearer {
            match self.tokens.verify(token) {
                Ok(claims) => {
                    req.extensions_mut().insert(Identity(claims.sub));
                }
                Err(e) => {
                    // Verification failures do not abort the request here; the
                    // request continues without an identity and is rejected
                    // downstream wherever identity is required.
                    log::debug!("bearer token rejected: {}", e);
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public_path("/auth/register"));
        assert!(is_public_path("/auth/login"));
        assert!(is_public_path("/actuator/health"));
        assert!(!is_public_path("/tasks"));
        assert!(!is_public_path("/tasks/42"));
        assert!(!is_public_path("/actuator/health/extra"));
    }
}
