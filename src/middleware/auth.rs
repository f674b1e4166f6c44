use axum::{response::{Response, IntoResponse}};
use axum::http::StatusCode;
use axum::middleware::Next;
use crate::auth::jwt::verify_token;
use crate::auth::ADMIN_ROLE;
use crate::error::AppError;
use serde::Serialize;

/// Authenticated identity attached to the request by `require_auth` and
/// consumed by handlers as an explicit `Extension` parameter.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub user_id: String,
    pub role: String,
    pub username: String,
}

impl AuthContext {
    /// Product mutations are restricted to the administrative role.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role != ADMIN_ROLE {
            return Err(AppError::Unauthorized);
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ErrorBody { error: String, code: &'static str }

use axum::http::Request;

pub async fn require_auth(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let auth_header = match req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok()) {
        Some(h) => h,
        None => return unauthorized("No autorizado"),
    };

    // Expect "Bearer <token>"
    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return unauthorized("No autorizado"),
    };

    let secret = match std::env::var("JWT_SECRET") {
        Ok(s) => s,
        Err(_) => return unauthorized("Server auth misconfiguration"),
    };

    let claims = match verify_token(token, &secret) {
        Ok(c) => c,
        Err(_) => return unauthorized("No autorizado"),
    };

    // Attach context
    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        role: claims.role,
        username: claims.username,
    });

    next.run(req).await
}

fn unauthorized(msg: &str) -> Response {
    let body = axum::Json(ErrorBody { error: msg.to_string(), code: "unauthorized" });
    (StatusCode::UNAUTHORIZED, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: &str) -> AuthContext {
        AuthContext {
            user_id: "u-1".to_string(),
            role: role.to_string(),
            username: "alice".to_string(),
        }
    }

    #[test]
    fn admin_role_passes() {
        assert!(ctx("ADMIN").require_admin().is_ok());
    }

    #[test]
    fn other_roles_are_rejected() {
        assert!(ctx("USER").require_admin().is_err());
        assert!(ctx("admin").require_admin().is_err());
        assert!(ctx("").require_admin().is_err());
    }
}
