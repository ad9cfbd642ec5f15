use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::INVALID_TOKEN_MESSAGE;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
}

/// Middleware that validates the access token and adds user info to request extensions.
///
/// The token is read from the session cookie or an `Authorization: Bearer`
/// header. Any rejection answers 401 and clears the session cookie.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = state.cookie.extract_token(&jar, req.headers()) else {
        return Err(unauthorized(&state, jar, "Missing authentication token"));
    };

    let user = match state.user_service.authenticate_token(&token).await {
        Ok(user) => user,
        Err(
            e @ (UserError::InvalidToken(_) | UserError::InvalidUserId(_) | UserError::NotFound(_)),
        ) => {
            tracing::warn!(error = %e, "Token authentication failed");
            return Err(unauthorized(&state, jar, INVALID_TOKEN_MESSAGE));
        }
        Err(e) => return Err(ApiError::from(e).into_response()),
    };

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        email: user.email.as_str().to_string(),
        name: user.name.as_str().to_string(),
    });

    Ok(next.run(req).await)
}

fn unauthorized(state: &AppState, jar: CookieJar, message: &str) -> Response {
    let jar = jar.add(state.cookie.removal_cookie());
    (jar, ApiError::Unauthorized(message.to_string())).into_response()
}
