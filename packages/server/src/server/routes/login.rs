use axum::{extract::Extension, Json};

use crate::domains::auth::actions::{login, IssuedToken, LoginRequest};
use crate::domains::auth::AuthError;
use crate::server::app::AppState;

/// `POST /auth/login` - log in, registering on first sight of the phone number.
///
/// Returns 200 with a bearer token, 422 on missing phone/name, 503 when the
/// profile collaborator cannot be reached during registration.
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<IssuedToken>, AuthError> {
    let issued = login(
        request,
        state.store.as_ref(),
        state.profiles.as_deref(),
        &state.tokens,
    )
    .await?;

    Ok(Json(issued))
}
