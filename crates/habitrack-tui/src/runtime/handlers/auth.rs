use super::Services;
use crate::events::{AuthUiEvent, LoggedIn, UiEvent};

/// Logs in and stores the session.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn login(services: Services, username: String, password: String) -> UiEvent {
    let result = match services.api.login(&username, &password).await {
        Ok(response) => match services.session.store_login(&response) {
            Ok(points) => Ok(LoggedIn {
                username: response.user.username,
                points: points.points(),
            }),
            Err(e) => Err(format!("Failed to save session: {e}")),
        },
        Err(e) => {
            tracing::info!(%username, error = %e, "Login rejected");
            Err(e.message().to_string())
        }
    };
    UiEvent::Auth(AuthUiEvent::LoginFinished(result))
}

/// Creates an account. The caller logs in separately afterwards.
pub async fn signup(
    services: Services,
    username: String,
    password: String,
    confirmation: String,
) -> UiEvent {
    let result = services
        .api
        .signup(&username, &password, &confirmation)
        .await
        .map(|_| ())
        .map_err(|e| e.message().to_string());
    UiEvent::Auth(AuthUiEvent::SignUpFinished(result))
}
