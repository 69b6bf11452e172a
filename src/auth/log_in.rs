//! The log-in endpoint, which exchanges a username and password for a bearer token.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    auth::token::{JwtKeys, create_token},
    user::get_user_by_username,
};

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The keys for signing tokens.
    pub jwt_keys: JwtKeys,
    /// How long issued tokens are valid for.
    pub token_duration: Duration,
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            jwt_keys: state.jwt_keys.clone(),
            token_duration: state.token_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The credentials sent by the client.
///
/// The password is a plain string. There is no need for validation here since
/// it will be compared against the password hash in the database.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// The username entered during log-in.
    pub username: String,
    /// The password entered during log-in.
    pub password: String,
}

/// The response to a successful log-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogInResponse {
    /// The bearer token to send in the `Authorization` header.
    pub token: String,
}

/// Handler for log-in requests.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The username or password is not correct, in which case the client
///   cannot tell which of the two was wrong.
/// - An internal error occurred when verifying the password or signing the token.
pub async fn post_log_in(
    State(state): State<LoginState>,
    Json(log_in_data): Json<LogInData>,
) -> Result<Json<LogInResponse>, Error> {
    let user = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        match get_user_by_username(&log_in_data.username, &connection) {
            Ok(user) => user,
            Err(Error::NotFound) => {
                tracing::info!("Log-in attempt for unknown user {}", log_in_data.username);
                return Err(Error::InvalidCredentials);
            }
            Err(error) => return Err(error),
        }
    };

    let is_password_valid = user
        .password_hash
        .verify(&log_in_data.password)
        .map_err(|error| {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            Error::HashingError(error.to_string())
        })?;

    if !is_password_valid {
        tracing::info!("Incorrect password for user {}", user.username);
        return Err(Error::InvalidCredentials);
    }

    let token = create_token(&user, state.token_duration, &state.jwt_keys)?;

    Ok(Json(LogInResponse { token }))
}

#[cfg(test)]
mod log_in_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, http::StatusCode, routing::post};
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{
        PasswordHash, ValidatedPassword,
        auth::{
            log_in::{LogInResponse, LoginState, post_log_in},
            token::{DEFAULT_TOKEN_DURATION, JwtKeys, decode_token},
        },
        create_user, endpoints,
        test_utils::get_test_connection,
    };

    const TEST_PASSWORD: &str = "kerupukudangdiatasmejamakan";

    fn get_test_server() -> (TestServer, JwtKeys) {
        let connection = get_test_connection();
        let password_hash = PasswordHash::new(
            ValidatedPassword::new(TEST_PASSWORD, "budi").expect("Could not validate password"),
            4,
        )
        .expect("Could not hash password");
        create_user("budi", password_hash, &connection).expect("Could not create test user");
        let jwt_keys = JwtKeys::new("nafstenoas");
        let state = LoginState {
            jwt_keys: jwt_keys.clone(),
            token_duration: DEFAULT_TOKEN_DURATION,
            db_connection: Arc::new(Mutex::new(connection)),
        };
        let app = Router::new()
            .route(endpoints::LOG_IN_API, post(post_log_in))
            .with_state(state);

        (TestServer::new(app), jwt_keys)
    }

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let (server, jwt_keys) = get_test_server();

        let response = server
            .post(endpoints::LOG_IN_API)
            .json(&json!({ "username": "budi", "password": TEST_PASSWORD }))
            .await;

        response.assert_status_ok();
        let LogInResponse { token } = response.json::<LogInResponse>();
        let claims = decode_token(&token, &jwt_keys).expect("Could not decode token");
        assert_eq!(claims.username, "budi");
        assert_eq!(claims.sub.as_i64(), 1);
    }

    #[tokio::test]
    async fn log_in_fails_with_incorrect_password() {
        let (server, _) = get_test_server();

        let response = server
            .post(endpoints::LOG_IN_API)
            .json(&json!({ "username": "budi", "password": "wrongpassword" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({ "error": "invalid username or password" }));
    }

    #[tokio::test]
    async fn log_in_fails_with_unknown_user() {
        let (server, _) = get_test_server();

        let response = server
            .post(endpoints::LOG_IN_API)
            .json(&json!({ "username": "siti", "password": TEST_PASSWORD }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({ "error": "invalid username or password" }));
    }

    #[tokio::test]
    async fn log_in_fails_with_missing_credentials() {
        let (server, _) = get_test_server();

        server
            .post(endpoints::LOG_IN_API)
            .json(&json!({ "username": "budi" }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
