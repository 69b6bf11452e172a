//! Authentication middleware that checks the bearer token on protected routes.

use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use crate::{
    AppState, Error,
    auth::token::{JwtKeys, decode_token},
};

/// The state needed for the auth middleware
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The keys for verifying tokens.
    pub jwt_keys: JwtKeys,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            jwt_keys: state.jwt_keys.clone(),
        }
    }
}

/// Middleware function that checks for a valid bearer token.
///
/// The user ID from the token is placed into the request and the request is
/// executed normally if the token is valid, otherwise a 401 response is
/// returned.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(
    State(state): State<AuthState>,
    authorization: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer = match authorization {
        Ok(TypedHeader(Authorization(bearer))) => bearer,
        Err(rejection) if rejection.is_missing() => return Error::MissingToken.into_response(),
        Err(rejection) => return Error::InvalidToken(rejection.to_string()).into_response(),
    };

    let claims = match decode_token(bearer.token(), &state.jwt_keys) {
        Ok(claims) => claims,
        Err(error) => {
            tracing::debug!("Rejected bearer token for {}: {error}", request.uri());
            return error.into_response();
        }
    };

    request.extensions_mut().insert(claims.sub);
    next.run(request).await
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{Extension, Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use serde_json::json;
    use time::Duration;

    use crate::{
        PasswordHash, User, UserID,
        auth::{
            middleware::{AuthState, auth_guard},
            token::{JwtKeys, create_token},
        },
    };

    async fn test_handler(Extension(user_id): Extension<UserID>) -> String {
        format!("Hello, user {user_id}!")
    }

    const TEST_PROTECTED_ROUTE: &str = "/api/protected";

    fn get_test_server() -> (TestServer, JwtKeys) {
        let jwt_keys = JwtKeys::new("nafstenoas");
        let state = AuthState {
            jwt_keys: jwt_keys.clone(),
        };

        let app = Router::new()
            .route(TEST_PROTECTED_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state);

        (TestServer::new(app), jwt_keys)
    }

    fn test_user() -> User {
        User {
            id: UserID::new(3),
            username: "budi".to_owned(),
            password_hash: PasswordHash::new_unchecked("not a real hash"),
        }
    }

    #[tokio::test]
    async fn get_protected_route_with_valid_token() {
        let (server, jwt_keys) = get_test_server();
        let token = create_token(&test_user(), Duration::minutes(5), &jwt_keys).unwrap();

        let response = server
            .get(TEST_PROTECTED_ROUTE)
            .add_header("Authorization", format!("Bearer {token}"))
            .await;

        response.assert_status_ok();
        response.assert_text("Hello, user 3!");
    }

    #[tokio::test]
    async fn get_protected_route_without_token() {
        let (server, _) = get_test_server();

        let response = server.get(TEST_PROTECTED_ROUTE).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({ "error": "missing bearer token" }));
    }

    #[tokio::test]
    async fn get_protected_route_with_foreign_token() {
        let (server, _) = get_test_server();
        let token = create_token(
            &test_user(),
            Duration::minutes(5),
            &JwtKeys::new("another secret"),
        )
        .unwrap();

        server
            .get(TEST_PROTECTED_ROUTE)
            .add_header("Authorization", format!("Bearer {token}"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_protected_route_with_wrong_scheme() {
        let (server, _) = get_test_server();

        server
            .get(TEST_PROTECTED_ROUTE)
            .add_header("Authorization", "Basic YnVkaTpodW50ZXIy")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
