//! Sign-in, sign-up and sign-out flows.
//!
//! These run outside of any view so the page components only deal with
//! input signals and rendering. A flow either succeeds with the new
//! credentials and the route to go to, or fails with the exact text to show.

use crate::api::types::{AuthResponse, LoginRequest, SignupRequest, User};
use crate::api::{ApiClient, HttpTransport};
use crate::error::AppError;
use crate::routes;
use crate::storage::{CredentialStore, KeyValueStore};

pub const MIN_PASSWORD_LEN: usize = 6;

pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const SIGNUP_FAILED: &str = "Could not create your account. Please try again.";

/// Result of a successful login or signup.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub token: String,
    pub user: User,
    pub redirect: &'static str,
}

pub fn validate_login(request: &LoginRequest) -> Result<(), AppError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "Please enter your email and password".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_signup(request: &SignupRequest) -> Result<(), AppError> {
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(AppError::Validation(
            "First and last name are required".to_string(),
        ));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(PASSWORD_TOO_SHORT.to_string()));
    }
    Ok(())
}

pub async fn login<T, S>(
    client: &ApiClient<T>,
    credentials: &CredentialStore<S>,
    request: &LoginRequest,
) -> Result<AuthOutcome, String>
where
    T: HttpTransport,
    S: KeyValueStore,
{
    validate_login(request).map_err(|e| e.user_message(LOGIN_FAILED))?;

    let request = LoginRequest {
        email: request.email.trim().to_string(),
        password: request.password.clone(),
    };
    let auth = client
        .login(&request)
        .await
        .map_err(|e| e.user_message(LOGIN_FAILED))?;

    complete(credentials, auth, LOGIN_FAILED)
}

pub async fn signup<T, S>(
    client: &ApiClient<T>,
    credentials: &CredentialStore<S>,
    request: &SignupRequest,
) -> Result<AuthOutcome, String>
where
    T: HttpTransport,
    S: KeyValueStore,
{
    validate_signup(request).map_err(|e| e.user_message(SIGNUP_FAILED))?;

    let request = SignupRequest {
        email: request.email.trim().to_string(),
        password: request.password.clone(),
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        phone: request.phone.trim().to_string(),
    };
    let auth = client
        .signup(&request)
        .await
        .map_err(|e| e.user_message(SIGNUP_FAILED))?;

    complete(credentials, auth, SIGNUP_FAILED)
}

/// Forget the stored credentials. Returns the route to land on.
pub fn logout<S: KeyValueStore>(credentials: &CredentialStore<S>) -> &'static str {
    if let Err(e) = credentials.clear() {
        log::warn!("Failed to clear credentials: {}", e);
    }
    routes::LOGIN
}

fn complete<S: KeyValueStore>(
    credentials: &CredentialStore<S>,
    auth: AuthResponse,
    fallback: &str,
) -> Result<AuthOutcome, String> {
    if auth.token.trim().is_empty() {
        log::warn!("Auth response carried an empty token");
        return Err(fallback.to_string());
    }
    credentials.save(&auth).map_err(|e| {
        log::warn!("Failed to persist credentials: {}", e);
        fallback.to_string()
    })?;
    log::info!("Signed in as {}", auth.user.email);

    Ok(AuthOutcome {
        token: auth.token,
        user: auth.user,
        redirect: routes::DASHBOARD,
    })
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;
    use crate::api::mock::MockTransport;
    use crate::config::{TOKEN_KEY, USER_KEY};
    use crate::error::CONNECTION_ERROR;
    use crate::storage::memory::MemoryStorage;

    fn setup() -> (ApiClient<MockTransport>, CredentialStore<MemoryStorage>) {
        (
            ApiClient::new(MockTransport::new(), ""),
            CredentialStore::new(MemoryStorage::new()),
        )
    }

    fn signup_request(password: &str) -> SignupRequest {
        SignupRequest {
            email: "ana@example.com".to_string(),
            password: password.to_string(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            phone: "+1 555 0100".to_string(),
        }
    }

    fn login_request() -> LoginRequest {
        LoginRequest {
            email: " ana@example.com ".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_short_password_blocks_signup_without_network() {
        let (client, creds) = setup();

        let err = block_on(signup(&client, &creds, &signup_request("12345"))).unwrap_err();

        assert_eq!(err, PASSWORD_TOO_SHORT);
        assert!(client.transport().requests().is_empty());
        assert_eq!(creds.inner().writes(), 0);
    }

    #[test]
    fn test_password_length_counts_characters() {
        assert!(validate_signup(&signup_request("ñandú!")).is_ok());
        assert!(validate_signup(&signup_request("ñandú")).is_err());
    }

    #[test]
    fn test_signup_requires_names() {
        let mut req = signup_request("secret1");
        req.last_name = " ".to_string();
        assert!(matches!(validate_signup(&req), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_login_success_stores_credentials_and_redirects() {
        let (client, creds) = setup();
        client.transport().push_json(
            200,
            json!({"token": "jwt-123", "user": {"id": 1, "email": "ana@example.com", "first_name": "Ana"}}),
        );

        let outcome = block_on(login(&client, &creds, &login_request())).unwrap();

        assert_eq!(outcome.redirect, routes::DASHBOARD);
        assert_eq!(outcome.token, "jwt-123");
        assert_eq!(creds.inner().get_item(TOKEN_KEY).unwrap().as_deref(), Some("jwt-123"));
        let user: serde_json::Value =
            serde_json::from_str(&creds.inner().get_item(USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(user["email"], "ana@example.com");
        assert_eq!(user["id"], 1);

        // Email is trimmed before it goes out.
        let body = client.transport().requests()[0].body.clone().unwrap();
        assert!(body.contains(r#""email":"ana@example.com""#));
    }

    #[test]
    fn test_login_failure_shows_detail_and_writes_nothing() {
        let (client, creds) = setup();
        client
            .transport()
            .push_json(401, json!({"detail": "Incorrect email or password"}));

        let err = block_on(login(&client, &creds, &login_request())).unwrap_err();

        assert_eq!(err, "Incorrect email or password");
        assert_eq!(creds.inner().writes(), 0);
        assert!(!creds.is_authenticated());
    }

    #[test]
    fn test_login_network_failure_is_generic() {
        let (client, creds) = setup();
        client
            .transport()
            .push_error(AppError::Network("TypeError: Failed to fetch".to_string()));

        let err = block_on(login(&client, &creds, &login_request())).unwrap_err();
        assert_eq!(err, CONNECTION_ERROR);
    }

    #[test]
    fn test_login_requires_fields() {
        let (client, creds) = setup();
        let req = LoginRequest {
            email: "".to_string(),
            password: "x".to_string(),
        };
        let err = block_on(login(&client, &creds, &req)).unwrap_err();
        assert_eq!(err, "Please enter your email and password");
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn test_signup_success() {
        let (client, creds) = setup();
        client
            .transport()
            .push_json(201, json!({"token": "new-tok", "user": {"email": "ana@example.com"}}));

        let outcome = block_on(signup(&client, &creds, &signup_request("secret1"))).unwrap();

        assert_eq!(outcome.redirect, routes::DASHBOARD);
        assert_eq!(creds.token().as_deref(), Some("new-tok"));
        let sent = client.transport().requests();
        assert_eq!(sent[0].url, "/api/auth/signup");
        let body: serde_json::Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["first_name"], "Ana");
        assert_eq!(body["phone"], "+1 555 0100");
    }

    #[test]
    fn test_signup_server_error_verbatim() {
        let (client, creds) = setup();
        client
            .transport()
            .push_json(400, json!({"detail": "Email already registered"}));

        let err = block_on(signup(&client, &creds, &signup_request("secret1"))).unwrap_err();
        assert_eq!(err, "Email already registered");
        assert_eq!(creds.inner().writes(), 0);
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let (client, creds) = setup();
        client
            .transport()
            .push_json(200, json!({"token": "", "user": {"email": "ana@example.com"}}));

        let err = block_on(login(&client, &creds, &login_request())).unwrap_err();
        assert_eq!(err, LOGIN_FAILED);
        assert_eq!(creds.inner().writes(), 0);
    }

    #[test]
    fn test_logout_clears_and_redirects_to_login() {
        let creds = CredentialStore::new(MemoryStorage::new());
        creds
            .save(&AuthResponse {
                token: "t".to_string(),
                user: User::default(),
            })
            .unwrap();

        assert_eq!(logout(&creds), routes::LOGIN);
        assert!(!creds.is_authenticated());
        assert!(creds.user().is_none());
    }
}
