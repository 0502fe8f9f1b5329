//! Google `OAuth2` provider implementation.
//!
//! This module provides the installed-app Authorization Code flow and the
//! refresh token flow against Google's token endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use formquiz_application::ports::AuthorizationServer;
use formquiz_application::{AuthEvent, token_preview};
use formquiz_domain::{AuthError, ClientSecrets, Credential, OAuth2Token};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Deserialize;
use tracing::{debug, info};

use super::callback::CallbackListener;

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Length of the random `state` parameter.
const STATE_LENGTH: usize = 32;

/// `OAuth2` token response from token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl TokenResponse {
    fn into_token(self, requested_scopes: &[String]) -> OAuth2Token {
        let scopes = self.scope.map_or_else(
            || requested_scopes.to_vec(),
            |s| s.split_whitespace().map(String::from).collect(),
        );

        OAuth2Token::new(
            self.access_token,
            self.token_type,
            self.expires_in,
            self.refresh_token,
            scopes,
        )
    }
}

/// `OAuth2` error response.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Extracts a readable message from a failed token response body.
fn token_error_message(body: &str) -> String {
    serde_json::from_str::<TokenErrorResponse>(body).map_or_else(
        |_| format!("token request failed: {body}"),
        |e| match e.error_description {
            Some(description) => format!("{}: {description}", e.error),
            None => e.error,
        },
    )
}

fn random_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// Builds the URL the user opens to grant access.
///
/// # Errors
///
/// Returns `AuthError::InvalidConfiguration` if `auth_uri` is not a URL.
pub fn authorization_url(
    secrets: &ClientSecrets,
    redirect_uri: &str,
    scopes: &[String],
    state: &str,
) -> Result<String, AuthError> {
    let scope = scopes.join(" ");
    let url = url::Url::parse_with_params(
        &secrets.auth_uri,
        &[
            ("response_type", "code"),
            ("client_id", secrets.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("scope", scope.as_str()),
            ("state", state),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
    .map_err(|e| AuthError::InvalidConfiguration {
        message: format!("invalid auth_uri '{}': {e}", secrets.auth_uri),
    })?;

    Ok(url.into())
}

type Notifier = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

/// Google `OAuth2` provider.
///
/// Runs the Authorization Code flow with a loopback redirect and
/// refreshes expired tokens.
pub struct GoogleOAuth2Provider {
    http_client: reqwest::Client,
    /// Callback server port for Authorization Code flow.
    callback_port: u16,
    notifier: Notifier,
}

impl GoogleOAuth2Provider {
    /// Create a new `OAuth2` provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            callback_port: 8080,
            notifier: Arc::new(|event: &AuthEvent| info!("{}", event.message())),
        }
    }

    /// Set the callback port for Authorization Code flow.
    #[must_use]
    pub const fn with_callback_port(mut self, port: u16) -> Self {
        self.callback_port = port;
        self
    }

    /// Set the function told about flow progress, such as the URL the
    /// user has to open.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Fn(&AuthEvent) + Send + Sync + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// POSTs a form to the token endpoint.
    async fn token_request(
        &self,
        token_url: &str,
        params: &[(&str, &str)],
    ) -> Result<Result<TokenResponse, String>, AuthError> {
        let body = serde_urlencoded::to_string(params).map_err(|e| AuthError::NetworkError {
            message: format!("Failed to encode form: {e}"),
        })?;

        let response = self
            .http_client
            .post(token_url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e: reqwest::Error| AuthError::NetworkError {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Ok(Err(token_error_message(&error_text)));
        }

        let token_response: TokenResponse =
            response
                .json()
                .await
                .map_err(|e: reqwest::Error| AuthError::NetworkError {
                    message: format!("Failed to parse token response: {e}"),
                })?;

        Ok(Ok(token_response))
    }

    /// Exchanges an authorization code for a token.
    async fn exchange_code(
        &self,
        secrets: &ClientSecrets,
        code: &str,
        redirect_uri: &str,
        scopes: &[String],
    ) -> Result<OAuth2Token, AuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("redirect_uri", redirect_uri),
        ];

        self.token_request(&secrets.token_uri, &params)
            .await?
            .map(|response| response.into_token(scopes))
            .map_err(|message| AuthError::AuthorizationFailed { message })
    }
}

impl Default for GoogleOAuth2Provider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorizationServer for GoogleOAuth2Provider {
    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthError> {
        let refresh_token = credential
            .token
            .refresh_token
            .as_deref()
            .ok_or(AuthError::TokenExpiredNoRefresh)?;

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", credential.client_id.as_str()),
            ("client_secret", credential.client_secret.as_str()),
            ("refresh_token", refresh_token),
        ];

        let token = self
            .token_request(&credential.token_uri, &params)
            .await?
            .map(|response| response.into_token(&credential.token.scopes))
            .map_err(|message| AuthError::RefreshFailed { message })?;

        (self.notifier)(&AuthEvent::TokenRefreshed {
            token_preview: token_preview(&token.access_token),
            expires_in: token.seconds_until_expiry(),
        });

        Ok(credential.clone().refreshed(token))
    }

    async fn authorize(
        &self,
        secrets: &ClientSecrets,
        scopes: &[String],
    ) -> Result<Credential, AuthError> {
        let listener = CallbackListener::bind(self.callback_port).await?;
        let redirect_uri = listener.redirect_uri().to_string();
        let state = random_state();

        let url = authorization_url(secrets, &redirect_uri, scopes, &state)?;
        debug!(%redirect_uri, "Waiting for authorization callback");
        (self.notifier)(&AuthEvent::AwaitingUser { url });

        let code = listener.wait_for_code(&state).await?;
        (self.notifier)(&AuthEvent::CallbackReceived);

        let token = self
            .exchange_code(secrets, &code, &redirect_uri, scopes)
            .await?;
        (self.notifier)(&AuthEvent::TokenObtained {
            token_preview: token_preview(&token.access_token),
            expires_in: token.seconds_until_expiry(),
        });

        Ok(Credential::new(token, secrets))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn secrets() -> ClientSecrets {
        ClientSecrets {
            client_id: "my-client".to_string(),
            client_secret: "my-secret".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            redirect_uris: vec![],
        }
    }

    #[test]
    fn test_authorization_url_parameters() {
        let scopes = vec!["https://www.googleapis.com/auth/forms.body".to_string()];
        let url = authorization_url(&secrets(), "http://127.0.0.1:8080/", &scopes, "st").unwrap();
        let parsed = url::Url::parse(&url).unwrap();
        let pairs: std::collections::HashMap<_, _> = parsed.query_pairs().into_owned().collect();

        assert_eq!(parsed.host_str(), Some("accounts.google.com"));
        assert_eq!(pairs["response_type"], "code");
        assert_eq!(pairs["client_id"], "my-client");
        assert_eq!(pairs["redirect_uri"], "http://127.0.0.1:8080/");
        assert_eq!(pairs["scope"], scopes[0]);
        assert_eq!(pairs["state"], "st");
        assert_eq!(pairs["access_type"], "offline");
    }

    #[test]
    fn test_authorization_url_rejects_bad_auth_uri() {
        let mut bad = secrets();
        bad.auth_uri = "not a url".to_string();
        let err = authorization_url(&bad, "http://127.0.0.1:1/", &[], "st").unwrap_err();
        assert!(matches!(err, AuthError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_random_state_shape() {
        let a = random_state();
        let b = random_state();
        assert_eq!(a.len(), STATE_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_token_error_message() {
        let revoked =
            r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#;
        assert_eq!(
            token_error_message(revoked),
            "invalid_grant: Token has been expired or revoked."
        );
        assert_eq!(token_error_message(r#"{"error":"invalid_client"}"#), "invalid_client");
        assert!(token_error_message("<html>").contains("<html>"));
    }

    #[test]
    fn test_token_response_scopes() {
        let requested = vec!["a".to_string()];
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"t","expires_in":3599,"scope":"a b"}"#)
                .unwrap();
        let token = response.into_token(&requested);
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.scopes, vec!["a".to_string(), "b".to_string()]);

        let response: TokenResponse = serde_json::from_str(r#"{"access_token":"t"}"#).unwrap();
        assert_eq!(response.into_token(&requested).scopes, requested);
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token() {
        let token = OAuth2Token::new("t".to_string(), "Bearer".to_string(), Some(1), None, vec![]);
        let credential = Credential::new(token, &secrets());

        let err = GoogleOAuth2Provider::new().refresh(&credential).await.unwrap_err();
        assert_eq!(err, AuthError::TokenExpiredNoRefresh);
    }
}
