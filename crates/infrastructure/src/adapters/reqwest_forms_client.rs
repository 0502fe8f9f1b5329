//! Forms API client implementation using reqwest.
//!
//! This adapter implements the `FormsApi` port over the Google Forms v1
//! REST API, authenticating every call with the credential's bearer token.

use formquiz_application::ports::{FormsApi, FormsApiError};
use formquiz_domain::{BatchUpdateRequest, CreatedForm, Credential, NewForm};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Error body returned by Google APIs.
#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Builds the error for a non-success response body.
fn api_error(status: u16, body: &str) -> FormsApiError {
    match serde_json::from_str::<GoogleErrorBody>(body) {
        Ok(parsed) => FormsApiError::Api {
            status,
            message: match &parsed.error.status {
                Some(reason) => format!("{reason}: {}", parsed.error.message),
                None => parsed.error.message,
            },
            reason: parsed.error.status,
        },
        Err(_) => FormsApiError::Api {
            status,
            reason: None,
            message: if body.trim().is_empty() {
                "empty response body".to_string()
            } else {
                body.trim().to_string()
            },
        },
    }
}

/// Forms API client using reqwest.
pub struct ReqwestFormsClient {
    client: Client,
    base_url: String,
    authorization: String,
}

impl ReqwestFormsClient {
    /// Creates a client for `base_url` authenticated with `credential`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: &str, credential: &Credential) -> Result<Self, FormsApiError> {
        let client = Client::builder()
            .user_agent(concat!("formquiz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FormsApiError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, base_url, credential))
    }

    /// Creates a client with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str, credential: &Credential) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: credential.authorization_header(),
        }
    }

    fn forms_url(&self) -> String {
        format!("{}/v1/forms", self.base_url)
    }

    fn batch_update_url(&self, form_id: &str) -> String {
        format!("{}/v1/forms/{form_id}:batchUpdate", self.base_url)
    }

    /// Maps reqwest errors to `FormsApiError`.
    fn map_error(error: &reqwest::Error) -> FormsApiError {
        if error.is_decode() {
            return FormsApiError::InvalidResponse(error.to_string());
        }
        FormsApiError::Transport(error.to_string())
    }

    async fn post<B, T>(&self, url: String, body: &B) -> Result<T, FormsApiError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &self.authorization)
            .json(body)
            .send()
            .await
            .map_err(|e| Self::map_error(&e))?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FormsApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FormsApiError::Transport(format!("Failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| FormsApiError::InvalidResponse(e.to_string()))
    }
}

impl FormsApi for ReqwestFormsClient {
    async fn create_form(&self, form: &NewForm) -> Result<CreatedForm, FormsApiError> {
        self.post(self.forms_url(), form).await
    }

    async fn batch_update(
        &self,
        form_id: &str,
        batch: &BatchUpdateRequest,
    ) -> Result<(), FormsApiError> {
        let _: serde_json::Value = self.post(self.batch_update_url(form_id), batch).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formquiz_domain::{ClientSecrets, OAuth2Token};

    fn credential() -> Credential {
        let token = OAuth2Token::new("tok".to_string(), "Bearer".to_string(), None, None, vec![]);
        let secrets = ClientSecrets {
            client_id: "id".to_string(),
            client_secret: "s".to_string(),
            auth_uri: String::new(),
            token_uri: String::new(),
            redirect_uris: vec![],
        };
        Credential::new(token, &secrets)
    }

    #[test]
    fn test_urls() {
        let client = ReqwestFormsClient::with_client(
            Client::new(),
            "https://forms.googleapis.com/",
            &credential(),
        );
        assert_eq!(client.forms_url(), "https://forms.googleapis.com/v1/forms");
        assert_eq!(
            client.batch_update_url("abc"),
            "https://forms.googleapis.com/v1/forms/abc:batchUpdate"
        );
        assert_eq!(client.authorization, "Bearer tok");
    }

    #[test]
    fn test_google_error_body() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(
            api_error(403, body),
            FormsApiError::Api {
                status: 403,
                reason: Some("PERMISSION_DENIED".to_string()),
                message: "PERMISSION_DENIED: The caller does not have permission".to_string(),
            }
        );
    }

    #[test]
    fn test_non_json_error_body() {
        let err = api_error(502, "  Bad Gateway \n");
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let err = api_error(500, "");
        assert_eq!(err.to_string(), "HTTP 500: empty response body");
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestFormsClient::new("https://forms.googleapis.com", &credential()).is_ok());
    }
}
