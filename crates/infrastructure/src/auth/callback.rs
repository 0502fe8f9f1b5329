//! Loopback listener receiving the `OAuth2` redirect.

use formquiz_domain::AuthError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::debug;

/// Upper bound on the request head we are willing to buffer.
const MAX_REQUEST_HEAD: usize = 16 * 1024;

const SUCCESS_PAGE: &str = "<html><body><h3>Authorization complete.</h3>\
<p>You may close this window and return to the terminal.</p></body></html>";

const FAILURE_PAGE: &str = "<html><body><h3>Authorization failed.</h3>\
<p>Return to the terminal for details.</p></body></html>";

/// What the redirect carried.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CallbackOutcome {
    Code(String),
    Denied(String),
    StateMismatch,
    /// Not an authorization redirect (e.g. `/favicon.ico`).
    Unrelated,
}

/// A bound listener waiting for one authorization redirect.
pub struct CallbackListener {
    listener: TcpListener,
    redirect_uri: String,
}

impl CallbackListener {
    /// Binds to `127.0.0.1:port`. Port 0 picks a free port.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::CallbackServerError` if the port is taken.
    pub async fn bind(port: u16) -> Result<Self, AuthError> {
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .map_err(|e| AuthError::CallbackServerError {
                message: format!("cannot listen on port {port}: {e}"),
            })?;
        let port = listener
            .local_addr()
            .map_err(|e| AuthError::CallbackServerError {
                message: e.to_string(),
            })?
            .port();

        Ok(Self {
            listener,
            redirect_uri: format!("http://127.0.0.1:{port}/"),
        })
    }

    /// The redirect URI to register with the authorization request.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Serves connections until the authorization redirect arrives.
    ///
    /// # Errors
    ///
    /// `AuthorizationFailed` if the user denied access or the `state`
    /// does not match; `CallbackServerError` if accepting fails. A
    /// connection that cannot be read is answered with 400 and skipped.
    pub async fn wait_for_code(self, expected_state: &str) -> Result<String, AuthError> {
        loop {
            let (mut stream, peer) =
                self.listener
                    .accept()
                    .await
                    .map_err(|e| AuthError::CallbackServerError {
                        message: e.to_string(),
                    })?;
            debug!(%peer, "Callback connection");

            let target = match read_request_target(&mut stream).await {
                Ok(target) => target,
                Err(e) => {
                    debug!(%peer, error = %e, "Dropping unreadable callback request");
                    respond(&mut stream, "400 Bad Request", "").await;
                    continue;
                }
            };
            let outcome = parse_callback(&target, expected_state);

            let (status, page) = match &outcome {
                CallbackOutcome::Code(_) => ("200 OK", SUCCESS_PAGE),
                CallbackOutcome::Unrelated => ("404 Not Found", ""),
                CallbackOutcome::Denied(_) | CallbackOutcome::StateMismatch => {
                    ("400 Bad Request", FAILURE_PAGE)
                }
            };
            respond(&mut stream, status, page).await;

            match outcome {
                CallbackOutcome::Code(code) => return Ok(code),
                CallbackOutcome::Denied(error) => {
                    return Err(AuthError::AuthorizationFailed { message: error });
                }
                CallbackOutcome::StateMismatch => {
                    return Err(AuthError::AuthorizationFailed {
                        message: "state parameter mismatch".to_string(),
                    });
                }
                CallbackOutcome::Unrelated => {}
            }
        }
    }
}

/// Reads the request head and returns the target of the request line.
async fn read_request_target(stream: &mut TcpStream) -> Result<String, AuthError> {
    let mut head = Vec::with_capacity(1024);
    let mut chunk = [0_u8; 1024];

    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let read = stream
            .read(&mut chunk)
            .await
            .map_err(|e| AuthError::CallbackServerError {
                message: e.to_string(),
            })?;
        if read == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..read]);
        if head.len() > MAX_REQUEST_HEAD {
            return Err(AuthError::CallbackServerError {
                message: "callback request too large".to_string(),
            });
        }
    }

    let head = String::from_utf8_lossy(&head);
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default();
    Ok(target.to_string())
}

fn parse_callback(target: &str, expected_state: &str) -> CallbackOutcome {
    let Ok(url) = url::Url::parse("http://127.0.0.1").and_then(|base| base.join(target)) else {
        return CallbackOutcome::Unrelated;
    };

    let mut code = None;
    let mut state = None;
    let mut error = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if code.is_none() && error.is_none() {
        return CallbackOutcome::Unrelated;
    }
    if state.as_deref() != Some(expected_state) {
        return CallbackOutcome::StateMismatch;
    }
    match (code, error) {
        (_, Some(error)) => CallbackOutcome::Denied(error),
        (Some(code), None) => CallbackOutcome::Code(code),
        (None, None) => CallbackOutcome::Unrelated,
    }
}

async fn respond(stream: &mut TcpStream, status: &str, page: &str) {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{page}",
        page.len()
    );
    if let Err(e) = stream.write_all(response.as_bytes()).await {
        debug!(error = %e, "Could not answer callback request");
    }
    let _ = stream.shutdown().await;
}
