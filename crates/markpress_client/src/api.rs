//! Article store trait, response envelope, and HTTP implementation.

use crate::auth::AuthSession;
use crate::error::ClientError;
use markpress_core::models::{Document, DocumentDraft, DocumentSummary};
use markpress_core::Config;
use reqwest::blocking::RequestBuilder;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// In-body status code signalling success.
pub const CODE_OK: i64 = 1000;

/// Uniform response envelope used by the article API.
///
/// Success requires both a 2xx transport status and `code == 1000`; the
/// backend reports application failures inside 200 responses, so neither
/// signal alone is sufficient.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// The remote persistence collaborator.
///
/// Exactly the four operations the editor core depends on; implemented over
/// HTTP in production and by a recording fake in tests.
pub trait DocumentStore: Send {
    /// Fetch summaries of the user's documents, most recent first.
    fn list(&self) -> Result<Vec<DocumentSummary>, ClientError>;
    /// Fetch a single document by identity.
    fn fetch(&self, id: i64) -> Result<Document, ClientError>;
    /// Create a new document; the server assigns its identity.
    fn create(&self, draft: &DocumentDraft) -> Result<Document, ClientError>;
    /// Update an existing document.
    fn update(&self, id: i64, draft: &DocumentDraft) -> Result<Document, ClientError>;
}

/// Decode a response body under the envelope contract.
///
/// # Returns
/// The payload on success; [`ClientError::Unauthorized`] on 401,
/// [`ClientError::Api`] for transport- or application-level rejections, and
/// [`ClientError::Decode`] when a successful response has no usable body.
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, ClientError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }

    match serde_json::from_str::<ApiResponse<T>>(body) {
        Ok(envelope) => {
            if status.is_success() && envelope.code == CODE_OK {
                envelope
                    .data
                    .ok_or_else(|| ClientError::Decode("response missing 'data' field".to_string()))
            } else {
                Err(ClientError::Api {
                    code: envelope.code,
                    message: envelope.message.unwrap_or_else(|| {
                        status
                            .canonical_reason()
                            .unwrap_or("request failed")
                            .to_string()
                    }),
                })
            }
        }
        Err(_) if !status.is_success() => Err(ClientError::Api {
            code: i64::from(status.as_u16()),
            message: if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.trim().to_string()
            },
        }),
        Err(err) => Err(ClientError::Decode(err.to_string())),
    }
}

/// Blocking HTTP implementation of [`DocumentStore`].
pub struct HttpDocumentStore {
    http: reqwest::blocking::Client,
    base_url: String,
    auth: AuthSession,
}

impl HttpDocumentStore {
    /// Build a store for the configured server.
    ///
    /// # Errors
    /// Returns [`ClientError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &Config, auth: AuthSession) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.server_url.clone(),
            auth,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let request = match self.auth.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        debug!(status = status.as_u16(), bytes = body.len(), "api response");
        decode_body(status, &body)
    }
}

impl DocumentStore for HttpDocumentStore {
    fn list(&self) -> Result<Vec<DocumentSummary>, ClientError> {
        self.execute(self.http.get(self.url("articles/list")))
    }

    fn fetch(&self, id: i64) -> Result<Document, ClientError> {
        self.execute(self.http.get(self.url(&format!("articles/{}", id))))
    }

    fn create(&self, draft: &DocumentDraft) -> Result<Document, ClientError> {
        self.execute(self.http.post(self.url("articles")).json(draft))
    }

    fn update(&self, id: i64, draft: &DocumentDraft) -> Result<Document, ClientError> {
        self.execute(
            self.http
                .put(self.url(&format!("articles/update/{}", id)))
                .json(draft),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_body, ClientError};
    use markpress_core::models::Document;
    use reqwest::StatusCode;

    const DOCUMENT_BODY: &str = r#"{
        "id": 7,
        "userId": 1,
        "title": "Hello",
        "content": "body",
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    }"#;

    #[test]
    fn success_requires_http_success_and_code_ok() {
        let body = format!(r#"{{"code":1000,"message":"ok","data":{}}}"#, DOCUMENT_BODY);
        let document: Document = decode_body(StatusCode::OK, &body).expect("decode");
        assert_eq!(document.id, 7);
    }

    #[test]
    fn in_body_failure_code_is_an_api_error_even_on_http_200() {
        let body = r#"{"code":2001,"message":"title too long","data":null}"#;
        let err = decode_body::<Document>(StatusCode::OK, body).expect_err("must fail");
        match err {
            ClientError::Api { code, message } => {
                assert_eq!(code, 2001);
                assert_eq!(message, "title too long");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn http_401_maps_to_unauthorized() {
        let err = decode_body::<Document>(StatusCode::UNAUTHORIZED, "").expect_err("must fail");
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[test]
    fn non_json_error_body_keeps_the_status_context() {
        let err =
            decode_body::<Document>(StatusCode::BAD_GATEWAY, "upstream down").expect_err("fail");
        match err {
            ClientError::Api { code, message } => {
                assert_eq!(code, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn successful_status_with_garbage_body_is_a_decode_error() {
        let err = decode_body::<Document>(StatusCode::OK, "<html>").expect_err("fail");
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn missing_data_on_success_is_a_decode_error() {
        let body = r#"{"code":1000,"message":"ok"}"#;
        let err = decode_body::<Document>(StatusCode::OK, body).expect_err("fail");
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
