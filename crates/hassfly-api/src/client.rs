// Home Assistant REST API client
//
// Wraps `reqwest::Client` with `/api/`-rooted URL construction, bearer
// auth, and centralized response handling. Every operation returns an
// `ApiResponse` envelope so the HTTP status observed for a call travels
// with its payload instead of living in mutable client state.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    EntityState, ErrorBody, ServiceCallBody, ServiceCallResponse, TemplateRequest,
};

/// Per-call result envelope: the decoded payload plus the HTTP status
/// the server answered with.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub payload: T,
}

/// Typed client for the Home Assistant REST API.
///
/// Construction validates its inputs and builds the `Authorization`
/// header exactly once; it performs no I/O. All failure modes after
/// construction surface as `Err`, never as panics.
#[derive(Debug)]
pub struct HaClient {
    http: reqwest::Client,
    base: String,
}

impl HaClient {
    /// Create a client for the server at `base_url`.
    ///
    /// Fails synchronously with [`Error::Configuration`] when the URL or
    /// token is empty -- a misconfigured launcher must be distinguishable
    /// from an unreachable server.
    pub fn new(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        if base_url.is_empty() {
            return Err(Error::Configuration {
                message: "Home Assistant server URL is required".into(),
            });
        }
        if token.expose_secret().is_empty() {
            return Err(Error::Configuration {
                message: "Home Assistant API token is required".into(),
            });
        }

        // Validate the URL shape up front so per-call builders can't
        // fail on the base portion.
        Url::parse(base_url)?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| Error::Configuration {
                message: "API token contains characters invalid in a header".into(),
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = transport.build_client(headers)?;

        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The server root this client targets.
    pub fn base_url(&self) -> &str {
        &self.base
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build `{base}/api/{path}`.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        Url::parse(&format!("{}/api/{path}", self.base)).map_err(Error::InvalidUrl)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// All current entity states.
    ///
    /// `GET /api/states`
    pub async fn get_states(&self) -> Result<ApiResponse<Vec<EntityState>>, Error> {
        let url = self.api_url("states")?;
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        read_json(resp).await
    }

    /// One entity's current state.
    ///
    /// `GET /api/states/{entity_id}`. The id must be non-empty; its
    /// format beyond that is the server's to judge.
    pub async fn get_state(&self, entity_id: &str) -> Result<ApiResponse<EntityState>, Error> {
        if entity_id.is_empty() {
            return Err(Error::Configuration {
                message: "entity id is required".into(),
            });
        }
        let url = self.api_url(&format!("states/{entity_id}"))?;
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        read_json(resp).await
    }

    /// Invoke a domain service on one entity.
    ///
    /// `POST /api/services/{domain}/{service}` with `{"entity_id": id}`.
    /// The response is one of two wire shapes; both are passed through
    /// (see [`ServiceCallResponse`]).
    pub async fn call_service(
        &self,
        domain: &str,
        service: &str,
        entity_id: &str,
    ) -> Result<ApiResponse<ServiceCallResponse>, Error> {
        if domain.is_empty() || entity_id.is_empty() {
            return Err(Error::Configuration {
                message: "service domain and entity id are required".into(),
            });
        }
        let url = self.api_url(&format!("services/{domain}/{service}"))?;
        debug!("POST {}", url);
        let body = ServiceCallBody {
            entity_id: entity_id.to_owned(),
        };
        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;
        read_json(resp).await
    }

    /// Render a Jinja template server-side.
    ///
    /// `POST /api/template`. The success body is the rendered text, not
    /// JSON, so it is returned verbatim.
    pub async fn render_template(&self, template: &str) -> Result<ApiResponse<String>, Error> {
        let url = self.api_url("template")?;
        debug!("POST {}", url);
        let body = TemplateRequest {
            template: template.to_owned(),
        };
        let resp = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;
        if !status.is_success() {
            return Err(status_error(status, text));
        }
        Ok(ApiResponse {
            status: status.as_u16(),
            payload: text,
        })
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Decode a JSON response, mapping non-2xx statuses to typed errors.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<ApiResponse<T>, Error> {
    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if !status.is_success() {
        return Err(status_error(status, body));
    }

    let payload = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body,
    })?;

    Ok(ApiResponse {
        status: status.as_u16(),
        payload,
    })
}

/// Map an error status to `Authentication` or `Api`, extracting the
/// server's `{"message": ...}` body when it has one.
fn status_error(status: StatusCode, body: String) -> Error {
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Error::Authentication { message }
    } else {
        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
