//! Low-level HTTP client, `CanopyHttp`.
//!
//! One method per node endpoint. The query API and the admin API listen on
//! different ports, so the client carries both base URLs.

use crate::domain::admin::{KeystoreImportRequest, TxRequest, TxResponse};
use crate::domain::transaction::HeightResponse;
use crate::error::HttpError;
use crate::http::retry::{parse_retry_after, RetryConfig, RetryPolicy};
use crate::shared::Address;
use crate::tx::SignedTransaction;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;

/// Low-level HTTP client for a Canopy node.
#[derive(Debug, Clone)]
pub struct CanopyHttp {
    query_url: String,
    admin_url: String,
    client: Client,
}

impl CanopyHttp {
    pub fn new(query_url: &str, admin_url: &str) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self {
            query_url: query_url.trim_end_matches('/').to_string(),
            admin_url: admin_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    pub fn admin_url(&self) -> &str {
        &self.admin_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        let base = if endpoint.is_admin() {
            &self.admin_url
        } else {
            &self.query_url
        };
        format!("{}{}", base, endpoint.path())
    }

    // ── Query API ────────────────────────────────────────────────────────

    /// `POST /v1/tx`. Returns the transaction hash the node reports.
    pub async fn submit_tx(&self, tx: &SignedTransaction) -> Result<String, HttpError> {
        tracing::debug!(message_type = %tx.message_type, "submitting transaction");
        self.call(Endpoint::SubmitTx, tx).await
    }

    /// `POST /v1/query/height`.
    pub async fn height(&self) -> Result<u64, HttpError> {
        let resp: HeightResponse = self.call(Endpoint::Height, &serde_json::json!({})).await?;
        Ok(resp.height)
    }

    // ── Admin API ────────────────────────────────────────────────────────

    pub async fn admin_create_order(&self, request: &TxRequest) -> Result<TxResponse, HttpError> {
        self.call(Endpoint::AdminCreateOrder, request).await
    }

    pub async fn admin_edit_order(&self, request: &TxRequest) -> Result<TxResponse, HttpError> {
        self.call(Endpoint::AdminEditOrder, request).await
    }

    pub async fn admin_delete_order(&self, request: &TxRequest) -> Result<TxResponse, HttpError> {
        self.call(Endpoint::AdminDeleteOrder, request).await
    }

    /// `POST /v1/admin/keystore-import`. Returns the imported key's address.
    pub async fn keystore_import(
        &self,
        request: &KeystoreImportRequest,
    ) -> Result<Address, HttpError> {
        self.call(Endpoint::KeystoreImport, request).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn call<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<T, HttpError> {
        let url = self.url(endpoint);
        self.post(&url, body, endpoint.retry_policy()).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        match retry.config() {
            None => self.do_request(url, body).await,
            Some(config) => with_retries(&config, url, || self.do_request(url, body)).await,
        }
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let resp = self.client.post(url).json(body).send().await?;
        let status = resp.status();
        let retry_after = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body_text = resp.text().await?;

        if status.is_success() {
            return parse_body(&body_text);
        }

        tracing::warn!(status = status.as_u16(), url, "node rejected request");
        Err(status_error(status.as_u16(), body_text, retry_after))
    }
}

// ─── Endpoints ───────────────────────────────────────────────────────────────

/// Node endpoints and the retry policy each one runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    SubmitTx,
    Height,
    AdminCreateOrder,
    AdminEditOrder,
    AdminDeleteOrder,
    KeystoreImport,
}

impl Endpoint {
    pub(crate) const ALL: [Endpoint; 6] = [
        Endpoint::SubmitTx,
        Endpoint::Height,
        Endpoint::AdminCreateOrder,
        Endpoint::AdminEditOrder,
        Endpoint::AdminDeleteOrder,
        Endpoint::KeystoreImport,
    ];

    pub(crate) fn path(self) -> &'static str {
        match self {
            Endpoint::SubmitTx => "/v1/tx",
            Endpoint::Height => "/v1/query/height",
            Endpoint::AdminCreateOrder => "/v1/admin/tx-create-order",
            Endpoint::AdminEditOrder => "/v1/admin/tx-edit-order",
            Endpoint::AdminDeleteOrder => "/v1/admin/tx-delete-order",
            Endpoint::KeystoreImport => "/v1/admin/keystore-import",
        }
    }

    pub(crate) fn is_admin(self) -> bool {
        !matches!(self, Endpoint::SubmitTx | Endpoint::Height)
    }

    /// Only reads retry. Anything that changes state is sent once.
    pub(crate) fn retry_policy(self) -> RetryPolicy {
        match self {
            Endpoint::Height => RetryPolicy::Idempotent,
            _ => RetryPolicy::None,
        }
    }
}

/// Map a non-success status to its error.
pub(crate) fn status_error(status: u16, body: String, retry_after_ms: Option<u64>) -> HttpError {
    match status {
        401 => HttpError::Unauthorized,
        404 => HttpError::NotFound(body),
        429 => HttpError::RateLimited { retry_after_ms },
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}

/// Run `attempt` until it succeeds, fails with a non-retryable error, or
/// `config.max_retries` retries are spent.
pub(crate) async fn with_retries<T, F, Fut>(
    config: &RetryConfig,
    url: &str,
    mut attempt_fn: F,
) -> Result<T, HttpError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, HttpError>>,
{
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        match attempt_fn().await {
            Ok(resp) => return Ok(resp),
            Err(e) => {
                if !config.is_retryable(&e) {
                    return Err(e);
                }
                if attempt == config.max_retries {
                    last_error = Some(e);
                    break;
                }

                let delay = match &e {
                    HttpError::RateLimited {
                        retry_after_ms: Some(ms),
                    } => Duration::from_millis(*ms),
                    _ => config.delay_for_attempt(attempt),
                };
                tracing::debug!(
                    attempt = attempt + 1,
                    max = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying request to {}",
                    url
                );
                futures_timer::Delay::new(delay).await;
                last_error = Some(e);
            }
        }
    }

    Err(HttpError::MaxRetriesExceeded {
        attempts: config.max_retries + 1,
        last_error: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    })
}

/// Parse a response body as JSON, falling back to treating a non-JSON body
/// as a plain string value. The node answers some endpoints with a bare hash
/// or address.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, HttpError> {
    match serde_json::from_str::<T>(body) {
        Ok(v) => Ok(v),
        Err(json_err) => {
            let text = body.trim();
            serde_json::from_value(serde_json::Value::String(text.to_string())).map_err(|_| {
                HttpError::UnexpectedBody(format!("{} (body: {})", json_err, truncate(text, 200)))
            })
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_parse_body_json_string() {
        let hash: String = parse_body("\"0xabc\"").unwrap();
        assert_eq!(hash, "0xabc");
    }

    #[test]
    fn test_parse_body_plain_text() {
        let hash: String = parse_body("abc123\n").unwrap();
        assert_eq!(hash, "abc123");
    }

    #[test]
    fn test_parse_body_plain_text_address() {
        let addr: Address = parse_body(&"ab".repeat(20)).unwrap();
        assert_eq!(addr, Address::new([0xab; 20]));
    }

    #[test]
    fn test_parse_body_object() {
        let resp: HeightResponse = parse_body(r#"{"height": 812}"#).unwrap();
        assert_eq!(resp.height, 812);
    }

    #[test]
    fn test_parse_body_unexpected() {
        let err = parse_body::<HeightResponse>("<html>oops</html>").unwrap_err();
        assert!(matches!(err, HttpError::UnexpectedBody(_)));
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(400, "bad tx".into(), None),
            HttpError::BadRequest(b) if b == "bad tx"
        ));
        assert!(matches!(
            status_error(401, String::new(), None),
            HttpError::Unauthorized
        ));
        assert!(matches!(
            status_error(404, "no route".into(), None),
            HttpError::NotFound(b) if b == "no route"
        ));
        assert!(matches!(
            status_error(422, "nope".into(), None),
            HttpError::BadRequest(_)
        ));
        assert!(matches!(
            status_error(500, "boom".into(), None),
            HttpError::ServerError { status: 500, body } if body == "boom"
        ));
        assert!(matches!(
            status_error(503, String::new(), Some(1000)),
            HttpError::ServerError { status: 503, .. }
        ));
    }

    #[test]
    fn test_rate_limit_carries_retry_after() {
        let err = status_error(429, String::new(), parse_retry_after("3"));
        assert!(matches!(
            err,
            HttpError::RateLimited {
                retry_after_ms: Some(3000)
            }
        ));
        assert!(matches!(
            status_error(429, String::new(), None),
            HttpError::RateLimited {
                retry_after_ms: None
            }
        ));
    }

    #[test]
    fn test_only_height_retries() {
        for endpoint in Endpoint::ALL {
            let config = endpoint.retry_policy().config();
            if endpoint == Endpoint::Height {
                assert!(config.is_some());
            } else {
                assert!(config.is_none(), "{:?} must be sent once", endpoint);
            }
        }
    }

    #[test]
    fn test_endpoint_urls() {
        let http = CanopyHttp::new("http://q:1", "http://a:2").unwrap();
        assert_eq!(http.url(Endpoint::SubmitTx), "http://q:1/v1/tx");
        assert_eq!(http.url(Endpoint::Height), "http://q:1/v1/query/height");
        assert_eq!(
            http.url(Endpoint::AdminCreateOrder),
            "http://a:2/v1/admin/tx-create-order"
        );
        assert_eq!(
            http.url(Endpoint::KeystoreImport),
            "http://a:2/v1/admin/keystore-import"
        );
    }

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter: false,
            ..RetryConfig::idempotent()
        }
    }

    #[tokio::test]
    async fn test_retries_exhausted_reports_all_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), HttpError> = with_retries(&fast_config(2), "http://q", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(HttpError::ServerError {
                    status: 503,
                    body: "busy".into(),
                })
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result {
            Err(HttpError::MaxRetriesExceeded {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("503"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_retryable_error_returns_at_once() {
        let calls = AtomicU32::new(0);
        let result: Result<(), HttpError> = with_retries(&fast_config(4), "http://q", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(HttpError::BadRequest("invalid signature".into())) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(HttpError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_rate_limit_then_success() {
        let calls = AtomicU32::new(0);
        let result = with_retries(&fast_config(3), "http://q", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(HttpError::RateLimited {
                        retry_after_ms: Some(0),
                    })
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_trims_trailing_slash() {
        let http = CanopyHttp::new("http://localhost:50002/", "http://localhost:50003//").unwrap();
        assert_eq!(http.query_url(), "http://localhost:50002");
        assert_eq!(http.admin_url(), "http://localhost:50003");
    }
}
