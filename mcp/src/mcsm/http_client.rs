//! HTTP client for the MCSManager API
//!
//! Every call is an authenticated GET: the caller's query parameters are sent
//! together with the API key, instance id and daemon id from the configuration.
//! Responses are returned as parsed JSON; transport failures, non-2xx statuses
//! and undecodable bodies all surface as `Error` reports.

use std::sync::Arc;
use std::time::Duration;

use error_stack::Report;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use super::constants::{QUERY_API_KEY, QUERY_DAEMON_ID, QUERY_UUID, REQUEST_TIMEOUT};
use crate::config::McsmConfig;
use crate::error::{Error, Result};

/// Endpoint-specific query parameters; `None` values are left out of the URL
pub type QueryParams<'a> = [(&'a str, Option<String>)];

/// HTTP client bound to one MCSManager instance
#[derive(Clone)]
pub struct McsmHttpClient {
    client:  Client,
    config:  Arc<McsmConfig>,
    timeout: Duration,
}

impl McsmHttpClient {
    pub fn new(config: Arc<McsmConfig>) -> Self {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(config: Arc<McsmConfig>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            config,
            timeout,
        }
    }

    /// Build the request URL: endpoint params first, then the three auth params
    fn build_url(&self, endpoint: &str, params: &QueryParams<'_>) -> Result<Url> {
        let mut url = self.config.endpoint_url(endpoint)?;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in params {
                if let Some(value) = value {
                    query.append_pair(name, value);
                }
            }
            query
                .append_pair(QUERY_API_KEY, &self.config.api_key)
                .append_pair(QUERY_UUID, &self.config.account_id)
                .append_pair(QUERY_DAEMON_ID, &self.config.daemon_id);
        }
        Ok(url)
    }

    /// Issue an authenticated GET and decode the JSON body
    ///
    /// # Errors
    /// `Error::Timeout` when the request exceeds its budget, `Error::HttpStatus` for non-2xx
    /// responses, `Error::Decode` for bodies that are not JSON and `Error::Network` otherwise.
    pub async fn request(&self, endpoint: &str, params: &QueryParams<'_>) -> Result<Value> {
        let url = self.build_url(endpoint, params)?;
        debug!(
            "MCSManager request: GET {endpoint} params={:?}",
            params
                .iter()
                .filter(|(_, value)| value.is_some())
                .collect::<Vec<_>>()
        );

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.handle_error(&e, endpoint))?;

        Self::check_status(&response, endpoint)?;

        let body = response
            .text()
            .await
            .map_err(|e| self.handle_error(&e, endpoint))?;

        serde_json::from_str(&body).map_err(|e| {
            warn!("MCSManager request: {endpoint} returned a non-JSON body - {e}");
            Report::new(Error::Decode(e.to_string()))
                .attach(format!("Endpoint: {endpoint}"))
                .attach(format!(
                    "Body (first 200 chars): {}",
                    body.chars().take(200).collect::<String>()
                ))
        })
    }

    /// Nothing is pooled beyond what `reqwest` manages itself, so closing is a no-op
    pub const fn close(&self) {}

    fn check_status(response: &reqwest::Response, endpoint: &str) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        warn!("MCSManager request: HTTP status error - endpoint={endpoint} status={status}");
        Err(Report::new(Error::HttpStatus {
            status: status.as_u16(),
        })
        .attach(format!(
            "{endpoint} returned {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error")
        )))
    }

    fn handle_error(&self, e: &reqwest::Error, endpoint: &str) -> Report<Error> {
        warn!("MCSManager request: HTTP request failed - endpoint={endpoint} error={e}");

        if e.is_timeout() {
            return Report::new(Error::Timeout {
                seconds: self.timeout.as_secs(),
            })
            .attach(format!("Endpoint: {endpoint}"));
        }

        let error_type = if e.is_connect() {
            "Connection failed"
        } else if e.is_request() {
            "Request error"
        } else if e.is_body() {
            "Body error"
        } else if e.is_decode() {
            "Decode error"
        } else {
            "Unknown error type"
        };

        Report::new(Error::failed_to(&format!("call {endpoint}"), error_type))
            .attach(format!("Full error: {e:?}"))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    use super::*;

    pub(crate) fn test_config(base: &Url) -> Arc<McsmConfig> {
        Arc::new(McsmConfig::new(base.clone(), "test-key", "instance-1", "daemon-1").unwrap())
    }

    /// Serve exactly one HTTP response and report the request line that was received
    pub(crate) async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (Url, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0_u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            let request = String::from_utf8_lossy(&request);
            let request_line = request.lines().next().unwrap_or_default().to_string();
            let _ = tx.send(request_line);

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        (url, rx)
    }

    #[tokio::test]
    async fn request_appends_auth_after_endpoint_params() {
        let (url, request_line) = serve_once("200 OK", r#"{"status":"200"}"#).await;
        let client = McsmHttpClient::new(test_config(&url));

        let body = client
            .request(
                "/api/protected_instance/command",
                &[("command", Some("/say hi".to_string())), ("skipped", None)],
            )
            .await
            .unwrap();

        assert_eq!(body["status"], "200");
        let line = request_line.await.unwrap();
        assert_eq!(
            line,
            "GET /api/protected_instance/command?command=%2Fsay+hi&apikey=test-key&uuid=instance-1&daemonId=daemon-1 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn non_success_status_is_an_http_error() {
        let (url, _) = serve_once("403 Forbidden", r#"{"status":"403"}"#).await;
        let client = McsmHttpClient::new(test_config(&url));

        let err = client
            .request("/api/protected_instance/outputlog", &[])
            .await
            .unwrap_err();

        assert!(matches!(err.current_context(), Error::HttpStatus { status: 403 }));
        assert!(err.current_context().is_network());
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let (url, _) = serve_once("200 OK", "<html>maintenance</html>").await;
        let client = McsmHttpClient::new(test_config(&url));

        let err = client
            .request("/api/protected_instance/outputlog", &[])
            .await
            .unwrap_err();

        assert!(matches!(err.current_context(), Error::Decode(_)));
    }

    /// Accept connections and never answer them
    pub(crate) async fn silent_server() -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        url
    }

    #[tokio::test]
    async fn unresponsive_server_times_out() {
        let url = silent_server().await;

        let client = McsmHttpClient::with_timeout(test_config(&url), Duration::from_millis(200));
        let err = client
            .request("/api/protected_instance/command", &[])
            .await
            .unwrap_err();

        assert!(err.current_context().is_timeout());
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
        drop(listener);

        let client = McsmHttpClient::new(test_config(&url));
        let err = client
            .request("/api/protected_instance/command", &[])
            .await
            .unwrap_err();

        assert!(matches!(err.current_context(), Error::Network(_)));
    }

    #[test]
    fn close_is_idempotent() {
        let url = Url::parse("http://127.0.0.1:23333").unwrap();
        let client = McsmHttpClient::new(test_config(&url));
        client.close();
        client.close();
    }
}
