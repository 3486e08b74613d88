//! HTTP transport for form submissions
//!
//! Posts the serialized form as JSON to the site's form endpoint and decodes
//! the `{ success, message }` response contract.

use super::error::SubmitError;
use super::traits::{SubmitResponse, SubmitTransport};
use crate::state::FormPayload;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use std::time::Duration;

/// Client for the site's form endpoint
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport posting to `endpoint` resolved against `site_url`
    pub fn new(site_url: &str, endpoint: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let endpoint = resolve_endpoint(site_url, endpoint)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SubmitTransport for HttpTransport {
    async fn post_json(&self, payload: &FormPayload) -> Result<SubmitResponse, SubmitError> {
        tracing::debug!(endpoint = %self.endpoint, fields = payload.len(), "posting form");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Resolve the endpoint path against the site root.
///
/// The site URL is treated as a directory, so `http://host/site` and
/// `http://host/site/` resolve `process.php` to the same place.
fn resolve_endpoint(site_url: &str, endpoint: &str) -> Result<Url, SubmitError> {
    let invalid = |reason: String| SubmitError::InvalidEndpoint {
        url: site_url.to_string(),
        reason,
    };

    let mut base = site_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let base = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }
    base.join(endpoint).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP response and hand back the raw request text
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let site_url = format!("http://{}/", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (site_url, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn payload() -> FormPayload {
        let mut payload = FormPayload::new();
        payload.insert("email".to_string(), json!("a@b.co"));
        payload
    }

    #[test]
    fn test_resolve_endpoint_with_and_without_trailing_slash() {
        let a = resolve_endpoint("http://localhost:8080/site", "process.php").unwrap();
        let b = resolve_endpoint("http://localhost:8080/site/", "process.php").unwrap();
        assert_eq!(a.as_str(), "http://localhost:8080/site/process.php");
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolve_endpoint_rejects_garbage() {
        let err = resolve_endpoint("not a url", "process.php").unwrap_err();
        assert!(matches!(err, SubmitError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_resolve_endpoint_rejects_non_http_scheme() {
        let err = resolve_endpoint("file:///var/www", "process.php").unwrap_err();
        assert!(matches!(err, SubmitError::InvalidEndpoint { .. }));
    }

    #[tokio::test]
    async fn test_post_json_sends_json_body() {
        let (site_url, server) = serve_once("200 OK", r#"{"success": true}"#).await;
        let transport =
            HttpTransport::new(&site_url, "process.php", Duration::from_secs(5)).unwrap();

        let response = transport.post_json(&payload()).await.unwrap();
        assert_eq!(response, SubmitResponse::accepted());

        let request = server.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /process.php HTTP/1.1"));
        assert!(lower.contains("content-type: application/json"));
        assert!(request.ends_with(r#"{"email":"a@b.co"}"#));
    }

    #[tokio::test]
    async fn test_post_json_decodes_rejection() {
        let (site_url, server) =
            serve_once("200 OK", r#"{"success": false, "message": "Spam gedetecteerd"}"#).await;
        let transport =
            HttpTransport::new(&site_url, "process.php", Duration::from_secs(5)).unwrap();

        let response = transport.post_json(&payload()).await.unwrap();
        assert_eq!(response, SubmitResponse::rejected(Some("Spam gedetecteerd")));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_post_json_non_string_message_is_rejection() {
        let (site_url, server) = serve_once("200 OK", r#"{"success": false, "message": 42}"#).await;
        let transport =
            HttpTransport::new(&site_url, "process.php", Duration::from_secs(5)).unwrap();

        let response = transport.post_json(&payload()).await.unwrap();
        assert_eq!(response, SubmitResponse::rejected(Some("42")));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_post_json_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let site_url = format!("http://{}/", listener.local_addr().unwrap());

        // Accept and read the request, then never answer
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let transport =
            HttpTransport::new(&site_url, "process.php", Duration::from_millis(200)).unwrap();
        let err = transport.post_json(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Request(_)));
        assert!(err.is_timeout());

        server.abort();
    }

    #[tokio::test]
    async fn test_post_json_non_success_status() {
        let (site_url, server) =
            serve_once("500 Internal Server Error", r#"{"success": true}"#).await;
        let transport =
            HttpTransport::new(&site_url, "process.php", Duration::from_secs(5)).unwrap();

        let err = transport.post_json(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Status(500)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_post_json_undecodable_body() {
        let (site_url, server) = serve_once("200 OK", "<html>ok</html>").await;
        let transport =
            HttpTransport::new(&site_url, "process.php", Duration::from_secs(5)).unwrap();

        let err = transport.post_json(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Decode(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_post_json_connection_refused() {
        // Bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let site_url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let transport =
            HttpTransport::new(&site_url, "process.php", Duration::from_secs(5)).unwrap();
        let err = transport.post_json(&payload()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Request(_)));
    }
}
