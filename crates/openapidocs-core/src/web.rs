//! HTTP access used to fetch documents published on the web.

// Internal imports (std, crate)
use std::time::Duration;

use crate::error::{Error, Result};

// External imports (alphabetized)
use reqwest::{Client, Response};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Client used for document downloads.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| Error::FailedRequest {
            message: format!("cannot create the HTTP client: {e}"),
            source: Some(e),
        })
}

/// Fails unless the response status is within 200-399.
pub fn ensure_success(response: &Response) -> Result<()> {
    let status = response.status();
    if status.as_u16() < 200 || status.as_u16() > 399 {
        return Err(Error::failed_request(format!(
            "Response status does not indicate success: {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        )));
    }
    Ok(())
}

/// Sends a GET request, turning transport errors into `FailedRequest`.
pub async fn http_get(url: &str) -> Result<Response> {
    log::debug!("Fetching {}", url);
    http_client()?
        .get(url)
        .send()
        .await
        .map_err(|e| Error::FailedRequest {
            message: e.to_string(),
            source: Some(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_ensure_success_rejects_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let response = http_get(&format!("{}/missing", server.uri())).await.unwrap();
        let error = ensure_success(&response).unwrap_err();
        assert!(error.to_string().contains("404 Not Found"));
    }

    #[tokio::test]
    async fn test_ensure_success_accepts_redirect_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let response = http_get(&format!("{}/ok", server.uri())).await.unwrap();
        assert!(ensure_success(&response).is_ok());
    }

    #[tokio::test]
    async fn test_transport_errors_are_failed_requests() {
        // nothing listens on port 9 of the loopback interface
        let error = http_get("http://127.0.0.1:9/").await.unwrap_err();
        assert!(matches!(error, Error::FailedRequest { source: Some(_), .. }));
    }
}
