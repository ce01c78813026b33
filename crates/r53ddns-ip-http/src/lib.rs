// # HTTP IP Source
//
// This crate provides the HTTP-based public IP source for r53ddns.
//
// ## Architecture
//
// Fetches the caller's public IPv4 address from an IP-echo service
// (by default `http://checkip.amazonaws.com/`), which answers with the bare
// address as plain text. One request is made per call; nothing is cached and
// nothing is retried.
//
// ## Failure mapping
//
// - transport failure or timeout → `Error::Network`
// - any status other than 200    → `Error::UnexpectedStatus`
// - body read failure            → `Error::Io`
// - body is not an IPv4 address  → `Error::InvalidAddress`

use r53ddns_core::config::IpSourceConfig;
use r53ddns_core::traits::IpSource;
use r53ddns_core::{Error, Result};

use std::net::Ipv4Addr;
use std::time::Duration;

/// Strip trailing line terminators and whitespace from a response body
///
/// ```
/// use r53ddns_ip_http::chomp;
///
/// assert_eq!(chomp("1.2.3.4\n"), "1.2.3.4");
/// assert_eq!(chomp("1.2.3.4"), "1.2.3.4");
/// ```
pub fn chomp(body: &str) -> &str {
    body.trim_end_matches(|c: char| c.is_ascii_whitespace())
}

/// HTTP-based public IP source
#[derive(Debug)]
pub struct HttpIpSource {
    /// URL to fetch the IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `config`: endpoint URL and optional request timeout
    pub fn new(config: &IpSourceConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: config.url.clone(),
            client,
        })
    }

    /// The endpoint this source queries
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the current IP from the HTTP service
    async fn fetch_ip(&self) -> Result<Ipv4Addr> {
        tracing::debug!("Checking public IP via {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("Request to {} failed: {}", self.url, e)))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(Error::unexpected_status(
                response.status().as_u16(),
                self.url.clone(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::io(format!("Failed to read response from {}: {}", self.url, e)))?;

        let ip_text = chomp(&body);

        ip_text
            .parse::<Ipv4Addr>()
            .map_err(|_| Error::InvalidAddress(ip_text.to_string()))
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        self.fetch_ip().await
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(url: String) -> IpSourceConfig {
        IpSourceConfig {
            url,
            timeout_secs: Some(1),
        }
    }

    async fn server_answering(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(template)
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_chomp() {
        assert_eq!(chomp("1.2.3.4\n"), "1.2.3.4");
        assert_eq!(chomp("1.2.3.4\r\n"), "1.2.3.4");
        assert_eq!(chomp("1.2.3.4\n\n"), "1.2.3.4");
        assert_eq!(chomp("1.2.3.4"), "1.2.3.4");
        assert_eq!(chomp(chomp("1.2.3.4\n")), "1.2.3.4");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = HttpIpSource::new(&config_for("checkip.amazonaws.com".to_string()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_plain_text_body_is_parsed() {
        let server =
            server_answering(ResponseTemplate::new(200).set_body_string("203.0.113.5\n")).await;

        let source = HttpIpSource::new(&config_for(server.uri())).unwrap();
        let ip = source.current().await.unwrap();

        assert_eq!(ip, Ipv4Addr::new(203, 0, 113, 5));
    }

    #[tokio::test]
    async fn test_service_unavailable_is_unexpected_status() {
        let server = server_answering(ResponseTemplate::new(503)).await;

        let source = HttpIpSource::new(&config_for(server.uri())).unwrap();
        let err = source.current().await.unwrap_err();

        assert!(
            matches!(err, Error::UnexpectedStatus { status: 503, .. }),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn test_non_200_success_is_rejected() {
        let server =
            server_answering(ResponseTemplate::new(203).set_body_string("203.0.113.5\n")).await;

        let source = HttpIpSource::new(&config_for(server.uri())).unwrap();
        let err = source.current().await.unwrap_err();

        assert!(matches!(err, Error::UnexpectedStatus { status: 203, .. }));
    }

    #[tokio::test]
    async fn test_garbage_body_is_invalid_address() {
        let server =
            server_answering(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
                .await;

        let source = HttpIpSource::new(&config_for(server.uri())).unwrap();
        let err = source.current().await.unwrap_err();

        assert!(matches!(err, Error::InvalidAddress(ref body) if body == "<html>oops</html>"));
    }

    #[tokio::test]
    async fn test_ipv6_body_is_invalid_address() {
        let server =
            server_answering(ResponseTemplate::new(200).set_body_string("2001:db8::1\n")).await;

        let source = HttpIpSource::new(&config_for(server.uri())).unwrap();
        let err = source.current().await.unwrap_err();

        assert!(matches!(err, Error::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out_as_network_error() {
        let server = server_answering(
            ResponseTemplate::new(200)
                .set_body_string("203.0.113.5\n")
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        let source = HttpIpSource::new(&config_for(server.uri())).unwrap();
        let err = source.current().await.unwrap_err();

        assert!(matches!(err, Error::Network(_)), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Nothing listens on a port released right after binding
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let source = HttpIpSource::new(&config_for(url)).unwrap();
        let err = source.current().await.unwrap_err();

        assert!(matches!(err, Error::Network(_)), "unexpected error: {err}");
    }
}
