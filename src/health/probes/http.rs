//! External HTTP endpoint probe

use crate::config::ExternalApiConfig;
use crate::health::probes::Probe;
use crate::health::types::ProbeResult;
use crate::utils::error::HealthError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Issues a GET against one configured external dependency and compares
/// the response status to the expected one
pub struct HttpEndpointProbe {
    name: String,
    url: String,
    headers: HashMap<String, String>,
    expected_status: u16,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpEndpointProbe {
    /// Create a probe over a shared HTTP client
    pub fn new(client: reqwest::Client, config: &ExternalApiConfig) -> Self {
        Self {
            name: config.name.clone(),
            url: config.url.clone(),
            headers: config.headers.clone(),
            expected_status: config.expected_status,
            timeout: Duration::from_millis(config.timeout_ms),
            client,
        }
    }
}

#[async_trait]
impl Probe for HttpEndpointProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn check(&self) -> ProbeResult {
        let start = Instant::now();

        let mut request = self.client.get(&self.url).timeout(self.timeout);
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        match request.send().await {
            Ok(response) => {
                let status_code = response.status().as_u16();
                let mut details = HashMap::new();
                details.insert("statusCode".to_string(), status_code.into());
                details.insert("expectedStatus".to_string(), self.expected_status.into());
                details.insert("url".to_string(), self.url.clone().into());

                let elapsed = start.elapsed().as_millis() as u64;
                if status_code == self.expected_status {
                    ProbeResult::healthy(&self.name, elapsed, details)
                } else {
                    ProbeResult::unhealthy(
                        &self.name,
                        elapsed,
                        format!(
                            "unexpected status {} (expected {})",
                            status_code, self.expected_status
                        ),
                        details,
                    )
                }
            }
            Err(e) => {
                let error = if e.is_timeout() {
                    HealthError::Timeout(self.timeout.as_millis() as u64).to_string()
                } else {
                    e.to_string()
                };
                ProbeResult::unhealthy(
                    &self.name,
                    start.elapsed().as_millis() as u64,
                    error,
                    HashMap::new(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::types::ProbeStatus;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_config(name: &str, url: String, timeout_ms: u64, expected_status: u16) -> ExternalApiConfig {
        ExternalApiConfig {
            name: name.to_string(),
            url,
            timeout_ms,
            headers: HashMap::new(),
            expected_status,
        }
    }

    #[tokio::test]
    async fn expected_status_is_healthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let config = api_config("billing", format!("{}/ping", server.uri()), 2_000, 200);
        let probe = HttpEndpointProbe::new(reqwest::Client::new(), &config);
        let result = probe.check().await;

        assert_eq!(result.status, ProbeStatus::Healthy);
        assert_eq!(result.details["statusCode"], 200);
    }

    #[tokio::test]
    async fn status_mismatch_records_the_actual_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = api_config("billing", server.uri(), 2_000, 200);
        let probe = HttpEndpointProbe::new(reqwest::Client::new(), &config);
        let result = probe.check().await;

        assert_eq!(result.status, ProbeStatus::Unhealthy);
        assert_eq!(result.details["statusCode"], 500);
        assert_eq!(result.details["expectedStatus"], 200);
        assert!(result.error.unwrap().contains("500"));
    }

    #[tokio::test]
    async fn non_default_expected_status_is_honored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let config = api_config("events", server.uri(), 2_000, 204);
        let probe = HttpEndpointProbe::new(reqwest::Client::new(), &config);
        let result = probe.check().await;

        assert_eq!(result.status, ProbeStatus::Healthy);
    }

    #[tokio::test]
    async fn configured_headers_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer token"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mut config = api_config("secured", server.uri(), 2_000, 200);
        config
            .headers
            .insert("authorization".to_string(), "Bearer token".to_string());
        let probe = HttpEndpointProbe::new(reqwest::Client::new(), &config);
        let result = probe.check().await;

        assert_eq!(result.status, ProbeStatus::Healthy);
    }

    #[tokio::test]
    async fn hanging_endpoint_times_out_within_the_deadline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
            .mount(&server)
            .await;

        let config = api_config("slow", server.uri(), 2_000, 200);
        let probe = HttpEndpointProbe::new(reqwest::Client::new(), &config);
        let result = probe.check().await;

        assert_eq!(result.status, ProbeStatus::Unhealthy);
        assert!(result.error.unwrap().contains("timeout"));
        assert!(result.response_time_ms >= 2_000);
        assert!(result.response_time_ms < 2_500);
    }
}
