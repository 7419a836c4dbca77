// graphite-web HTTP client
use crate::application::error::GraphsError;
use crate::application::graphite_client::GraphiteClient;
use crate::infrastructure::config::GraphiteSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GraphiteHttpClient {
    base_url: String,
    user: Option<String>,
    password: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ExpandResponse {
    #[serde(default)]
    results: Vec<String>,
}

impl GraphiteHttpClient {
    pub fn new(settings: &GraphiteSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build graphite HTTP client")?;

        Ok(Self {
            base_url: settings.url.trim_end_matches('/').to_string(),
            user: settings.user.clone(),
            password: settings.password.clone(),
            client,
        })
    }

    fn build_expand_url(&self, pattern: &str) -> String {
        format!(
            "{}/metrics/expand?query={}&leavesOnly=1",
            self.base_url,
            urlencoding::encode(pattern)
        )
    }

    async fn execute_expand(&self, pattern: &str) -> Result<ExpandResponse> {
        let url = self.build_expand_url(pattern);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/json");
        if let Some(user) = &self.user {
            request = request.basic_auth(user, self.password.as_ref());
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to graphite")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("graphite query failed with status {}: {}", status, body);
        }

        response
            .json::<ExpandResponse>()
            .await
            .context("Failed to parse graphite response")
    }
}

#[async_trait]
impl GraphiteClient for GraphiteHttpClient {
    async fn expand(&self, pattern: &str) -> Result<Vec<String>, GraphsError> {
        tracing::debug!("Expanding graphite pattern: {}", pattern);

        match self.execute_expand(pattern).await {
            Ok(response) => Ok(response.results),
            Err(e) => {
                tracing::error!("graphite expand of {} failed: {:#}", pattern, e);
                Err(GraphsError::GraphBackendUnavailable(format!("{:#}", e)))
            }
        }
    }
}
