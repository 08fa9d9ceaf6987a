//! HTTP client for the calculations API.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use reqwest::StatusCode;
use tracing::warn;
use url::Url;

use crate::ReckonError;
use crate::db::models::{Calculation, NewCalculation};

#[derive(Clone)]
pub struct HistoryClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HistoryClient {
    pub fn new(base_url: &Url) -> Result<Self, ReckonError> {
        let endpoint = base_url.join("api/calculations")?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    fn retry_policy() -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_secs(1))
            .with_max_times(2)
            .with_jitter()
    }

    /// Fetch the history, newest first.
    pub async fn list(&self) -> Result<Vec<Calculation>, ReckonError> {
        let resp = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Append one calculation. Transient failures (connection errors, 5xx)
    /// are retried with bounded backoff before the error is reported.
    pub async fn create(&self, input: &NewCalculation) -> Result<Calculation, ReckonError> {
        let resp = (|| async {
            let resp = self
                .client
                .post(self.endpoint.clone())
                .json(input)
                .send()
                .await?;
            if resp.status().is_server_error() {
                let status = resp.status();
                let err = resp.error_for_status().unwrap_err();
                warn!("history append server error (will retry): {}", status);
                return Err(err);
            }
            Ok(resp)
        })
        .retry(Self::retry_policy())
        .await?;

        if resp.status() != StatusCode::CREATED {
            return Err(ReckonError::UnexpectedStatus(resp.status()));
        }
        Ok(resp.json().await?)
    }

    /// Delete the entire history.
    pub async fn clear(&self) -> Result<(), ReckonError> {
        self.client
            .delete(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
