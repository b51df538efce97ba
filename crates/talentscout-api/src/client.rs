//! reqwest client for the sourcing backend.

use crate::backend::Backend;
use crate::error::ApiError;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use talentscout_core::{Candidate, HealthStatus, Job, JobDraft, JobProgress};

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root, e.g. `http://localhost:8000`
    pub base_url: String,
    /// Applies to each request on its own, independent of any polling bound.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the sourcing backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: config.base_url.clone(),
                reason: "not a base URL".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("talentscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn request<T, P>(&self, method: Method, url: Url, payload: Option<&P>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url.clone());
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().await.map_err(|source| ApiError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Http {
            url: url.to_string(),
            source,
        })?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            tracing::warn!("{} returned {}", url, status);
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, self.endpoint(segments), None)
            .await
    }
}

impl Backend for ApiClient {
    async fn create_job(&self, draft: &JobDraft) -> Result<Job, ApiError> {
        let job: Job = self
            .request(Method::POST, self.endpoint(&["jobs"]), Some(draft))
            .await?;
        tracing::info!("Created job {} ({})", job.id, draft.title);
        Ok(job)
    }

    async fn get_job(&self, job_id: &str) -> Result<Job, ApiError> {
        self.get(&["jobs", job_id]).await
    }

    async fn get_job_progress(&self, job_id: &str) -> Result<JobProgress, ApiError> {
        self.get(&["jobs", job_id, "progress"]).await
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let jobs: Option<Vec<Job>> = self.get(&["api", "jobs", "all"]).await?;
        Ok(jobs.unwrap_or_default())
    }

    async fn get_candidate_profile(&self, candidate_id: &str) -> Result<Candidate, ApiError> {
        self.get(&["api", "candidate", candidate_id, "profile"])
            .await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get(&["health"]).await
    }
}
