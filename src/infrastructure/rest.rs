//! Blocking REST client for the cluster management API
//!
//! Creates are POSTed with basic auth. When the cluster answers with a job
//! reference the client polls `cluster/jobs/<uuid>` until the job succeeds,
//! fails, or the configured wait runs out.

use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::Settings;
use crate::infrastructure::connection::HostConnection;
use crate::infrastructure::traits::OntapApi;
use crate::infrastructure::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JobEnvelope {
    job: Option<JobRef>,
}

#[derive(Debug, Deserialize)]
struct JobRef {
    uuid: String,
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    state: String,
    #[serde(default)]
    message: Option<String>,
}

/// REST client bound to one cluster.
pub struct RestClient {
    base_url: Url,
    client: Client,
    username: String,
    password: String,
    poll_interval: Duration,
    job_timeout: Duration,
}

impl RestClient {
    /// Build the HTTP client for `conn`, honouring its TLS verification flag.
    pub fn new(conn: &HostConnection, settings: &Settings) -> ApiResult<Self> {
        let base_url = conn.base_url()?;
        if !conn.verify() {
            warn!("TLS certificate verification is disabled for {}", base_url);
        }

        let client = Client::builder()
            .danger_accept_invalid_certs(!conn.verify())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            client,
            username: conn.username().to_string(),
            password: conn.password().to_string(),
            poll_interval: Duration::from_millis(settings.job_poll_interval_ms),
            job_timeout: Duration::from_secs(settings.job_timeout_secs),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidAddress {
                address: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })
    }

    /// Body of a successful response (`None` when empty), or the rejection.
    fn read_body(response: Response) -> ApiResult<Option<Value>> {
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(rejection(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    #[instrument(skip(self))]
    fn wait_for_job(&self, uuid: &str) -> ApiResult<()> {
        let mut url = self.endpoint(&format!("cluster/jobs/{uuid}"))?;
        url.query_pairs_mut().append_pair("fields", "state,message,code");
        let started = Instant::now();

        loop {
            let response = self
                .client
                .get(url.clone())
                .basic_auth(&self.username, Some(&self.password))
                .send()?;
            let body = Self::read_body(response)?.ok_or_else(|| {
                ApiError::InvalidResponse(format!("empty status for job {uuid}"))
            })?;
            let job: JobStatus = serde_json::from_value(body)
                .map_err(|e| ApiError::InvalidResponse(format!("job {uuid}: {e}")))?;
            debug!("job {}: state={}", uuid, job.state);

            match job.state.as_str() {
                "success" => return Ok(()),
                "failure" => {
                    return Err(ApiError::Job {
                        uuid: uuid.to_string(),
                        message: job.message.unwrap_or_else(|| "no message".to_string()),
                    })
                }
                _ => {}
            }

            if started.elapsed() >= self.job_timeout {
                return Err(ApiError::JobTimeout {
                    uuid: uuid.to_string(),
                    waited_secs: self.job_timeout.as_secs(),
                });
            }
            thread::sleep(self.poll_interval);
        }
    }
}

impl OntapApi for RestClient {
    #[instrument(skip(self, body))]
    fn post(&self, collection: &str, body: &Value) -> ApiResult<()> {
        let url = self.endpoint(collection)?;
        debug!("POST {} {}", url, body);

        let response = self
            .client
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .json(body)
            .send()?;
        debug!("POST {}: {}", collection, response.status());

        match job_uuid(Self::read_body(response)?) {
            Some(uuid) => self.wait_for_job(&uuid),
            None => Ok(()),
        }
    }
}

/// Job to wait for, if the success body carries one.
fn job_uuid(body: Option<Value>) -> Option<String> {
    let body = body?;
    match serde_json::from_value::<JobEnvelope>(body.clone()) {
        Ok(envelope) => envelope.job.map(|job| job.uuid),
        Err(e) => {
            debug!("response is not a job envelope ({}): {}", e, body);
            None
        }
    }
}

/// Map a failed response to `ApiError::Rejected`, preferring the API's own message.
fn rejection(status: StatusCode, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => ApiError::Rejected {
            status: status.as_u16(),
            message: envelope.error.message,
            code: envelope.error.code,
        },
        Err(_) => {
            let message = match body.trim() {
                "" => status
                    .canonical_reason()
                    .unwrap_or("no response body")
                    .to_string(),
                text => text.to_string(),
            };
            ApiError::Rejected {
                status: status.as_u16(),
                message,
                code: None,
            }
        }
    }
}
