use std::time::Duration;

use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::settings::Settings;

use super::{Error, Result};

/// Thin wrapper over `reqwest` that owns the base URL and decodes the
/// backend's `{success, ...}` envelope in one place. Call sites only ever see
/// `Result<T>` with the payload already extracted.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeouts(base_url, Duration::from_secs(2), Duration::from_secs(5))
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_timeouts(
            settings.base_url.clone(),
            settings.connect_timeout,
            settings.request_timeout,
        )
    }

    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Self {
        let http = match reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
        {
            Ok(client) => client,
            Err(e) => panic!("Failed to initialize HTTP client: {e}"),
        };

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Client {
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let resp = self.http.get(self.url(path)).query(query).send().await?;
        decode(resp).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self.http.post(self.url(path)).json(body).send().await?;
        decode(resp).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self.http.put(self.url(path)).json(body).send().await?;
        decode(resp).await
    }

    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.http.patch(self.url(path)).send().await?;
        decode(resp).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let resp = self.http.delete(self.url(path)).send().await?;
        decode_unit(resp).await
    }

    pub async fn delete_returning<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.http.delete(self.url(path)).send().await?;
        decode(resp).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let resp = self
            .http
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        decode(resp).await
    }
}

#[derive(serde::Deserialize)]
struct Envelope {
    success: bool,
    message: Option<String>,
    errors: Option<Vec<String>>,
    #[serde(flatten)]
    payload: Value,
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let envelope: Envelope = resp.json().await?;
    extract(envelope)
}

async fn decode_unit(resp: reqwest::Response) -> Result<()> {
    let envelope: Envelope = resp.json().await?;
    reject_on_failure(envelope).map(|_| ())
}

fn extract<T: DeserializeOwned>(envelope: Envelope) -> Result<T> {
    let envelope = reject_on_failure(envelope)?;
    Ok(serde_json::from_value(envelope.payload)?)
}

fn reject_on_failure(envelope: Envelope) -> Result<Envelope> {
    if !envelope.success {
        return Err(Error::Rejected {
            message: envelope
                .message
                .unwrap_or_else(|| "request failed".to_owned()),
            errors: envelope.errors.unwrap_or_default(),
        });
    }
    Ok(envelope)
}
