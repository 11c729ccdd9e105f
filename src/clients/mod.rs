/// External API clients module
use crate::domain::{ApodRecord, MediaType};
use crate::errors::ErrorKind;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Fixed APOD provider endpoint
pub const APOD_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// NASA APOD client
pub struct NasaClient {
    http_client: HttpClient,
    endpoint: String,
    api_key: String,
}

impl NasaClient {
    pub fn new(api_key: String, timeout: Duration) -> reqwest::Result<Self> {
        Self::with_endpoint(APOD_ENDPOINT.to_string(), api_key, timeout)
    }

    pub fn with_endpoint(
        endpoint: String,
        api_key: String,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch Astronomy Picture of the Day.
    ///
    /// Issues exactly one GET and classifies every failure into an
    /// [`ErrorKind`]; nothing is retried here.
    pub async fn fetch_apod(&self) -> Result<ApodRecord, ErrorKind> {
        let resp = self
            .http_client
            .get_client()
            .get(&self.endpoint)
            .query(&[("api_key", &self.api_key)])
            .send()
            .await
            .map_err(classify_transport)?;

        let status = resp.status().as_u16();
        debug!("APOD responded with status {}", status);
        classify_status(status)?;

        let body = resp.bytes().await.map_err(classify_transport)?;
        parse_record(&body)
    }
}

/// Map a status code to its failure kind; only 200 passes
pub fn classify_status(status: u16) -> Result<(), ErrorKind> {
    match status {
        200 => Ok(()),
        401 => Err(ErrorKind::Unauthorized),
        404 => Err(ErrorKind::NotFound),
        code => Err(ErrorKind::ServerError(code)),
    }
}

/// Decode a provider body into a record
pub fn parse_record(body: &[u8]) -> Result<ApodRecord, ErrorKind> {
    let record: ApodRecord =
        serde_json::from_slice(body).map_err(|e| ErrorKind::Unexpected(e.to_string()))?;

    if record.media_type == MediaType::Image && record.url.trim().is_empty() {
        return Err(ErrorKind::Unexpected(
            "image record has no url".to_string(),
        ));
    }

    Ok(record)
}

/// Failures where no usable response arrived are network errors; a request
/// that could not even be built is unexpected.
fn classify_transport(err: reqwest::Error) -> ErrorKind {
    if err.is_builder() {
        ErrorKind::Unexpected(err.to_string())
    } else {
        ErrorKind::NetworkUnreachable
    }
}
