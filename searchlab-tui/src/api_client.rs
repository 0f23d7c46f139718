//! HTTP client for the search gateway.
//!
//! Every call takes the [`Session`] explicitly and forwards its ID token
//! verbatim as the `Authorization` header. Non-2xx replies are classified
//! once into a [`FailureKind`]; there are no retries.

use crate::config::TuiConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use searchlab_core::{
    classify, AckEnvelope, CustomDocument, FailureKind, PresignedEnvelope, PresignedUpload,
    PresignedUrlRequest, SearchEnvelope, SearchRequest, Session,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const SEARCH_PATH: &str = "/search";
pub const INDEX_PATH: &str = "/index";
pub const VECTOR_INDEX_PATH: &str = "/vectorize-index";
pub const PRESIGNED_URL_PATH: &str = "/presigned-url";
pub const CUSTOM_DOCUMENT_PATH: &str = "/index-custom-document";

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Backend(FailureKind),
    #[error("Config error: {0}")]
    Config(String),
}

impl ApiClientError {
    pub fn failure(&self) -> Option<&FailureKind> {
        match self {
            ApiClientError::Backend(kind) => Some(kind),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        Self::with_base_url(
            &config.api_base_url,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ApiClientError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiClientError::Config("api_base_url is empty".to_string()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(
        &self,
        session: &Session,
        request: &SearchRequest,
    ) -> Result<SearchEnvelope, ApiClientError> {
        debug!(kind = request.kind(), "dispatching search");
        self.send_json(session, Method::POST, SEARCH_PATH, request)
            .await
    }

    pub async fn create_index(&self, session: &Session) -> Result<AckEnvelope, ApiClientError> {
        self.send_ack(session, Method::POST, INDEX_PATH).await
    }

    pub async fn delete_index(&self, session: &Session) -> Result<AckEnvelope, ApiClientError> {
        self.send_ack(session, Method::DELETE, INDEX_PATH).await
    }

    pub async fn vectorize_index(&self, session: &Session) -> Result<AckEnvelope, ApiClientError> {
        self.send_ack(session, Method::POST, VECTOR_INDEX_PATH).await
    }

    pub async fn delete_vector_index(
        &self,
        session: &Session,
    ) -> Result<AckEnvelope, ApiClientError> {
        self.send_ack(session, Method::DELETE, VECTOR_INDEX_PATH).await
    }

    pub async fn presigned_url(
        &self,
        session: &Session,
        request: &PresignedUrlRequest,
    ) -> Result<PresignedUpload, ApiClientError> {
        let envelope: PresignedEnvelope = self
            .send_json(session, Method::POST, PRESIGNED_URL_PATH, request)
            .await?;
        Ok(envelope.result)
    }

    /// Multipart POST straight to storage: presigned fields first, file last.
    /// Storage authorizes through the signed fields, so no session is sent.
    pub async fn upload_to_presigned(
        &self,
        upload: &PresignedUpload,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiClientError> {
        let mut form = Form::new();
        for (key, value) in &upload.fields {
            form = form.text(key.clone(), value.clone());
        }
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        form = form.part("file", part);

        let started = Instant::now();
        let response = self.client.post(&upload.url).multipart(form).send().await?;
        let status = response.status();
        info!(
            method = "POST",
            path = "<presigned>",
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "storage upload finished"
        );
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await?;
            Err(ApiClientError::Backend(classify(status.as_u16(), &text)))
        }
    }

    pub async fn index_custom_document(
        &self,
        session: &Session,
        documents: &[CustomDocument],
    ) -> Result<AckEnvelope, ApiClientError> {
        self.send_json(session, Method::POST, CUSTOM_DOCUMENT_PATH, documents)
            .await
    }

    async fn send_ack(
        &self,
        session: &Session,
        method: Method,
        path: &str,
    ) -> Result<AckEnvelope, ApiClientError> {
        let empty = serde_json::Map::new();
        self.send_json(session, method, path, &empty).await
    }

    async fn send_json<T, B>(
        &self,
        session: &Session,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let started = Instant::now();
        let response = self
            .client
            .request(method.clone(), url)
            .headers(auth_headers(session)?)
            .json(body)
            .send()
            .await?;
        info!(
            method = %method,
            path,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "gateway call finished"
        );
        self.parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            if text.trim().is_empty() {
                return Ok(serde_json::from_str("{}")?);
            }
            Ok(serde_json::from_str::<T>(&text)?)
        } else {
            let text = response.text().await?;
            let kind = classify(status.as_u16(), &text);
            warn!(status = status.as_u16(), failure = %kind, "gateway call failed");
            Err(ApiClientError::Backend(kind))
        }
    }
}

fn auth_headers(session: &Session) -> Result<HeaderMap, ApiClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(session.id_token()).map_err(|e| ApiClientError::Config(e.to_string()))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}
