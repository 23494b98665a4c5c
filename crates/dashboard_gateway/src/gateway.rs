use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use dashboard_core::{
    HistoryEntry, NewsItem, ReportReceipt, ReportRequest, SearchResult, StockQuote, UploadRecord,
};
use dashboard_logging::{dash_debug, dash_warn};

use crate::identity::identify;
use crate::wire::{HistoryEnvelope, MessageEnvelope, NewsEnvelope, SearchEnvelope, UploadsEnvelope};
use crate::{FailureKind, GatewayError, GatewaySettings, NewsQuery};

/// The backend's resource endpoints.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn news(&self, query: &NewsQuery) -> Result<Vec<NewsItem>, GatewayError>;
    async fn search(&self, query: &str, page: u32) -> Result<Vec<SearchResult>, GatewayError>;
    async fn stock(&self, symbol: &str) -> Result<StockQuote, GatewayError>;
    async fn list_uploads(&self) -> Result<Vec<UploadRecord>, GatewayError>;
    async fn upload_file(&self, filename: &str, contents: Vec<u8>) -> Result<(), GatewayError>;
    async fn download_upload(&self, filename: &str) -> Result<Vec<u8>, GatewayError>;
    async fn history(&self) -> Result<Vec<HistoryEntry>, GatewayError>;
    async fn login(&self, username: &str, password: &str) -> Result<(), GatewayError>;
    async fn build_report(&self, request: &ReportRequest) -> Result<ReportReceipt, GatewayError>;
    /// `POST /report/`; returns the backend's message, if any.
    async fn generate_report(&self) -> Result<Option<String>, GatewayError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    settings: GatewaySettings,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| GatewayError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// `path` relative to the configured origin, keeping any base path prefix.
    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        let mut base = self.settings.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|err| GatewayError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, GatewayError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_body_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GatewayError> {
        dash_debug!("GET {}", url);
        let body = self.send(self.client.get(url)).await?;
        decode(&body)
    }
}

#[async_trait::async_trait]
impl Gateway for ReqwestGateway {
    async fn news(&self, query: &NewsQuery) -> Result<Vec<NewsItem>, GatewayError> {
        let mut url = self.endpoint("news")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            if let Some(topic) = query.topic.as_deref() {
                pairs.append_pair("topic", topic);
            }
            if let Some(category) = query.category {
                pairs.append_pair("category", category.as_query());
            }
        }
        let envelope: NewsEnvelope = self.get_json(url).await?;
        match (envelope.news, envelope.error) {
            (Some(news), error) => {
                if let Some(error) = error {
                    dash_warn!("news served from stale cache: {}", error);
                }
                Ok(identify(news))
            }
            (None, error) => Err(GatewayError::application(error)),
        }
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<SearchResult>, GatewayError> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("page", &page.to_string());
        let envelope: SearchEnvelope = self.get_json(url).await?;
        if let Some(error) = envelope.error.filter(|error| !error.is_empty()) {
            dash_warn!("search for {:?} failed upstream: {}", query, error);
            return Err(GatewayError::application(envelope.message));
        }
        Ok(envelope.results.unwrap_or_default())
    }

    async fn stock(&self, symbol: &str) -> Result<StockQuote, GatewayError> {
        let mut url = self.endpoint("stock")?;
        url.query_pairs_mut().append_pair("symbol", symbol);
        let body: serde_json::Value = self.get_json(url).await?;
        if let Some(error) = body.get("error").filter(|error| !error.is_null()) {
            return Err(GatewayError::application(Some(json_text(error))));
        }
        let has_symbol = body
            .get("symbol")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|symbol| !symbol.is_empty());
        if !has_symbol {
            let message = body.get("message").map(json_text);
            return Err(GatewayError::application(message));
        }
        serde_json::from_value(body)
            .map_err(|err| GatewayError::new(FailureKind::Decode, err.to_string()))
    }

    async fn list_uploads(&self) -> Result<Vec<UploadRecord>, GatewayError> {
        let envelope: UploadsEnvelope = self.get_json(self.endpoint("upload/list")?).await?;
        Ok(envelope.uploads.unwrap_or_default())
    }

    async fn upload_file(&self, filename: &str, contents: Vec<u8>) -> Result<(), GatewayError> {
        let url = self.endpoint("upload/")?;
        dash_debug!("POST {} ({} bytes)", url, contents.len());
        let form = Form::new().part("file", Part::bytes(contents).file_name(filename.to_string()));
        self.send(self.client.post(url).multipart(form)).await?;
        Ok(())
    }

    async fn download_upload(&self, filename: &str) -> Result<Vec<u8>, GatewayError> {
        let mut url = self.endpoint("uploads/")?;
        url.path_segments_mut()
            .map_err(|()| GatewayError::new(FailureKind::InvalidUrl, "base url cannot have paths"))?
            .pop_if_empty()
            .push(filename);
        dash_debug!("GET {}", url);
        self.send(self.client.get(url)).await
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, GatewayError> {
        let envelope: HistoryEnvelope = self.get_json(self.endpoint("history/list")?).await?;
        envelope
            .history
            .ok_or_else(|| GatewayError::application(None))
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), GatewayError> {
        let url = self.endpoint("auth/login")?;
        dash_debug!("POST {} user={}", url, username);
        let form = Form::new()
            .text("username", username.to_string())
            .text("password", password.to_string());
        self.send(self.client.post(url).multipart(form)).await?;
        Ok(())
    }

    async fn build_report(&self, request: &ReportRequest) -> Result<ReportReceipt, GatewayError> {
        let url = self.endpoint("report/build")?;
        dash_debug!("POST {} title={:?}", url, request.title);
        let body = self.send(self.client.post(url).json(request)).await?;
        decode(&body)
    }

    async fn generate_report(&self) -> Result<Option<String>, GatewayError> {
        let url = self.endpoint("report/")?;
        let body = self.send(self.client.post(url)).await?;
        let envelope: MessageEnvelope = decode(&body)?;
        Ok(envelope.message)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(|err| GatewayError::new(FailureKind::Decode, err.to_string()))
}

fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> GatewayError {
    GatewayError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return GatewayError::new(FailureKind::InvalidUrl, err.to_string());
    }
    GatewayError::new(FailureKind::Network, err.to_string())
}
