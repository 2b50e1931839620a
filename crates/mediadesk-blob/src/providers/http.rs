//! REST Blob Store client.
//!
//! Talks to the dashboard's media API:
//!
//! - `GET    {base}/files?page=&limit=[&search=]`
//! - `POST   {base}/files` (multipart, one `files` part per upload)
//! - `DELETE {base}/files/{id}`
//!
//! List and upload responses are accepted in several shapes and
//! normalized into [`BlobPage`] before use.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use mediadesk_core::config::blob::HttpBlobStoreConfig;
use mediadesk_core::error::{AppError, ErrorKind};
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::blob::{BlobListParams, BlobPage, BlobStore, BlobUpload, FileRecord};
use mediadesk_core::types::{FileId, Pagination};

/// REST client for the media API.
#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    client: Client,
    /// `{base}/files`, resolved once at construction.
    files_url: Url,
    api_token: Option<String>,
}

impl HttpBlobStore {
    /// Create a client from configuration.
    pub fn new(config: &HttpBlobStoreConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            files_url: files_url(&config.base_url)?,
            api_token: config.api_token.clone().filter(|t| !t.is_empty()),
        })
    }


    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder, what: &str) -> AppResult<reqwest::Response> {
        let resp = self.authorize(req).send().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, format!("{what} failed"), e)
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(format!("{what}: resource not found")));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, what, "Blob Store returned an error status");
            return Err(AppError::external_service(format!(
                "{what} failed with status {status}: {body}"
            )));
        }
        Ok(resp)
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    fn provider_type(&self) -> &str {
        "http"
    }

    async fn list(&self, params: &BlobListParams) -> AppResult<BlobPage> {
        let url = list_url(&self.files_url, params);
        let resp = self.send(self.client.get(url), "List files").await?;
        let body: ListResponse = resp.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Failed to decode file listing",
                e,
            )
        })?;

        let page = body.normalize(params);
        debug!(
            page = page.pagination.page,
            count = page.files.len(),
            total = page.pagination.total,
            "Listed Blob Store page"
        );
        Ok(page)
    }

    async fn upload(&self, files: Vec<BlobUpload>) -> AppResult<Vec<FileRecord>> {
        let mut form = reqwest::multipart::Form::new();
        for upload in files {
            let mut part = reqwest::multipart::Part::bytes(upload.data.to_vec())
                .file_name(upload.name.clone());
            if let Some(mime) = upload.mime_type.as_deref() {
                part = part.mime_str(mime).map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Validation,
                        format!("Invalid MIME type for {}", upload.name),
                        e,
                    )
                })?;
            }
            form = form.part("files", part);
        }

        let resp = self
            .send(self.client.post(self.files_url.clone()).multipart(form), "Upload files")
            .await?;
        let body: ListResponse = resp.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to decode upload reply", e)
        })?;
        Ok(body.normalize(&BlobListParams::default()).files)
    }

    async fn delete(&self, id: &FileId) -> AppResult<()> {
        let url = file_url(&self.files_url, id)?;
        self.send(self.client.delete(url), "Delete file").await?;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        let params = BlobListParams::page(mediadesk_core::types::PageRequest::new(1, 1));
        Ok(self.list(&params).await.is_ok())
    }
}

/// Resolve `{base}/files` from the configured base URL.
fn files_url(base: &str) -> AppResult<Url> {
    let mut url = Url::parse(base).map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, format!("Invalid Blob Store URL '{base}'"), e)
    })?;
    url.path_segments_mut()
        .map_err(|()| AppError::configuration(format!("Blob Store URL '{base}' cannot hold a path")))?
        .pop_if_empty()
        .push("files");
    Ok(url)
}

/// Build the list URL with its query string.
fn list_url(files: &Url, params: &BlobListParams) -> Url {
    let mut url = files.clone();
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("page", &params.page.page.to_string())
            .append_pair("limit", &params.page.limit.to_string());
        if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
            query.append_pair("search", search);
        }
    }
    url
}

/// `{base}/files/{id}` with the id as a single path segment.
fn file_url(files: &Url, id: &FileId) -> AppResult<Url> {
    let mut url = files.clone();
    url.path_segments_mut()
        .map_err(|()| AppError::configuration("Blob Store URL cannot hold a path"))?
        .push(id.as_str());
    Ok(url)
}

/// A file record as the media API sends it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFile {
    #[serde(alias = "_id")]
    id: serde_json::Value,
    #[serde(default, alias = "filename")]
    name: Option<String>,
    #[serde(default, alias = "original_name")]
    original_name: Option<String>,
    #[serde(default, alias = "mime_type", alias = "mimetype")]
    mime_type: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, alias = "updated_at")]
    updated_at: Option<DateTime<Utc>>,
}

impl WireFile {
    fn into_record(self) -> FileRecord {
        let id = match self.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        let name = self
            .name
            .or_else(|| self.original_name.clone())
            .unwrap_or_else(|| id.clone());
        FileRecord {
            id: FileId::new(id),
            name,
            original_name: self.original_name,
            mime_type: self.mime_type,
            size: self.size.unwrap_or(0),
            url: self.url.unwrap_or_default(),
            updated_at: self.updated_at,
        }
    }
}

/// Pagination metadata as the media API sends it.
#[derive(Debug, Deserialize)]
struct WirePagination {
    #[serde(default)]
    page: Option<u64>,
    #[serde(default, alias = "pageSize", alias = "per_page")]
    limit: Option<u64>,
    #[serde(default, alias = "totalItems", alias = "total_items")]
    total: Option<u64>,
}

/// The listing/upload reply shapes the API is known to produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Files {
        files: Vec<WireFile>,
        #[serde(default)]
        pagination: Option<WirePagination>,
    },
    Data {
        data: Vec<WireFile>,
        #[serde(default, alias = "pagination")]
        meta: Option<WirePagination>,
    },
    Bare(Vec<WireFile>),
}

impl ListResponse {
    /// Normalize into a [`BlobPage`], filling missing metadata from the request.
    fn normalize(self, params: &BlobListParams) -> BlobPage {
        let (files, meta) = match self {
            Self::Files { files, pagination } => (files, pagination),
            Self::Data { data, meta } => (data, meta),
            Self::Bare(files) => (files, None),
        };
        let files: Vec<FileRecord> = files.into_iter().map(WireFile::into_record).collect();

        let pagination = match meta {
            Some(m) => Pagination {
                page: m.page.unwrap_or(params.page.page),
                limit: m.limit.unwrap_or(params.page.limit),
                total: m.total.unwrap_or(files.len() as u64),
            },
            // Without metadata the reply is taken to be the whole set.
            None => Pagination {
                page: params.page.page,
                limit: (files.len() as u64).max(params.page.limit),
                total: params.page.offset() + files.len() as u64,
            },
        };

        BlobPage { files, pagination }
    }
}
