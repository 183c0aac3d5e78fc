use std::fs;
use std::path::Path;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use url::Url;

use crate::config;
use crate::domain::backend_client::BackendClient;
use crate::error::ClientError;

/// Blocking HTTP implementation of [`BackendClient`].
///
/// One request per call, one connection per request, default reqwest
/// timeouts. Multipart bodies come from reqwest's own form support; the
/// shell never assembles boundaries by hand.
pub struct HttpBackendClient {
    http: Client,
    base: Url,
}

impl HttpBackendClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|source| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        let http = Client::builder().build().map_err(ClientError::Init)?;
        Ok(Self { http, base })
    }

    /// Address of the backend's MJPEG live view, for handing to a browser.
    pub fn live_view_url(&self) -> Result<Url, ClientError> {
        self.endpoint(config::LIVE_VIEW_ENDPOINT)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path)
            .map_err(|source| ClientError::InvalidBaseUrl {
                url: format!("{}{path}", self.base),
                source,
            })
    }

    /// Upload the file at `path` as the single multipart part `file`,
    /// carrying the original filename and `application/octet-stream`.
    fn post_file(&self, endpoint: &str, path: &Path) -> Result<Vec<u8>, ClientError> {
        let bytes = fs::read(path).map_err(|source| ClientError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|source| transport(endpoint, source))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoint(endpoint)?)
            .multipart(form)
            .send()
            .map_err(|source| transport(endpoint, source))?;
        read_success(endpoint, response)
    }

    fn post_empty(&self, endpoint: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.endpoint(endpoint)?)
            .send()
            .map_err(|source| transport(endpoint, source))?;
        read_success(endpoint, response).map(|_| ())
    }
}

impl BackendClient for HttpBackendClient {
    fn upload_image(&self, path: &Path) -> Result<Vec<u8>, ClientError> {
        self.post_file(config::UPLOAD_IMAGE_ENDPOINT, path)
    }

    fn upload_video(&self, path: &Path) -> Result<Vec<u8>, ClientError> {
        self.post_file(config::UPLOAD_VIDEO_ENDPOINT, path)
    }

    fn start_live(&self, device: u32) -> Result<(), ClientError> {
        let endpoint = config::START_LIVE_ENDPOINT;
        let response = self
            .http
            .post(self.endpoint(endpoint)?)
            .json(&serde_json::json!({ "device": device }))
            .send()
            .map_err(|source| transport(endpoint, source))?;
        read_success(endpoint, response).map(|_| ())
    }

    fn stop_live(&self) -> Result<(), ClientError> {
        self.post_empty(config::STOP_LIVE_ENDPOINT)
    }

    fn delete_all(&self) -> Result<(), ClientError> {
        self.post_empty(config::DELETE_ALL_ENDPOINT)
    }
}

fn transport(endpoint: &str, source: reqwest::Error) -> ClientError {
    ClientError::Transport {
        endpoint: endpoint.to_string(),
        source,
    }
}

fn read_success(endpoint: &str, response: Response) -> Result<Vec<u8>, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            endpoint: endpoint.to_string(),
            status,
        });
    }
    let bytes = response
        .bytes()
        .map_err(|source| transport(endpoint, source))?;
    Ok(bytes.to_vec())
}
