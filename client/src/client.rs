use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{AskResponse, HealthResponse, PdfFile, UploadResponse};

#[derive(Debug, Clone)]
pub struct AssistantClient {
    http: Client,
    config: ClientConfig,
}

impl AssistantClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST `{base}/upload_pdf` with the file under form field `file`.
    pub async fn upload_pdf(&self, file: &PdfFile) -> Result<UploadResponse, ClientError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        self.post_form("upload_pdf", form).await
    }

    /// POST `{base}/ask` with the question under form field `request`.
    /// An empty question is sent as-is.
    pub async fn ask(&self, question: &str) -> Result<AskResponse, ClientError> {
        let form = Form::new().text("request", question.to_string());

        self.post_form("ask", form).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.config.endpoint("health");
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        read_json(response).await
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ClientError> {
        let url = self.config.endpoint(path);
        log::debug!("POST {}", url);

        let response = self.http.post(&url).multipart(form).send().await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ClientError::Status { status, body });
    }

    serde_json::from_str(&body).map_err(|source| ClientError::MalformedPayload { source, body })
}
