use crate::error_convert::{status_to_app_error, ReqwestErrorExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared_types::{
    parse_location_list, ApiConfig, AppError, AppErrorKind, GeneratedReport, Location,
    LoginRequest, LoginResponse, ReportPage, ReportQuery, UploadAck,
};
use std::time::Duration;
use wizard::{DocumentUpload, EvidenceUpload, PickedFile, ReportBackend, ReportRequest};

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const DELETE_FORBIDDEN: &str = "You can only delete reports generated with your session";

/// REST client for the remote report service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| e.into_app_error())?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(%method, path, %request_id, "request");
        self.http
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, request_id)
    }

    /// Send and fail on any non-2xx status.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder.send().await.map_err(|e| e.into_app_error())?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "remote call failed");
        Err(status_to_app_error(status, &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, AppError> {
        let response = self.send(builder).await?;
        response.json::<T>().await.map_err(|e| e.into_app_error())
    }

    /// Upload acknowledgement; a 2xx with an unreadable body still counts.
    async fn send_ack(&self, builder: RequestBuilder) -> Result<UploadAck, AppError> {
        let response = self.send(builder).await?;
        let body = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    // ── Wizard endpoints ────────────────────────────────────────────

    #[tracing::instrument(skip(self))]
    pub async fn locations(&self) -> Result<Vec<Location>, AppError> {
        let response = self.send(self.request(Method::GET, "/locations")).await?;
        let body = response.text().await.map_err(|e| e.into_app_error())?;
        let locations = parse_location_list(&body);
        tracing::info!(count = locations.len(), "locations fetched");
        Ok(locations)
    }

    #[tracing::instrument(skip(self, upload), fields(location_id = %upload.location_id, category = %upload.category))]
    pub async fn evidence_upload(&self, upload: &EvidenceUpload) -> Result<UploadAck, AppError> {
        let mut form = Form::new()
            .part("file", file_part(&upload.file)?)
            .text("category", upload.category.as_str())
            .text("sessionId", upload.session_id.clone())
            .text("locationId", upload.location_id.clone());
        if let Some(note) = &upload.note {
            form = form.text("note", note.clone());
        }
        let ack = self
            .send_ack(self.request(Method::POST, "/evidence/upload").multipart(form))
            .await?;
        tracing::info!(bytes = upload.file.size(), "evidence uploaded");
        Ok(ack)
    }

    #[tracing::instrument(skip(self, upload), fields(images = upload.images.len(), has_pdf = upload.pdf.is_some()))]
    pub async fn document_upload(&self, upload: &DocumentUpload) -> Result<UploadAck, AppError> {
        let mut form = Form::new().text("sessionId", upload.session_id.clone());
        if let Some(pdf) = &upload.pdf {
            form = form.part("file", file_part(pdf)?);
        }
        for image in &upload.images {
            form = form.part("images", file_part(image)?);
        }
        self.send_ack(self.request(Method::POST, "/document/upload").multipart(form))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn report_generate(&self, request: &ReportRequest) -> Result<GeneratedReport, AppError> {
        let path = format!(
            "/report/generate/{}",
            urlencoding::encode(&request.session_id)
        );
        let builder = self
            .request(Method::GET, &path)
            .query(&[("locationId", request.location_id.as_str()), ("format", "json")]);
        self.send_json(builder).await
    }

    // ── Reports page ────────────────────────────────────────────────

    #[tracing::instrument(skip(self))]
    pub async fn list_reports(&self, query: &ReportQuery) -> Result<ReportPage, AppError> {
        let builder = self
            .request(Method::GET, "/reports")
            .query(&query.to_pairs());
        let page: ReportPage = self.send_json(builder).await?;
        tracing::info!(rows = page.data.len(), total = page.total, "reports listed");
        Ok(page)
    }

    /// Delete a report. Only the session that generated it may do so.
    #[tracing::instrument(skip(self))]
    pub async fn delete_report(&self, id: &str, session_id: &str) -> Result<(), AppError> {
        let path = format!("/reports/{}", urlencoding::encode(id));
        let builder = self
            .request(Method::DELETE, &path)
            .query(&[("sessionId", session_id)]);
        match self.send(builder).await {
            Ok(_) => {
                tracing::info!("report deleted");
                Ok(())
            }
            Err(e) if e.kind == AppErrorKind::Forbidden => Err(AppError::forbidden(DELETE_FORBIDDEN)),
            Err(e) => Err(e),
        }
    }

    // ── Auth ────────────────────────────────────────────────────────

    /// One login attempt. See [`crate::auth::login_with_retry`] for the
    /// retrying flow.
    #[tracing::instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        let response = self
            .send(self.request(Method::POST, "/auth/login").json(request))
            .await?;
        let body = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }
}

fn file_part(file: &PickedFile) -> Result<Part, AppError> {
    Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str(&file.content_type)
        .map_err(|e| AppError::bad_request(format!("Invalid file type for {}: {e}", file.name)))
}

impl ReportBackend for ApiClient {
    async fn fetch_locations(&self) -> Result<Vec<Location>, AppError> {
        self.locations().await
    }

    async fn upload_evidence(&self, upload: &EvidenceUpload) -> Result<UploadAck, AppError> {
        self.evidence_upload(upload).await
    }

    async fn upload_document(&self, upload: &DocumentUpload) -> Result<UploadAck, AppError> {
        self.document_upload(upload).await
    }

    async fn generate_report(&self, request: &ReportRequest) -> Result<GeneratedReport, AppError> {
        self.report_generate(request).await
    }
}
