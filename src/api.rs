// API client module: a small blocking HTTP client that performs the one
// upload exchange with the analysis backend. One call, one multipart POST,
// one well-defined outcome; no retries, no timeout, no state across calls.

use crate::error::UploadError;
use crate::models::AnalysisReport;
use log::debug;
use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use std::path::Path;

/// Client for the analysis backend. Holds a reqwest blocking client and
/// the backend base URL; cloning it is cheap and clones share nothing
/// mutable, so concurrent uploads from separate threads are independent.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Success envelope from `POST /upload/`. The backend's canonical shape is
/// a top-level `file_url` (variant A); older call sites instead receive the
/// analysis payload nested under `result` (variant B). Both are modeled so
/// neither is silently dropped. See DESIGN.md for the divergence note.
#[derive(Deserialize, Debug)]
struct UploadResponse {
    file_url: Option<String>,
    result: Option<AnalysisReport>,
}

/// Error envelope for non-2xx responses.
#[derive(Deserialize, Debug)]
struct ErrorResponse {
    detail: Option<String>,
}

/// Resolved outcome of one upload: where the artifact landed, plus the
/// analysis report when the server returned one inline.
#[derive(Debug)]
pub struct UploadOutcome {
    pub file_url: String,
    pub report: Option<AnalysisReport>,
}

impl ApiClient {
    /// Create a client against an explicit base URL (tests point this at a
    /// mock server).
    pub fn new(base_url: impl Into<String>) -> Result<Self, UploadError> {
        let client = Client::builder()
            .build()
            .map_err(UploadError::Transport)?;
        Ok(ApiClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client configured from the environment variable
    /// `QAVISION_API_URL`, falling back to `http://localhost:8000`.
    pub fn from_env() -> Result<Self, UploadError> {
        let base_url = std::env::var("QAVISION_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload one test-recording video and wait for the backend's answer.
    ///
    /// Validates the file locally first (exists, non-empty, `video/*`
    /// type); a validation failure never touches the network. On success
    /// returns the artifact URL the server reported, plus the inline
    /// analysis report when one was present.
    pub fn upload_video(&self, path: &Path) -> Result<UploadOutcome, UploadError> {
        let (file_name, mime) = validate_video(path)?;
        let data = std::fs::read(path)
            .map_err(|e| UploadError::Validation(format!("cannot read {}: {}", path.display(), e)))?;
        if data.is_empty() {
            return Err(UploadError::Validation(format!(
                "{} is empty",
                path.display()
            )));
        }

        let url = format!("{}/upload/", &self.base_url);
        debug!("POST {} ({}, {} bytes, {})", url, file_name, data.len(), mime);

        // One part, field name `file`, raw bytes with the original
        // filename and detected MIME type preserved.
        let part = multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(&mime)
            .map_err(|e| UploadError::Validation(format!("invalid MIME type {}: {}", mime, e)))?;
        let form = multipart::Form::new().part("file", part);

        let res = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(UploadError::Transport)?;

        let status = res.status();
        debug!("upload response: HTTP {}", status);
        if !status.is_success() {
            let message = res
                .text()
                .ok()
                .and_then(|txt| serde_json::from_str::<ErrorResponse>(&txt).ok())
                .and_then(|body| body.detail)
                .unwrap_or_else(|| "upload failed".into());
            return Err(UploadError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = res
            .json()
            .map_err(|e| UploadError::Protocol(format!("body is not valid JSON: {}", e)))?;
        resolve_outcome(body)
    }
}

/// Client-side checks from the upload contract: the file must exist and its
/// extension must map to a `video/*` MIME type. Returns the filename and
/// MIME string to put on the multipart part.
fn validate_video(path: &Path) -> Result<(String, String), UploadError> {
    if !path.is_file() {
        return Err(UploadError::Validation(format!(
            "{} is not a readable file",
            path.display()
        )));
    }
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("video.mp4")
        .to_string();
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::VIDEO {
        return Err(UploadError::Validation(format!(
            "{} does not look like a video (detected type {})",
            file_name, mime
        )));
    }
    Ok((file_name, mime.essence_str().to_string()))
}

/// Pick the artifact URL out of a parsed success body: `file_url` is
/// canonical, `result.video_url` is the accepted fallback. A body with
/// neither is a protocol violation.
fn resolve_outcome(body: UploadResponse) -> Result<UploadOutcome, UploadError> {
    if let Some(file_url) = body.file_url {
        return Ok(UploadOutcome {
            file_url,
            report: body.result,
        });
    }
    if let Some(report) = body.result {
        if let Some(file_url) = report.video_url.clone() {
            return Ok(UploadOutcome {
                file_url,
                report: Some(report),
            });
        }
    }
    Err(UploadError::Protocol(
        "response carried neither `file_url` nor `result.video_url`".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn validate_rejects_missing_file() {
        let err = validate_video(Path::new("/no/such/recording.mp4")).unwrap_err();
        assert!(matches!(err, UploadError::Validation(_)));
    }

    #[test]
    fn validate_rejects_non_video_extension() {
        let mut f = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        f.write_all(b"not a video").unwrap();
        let err = validate_video(f.path()).unwrap_err();
        assert!(matches!(err, UploadError::Validation(_)));
    }

    #[test]
    fn validate_accepts_mp4_and_detects_mime() {
        let mut f = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        f.write_all(b"\x00fake mp4 bytes").unwrap();
        let (name, mime) = validate_video(f.path()).unwrap();
        assert!(name.ends_with(".mp4"));
        assert_eq!(mime, "video/mp4");
    }

    #[test]
    fn empty_file_fails_validation_without_a_request() {
        let f = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        // Base URL points nowhere; an attempted request would surface as
        // Transport, so Validation proves the network was never touched.
        let api = ApiClient::new("http://127.0.0.1:1").unwrap();
        let err = api.upload_video(f.path()).unwrap_err();
        assert!(matches!(err, UploadError::Validation(_)));
    }

    #[test]
    fn resolve_prefers_canonical_file_url() {
        let body: UploadResponse = serde_json::from_str(
            r#"{"file_url": "https://x/y.mp4", "result": {"video_url": "https://other/z.mp4"}}"#,
        )
        .unwrap();
        let outcome = resolve_outcome(body).unwrap();
        assert_eq!(outcome.file_url, "https://x/y.mp4");
        assert!(outcome.report.is_some());
    }

    #[test]
    fn resolve_falls_back_to_result_video_url() {
        let body: UploadResponse =
            serde_json::from_str(r#"{"result": {"video_url": "https://x/y.mp4"}}"#).unwrap();
        let outcome = resolve_outcome(body).unwrap();
        assert_eq!(outcome.file_url, "https://x/y.mp4");
    }

    #[test]
    fn resolve_flags_missing_url_as_protocol_error() {
        let body: UploadResponse =
            serde_json::from_str(r#"{"message": "Upload successful"}"#).unwrap();
        let err = resolve_outcome(body).unwrap_err();
        assert!(matches!(err, UploadError::Protocol(_)));
    }
}
