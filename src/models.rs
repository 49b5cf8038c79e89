// Response models: typed shapes for the JSON the analysis backend returns.
// Every analysis field is optional because the backend fills the report in
// stages (a fresh upload usually only has `video_url` and `status`).

use serde::{Deserialize, Serialize};

/// One step of a test case extracted from the video.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TestStep {
    pub step_number: u32,
    pub action: String,
    pub expected_result: Option<String>,
    pub timestamp: Option<String>,
    pub ui_element: Option<String>,
}

/// A bug the analysis spotted while replaying the recording.
/// Severity is free-form on the wire ("High" / "Medium" / "Low").
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BugReport {
    pub description: String,
    pub timestamp: Option<String>,
    pub severity: Option<String>,
}

/// A test case extracted from the uploaded session recording.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TestCase {
    pub test_name: String,
    pub app_url: Option<String>,
    pub steps: Vec<TestStep>,
    #[serde(default)]
    pub bugs: Vec<BugReport>,
}

/// The analysis payload the backend may return inline with an upload.
/// `status` is one of "processing", "completed" or "failed"; `error` is
/// set when `status` is "failed".
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalysisReport {
    pub id: Option<String>,
    pub video_url: Option<String>,
    pub status: Option<String>,
    pub test_case: Option<TestCase>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_parses_with_only_video_url() {
        let report: AnalysisReport =
            serde_json::from_str(r#"{"video_url": "https://x/y.mp4", "status": "processing"}"#)
                .unwrap();
        assert_eq!(report.video_url.as_deref(), Some("https://x/y.mp4"));
        assert_eq!(report.status.as_deref(), Some("processing"));
        assert!(report.test_case.is_none());
    }

    #[test]
    fn test_case_defaults_empty_bugs() {
        let tc: TestCase = serde_json::from_str(
            r#"{"test_name": "login flow", "steps": [
                {"step_number": 1, "action": "open login page"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(tc.test_name, "login flow");
        assert_eq!(tc.steps.len(), 1);
        assert!(tc.bugs.is_empty());
    }

    #[test]
    fn report_ignores_unknown_fields() {
        // The backend also sends transcript and frame-analysis blocks the
        // CLI does not render; they must not break deserialization.
        let report: AnalysisReport = serde_json::from_str(
            r#"{"video_url": "https://x/y.mp4", "transcript": {"full_text": "hi", "segments": []}}"#,
        )
        .unwrap();
        assert_eq!(report.video_url.as_deref(), Some("https://x/y.mp4"));
    }
}
