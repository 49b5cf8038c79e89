// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive tool.
//
// Module responsibilities:
// - `api`: the upload client — one multipart POST to the analysis
//   backend per call, resolving to a typed outcome or error.
// - `models`: serde shapes for the analysis payload the backend returns.
// - `error`: the upload error taxonomy (validation / transport / server /
//   protocol).
// - `history`: local record of past uploads in the user's home directory.
// - `ui`: the terminal menu flows, delegating requests to `api`.
//
// Keeping this separation lets the integration tests drive `api` against
// a mock server without touching the UI.
pub mod api;
pub mod error;
pub mod history;
pub mod models;
pub mod ui;
