// UI layer: a simple interactive menu using `dialoguer`. The upload flow
// runs the blocking API call on a worker thread so the spinner keeps
// ticking while the request is in flight.

use crate::api::{ApiClient, UploadOutcome};
use crate::history::{append_history, load_history, HistoryEntry};
use crate::models::TestCase;
use anyhow::Result;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use std::path::PathBuf;
use std::time::Duration;

/// Main interactive menu. Runs a select loop until the user chooses
/// "Exit". Every upload error renders as one printed line and returns to
/// the menu; nothing here aborts the loop.
pub fn main_menu(api: ApiClient) -> Result<()> {
    println!("QA Vision: test video analysis (backend: {})", api.base_url());
    loop {
        let items = vec!["Upload test video", "View upload history", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_upload(&api)?,
            1 => show_history(),
            2 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Prompt for a video path, upload it, and display the outcome.
fn handle_upload(api: &ApiClient) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Video file path (mp4/mov)")
        .interact_text()?;
    let path = PathBuf::from(path);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Uploading and analyzing...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    // The upload blocks until the server answers; run it off-thread so
    // the spinner stays alive.
    let worker_api = api.clone();
    let worker_path = path.clone();
    let handle = std::thread::spawn(move || worker_api.upload_video(&worker_path));
    let result = match handle.join() {
        Ok(result) => result,
        Err(_) => {
            spinner.finish_and_clear();
            println!("Upload failed: worker thread panicked");
            return Ok(());
        }
    };
    spinner.finish_and_clear();

    match result {
        Ok(outcome) => {
            show_outcome(&outcome);
            record_upload(&path, &outcome);
        }
        // Client-side failures never reached the server; say so, since
        // "check the file" and "check the backend" are different advice.
        Err(e) if e.is_client_side() => println!("Upload not sent: {}", e),
        Err(e) => println!("Upload failed: {}", e),
    }
    Ok(())
}

fn show_outcome(outcome: &UploadOutcome) {
    println!("Upload successful: {}", outcome.file_url);
    if let Some(report) = &outcome.report {
        if let Some(status) = &report.status {
            println!("Analysis status: {}", status);
        }
        if let Some(error) = &report.error {
            println!("Analysis error: {}", error);
        }
        if let Some(test_case) = &report.test_case {
            show_test_case(test_case);
        }
    }
}

/// Print the extracted test case: name, numbered steps, then bugs.
fn show_test_case(tc: &TestCase) {
    println!("\nExtracted test case: {}", tc.test_name);
    if let Some(app_url) = &tc.app_url {
        println!("  App under test: {}", app_url);
    }
    for step in &tc.steps {
        match &step.expected_result {
            Some(expected) => {
                println!("  {}. {} -> {}", step.step_number, step.action, expected)
            }
            None => println!("  {}. {}", step.step_number, step.action),
        }
    }
    for bug in &tc.bugs {
        let severity = bug.severity.as_deref().unwrap_or("unspecified");
        println!("  BUG [{}]: {}", severity, bug.description);
    }
}

fn record_upload(path: &PathBuf, outcome: &UploadOutcome) {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("video")
        .to_string();
    if let Err(e) = append_history(HistoryEntry::new(file_name, outcome.file_url.clone())) {
        warn!("could not record upload in history: {}", e);
    }
}

/// List past uploads recorded locally, newest first.
fn show_history() {
    let mut entries = load_history();
    if entries.is_empty() {
        println!("No uploads recorded yet.");
        return;
    }
    entries.reverse();
    for entry in entries {
        println!(
            "{}  {}  {}",
            entry.uploaded_at.format("%Y-%m-%d %H:%M"),
            entry.file_name,
            entry.file_url
        );
    }
}
