//! Upload command - send local files into a project with live progress.

use std::path::PathBuf;

use docsign::upload::{DocItem, UploadManager, UploadStatus, UploadTarget};
use docsign::FileHandle;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the upload command.
pub struct UploadArgs {
    pub project_id: i64,
    pub files: Vec<PathBuf>,
    pub description: String,
}

/// Run the upload command.
pub async fn run(args: UploadArgs, runner: &CliRunner) -> Result<(), CliError> {
    let mut handles = Vec::with_capacity(args.files.len());
    for path in &args.files {
        handles.push(FileHandle::from_path(path).await?);
    }
    let selected = handles.len();

    let manager = UploadManager::new(runner.http().clone());
    let mut items = manager.add_files(&[], handles).into_owned();
    if items.len() < selected {
        println!(
            "Skipping {} file(s) with duplicate names",
            selected - items.len()
        );
    }
    if items.is_empty() {
        println!("Nothing to upload");
        return Ok(());
    }

    let multi = MultiProgress::new();
    let style = ProgressStyle::with_template("{prefix:30!} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let bars: Vec<ProgressBar> = items
        .iter()
        .map(|item| {
            let bar = multi.add(ProgressBar::new(100));
            bar.set_style(style.clone());
            bar.set_prefix(item.name.clone());
            bar.set_message(status_message(item));
            bar
        })
        .collect();

    let target = UploadTarget::project_files(args.project_id, args.description);
    let summary = manager
        .upload_all(&mut items, &target, |all| {
            for (item, bar) in all.iter().zip(&bars) {
                bar.set_position(u64::from(item.progress));
                bar.set_message(status_message(item));
            }
        })
        .await;

    for bar in &bars {
        bar.finish();
    }

    println!();
    println!(
        "Uploaded {} of {} file(s) to project {}",
        summary.succeeded, summary.attempted, args.project_id
    );
    for item in items.iter().filter(|d| d.status == UploadStatus::Error) {
        println!("  {}: {}", item.name, item.error.as_deref().unwrap_or(""));
    }

    if summary.failed > 0 {
        return Err(CliError::UploadsFailed {
            failed: summary.failed,
            attempted: summary.attempted,
        });
    }
    Ok(())
}

/// Short status text shown next to an item's progress bar.
fn status_message(item: &DocItem) -> String {
    match (item.status, item.error.as_deref()) {
        (UploadStatus::Error, Some(error)) => format!("failed: {}", error),
        (status, _) => status.to_string(),
    }
}
