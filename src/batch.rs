use crate::pipeline;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{info, warn};
use walkdir::WalkDir;

pub const EPUB_SUFFIX: &str = ".epub";

/// Find `.epub` files under `dir`. Without `recursive` only direct children
/// are considered. Symlinks to files are kept; symlinked directories are not
/// descended into.
pub fn discover(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable path");
                continue;
            }
        };
        let is_epub = entry.file_name().to_string_lossy().ends_with(EPUB_SUFFIX);
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && is_epub {
            files.push(entry.into_path());
        }
    }
    files
}

/// How one file fared.
#[derive(Debug)]
pub enum Outcome {
    Extracted { images: usize, deleted: Option<bool> },
    Failed,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub failed_files: Vec<PathBuf>,
    pub deleted: usize,
    pub delete_failed: usize,
    pub images: usize,
}

impl BatchSummary {
    fn record(&mut self, file: &Path, outcome: &Outcome) {
        match outcome {
            Outcome::Extracted { images, deleted } => {
                self.succeeded += 1;
                self.images += images;
                match deleted {
                    Some(true) => self.deleted += 1,
                    Some(false) => self.delete_failed += 1,
                    None => {}
                }
            }
            Outcome::Failed => {
                self.failed += 1;
                self.failed_files.push(file.to_path_buf());
            }
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} files: {} succeeded, {} failed ({} images)",
            self.succeeded + self.failed,
            self.succeeded,
            self.failed,
            self.images
        )?;
        if self.deleted > 0 || self.delete_failed > 0 {
            write!(
                f,
                ", {} originals deleted, {} could not be deleted",
                self.deleted, self.delete_failed
            )?;
        }
        Ok(())
    }
}

/// Process every file concurrently and wait for all of them.
///
/// Each file runs on its own blocking task with its own archive handles;
/// a failure or panic in one never reaches the others.
pub async fn run(files: Vec<PathBuf>, delete_original: bool) -> BatchSummary {
    run_with(files, move |file| process_file(file, delete_original)).await
}

async fn run_with<F>(files: Vec<PathBuf>, worker: F) -> BatchSummary
where
    F: Fn(&Path) -> Outcome + Clone + Send + 'static,
{
    let mut tasks = JoinSet::new();
    let mut pending = HashMap::with_capacity(files.len());
    for file in files {
        let worker = worker.clone();
        let task_file = file.clone();
        let handle = tasks.spawn_blocking(move || worker(&task_file));
        pending.insert(handle.id(), file);
    }

    let mut summary = BatchSummary::default();
    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((id, outcome)) => {
                if let Some(file) = pending.remove(&id) {
                    summary.record(&file, &outcome);
                }
            }
            Err(e) => {
                let file = pending.remove(&e.id()).unwrap_or_default();
                println!("Error processing file {}: task failed: {e}", file.display());
                summary.record(&file, &Outcome::Failed);
            }
        }
    }
    summary
}

fn process_file(file: &Path, delete_original: bool) -> Outcome {
    info!(file = %file.display(), "processing file");

    let extraction = match pipeline::extract_images(file) {
        Ok(extraction) => extraction,
        Err(e) => {
            println!(
                "Error processing file {}: {} error: {}",
                file.display(),
                e.stage(),
                e
            );
            return Outcome::Failed;
        }
    };

    println!(
        "Extracted {} images from {} to {}",
        extraction.images,
        file.display(),
        extraction.output.display()
    );

    let deleted = delete_original.then(|| match fs::remove_file(file) {
        Ok(()) => {
            println!("Deleted original file {}", file.display());
            true
        }
        Err(e) => {
            println!("Error deleting original file {}: {}", file.display(), e);
            false
        }
    });

    Outcome::Extracted {
        images: extraction.images,
        deleted,
    }
}
