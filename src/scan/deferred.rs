//! Deferred batch processor for depth-3 subtrees.

use std::fs;
use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, Sender};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::common::{DirectoryTask, FileEntry};
use crate::logq::LogQueue;
use crate::partition;
use crate::scan::is_image;

/// Drain every [`DirectoryTask`], sort the directories for a deterministic
/// processing order, and scan each partition's subtrees in parallel. Every
/// file at any depth beneath a task directory goes through the extension
/// filter; qualifying entries land in the shared file sink.
///
/// All task production must have finished before this is called; the caller
/// passes the receiver by value after dropping its senders.
pub fn process(tasks: Receiver<DirectoryTask>, files: &Sender<FileEntry>, log: &LogQueue) {
    let mut dirs: Vec<PathBuf> = tasks.try_iter().map(|task| task.path).collect();
    log.enqueue(format!("[deferred] depth-3 directories: {}", dirs.len()));
    if dirs.is_empty() {
        return;
    }
    dirs.sort();

    let ranges = partition::ranges(dirs.len());
    log.enqueue(format!(
        "[deferred] scanning {} directories across {} partitions",
        dirs.len(),
        ranges.len()
    ));

    ranges.into_par_iter().for_each(|range| {
        for dir in &dirs[range] {
            scan_subtree(dir, files, log);
        }
    });
}

/// Recursively enumerate one subtree, skipping inaccessible paths, and fan
/// per-file metadata reads out across the pool.
fn scan_subtree(dir: &Path, files: &Sender<FileEntry>, log: &LogQueue) {
    let found: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log.enqueue(format!("[deferred] Warning: {e}"));
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_image(path))
        .collect();

    found.par_iter().for_each(|path| match fs::metadata(path) {
        Ok(meta) => {
            let entry = FileEntry { path: path.clone(), size: meta.len() };
            let _ = files.send(entry);
        }
        Err(e) => {
            log.enqueue(format!(
                "[deferred] Warning: cannot stat {}: {e}",
                path.display()
            ));
        }
    });
}
