//! Discovery engine: a three-level breadth-limited tree walk.
//!
//! Levels 0-2 below the root are scanned eagerly, with the batch collector
//! picking up each folder's immediate files. Depth-3 directories are never
//! recursed here; they are enqueued as [`DirectoryTask`]s for the deferred
//! processor, which fans their whole subtrees out across partitions.
//!
//! Phase barriers are structural: every parallel fan-out in this module is
//! a rayon iterator, so returning from a function means all of its branch
//! work has joined. Consumers drain the channels only after the producing
//! function has returned and all senders are dropped.

pub mod deferred;

use std::fs;
use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, Sender};
use rayon::prelude::*;

use crate::common::{DirectoryTask, FileEntry};
use crate::logq::LogQueue;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "tga", "exr", "jpg", "bmp"];

/// True iff the path's lowercase extension is on the image allow-list.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Batch collector: scan one folder's immediate files (no recursion) and
/// append every image entry with its byte length to the shared sink.
///
/// A listing failure skips the folder; a metadata failure skips that file.
/// Neither aborts siblings.
pub fn collect_folder(dir: &Path, files: &Sender<FileEntry>, log: &LogQueue) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log.enqueue(format!("[scan] Warning: cannot list {}: {e}", dir.display()));
            return;
        }
    };
    let candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_image(path))
        .collect();

    candidates.par_iter().for_each(|path| match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {
            let entry = FileEntry { path: path.clone(), size: meta.len() };
            let _ = files.send(entry);
        }
        Ok(_) => {} // a directory named like an image
        Err(e) => {
            log.enqueue(format!("[scan] Warning: cannot stat {}: {e}", path.display()));
        }
    });
}

/// Top-level splitter: eagerly collect files at depths 0-2 and enqueue each
/// depth-3 directory as a deferred task without scanning its contents.
pub fn split_top_level(
    root: &Path,
    files: &Sender<FileEntry>,
    dirs: &Sender<DirectoryTask>,
    log: &LogQueue,
) {
    collect_folder(root, files, log);

    let level1 = list_subdirs(root, log);
    level1.par_iter().for_each(|d1| {
        collect_folder(d1, files, log);
        let level2 = list_subdirs(d1, log);
        level2.par_iter().for_each(|d2| {
            collect_folder(d2, files, log);
            let level3 = list_subdirs(d2, log);
            level3.into_par_iter().for_each(|d3| {
                let _ = dirs.send(DirectoryTask { path: d3 });
            });
        });
    });
}

/// Worklist materializer: drain every discovered entry and sort by path.
/// Discovery must be complete before this runs; the caller enforces that by
/// dropping all senders first.
pub fn materialize(files: Receiver<FileEntry>, debug: bool, log: &LogQueue) -> Vec<FileEntry> {
    let mut worklist: Vec<FileEntry> = files.try_iter().collect();
    worklist.sort_by(|a, b| a.path.cmp(&b.path));
    if debug {
        for entry in &worklist {
            log.enqueue(format!("[scan] file: {entry}"));
        }
    }
    worklist
}

/// Immediate subdirectories of `dir`. Listing failures are logged and yield
/// an empty set so that sibling branches proceed.
fn list_subdirs(dir: &Path, log: &LogQueue) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log.enqueue(format!("[scan] Warning: cannot list {}: {e}", dir.display()));
            return Vec::new();
        }
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_type()
                .map(|ft| ft.is_dir())
                .unwrap_or(false)
        })
        .map(|entry| entry.path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allow_listed_extensions() {
        for name in ["a.png", "b.tga", "c.exr", "d.jpg", "e.bmp"] {
            assert!(is_image(Path::new(name)), "{name} should be accepted");
        }
    }

    #[test]
    fn filter_is_case_insensitive() {
        assert!(is_image(Path::new("IMG.PNG")));
        assert!(is_image(Path::new("photo.Jpg")));
        assert!(is_image(Path::new("render.ExR")));
    }

    #[test]
    fn rejects_other_suffixes() {
        for name in ["notes.txt", "archive.tar.gz", "movie.jpeg", "raw.cr2"] {
            assert!(!is_image(Path::new(name)), "{name} should be rejected");
        }
    }

    #[test]
    fn rejects_paths_without_extension() {
        assert!(!is_image(Path::new("png")));
        assert!(!is_image(Path::new("/tmp/folder")));
        assert!(!is_image(Path::new(".png")));
    }
}
