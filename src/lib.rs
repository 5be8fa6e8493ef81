//! # shrinkray Core Library
//!
//! This crate provides the core functionality for the `shrinkray` batch
//! image resizer: a three-level breadth-limited directory walk that splits
//! discovery between eager shallow scans and deferred depth-3 subtree
//! scans, a deterministic sorted worklist, and range-partitioned parallel
//! dispatch of an external resize tool.
//!
//! ## Key Modules
//!
//! - [`scan`]: The discovery engine (extension filter, batch collector,
//!   top-level splitter, deferred processor, worklist materializer).
//! - [`partition`]: Fixed-count contiguous range partitioning.
//! - [`dispatch`]: Parallel in-place resize via the external tool.
//! - [`logq`]: The non-blocking log queue drained by a background thread.

pub mod cli;
pub mod common;
pub mod dispatch;
pub mod error;
pub use error::ResizeError;

pub mod logq;
pub mod partition;
pub mod scan;

use crossbeam_channel::unbounded;

use crate::cli::Args;
use crate::common::{DirectoryTask, FileEntry};
use crate::logq::LogQueue;

/// Run the full discovery phase for `root` and return the sorted worklist.
///
/// Creates fresh run-scoped sinks, walks the top three levels eagerly,
/// drains the deferred depth-3 directories, and materializes the result.
/// Each phase's fan-out joins before the next phase drains, so no entry is
/// lost to a producer racing a consumer.
pub fn discover(root: &std::path::Path, debug: bool, log: &LogQueue) -> Vec<FileEntry> {
    let (file_tx, file_rx) = unbounded::<FileEntry>();
    let (dir_tx, dir_rx) = unbounded::<DirectoryTask>();

    scan::split_top_level(root, &file_tx, &dir_tx, log);
    drop(dir_tx); // splitter joined; no more DirectoryTask producers

    scan::deferred::process(dir_rx, &file_tx, log);
    drop(file_tx); // discovery complete; no more FileEntry producers

    scan::materialize(file_rx, debug, log)
}

/// Resize every qualifying image under `args.folder`, in place, in
/// parallel. Only an invalid root folder is fatal; every later problem is
/// logged per item and the run completes regardless.
pub fn run(args: Args) -> Result<(), ResizeError> {
    if args.folder.as_os_str().is_empty() || !args.folder.is_dir() {
        return Err(ResizeError::InvalidRoot(args.folder));
    }

    let log = LogQueue::start();
    log.enqueue(format!(
        "[run] START folder: {}, percentage: {}, minSize: {}MB",
        args.folder.display(),
        args.perc,
        args.min_size / (1024 * 1024)
    ));

    let worklist = discover(&args.folder, args.debug, &log);
    log.enqueue(format!("[run] worklist: {} files", worklist.len()));

    let opts = dispatch::Options {
        percentage: args.perc,
        min_size: args.min_size,
        tool: args.tool,
    };
    dispatch::run(&worklist, &opts, &log);

    log.enqueue(format!("[run] worklist: {} files DONE!!!", worklist.len()));
    log.shutdown();
    Ok(())
}
