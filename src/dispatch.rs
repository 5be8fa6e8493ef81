//! Parallel resize dispatch over the sorted worklist.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::common::FileEntry;
use crate::logq::LogQueue;
use crate::partition;

/// Parameters for one dispatch run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Resize percentage handed to the external tool (1-100).
    pub percentage: u32,
    /// Files at or below this many bytes are skipped.
    pub min_size: u64,
    /// Name or path of the external resize tool.
    pub tool: String,
}

/// Per-run dispatch counters, aggregated with relaxed atomics across
/// partitions.
#[derive(Default)]
struct Counters {
    attempted: AtomicU64,
    resized: AtomicU64,
    skipped_missing: AtomicU64,
    skipped_small: AtomicU64,
    failed: AtomicU64,
}

/// Snapshot of the counters after every partition has joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub attempted: u64,
    pub resized: u64,
    pub skipped_missing: u64,
    pub skipped_small: u64,
    pub failed: u64,
}

impl Counters {
    fn snapshot(&self) -> Outcome {
        Outcome {
            attempted: self.attempted.load(Ordering::Relaxed),
            resized: self.resized.load(Ordering::Relaxed),
            skipped_missing: self.skipped_missing.load(Ordering::Relaxed),
            skipped_small: self.skipped_small.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Partition the worklist into at most 16 contiguous ranges and resize each
/// range's entries in parallel. Per-entry failures are logged as warnings
/// and never abort the partition or the run; an entry gets at most one
/// resize attempt.
pub fn run(worklist: &[FileEntry], opts: &Options, log: &LogQueue) -> Outcome {
    let ranges = partition::ranges(worklist.len());
    log.enqueue(format!(
        "[dispatch] {} files across {} partitions, percentage: {}, minSize: {}",
        worklist.len(),
        ranges.len(),
        opts.percentage,
        opts.min_size
    ));

    let counters = Counters::default();
    ranges.into_par_iter().for_each(|range| {
        for entry in &worklist[range] {
            resize_one(entry, opts, &counters, log);
        }
    });

    let outcome = counters.snapshot();
    log.enqueue(format!(
        "[dispatch] done: {} resized, {} failed, {} skipped (missing), {} skipped (small)",
        outcome.resized, outcome.failed, outcome.skipped_missing, outcome.skipped_small
    ));
    outcome
}

/// Re-check the file, then invoke the tool once as `tool <path> -resize
/// <pct>% <path>` with stdout captured, blocking until it exits. Launch
/// failures and non-zero exits are warnings only.
fn resize_one(entry: &FileEntry, opts: &Options, counters: &Counters, log: &LogQueue) {
    let current = match fs::metadata(&entry.path) {
        Ok(meta) => meta.len(),
        Err(_) => {
            counters.skipped_missing.fetch_add(1, Ordering::Relaxed);
            return;
        }
    };
    if current <= opts.min_size {
        counters.skipped_small.fetch_add(1, Ordering::Relaxed);
        return;
    }

    counters.attempted.fetch_add(1, Ordering::Relaxed);
    log.enqueue(format!(
        "[dispatch] cmd: {} {} -resize {}% {}",
        opts.tool,
        entry.path.display(),
        opts.percentage,
        entry.path.display()
    ));

    match invoke_tool(&opts.tool, &entry.path, opts.percentage) {
        Ok(InvocationStatus::Success) => {
            counters.resized.fetch_add(1, Ordering::Relaxed);
        }
        Ok(InvocationStatus::NonZeroExit(code)) => {
            counters.failed.fetch_add(1, Ordering::Relaxed);
            log.enqueue(format!(
                "[dispatch] Warning: {} exited with {} for {}",
                opts.tool,
                code,
                entry.path.display()
            ));
        }
        Err(e) => {
            counters.failed.fetch_add(1, Ordering::Relaxed);
            log.enqueue(format!(
                "[dispatch] Warning: failed to launch {}: {e}",
                opts.tool
            ));
        }
    }
}

enum InvocationStatus {
    Success,
    NonZeroExit(String),
}

/// Direct argument-vector invocation; no shell interpreter, so paths with
/// spaces or quotes need no escaping.
fn invoke_tool(tool: &str, path: &Path, percentage: u32) -> std::io::Result<InvocationStatus> {
    let output = Command::new(tool)
        .arg(path)
        .arg("-resize")
        .arg(format!("{percentage}%"))
        .arg(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;
    if output.status.success() {
        Ok(InvocationStatus::Success)
    } else {
        let code = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        Ok(InvocationStatus::NonZeroExit(code))
    }
}
