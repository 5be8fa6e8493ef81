//! Common types and helpers shared across the scan and dispatch stages.

use std::fmt;
use std::path::PathBuf;

/// One candidate image file, captured with the byte length observed at
/// discovery time. Never mutated after creation; the size may be stale by
/// the time the dispatcher re-checks it, and that is tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

impl fmt::Display for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>16} - {}",
            format_file_size(self.size),
            self.path.display()
        )
    }
}

/// A depth-3 directory whose subtree has not been scanned yet. Produced by
/// the top-level splitter, consumed exactly once by the deferred processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTask {
    pub path: PathBuf,
}

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human-readable file size with up to two decimal places (e.g. "2.5 MB").
pub fn format_file_size(file_size: u64) -> String {
    let mut len = file_size as f64;
    let mut order = 0;
    while len >= 1024.0 && order < SIZE_UNITS.len() - 1 {
        order += 1;
        len /= 1024.0;
    }
    let s = format!("{:.2}", len);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", s, SIZE_UNITS[order])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn file_entry_display_includes_path() {
        let entry = FileEntry {
            path: PathBuf::from("/tmp/a.png"),
            size: 1024,
        };
        let rendered = entry.to_string();
        assert!(rendered.contains("1 KB"));
        assert!(rendered.ends_with("/tmp/a.png"));
    }
}
