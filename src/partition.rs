//! Fixed-count range partitioning of a worklist.

use std::ops::Range;

/// Upper bound on concurrent partitions for both the deferred directory
/// scan and the resize dispatch.
pub const MAX_PARTITIONS: usize = 16;

/// Split `[0, len)` into `min(16, len)` contiguous, non-overlapping ranges.
/// Every range holds `len / p` indices except the last, which absorbs the
/// remainder. An empty input produces no ranges.
pub fn ranges(len: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let parts = MAX_PARTITIONS.min(len);
    let chunk = len / parts;
    let mut out = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let end = if i == parts - 1 { len } else { start + chunk };
        out.push(start..end);
        start = end;
    }
    out
}
