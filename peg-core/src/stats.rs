//! Search statistics tracking.

use std::time::{Duration, Instant};

use tracing::{debug, info};

/// Resident memory of the process in bytes, if the platform reports it.
///
/// macOS only exposes the peak through `getrusage`, so that is what it
/// reports there.
#[cfg(target_os = "macos")]
pub fn get_memory_usage() -> Option<u64> {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::uninit();
    // SAFETY: getrusage fills the struct on success.
    let usage = unsafe {
        if libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) != 0 {
            return None;
        }
        usage.assume_init()
    };
    u64::try_from(usage.ru_maxrss).ok()
}

#[cfg(target_os = "linux")]
pub fn get_memory_usage() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kb * 1024)
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub fn get_memory_usage() -> Option<u64> {
    None
}

/// Format a byte count with a binary unit, e.g. `1.5 MB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    let precision = if unit == UNITS.len() - 1 { 2 } else { 1 };
    format!("{:.*} {}", precision, value, UNITS[unit])
}

/// Counters collected by one search session.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Boards whose reverse moves were enumerated
    pub expanded: u64,

    /// Reverse moves that passed the legality test
    pub reverse_moves: u64,

    /// Reverse moves skipped because the resulting board was already visited
    pub revisits: u64,

    /// Deepest recursion level reached (0 = goal board, at most 31)
    pub max_depth: u32,

    /// Size of the visited set when the search ended
    pub visited: usize,

    start_time: Option<Instant>,
    elapsed: Option<Duration>,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.elapsed = None;
    }

    pub(crate) fn finish(&mut self, visited: usize) {
        self.visited = visited;
        self.elapsed = self.start_time.map(|s| s.elapsed());
    }

    /// Wall-clock time of the search, or time so far if still running.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
            .or_else(|| self.start_time.map(|s| s.elapsed()))
            .unwrap_or_default()
    }

    /// Expanded boards per second
    pub fn expansions_per_sec(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.expanded as f64 / secs
        } else {
            0.0
        }
    }

    pub(crate) fn log_progress(&self, visited: usize, depth: u32) {
        let mem = get_memory_usage()
            .map(format_bytes)
            .unwrap_or_else(|| "n/a".to_string());
        debug!(
            expanded = self.expanded,
            visited,
            revisits = self.revisits,
            depth,
            max_depth = self.max_depth,
            rate = %format!("{:.0}/s", self.expansions_per_sec()),
            %mem,
            "search progress"
        );
    }

    /// Log a one-line summary at info level.
    pub fn log_summary(&self) {
        info!(
            expanded = self.expanded,
            reverse_moves = self.reverse_moves,
            revisits = self.revisits,
            visited = self.visited,
            max_depth = self.max_depth,
            elapsed = %format!("{:.3}s", self.elapsed().as_secs_f64()),
            rate = %format!("{:.0}/s", self.expansions_per_sec()),
            "search finished"
        );
    }
}
