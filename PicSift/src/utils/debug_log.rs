//! Rejection log for diagnosing why files are missing from the gallery
//!
//! Rejected files are silently dropped by default. Setting
//! `PICSIFT_DEBUG_LOG_PATH` turns on a plain-text log of every rejection,
//! appended to the named file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const DEBUG_LOG_VAR: &str = "PICSIFT_DEBUG_LOG_PATH";

/// Global mutex to serialize log writes
static LOG_MUTEX: Mutex<()> = Mutex::new(());

fn debug_log_path() -> Option<PathBuf> {
    std::env::var_os(DEBUG_LOG_VAR)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Log a debug message to file with timestamp
///
/// Does nothing unless the log path is configured. Safe to call from any
/// thread; errors are silently ignored so logging never affects
/// classification.
pub fn debug_log(msg: &str) {
    let Some(path) = debug_log_path() else {
        return;
    };
    write_line(&path, msg);
}

fn write_line(path: &Path, msg: &str) {
    let Ok(_guard) = LOG_MUTEX.lock() else {
        return;
    };

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let _ = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| {
            use std::time::SystemTime;

            let timestamp = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);

            writeln!(f, "[{}] {}", timestamp, msg)
        });
}

/// Record a file the classifier turned down
pub fn log_rejection(path: &str, size: u64) {
    debug_log(&format!("[REJECTED] {} ({} bytes)", path, size));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_line_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("rejections.log");

        write_line(&path, "first");
        write_line(&path, "second");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("first"));
        assert!(contents.lines().last().unwrap().ends_with("second"));
    }

    #[test]
    fn test_write_line_concurrent() {
        use std::thread;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("concurrent.log");

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let path = path.clone();
                thread::spawn(move || write_line(&path, &format!("Thread {} message", i)))
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let matching_lines = contents
            .lines()
            .filter(|line| line.contains("Thread") && line.contains("message"))
            .count();
        assert_eq!(matching_lines, 10);
    }
}
