//! Log File Integration Tests
//!
//! Installs the global subscriber, so this binary holds a single test.

use distillery::logging;
use tempfile::TempDir;

#[test]
fn test_init_writes_run_log() {
    let temp = TempDir::new().unwrap();
    let log_dir = temp.path().join("logs");

    let log_path = logging::init(&log_dir).unwrap();

    tracing::info!(target: "distillery::core", topic_title = "Solar Energy", "Generated topic title");
    tracing::debug!(target: "distillery::adapters", body = %r#"{"content":[]}"#, "API response");
    tracing::debug!(target: "other_crate", "dependency chatter");

    // One file named generation_log_<YYYYmmdd>_<HHMMSS>.log
    let entries: Vec<_> = std::fs::read_dir(&log_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries, vec![log_path.clone()]);

    let name = log_path.file_name().unwrap().to_string_lossy().to_string();
    let stamp = name
        .strip_prefix("generation_log_")
        .and_then(|rest| rest.strip_suffix(".log"))
        .unwrap();
    let parts: Vec<&str> = stamp.split('_').collect();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].len(), 8);
    assert_eq!(parts[1].len(), 6);
    assert!(stamp.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2, "log file:\n{}", contents);

    // Timestamped, level-tagged, no ANSI escapes
    for line in &lines {
        assert!(line.starts_with(|c: char| c.is_ascii_digit()), "line: {}", line);
        assert!(!line.contains('\u{1b}'));
    }
    assert!(lines[0].contains("INFO") && lines[0].contains("Generated topic title"));
    assert!(lines[1].contains("DEBUG") && lines[1].contains("API response"));
    assert!(lines[1].contains(r#"{"content":[]}"#));
    assert!(!contents.contains("dependency chatter"));
}
