use bashgate::config::{AppConfig, PartialConfig};
use bashgate::safety::SafetyLayer;
use std::path::PathBuf;
use tempfile::TempDir;

// ─── Helpers ──────────────────────────────────────────────────────────

fn setup_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn test_config(security_log: PathBuf, timeout: u64) -> AppConfig {
    let mut config = PartialConfig::default().finalize();
    config.shell_timeout_secs = timeout;
    config.security_log_path = security_log;
    config
}

// ============================================================
// SafetyLayer blocks dangerous commands
// ============================================================

#[tokio::test]
async fn test_safety_layer_blocks_rm() {
    let dir = setup_dir();
    let config = test_config(dir.path().join("security.log"), 5);
    let layer = SafetyLayer::new(&config).unwrap();

    let result = layer.execute("rm -rf /important").await.unwrap();

    // Should be blocked, not executed.
    assert_eq!(result.exit_code, Some(126));
    assert!(result.stdout.is_empty());
    assert!(!result.stderr.is_empty());

    // Stderr should contain structured blocked JSON.
    let parsed: serde_json::Value = serde_json::from_str(&result.stderr)
        .expect("stderr should be valid JSON for blocked commands");
    assert_eq!(parsed["blocked"], true);
    assert!(parsed["reason"].as_str().unwrap().contains("rm"));
    assert_eq!(parsed["command"], "rm -rf /important");
}

#[tokio::test]
async fn test_safety_layer_blocks_redirection() {
    let dir = setup_dir();
    let config = test_config(dir.path().join("security.log"), 5);
    let layer = SafetyLayer::new(&config).unwrap();

    let result = layer.execute("cat notes.txt > out.txt").await.unwrap();

    assert_eq!(result.exit_code, Some(126));
    let parsed: serde_json::Value = serde_json::from_str(&result.stderr).unwrap();
    assert_eq!(parsed["blocked"], true);
    assert!(
        parsed["reason"].as_str().unwrap().to_lowercase().contains("redirection"),
        "reason should reference redirection"
    );
}

#[tokio::test]
async fn test_check_is_pure() {
    let dir = setup_dir();
    let security_log = dir.path().join("security.log");
    let config = test_config(security_log.clone(), 5);
    let layer = SafetyLayer::new(&config).unwrap();

    assert!(layer.check("rm file").is_some());
    assert!(layer.check("ls").is_none());
    // check() never writes the audit log; only execute() does.
    assert!(!security_log.exists());
}

#[tokio::test]
async fn test_ensure_allowed_error_carries_reason() {
    let dir = setup_dir();
    let config = test_config(dir.path().join("security.log"), 5);
    let layer = SafetyLayer::new(&config).unwrap();

    assert!(layer.ensure_allowed("ls -la").is_ok());

    let err = layer.ensure_allowed("rm file").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("rm file"));
    assert!(message.contains("delete_file"));
}

// ============================================================
// SafetyLayer executes allowed commands
// ============================================================

#[tokio::test]
async fn test_safety_layer_executes_echo() {
    let dir = setup_dir();
    let config = test_config(dir.path().join("security.log"), 5);
    let layer = SafetyLayer::new(&config).unwrap();

    let result = layer.execute("echo hello").await.unwrap();

    assert_eq!(result.stdout, "hello\n");
    assert_eq!(result.exit_code, Some(0));
    assert!(!result.timed_out);
}

#[tokio::test]
async fn test_safety_layer_reports_child_exit_code() {
    let dir = setup_dir();
    let config = test_config(dir.path().join("security.log"), 5);
    let layer = SafetyLayer::new(&config).unwrap();

    let result = layer.execute("exit 3").await.unwrap();
    assert_eq!(result.exit_code, Some(3));
}

// ============================================================
// SafetyLayer handles timeout
// ============================================================

#[tokio::test]
async fn test_safety_layer_timeout() {
    let dir = setup_dir();
    let config = test_config(dir.path().join("security.log"), 1);
    let layer = SafetyLayer::new(&config).unwrap();

    let start = std::time::Instant::now();
    let result = layer.execute("sleep 60").await.unwrap();
    let elapsed = start.elapsed();

    assert!(result.timed_out, "should report timed_out");
    assert_eq!(result.exit_code, None);
    assert!(
        elapsed.as_secs() < 5,
        "timeout should fire quickly, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_per_request_timeout_override() {
    let dir = setup_dir();
    let config = test_config(dir.path().join("security.log"), 60);
    let layer = SafetyLayer::new(&config).unwrap();

    let result = layer.execute_with_timeout("sleep 60", 1).await.unwrap();
    assert!(result.timed_out, "per-request timeout should apply");
}

// ============================================================
// Security log file
// ============================================================

#[tokio::test]
async fn test_security_log_created_on_blocked_command() {
    let dir = setup_dir();
    let security_log = dir.path().join("security.log");
    let config = test_config(security_log.clone(), 5);
    let layer = SafetyLayer::new(&config).unwrap();

    let _ = layer.execute("rm -rf /tmp/x").await.unwrap();

    assert!(security_log.exists(), "security log should be created");

    let contents = std::fs::read_to_string(&security_log).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1, "should have exactly one log entry");

    let entry: serde_json::Value = serde_json::from_str(lines[0])
        .expect("security log entry should be valid JSON");
    assert_eq!(entry["blocked"], true);
    assert!(entry["timestamp"].is_number());
    assert_eq!(entry["command"], "rm -rf /tmp/x");
}

#[tokio::test]
async fn test_security_log_appends_multiple_entries() {
    let dir = setup_dir();
    let security_log = dir.path().join("security.log");
    let config = test_config(security_log.clone(), 5);
    let layer = SafetyLayer::new(&config).unwrap();

    let _ = layer.execute("rm a").await.unwrap();
    let _ = layer.execute("mv a b").await.unwrap();
    let _ = layer.execute("shutdown").await.unwrap();

    let contents = std::fs::read_to_string(&security_log).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3, "should have three log entries");

    for line in &lines {
        let _: serde_json::Value = serde_json::from_str(line)
            .expect("each security log entry should be valid JSON");
    }
}

#[tokio::test]
async fn test_no_security_log_for_allowed_commands() {
    let dir = setup_dir();
    let security_log = dir.path().join("security.log");
    let config = test_config(security_log.clone(), 5);
    let layer = SafetyLayer::new(&config).unwrap();

    let _ = layer.execute("echo hello").await.unwrap();

    assert!(
        !security_log.exists(),
        "security log should not be created for allowed commands"
    );
}

// ============================================================
// Shell resolution
// ============================================================

#[tokio::test]
async fn test_layer_resolves_a_shell() {
    let dir = setup_dir();
    let config = test_config(dir.path().join("security.log"), 5);
    let layer = SafetyLayer::new(&config).unwrap();

    // On any machine with bash installed this resolves to a real path;
    // otherwise it falls back to PATH lookup.
    assert!(!layer.shell().as_os_str().is_empty());
}
