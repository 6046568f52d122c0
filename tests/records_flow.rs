//! End-to-end flow: submit records locally, gate admin access, list and
//! delete through the CLI.

use std::path::Path;
use std::process::Command;

use attache_session::sha256_hex;

fn attache(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_attache"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn write_config_with_admin(dir: &Path, password: &str) {
    let config = format!(
        "[session]\nadmin_password_sha256 = \"{}\"\n",
        sha256_hex(password)
    );
    std::fs::write(dir.join("attache.toml"), config).unwrap();
}

#[test]
fn submit_writes_to_the_local_tier() {
    let dir = tempfile::tempdir().unwrap();
    let output = attache(
        dir.path(),
        &[
            "submit", "message", "--name", "Ada", "--email", "ada@example.com", "--message",
            "hello there",
        ],
    );
    assert!(
        output.status.success(),
        "submit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tier local"), "got: {stdout}");
    assert!(dir.path().join(".attache/records.db").exists());
}

#[test]
fn invalid_record_is_rejected_before_storage() {
    let dir = tempfile::tempdir().unwrap();
    let output = attache(
        dir.path(),
        &[
            "submit", "message", "--name", "Ada", "--email", "not-an-email", "--message", "hi",
        ],
    );
    assert!(!output.status.success());
    // Nothing reached the store.
    assert!(!dir.path().join(".attache/records.db").exists());
}

#[test]
fn donor_age_is_validated_at_the_cli_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let output = attache(
        dir.path(),
        &[
            "submit", "donor", "--name", "Rhea", "--email", "rhea@example.com", "--blood-group",
            "O+", "--city", "Pune", "--mobile", "9876543210", "--age", "17",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("18"), "got: {stderr}");
}

#[test]
fn records_require_an_admin_session() {
    let dir = tempfile::tempdir().unwrap();
    let output = attache(dir.path(), &["records", "list", "--kind", "message"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("session"), "got: {stderr}");
}

#[test]
fn admin_login_is_disabled_without_a_digest() {
    let dir = tempfile::tempdir().unwrap();
    let output = attache(dir.path(), &["login", "admin", "--password", "1234"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("disabled"), "got: {stderr}");
}

#[test]
fn full_admin_flow_lists_and_deletes() {
    let dir = tempfile::tempdir().unwrap();
    write_config_with_admin(dir.path(), "hunter2");

    // Wrong password first.
    let output = attache(dir.path(), &["login", "admin", "--password", "wrong"]);
    assert!(!output.status.success());

    let output = attache(dir.path(), &["login", "admin", "--password", "hunter2"]);
    assert!(
        output.status.success(),
        "admin login failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = attache(
        dir.path(),
        &[
            "submit", "request", "--patient", "Patient X", "--blood-group", "AB-", "--hospital",
            "City Hospital", "--location", "Mumbai", "--urgency", "critical", "--contact",
            "9876543210",
        ],
    );
    assert!(output.status.success());

    // JSON listing round-trips through serde.
    let output = attache(
        dir.path(),
        &["records", "list", "--kind", "request", "--format", "json"],
    );
    assert!(output.status.success());
    let records: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("list --format json must emit JSON");
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["body"]["patientName"], "Patient X");
    assert_eq!(records[0]["body"]["status"], "pending");
    let id = records[0]["id"].as_str().unwrap().to_string();

    let output = attache(
        dir.path(),
        &["records", "delete", "--kind", "request", "--id", &id],
    );
    assert!(output.status.success());

    let output = attache(dir.path(), &["records", "list", "--kind", "request"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No records."));
}

#[test]
fn session_lifecycle_demo_provider_logout() {
    let dir = tempfile::tempdir().unwrap();

    let output = attache(dir.path(), &["whoami"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No active session."));

    let output = attache(dir.path(), &["login", "demo"]);
    assert!(output.status.success());

    let output = attache(dir.path(), &["whoami"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Demo User"));

    // A provider login while a demo session is active keeps the demo
    // identity (demo takes precedence in the bootstrap).
    let output = attache(
        dir.path(),
        &[
            "login", "provider", "--uid", "u1", "--name", "Ada", "--email", "ada@example.com",
        ],
    );
    assert!(output.status.success());
    let output = attache(dir.path(), &["whoami"]);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Demo User"));

    // After logout, the provider identity is authoritative.
    let output = attache(dir.path(), &["logout"]);
    assert!(output.status.success());
    let output = attache(
        dir.path(),
        &[
            "login", "provider", "--uid", "u1", "--name", "Ada", "--email", "ada@example.com",
        ],
    );
    assert!(output.status.success());
    let output = attache(dir.path(), &["whoami"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Ada"), "got: {stdout}");
    assert!(stdout.contains("provider"), "got: {stdout}");
}

#[test]
fn doctor_passes_in_a_fresh_directory() {
    let dir = tempfile::tempdir().unwrap();
    let output = attache(dir.path(), &["doctor"]);
    assert!(
        output.status.success(),
        "doctor failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("corpus"));
    assert!(stdout.contains("local_store"));
}
