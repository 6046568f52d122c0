use std::process::Command;

fn ask(dir: &std::path::Path, question: &str) -> (bool, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_attache"))
        .args(["ask", question])
        .current_dir(dir)
        .output()
        .unwrap();
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).to_string(),
    )
}

#[test]
fn ask_matches_the_services_entry() {
    let dir = tempfile::tempdir().unwrap();
    let (ok, stdout) = ask(dir.path(), "What services do you offer?");
    assert!(ok);
    assert!(stdout.contains("web development"), "got: {stdout}");
}

#[test]
fn gibberish_gets_the_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let (ok, stdout) = ask(dir.path(), "asdkjasd");
    assert!(ok);
    assert!(stdout.contains("rephrase"), "got: {stdout}");
}

#[test]
fn empty_question_gets_the_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let (ok, stdout) = ask(dir.path(), "");
    assert!(ok);
    assert!(stdout.contains("rephrase"), "got: {stdout}");
}

#[test]
fn ask_uses_a_configured_corpus() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("corpus.toml"),
        r#"
[[entry]]
id = "hours"
keywords = ["hours", "open"]
answer = "We are open 9 to 5."
"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("attache.toml"),
        "[assistant]\ncorpus_path = \"corpus.toml\"\n",
    )
    .unwrap();

    let (ok, stdout) = ask(dir.path(), "when are you open?");
    assert!(ok);
    assert!(stdout.contains("9 to 5"), "got: {stdout}");

    // Entries from the built-in corpus are no longer present.
    let (ok, stdout) = ask(dir.path(), "What services do you offer?");
    assert!(ok);
    assert!(stdout.contains("rephrase"), "got: {stdout}");
}

#[test]
fn broken_corpus_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("attache.toml"),
        "[assistant]\ncorpus_path = \"missing.toml\"\n",
    )
    .unwrap();

    let (ok, _) = ask(dir.path(), "hello");
    assert!(!ok);
}
