#[test]
fn help_mentions_global_flags_and_commands() {
    let output = std::process::Command::new(assert_cmd::cargo::cargo_bin!("strata"))
        .arg("--help")
        .output()
        .expect("run help");
    assert!(output.status.success(), "--help should succeed");
    let text = String::from_utf8_lossy(&output.stdout);

    for needle in ["--schemas", "--max-version", "--pretty", "upgrade", "rewrite"] {
        assert!(
            text.contains(needle),
            "help output should contain '{needle}'"
        );
    }
}
