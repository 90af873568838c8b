use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_cli_run_text_report() {
    let output = Command::new(env!("CARGO_BIN_EXE_framebench"))
        .args(["run", "--engine", "lazy", "--sizes", "1000,2K"])
        .output()
        .expect("Failed to run framebench");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Rust Polars (lazy) Benchmark");
    assert_eq!(lines[1], "-".repeat(70));
    assert!(lines[2].starts_with("Size       Filter"));
    assert!(stdout.contains("Generating 1000 rows... done!"));
    assert!(stdout.contains("Generating 2000 rows... done!"));
    assert!(lines.iter().any(|l| l.starts_with("2K ")));
}

#[test]
fn test_cli_config_file_and_json() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("bench.yaml");
    fs::write(
        &config_path,
        r#"
sizes: ["1.5K"]
engine: eager
format: json
"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_framebench"))
        .args(["run", "--config", config_path.to_str().unwrap()])
        .env("FRAMEBENCH_LOG", "info")
        .output()
        .expect("Failed to run framebench");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let row: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(row["size"], 1_500);
    assert_eq!(row["label"], "1K");
    assert_eq!(row["engine"], "eager");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Generating 1500 rows... done!"),
        "progress should go to stderr in json mode. log: {}",
        stderr
    );
    assert!(stderr.contains("Starting benchmark"), "log: {}", stderr);
}

#[test]
fn test_cli_rejects_bad_size() {
    let output = Command::new(env!("CARGO_BIN_EXE_framebench"))
        .args(["run", "--sizes", "0"])
        .output()
        .expect("Failed to run framebench");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FRAMEBENCH-004"), "log: {}", stderr);
}

#[test]
fn test_cli_model() {
    let output = Command::new(env!("CARGO_BIN_EXE_framebench"))
        .args(["model"])
        .env("FRAMEBENCH_LOG", "info")
        .output()
        .expect("Failed to run framebench");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Predict finished"), "log: {}", stderr);
}

#[test]
fn test_harness_binaries_print_header() {
    let harnesses = [
        (env!("CARGO_BIN_EXE_polars_eager"), "Rust Polars (eager) Benchmark"),
        (env!("CARGO_BIN_EXE_polars_lazy"), "Rust Polars (lazy) Benchmark"),
        (env!("CARGO_BIN_EXE_pandrs_bench"), "Rust pandrs Benchmark"),
    ];

    for (exe, title) in harnesses {
        let output = Command::new(exe)
            .env("FRAMEBENCH_SIZES", "1000")
            .output()
            .expect("Failed to run harness");

        assert!(output.status.success(), "{} failed", title);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(lines.len(), 6, "{}: {}", title, stdout);
        assert_eq!(lines[0], title);
        assert_eq!(lines[1], "-".repeat(70));
        assert!(lines[2].starts_with("Size       Filter       GroupBy"));
        assert_eq!(lines[3], "-".repeat(70));
        assert_eq!(lines[4], "Generating 1000 rows... done!");
        assert!(lines[5].starts_with("1K         "));
    }
}

#[test]
fn test_cli_run_pandrs() {
    let output = Command::new(env!("CARGO_BIN_EXE_framebench"))
        .args(["run", "--engine", "pandrs", "--sizes", "1000", "--format", "json"])
        .output()
        .expect("Failed to run framebench");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let row: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(row["engine"], "pandrs");
    assert_eq!(row["size"], 1_000);
}
