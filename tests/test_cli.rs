use std::path::{Path, PathBuf};
use std::process::Command;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(name);
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn no_matching_images_exits_with_failure() {
    let dir = scratch_dir("cli_no_images");
    let label_map = dir.join("labels.csv");
    std::fs::write(&label_map, "0:background\n1:aeroplane\n").unwrap();
    let output_dir = dir.join("out");

    let output = Command::new(env!("CARGO_BIN_EXE_bvr_segment"))
        .args(["-w", "model.onnx", "-l"])
        .arg(&label_map)
        .arg("-i")
        .arg(format!("{}/nope_*.jpg", dir.display()))
        .arg("-o")
        .arg(&output_dir)
        .env("RUST_LOG", "info")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No images matched"), "stderr: {stderr}");
    assert!(!output_dir.exists());
}

#[test]
fn missing_ort_library_is_an_error_not_a_panic() {
    let dir = scratch_dir("cli_missing_ort");
    let label_map = dir.join("labels.csv");
    std::fs::write(&label_map, "0:background\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_bvr_segment"))
        .args(["-w", "model.onnx", "-l"])
        .arg(&label_map)
        .args(["-i", "*.jpg", "--ort-lib"])
        .arg(dir.join("libonnxruntime.so"))
        .env("RUST_LOG", "info")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("OnnxRuntime library not found"), "stderr: {stderr}");
}

#[test]
fn print_config_reflects_normalization_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_bvr_segment"))
        .args(["-w", "model.onnx", "-l", "labels.csv", "-i", "*.jpg", "--print-config"])
        .args(["--mean", "0.5,0.5,0.5", "--std", "0.25,0.25,0.25", "--dry-runs", "3", "--trt-fp16"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["mean"], serde_json::json!([0.5, 0.5, 0.5]));
    assert_eq!(config["std"], serde_json::json!([0.25, 0.25, 0.25]));
    assert_eq!(config["dry_runs"], 3);
    assert_eq!(config["trt_fp16"], true);
}

#[test]
fn normalization_needs_three_values() {
    let output = Command::new(env!("CARGO_BIN_EXE_bvr_segment"))
        .args(["-w", "model.onnx", "-l", "labels.csv", "-i", "*.jpg", "--print-config"])
        .args(["--mean", "0.5,0.5"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}
