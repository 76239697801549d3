use std::path::Path;
use bvr_segment::common::{SegmentConfig, DEFAULT_DRY_RUNS, DEFAULT_MEAN, DEFAULT_STD};
use bvr_segment::data::ConfigOrt;

fn fake_model(name: &str) -> String {
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, b"not really onnx").unwrap();
    path.display().to_string()
}

#[test]
fn ort_options_carry_segment_settings() {
    let mut config = SegmentConfig::new(fake_model("carry.onnx"), "labels.csv".to_string());
    config.dry_runs = 0;
    config.trt_fp16 = true;
    config.mean = [0.5, 0.5, 0.5];
    config.std = [0.25, 0.5, 1.0];
    config.save_logits = true;

    let options = ConfigOrt::from_segment_config(&config).unwrap();
    assert_eq!(options.num_dry_run, 0);
    assert!(options.trt_fp16_enable);
    assert_eq!(options.mean, [0.5, 0.5, 0.5]);
    assert_eq!(options.std, [0.25, 0.5, 1.0]);
    assert!(options.retain_scores);
}

#[test]
fn defaults_use_imagenet_statistics() {
    let config = SegmentConfig::new(fake_model("defaults.onnx"), "labels.csv".to_string());
    let options = ConfigOrt::from_segment_config(&config).unwrap();
    assert_eq!(options.num_dry_run, DEFAULT_DRY_RUNS);
    assert_eq!(options.mean, DEFAULT_MEAN);
    assert_eq!(options.std, DEFAULT_STD);
    assert!(!options.retain_scores);
    assert!(options.ort_lib_path.is_empty());
}

#[test]
fn missing_ort_library_is_rejected() {
    let missing = "/nonexistent/libonnxruntime.so";
    let err = ConfigOrt::new().with_ort_lib_path(missing).unwrap_err();
    assert!(err.to_string().contains(missing));
    assert!(ConfigOrt::new().with_ort_lib_path("").is_ok());

    let mut config = SegmentConfig::new(fake_model("lib.onnx"), "labels.csv".to_string());
    config.ort_lib_path = missing.to_string();
    assert!(config.validate().is_err());
}

#[test]
fn missing_model_is_rejected() {
    assert!(ConfigOrt::new().with_model("/nonexistent/model.onnx").is_err());
}

#[test]
fn zero_std_is_rejected() {
    let mut config = SegmentConfig::new("model.onnx".to_string(), "labels.csv".to_string());
    config.std = [0.229, 0.0, 0.225];
    assert!(config.validate().is_err());
}
