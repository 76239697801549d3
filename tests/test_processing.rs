use std::path::{Path, PathBuf};
use bvr_segment::segmentation_processing::{process_images, BatchSummary};

fn images(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn failed_image_is_counted_and_the_rest_still_run() {
    let images = images(&["a.jpg", "broken.jpg", "c.jpg"]);
    let mut seen = Vec::new();

    let summary = process_images(&images, |path: &Path| {
        seen.push(path.to_path_buf());
        if path.ends_with("broken.jpg") {
            anyhow::bail!("decode failed");
        }
        Ok(path.with_extension("png"))
    });

    assert_eq!(seen, images);
    assert_eq!(summary, BatchSummary { total: 3, failed: 1 });
    assert_eq!(summary.succeeded(), 2);
    assert!(!summary.all_ok());
}

#[test]
fn every_image_failing_is_reported() {
    let images = images(&["a.jpg", "b.jpg"]);
    let summary = process_images(&images, |_| anyhow::bail!("model error"));
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.succeeded(), 0);
    assert!(!summary.all_ok());
}

#[test]
fn clean_run_is_ok() {
    let images = images(&["a.jpg", "b.jpg"]);
    let summary = process_images(&images, |path| Ok(path.to_path_buf()));
    assert_eq!(summary, BatchSummary { total: 2, failed: 0 });
    assert!(summary.all_ok());
}
