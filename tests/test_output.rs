use std::path::{Path, PathBuf};
use bvr_segment::common::{label_to_rgb8, PALETTE};
use bvr_segment::data::{image_stem, OutputWriter};
use bvr_segment::segmentation_processing::find_images;
use ndarray::{array, ArrayD, IxDyn};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(name);
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    dir
}

#[test]
fn creates_nested_output_directory() {
    let dir = scratch_dir("output_nested").join("a").join("b");
    let writer = OutputWriter::new(&dir).unwrap();
    assert!(dir.is_dir());
    assert_eq!(writer.dir(), dir.as_path());
}

#[test]
fn written_png_decodes_to_palette_colors() {
    let writer = OutputWriter::new(scratch_dir("output_png")).unwrap();
    let labels = array![[0usize, 1, 2], [18, 19, 20]];
    let img = label_to_rgb8(labels.view()).unwrap();

    let path = writer.write_color_label("street", &img).unwrap();
    assert_eq!(path.file_name().unwrap(), "street_colorlabel.png");

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (3, 2));
    for ((y, x), &l) in labels.indexed_iter() {
        assert_eq!(decoded.get_pixel(x as u32, y as u32).0, PALETTE[l]);
    }
}

#[test]
fn logits_are_little_endian_f32() {
    let writer = OutputWriter::new(scratch_dir("output_logits")).unwrap();
    let logits = ArrayD::from_shape_vec(IxDyn(&[1, 2, 1, 2]), vec![1.0f32, -2.5, 0.0, 4.25]).unwrap();

    let path = writer.write_logits("street", &logits).unwrap();
    assert_eq!(path.file_name().unwrap(), "street_predlogit.bin");

    let bytes = std::fs::read(&path).unwrap();
    let values: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    assert_eq!(values, vec![1.0, -2.5, 0.0, 4.25]);
}

#[test]
fn stem_drops_directory_and_extension() {
    assert_eq!(image_stem("data/val/2007_000033.jpg"), "2007_000033");
    assert_eq!(image_stem("frame.0001.png"), "frame.0001");
}

#[test]
fn glob_finds_sorted_image_files_only() {
    let dir = scratch_dir("output_glob");
    std::fs::create_dir_all(dir.join("nested.jpg")).unwrap();
    for name in ["b.jpg", "a.jpg", "c.png"] {
        image::RgbImage::new(2, 2).save(dir.join(name)).unwrap();
    }

    let pattern = format!("{}/*.jpg", dir.display());
    let found = find_images(&pattern).unwrap();
    let names: Vec<String> = found.iter().map(image_stem).collect();
    assert_eq!(names, vec!["a", "b"]);

    assert!(find_images("[").is_err());
}
