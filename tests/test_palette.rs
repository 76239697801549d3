use bvr_segment::common::{color_to_rgb8, label_to_color, label_to_rgb8, palette_color, InvalidLabelError, NUM_CLASSES, PALETTE};
use ndarray::{array, Array2, Array3};

const EPS: f32 = 1e-6;

fn assert_pixel(color: &Array3<f32>, y: usize, x: usize, class: usize) {
    for c in 0..3 {
        let expected = PALETTE[class][c] as f32 / 255.0;
        assert!(
            (color[[y, x, c]] - expected).abs() < EPS,
            "pixel ({y}, {x}) channel {c}: got {}, expected {}",
            color[[y, x, c]],
            expected
        );
    }
}

#[test]
fn palette_has_21_classes_and_black_background() {
    assert_eq!(PALETTE.len(), 21);
    assert_eq!(NUM_CLASSES, 21);
    assert_eq!(PALETTE[0], [0, 0, 0]);
    assert_eq!(PALETTE[20], [0, 64, 128]);
}

#[test]
fn every_pixel_maps_to_its_palette_entry() {
    let labels = Array2::from_shape_fn((3, 7), |(y, x)| (y * 7 + x) % NUM_CLASSES);
    let color = label_to_color(labels.view()).unwrap();

    assert_eq!(color.dim(), (3, 7, 3));
    for ((y, x), &l) in labels.indexed_iter() {
        assert_pixel(&color, y, x, l);
    }
}

#[test]
fn mixed_two_by_two() {
    let labels = array![[0u8, 1], [2, 3]];
    let color = label_to_color(labels.view()).unwrap();

    assert_pixel(&color, 0, 0, 0);
    assert_pixel(&color, 0, 1, 1);
    assert_pixel(&color, 1, 0, 2);
    assert_pixel(&color, 1, 1, 3);
}

#[test]
fn all_background_is_black() {
    let labels = Array2::<usize>::zeros((4, 5));
    let color = label_to_color(labels.view()).unwrap();
    assert!(color.iter().all(|&v| v == 0.0));
}

#[test]
fn all_last_class() {
    let labels = Array2::<i32>::from_elem((2, 3), 20);
    let color = label_to_color(labels.view()).unwrap();

    for px in color.lanes(ndarray::Axis(2)) {
        assert!((px[0] - 0.0).abs() < 1e-3);
        assert!((px[1] - 0.251).abs() < 1e-3);
        assert!((px[2] - 0.502).abs() < 1e-3);
    }
}

#[test]
fn output_is_deterministic_and_in_range() {
    let labels = Array2::from_shape_fn((16, 16), |(y, x)| (y * 3 + x * 5) % NUM_CLASSES);
    let a = label_to_color(labels.view()).unwrap();
    let b = label_to_color(labels.view()).unwrap();

    assert_eq!(a, b);
    assert!(a.iter().all(|&v| (0.0..=1.0).contains(&v)));
}

#[test]
fn out_of_range_label_is_rejected() {
    let labels = array![[0usize, 1, 2], [3, 21, 4]];
    let err = label_to_color(labels.view()).unwrap_err();

    assert_eq!(
        err,
        InvalidLabelError { row: 1, col: 1, label: "21".to_string() }
    );
}

#[test]
fn first_bad_pixel_in_row_major_order_is_reported() {
    let labels = array![[0i64, 0, 99], [-1, 0, 0]];
    let err = label_to_color(labels.view()).unwrap_err();
    assert_eq!((err.row, err.col), (0, 2));
    assert_eq!(err.label, "99");
}

#[test]
fn negative_label_is_rejected() {
    let labels = array![[-1i32]];
    let err = label_to_color(labels.view()).unwrap_err();
    assert_eq!(err.label, "-1");
    assert!(err.to_string().contains("Invalid label -1"));
}

#[test]
fn empty_map_gives_empty_image() {
    let labels = Array2::<usize>::zeros((0, 4));
    let color = label_to_color(labels.view()).unwrap();
    assert_eq!(color.dim(), (0, 4, 3));
}

#[test]
fn palette_color_lookup() {
    assert_eq!(palette_color(0), Some([0.0, 0.0, 0.0]));
    assert_eq!(palette_color(1), Some([128.0 / 255.0, 0.0, 0.0]));
    assert_eq!(palette_color(21), None);
}

#[test]
fn rgb8_conversion_restores_palette_bytes() {
    let labels = array![[0usize, 9], [15, 20]];
    let img = label_to_rgb8(labels.view()).unwrap();

    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(img.get_pixel(0, 0).0, PALETTE[0]);
    assert_eq!(img.get_pixel(1, 0).0, PALETTE[9]);
    assert_eq!(img.get_pixel(0, 1).0, PALETTE[15]);
    assert_eq!(img.get_pixel(1, 1).0, PALETTE[20]);
}

#[test]
fn rgb8_conversion_rejects_wrong_channel_count() {
    let color = Array3::<f32>::zeros((2, 2, 4));
    assert!(color_to_rgb8(color.view()).is_err());
}

#[test]
fn rgb8_from_invalid_labels_carries_typed_error() {
    let labels = array![[30u16]];
    let err = label_to_rgb8(labels.view()).unwrap_err();
    let invalid = err.downcast_ref::<InvalidLabelError>().unwrap();
    assert_eq!(invalid.label, "30");
}
