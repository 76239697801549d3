use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::Context;
use clap::Parser;
use bvr_segment::common::{InferenceDevice, InputLayout, LabelMap, LabelMapFormat, SegmentConfig};
use bvr_segment::data::OutputWriter;
use bvr_segment::segmentation_processing::{find_images, process_image_file, process_images};

/// Runs a segmentation model over a set of images and writes colorized masks.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the ONNX model
    #[arg(short, long)]
    weights: String,

    /// Label map file, one `id:name` row per class
    #[arg(short, long)]
    label_map: String,

    /// Label map format (only `csv` is supported)
    #[arg(long, default_value = "csv")]
    label_map_format: String,

    /// Glob that selects the images to process, e.g. `images/*.jpg`
    #[arg(short, long)]
    image_file_pattern: String,

    /// onnxruntime shared library to load
    #[arg(long, default_value = "")]
    ort_lib: String,

    /// Inference device: cpu, cuda, tensorrt or coreml
    #[arg(short, long, default_value = "cpu")]
    device: String,

    #[arg(long, default_value_t = 0)]
    device_id: usize,

    /// Square model input size
    #[arg(long, default_value_t = bvr_segment::common::DEFAULT_IMAGE_SIZE)]
    image_size: u32,

    /// Input tensor layout: nhwc or nchw
    #[arg(long, default_value = "nhwc")]
    layout: String,

    /// Name of the graph output holding the class scores
    #[arg(long, default_value = bvr_segment::common::DEFAULT_OUTPUT_NAME)]
    output_name: String,

    #[arg(short, long, default_value = bvr_segment::common::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Also write the raw scores as `<name>_predlogit.bin`
    #[arg(long)]
    save_logits: bool,

    /// Stop after this many images
    #[arg(long)]
    max_images: Option<usize>,

    /// Log per-stage timings
    #[arg(long)]
    profile: bool,

    /// Warm-up runs before the first image
    #[arg(long, default_value_t = bvr_segment::common::DEFAULT_DRY_RUNS)]
    dry_runs: usize,

    /// Build TensorRT engines in fp16
    #[arg(long)]
    trt_fp16: bool,

    /// Per-channel normalization mean, applied after scaling to [0, 1]
    #[arg(long, value_delimiter = ',', default_values_t = bvr_segment::common::DEFAULT_MEAN)]
    mean: Vec<f32>,

    /// Per-channel normalization std
    #[arg(long, value_delimiter = ',', default_values_t = bvr_segment::common::DEFAULT_STD)]
    std: Vec<f32>,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn to_config(&self) -> anyhow::Result<SegmentConfig> {
        let inference_device = InferenceDevice::parse(&self.device, self.device_id)?;
        let input_layout = InputLayout::from_str(&self.layout)
            .ok_or_else(|| anyhow::anyhow!("Unknown layout `{}`, expected nhwc or nchw", self.layout))?;
        let label_map_format = LabelMapFormat::from_str(&self.label_map_format)?;
        let mean = channel_triple("mean", &self.mean)?;
        let std = channel_triple("std", &self.std)?;

        let config = SegmentConfig {
            weights_path: self.weights.clone(),
            ort_lib_path: self.ort_lib.clone(),
            label_map_path: self.label_map.clone(),
            label_map_format,
            inference_device,
            image_size: self.image_size,
            input_layout,
            output_name: self.output_name.clone(),
            output_dir: self.output_dir.clone(),
            save_logits: self.save_logits,
            max_images: self.max_images,
            profile: self.profile,
            dry_runs: self.dry_runs,
            trt_fp16: self.trt_fp16,
            mean,
            std,
        };
        config.validate()?;
        Ok(config)
    }
}

fn channel_triple(flag: &str, values: &[f32]) -> anyhow::Result<[f32; 3]> {
    <[f32; 3]>::try_from(values)
        .map_err(|_| anyhow::anyhow!("--{flag} takes 3 comma separated values, got {}", values.len()))
}

fn run(args: Args) -> anyhow::Result<bool> {
    let config = args.to_config()?;
    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(true);
    }
    log::info!("Configuration:\n{}", config.summary());

    log::info!("Loading the label map...");
    let label_map = LabelMap::from_file(&config.label_map_path, config.label_map_format)
        .with_context(|| format!("Failed to load label map {}", config.label_map_path))?;
    log::info!("Loaded {} labels", label_map.len());

    let mut images = find_images(&args.image_file_pattern)?;
    if images.is_empty() {
        anyhow::bail!("No images matched `{}`", args.image_file_pattern);
    }
    if let Some(max) = config.max_images {
        images.truncate(max);
    }

    let writer = OutputWriter::new(&config.output_dir)?;

    log::info!("Loading the model...");
    let mut segmenter = bvr_segment::init_segmenter(&config)?;

    let summary = process_images(&images, |path| {
        process_image_file(&mut segmenter, path, &writer, config.save_logits, &label_map, config.profile)
            .map(|outcome| outcome.color_label_path)
    });

    if config.profile {
        segmenter.print_time();
    }
    log::info!(
        "Done: {} written, {} failed, output in {}",
        summary.succeeded(),
        summary.failed,
        writer.dir().display()
    );

    Ok(summary.all_ok())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
