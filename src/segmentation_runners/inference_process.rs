use std::time::Instant;
use crate::data::{ConfigOrt, SegMask, Xs};
use crate::utils;

pub trait InferenceProcess: Sized {
    type Input; // DynamicImage

    /// Creates a new instance of the model with the given options.
    fn new(options: ConfigOrt) -> anyhow::Result<Self>;

    /// Pre-process the input data.
    fn preprocess(&self, xs: &[Self::Input]) -> anyhow::Result<Xs>;

    /// Executes the model on the preprocessed data.
    fn inference(&mut self, xs: Xs) -> anyhow::Result<Xs>;

    /// Post-process the model's output.
    fn postprocess(&self, xs: Xs, xs0: &[Self::Input]) -> anyhow::Result<Vec<SegMask>>;

    /// Executes the full pipeline.
    fn run(&mut self, xs: &[Self::Input]) -> anyhow::Result<Vec<SegMask>> {
        let ys = self.preprocess(xs)?;
        let ys = self.inference(ys)?;
        let ys = self.postprocess(ys, xs)?;
        Ok(ys)
    }

    /// Executes the full pipeline, tracing each stage.
    fn forward(&mut self, xs: &[Self::Input], profile: bool) -> anyhow::Result<Vec<SegMask>> {
        let start = Instant::now();
        let mut elapsed = start.elapsed();

        let ys = self.preprocess(xs)?;
        elapsed = utils::trace("TIME", "Preprocessing input", start, elapsed);
        let t_pre = elapsed;

        let ys = self.inference(ys)?;
        elapsed = utils::trace("TIME", "Segmentation run", start, elapsed);
        let t_exe = elapsed - t_pre;

        let ys = self.postprocess(ys, xs)?;
        elapsed = utils::trace("TIME", "Postprocessing", start, elapsed);
        let t_post = elapsed - t_pre - t_exe;

        if profile {
            log::info!("> Preprocess: {t_pre:?} | Inference: {t_exe:?} | Postprocess: {t_post:?}");
        }

        Ok(ys)
    }
}
