//! Generation of a single sample.

use std::path::PathBuf;
use std::time::Instant;

use image::RgbImage;
use rand::Rng;

use crate::core::Result;
use crate::render::ColorRenderer;
use crate::scene::{RayCaster, SceneCollaborator, SceneContext, SceneLayout};
use crate::storage::{ImageStore, OutputLayout};
use crate::terrain::{HeightField, HeightfieldSynthesizer, MaterialGrid, SampleParameters};

/// Scene backends usable by the orchestrator
pub trait SceneBackend: SceneCollaborator + RayCaster + ColorRenderer + Sync {}

impl<T: SceneCollaborator + RayCaster + ColorRenderer + Sync> SceneBackend for T {}

/// Random terrain data for one sample
#[derive(Clone, Debug)]
pub struct SampleData {
    pub params: SampleParameters,
    pub heights: HeightField,
    pub materials: MaterialGrid,
}

impl SampleData {
    /// Draw parameters, then the heightfield, then the material grid, all
    /// from the same stream.
    pub fn generate<R: Rng>(layout: &SceneLayout, rng: &mut R) -> Self {
        let params = SampleParameters::random(rng);
        let heights = HeightfieldSynthesizer::new(layout.heightmap_resolution).synthesize(&params, rng);
        let materials = MaterialGrid::assign(layout.alpha_resolution, &layout.material_thresholds, rng);
        Self {
            params,
            heights,
            materials,
        }
    }
}

/// Files written for one sample
#[derive(Clone, Debug)]
pub struct SampleOutput {
    pub index: u32,
    pub seed: u64,
    pub params: SampleParameters,
    pub image_path: PathBuf,
    pub mask_path: PathBuf,
    pub topview_path: Option<PathBuf>,
}

/// Everything a sample needs besides its scene and random stream.
pub struct SampleJob<'a> {
    pub index: u32,
    pub seed: u64,
    pub layout: &'a SceneLayout,
    pub paths: &'a OutputLayout,
    pub store: &'a dyn ImageStore,
    pub enable_top_view: bool,
}

impl SampleJob<'_> {
    /// Build the scene, render the color view and its mask, and optionally
    /// the top view. All scene objects are released before returning.
    pub fn run<B: SceneBackend, R: Rng>(&self, scene: &mut B, rng: &mut R) -> Result<SampleOutput> {
        let layout = self.layout;
        let start = Instant::now();

        let data = SampleData::generate(layout, rng);
        log::debug!(
            "Sample {}: scale={:.4} peak={:.3} cliff={:.2} valley={:.3} ({:.0?})",
            self.index,
            data.params.noise_scale,
            data.params.peak_intensity,
            data.params.cliff_sharpness,
            data.params.valley_noise_amplitude,
            start.elapsed(),
        );

        let mut ctx = SceneContext::new(scene);
        let terrain = ctx.build_terrain(
            &data.heights,
            &data.materials,
            layout.terrain_origin,
            layout.terrain_extent,
        )?;
        ctx.add_light(layout.sun_light());
        for prop in &layout.props {
            ctx.add_prop(*prop);
        }

        let camera = layout.main_camera();
        ctx.add_camera(camera.clone());

        let color = ctx.scene().render(&camera, layout.render_resolution)?;
        let mask = layout.mask_synthesizer().synthesize(ctx.scene(), &camera, &terrain);

        let top_view = if self.enable_top_view {
            let top = layout.top_camera();
            let handle = ctx.add_camera(top.clone());
            let view = ctx.scene().render(&top, layout.render_resolution)?;
            ctx.destroy(handle);
            Some(view)
        } else {
            None
        };

        let image_path = self.paths.image_path(self.index);
        let mask_path = self.paths.mask_path(self.index);
        let topview_path = top_view.as_ref().map(|_| self.paths.topview_path(self.index));

        let mut outputs = vec![(&image_path, &color), (&mask_path, &mask)];
        if let (Some(path), Some(view)) = (&topview_path, &top_view) {
            outputs.push((path, view));
        }
        self.write_all(&outputs)?;

        log::debug!("Sample {} done in {:.0?}", self.index, start.elapsed());

        Ok(SampleOutput {
            index: self.index,
            seed: self.seed,
            params: data.params,
            image_path,
            mask_path,
            topview_path,
        })
    }

    /// Write every image of the sample, or none of them: files written
    /// before a failure are removed again.
    fn write_all(&self, outputs: &[(&PathBuf, &RgbImage)]) -> Result<()> {
        for (written, (path, image)) in outputs.iter().enumerate() {
            if let Err(e) = self.store.write_image(path, image) {
                for (done, _) in &outputs[..written] {
                    if let Err(cleanup) = self.store.remove_image(done) {
                        log::warn!("Failed to remove partial output {}: {}", done.display(), cleanup);
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::seed::sample_rng;
    use crate::scene::SoftwareScene;
    use crate::storage::PngStore;
    use tempfile::TempDir;

    fn small_layout() -> SceneLayout {
        SceneLayout {
            heightmap_resolution: 33,
            alpha_resolution: 16,
            render_resolution: 16,
            mask_resolution: 8,
            ..Default::default()
        }
    }

    #[test]
    fn test_sample_data_reproducible() {
        let layout = small_layout();
        let a = SampleData::generate(&layout, &mut sample_rng(1, 0));
        let b = SampleData::generate(&layout, &mut sample_rng(1, 0));
        assert_eq!(a.params, b.params);
        assert_eq!(a.heights, b.heights);
        assert_eq!(a.materials, b.materials);
        assert!(a.params.in_range());
    }

    #[test]
    fn test_job_writes_files_and_releases_scene() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let paths = OutputLayout::new(temp_dir.path(), "T");
        paths.create_dirs(&PngStore, true).expect("create dirs failed");

        let layout = small_layout();
        let job = SampleJob {
            index: 4,
            seed: 77,
            layout: &layout,
            paths: &paths,
            store: &PngStore,
            enable_top_view: true,
        };
        let mut scene = SoftwareScene::new();
        let output = job.run(&mut scene, &mut sample_rng(77, 4)).expect("sample failed");

        assert_eq!(scene.object_count(), 0);
        assert!(output.image_path.ends_with("T_00004.png"));
        assert!(output.mask_path.ends_with("T_MASK_00004.png"));
        assert!(output.topview_path.as_ref().is_some_and(|p| p.is_file()));

        let mask = image::open(&output.mask_path).expect("open failed").to_rgb8();
        assert_eq!(mask.dimensions(), (8, 8));
        let color = image::open(&output.image_path).expect("open failed").to_rgb8();
        assert_eq!(color.dimensions(), (16, 16));
    }

    #[test]
    fn test_job_failure_releases_scene() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        // Directories never created: the first write fails
        let paths = OutputLayout::new(temp_dir.path().join("absent"), "T");
        let layout = small_layout();
        let job = SampleJob {
            index: 0,
            seed: 1,
            layout: &layout,
            paths: &paths,
            store: &PngStore,
            enable_top_view: false,
        };
        let mut scene = SoftwareScene::new();
        assert!(job.run(&mut scene, &mut sample_rng(1, 0)).is_err());
        assert_eq!(scene.object_count(), 0);
    }
}
