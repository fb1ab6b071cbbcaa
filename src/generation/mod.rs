//! Dataset generation pipeline: batch configuration, per-sample random
//! streams, and the orchestrator that drives synthesis, rendering, mask
//! labeling, and storage for every sample.

pub mod config;
pub mod sample;
pub mod seed;

pub use config::{BatchConfig, MAX_SAMPLES};
pub use sample::{SampleData, SampleJob, SampleOutput, SceneBackend};
pub use seed::{sample_rng, sample_seed, SampleRng};

use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::core::{Error, Result};
use crate::scene::SoftwareScene;
use crate::storage::{ImageStore, OutputLayout, PngStore};

/// A sample that could not be completed
#[derive(Debug)]
pub struct SampleFailure {
    pub index: u32,
    /// Seed of the sample's random stream, for reproduction
    pub seed: u64,
    pub error: Error,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub requested: u32,
    /// Completed samples, in index order
    pub outputs: Vec<SampleOutput>,
    /// Failed samples, in index order
    pub failures: Vec<SampleFailure>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.outputs.len() == self.requested as usize
    }
}

/// Drives a whole batch.
pub struct BatchOrchestrator<St: ImageStore = PngStore> {
    store: St,
}

impl BatchOrchestrator<PngStore> {
    /// Orchestrator writing PNG files to disk
    pub fn new() -> Self {
        Self { store: PngStore }
    }
}

impl Default for BatchOrchestrator<PngStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<St: ImageStore> BatchOrchestrator<St> {
    pub fn with_store(store: St) -> Self {
        Self { store }
    }

    /// Run a batch on the built-in software scene.
    pub fn run(&self, config: &BatchConfig) -> Result<BatchReport> {
        let assets_dir = config.assets_dir.clone();
        self.run_with(config, move || match &assets_dir {
            Some(dir) => SoftwareScene::with_assets(dir),
            None => SoftwareScene::new(),
        })
    }

    /// Run a batch, creating a fresh scene backend for every sample.
    ///
    /// Configuration problems are returned as errors before any directory
    /// is created. Per-sample failures are logged, recorded in the report,
    /// and do not stop the batch.
    pub fn run_with<B, F>(&self, config: &BatchConfig, make_scene: F) -> Result<BatchReport>
    where
        B: SceneBackend,
        F: Fn() -> B + Sync,
    {
        config.validate()?;

        let paths = OutputLayout::new(&config.output_dir, &config.prefix);
        paths.create_dirs(&self.store, config.enable_top_view)?;

        let total = config.sample_count;
        log::info!(
            "Generating {} samples into {} (seed {}, {} job{})",
            total,
            config.output_dir.display(),
            config.seed,
            config.jobs,
            if config.jobs == 1 { "" } else { "s" },
        );

        let start = Instant::now();
        let run_one = |index: u32| -> std::result::Result<SampleOutput, SampleFailure> {
            log::info!("Generating terrain {}/{}...", index + 1, total);
            let seed = sample_seed(config.seed, index);
            let job = SampleJob {
                index,
                seed,
                layout: &config.layout,
                paths: &paths,
                store: &self.store,
                enable_top_view: config.enable_top_view,
            };
            let mut scene = make_scene();
            job.run(&mut scene, &mut sample_rng(config.seed, index))
                .map_err(|error| {
                    log::error!("Sample {} (seed {}) failed: {}", index, seed, error);
                    SampleFailure { index, seed, error }
                })
        };

        let results: Vec<_> = if config.jobs == 1 {
            (0..total).map(run_one).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.jobs)
                .build()
                .map_err(|e| Error::InvalidConfig(format!("failed to build thread pool: {}", e)))?;
            pool.install(|| (0..total).into_par_iter().map(run_one).collect())
        };

        let mut report = BatchReport {
            requested: total,
            ..Default::default()
        };
        for result in results {
            match result {
                Ok(output) => report.outputs.push(output),
                Err(failure) => report.failures.push(failure),
            }
        }
        report.elapsed = start.elapsed();

        log::info!(
            "Finished generating {}/{} samples in {:.1}s ({} failed)",
            report.succeeded(),
            total,
            report.elapsed.as_secs_f64(),
            report.failures.len(),
        );

        Ok(report)
    }
}
