//! glint: render sphere scenes with the Glint ray tracer.

mod job;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glint_tracer::{render, Camera, ImageBuffer, MAX_BOUNCES};

use crate::job::RenderJob;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

#[derive(Parser)]
#[command(name = "glint")]
#[command(version)]
#[command(about = "Whitted-style ray tracer for sphere scenes")]
#[command(long_about = "
glint renders scenes of spheres and point lights with Blinn-Phong shading,
hard shadows and mirror reflections, writing an RGBA PNG whose alpha marks
pixels that hit geometry.

Example usage:
  glint render scenes/mirror_spheres.job.json -o mirror.png
  glint render scenes/shadow_study.job.json --bounces 0
  glint check scenes/mirror_spheres.job.json
")]
struct Cli {
    /// Set logging level (trace, debug, info, warn, error); defaults to RUST_LOG or info
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a job to a PNG file
    Render {
        /// Render job file
        job: PathBuf,
        /// Output image (overrides the job's output)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override image width
        #[arg(long)]
        width: Option<u32>,
        /// Override image height
        #[arg(long)]
        height: Option<u32>,
        /// Override the reflection bounce limit
        #[arg(long)]
        bounces: Option<u32>,
    },

    /// Load and validate a job and its scene without rendering
    Check {
        /// Render job file
        job: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = cli.log_level {
        logger.filter_level(level.into());
    }
    logger.init();

    match cli.command {
        Commands::Render {
            job,
            output,
            width,
            height,
            bounces,
        } => run_render(&job, output, width, height, bounces),
        Commands::Check { job } => run_check(&job),
    }
}

fn run_render(
    job_path: &Path,
    output: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    bounces: Option<u32>,
) -> Result<()> {
    let mut job = RenderJob::load(job_path)?;

    // Apply CLI overrides
    if let Some(width) = width {
        job.camera.width = width;
    }
    if let Some(height) = height {
        job.camera.height = height;
    }
    if let Some(bounces) = bounces {
        job.settings.bounce_limit = bounces;
    }
    job.validate()
        .with_context(|| format!("After overrides to {}", job_path.display()))?;
    if job.settings.bounce_limit > MAX_BOUNCES {
        log::warn!(
            "Requested {} bounces, tracing at most {}",
            job.settings.bounce_limit,
            MAX_BOUNCES
        );
    }

    let output = output
        .or_else(|| job.output.clone())
        .unwrap_or_else(|| job_path.with_extension("png"));

    let scene = job.load_scene()?;
    let camera = Camera::from_settings(&job.camera);

    let start = Instant::now();
    let image = render(&camera, &scene, &job.settings);
    log::info!(
        "Rendered in {:?} ({:.1}% coverage)",
        start.elapsed(),
        image.coverage() * 100.0
    );

    save_png(&image, &output)?;
    log::info!("Saved to {}", output.display());

    Ok(())
}

fn run_check(job_path: &Path) -> Result<()> {
    let job = RenderJob::load(job_path)?;
    let scene = job.load_scene()?;

    let reflective = scene
        .spheres()
        .iter()
        .filter(|sphere| sphere.material.is_reflective())
        .count();

    println!(
        "{}: {} spheres ({} reflective), {} lights, {}x{}, {} bounces",
        job_path.display(),
        scene.spheres().len(),
        reflective,
        scene.lights().len(),
        job.camera.width,
        job.camera.height,
        job.settings.effective_bounces()
    );

    Ok(())
}

fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    let buffer = image::RgbaImage::from_raw(image.width, image.height, image.to_rgba8())
        .context("Image buffer size does not match its dimensions")?;
    buffer
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}
