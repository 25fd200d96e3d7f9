//! Render job files.
//!
//! A job names a scene file and says how to look at it:
//!
//! ```json
//! {
//!   "scene": "mirror_spheres.scene.json",
//!   "camera": { "width": 640, "height": 360, "look_from": [0, 1, 4], "look_at": [0, 0, -5] },
//!   "settings": { "bounce_limit": 5 },
//!   "output": "mirror_spheres.png"
//! }
//! ```
//!
//! Relative paths resolve against the job file's directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glint_core::{load_scene, Scene};
use glint_tracer::{CameraSettings, SettingsError, TraceSettings};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderJob {
    /// Scene description file
    pub scene: PathBuf,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub settings: TraceSettings,
    /// Where to write the image unless overridden on the command line
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl RenderJob {
    /// Parse a job from JSON, resolving its paths against `base_dir`.
    pub fn parse(json: &str, base_dir: &Path) -> Result<Self> {
        let mut job: RenderJob = serde_json::from_str(json).context("Invalid render job JSON")?;
        job.scene = base_dir.join(&job.scene);
        job.output = job.output.map(|output| base_dir.join(output));
        job.validate()?;
        Ok(job)
    }

    /// Read and parse a job file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read render job {}", path.display()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&json, base_dir).with_context(|| format!("In render job {}", path.display()))
    }

    /// Check the camera and trace settings.
    pub fn validate(&self) -> Result<()> {
        self.camera.validate().context("Invalid camera")?;
        self.settings.validate().context("Invalid trace settings")?;
        Ok(())
    }

    /// Load the scene the job points at.
    pub fn load_scene(&self) -> Result<Scene> {
        load_scene(&self.scene)
            .with_context(|| format!("Failed to load scene {}", self.scene.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolves_paths() {
        let json = r#"{ "scene": "a.scene.json", "output": "out/a.png" }"#;
        let job = RenderJob::parse(json, Path::new("jobs")).unwrap();

        assert_eq!(job.scene, PathBuf::from("jobs/a.scene.json"));
        assert_eq!(job.output, Some(PathBuf::from("jobs/out/a.png")));
        assert_eq!(job.camera, CameraSettings::default());
        assert_eq!(job.settings, TraceSettings::default());
    }

    #[test]
    fn test_parse_keeps_absolute_paths() {
        let json = r#"{ "scene": "/scenes/a.scene.json" }"#;
        let job = RenderJob::parse(json, Path::new("jobs")).unwrap();

        assert_eq!(job.scene, PathBuf::from("/scenes/a.scene.json"));
        assert_eq!(job.output, None);
    }

    #[test]
    fn test_parse_settings() {
        let json = r#"{
            "scene": "a.json",
            "camera": { "width": 32, "height": 16 },
            "settings": { "bounce_limit": 0, "epsilon": 0.01 }
        }"#;
        let job = RenderJob::parse(json, Path::new("")).unwrap();

        assert_eq!(job.camera.width, 32);
        assert_eq!(job.settings.bounce_limit, 0);
        assert_eq!(job.settings.epsilon, 0.01);
    }

    #[test]
    fn test_parse_requires_scene() {
        assert!(RenderJob::parse(r#"{ "output": "a.png" }"#, Path::new("")).is_err());
    }

    fn settings_error(json: &str) -> SettingsError {
        let err = RenderJob::parse(json, Path::new("")).unwrap_err();
        *err.downcast_ref::<SettingsError>().unwrap()
    }

    #[test]
    fn test_parse_rejects_bad_epsilon() {
        for epsilon in ["-5.0", "0"] {
            let json = format!(r#"{{ "scene": "a.json", "settings": {{ "epsilon": {} }} }}"#, epsilon);
            assert!(matches!(settings_error(&json), SettingsError::InvalidEpsilon(_)));
        }
    }

    #[test]
    fn test_parse_rejects_bad_camera() {
        let json = r#"{ "scene": "a.json", "camera": { "look_from": [1, 2, 3], "look_at": [1, 2, 3] } }"#;
        assert_eq!(settings_error(json), SettingsError::DegenerateView);

        let json = r#"{ "scene": "a.json", "camera": { "width": 70000, "height": 70000 } }"#;
        assert!(matches!(settings_error(json), SettingsError::ImageTooLarge { .. }));
    }

    #[test]
    fn test_validate_after_override() {
        let mut job = RenderJob::parse(r#"{ "scene": "a.json" }"#, Path::new("")).unwrap();
        job.camera.height = 0;
        job.settings.epsilon = f32::NAN;

        assert!(job.validate().is_err());
        job.camera.height = 10;
        assert!(job.validate().is_err());
        job.settings.epsilon = 1e-4;
        assert!(job.validate().is_ok());
    }

    #[test]
    fn test_bundled_jobs_load() {
        let scenes = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenes");
        for name in ["mirror_spheres.job.json", "shadow_study.job.json"] {
            let job = RenderJob::load(&scenes.join(name)).unwrap();
            let scene = job.load_scene().unwrap();
            assert!(!scene.is_empty(), "{} has no spheres", name);
        }
    }
}
