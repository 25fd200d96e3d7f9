//! Glint Core - scene model for the Glint ray tracer.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, `Sphere`, `Light`, `Material`
//! - **Environments**: the `Environment` lookup trait with solid color,
//!   sky gradient and cube map implementations
//! - **Scene descriptions**: JSON scene loading and validation
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scenes/mirror_spheres.scene.json")?;
//! println!("Loaded {} spheres, {} lights",
//!     scene.spheres().len(),
//!     scene.lights().len());
//! ```

pub mod description;
pub mod environment;
pub mod material;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use description::{load_scene, parse_scene, EnvironmentDescription, LoadError, LoadResult, SceneDescription};
pub use environment::{CubeFace, CubeMap, Environment, SkyGradient, SolidColor};
pub use material::{Color, Material};
pub use scene::{Light, Scene, Sphere};
pub use texture::{Texture, TextureError, TextureResult};
