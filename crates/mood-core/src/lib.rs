pub mod camera;
pub mod cloud;
pub mod color;
pub mod error;
pub mod fields;
pub mod mesh;
pub mod mood;
pub mod orchestrator;
pub mod particles;
pub mod quality;
pub mod sentiment;

pub use camera::*;
pub use error::*;
pub use mood::*;
pub use quality::*;
