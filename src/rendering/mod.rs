/// Materials and shader uniforms for the portal scene
///
/// The model itself is drawn with two unlit standard materials; only the
/// portal surface and the fireflies need custom shaders.

pub mod fireflies_material;
pub mod portal_material;
pub mod scene_materials;
pub mod uniforms;

pub use fireflies_material::*;
pub use portal_material::*;
pub use scene_materials::*;
pub use uniforms::*;
