/// Scene content: the baked model and the firefly field
///
/// The model arrives asynchronously; its materials are swapped in by an
/// observer when the scene instance is ready.

pub mod fireflies;
pub mod loading;
pub mod material_assignment;

pub use fireflies::*;
pub use loading::*;
pub use material_assignment::*;
