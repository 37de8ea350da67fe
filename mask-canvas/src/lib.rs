mod canvas;
mod direction;
pub mod image_utils;
mod mask;
mod settings;
mod stroke;
mod tool;
mod transform;
mod trim;

pub use canvas::*;
pub use direction::*;
pub use mask::*;
pub use settings::*;
pub use stroke::*;
pub use tool::*;
pub use transform::*;
pub use trim::*;
