pub mod bitmap;
pub mod compose;
pub mod error;
pub mod grid;
pub mod icon;
pub mod model;
pub mod palette;
pub mod shape;
pub mod spec;
pub mod text;
pub mod vox;

pub use model::{build, generate, SignModel};
pub use spec::SignSpec;
