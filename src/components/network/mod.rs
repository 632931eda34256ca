mod component;
mod patterns;
mod render;
mod state;
mod types;

pub use component::NetworkCanvas;
pub use types::NodeHit;
