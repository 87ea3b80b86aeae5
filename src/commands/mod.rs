pub mod build;
pub mod extract;
pub mod frames;
pub mod render;
