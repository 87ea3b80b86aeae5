//! Frame-by-frame description of the insights video: a fixed sequence of
//! scenes driven by eased interpolations and springs.

mod anim;
mod scenes;
mod timeline;

pub use scenes::{FrameState, evaluate_frame};
pub use timeline::{FPS, HEIGHT, SCENES, TOTAL_FRAMES, WIDTH};
