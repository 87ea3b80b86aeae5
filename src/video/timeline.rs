use serde::Serialize;

use super::anim::{Ease, Interpolation, interpolate};

pub const FPS: u32 = 30;
pub const WIDTH: u32 = 1920;
pub const HEIGHT: u32 = 1080;
pub const TOTAL_FRAMES: u32 = 900;

const FADE_IN_FRAMES: f64 = 12.0;
const FADE_OUT_FRAMES: f64 = 10.0;
const ENTRY_SCALE: f64 = 1.03;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    Title,
    Stats,
    Tools,
    Languages,
    Wins,
    Insight,
    Ending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub kind: SceneKind,
    pub from: u32,
    pub duration: u32,
}

impl Scene {
    const fn new(kind: SceneKind, from: u32, duration: u32) -> Self {
        Self {
            kind,
            from,
            duration,
        }
    }

    pub fn end(&self) -> u32 {
        self.from + self.duration
    }

    pub fn midpoint(&self) -> u32 {
        self.from + self.duration / 2
    }
}

/// Back to back, covering `0..TOTAL_FRAMES`.
pub const SCENES: [Scene; 7] = [
    Scene::new(SceneKind::Title, 0, 120),
    Scene::new(SceneKind::Stats, 120, 150),
    Scene::new(SceneKind::Tools, 270, 180),
    Scene::new(SceneKind::Languages, 450, 150),
    Scene::new(SceneKind::Wins, 600, 120),
    Scene::new(SceneKind::Insight, 720, 90),
    Scene::new(SceneKind::Ending, 810, 90),
];

/// The scene showing at `frame` and the frame relative to that scene's start.
pub fn scene_at(frame: u32) -> Option<(Scene, u32)> {
    SCENES
        .iter()
        .find(|scene| (scene.from..scene.end()).contains(&frame))
        .map(|scene| (*scene, frame - scene.from))
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transition {
    pub opacity: f64,
    pub scale: f64,
}

/// Every scene fades in with a slight zoom-out and fades out over its last
/// frames.
pub fn transition(local_frame: u32, duration: u32) -> Transition {
    let frame = f64::from(local_frame);
    let duration = f64::from(duration);

    let fade_in = interpolate(
        frame,
        [0.0, FADE_IN_FRAMES],
        [0.0, 1.0],
        Interpolation::default().clamp_right(),
    );
    let fade_out = interpolate(
        frame,
        [duration - FADE_OUT_FRAMES, duration],
        [1.0, 0.0],
        Interpolation::default().clamp_left(),
    );
    let scale = if fade_in < 1.0 {
        interpolate(
            frame,
            [0.0, FADE_IN_FRAMES],
            [ENTRY_SCALE, 1.0],
            Interpolation::default().clamp_right().eased(Ease::OutCubic),
        )
    } else {
        1.0
    };

    Transition {
        opacity: fade_in.min(fade_out),
        scale,
    }
}
