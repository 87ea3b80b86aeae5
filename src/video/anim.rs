/// Easing curves used by the timeline's fades and zooms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    #[default]
    Linear,
    /// Fast start, gentle landing.
    OutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// What happens to inputs outside the domain on one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Extrapolate {
    #[default]
    Extend,
    Clamp,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interpolation {
    pub left: Extrapolate,
    pub right: Extrapolate,
    pub ease: Ease,
}

impl Interpolation {
    pub fn clamp_left(mut self) -> Self {
        self.left = Extrapolate::Clamp;
        self
    }

    pub fn clamp_right(mut self) -> Self {
        self.right = Extrapolate::Clamp;
        self
    }

    pub fn eased(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Maps `input` from `domain` onto `range`. Easing applies inside the domain;
/// extended segments continue linearly.
pub fn interpolate(input: f64, domain: [f64; 2], range: [f64; 2], options: Interpolation) -> f64 {
    let [x0, x1] = domain;
    let [y0, y1] = range;
    if x1 == x0 {
        return if input < x0 { y0 } else { y1 };
    }

    let mut t = (input - x0) / (x1 - x0);
    if t < 0.0 && options.left == Extrapolate::Clamp {
        t = 0.0;
    }
    if t > 1.0 && options.right == Extrapolate::Clamp {
        t = 1.0;
    }

    let progress = if (0.0..=1.0).contains(&t) {
        options.ease.apply(t)
    } else {
        t
    };
    y0 * (1.0 - progress) + y1 * progress
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub mass: f64,
    pub stiffness: f64,
    pub damping: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
        }
    }
}

impl SpringConfig {
    pub fn damping(damping: f64) -> Self {
        Self {
            damping,
            ..Self::default()
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness;
        self
    }
}

/// Position of a unit spring released from rest at 0 toward 1, `frame` frames
/// after release. Negative frames are still at rest. Underdamped configs
/// overshoot past 1 before settling.
pub fn spring(frame: f64, fps: f64, config: SpringConfig) -> f64 {
    if frame <= 0.0 {
        return 0.0;
    }

    let t = frame / fps;
    let omega = (config.stiffness / config.mass).sqrt();
    let zeta = config.damping / (2.0 * (config.stiffness * config.mass).sqrt());

    if zeta < 1.0 {
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let decay = (-zeta * omega * t).exp();
        1.0 - decay * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
    } else if zeta == 1.0 {
        1.0 - (-omega * t).exp() * (1.0 + omega * t)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        1.0 + (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r1 - r2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_clamp_and_keep_endpoints() {
        for ease in [Ease::Linear, Ease::OutCubic] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
            assert_eq!(ease.apply(-0.5), 0.0);
            assert_eq!(ease.apply(1.5), 1.0);
        }
        assert_eq!(Ease::OutCubic.apply(0.5), 0.875);
    }

    #[test]
    fn clamped_interpolation_stops_at_range_ends() {
        let options = Interpolation::default().clamp_left().clamp_right();
        assert_eq!(interpolate(-5.0, [0.0, 12.0], [0.0, 1.0], options), 0.0);
        assert_eq!(interpolate(6.0, [0.0, 12.0], [0.0, 1.0], options), 0.5);
        assert_eq!(interpolate(40.0, [0.0, 12.0], [0.0, 1.0], options), 1.0);
    }

    #[test]
    fn extended_interpolation_continues_linearly() {
        let value = interpolate(20.0, [0.0, 10.0], [0.0, 1.0], Interpolation::default());
        assert!((value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn eased_zoom_reaches_target() {
        let options = Interpolation::default().clamp_right().eased(Ease::OutCubic);
        assert_eq!(interpolate(0.0, [0.0, 120.0], [1.1, 1.0], options), 1.1);
        assert_eq!(interpolate(200.0, [0.0, 120.0], [1.1, 1.0], options), 1.0);
        let midway = interpolate(60.0, [0.0, 120.0], [1.1, 1.0], options);
        assert!(midway < 1.05);
    }

    #[test]
    fn spring_starts_at_rest_and_settles_at_one() {
        let configs = [
            SpringConfig::default(),
            SpringConfig::damping(30.0).with_mass(0.8),
            SpringConfig::damping(20.0),
            SpringConfig::damping(20.0).with_mass(1.5),
            SpringConfig::damping(10.0).with_mass(0.5).with_stiffness(200.0),
        ];

        for config in configs {
            assert_eq!(spring(-3.0, 30.0, config), 0.0);
            assert_eq!(spring(0.0, 30.0, config), 0.0);
            assert!((spring(600.0, 30.0, config) - 1.0).abs() < 1e-3, "{config:?}");
        }
    }

    #[test]
    fn default_spring_overshoots() {
        let peak = (1..90)
            .map(|frame| spring(f64::from(frame), 30.0, SpringConfig::default()))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }
}
