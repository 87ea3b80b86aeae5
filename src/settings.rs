use crate::locale::Locale;

/// Locale-dependent knobs threaded through derivation, bucketing and
/// rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    pub locale: Locale,
    /// Added to every histogram hour before bucketing, modulo 24.
    pub hour_offset: i32,
}

impl RenderSettings {
    pub fn new(locale: Locale, hour_offset: Option<i32>) -> Self {
        Self {
            locale,
            hour_offset: hour_offset.unwrap_or(locale.dictionary().default_hour_offset),
        }
    }
}

impl From<Locale> for RenderSettings {
    fn from(locale: Locale) -> Self {
        Self::new(locale, None)
    }
}
