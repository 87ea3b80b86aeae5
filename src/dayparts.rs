use std::collections::BTreeMap;

use tracing::debug;

use crate::locale::DayPart;
use crate::settings::RenderSettings;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DayPartCounts {
    pub morning: u64,
    pub afternoon: u64,
    pub evening: u64,
    pub night: u64,
}

impl DayPartCounts {
    pub fn get(&self, part: DayPart) -> u64 {
        match part {
            DayPart::Morning => self.morning,
            DayPart::Afternoon => self.afternoon,
            DayPart::Evening => self.evening,
            DayPart::Night => self.night,
        }
    }

    pub fn total(&self) -> u64 {
        self.morning + self.afternoon + self.evening + self.night
    }
}

pub fn day_part_of(hour: u32) -> DayPart {
    match hour {
        6..=11 => DayPart::Morning,
        12..=17 => DayPart::Afternoon,
        18..=23 => DayPart::Evening,
        _ => DayPart::Night,
    }
}

/// Moves every hour by `offset` modulo 24, summing hours that collide.
pub fn shift_hours(hours: &BTreeMap<u32, u64>, offset: i32) -> BTreeMap<u32, u64> {
    let mut shifted = BTreeMap::new();
    for (&hour, &count) in hours {
        let target = (i64::from(hour) + i64::from(offset)).rem_euclid(24) as u32;
        *shifted.entry(target).or_insert(0) += count;
    }
    shifted
}

pub fn bucket(hours: &BTreeMap<u32, u64>) -> DayPartCounts {
    let mut counts = DayPartCounts::default();
    for (&hour, &count) in hours {
        match day_part_of(hour) {
            DayPart::Morning => counts.morning += count,
            DayPart::Afternoon => counts.afternoon += count,
            DayPart::Evening => counts.evening += count,
            DayPart::Night => counts.night += count,
        }
    }
    counts
}

/// Shifted, bucketed histogram with locale labels, Morning first.
pub fn localized_buckets(
    hours: &BTreeMap<u32, u64>,
    settings: &RenderSettings,
) -> Vec<(&'static str, u64)> {
    let counts = if settings.hour_offset == 0 {
        bucket(hours)
    } else {
        bucket(&shift_hours(hours, settings.hour_offset))
    };
    debug!(
        offset = settings.hour_offset,
        total = counts.total(),
        "bucketed hour histogram"
    );
    let labels = &settings.locale.dictionary().day_parts;

    DayPart::ALL
        .into_iter()
        .map(|part| (labels.label(part), counts.get(part)))
        .collect()
}
