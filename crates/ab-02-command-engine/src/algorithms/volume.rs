//! Volume level computation.

use crate::domain::Percent;

/// Level for `percent` on a channel whose maximum is `max`.
///
/// `round(percent / 100 * max)`, halves rounded up. Never exceeds `max`.
pub fn target_level(percent: Percent, max: u32) -> u32 {
    let scaled = u64::from(percent.value()) * u64::from(max);
    // integer half-up rounding of scaled / 100
    let level = (scaled + 50) / 100;
    u32::try_from(level).unwrap_or(max).min(max)
}
