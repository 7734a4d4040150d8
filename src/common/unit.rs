//! Length units used by PresentationML.
//!
//! Every coordinate in a slide is an EMU (English Metric Unit). Font sizes and
//! paragraph spacing are written in hundredths of a point.

/// A length in English Metric Units.
pub type Emu = i64;

pub const EMUS_PER_INCH: i64 = 914_400;
pub const CENTIPOINTS_PER_PT: f64 = 100.0;

/// Convert inches to EMU, truncating toward zero.
///
/// ```
/// use deckforge::common::unit::inches;
/// assert_eq!(inches(1.0), 914_400);
/// assert_eq!(inches(13.333), 12_191_695);
/// ```
#[inline]
pub fn inches(value: f64) -> Emu {
    (value * EMUS_PER_INCH as f64) as Emu
}

/// Points to the `sz` / `spcPts` representation (hundredths of a point).
#[inline]
pub fn pt_to_centipoints(value: f64) -> u32 {
    (value * CENTIPOINTS_PER_PT).round() as u32
}

/// Line spacing multiple to the `spcPct` representation (1.0 = 100000).
#[inline]
pub fn line_spacing_to_pct(multiple: f64) -> u32 {
    (multiple * 100_000.0).round() as u32
}
