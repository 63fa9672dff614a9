//! Tug steering math for the pushback helper.
//!
//! MSFS steers the pushback tug with `KEY_TUG_HEADING`, whose parameter is a
//! heading in whole degrees pre-multiplied by [`HEADING_SCALE`]. The product is
//! sent as an unsigned 32 bit value, so overflow wraps modulo 2^32.

/// Converts whole degrees into the fixed point encoding `KEY_TUG_HEADING`
/// expects (roughly 2^32 / 360).
pub const HEADING_SCALE: u32 = 11930464;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TugDirection {
    Left,
    Right,
    Straight,
}

impl TugDirection {
    /// Degrees added to the current heading before wrapping to [0, 360).
    ///
    /// `None` means the heading is passed through untouched, without wrapping.
    pub fn offset(&self) -> Option<u32> {
        match self {
            TugDirection::Left => Some(90),
            TugDirection::Right => Some(270),
            TugDirection::Straight => None,
        }
    }
}

impl std::fmt::Display for TugDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TugDirection::Left => "left",
            TugDirection::Right => "right",
            TugDirection::Straight => "straight",
        };
        write!(f, "{}", s)
    }
}

/// Wrap a heading in whole degrees into [0, 360).
pub fn normalize_degrees(heading: u32) -> u32 {
    heading % 360
}

/// The heading the tug should point to, in whole degrees.
pub fn target_heading(direction: TugDirection, heading: u32) -> u32 {
    match direction.offset() {
        Some(offset) => normalize_degrees(heading.wrapping_add(offset)),
        None => heading,
    }
}

/// Compute the `KEY_TUG_HEADING` event parameter for a direction, given the
/// last known true heading of the aircraft.
///
/// No rounding or clamping is applied, the scaled value wraps on overflow
/// exactly like the sim's own 32 bit arithmetic.
pub fn tug_event_parameter(direction: TugDirection, heading: u32) -> u32 {
    target_heading(direction, heading).wrapping_mul(HEADING_SCALE)
}
