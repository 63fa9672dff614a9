use chrono::{DateTime, Utc};
use crate::error::TelemetryError;

/// Layout of the heading data definition as the sim sends it.
// a single FLOAT64, the sim packs data definitions without padding
#[repr(C, packed)]
#[derive(Clone, Copy, Debug)]
struct RawHeadingData {
    true_heading: f64,
}

impl RawHeadingData {
    const SIZE: usize = std::mem::size_of::<RawHeadingData>();

    fn from_bytes(payload: &[u8]) -> Result<Self, TelemetryError> {
        let bytes: [u8; Self::SIZE] = payload
            .get(..Self::SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or(TelemetryError::ShortPayload(payload.len()))?;
        Ok(Self { true_heading: f64::from_le_bytes(bytes) })
    }
}

/// Decode a heading reply into whole degrees, truncating the fraction.
pub fn decode_heading(payload: &[u8]) -> Result<i32, TelemetryError> {
    let raw = RawHeadingData::from_bytes(payload)?;
    Ok(raw.true_heading as i32)
}

/// The last true heading received from the sim.
///
/// Only the latest sample is kept. Before the first reply the heading reads
/// as 0, which is what the tug math falls back to.
#[derive(Clone, Debug, Default)]
pub struct HeadingStore {
    degrees: i32,
    updated: Option<DateTime<Utc>>,
}

impl HeadingStore {
    pub fn degrees(&self) -> i32 {
        self.degrees
    }

    /// When the current sample was written, `None` if nothing has arrived yet.
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    pub fn set(&mut self, degrees: i32) {
        self.degrees = degrees;
        self.updated = Some(Utc::now());
    }
}
