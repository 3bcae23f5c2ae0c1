//! fields.rs
//! Sample rate / channel count to compact sample-header codes.
//!
//! Pure lookups. Anything without a direct code falls back to an override
//! chunk carrying the exact value.

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// 4-bit frequency code stored in the sample header.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum FrequencyCode {
    /// No direct code; a frequency chunk carries the exact rate.
    Custom  = 0,
    Hz8000  = 1,
    Hz11000 = 2,
    Hz11025 = 3,
    Hz16000 = 4,
    Hz22050 = 5,
    Hz24000 = 6,
    Hz32000 = 7,
    Hz44100 = 8,
    Hz48000 = 9,
}

impl FrequencyCode {
    pub fn from_rate(rate: u32) -> Self {
        match rate {
            8000  => FrequencyCode::Hz8000,
            11000 => FrequencyCode::Hz11000,
            11025 => FrequencyCode::Hz11025,
            16000 => FrequencyCode::Hz16000,
            22050 => FrequencyCode::Hz22050,
            24000 => FrequencyCode::Hz24000,
            32000 => FrequencyCode::Hz32000,
            44100 => FrequencyCode::Hz44100,
            48000 => FrequencyCode::Hz48000,
            _     => FrequencyCode::Custom,
        }
    }

    /// Rate this code stands for, `None` for `Custom`.
    pub fn rate(self) -> Option<u32> {
        match self {
            FrequencyCode::Custom  => None,
            FrequencyCode::Hz8000  => Some(8000),
            FrequencyCode::Hz11000 => Some(11000),
            FrequencyCode::Hz11025 => Some(11025),
            FrequencyCode::Hz16000 => Some(16000),
            FrequencyCode::Hz22050 => Some(22050),
            FrequencyCode::Hz24000 => Some(24000),
            FrequencyCode::Hz32000 => Some(32000),
            FrequencyCode::Hz44100 => Some(44100),
            FrequencyCode::Hz48000 => Some(48000),
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Result of field derivation for one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCodes {
    pub frequency: FrequencyCode,
    pub stereo: bool,
    /// Exact rate, present iff `frequency` is `Custom`.
    pub frequency_override: Option<u32>,
    /// Exact channel count, present iff it is neither mono nor stereo.
    pub channels_override: Option<u8>,
}

/// Map channel count to the stereo flag plus an optional override.
pub fn derive_channels(channels: u8) -> (bool, Option<u8>) {
    match channels {
        1 => (false, None),
        2 => (true, None),
        n => (false, Some(n)),
    }
}

pub fn derive_fields(sample_rate: u32, channels: u8) -> FieldCodes {
    let frequency = FrequencyCode::from_rate(sample_rate);
    let (stereo, channels_override) = derive_channels(channels);
    FieldCodes {
        frequency,
        stereo,
        frequency_override: match frequency {
            FrequencyCode::Custom => Some(sample_rate),
            _ => None,
        },
        channels_override,
    }
}
