use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DaimeiError;

/// Canonical vertical-resolution classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resolution {
    /// 480p: Standard Definition
    SD480,
    /// 720p: High Definition
    HD720,
    /// 1080p: Full HD
    FHD1080,
    /// 1440p: Quad HD / 2K
    QHD1440,
    /// 2160p: Ultra HD / 4K
    UHD2160,
}

impl Resolution {
    /// All classes in ascending order.
    pub const ALL: [Self; 5] = [
        Self::SD480,
        Self::HD720,
        Self::FHD1080,
        Self::QHD1440,
        Self::UHD2160,
    ];

    /// Nominal frame height in pixels.
    #[must_use]
    pub const fn height(self) -> u32 {
        match self {
            Self::SD480 => 480,
            Self::HD720 => 720,
            Self::FHD1080 => 1080,
            Self::QHD1440 => 1440,
            Self::UHD2160 => 2160,
        }
    }

    /// Maps a pixel height to the nearest canonical class.
    ///
    /// Ties resolve to the lower class.
    #[must_use]
    pub fn from_height(height: u32) -> Self {
        let mut best = Self::SD480;
        for class in Self::ALL {
            if class.height().abs_diff(height) < best.height().abs_diff(height) {
                best = class;
            }
        }
        best
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}P", self.height())
    }
}

impl FromStr for Resolution {
    type Err = DaimeiError;

    /// Accepts labels such as `1080p`, `1080P`, `720i`, `4K`, `2K`, `UHD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        match label.as_str() {
            "4K" | "UHD" => return Ok(Self::UHD2160),
            "2K" | "QHD" => return Ok(Self::QHD1440),
            "FHD" => return Ok(Self::FHD1080),
            _ => {}
        }

        label
            .strip_suffix(['P', 'I'])
            .and_then(|digits| digits.parse::<u32>().ok())
            .filter(|height| (240..=4320).contains(height))
            .map(Self::from_height)
            .ok_or_else(|| DaimeiError::UnknownResolution(s.to_string()))
    }
}
