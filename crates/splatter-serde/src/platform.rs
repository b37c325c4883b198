use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Mobile payloads keep every `MOBILE_STRIDE`th splat.
pub const MOBILE_STRIDE: usize = 4;

/// Preview target. Each target has its own payload encoding.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Full resolution JSON for browsers.
    Web,
    /// Full resolution binary for desktop viewers.
    Desktop,
    /// Decimated JSON for mobile devices.
    #[value(alias = "mobile")]
    #[serde(alias = "mobile")]
    Android,
}

impl Platform {
    pub const ALL: [Self; 3] = [Self::Web, Self::Desktop, Self::Android];

    pub fn key(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Desktop => "desktop",
            Self::Android => "android",
        }
    }

    /// Conventional file name of this platform's payload.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Web => "splats_web.json",
            Self::Desktop => "splats_desktop.bin",
            Self::Android => "splats_android.json",
        }
    }

    /// Stride applied to the full splat set before encoding.
    pub fn stride(self) -> usize {
        match self {
            Self::Web | Self::Desktop => 1,
            Self::Android => MOBILE_STRIDE,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown platform '{0}', expected one of: web, desktop, android")]
pub struct UnknownPlatform(String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "desktop" => Ok(Self::Desktop),
            "android" | "mobile" => Ok(Self::Android),
            _ => Err(UnknownPlatform(s.to_owned())),
        }
    }
}
