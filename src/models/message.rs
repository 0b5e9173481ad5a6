//! Wire messages exchanged with the worker.
//!
//! Messages are JSON objects tagged by a `kind` field with camelCase keys,
//! except the raster buffer, which is `rgba_bytes` (`rgbaBytes` is also
//! accepted on input). Raster bytes travel as standard-alphabet base64.

use pixel_quant::{Raster, RasterError, Rgb};
use serde::{Deserialize, Serialize};

use super::settings::ProcessSettings;

/// A request to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Request {
    /// Run the full pipeline over `raster`.
    Process {
        raster: RasterPayload,
        #[serde(default)]
        settings: ProcessSettings,
    },
    /// Suggest colors to add to `palette`.
    #[serde(rename_all = "camelCase")]
    Suggest {
        raster: RasterPayload,
        #[serde(default)]
        palette: Vec<String>,
        #[serde(default = "default_num_suggestions")]
        num_suggestions: usize,
    },
}

fn default_num_suggestions() -> usize {
    5
}

impl Request {
    /// Wire name of the request kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Process { .. } => "process",
            Request::Suggest { .. } => "suggest",
        }
    }
}

/// A reply from the worker. Exactly one is sent per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Response {
    /// Pipeline output.
    Success { raster: RasterPayload },
    /// Suggested colors as lowercase `#rrggbb`, best first.
    Suggestions { colors: Vec<String> },
    /// The request failed; nothing else was produced.
    Error { message: String },
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }

    pub fn suggestions(colors: &[Rgb]) -> Self {
        Response::Suggestions {
            colors: colors.iter().map(|c| c.to_hex()).collect(),
        }
    }
}

/// RGBA raster on the wire: `{width, height, rgba_bytes}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterPayload {
    pub width: u32,
    pub height: u32,
    #[serde(alias = "rgbaBytes", with = "base64_bytes")]
    pub rgba_bytes: Vec<u8>,
}

impl RasterPayload {
    /// Pixel count as `u64`, safe against overflow.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl TryFrom<RasterPayload> for Raster {
    type Error = RasterError;

    fn try_from(payload: RasterPayload) -> Result<Self, Self::Error> {
        Raster::new(
            payload.width as usize,
            payload.height as usize,
            payload.rgba_bytes,
        )
    }
}

impl From<Raster> for RasterPayload {
    fn from(raster: Raster) -> Self {
        Self {
            width: raster.width() as u32,
            height: raster.height() as u32,
            rgba_bytes: raster.into_bytes(),
        }
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| serde::de::Error::custom(format!("invalid base64 in rgba_bytes: {e}")))
    }
}
