//! Test fixtures and request builders.

use pixel_quant::Raster;
use pixelsmith::models::{ProcessSettings, RasterPayload, Request, WorkerConfig};

/// Palettes used across tests
pub mod palettes {
    pub fn black_white() -> Vec<String> {
        vec!["#000000".to_string(), "#ffffff".to_string()]
    }

    pub fn primaries() -> Vec<String> {
        vec![
            "#ff0000".to_string(),
            "#00ff00".to_string(),
            "#0000ff".to_string(),
        ]
    }
}

/// Deterministic configuration for tests
pub fn seeded_config() -> WorkerConfig {
    WorkerConfig {
        seed: Some(1234),
        ..Default::default()
    }
}

/// Horizontal gray ramp, fully opaque
pub fn gradient(width: usize, height: usize) -> Raster {
    let mut raster = Raster::filled(width, height, [0, 0, 0, 255]);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 255 / (width - 1).max(1)) as u8;
            raster.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    raster
}

/// Left half one color, right half another
pub fn two_tone(width: usize, height: usize, left: [u8; 4], right: [u8; 4]) -> Raster {
    let mut raster = Raster::filled(width, height, left);
    for y in 0..height {
        for x in width / 2..width {
            raster.set_pixel(x, y, right);
        }
    }
    raster
}

pub fn process_request(raster: Raster, settings: ProcessSettings) -> Request {
    Request::Process {
        raster: RasterPayload::from(raster),
        settings,
    }
}

pub fn suggest_request(raster: Raster, palette: Vec<String>, num_suggestions: usize) -> Request {
    Request::Suggest {
        raster: RasterPayload::from(raster),
        palette,
        num_suggestions,
    }
}

/// One NDJSON line for `request`
pub fn request_line(request: &Request) -> String {
    let mut line = serde_json::to_string(request).unwrap();
    line.push('\n');
    line
}
