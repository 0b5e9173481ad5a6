//! Processing settings as they appear on the wire.

use pixel_quant::{
    parse_palette, Adjustments, DitherMethod, PipelineSettings, ResampleMethod, MAX_CONTRAST,
};
use serde::{Deserialize, Serialize};

use crate::error::WorkerError;

/// Settings of a `process` request.
///
/// Every field may be omitted and then has no effect: the target size
/// falls back to the source size, resampling to `nearest`, dithering to
/// `none` at strength 100, adjustments to 0 and k-means to off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSettings {
    #[serde(default)]
    pub target_width: Option<u32>,

    #[serde(default)]
    pub target_height: Option<u32>,

    #[serde(default = "default_resampling_method")]
    pub resampling_method: String,

    #[serde(default = "default_dither_method")]
    pub dither_method: String,

    #[serde(default = "default_dither_strength")]
    pub dither_strength: f64,

    /// Hex colors, `#rrggbb` or `#rgb`.
    #[serde(default)]
    pub palette: Vec<String>,

    #[serde(default)]
    pub use_kmeans: bool,

    #[serde(default)]
    pub kmeans_colors: usize,

    #[serde(default)]
    pub brightness: f64,

    #[serde(default)]
    pub contrast: f64,

    #[serde(default)]
    pub saturation: f64,
}

fn default_resampling_method() -> String {
    ResampleMethod::default().as_str().to_string()
}

fn default_dither_method() -> String {
    DitherMethod::default().as_str().to_string()
}

fn default_dither_strength() -> f64 {
    100.0
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            target_width: None,
            target_height: None,
            resampling_method: default_resampling_method(),
            dither_method: default_dither_method(),
            dither_strength: default_dither_strength(),
            palette: Vec::new(),
            use_kmeans: false,
            kmeans_colors: 0,
            brightness: 0.0,
            contrast: 0.0,
            saturation: 0.0,
        }
    }
}

impl ProcessSettings {
    /// Output size, falling back to the source size per axis.
    pub fn target_size(&self, source_width: u32, source_height: u32) -> (u32, u32) {
        (
            self.target_width.unwrap_or(source_width),
            self.target_height.unwrap_or(source_height),
        )
    }

    /// Resolve names and hex strings into engine settings.
    ///
    /// Contrast must lie within -255..=255. Dimension and k-means checks
    /// are left to the engine.
    pub fn to_pipeline(
        &self,
        source_width: u32,
        source_height: u32,
    ) -> Result<PipelineSettings, WorkerError> {
        if !(-MAX_CONTRAST..=MAX_CONTRAST).contains(&self.contrast) {
            return Err(WorkerError::Setting(format!(
                "contrast must be within -{MAX_CONTRAST}..={MAX_CONTRAST}, got {}",
                self.contrast
            )));
        }

        let (width, height) = self.target_size(source_width, source_height);
        let resample: ResampleMethod = self.resampling_method.parse()?;
        let dither: DitherMethod = self.dither_method.parse()?;
        let palette = parse_palette(&self.palette)?;

        let mut settings = PipelineSettings::new(width as usize, height as usize)
            .resample(resample)
            .dither(dither)
            .strength(self.dither_strength)
            .palette(palette)
            .adjustments(
                Adjustments::new()
                    .brightness(self.brightness)
                    .contrast(self.contrast)
                    .saturation(self.saturation),
            );
        if self.use_kmeans {
            settings = settings.kmeans(self.kmeans_colors);
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_quant::Rgb;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_neutral() {
        let settings: ProcessSettings = serde_json::from_value(json!({})).unwrap();
        assert_eq!(settings, ProcessSettings::default());

        let pipeline = settings.to_pipeline(40, 30).unwrap();
        assert_eq!(pipeline, PipelineSettings::new(40, 30));
    }

    #[test]
    fn test_full_settings() {
        let settings: ProcessSettings = serde_json::from_value(json!({
            "targetWidth": 16,
            "targetHeight": 8,
            "resamplingMethod": "lanczos",
            "ditherMethod": "floyd-steinberg",
            "ditherStrength": 50,
            "palette": ["#000", "#ffffff"],
            "useKmeans": false,
            "kmeansColors": 4,
            "brightness": 10,
            "contrast": -20,
            "saturation": 30
        }))
        .unwrap();

        let pipeline = settings.to_pipeline(100, 100).unwrap();
        assert_eq!((pipeline.width, pipeline.height), (16, 8));
        assert_eq!(pipeline.resample, ResampleMethod::Lanczos);
        assert_eq!(pipeline.dither, DitherMethod::FloydSteinberg);
        assert_eq!(pipeline.strength, 50.0);
        assert_eq!(pipeline.palette, vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
        assert_eq!(pipeline.kmeans_colors, None, "useKmeans is false");
        assert_eq!(
            pipeline.adjustments,
            Adjustments::new().brightness(10.0).contrast(-20.0).saturation(30.0)
        );
    }

    #[test]
    fn test_kmeans_flag() {
        let settings = ProcessSettings {
            use_kmeans: true,
            kmeans_colors: 6,
            ..Default::default()
        };
        assert_eq!(settings.to_pipeline(4, 4).unwrap().kmeans_colors, Some(6));
    }

    #[test]
    fn test_invalid_names_and_colors() {
        let bad_method = ProcessSettings {
            dither_method: "error-diffusion".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            bad_method.to_pipeline(1, 1),
            Err(WorkerError::Method(_))
        ));

        let bad_contrast = ProcessSettings {
            contrast: 259.0,
            ..Default::default()
        };
        let err = bad_contrast.to_pipeline(1, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid settings: contrast must be within -255..=255, got 259"
        );
        assert!(ProcessSettings {
            contrast: -255.0,
            ..Default::default()
        }
        .to_pipeline(1, 1)
        .is_ok());

        let bad_color = ProcessSettings {
            palette: vec!["#00000".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            bad_color.to_pipeline(1, 1),
            Err(WorkerError::Palette(_))
        ));
    }
}
