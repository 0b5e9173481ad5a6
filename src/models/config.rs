use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::path::Path;

/// Worker configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Seed for the k-means random source. Unset means entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Capacity of the request queue in front of the worker
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,

    /// Largest accepted source or target raster, in pixels
    #[serde(default = "default_max_pixels")]
    pub max_pixels: u64,
}

fn default_queue_depth() -> usize {
    16
}

fn default_max_pixels() -> u64 {
    16_777_216 // 4096 x 4096
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            queue_depth: default_queue_depth(),
            max_pixels: default_max_pixels(),
        }
    }
}

impl WorkerConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load configuration from `path`, or defaults when no path is given.
    ///
    /// Unreadable or invalid files are logged and replaced by defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        seeded = config.seed.is_some(),
                        queue_depth = config.queue_depth,
                        max_pixels = config.max_pixels,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Random source for the worker: seeded when configured.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
