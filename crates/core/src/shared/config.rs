use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ScanError;

/// Tunables for one scan. Missing fields in a JSON file take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Region locator samples every Nth pixel on both axes.
    pub sample_stride: u32,
    /// Fraction of sampled pixels that must be skin-colored.
    pub min_coverage: f64,
    /// Side of the square skin-tone sampling window, in pixels (odd).
    pub sample_window: u32,
    /// Consecutive frames without a face before a session gives up.
    pub max_attempts: usize,
    pub initial_progress: u32,
    pub progress_step: u32,
    /// Progress at which the current frame is analyzed.
    pub capture_progress: u32,
}

/// Progress never exceeds this until the final capture.
pub const TRACKING_PROGRESS_CAP: u32 = 90;

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sample_stride: 1,
            min_coverage: 0.01,
            sample_window: 5,
            max_attempts: 150,
            initial_progress: 20,
            progress_step: 5,
            capture_progress: 80,
        }
    }
}

impl ScanConfig {
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let json = fs::read_to_string(path).map_err(|source| ScanError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ScanError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.sample_stride == 0 {
            return Err(ScanError::InvalidConfig("sample_stride must be at least 1".into()));
        }
        if !(self.min_coverage > 0.0 && self.min_coverage <= 1.0) {
            return Err(ScanError::InvalidConfig(format!(
                "min_coverage must be in (0, 1], got {}",
                self.min_coverage
            )));
        }
        if self.sample_window == 0 || self.sample_window % 2 == 0 {
            return Err(ScanError::InvalidConfig(format!(
                "sample_window must be a positive odd number, got {}",
                self.sample_window
            )));
        }
        if self.max_attempts == 0 {
            return Err(ScanError::InvalidConfig("max_attempts must be at least 1".into()));
        }
        if !(1..=100).contains(&self.progress_step) {
            return Err(ScanError::InvalidConfig(format!(
                "progress_step must be in 1..=100, got {}",
                self.progress_step
            )));
        }
        if self.capture_progress > TRACKING_PROGRESS_CAP {
            return Err(ScanError::InvalidConfig(format!(
                "capture_progress must not exceed {TRACKING_PROGRESS_CAP}, got {}",
                self.capture_progress
            )));
        }
        if self.initial_progress >= self.capture_progress {
            return Err(ScanError::InvalidConfig(format!(
                "initial_progress must be below capture_progress ({}), got {}",
                self.capture_progress, self.initial_progress
            )));
        }
        Ok(())
    }
}
