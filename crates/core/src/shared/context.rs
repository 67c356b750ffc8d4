use std::sync::Arc;

use super::config::ScanConfig;
use super::error::ScanError;

/// Scan capability handed to every pipeline stage.
///
/// Owned by whoever drives the capture loop and built once per session from
/// a validated [`ScanConfig`]. Holding one is proof the configuration was
/// checked; there is no process-wide initialization state. Cloning shares
/// the same configuration.
#[derive(Clone, Debug)]
pub struct AnalysisContext {
    config: Arc<ScanConfig>,
}

impl AnalysisContext {
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        log::debug!("Analysis context ready: {config:?}");
        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self {
            config: Arc::new(ScanConfig::default()),
        }
    }
}
