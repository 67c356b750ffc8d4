use std::path::PathBuf;

use crate::shared::error::ScanError;
use crate::video::domain::image_reader::ImageReader;

use super::scan_result::ScanResult;
use super::scan_session::{ScanSession, ScanState, ScanStep};

/// Feeds a sequence of image files through a [`ScanSession`], in order.
///
/// Plays the part of the camera loop for recorded frames: one file per
/// tick, stopping as soon as the session completes or fails.
pub struct ScanSequenceUseCase {
    reader: Box<dyn ImageReader>,
    session: ScanSession,
}

impl ScanSequenceUseCase {
    pub fn new(reader: Box<dyn ImageReader>, session: ScanSession) -> Self {
        Self { reader, session }
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    /// Scans `inputs` in order until the session completes.
    ///
    /// A session that fails keeps its `Failed` state; any other early exit
    /// (unreadable file, frames exhausted) cancels it back to `Idle`.
    pub fn execute(&mut self, inputs: &[PathBuf]) -> Result<ScanResult, ScanError> {
        self.session.start();
        let outcome = self.scan(inputs);
        self.session.logger().summary();
        if outcome.is_err() && self.session.state() == ScanState::Scanning {
            self.session.cancel();
        }
        outcome
    }

    fn scan(&mut self, inputs: &[PathBuf]) -> Result<ScanResult, ScanError> {
        for (index, path) in inputs.iter().enumerate() {
            let frame = self.reader.read(path)?.with_index(index);
            match self.session.process_frame(&frame)? {
                ScanStep::Complete(result) => return Ok(result),
                ScanStep::Searching { misses } => {
                    log::debug!("{}: no face ({misses} in a row)", path.display());
                }
                ScanStep::Tracking { progress } => {
                    log::debug!("{}: tracking ({progress}%)", path.display());
                }
            }
        }

        Err(ScanError::SequenceExhausted {
            frames: inputs.len(),
        })
    }
}
