use std::time::Instant;

use crate::analysis::domain::skin_tone::SkinToneExtractor;
use crate::detection::domain::face_landmarker::FaceLandmarker;
use crate::shared::config::TRACKING_PROGRESS_CAP;
use crate::shared::context::AnalysisContext;
use crate::shared::error::ScanError;
use crate::shared::frame::Frame;

use super::pipeline_logger::PipelineLogger;
use super::scan_result::ScanResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
    Complete,
    Failed,
}

/// Outcome of feeding one frame to a [`ScanSession`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScanStep {
    /// No face in this frame; `misses` consecutive frames so far.
    Searching { misses: usize },
    /// Face found, not yet stable long enough to capture.
    Tracking { progress: u32 },
    Complete(ScanResult),
}

/// Turns a stream of frames into one [`ScanResult`].
///
/// Each frame with a face advances progress by `progress_step`; once
/// progress reaches `capture_progress` that frame is analyzed and the
/// session completes. `max_attempts` consecutive frames without a face fail
/// the session. The caller owns the frame source and pacing and may
/// [`cancel`](Self::cancel) between any two frames.
pub struct ScanSession {
    context: AnalysisContext,
    landmarker: Box<dyn FaceLandmarker>,
    extractor: SkinToneExtractor,
    logger: Box<dyn PipelineLogger>,
    state: ScanState,
    progress: u32,
    misses: usize,
}

impl ScanSession {
    pub fn new(
        context: AnalysisContext,
        landmarker: Box<dyn FaceLandmarker>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        let extractor = SkinToneExtractor::from_context(&context);
        Self {
            context,
            landmarker,
            extractor,
            logger,
            state: ScanState::Idle,
            progress: 0,
            misses: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn logger(&self) -> &dyn PipelineLogger {
        self.logger.as_ref()
    }

    /// Begins (or restarts) a scan.
    pub fn start(&mut self) {
        self.state = ScanState::Scanning;
        self.progress = self.context.config().initial_progress;
        self.misses = 0;
        self.logger.progress(self.progress);
        self.logger.info("Scan started");
    }

    /// Abandons the scan. Nothing is held across frames, so there is nothing
    /// to release.
    pub fn cancel(&mut self) {
        if self.state == ScanState::Scanning {
            self.logger.info("Scan cancelled");
        }
        self.state = ScanState::Idle;
        self.progress = 0;
        self.misses = 0;
    }

    pub fn process_frame(&mut self, frame: &Frame) -> Result<ScanStep, ScanError> {
        if self.state != ScanState::Scanning {
            return Err(ScanError::SessionNotActive);
        }

        let started = Instant::now();
        let detected = match self.landmarker.detect(frame) {
            Ok(detected) => detected,
            Err(e) => {
                self.state = ScanState::Failed;
                return Err(e);
            }
        };
        self.logger.timing("detect", elapsed_ms(started));
        self.logger.frame(frame.index(), detected.is_some());

        let config = self.context.config();
        let Some(landmarks) = detected else {
            self.misses += 1;
            if self.misses >= config.max_attempts {
                self.state = ScanState::Failed;
                log::warn!("Giving up after {} frames without a face", self.misses);
                return Err(ScanError::InsufficientFaceEvidence {
                    attempts: self.misses,
                });
            }
            return Ok(ScanStep::Searching {
                misses: self.misses,
            });
        };

        self.misses = 0;
        self.progress = self
            .progress
            .saturating_add(config.progress_step)
            .min(TRACKING_PROGRESS_CAP);

        if self.progress < config.capture_progress {
            self.logger.progress(self.progress);
            return Ok(ScanStep::Tracking {
                progress: self.progress,
            });
        }

        let started = Instant::now();
        let result = ScanResult::analyze(frame, &landmarks, &self.extractor);
        self.logger.timing("analyze", elapsed_ms(started));

        self.progress = 100;
        self.state = ScanState::Complete;
        self.logger.progress(self.progress);
        log::info!(
            "Scan complete on frame {}: {} skin, {} face",
            frame.index(),
            result.skin_tone.category,
            result.face_geometry.shape
        );
        Ok(ScanStep::Complete(result))
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::infrastructure::heuristic_landmarker::HeuristicLandmarker;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::shared::config::ScanConfig;
    use crate::shared::landmark::{Landmark, LandmarkSet};
    use std::collections::VecDeque;

    // --- Stubs ---

    /// Replays a fixed script of detections; `None` once exhausted.
    struct ScriptedLandmarker {
        script: VecDeque<Option<LandmarkSet>>,
    }

    impl ScriptedLandmarker {
        fn new(script: Vec<bool>) -> Self {
            let face = LandmarkSet::filled(Landmark::new(0.5, 0.5)).unwrap();
            Self {
                script: script
                    .into_iter()
                    .map(|found| found.then(|| face.clone()))
                    .collect(),
            }
        }
    }

    impl FaceLandmarker for ScriptedLandmarker {
        fn detect(&mut self, _frame: &Frame) -> Result<Option<LandmarkSet>, ScanError> {
            Ok(self.script.pop_front().flatten())
        }
    }

    struct FailingLandmarker;

    impl FaceLandmarker for FailingLandmarker {
        fn detect(&mut self, _frame: &Frame) -> Result<Option<LandmarkSet>, ScanError> {
            Err(ScanError::malformed("sensor glitch"))
        }
    }

    // --- Helpers ---

    fn context(max_attempts: usize) -> AnalysisContext {
        AnalysisContext::new(ScanConfig {
            max_attempts,
            ..ScanConfig::default()
        })
        .unwrap()
    }

    fn session(script: Vec<bool>, max_attempts: usize) -> ScanSession {
        ScanSession::new(
            context(max_attempts),
            Box::new(ScriptedLandmarker::new(script)),
            Box::new(NullPipelineLogger),
        )
    }

    fn skin_frame() -> Frame {
        Frame::filled(32, 32, [200, 150, 120]).unwrap()
    }

    // --- Tests ---

    #[test]
    fn test_starts_idle() {
        let s = session(vec![], 5);
        assert_eq!(s.state(), ScanState::Idle);
        assert_eq!(s.progress(), 0);
    }

    #[test]
    fn test_process_before_start_rejected() {
        let mut s = session(vec![true], 5);
        assert!(matches!(
            s.process_frame(&skin_frame()),
            Err(ScanError::SessionNotActive)
        ));
    }

    #[test]
    fn test_start_sets_initial_progress() {
        let mut s = session(vec![], 5);
        s.start();
        assert_eq!(s.state(), ScanState::Scanning);
        assert_eq!(s.progress(), 20);
    }

    #[test]
    fn test_detections_advance_progress_until_capture() {
        // 20 -> 25, 30, ... 75 (11 tracking steps), 80 captures on the 12th
        let mut s = session(vec![true; 12], 5);
        s.start();
        for i in 1..=11 {
            let step = s.process_frame(&skin_frame()).unwrap();
            assert_eq!(step, ScanStep::Tracking { progress: 20 + 5 * i });
        }
        let step = s.process_frame(&skin_frame()).unwrap();
        let ScanStep::Complete(result) = step else {
            panic!("expected completion, got {step:?}");
        };
        assert_eq!(result.skin_tone.rgb, [200, 150, 120]);
        assert_eq!(s.state(), ScanState::Complete);
        assert_eq!(s.progress(), 100);
    }

    #[test]
    fn test_misses_do_not_advance_progress() {
        let mut s = session(vec![false, true, false], 5);
        s.start();
        assert_eq!(
            s.process_frame(&skin_frame()).unwrap(),
            ScanStep::Searching { misses: 1 }
        );
        assert_eq!(
            s.process_frame(&skin_frame()).unwrap(),
            ScanStep::Tracking { progress: 25 }
        );
        assert_eq!(
            s.process_frame(&skin_frame()).unwrap(),
            ScanStep::Searching { misses: 1 }
        );
        assert_eq!(s.progress(), 25);
    }

    #[test]
    fn test_consecutive_misses_exhaust_attempts() {
        let mut s = session(vec![false; 3], 3);
        s.start();
        s.process_frame(&skin_frame()).unwrap();
        s.process_frame(&skin_frame()).unwrap();
        let err = s.process_frame(&skin_frame()).unwrap_err();
        assert!(matches!(err, ScanError::InsufficientFaceEvidence { attempts: 3 }));
        assert_eq!(s.state(), ScanState::Failed);
        assert!(matches!(
            s.process_frame(&skin_frame()),
            Err(ScanError::SessionNotActive)
        ));
    }

    #[test]
    fn test_detector_error_fails_session() {
        let mut s = ScanSession::new(
            context(5),
            Box::new(FailingLandmarker),
            Box::new(NullPipelineLogger),
        );
        s.start();
        assert!(matches!(
            s.process_frame(&skin_frame()),
            Err(ScanError::MalformedFrame { .. })
        ));
        assert_eq!(s.state(), ScanState::Failed);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut s = session(vec![true, true], 5);
        s.start();
        s.process_frame(&skin_frame()).unwrap();
        s.cancel();
        assert_eq!(s.state(), ScanState::Idle);
        assert_eq!(s.progress(), 0);
        assert!(s.process_frame(&skin_frame()).is_err());
    }

    #[test]
    fn test_restart_after_failure() {
        let mut s = session(vec![false, true], 1);
        s.start();
        assert!(s.process_frame(&skin_frame()).is_err());
        s.start();
        assert_eq!(
            s.process_frame(&skin_frame()).unwrap(),
            ScanStep::Tracking { progress: 25 }
        );
    }

    #[test]
    fn test_progress_capped_at_tracking_limit() {
        // capture at 90 with step 50: 20 -> 70 -> capped 90 -> capture
        let ctx = AnalysisContext::new(ScanConfig {
            progress_step: 50,
            capture_progress: 90,
            ..ScanConfig::default()
        })
        .unwrap();
        let mut s = ScanSession::new(
            ctx,
            Box::new(ScriptedLandmarker::new(vec![true, true])),
            Box::new(NullPipelineLogger),
        );
        s.start();
        assert_eq!(
            s.process_frame(&skin_frame()).unwrap(),
            ScanStep::Tracking { progress: 70 }
        );
        assert!(matches!(
            s.process_frame(&skin_frame()).unwrap(),
            ScanStep::Complete(_)
        ));
    }

    #[test]
    fn test_largest_step_captures_on_first_face() {
        // 20 + 100 saturates at the 90 cap, past capture at 80
        let ctx = AnalysisContext::new(ScanConfig {
            progress_step: 100,
            ..ScanConfig::default()
        })
        .unwrap();
        let mut s = ScanSession::new(
            ctx,
            Box::new(ScriptedLandmarker::new(vec![true])),
            Box::new(NullPipelineLogger),
        );
        s.start();
        assert!(matches!(
            s.process_frame(&skin_frame()).unwrap(),
            ScanStep::Complete(_)
        ));
        assert_eq!(s.progress(), 100);
    }

    #[test]
    fn test_huge_step_rejected_before_session() {
        let result = AnalysisContext::new(ScanConfig {
            progress_step: u32::MAX,
            ..ScanConfig::default()
        });
        assert!(matches!(result, Err(ScanError::InvalidConfig(_))));
    }

    #[test]
    fn test_start_progress_stays_below_capture() {
        let mut s = session(vec![true], 5);
        s.start();
        assert!(s.progress() < 80);
        assert_eq!(
            s.process_frame(&skin_frame()).unwrap(),
            ScanStep::Tracking { progress: 25 }
        );
    }

    #[test]
    fn test_end_to_end_with_heuristic_landmarker() {
        let ctx = AnalysisContext::default();
        let mut s = ScanSession::new(
            ctx.clone(),
            Box::new(HeuristicLandmarker::new(&ctx)),
            Box::new(NullPipelineLogger),
        );
        s.start();
        let black = Frame::filled(32, 32, [0, 0, 0]).unwrap();
        assert_eq!(
            s.process_frame(&black).unwrap(),
            ScanStep::Searching { misses: 1 }
        );

        let mut outcome = None;
        for i in 0..20 {
            if let ScanStep::Complete(result) = s.process_frame(&skin_frame().with_index(i)).unwrap() {
                outcome = Some(result);
                break;
            }
        }
        let result = outcome.expect("scan should complete");
        assert_eq!(result.skin_tone.category.to_string(), "medium");
    }
}
