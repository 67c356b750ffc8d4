use crate::detection::domain::face_landmarker::FaceLandmarker;
use crate::detection::domain::face_region_locator::FaceRegionLocator;
use crate::detection::domain::landmark_synthesizer::LandmarkSynthesizer;
use crate::shared::context::AnalysisContext;
use crate::shared::error::ScanError;
use crate::shared::frame::Frame;
use crate::shared::landmark::LandmarkSet;

/// Color-threshold face finder with procedurally placed landmarks.
///
/// Locates the skin-colored bounding box, then lays out a synthetic
/// landmark set inside it. A placeholder until a trained landmark model
/// sits behind [`FaceLandmarker`].
pub struct HeuristicLandmarker {
    locator: FaceRegionLocator,
    synthesizer: LandmarkSynthesizer,
}

impl HeuristicLandmarker {
    pub fn new(context: &AnalysisContext) -> Self {
        Self {
            locator: FaceRegionLocator::from_config(context.config()),
            synthesizer: LandmarkSynthesizer::new(),
        }
    }
}

impl FaceLandmarker for HeuristicLandmarker {
    fn detect(&mut self, frame: &Frame) -> Result<Option<LandmarkSet>, ScanError> {
        let Some(region) = self.locator.locate(frame) else {
            return Ok(None);
        };
        log::debug!(
            "Frame {}: face region x={}..{} y={}..{}",
            frame.index(),
            region.min_x,
            region.max_x,
            region.min_y,
            region.max_y
        );
        Ok(Some(self.synthesizer.synthesize(
            &region,
            frame.width(),
            frame.height(),
        )))
    }
}
