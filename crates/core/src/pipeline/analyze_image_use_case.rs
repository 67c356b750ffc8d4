use std::path::Path;

use crate::analysis::domain::skin_tone::SkinToneExtractor;
use crate::detection::domain::face_landmarker::FaceLandmarker;
use crate::detection::domain::landmark_overlay::draw_key_points;
use crate::shared::context::AnalysisContext;
use crate::shared::error::ScanError;
use crate::video::domain::image_reader::ImageReader;
use crate::video::domain::image_writer::ImageWriter;

use super::scan_result::ScanResult;

/// Single-image analysis: read → detect → classify + extract → (overlay).
pub struct AnalyzeImageUseCase {
    reader: Box<dyn ImageReader>,
    landmarker: Box<dyn FaceLandmarker>,
    extractor: SkinToneExtractor,
    overlay_writer: Option<Box<dyn ImageWriter>>,
}

impl AnalyzeImageUseCase {
    pub fn new(
        context: &AnalysisContext,
        reader: Box<dyn ImageReader>,
        landmarker: Box<dyn FaceLandmarker>,
        overlay_writer: Option<Box<dyn ImageWriter>>,
    ) -> Self {
        Self {
            reader,
            landmarker,
            extractor: SkinToneExtractor::from_context(context),
            overlay_writer,
        }
    }

    /// Analyzes the face in `input_path`.
    ///
    /// A still image gets exactly one attempt, so no face is reported as
    /// [`ScanError::InsufficientFaceEvidence`]. When an overlay writer is
    /// configured and `overlay_path` is given, the measurement key points
    /// are drawn onto a copy of the frame and written there.
    pub fn execute(
        &mut self,
        input_path: &Path,
        overlay_path: Option<&Path>,
    ) -> Result<ScanResult, ScanError> {
        let frame = self.reader.read(input_path)?;

        let landmarks = self
            .landmarker
            .detect(&frame)?
            .ok_or(ScanError::InsufficientFaceEvidence { attempts: 1 })?;

        let result = ScanResult::analyze(&frame, &landmarks, &self.extractor);

        if let (Some(writer), Some(path)) = (&self.overlay_writer, overlay_path) {
            let mut annotated = frame.clone();
            draw_key_points(&mut annotated, &landmarks);
            writer.write(path, &annotated)?;
            log::info!("Landmark overlay written to {}", path.display());
        }

        Ok(result)
    }
}
