use serde::{Deserialize, Serialize};

use crate::analysis::domain::face_shape::{classify, FaceGeometry};
use crate::analysis::domain::skin_tone::{SkinTone, SkinToneExtractor};
use crate::shared::frame::Frame;
use crate::shared::landmark::LandmarkSet;

/// Final artifact of one scan. The pipeline keeps no reference to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub skin_tone: SkinTone,
    pub face_geometry: FaceGeometry,
}

impl ScanResult {
    /// Runs shape classification and tone extraction on one captured frame.
    pub fn analyze(frame: &Frame, landmarks: &LandmarkSet, extractor: &SkinToneExtractor) -> Self {
        Self {
            skin_tone: extractor.extract(frame, landmarks),
            face_geometry: classify(landmarks),
        }
    }

    /// Multi-line human readable report.
    pub fn summary(&self) -> String {
        let tone = &self.skin_tone;
        let geometry = &self.face_geometry;
        let m = &geometry.measurements;
        [
            format!("Skin tone:  {} ({})", tone.category, tone.hex),
            format!(
                "  RGB {:?}  L*a*b* ({:.1}, {:.1}, {:.1})",
                tone.rgb, tone.lab[0], tone.lab[1], tone.lab[2]
            ),
            format!("Face shape: {}", geometry.shape),
            format!("  {}", geometry.shape.description()),
            format!(
                "  width {:.3}  height {:.3}  ratio {:.2}",
                m.face_width, m.face_height, m.width_to_height_ratio
            ),
            format!(
                "  forehead {:.3}  cheekbones {:.3}  jawline {:.3}",
                m.forehead_width, m.cheekbone_width, m.jawline_width
            ),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::landmark_synthesizer::LandmarkSynthesizer;
    use crate::shared::region::FaceRegion;

    fn landmarks() -> LandmarkSet {
        LandmarkSynthesizer::new().synthesize(&FaceRegion::from_bounds(4, 28, 2, 30), 32, 32)
    }

    fn result() -> ScanResult {
        let frame = Frame::filled(32, 32, [200, 150, 120]).unwrap();
        ScanResult::analyze(&frame, &landmarks(), &SkinToneExtractor::default())
    }

    #[test]
    fn test_analyze_combines_both_stages() {
        let r = result();
        assert_eq!(r.skin_tone.rgb, [200, 150, 120]);
        assert_eq!(r.face_geometry, classify(&landmarks()));
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(result()).unwrap();
        assert_eq!(json["skin_tone"]["hex"], "#C89678");
        assert_eq!(json["skin_tone"]["category"], "medium");
        assert!(json["face_geometry"]["shape"].is_string());
        assert!(json["face_geometry"]["measurements"]["width_to_height_ratio"].is_number());
    }

    #[test]
    fn test_summary_mentions_category_and_shape() {
        let r = result();
        let text = r.summary();
        assert!(text.contains("medium"));
        assert!(text.contains("#C89678"));
        assert!(text.contains(&format!("Face shape: {}", r.face_geometry.shape)));
    }
}
