use std::ops::Range;

/// Landmarks per face, MediaPipe FaceMesh layout size.
pub const LANDMARK_COUNT: usize = 468;

pub const CONTOUR_RANGE: Range<usize> = 0..17;
pub const LEFT_EYE_RANGE: Range<usize> = 17..37;
pub const RIGHT_EYE_RANGE: Range<usize> = 37..57;
pub const NOSE_RANGE: Range<usize> = 57..67;
pub const MOUTH_RANGE: Range<usize> = 67..107;
pub const FILLER_RANGE: Range<usize> = 107..LANDMARK_COUNT;

pub const TOP_OF_HEAD: usize = 10;
pub const CHIN: usize = 152;
pub const LEFT_TEMPLE: usize = 127;
pub const RIGHT_TEMPLE: usize = 356;
pub const LEFT_CHEEKBONE: usize = 234;
pub const RIGHT_CHEEKBONE: usize = 454;
pub const LEFT_JAW: usize = 172;
pub const RIGHT_JAW: usize = 397;

/// Measurement points drawn on the preview overlay.
pub const KEY_POINTS: [usize; 8] = [
    TOP_OF_HEAD,
    CHIN,
    LEFT_CHEEKBONE,
    RIGHT_CHEEKBONE,
    LEFT_TEMPLE,
    RIGHT_TEMPLE,
    LEFT_JAW,
    RIGHT_JAW,
];

/// Cheeks (330, 101), forehead (10), nose bridge (168), cheekbones (234, 454).
pub const SKIN_SAMPLE_POINTS: [usize; 6] = [330, 101, 10, 168, 234, 454];

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
