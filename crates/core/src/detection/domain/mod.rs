pub mod face_landmarker;
pub mod face_region_locator;
pub mod landmark_overlay;
pub mod landmark_synthesizer;
pub mod skin_classifier;
