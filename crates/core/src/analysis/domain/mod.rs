pub mod face_shape;
pub mod skin_tone;
