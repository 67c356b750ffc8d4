pub mod heuristic_landmarker;
