pub mod analyze_image_use_case;
pub mod pipeline_logger;
pub mod scan_result;
pub mod scan_sequence_use_case;
pub mod scan_session;
