pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod frame;
pub mod landmark;
pub mod region;
