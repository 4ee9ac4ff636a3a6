pub mod books;
pub mod camera;
pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod pipeline;
pub mod view;
pub mod vision;
