pub mod engine;
pub mod file_ops;
pub mod gui;
pub mod hashers;
pub mod logging;
pub mod models;
