pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod export;
pub mod ocr;
pub mod pipeline;
pub mod preprocess;
pub mod roster;
pub mod scanner;
