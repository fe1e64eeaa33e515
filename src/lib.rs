pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod summarizer;

pub use error::{Error, Result, UpstreamError};
