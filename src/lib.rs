pub mod config;
pub mod error;
pub mod git;
pub mod guard;
pub mod history;
pub mod pipeline;
pub mod rewrite;
pub mod ui;
pub mod version;

pub use error::{BumpError, Result};
