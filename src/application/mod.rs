// Application layer - use cases shared by the web front end and the CLI

pub mod error;
mod service;
mod submission;

pub use error::*;
pub use service::*;
pub use submission::*;
