//! Request handlers.

pub mod download;
pub mod health;
pub mod jobs;
pub mod upload;

pub use download::*;
pub use health::*;
pub use jobs::*;
pub use upload::*;
