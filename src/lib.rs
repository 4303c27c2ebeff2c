pub mod config;
pub mod daemon;
pub mod envelope;
pub mod error;
pub mod interfaces;
pub mod providers;
pub mod services;

pub use crate::config::Config;
pub use crate::envelope::{Envelope, Payload, SearchForm, Status};
pub use crate::error::{Result, TubeFetchError};
pub use crate::services::search::{CommentRecord, SearchService, VideoRecord};
