mod client;
mod error;
pub mod pagination;
mod platform;
mod upload;

pub use client::CrowdinClient;
pub use error::CrowdinError;
pub use pagination::{Page, Paginator};
pub use platform::Platform;
pub use upload::{BodyShape, RejectedAttempt, UploadOutcome};
