pub mod base64;
pub mod time;
pub mod url;

// Re-export common utilities
pub use time::{derive_time, TimeUnit};
pub use url::{parse_url, ParsedUrl};
