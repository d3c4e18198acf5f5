/// Download utilities
pub mod download;
/// Remote metadata endpoints and their response formats
pub mod meta;
