pub mod client;
pub mod error;
pub mod fetcher;
mod response;
