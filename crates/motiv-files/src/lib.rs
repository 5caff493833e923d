//! Bot-API file resolution and download.
//!
//! A photo arrives as an opaque file identifier, not a URL. Fetching it
//! is a two-step dance: ask the bot API to resolve the identifier to a
//! server-side path, then download the bytes from the file endpoint.

pub mod client;
pub mod error;

pub use client::{FileApi, FileApiConfig};
pub use error::{FileError, FileResult};
