//! Core logic for fakelink.
//!
//! This crate holds everything between the HTTP layer and the outside world's
//! storage. No web framework types appear here.
//!
//! # Modules
//!
//! - `images` - Preview image storage (in-memory and S3-compatible backends)
//! - `links` - Link values, validation and the link service
//! - `preview` - HTML rendering of link previews

pub mod images;
pub mod links;
pub mod preview;
