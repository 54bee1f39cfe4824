//! User-generated link previews.
//!
//! A link is a set of Open Graph values plus a slug. When a preview image is
//! uploaded with the link it is stored in the [`ImageStore`](crate::images::ImageStore)
//! under that slug.

mod error;
mod service;
mod showcase;
mod types;

pub use error::{LinkError, LinkValidationError};
pub use service::{LinkService, SLUG_LEN};
pub use showcase::{SHOWCASE_SLUG, random_link, showcase_values};
pub use types::{
    Link, LinkValues, MAX_DESCRIPTION_LEN, MAX_SITE_NAME_LEN, MAX_TITLE_LEN,
};
