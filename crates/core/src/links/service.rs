//! Link service: creation, lookup and hosted preview images.

use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use image::DynamicImage;
use rand::Rng;
use rand::distributions::Alphanumeric;
use tracing::info;

use super::error::LinkError;
use super::showcase::random_link;
use super::types::{Link, LinkValues};
use crate::images::ImageStore;

/// Length of generated slugs.
pub const SLUG_LEN: usize = 8;

/// A slug is reserved before its image uploads and becomes a link once the
/// upload succeeds. Reserved slugs are invisible to lookups.
#[derive(Debug, Clone)]
enum Slot {
    Reserved,
    Ready(Link),
}

/// Creates and serves link previews.
///
/// Links live in process memory; preview images go to the injected
/// [`ImageStore`] under the link's slug.
pub struct LinkService<S: ImageStore> {
    images: S,
    links: DashMap<String, Slot>,
}

impl<S: ImageStore> LinkService<S> {
    /// Create a link service over the given image store.
    #[must_use]
    pub fn new(images: S) -> Self {
        Self {
            images,
            links: DashMap::new(),
        }
    }

    /// The image store backing this service.
    #[must_use]
    pub fn images(&self) -> &S {
        &self.images
    }

    /// Create a new link, uploading `image` first when one is attached.
    ///
    /// An uploaded image replaces `values.image` with the URL the store
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the values are invalid or the image cannot be
    /// stored. Nothing is recorded in either case.
    pub async fn create(
        &self,
        mut values: LinkValues,
        image: Option<DynamicImage>,
    ) -> Result<Link, LinkError> {
        values.validate()?;

        let slug = self.reserve_slug();
        let hosted_image = image.is_some();

        if let Some(image) = image {
            match self.images.put(&slug, image).await {
                Ok(url) => values.image = Some(url),
                Err(e) => {
                    self.links
                        .remove_if(&slug, |_, slot| matches!(slot, Slot::Reserved));
                    return Err(e.into());
                }
            }
        }

        let link = Link {
            slug: slug.clone(),
            values,
            hosted_image,
            created_at: Utc::now(),
        };
        self.links.insert(slug, Slot::Ready(link.clone()));

        info!(slug = %link.slug, hosted_image, "Link created");
        Ok(link)
    }

    /// Look up a link by slug.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] for unknown slugs.
    pub fn get(&self, slug: &str) -> Result<Link, LinkError> {
        match self.links.get(slug).as_deref() {
            Some(Slot::Ready(link)) => Ok(link.clone()),
            Some(Slot::Reserved) | None => Err(LinkError::not_found(slug)),
        }
    }

    /// The stored preview image of a link, if the store hosts one.
    pub async fn hosted_image(&self, link: &Link) -> Option<DynamicImage> {
        if !link.hosted_image {
            return None;
        }
        self.images.get(&link.slug).await
    }

    /// A link built from the showcase set.
    #[must_use]
    pub fn random(&self) -> Link {
        random_link()
    }

    /// Number of links created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links
            .iter()
            .filter(|entry| matches!(entry.value(), Slot::Ready(_)))
            .count()
    }

    /// Whether no link has been created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Claim a fresh slug so no other create can upload under it.
    fn reserve_slug(&self) -> String {
        loop {
            if let Entry::Vacant(entry) = self.links.entry(generate_slug()) {
                let slug = entry.key().clone();
                entry.insert(Slot::Reserved);
                return slug;
            }
        }
    }
}

fn generate_slug() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SLUG_LEN)
        .map(char::from)
        .collect()
}
