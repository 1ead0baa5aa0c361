// SPDX-License-Identifier: MPL-2.0
//! Wire types for the gallery collection and the field limits enforced on upload.

use serde::{Deserialize, Serialize};

/// Minimum title length in characters.
pub const TITLE_MIN_CHARS: usize = 2;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 20;

/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 65;

/// Hard ceiling on the uploaded image payload, in bytes.
pub const IMAGE_MAX_BYTES: usize = 10 * 1024;

/// MIME types the backend accepts for image uploads.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// Logical cache key identifying the gallery's paginated collection.
pub const GALLERY_KEY: &str = "images";

/// Opaque token representing a position in the backend's ordered collection.
pub type Cursor = String;

/// A gallery image. Immutable once created; the client holds read-only copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Server-assigned unique identifier.
    pub id: String,
    /// Display title, 2-20 characters.
    pub title: String,
    /// Display description, up to 65 characters.
    pub description: String,
    /// Resolvable media locator.
    pub url: String,
    /// Creation timestamp; the backend orders newest first by this key.
    pub ts: i64,
}

/// One batch of images plus the cursor for the next batch.
///
/// `after == None` signals the end of the collection. Ordering of images
/// within a page is server-defined and preserved as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Images in this batch, newest first.
    pub data: Vec<Image>,
    /// Cursor for the next page, absent on the final page.
    #[serde(default)]
    pub after: Option<Cursor>,
}

impl Page {
    /// Returns the number of images in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether this page carries no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns whether another page can be requested after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.after.is_some()
    }
}
