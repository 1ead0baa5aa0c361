// SPDX-License-Identifier: MPL-2.0
//! Upload validation and the mutation-then-invalidate protocol.
//!
//! # Submit protocol
//!
//! 1. Validate all fields locally; the first violated rule fails the submit
//!    with a field-scoped [`Error::Validation`] and no network call is made.
//! 2. Await the backend's create-image call.
//! 3. Whatever the outcome, reset the form fields and close the containing
//!    dialog; no partial form state survives a submit attempt.
//! 4. On success, invalidate the gallery's cache entry (the next read
//!    re-fetches from scratch) and notify success; on failure, notify error.
//!
//! Raw transport errors never propagate past the mutator as a user-visible
//! signal; the notification is the user's feedback channel. The returned
//! `Result` exists for the caller's control flow only.

use crate::cache::PaginationCache;
use crate::error::{Error, Result};
use crate::gateway::ImageSink;
use crate::model::{
    Image, ACCEPTED_MIME_TYPES, DESCRIPTION_MAX_CHARS, GALLERY_KEY, IMAGE_MAX_BYTES,
    TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
use crate::notify::{Notification, Notifier};
use std::sync::Arc;

/// Form fields for a new image, as captured from the upload dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUpload {
    /// Raw file payload.
    pub bytes: Vec<u8>,
    /// MIME type reported for the payload, e.g. `image/png`.
    pub mime_type: String,
    /// Title, 2-20 characters.
    pub title: String,
    /// Description, up to 65 characters.
    pub description: String,
}

/// One field-validation rule. Rules are evaluated in a fixed order per field
/// and the first failure wins.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// The field must be non-empty.
    Required,
    /// The payload must not exceed this many bytes.
    MaxBytes(usize),
    /// The MIME type must be on the allow-list.
    MimeAllowed(&'static [&'static str]),
    /// Character count must fall within `[min, max]`.
    LengthBetween(usize, usize),
    /// Character count must not exceed `max`.
    MaxLength(usize),
}

impl Rule {
    /// Applies this rule to a field of `upload`, returning a reason on failure.
    fn check(self, field: &'static str, upload: &ImageUpload) -> std::result::Result<(), String> {
        match self {
            Rule::Required => {
                let empty = match field {
                    "image" => upload.bytes.is_empty(),
                    "title" => upload.title.is_empty(),
                    _ => upload.description.is_empty(),
                };
                if empty {
                    return Err("required".to_string());
                }
            }
            Rule::MaxBytes(max) => {
                if upload.bytes.len() > max {
                    return Err(format!(
                        "file is {} bytes, the maximum is {max}",
                        upload.bytes.len()
                    ));
                }
            }
            Rule::MimeAllowed(allowed) => {
                if !allowed.contains(&upload.mime_type.as_str()) {
                    return Err(format!(
                        "unsupported type {}, accepted: {}",
                        upload.mime_type,
                        allowed.join(", ")
                    ));
                }
            }
            Rule::LengthBetween(min, max) => {
                let len = text_field(field, upload).chars().count();
                if len < min || len > max {
                    return Err(format!("must be between {min} and {max} characters"));
                }
            }
            Rule::MaxLength(max) => {
                let len = text_field(field, upload).chars().count();
                if len > max {
                    return Err(format!("must be at most {max} characters"));
                }
            }
        }
        Ok(())
    }
}

fn text_field<'a>(field: &'static str, upload: &'a ImageUpload) -> &'a str {
    match field {
        "title" => &upload.title,
        _ => &upload.description,
    }
}

/// Per-field rule sets, in evaluation order.
const RULES: [(&str, &[Rule]); 3] = [
    (
        "image",
        &[
            Rule::Required,
            Rule::MaxBytes(IMAGE_MAX_BYTES),
            Rule::MimeAllowed(&ACCEPTED_MIME_TYPES),
        ],
    ),
    (
        "title",
        &[
            Rule::Required,
            Rule::LengthBetween(TITLE_MIN_CHARS, TITLE_MAX_CHARS),
        ],
    ),
    (
        "description",
        &[Rule::Required, Rule::MaxLength(DESCRIPTION_MAX_CHARS)],
    ),
];

/// Validates every field of `upload` against the fixed rule sets.
///
/// # Errors
///
/// Returns [`Error::Validation`] for the first violated rule, carrying the
/// field name and the reason.
pub fn validate(upload: &ImageUpload) -> Result<()> {
    for (field, rules) in RULES {
        for rule in rules {
            rule.check(field, upload)
                .map_err(|reason| Error::Validation { field, reason })?;
        }
    }
    Ok(())
}

/// Form-state side of the upload dialog, implemented by the presentation layer.
///
/// Both methods are called exactly once per submit attempt that passed
/// validation, regardless of whether the network call succeeded.
pub trait UploadDialog: Send + Sync {
    /// Clears the dialog's input fields.
    fn reset_fields(&self);
    /// Closes the dialog.
    fn close(&self);
}

/// Validates and submits new images, invalidating the gallery cache on success.
pub struct UploadMutator {
    sink: Arc<dyn ImageSink>,
    cache: Arc<PaginationCache>,
    notifier: Arc<dyn Notifier>,
}

impl UploadMutator {
    /// Creates a mutator writing through `sink` and invalidating `cache`.
    #[must_use]
    pub fn new(
        sink: Arc<dyn ImageSink>,
        cache: Arc<PaginationCache>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            sink,
            cache,
            notifier,
        }
    }

    /// Submits `upload` through the full protocol described in the module docs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a field fails validation (the
    /// dialog is left untouched), or the gateway error when the backend call
    /// fails (after the dialog has been reset and closed, and an error
    /// notification delivered).
    pub async fn submit(&self, upload: &ImageUpload, dialog: &dyn UploadDialog) -> Result<Image> {
        validate(upload)?;

        let result = self.sink.create_image(upload).await;

        // No partial form state survives a submit attempt.
        dialog.reset_fields();
        dialog.close();

        // The success notification is only sent once the write has actually
        // resolved; an upload the backend rejected must not read as uploaded.
        match result {
            Ok(image) => {
                self.cache.invalidate(GALLERY_KEY).await;
                self.notifier
                    .notify(Notification::success("Image successfully uploaded"));
                Ok(image)
            }
            Err(err) => {
                tracing::warn!(error = %err, "image upload failed");
                self.notifier
                    .notify(Notification::error("Something went wrong, try again"));
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for UploadMutator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadMutator").finish_non_exhaustive()
    }
}
