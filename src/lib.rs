// SPDX-License-Identifier: MPL-2.0
//! `imagewall` is the client-side data pipeline of a cursor-paginated image
//! gallery.
//!
//! It covers the parts with real state-machine and consistency concerns:
//! incremental pagination merged into one growing list, the key-addressed
//! request cache backing it, the mutation-then-invalidate protocol used
//! after an upload, and the overlay selection state. Rendering, toasts, and
//! widgets stay on the host application's side of the [`notify::Notifier`]
//! and [`upload::UploadDialog`] seams.
//!
//! # Typical wiring
//!
//! ```ignore
//! let gateway = Arc::new(HttpGateway::new("https://gallery.example")?);
//! let cache = Arc::new(PaginationCache::new(gateway.clone()));
//! let mutator = UploadMutator::new(gateway, cache.clone(), notifier);
//!
//! let entry = cache.query(GALLERY_KEY).await;
//! let images = flatten::flatten(&entry);
//! ```

pub mod cache;
pub mod error;
pub mod flatten;
pub mod gateway;
pub mod model;
pub mod notify;
pub mod upload;
pub mod viewer;

pub use cache::{CacheEntry, FetchStatus, PaginationCache};
pub use error::{Error, Result};
pub use flatten::{flatten, Flattener};
pub use gateway::{HttpGateway, ImageSink, PageSource};
pub use model::{Cursor, Image, Page, GALLERY_KEY};
pub use notify::{Notification, NotificationKind, Notifier};
pub use upload::{validate, ImageUpload, UploadDialog, UploadMutator};
pub use viewer::{ViewerCoordinator, ViewerState};
