// SPDX-License-Identifier: MPL-2.0
//! Selection state for the full-size image overlay.
//!
//! A two-state machine: `Closed` holds no selection, `Open` always holds
//! one. The referenced image need not still exist in the flattened list; the
//! coordinator keeps its own copy.

use crate::model::Image;

/// Current overlay state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewerState {
    /// Overlay hidden, nothing selected.
    #[default]
    Closed,
    /// Overlay showing `image` full-size.
    Open {
        /// The selected image.
        image: Image,
    },
}

/// Holds the currently selected image and the overlay's open flag.
///
/// Created once on gallery mount and mutated only by the "view image" action
/// and the overlay's close action.
#[derive(Debug, Clone, Default)]
pub struct ViewerCoordinator {
    state: ViewerState,
}

impl ViewerCoordinator {
    /// Creates a coordinator with the overlay closed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the overlay on `image`, replacing any previous selection.
    pub fn view(&mut self, image: Image) {
        self.state = ViewerState::Open { image };
    }

    /// Closes the overlay and clears the selection. No-op when already closed.
    pub fn close(&mut self) {
        self.state = ViewerState::Closed;
    }

    /// Returns whether the overlay is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open { .. })
    }

    /// Returns the selected image, if the overlay is open.
    #[must_use]
    pub fn selected(&self) -> Option<&Image> {
        match &self.state {
            ViewerState::Open { image } => Some(image),
            ViewerState::Closed => None,
        }
    }

    /// Returns the media locator of the selected image, if the overlay is open.
    #[must_use]
    pub fn selected_url(&self) -> Option<&str> {
        self.selected().map(|image| image.url.as_str())
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &ViewerState {
        &self.state
    }
}
