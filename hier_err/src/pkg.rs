/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use core::{fmt::Debug, panic::Location};

/// Captures extra information for a [`HierErr`][`crate::HierErr`]
/// automatically.
///
/// [`Self::new()`] must be called by a function annotated with
/// `#[track_caller]` to capture the correct callsite.
///
/// The inner fields are obscured to allow arbitrary metadata tracking
/// combinations via feature flags without changing the API.
#[derive(Debug, Clone)]
pub struct NodePkg {
    pub(crate) location: &'static Location<'static>,
    #[cfg(feature = "tracing")]
    pub(crate) trace: tracing_error::SpanTrace,
}

impl NodePkg {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            location: Location::caller(),
            #[cfg(feature = "tracing")]
            trace: tracing_error::SpanTrace::capture(),
        }
    }

    /// Where the owning node was constructed.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Spans active when the owning node was constructed.
    #[cfg(feature = "tracing")]
    pub fn span_trace(&self) -> &tracing_error::SpanTrace {
        &self.trace
    }
}

impl Default for NodePkg {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}
