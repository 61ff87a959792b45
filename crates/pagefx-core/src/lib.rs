#![forbid(unsafe_code)]

//! `pagefx-core`: the host-independent half of the page effects controller.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment pushes [`PageEvent`]s
//!   (scroll samples, clicks, visibility changes, frames, timers).
//! - **No direct DOM access**: every read and mutation goes through the
//!   [`Document`] trait, so effects run unchanged against the browser or an
//!   in-memory page.
//! - **No blocking / no threads**: deferred work is requested from the host
//!   and comes back as events.

pub mod animation;
pub mod config;
pub mod controller;
pub mod effects;
pub mod event;
pub mod host;
pub mod logging;
pub mod styles;

pub use config::PageConfig;
pub use controller::{Dispatched, EffectRegistry, PageController};
pub use effects::Effect;
pub use event::{EventOutcome, PageEvent, ScrollMetrics};
pub use host::{
    Document, EventKind, EventTarget, FrameId, NodeId, ObserverId, TimerId, VisibilityOptions,
};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, error, info, info_span, trace, warn};

/// Page effects error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFxError {
    /// No global `window` is available (not running in a browser main thread).
    MissingWindow,
    /// The window has no `document`.
    MissingDocument,
    /// A host operation failed (element creation, listener registration, ...).
    Host(String),
    /// The supplied configuration could not be parsed or is out of range.
    InvalidConfig(String),
}

impl core::fmt::Display for PageFxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingWindow => write!(f, "no global window"),
            Self::MissingDocument => write!(f, "window has no document"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for PageFxError {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PageFxError>;
