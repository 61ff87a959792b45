#![forbid(unsafe_code)]

//! Independent page effects.
//!
//! Each effect binds itself once at page-ready and then reacts to the events
//! the controller broadcasts. Effects keep the ids they were handed
//! ([`NodeId`](crate::NodeId), observer/timer/frame ids) and ignore events
//! that do not carry one of them, so broadcasting every event to every
//! effect is safe.

mod anchors;
mod banner;
mod counters;
mod download;
mod glitch;
mod mobile_menu;
mod navbar;
mod page_fade;
mod parallax;
mod particles;
mod reveal;
mod scroll_top;

pub use anchors::SmoothAnchors;
pub use banner::ConsoleBanner;
pub use counters::StatCounters;
pub use download::DownloadGuard;
pub use glitch::GlitchHover;
pub use mobile_menu::{MenuSelectors, MobileMenu};
pub use navbar::NavbarShadow;
pub use page_fade::PageFadeIn;
pub use parallax::ParallaxHero;
pub use particles::{ParticleField, ParticleSpec};
pub use reveal::RevealOnScroll;
pub use scroll_top::ScrollTopButton;

use crate::event::{EventOutcome, PageEvent};
use crate::host::Document;
use crate::Result;

/// One page effect.
pub trait Effect {
    /// Stable name for logs and registry introspection.
    fn name(&self) -> &'static str;

    /// Look up elements, apply initial state and subscribe to events.
    ///
    /// Missing elements are not an error: the effect stays inert.
    fn bind(&mut self, doc: &mut dyn Document) -> Result<()>;

    /// React to one broadcast event.
    fn handle(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Result<EventOutcome> {
        let _ = (event, doc);
        Ok(EventOutcome::PROCEED)
    }
}
