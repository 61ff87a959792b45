#![forbid(unsafe_code)]

//! The page effects controller.
//!
//! [`PageController`] owns an ordered [`EffectRegistry`] and the only shared
//! runtime state (the latest scroll sample). The host drives it:
//!
//! 1. Call [`PageController::bind`] once when the DOM is ready.
//! 2. Forward each subscribed DOM event, and each requested frame/timer
//!    callback, through [`PageController::dispatch`].
//! 3. Apply the returned [`EventOutcome`] to the native event. An effect that
//!    fails does not cancel what the other effects decided.
//!
//! # Example
//!
//! ```ignore
//! let mut controller = PageController::new(&PageConfig::default());
//! controller.bind(&mut document)?;
//! let dispatched = controller.dispatch(&PageEvent::Click { node }, &mut document);
//! if dispatched.outcome.prevent_default {
//!     native_event.prevent_default();
//! }
//! ```

use crate::config::PageConfig;
use crate::effects::{
    ConsoleBanner, DownloadGuard, Effect, GlitchHover, MenuSelectors, MobileMenu, NavbarShadow,
    PageFadeIn, ParallaxHero, ParticleField, RevealOnScroll, ScrollTopButton, SmoothAnchors,
    StatCounters,
};
use crate::event::{EventOutcome, PageEvent, ScrollMetrics};
use crate::host::Document;
use crate::{PageFxError, Result};

/// Ordered list of effects bound at startup.
#[derive(Default)]
pub struct EffectRegistry {
    effects: Vec<Box<dyn Effect>>,
}

impl EffectRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every effect of the landing page, in binding order.
    #[must_use]
    pub fn standard(config: &PageConfig) -> Self {
        let sel = &config.selectors;
        let mut registry = Self::new();
        registry.push(SmoothAnchors::new(&sel.fragment_links));
        registry.push(NavbarShadow::new(&sel.navbar, config.navbar.clone()));
        registry.push(RevealOnScroll::new(
            &sel.feature_boxes,
            &sel.protocol_steps,
            config.reveal.clone(),
        ));
        registry.push(ParticleField::new(
            &sel.particle_container,
            config.particles.clone(),
        ));
        registry.push(StatCounters::new(&sel.stat_numbers, config.counters.clone()));
        registry.push(DownloadGuard::new(
            &sel.download_button,
            config.download.clone(),
        ));
        registry.push(MobileMenu::new(
            MenuSelectors {
                container: sel.nav_container.clone(),
                menu: sel.nav_menu.clone(),
                links: sel.nav_menu_links.clone(),
            },
            config.menu.clone(),
        ));
        registry.push(GlitchHover::new(&sel.glitch_text, config.glitch.clone()));
        registry.push(ParallaxHero::new(&sel.hero_content, config.parallax.clone()));
        registry.push(PageFadeIn::new(config.fade.clone()));
        registry.push(ScrollTopButton::new(
            &sel.scroll_top_id,
            config.scroll_top.clone(),
        ));
        registry.push(ConsoleBanner::new(config.banner.clone()));
        registry
    }

    /// Append an effect.
    pub fn push(&mut self, effect: impl Effect + 'static) {
        self.effects.push(Box::new(effect));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Effect names in binding order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.name()).collect()
    }
}

impl core::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Result of broadcasting one event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Dispatched {
    /// Outcome merged over every effect that handled the event.
    pub outcome: EventOutcome,
    /// First effect failure, if any.
    pub error: Option<PageFxError>,
}

impl Dispatched {
    /// Strict view: the first failure wins over the outcome.
    pub fn into_result(self) -> Result<EventOutcome> {
        self.error.map_or(Ok(self.outcome), Err)
    }
}

/// Host-driven controller for all page effects.
#[derive(Debug)]
pub struct PageController {
    registry: EffectRegistry,
    bound: bool,
    last_scroll: Option<ScrollMetrics>,
    events_dispatched: u64,
}

impl PageController {
    /// Controller with the standard effect set for `config`.
    #[must_use]
    pub fn new(config: &PageConfig) -> Self {
        Self::with_registry(EffectRegistry::standard(config))
    }

    /// Controller over a custom registry.
    #[must_use]
    pub fn with_registry(registry: EffectRegistry) -> Self {
        Self {
            registry,
            bound: false,
            last_scroll: None,
            events_dispatched: 0,
        }
    }

    /// Bind every effect against the document.
    ///
    /// An effect that fails to bind does not stop the others; the first
    /// failure is returned after all effects have been attempted. Calling
    /// this twice is a no-op.
    pub fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        if self.bound {
            crate::warn!("page controller already bound");
            return Ok(());
        }
        self.bound = true;
        let span = crate::info_span!("pagefx.bind");
        let _guard = span.enter();

        let mut first_err = None;
        for effect in &mut self.registry.effects {
            if let Err(err) = effect.bind(doc) {
                crate::error!(effect = effect.name(), error = %err, "effect failed to bind");
                first_err.get_or_insert(err);
            }
        }
        crate::info!(effects = self.registry.len(), "page effects bound");
        first_err.map_or(Ok(()), Err)
    }

    /// Broadcast one event to every effect and merge their outcomes.
    ///
    /// Events before [`bind`](Self::bind) are ignored. Failing effects are
    /// logged and skipped; the outcome still merges every other effect.
    pub fn dispatch(&mut self, event: &PageEvent, doc: &mut dyn Document) -> Dispatched {
        if !self.bound {
            crate::debug!(kind = event.kind_name(), "event before bind ignored");
            return Dispatched {
                outcome: EventOutcome::PROCEED,
                error: None,
            };
        }
        self.events_dispatched += 1;
        if let PageEvent::Scroll(metrics) = event {
            self.last_scroll = Some(*metrics);
        }

        let mut outcome = EventOutcome::PROCEED;
        let mut first_err = None;
        for effect in &mut self.registry.effects {
            match effect.handle(event, doc) {
                Ok(o) => outcome = outcome.merge(o),
                Err(err) => {
                    crate::error!(effect = effect.name(), error = %err, "effect failed");
                    first_err.get_or_insert(err);
                }
            }
        }
        crate::trace!(
            kind = event.kind_name(),
            prevent_default = outcome.prevent_default,
            "event dispatched"
        );
        Dispatched {
            outcome,
            error: first_err,
        }
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Latest scroll sample seen, if any.
    #[must_use]
    pub fn last_scroll(&self) -> Option<ScrollMetrics> {
        self.last_scroll
    }

    /// Number of events dispatched since binding.
    #[must_use]
    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched
    }

    /// Effect names in binding order.
    #[must_use]
    pub fn effect_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn standard_registry_order() {
        let registry = EffectRegistry::standard(&PageConfig::default());
        assert_eq!(
            registry.names(),
            vec![
                "smooth_anchors",
                "navbar_shadow",
                "reveal_on_scroll",
                "particle_field",
                "stat_counters",
                "download_guard",
                "mobile_menu",
                "glitch_hover",
                "parallax_hero",
                "page_fade_in",
                "scroll_top_button",
                "console_banner",
            ]
        );
    }

    #[test]
    fn empty_registry_is_empty() {
        let registry = EffectRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(format!("{registry:?}"), "[]");
    }
}
