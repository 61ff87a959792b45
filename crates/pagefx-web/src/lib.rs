#![forbid(unsafe_code)]

//! WASM entry point for pagefx.
//!
//! This crate is host-specific (web/WASM). It exposes one `wasm-bindgen`
//! function, `startPageEffects(options?)`, which builds a
//! [`PageController`](pagefx_core::PageController) over the live DOM and
//! returns a `PageEffects` handle with `destroy()`, `isActive()` and
//! `lastScrollOffset()`.
//!
//! Option parsing lives in [`options`] and the startup decision in
//! [`ready`], so both are shared with native builds and tests.

pub mod options;
pub mod ready;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{PageEffects, start_page_effects};

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct PageEffects {
    config: pagefx_core::PageConfig,
}

#[cfg(not(target_arch = "wasm32"))]
impl PageEffects {
    /// Parse options the way the browser entry point does, without binding.
    pub fn from_options(json: Option<&str>) -> pagefx_core::Result<Self> {
        Ok(Self {
            config: options::parse_options(json)?,
        })
    }

    #[must_use]
    pub fn config(&self) -> &pagefx_core::PageConfig {
        &self.config
    }

    /// Always `false`: nothing is bound outside a browser.
    #[must_use]
    pub fn is_active(&self) -> bool {
        false
    }
}
