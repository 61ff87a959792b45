#![forbid(unsafe_code)]

//! Deterministic test harness for `pagefx-core`.
//!
//! - [`FakeDocument`]: an in-memory page implementing
//!   [`Document`](pagefx_core::Document) with a small selector engine,
//!   seeded randomness and a manual clock.
//! - [`FakePage`]: binds a [`PageController`](pagefx_core::PageController)
//!   to a fake page and delivers scrolls, clicks, hovers, visibility changes,
//!   frames and timers the way a browser would.
//! - [`fixtures::landing_page`]: the stock landing page.
//!
//! # Quick Start
//!
//! ```ignore
//! use pagefx_harness::{fixtures::landing_page, FakePage};
//!
//! let (doc, nodes) = landing_page(0);
//! let mut page = FakePage::ready(doc)?;
//! page.scroll_to(120.0)?;
//! assert!(page.has_class(nodes.navbar, "scrolled"));
//! ```

pub mod document;
pub mod fixtures;
pub mod page;
pub mod selector;

pub use document::{El, FakeDocument, FakeNode, FakeObserver, SeededRng};
pub use page::{FakePage, FRAME};
