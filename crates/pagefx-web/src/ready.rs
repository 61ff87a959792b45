#![forbid(unsafe_code)]

//! When to bind, given `document.readyState` at startup.

/// What the entry point does right after building the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPlan {
    /// Still parsing: bind on `DOMContentLoaded`.
    WaitForDom,
    /// Parsed, subresources pending: bind now; `load` is still to come.
    BindNow,
    /// Fully loaded: bind now and replay the `load` the page already saw.
    BindAndLoad,
}

impl StartPlan {
    /// Decide from the `readyState` string. Unknown states bind immediately.
    #[must_use]
    pub fn from_ready_state(ready_state: &str) -> Self {
        match ready_state {
            "loading" => Self::WaitForDom,
            "complete" => Self::BindAndLoad,
            _ => Self::BindNow,
        }
    }

    /// Whether the `load` event has to be replayed after binding.
    #[must_use]
    pub fn replays_load(self) -> bool {
        self == Self::BindAndLoad
    }
}
