#![forbid(unsafe_code)]

//! Controller configuration.
//!
//! Every field has a default matching the stock landing page, so hosts only
//! pass what they want to change. JSON keys are camelCase to match JS option
//! objects.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{PageFxError, Result};

/// Upper bound on decorative particles; more than this is a config mistake.
pub const MAX_PARTICLES: usize = 1000;

/// Top-level configuration for [`PageController`](crate::PageController).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub selectors: Selectors,
    pub navbar: NavbarConfig,
    pub reveal: RevealConfig,
    pub particles: ParticleConfig,
    pub counters: CounterConfig,
    pub download: DownloadConfig,
    pub menu: MenuConfig,
    pub glitch: GlitchConfig,
    pub parallax: ParallaxConfig,
    pub fade: FadeConfig,
    pub scroll_top: ScrollTopConfig,
    pub banner: BannerConfig,
}

impl PageConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PageFxError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no page could sensibly use.
    pub fn validate(&self) -> Result<()> {
        check_threshold("navbar.scrolledThreshold", self.navbar.scrolled_threshold)?;
        check_threshold("scrollTop.threshold", self.scroll_top.threshold)?;
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(PageFxError::InvalidConfig(format!(
                "reveal.threshold must be within [0, 1], got {}",
                self.reveal.threshold
            )));
        }
        if self.particles.count > MAX_PARTICLES {
            return Err(PageFxError::InvalidConfig(format!(
                "particles.count {} exceeds {MAX_PARTICLES}",
                self.particles.count
            )));
        }
        if self.counters.frame_ms == 0 {
            return Err(PageFxError::InvalidConfig(
                "counters.frameMs must be positive".to_string(),
            ));
        }
        if !self.parallax.factor.is_finite() {
            return Err(PageFxError::InvalidConfig(
                "parallax.factor must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_threshold(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PageFxError::InvalidConfig(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

/// Selectors for the elements the page contract exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub fragment_links: String,
    pub navbar: String,
    pub nav_container: String,
    pub nav_menu: String,
    pub nav_menu_links: String,
    pub feature_boxes: String,
    pub protocol_steps: String,
    pub particle_container: String,
    pub hero_content: String,
    pub stat_numbers: String,
    pub download_button: String,
    pub glitch_text: String,
    /// Element id (not a selector) of the scroll-to-top control.
    pub scroll_top_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            fragment_links: r##"a[href^="#"]"##.to_string(),
            navbar: ".navbar".to_string(),
            nav_container: ".nav-container".to_string(),
            nav_menu: ".nav-menu".to_string(),
            nav_menu_links: ".nav-menu a".to_string(),
            feature_boxes: ".feature-box".to_string(),
            protocol_steps: ".protocol-step".to_string(),
            particle_container: ".hero-particles".to_string(),
            hero_content: ".hero-content".to_string(),
            stat_numbers: ".stat-number".to_string(),
            download_button: ".btn-download".to_string(),
            glitch_text: ".glitch".to_string(),
            scroll_top_id: "scrollTopBtn".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavbarConfig {
    /// Offsets strictly above this get the scrolled class.
    pub scrolled_threshold: f64,
    pub scrolled_class: String,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 50.0,
            scrolled_class: "scrolled".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub feature_stagger_ms: u64,
    pub protocol_stagger_ms: u64,
    /// Visible fraction that counts as "in view".
    pub threshold: f64,
    pub root_margin: String,
    /// Transition shorthand without the delay (`all 0.6s ease`).
    pub transition: String,
    pub hidden_transform: String,
    pub shown_transform: String,
}

impl RevealConfig {
    #[must_use]
    pub fn feature_stagger(&self) -> Duration {
        Duration::from_millis(self.feature_stagger_ms)
    }

    #[must_use]
    pub fn protocol_stagger(&self) -> Duration {
        Duration::from_millis(self.protocol_stagger_ms)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            feature_stagger_ms: 100,
            protocol_stagger_ms: 150,
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            transition: "all 0.6s ease".to_string(),
            hidden_transform: "translateY(30px)".to_string(),
            shown_transform: "translateY(0)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleConfig {
    pub count: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self { count: 30 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CounterConfig {
    pub duration_ms: u64,
    /// Nominal frame interval used to size the per-frame increment.
    pub frame_ms: u64,
}

impl CounterConfig {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    #[must_use]
    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            frame_ms: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DownloadConfig {
    /// Href value meaning "not configured yet".
    pub placeholder_href: String,
    pub notice: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            placeholder_href: "#".to_string(),
            notice: "Please upload your APK file and update the download link in the HTML file!\n\n\
                     Replace the \"#\" in the download button href with your APK file path."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuConfig {
    pub active_class: String,
    /// Viewport width at or below which the hamburger replaces the menu.
    pub breakpoint_px: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            active_class: "active".to_string(),
            breakpoint_px: 768,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlitchConfig {
    pub restart_delay_ms: u64,
    /// `animation` shorthand applied after the restart delay.
    pub animation: String,
}

impl GlitchConfig {
    #[must_use]
    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            restart_delay_ms: 10,
            animation: "glitch-text 0.3s".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParallaxConfig {
    /// Fraction of the scroll offset the hero content moves by.
    pub factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { factor: 0.5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FadeConfig {
    pub delay_ms: u64,
    pub transition: String,
}

impl FadeConfig {
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            transition: "opacity 0.5s ease".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollTopConfig {
    /// Offsets strictly above this show the control.
    pub threshold: f64,
    pub visible_class: String,
}

impl Default for ScrollTopConfig {
    fn default() -> Self {
        Self {
            threshold: 300.0,
            visible_class: "show".to_string(),
        }
    }
}

/// One `%c`-styled console line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerLine {
    pub text: String,
    pub css: String,
}

impl BannerLine {
    fn new(text: &str, css: &str) -> Self {
        Self {
            text: text.to_string(),
            css: css.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BannerConfig {
    pub lines: Vec<BannerLine>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            lines: vec![
                BannerLine::new(
                    "\u{1F6A8} JISHIN ALERT \u{1F6A8}",
                    "font-size: 24px; font-weight: bold; color: #2d7a3e;",
                ),
                BannerLine::new(
                    "Earthquake Safety Training Game",
                    "font-size: 16px; color: #b8d4b8;",
                ),
                BannerLine::new(
                    "Developed as a Capstone Project - CSCQC",
                    "font-size: 12px; color: #b8d4b8;",
                ),
                BannerLine::new(
                    "\nRemember: DROP, COVER, and HOLD ON!",
                    "font-size: 14px; font-weight: bold; color: #ffd700;",
                ),
            ],
        }
    }
}
