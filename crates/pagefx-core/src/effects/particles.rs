#![forbid(unsafe_code)]

//! Decorative floating particles in the hero section.

use crate::config::ParticleConfig;
use crate::host::{Document, NodeId};
use crate::styles::particle_stylesheet;
use crate::{Effect, Result};

/// Randomized look of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    /// Horizontal start position, percent in [0, 100).
    pub left_pct: f64,
    /// Vertical start position, percent in [0, 100).
    pub top_pct: f64,
    /// Diameter in px, [2, 6).
    pub size_px: f64,
    /// Animation duration in seconds, [2, 5).
    pub duration_s: f64,
    /// Animation delay in seconds, [0, 2).
    pub delay_s: f64,
}

impl ParticleSpec {
    /// Draw one particle from a uniform `[0, 1)` source.
    pub fn sample(mut random: impl FnMut() -> f64) -> Self {
        Self {
            left_pct: random() * 100.0,
            top_pct: random() * 100.0,
            size_px: random() * 4.0 + 2.0,
            duration_s: random() * 3.0 + 2.0,
            delay_s: random() * 2.0,
        }
    }

    fn apply(&self, doc: &mut dyn Document, node: NodeId) {
        let size = format!("{}px", self.size_px);
        doc.set_style(node, "left", &format!("{}%", self.left_pct));
        doc.set_style(node, "top", &format!("{}%", self.top_pct));
        doc.set_style(node, "width", &size);
        doc.set_style(node, "height", &size);
        doc.set_style(node, "animation-duration", &format!("{}s", self.duration_s));
        doc.set_style(node, "animation-delay", &format!("{}s", self.delay_s));
    }
}

/// Fills the particle container with a fixed number of particles, once.
#[derive(Debug, Clone)]
pub struct ParticleField {
    container_selector: String,
    config: ParticleConfig,
}

impl ParticleField {
    #[must_use]
    pub fn new(container_selector: impl Into<String>, config: ParticleConfig) -> Self {
        Self {
            container_selector: container_selector.into(),
            config,
        }
    }
}

impl Effect for ParticleField {
    fn name(&self) -> &'static str {
        "particle_field"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        let Some(container) = doc.query(&self.container_selector) else {
            crate::debug!("no particle container; particles disabled");
            return Ok(());
        };
        let drift_px = doc.random() * 100.0 - 50.0;
        doc.inject_stylesheet(&particle_stylesheet(drift_px))?;

        for _ in 0..self.config.count {
            let spec = ParticleSpec::sample(|| doc.random());
            let particle = doc.create_element("div")?;
            doc.set_class_name(particle, "particle");
            spec.apply(doc, particle);
            doc.append_child(container, particle)?;
        }
        crate::debug!(count = self.config.count, "particles created");
        Ok(())
    }
}
