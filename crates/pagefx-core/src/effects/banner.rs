#![forbid(unsafe_code)]

use crate::config::BannerConfig;
use crate::host::Document;
use crate::{Effect, Result};

/// Writes the styled startup banner to the developer console.
#[derive(Debug, Clone)]
pub struct ConsoleBanner {
    config: BannerConfig,
}

impl ConsoleBanner {
    #[must_use]
    pub fn new(config: BannerConfig) -> Self {
        Self { config }
    }
}

impl Effect for ConsoleBanner {
    fn name(&self) -> &'static str {
        "console_banner"
    }

    fn bind(&mut self, doc: &mut dyn Document) -> Result<()> {
        for line in &self.config.lines {
            doc.console_styled(&line.text, &line.css);
        }
        Ok(())
    }
}
