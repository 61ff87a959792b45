#![forbid(unsafe_code)]

//! `startPageEffects` options.
//!
//! JS hands over an optional plain object; the shell serializes it with
//! `JSON.stringify` and passes the text here. A missing object, `undefined`
//! and `null` all mean "use the defaults".

use pagefx_core::{PageConfig, Result};

/// Resolve the page config from serialized JS options.
pub fn parse_options(json: Option<&str>) -> Result<PageConfig> {
    match json.map(str::trim) {
        None | Some("" | "undefined" | "null") => Ok(PageConfig::default()),
        Some(text) => PageConfig::from_json_str(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_options_use_defaults() {
        for json in [None, Some(""), Some("null"), Some(" undefined ")] {
            assert_eq!(parse_options(json).unwrap(), PageConfig::default());
        }
    }

    #[test]
    fn object_options_override() {
        let config = parse_options(Some(r#"{"scrollTop":{"threshold":500}}"#)).unwrap();
        assert_eq!(config.scroll_top.threshold, 500.0);
    }
}
