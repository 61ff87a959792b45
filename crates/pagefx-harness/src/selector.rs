#![forbid(unsafe_code)]

//! A small CSS selector engine.
//!
//! Supports what the page contract uses: type, `#id`, `.class`,
//! `[attr]`, `[attr="v"]`, `[attr^="v"]` compounds joined by the descendant
//! combinator. Anything else fails to parse, which callers treat like a
//! browser `SyntaxError` (no match).

/// Attribute test inside `[...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrTest {
    Present,
    Equals(String),
    StartsWith(String),
}

/// One compound selector (no combinators).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, AttrTest)>,
}

/// Descendant chain, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub chain: Vec<Compound>,
}

/// View of an element that the matcher needs.
pub trait Matchable {
    fn tag(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
}

impl Selector {
    /// Parse a selector, or `None` if it is empty or unsupported.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let mut chain = Vec::new();
        for part in input.split_whitespace() {
            chain.push(parse_compound(part)?);
        }
        if chain.is_empty() {
            return None;
        }
        Some(Self { chain })
    }
}

impl Compound {
    #[must_use]
    pub fn matches(&self, el: &dyn Matchable) -> bool {
        if let Some(tag) = &self.tag {
            if !el.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|(name, test)| match (el.attr(name), test) {
            (None, _) => false,
            (Some(_), AttrTest::Present) => true,
            (Some(v), AttrTest::Equals(want)) => v == want,
            (Some(v), AttrTest::StartsWith(prefix)) => v.starts_with(prefix.as_str()),
        })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn parse_compound(mut s: &str) -> Option<Compound> {
    let mut compound = Compound::default();

    let (tag, rest) = take_ident(s);
    if !tag.is_empty() {
        compound.tag = Some(tag.to_ascii_lowercase());
    }
    s = rest;

    while let Some(c) = s.chars().next() {
        match c {
            '#' | '.' => {
                let (ident, rest) = take_ident(&s[1..]);
                if ident.is_empty() {
                    return None;
                }
                if c == '#' {
                    compound.id = Some(ident.to_string());
                } else {
                    compound.classes.push(ident.to_string());
                }
                s = rest;
            }
            '[' => {
                let close = s.find(']')?;
                compound.attrs.push(parse_attr(&s[1..close])?);
                s = &s[close + 1..];
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn parse_attr(body: &str) -> Option<(String, AttrTest)> {
    let (name, rest) = take_ident(body.trim());
    if name.is_empty() {
        return None;
    }
    let rest = rest.trim();
    if rest.is_empty() {
        return Some((name.to_string(), AttrTest::Present));
    }
    let (op, value) = if let Some(v) = rest.strip_prefix("^=") {
        ("^=", v)
    } else if let Some(v) = rest.strip_prefix('=') {
        ("=", v)
    } else {
        return None;
    };
    let value = unquote(value.trim())?;
    let test = if op == "^=" {
        AttrTest::StartsWith(value)
    } else {
        AttrTest::Equals(value)
    };
    Some((name.to_string(), test))
}

fn unquote(v: &str) -> Option<String> {
    for q in ['"', '\''] {
        if let Some(inner) = v.strip_prefix(q) {
            return inner.strip_suffix(q).map(str::to_string);
        }
    }
    (!v.is_empty() && v.chars().all(is_ident_char)).then(|| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct El {
        tag: &'static str,
        attrs: Vec<(&'static str, &'static str)>,
    }

    impl Matchable for El {
        fn tag(&self) -> &str {
            self.tag
        }
        fn attr(&self, name: &str) -> Option<&str> {
            self.attrs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
        }
        fn has_class(&self, class: &str) -> bool {
            self.attr("class")
                .is_some_and(|c| c.split_whitespace().any(|x| x == class))
        }
    }

    #[test]
    fn parses_fragment_link_selector() {
        let sel = Selector::parse(r##"a[href^="#"]"##).unwrap();
        assert_eq!(sel.chain.len(), 1);
        assert_eq!(sel.chain[0].tag.as_deref(), Some("a"));
        assert_eq!(
            sel.chain[0].attrs,
            vec![("href".to_string(), AttrTest::StartsWith("#".to_string()))]
        );
    }

    #[test]
    fn parses_descendant_chain() {
        let sel = Selector::parse(".nav-menu a").unwrap();
        assert_eq!(sel.chain.len(), 2);
        assert_eq!(sel.chain[0].classes, vec!["nav-menu".to_string()]);
        assert_eq!(sel.chain[1].tag.as_deref(), Some("a"));
    }

    #[test]
    fn rejects_what_a_browser_would_reject() {
        assert_eq!(Selector::parse("#"), None);
        assert_eq!(Selector::parse(""), None);
        assert_eq!(Selector::parse("a > b"), None);
        assert_eq!(Selector::parse("[href"), None);
    }

    #[test]
    fn compound_matching() {
        let link = El {
            tag: "a",
            attrs: vec![("href", "#features"), ("class", "nav-link active")],
        };
        let sel = Selector::parse(r##"a.nav-link[href^="#"]"##).unwrap();
        assert!(sel.chain[0].matches(&link));
        let sel = Selector::parse("a#features").unwrap();
        assert!(!sel.chain[0].matches(&link));
        let sel = Selector::parse("#features").unwrap();
        assert!(!sel.chain[0].matches(&link));
    }
}
