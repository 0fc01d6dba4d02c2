// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! A small CSS selector subset.
//!
//! Supported: type selectors, `*`, `#id`, `.class`, `[attr]`,
//! `[attr=value]`, compound selectors, the descendant combinator
//! (whitespace) and selector lists (`,`). That covers every selector the
//! popup forms use.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SelectorError;

/// An attribute condition inside `[...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrMatcher {
    pub name: String,
    pub value: Option<String>,
}

/// A sequence of simple selectors with no combinator, e.g. `input.popup__input`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttrMatcher>,
}

impl Compound {
    /// Check this compound against an element's own properties.
    pub fn matches<E: SelectorSubject + ?Sized>(&self, element: &E) -> bool {
        if let Some(ref tag) = self.tag {
            if !element.tag_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(ref id) = self.id {
            if element.element_id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|attr| match element.attribute(&attr.name) {
            None => false,
            Some(actual) => attr.value.as_deref().map_or(true, |v| v == actual),
        })
    }

    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }
}

/// Compounds joined by descendant combinators, stored left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<Compound>,
}

/// What a selector needs to know about an element.
pub trait SelectorSubject {
    fn tag_name(&self) -> &str;
    fn element_id(&self) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Selector {
    source: String,
    alternatives: Vec<ComplexSelector>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        Parser::new(input).parse_list()
    }

    /// A single-class selector, `.name`.
    pub fn class(name: &str) -> Self {
        let compound = Compound {
            classes: vec![name.to_string()],
            ..Compound::default()
        };
        Self {
            source: format!(".{}", name),
            alternatives: vec![ComplexSelector {
                compounds: vec![compound],
            }],
        }
    }

    /// The text this selector was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The comma-separated alternatives.
    pub fn alternatives(&self) -> &[ComplexSelector] {
        &self.alternatives
    }

    /// Match against an element given its ancestor chain, nearest first.
    ///
    /// `ancestors` yields the parent, then the grandparent, and so on.
    pub fn matches_with_ancestors<'a, E, I>(&self, element: &E, ancestors: I) -> bool
    where
        E: SelectorSubject + ?Sized + 'a,
        I: Iterator<Item = &'a E> + Clone,
    {
        self.alternatives
            .iter()
            .any(|complex| complex_matches(complex, element, ancestors.clone()))
    }
}

fn complex_matches<'a, E, I>(complex: &ComplexSelector, element: &E, mut ancestors: I) -> bool
where
    E: SelectorSubject + ?Sized + 'a,
    I: Iterator<Item = &'a E>,
{
    let Some((last, rest)) = complex.compounds.split_last() else {
        return false;
    };
    if !last.matches(element) {
        return false;
    }
    // Descendant-only chains can be matched greedily from the right.
    for compound in rest.iter().rev() {
        if !ancestors.by_ref().any(|ancestor| compound.matches(ancestor)) {
            return false;
        }
    }
    true
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Selector {
    type Error = SelectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.source
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::Unexpected {
            selector: self.source.to_string(),
            found,
            position: self.pos,
        }
    }

    fn unterminated(&self) -> SelectorError {
        SelectorError::Unterminated {
            selector: self.source.to_string(),
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(mut self) -> Result<Selector, SelectorError> {
        if self.source.trim().is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut alternatives = Vec::new();
        loop {
            self.skip_whitespace();
            alternatives.push(self.parse_complex()?);
            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(c) => return Err(self.unexpected(c)),
            }
        }

        Ok(Selector {
            source: self.source.trim().to_string(),
            alternatives,
        })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        loop {
            let had_space = self.skip_whitespace();
            match self.peek() {
                None | Some(',') => break,
                Some(_) if had_space => compounds.push(self.parse_compound()?),
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(ComplexSelector { compounds })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let mut universal = false;

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                universal = true;
            }
            Some(c) if is_ident_char(c) => compound.tag = Some(self.parse_ident()?),
            _ => {}
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    compound.id = Some(self.parse_ident()?);
                }
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.parse_ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attributes.push(self.parse_attribute()?);
                }
                _ => break,
            }
        }

        if compound.is_empty() && !universal {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => SelectorError::Empty,
            });
        }
        Ok(compound)
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(c) => self.unexpected(c),
                None => SelectorError::Empty,
            });
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_attribute(&mut self) -> Result<AttrMatcher, SelectorError> {
        self.skip_whitespace();
        if self.peek().is_none() {
            return Err(self.unterminated());
        }
        let name = self.parse_ident()?;
        self.skip_whitespace();

        let value = match self.peek() {
            Some('=') => {
                self.pos += 1;
                self.skip_whitespace();
                Some(self.parse_attribute_value()?)
            }
            _ => None,
        };

        self.skip_whitespace();
        match self.peek() {
            Some(']') => {
                self.pos += 1;
                Ok(AttrMatcher { name, value })
            }
            Some(c) => Err(self.unexpected(c)),
            None => Err(self.unterminated()),
        }
    }

    fn parse_attribute_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|c| c != quote) {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(self.unterminated());
                }
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                Ok(value)
            }
            None => Err(self.unterminated()),
            _ => self.parse_ident(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake {
        tag: &'static str,
        id: Option<&'static str>,
        classes: Vec<&'static str>,
        attrs: Vec<(&'static str, &'static str)>,
    }

    impl SelectorSubject for Fake {
        fn tag_name(&self) -> &str {
            self.tag
        }
        fn element_id(&self) -> Option<&str> {
            self.id
        }
        fn has_class(&self, class: &str) -> bool {
            self.classes.contains(&class)
        }
        fn attribute(&self, name: &str) -> Option<&str> {
            self.attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
        }
    }

    fn input(classes: Vec<&'static str>) -> Fake {
        Fake {
            tag: "input",
            id: Some("place-name"),
            classes,
            attrs: vec![("type", "text")],
        }
    }

    #[test]
    fn test_parse_class() {
        let selector = Selector::parse(".popup__input").unwrap();
        assert_eq!(selector.alternatives().len(), 1);
        assert_eq!(selector.alternatives()[0].compounds[0].classes, vec!["popup__input"]);
    }

    #[test]
    fn test_compound_matches() {
        let selector = Selector::parse("input.popup__input[type=text]#place-name").unwrap();
        let el = input(vec!["popup__input"]);
        assert!(selector.matches_with_ancestors(&el, std::iter::empty()));

        let other = input(vec!["popup__other"]);
        assert!(!selector.matches_with_ancestors(&other, std::iter::empty()));
    }

    #[test]
    fn test_quoted_attribute_value() {
        let selector = Selector::parse(r#"[type="text"]"#).unwrap();
        assert!(selector.matches_with_ancestors(&input(vec![]), std::iter::empty()));
    }

    #[test]
    fn test_descendant_combinator() {
        let selector = Selector::parse(".popup_type_edit .popup__input").unwrap();
        let form = Fake {
            tag: "form",
            id: None,
            classes: vec!["popup__form"],
            attrs: vec![],
        };
        let popup = Fake {
            tag: "div",
            id: None,
            classes: vec!["popup", "popup_type_edit"],
            attrs: vec![],
        };
        let el = input(vec!["popup__input"]);
        let ancestors = [form, popup];
        assert!(selector.matches_with_ancestors(&el, ancestors.iter()));
        assert!(!selector.matches_with_ancestors(&el, ancestors[..1].iter()));
    }

    #[test]
    fn test_selector_list() {
        let selector = Selector::parse(".a, input").unwrap();
        assert_eq!(selector.alternatives().len(), 2);
        assert!(selector.matches_with_ancestors(&input(vec![]), std::iter::empty()));
    }

    #[test]
    fn test_rejects_unsupported_syntax() {
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert!(matches!(
            Selector::parse(".a > .b"),
            Err(SelectorError::Unexpected { found: '>', .. })
        ));
        assert!(Selector::parse(".").is_err());
        assert!(Selector::parse("[type=text").is_err());
    }

    #[test]
    fn test_unterminated_attribute() {
        for source in ["[type=text", r#"input[type="text]"#, "[", "[type", "[type="] {
            assert_eq!(
                Selector::parse(source),
                Err(SelectorError::Unterminated {
                    selector: source.to_string()
                }),
                "{}",
                source
            );
        }
    }

    #[test]
    fn test_serde_as_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            sel: Selector,
        }
        let w: Wrapper = toml::from_str(r#"sel = ".popup__form""#).unwrap();
        assert_eq!(w.sel.as_str(), ".popup__form");

        let bad: std::result::Result<Wrapper, _> = toml::from_str(r#"sel = ".a ~ .b""#);
        assert!(bad.is_err());
    }
}
