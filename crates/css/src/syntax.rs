//! Selector grammar.
//!
//! Supported:
//! - selector lists (`a, b`) and the four combinators (descendant, `>`, `+`, `~`);
//! - type and universal selectors, `#id`, `.class`;
//! - attribute selectors `[attr]` and `[attr op value]` with `= ~= |= ^= $= *=` and an
//!   optional `i`/`s` flag;
//! - structural pseudo-classes, `:nth-*()` with `An+B`/`odd`/`even`, and `:not()` over
//!   compound selectors;
//! - `:is()`/`:where()` over selector lists and `:has()` over relative selectors;
//! - link, form-state and user-action pseudo-classes, matched against a static document;
//! - pseudo-elements, which parse but never match an element;
//! - identifiers with CSS escapes, so anything `serialize_identifier` emits parses back.
//!
//! Namespaces and `:nth-child(An+B of S)` are rejected as syntax errors.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

/// Compounds joined by combinators; `combinators[i]` sits between `compounds[i]` and
/// `compounds[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<Compound>,
    pub combinators: Vec<Combinator>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound(pub Vec<SimpleSelector>);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Type(String),
    Id(String),
    Class(String),
    Attribute(AttributeSelector),
    Pseudo(PseudoClass),
    /// `::before` and friends. Lowercased name without the colons.
    PseudoElement(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<(AttrOp, String)>,
    pub case_insensitive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrOp {
    Equals,
    Includes,
    DashMatch,
    Prefix,
    Suffix,
    Substring,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PseudoClass {
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    Root,
    Empty,
    NthChild(Nth),
    NthLastChild(Nth),
    NthOfType(Nth),
    NthLastOfType(Nth),
    Not(Vec<Compound>),
    /// `:is()` and `:where()`; specificity is not tracked so the two are the same here.
    Is(Vec<ComplexSelector>),
    Has(Vec<RelativeSelector>),
    /// `:link` and `:any-link`. Nothing is ever visited, so every link is unvisited.
    Link,
    Checked,
    Disabled,
    Enabled,
    /// Interaction state (`:hover`, `:focus`, `:visited`, ...) that a parsed document never has.
    UserAction,
}

/// A `:has()` argument: `selector` must match relative to the anchor element through
/// `combinator` (descendant when the argument has no leading combinator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelativeSelector {
    pub combinator: Combinator,
    pub selector: ComplexSelector,
}

/// `An+B`: matches 1-based positions `A*n + B` for some `n >= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nth {
    pub a: i32,
    pub b: i32,
}

impl Nth {
    pub fn matches(self, position: usize) -> bool {
        let position = position as i64;
        let (a, b) = (self.a as i64, self.b as i64);
        if a == 0 {
            return position == b;
        }
        let diff = position - b;
        diff % a == 0 && diff / a >= 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorErrorKind {
    Empty,
    ExpectedIdentifier,
    InvalidEscape,
    UnexpectedCharacter(char),
    UnexpectedEnd,
    ExpectedSelector,
    DanglingCombinator,
    UnknownPseudoClass(String),
    MalformedAttribute,
    MalformedNth,
}

/// A selector string the grammar rejects. `position` is a byte offset into the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorError {
    pub kind: SelectorErrorKind,
    pub position: usize,
}

impl SelectorError {
    /// The failure is about a token that is not a valid identifier (rather than about how
    /// otherwise valid pieces are put together).
    pub fn is_identifier_error(&self) -> bool {
        matches!(
            self.kind,
            SelectorErrorKind::ExpectedIdentifier
                | SelectorErrorKind::InvalidEscape
                | SelectorErrorKind::UnexpectedCharacter(_)
        )
    }

    /// The failure is about selector structure: empty input, misplaced combinators or commas,
    /// truncated input, malformed brackets or arguments.
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self.kind,
            SelectorErrorKind::Empty
                | SelectorErrorKind::UnexpectedEnd
                | SelectorErrorKind::ExpectedSelector
                | SelectorErrorKind::DanglingCombinator
                | SelectorErrorKind::MalformedAttribute
                | SelectorErrorKind::MalformedNth
        )
    }
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = self.position;
        match &self.kind {
            SelectorErrorKind::Empty => write!(f, "empty selector"),
            SelectorErrorKind::ExpectedIdentifier => write!(f, "expected identifier at {at}"),
            SelectorErrorKind::InvalidEscape => write!(f, "invalid escape in identifier at {at}"),
            SelectorErrorKind::UnexpectedCharacter(c) => {
                write!(f, "unexpected character {c:?} at {at}")
            }
            SelectorErrorKind::UnexpectedEnd => write!(f, "unexpected end of selector"),
            SelectorErrorKind::ExpectedSelector => write!(f, "expected selector at {at}"),
            SelectorErrorKind::DanglingCombinator => {
                write!(f, "combinator without a selector on both sides at {at}")
            }
            SelectorErrorKind::UnknownPseudoClass(name) => {
                write!(f, "unknown pseudo-class :{name} at {at}")
            }
            SelectorErrorKind::MalformedAttribute => {
                write!(f, "malformed attribute selector at {at}")
            }
            SelectorErrorKind::MalformedNth => write!(f, "malformed An+B argument at {at}"),
        }
    }
}

impl std::error::Error for SelectorError {}

pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let mut parser = Parser { input, pos: 0 };
    parser.skip_whitespace();
    if parser.at_end() {
        return Err(parser.error(SelectorErrorKind::Empty));
    }
    let mut list = Vec::new();
    loop {
        list.push(parser.parse_complex()?);
        parser.skip_whitespace();
        match parser.peek() {
            None => break,
            Some(',') => {
                parser.bump();
                parser.skip_whitespace();
                if parser.at_end() {
                    return Err(parser.error(SelectorErrorKind::ExpectedSelector));
                }
            }
            Some(c) => return Err(parser.error(SelectorErrorKind::UnexpectedCharacter(c))),
        }
    }
    Ok(SelectorList(list))
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

const PSEUDO_ELEMENTS: &[&str] = &[
    "after",
    "backdrop",
    "before",
    "file-selector-button",
    "first-letter",
    "first-line",
    "marker",
    "placeholder",
    "selection",
];

const USER_ACTIONS: &[&str] = &[
    "active",
    "focus",
    "focus-visible",
    "focus-within",
    "hover",
    "target",
    "visited",
];

fn is_combinator(c: char) -> bool {
    matches!(c, '>' | '+' | '~')
}

impl<'a> Parser<'a> {
    fn error(&self, kind: SelectorErrorKind) -> SelectorError {
        SelectorError {
            kind,
            position: self.pos,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn expect(&mut self, want: char, kind: SelectorErrorKind) -> Result<(), SelectorError> {
        match self.peek() {
            Some(c) if c == want => {
                self.bump();
                Ok(())
            }
            None => Err(self.error(SelectorErrorKind::UnexpectedEnd)),
            Some(_) => Err(self.error(kind)),
        }
    }

    fn starts_escape(&self, offset: usize) -> bool {
        self.peek_nth(offset) == Some('\\')
            && !matches!(self.peek_nth(offset + 1), None | Some('\n' | '\r' | '\x0c'))
    }

    fn starts_identifier(&self) -> bool {
        match self.peek() {
            Some('-') => match self.peek_nth(1) {
                Some(c) if is_name_start(c) || c == '-' => true,
                _ => self.starts_escape(1),
            },
            Some(c) if is_name_start(c) => true,
            Some('\\') => self.starts_escape(0),
            _ => false,
        }
    }

    fn parse_identifier(&mut self) -> Result<String, SelectorError> {
        if !self.starts_identifier() {
            if self.peek() == Some('\\') {
                return Err(self.error(SelectorErrorKind::InvalidEscape));
            }
            return Err(self.error(SelectorErrorKind::ExpectedIdentifier));
        }
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                if !self.starts_escape(0) {
                    return Err(self.error(SelectorErrorKind::InvalidEscape));
                }
                self.bump();
                out.push(self.consume_escape());
            } else if is_name_char(c) {
                self.bump();
                out.push(c);
            } else {
                break;
            }
        }
        Ok(out)
    }

    /// Called just past a backslash known to start a valid escape.
    fn consume_escape(&mut self) -> char {
        let mut hex = String::new();
        while hex.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            hex.extend(self.bump());
        }
        if hex.is_empty() {
            return self.bump().unwrap_or('\u{FFFD}');
        }
        if self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.bump();
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|v| *v != 0)
            .and_then(char::from_u32)
            .unwrap_or('\u{FFFD}')
    }

    fn parse_string(&mut self) -> Result<String, SelectorError> {
        let Some(quote) = self.bump() else {
            return Err(self.error(SelectorErrorKind::UnexpectedEnd));
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error(SelectorErrorKind::MalformedAttribute)),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.peek() {
                    None => {}
                    Some('\n') => {
                        self.bump();
                    }
                    Some(_) => out.push(self.consume_escape()),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        if self.peek().is_some_and(is_combinator) {
            return Err(self.error(SelectorErrorKind::DanglingCombinator));
        }
        let Some(first) = self.parse_compound()? else {
            return Err(self.leading_error());
        };
        let mut compounds = vec![first];
        let mut combinators = Vec::new();
        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') | Some(')') => break,
                Some(c) if is_combinator(c) => {
                    self.bump();
                    self.skip_whitespace();
                    match c {
                        '>' => Combinator::Child,
                        '+' => Combinator::NextSibling,
                        _ => Combinator::SubsequentSibling,
                    }
                }
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(c) => return Err(self.error(SelectorErrorKind::UnexpectedCharacter(c))),
            };
            match self.parse_compound()? {
                Some(compound) => {
                    combinators.push(combinator);
                    compounds.push(compound);
                }
                None if combinator == Combinator::Descendant => {
                    return Err(self.leading_error());
                }
                None => return Err(self.error(SelectorErrorKind::DanglingCombinator)),
            }
        }
        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn leading_error(&self) -> SelectorError {
        match self.peek() {
            None => self.error(SelectorErrorKind::UnexpectedEnd),
            Some(',') | Some(')') => self.error(SelectorErrorKind::ExpectedSelector),
            Some(c) if is_combinator(c) => self.error(SelectorErrorKind::DanglingCombinator),
            Some(c) => self.error(SelectorErrorKind::UnexpectedCharacter(c)),
        }
    }

    fn parse_compound(&mut self) -> Result<Option<Compound>, SelectorError> {
        let mut simple = Vec::new();
        if self.peek() == Some('*') {
            self.bump();
            simple.push(SimpleSelector::Universal);
        } else if self.starts_identifier() {
            let name = self.parse_identifier()?;
            simple.push(SimpleSelector::Type(name.to_ascii_lowercase()));
        }
        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    simple.push(SimpleSelector::Id(self.parse_identifier()?));
                }
                Some('.') => {
                    self.bump();
                    simple.push(SimpleSelector::Class(self.parse_identifier()?));
                }
                Some('[') => {
                    self.bump();
                    simple.push(SimpleSelector::Attribute(self.parse_attribute()?));
                }
                Some(':') => {
                    self.bump();
                    simple.push(self.parse_pseudo()?);
                }
                Some('|') => {
                    return Err(self.error(SelectorErrorKind::UnexpectedCharacter('|')));
                }
                _ => break,
            }
        }
        Ok((!simple.is_empty()).then_some(Compound(simple)))
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_whitespace();
        let name = self
            .parse_identifier()
            .map_err(|_| self.error(SelectorErrorKind::MalformedAttribute))?
            .to_ascii_lowercase();
        self.skip_whitespace();
        let op = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttributeSelector {
                    name,
                    matcher: None,
                    case_insensitive: false,
                });
            }
            Some('=') => AttrOp::Equals,
            Some('~') => AttrOp::Includes,
            Some('|') => AttrOp::DashMatch,
            Some('^') => AttrOp::Prefix,
            Some('$') => AttrOp::Suffix,
            Some('*') => AttrOp::Substring,
            None => return Err(self.error(SelectorErrorKind::UnexpectedEnd)),
            Some(_) => return Err(self.error(SelectorErrorKind::MalformedAttribute)),
        };
        self.bump();
        if op != AttrOp::Equals {
            self.expect('=', SelectorErrorKind::MalformedAttribute)?;
        }
        self.skip_whitespace();
        let value = match self.peek() {
            Some('"') | Some('\'') => self.parse_string()?,
            None => return Err(self.error(SelectorErrorKind::UnexpectedEnd)),
            Some(_) => self
                .parse_identifier()
                .map_err(|_| self.error(SelectorErrorKind::MalformedAttribute))?,
        };
        self.skip_whitespace();
        let mut case_insensitive = false;
        match self.peek() {
            Some('i') | Some('I') => {
                self.bump();
                case_insensitive = true;
                self.skip_whitespace();
            }
            Some('s') | Some('S') => {
                self.bump();
                self.skip_whitespace();
            }
            _ => {}
        }
        self.expect(']', SelectorErrorKind::MalformedAttribute)?;
        Ok(AttributeSelector {
            name,
            matcher: Some((op, value)),
            case_insensitive,
        })
    }

    /// Called just past the first `:`.
    fn parse_pseudo(&mut self) -> Result<SimpleSelector, SelectorError> {
        let start = self.pos;
        if self.peek() == Some(':') {
            self.bump();
            let name = self.parse_identifier()?.to_ascii_lowercase();
            if !PSEUDO_ELEMENTS.contains(&name.as_str()) {
                return Err(SelectorError {
                    kind: SelectorErrorKind::UnknownPseudoClass(format!(":{name}")),
                    position: start,
                });
            }
            return Ok(SimpleSelector::PseudoElement(name));
        }
        let name = self.parse_identifier()?.to_ascii_lowercase();
        let unknown = |name: String| SelectorError {
            kind: SelectorErrorKind::UnknownPseudoClass(name),
            position: start,
        };
        if self.peek() != Some('(') {
            let pseudo = match name.as_str() {
                "first-child" => PseudoClass::FirstChild,
                "last-child" => PseudoClass::LastChild,
                "only-child" => PseudoClass::OnlyChild,
                "first-of-type" => PseudoClass::FirstOfType,
                "last-of-type" => PseudoClass::LastOfType,
                "only-of-type" => PseudoClass::OnlyOfType,
                "root" => PseudoClass::Root,
                "empty" => PseudoClass::Empty,
                "link" | "any-link" => PseudoClass::Link,
                "checked" => PseudoClass::Checked,
                "disabled" => PseudoClass::Disabled,
                "enabled" => PseudoClass::Enabled,
                n if USER_ACTIONS.contains(&n) => PseudoClass::UserAction,
                // Legacy single-colon pseudo-elements.
                "before" | "after" | "first-line" | "first-letter" => {
                    return Ok(SimpleSelector::PseudoElement(name));
                }
                _ => return Err(unknown(name)),
            };
            return Ok(SimpleSelector::Pseudo(pseudo));
        }
        self.bump();
        let pseudo = match name.as_str() {
            "nth-child" => PseudoClass::NthChild(self.parse_nth()?),
            "nth-last-child" => PseudoClass::NthLastChild(self.parse_nth()?),
            "nth-of-type" => PseudoClass::NthOfType(self.parse_nth()?),
            "nth-last-of-type" => PseudoClass::NthLastOfType(self.parse_nth()?),
            "not" => PseudoClass::Not(self.parse_compound_list()?),
            "is" | "where" => PseudoClass::Is(self.parse_nested_list()?),
            "has" => PseudoClass::Has(self.parse_relative_list()?),
            _ => return Err(unknown(name)),
        };
        self.skip_whitespace();
        self.expect(')', SelectorErrorKind::MalformedNth)?;
        Ok(SimpleSelector::Pseudo(pseudo))
    }

    fn parse_nested_list(&mut self) -> Result<Vec<ComplexSelector>, SelectorError> {
        let mut out = Vec::new();
        loop {
            self.skip_whitespace();
            out.push(self.parse_complex()?);
            self.skip_whitespace();
            if self.peek() != Some(',') {
                return Ok(out);
            }
            self.bump();
        }
    }

    fn parse_relative_list(&mut self) -> Result<Vec<RelativeSelector>, SelectorError> {
        let mut out = Vec::new();
        loop {
            self.skip_whitespace();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                _ => Combinator::Descendant,
            };
            if combinator != Combinator::Descendant {
                self.bump();
                self.skip_whitespace();
            }
            let selector = self.parse_complex()?;
            out.push(RelativeSelector {
                combinator,
                selector,
            });
            self.skip_whitespace();
            if self.peek() != Some(',') {
                return Ok(out);
            }
            self.bump();
        }
    }

    fn parse_compound_list(&mut self) -> Result<Vec<Compound>, SelectorError> {
        let mut out = Vec::new();
        loop {
            self.skip_whitespace();
            match self.parse_compound()? {
                Some(compound) => out.push(compound),
                None => return Err(self.leading_error()),
            }
            self.skip_whitespace();
            if self.peek() != Some(',') {
                return Ok(out);
            }
            self.bump();
        }
    }

    fn parse_nth(&mut self) -> Result<Nth, SelectorError> {
        let start = self.pos;
        let Some(len) = self.input[start..].find(')') else {
            self.pos = self.input.len();
            return Err(self.error(SelectorErrorKind::UnexpectedEnd));
        };
        let raw = &self.input[start..start + len];
        let nth = parse_an_plus_b(raw).ok_or(SelectorError {
            kind: SelectorErrorKind::MalformedNth,
            position: start,
        })?;
        self.pos = start + len;
        Ok(nth)
    }
}

fn parse_an_plus_b(raw: &str) -> Option<Nth> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    match compact.as_str() {
        "" => return None,
        "odd" => return Some(Nth { a: 2, b: 1 }),
        "even" => return Some(Nth { a: 2, b: 0 }),
        _ => {}
    }
    let Some((a_part, b_part)) = compact.split_once('n') else {
        return Some(Nth {
            a: 0,
            b: parse_signed(&compact)?,
        });
    };
    let a = match a_part {
        "" | "+" => 1,
        "-" => -1,
        digits => parse_signed(digits)?,
    };
    let b = match b_part {
        "" => 0,
        rest if rest.starts_with(['+', '-']) => parse_signed(rest)?,
        _ => return None,
    };
    Some(Nth { a, b })
}

fn parse_signed(s: &str) -> Option<i32> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(input: &str) -> SelectorErrorKind {
        parse_selector_list(input).unwrap_err().kind
    }

    #[test]
    fn parses_generated_pattern_shape() {
        let list = parse_selector_list("body > div:nth-of-type(2).card > ul > li.item.active")
            .unwrap();
        let complex = &list.0[0];
        assert_eq!(complex.compounds.len(), 4);
        assert!(complex.combinators.iter().all(|c| *c == Combinator::Child));
        assert_eq!(
            complex.compounds[1],
            Compound(vec![
                SimpleSelector::Type("div".to_string()),
                SimpleSelector::Pseudo(PseudoClass::NthOfType(Nth { a: 0, b: 2 })),
                SimpleSelector::Class("card".to_string()),
            ])
        );
    }

    #[test]
    fn parses_combinators_and_lists() {
        let list = parse_selector_list("ul li ,  p+span~em").unwrap();
        assert_eq!(list.0.len(), 2);
        assert_eq!(list.0[0].combinators, vec![Combinator::Descendant]);
        assert_eq!(
            list.0[1].combinators,
            vec![Combinator::NextSibling, Combinator::SubsequentSibling]
        );
    }

    #[test]
    fn parses_escaped_identifiers() {
        let list = parse_selector_list(r"#\31 23 .a\:b .\@x").unwrap();
        let compounds = &list.0[0].compounds;
        assert_eq!(compounds[0].0, vec![SimpleSelector::Id("123".to_string())]);
        assert_eq!(compounds[1].0, vec![SimpleSelector::Class("a:b".to_string())]);
        assert_eq!(compounds[2].0, vec![SimpleSelector::Class("@x".to_string())]);
    }

    #[test]
    fn parses_attribute_selectors() {
        let list = parse_selector_list(r#"a[href^="https:" i][data-x][rel~=nofollow]"#).unwrap();
        let simple = &list.0[0].compounds[0].0;
        assert_eq!(
            simple[1],
            SimpleSelector::Attribute(AttributeSelector {
                name: "href".to_string(),
                matcher: Some((AttrOp::Prefix, "https:".to_string())),
                case_insensitive: true,
            })
        );
        assert_eq!(simple.len(), 4);
    }

    #[test]
    fn parses_nth_forms() {
        assert_eq!(parse_an_plus_b("odd"), Some(Nth { a: 2, b: 1 }));
        assert_eq!(parse_an_plus_b(" -n + 3 "), Some(Nth { a: -1, b: 3 }));
        assert_eq!(parse_an_plus_b("2n"), Some(Nth { a: 2, b: 0 }));
        assert_eq!(parse_an_plus_b("+5"), Some(Nth { a: 0, b: 5 }));
        assert_eq!(parse_an_plus_b("3n1"), None);
        assert_eq!(parse_an_plus_b("x"), None);
    }

    #[test]
    fn nth_matching() {
        let odd = Nth { a: 2, b: 1 };
        assert!(odd.matches(1) && odd.matches(3) && !odd.matches(2));
        let first_three = Nth { a: -1, b: 3 };
        assert!(first_three.matches(1) && first_three.matches(3) && !first_three.matches(4));
        assert!(Nth { a: 0, b: 2 }.matches(2));
    }

    #[test]
    fn rejects_bad_identifiers() {
        assert_eq!(kind("###not a selector"), SelectorErrorKind::ExpectedIdentifier);
        assert_eq!(kind(".1abc"), SelectorErrorKind::ExpectedIdentifier);
        assert_eq!(kind("div!"), SelectorErrorKind::UnexpectedCharacter('!'));
        assert!(parse_selector_list("#").unwrap_err().is_identifier_error());
    }

    #[test]
    fn rejects_structural_mistakes() {
        assert_eq!(kind(""), SelectorErrorKind::Empty);
        assert_eq!(kind("   "), SelectorErrorKind::Empty);
        assert_eq!(kind("> li"), SelectorErrorKind::DanglingCombinator);
        assert_eq!(kind("ul >"), SelectorErrorKind::DanglingCombinator);
        assert_eq!(kind("a,"), SelectorErrorKind::ExpectedSelector);
        assert_eq!(kind(", a"), SelectorErrorKind::ExpectedSelector);
        assert_eq!(kind("a[href"), SelectorErrorKind::UnexpectedEnd);
        assert_eq!(kind("li:nth-child(foo)"), SelectorErrorKind::MalformedNth);
        assert!(parse_selector_list("a >> b").unwrap_err().is_structural_error());
    }

    #[test]
    fn rejects_unknown_pseudo_classes() {
        assert_eq!(
            kind("a:hovered"),
            SelectorErrorKind::UnknownPseudoClass("hovered".to_string())
        );
        assert_eq!(
            kind("p::bogus"),
            SelectorErrorKind::UnknownPseudoClass(":bogus".to_string())
        );
        assert_eq!(
            kind("li:contains(x)"),
            SelectorErrorKind::UnknownPseudoClass("contains".to_string())
        );
    }

    #[test]
    fn parses_state_pseudo_classes_and_pseudo_elements() {
        let simple = |input: &str| parse_selector_list(input).unwrap().0[0].compounds[0].0.clone();
        assert_eq!(simple("a:link")[1], SimpleSelector::Pseudo(PseudoClass::Link));
        assert_eq!(simple(":any-link")[0], SimpleSelector::Pseudo(PseudoClass::Link));
        assert_eq!(simple("input:CHECKED")[1], SimpleSelector::Pseudo(PseudoClass::Checked));
        assert_eq!(simple("a:hover")[1], SimpleSelector::Pseudo(PseudoClass::UserAction));
        assert_eq!(
            simple("p::before")[1],
            SimpleSelector::PseudoElement("before".to_string())
        );
        assert_eq!(
            simple("p:first-line")[1],
            SimpleSelector::PseudoElement("first-line".to_string())
        );
    }

    #[test]
    fn parses_selector_list_arguments() {
        let list = parse_selector_list(":is(li, ul > a).x").unwrap();
        let SimpleSelector::Pseudo(PseudoClass::Is(inner)) = &list.0[0].compounds[0].0[0] else {
            panic!("expected :is");
        };
        assert_eq!(inner.len(), 2);
        assert_eq!(inner[1].combinators, vec![Combinator::Child]);
        assert_eq!(
            parse_selector_list("li:where(.row)").unwrap(),
            parse_selector_list("li:is(.row)").unwrap()
        );
    }

    #[test]
    fn parses_relative_selectors() {
        let list = parse_selector_list("li:has(a, > span.x, + li)").unwrap();
        let SimpleSelector::Pseudo(PseudoClass::Has(relative)) = &list.0[0].compounds[0].0[1]
        else {
            panic!("expected :has");
        };
        let combinators: Vec<Combinator> = relative.iter().map(|r| r.combinator).collect();
        assert_eq!(
            combinators,
            vec![
                Combinator::Descendant,
                Combinator::Child,
                Combinator::NextSibling
            ]
        );
    }

    #[test]
    fn rejects_malformed_selector_list_arguments() {
        assert_eq!(kind(":is()"), SelectorErrorKind::ExpectedSelector);
        assert_eq!(kind("li:has(>)"), SelectorErrorKind::ExpectedSelector);
        assert_eq!(kind(":where(a,"), SelectorErrorKind::UnexpectedEnd);
        assert_eq!(kind(":is(a b"), SelectorErrorKind::UnexpectedEnd);
    }
}
