//! Validation of user-edited selectors.

use crate::capability::TreeQuery;
use crate::debounce::{Clock, Debouncer};
use crate::resolve::MatchSet;
use css::SelectorError;
use html::Document;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MSG_EMPTY: &str = "Selector cannot be empty";
pub const MSG_NO_MATCHES: &str = "Valid selector, but no elements matched";
pub const MSG_VALID: &str = "Valid selector";
pub const MSG_PENDING: &str = "Validating...";
pub const MSG_INVALID_IDENTIFIER: &str = "Invalid identifier in selector";
pub const MSG_INVALID_STRUCTURE: &str = "Invalid selector syntax";
pub const MSG_INVALID_SYNTAX: &str = "Invalid CSS selector syntax";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    /// Parses, but matches nothing.
    Warning,
    Invalid,
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub status: ValidationStatus,
    pub match_count: usize,
    pub message: String,
}

impl ValidationResult {
    fn new(status: ValidationStatus, match_count: usize, message: &str) -> Self {
        Self {
            status,
            match_count,
            message: message.to_string(),
        }
    }

    pub fn pending() -> Self {
        Self::new(ValidationStatus::Pending, 0, MSG_PENDING)
    }

    pub fn is_valid(&self) -> bool {
        self.status == ValidationStatus::Valid
    }
}

/// A finished validation together with what it ran and found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub result: ValidationResult,
    /// The trimmed input.
    pub query: String,
    /// Non-empty only for a `Valid` result.
    pub matches: MatchSet,
}

pub fn classify_syntax_error(err: &SelectorError) -> &'static str {
    if err.is_identifier_error() {
        MSG_INVALID_IDENTIFIER
    } else if err.is_structural_error() {
        MSG_INVALID_STRUCTURE
    } else {
        MSG_INVALID_SYNTAX
    }
}

/// Validate `text` against the whole document right away.
pub fn validate_now(doc: &Document, query: &dyn TreeQuery, text: &str) -> Validation {
    let trimmed = text.trim();
    let (result, matches) = if trimmed.is_empty() {
        (
            ValidationResult::new(ValidationStatus::Invalid, 0, MSG_EMPTY),
            Vec::new(),
        )
    } else {
        match query.query_all(doc, None, trimmed) {
            Ok(found) if found.is_empty() => (
                ValidationResult::new(ValidationStatus::Warning, 0, MSG_NO_MATCHES),
                found,
            ),
            Ok(found) => (
                ValidationResult::new(ValidationStatus::Valid, found.len(), MSG_VALID),
                found,
            ),
            Err(err) => {
                log::debug!(target: "pattern.validate", "{trimmed:?} rejected: {err}");
                (
                    ValidationResult::new(ValidationStatus::Invalid, 0, classify_syntax_error(&err)),
                    Vec::new(),
                )
            }
        }
    };
    log::debug!(
        target: "pattern.validate",
        "{trimmed:?}: {:?} ({} match(es))",
        result.status,
        result.match_count
    );
    Validation {
        result,
        query: trimmed.to_string(),
        matches,
    }
}

/// Debounced front end over [`validate_now`]: only the text of the latest edit is ever
/// validated, once the edits have been quiet for a full window.
pub struct IncrementalValidator<C: Clock> {
    clock: C,
    debouncer: Debouncer<String>,
}

impl<C: Clock> IncrementalValidator<C> {
    pub fn new(clock: C, window: Duration) -> Self {
        Self {
            clock,
            debouncer: Debouncer::new(window),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Supersede any pending request with `text`.
    pub fn edit(&mut self, text: &str) -> ValidationResult {
        let generation = self.debouncer.schedule(text.to_string(), self.clock.now());
        log::trace!(target: "pattern.validate", "edit {generation} scheduled: {text:?}");
        ValidationResult::pending()
    }

    /// Run the pending request if its window has elapsed.
    pub fn poll(&mut self, doc: &Document, query: &dyn TreeQuery) -> Option<Validation> {
        let (text, generation) = self.debouncer.poll(self.clock.now())?;
        log::trace!(target: "pattern.validate", "edit {generation} fired");
        Some(validate_now(doc, query, &text))
    }

    pub fn cancel(&mut self) {
        if self.debouncer.cancel().is_some() {
            log::trace!(target: "pattern.validate", "pending edit cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CssQuery;
    use crate::debounce::ManualClock;
    use html::parse_document;
    use std::rc::Rc;

    const PAGE: &str = "<html><body><ul>\
        <li class=a>1</li><li class=\"a b\">2</li><li class=\"a b c\">3</li>\
        </ul></body></html>";

    #[test]
    fn empty_and_blank_input_is_invalid() {
        let doc = parse_document(PAGE);
        for text in ["", "   \t\n"] {
            let v = validate_now(&doc, &CssQuery, text);
            assert_eq!(v.result.status, ValidationStatus::Invalid);
            assert_eq!(v.result.match_count, 0);
            assert_eq!(v.result.message, MSG_EMPTY);
        }
    }

    #[test]
    fn counts_matches_and_trims_input() {
        let doc = parse_document(PAGE);
        let v = validate_now(&doc, &CssQuery, "  li.b  ");
        assert_eq!(v.result.status, ValidationStatus::Valid);
        assert_eq!(v.result.match_count, 2);
        assert_eq!(v.result.message, MSG_VALID);
        assert_eq!(v.query, "li.b");
        assert_eq!(v.matches.len(), 2);
    }

    #[test]
    fn zero_matches_is_a_warning() {
        let doc = parse_document(PAGE);
        let v = validate_now(&doc, &CssQuery, "li.missing");
        assert_eq!(v.result.status, ValidationStatus::Warning);
        assert_eq!(v.result.match_count, 0);
        assert_eq!(v.result.message, MSG_NO_MATCHES);
        assert!(v.matches.is_empty());
    }

    #[test]
    fn syntax_errors_are_classified() {
        let doc = parse_document(PAGE);
        let message = |text: &str| validate_now(&doc, &CssQuery, text).result.message;
        assert_eq!(message("###not a selector"), MSG_INVALID_IDENTIFIER);
        assert_eq!(message("li >"), MSG_INVALID_STRUCTURE);
        assert_eq!(message("li:hovered"), MSG_INVALID_SYNTAX);
        assert_eq!(message("p::bogus"), MSG_INVALID_SYNTAX);
        let v = validate_now(&doc, &CssQuery, "li >");
        assert_eq!(v.result.status, ValidationStatus::Invalid);
        assert_eq!(v.result.match_count, 0);
    }

    #[test]
    fn selectors_the_dom_accepts_are_not_syntax_errors() {
        let doc = parse_document(
            "<html><body><ul><li class=row><a href=\"/1\">1</a></li><li>2</li></ul></body></html>",
        );
        let status = |text: &str| validate_now(&doc, &CssQuery, text).result.status;
        for text in ["li:has(a)", ":is(li, a)", "li:where(.row)", "a:link"] {
            assert_eq!(status(text), ValidationStatus::Valid, "{text:?}");
        }
        for text in ["input:checked", "p::before", "li:hover", "li::after"] {
            assert_eq!(status(text), ValidationStatus::Warning, "{text:?}");
        }
    }

    #[test]
    fn rapid_edits_report_only_the_last() {
        let doc = parse_document(PAGE);
        let clock = Rc::new(ManualClock::new());
        let mut validator = IncrementalValidator::new(Rc::clone(&clock), Duration::from_millis(500));
        let mut reported = Vec::new();
        for text in ["li.a", "li.a.b", "li.a.b.c"] {
            assert_eq!(validator.edit(text).status, ValidationStatus::Pending);
            clock.advance(Duration::from_millis(100));
            reported.extend(validator.poll(&doc, &CssQuery));
        }
        assert!(reported.is_empty());
        clock.advance(Duration::from_millis(400));
        reported.extend(validator.poll(&doc, &CssQuery));
        clock.advance(Duration::from_secs(5));
        reported.extend(validator.poll(&doc, &CssQuery));
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].query, "li.a.b.c");
        assert_eq!(reported[0].result.match_count, 1);
    }

    #[test]
    fn cancel_suppresses_the_pending_result() {
        let doc = parse_document(PAGE);
        let clock = Rc::new(ManualClock::new());
        let mut validator = IncrementalValidator::new(Rc::clone(&clock), Duration::from_millis(500));
        validator.edit("li");
        assert!(validator.is_pending());
        validator.cancel();
        clock.advance(Duration::from_secs(1));
        assert_eq!(validator.poll(&doc, &CssQuery), None);
    }
}
