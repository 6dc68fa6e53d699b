//! The picker session: two selections, the inferred pattern, and the edited query that
//! replaces it.

use crate::capability::Capabilities;
use crate::config::EngineConfig;
use crate::debounce::{Clock, SystemClock};
use crate::error::EngineError;
use crate::generalize::Pattern;
use crate::infer::infer;
use crate::resolve::MatchSet;
use crate::selection::{RejectReason, SelectOutcome, SelectedNode, Selection, inside_overlay};
use crate::validate::{IncrementalValidator, Validation, ValidationResult, validate_now};
use html::{Document, NodeId};
use serde::Serialize;

/// Snapshot for the control panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub selections: Selection,
    pub match_count: usize,
    pub final_query: String,
    pub validation_pending: bool,
}

pub struct Session<C: Clock = SystemClock> {
    config: EngineConfig,
    caps: Capabilities,
    selection: Selection,
    pattern: Option<Pattern>,
    matches: MatchSet,
    final_query: String,
    validator: IncrementalValidator<C>,
}

impl Session<SystemClock> {
    pub fn new(config: EngineConfig) -> Self {
        let caps = Capabilities::from_config(&config);
        Self::with_parts(config, caps, SystemClock::new())
    }
}

impl Default for Session<SystemClock> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<C: Clock> Session<C> {
    pub fn with_parts(config: EngineConfig, caps: Capabilities, clock: C) -> Self {
        let validator = IncrementalValidator::new(clock, config.debounce_window());
        Self {
            config,
            caps,
            selection: Selection::default(),
            pattern: None,
            matches: Vec::new(),
            final_query: String::new(),
            validator,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn matches(&self) -> &[NodeId] {
        &self.matches
    }

    pub fn final_query(&self) -> &str {
        &self.final_query
    }

    pub fn select_node(&mut self, doc: &Document, node: NodeId) -> SelectOutcome {
        if self.selection.is_full() {
            return SelectOutcome::Full;
        }
        if !doc.is_element(node) {
            return SelectOutcome::Rejected(RejectReason::NotAnElement);
        }
        if let Some(overlay) = self.config.overlay_class.as_deref()
            && inside_overlay(doc, node, overlay)
        {
            log::trace!(target: "pattern.session", "ignoring {node}: inside overlay");
            return SelectOutcome::Rejected(RejectReason::InsideOverlay);
        }
        let selected = SelectedNode::capture(
            doc,
            node,
            self.caps.reserved.as_ref(),
            &self.config.notable_attributes,
        );
        let label = selected.describe();
        match self.selection.push(selected) {
            Ok(slot) => {
                log::debug!(target: "pattern.session", "selected {node} ({label}) in slot {slot}");
                SelectOutcome::Accepted { slot }
            }
            Err(_) => SelectOutcome::Full,
        }
    }

    pub fn compute_pattern(&mut self, doc: &Document) -> Result<(Pattern, MatchSet), EngineError> {
        let Some([a, b]) = self.selection.pair() else {
            return Err(EngineError::IncompleteSelection {
                selected: self.selection.len(),
            });
        };
        let inference = infer(doc, &self.caps, a, b, self.config.anchor_class_limit)?;
        let pattern = inference.pattern;
        let matches = inference.resolution.matches;
        log::debug!(
            target: "pattern.session",
            "pattern {:?}: {} match(es){}",
            pattern.full_query,
            matches.len(),
            if inference.resolution.used_fallback { " (fallback)" } else { "" }
        );
        self.final_query = pattern.full_query.clone();
        self.matches = matches.clone();
        self.pattern = Some(pattern.clone());
        Ok((pattern, matches))
    }

    /// Validate `text` immediately, superseding any pending debounced edit.
    pub fn validate(&mut self, doc: &Document, text: &str) -> ValidationResult {
        self.validator.cancel();
        let validation = validate_now(doc, self.caps.query.as_ref(), text);
        self.accept(validation)
    }

    pub fn edit(&mut self, text: &str) -> ValidationResult {
        self.validator.edit(text)
    }

    /// Drive the debouncer; returns the result of the latest edit once it fires.
    pub fn poll(&mut self, doc: &Document) -> Option<ValidationResult> {
        let validation = self.validator.poll(doc, self.caps.query.as_ref())?;
        Some(self.accept(validation))
    }

    fn accept(&mut self, validation: Validation) -> ValidationResult {
        if validation.result.is_valid() {
            self.final_query = validation.query;
            self.matches = validation.matches;
        }
        validation.result
    }

    pub fn reset(&mut self) {
        self.selection.clear();
        self.pattern = None;
        self.matches.clear();
        self.final_query.clear();
        self.validator.cancel();
        log::trace!(target: "pattern.session", "reset");
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            selections: self.selection.clone(),
            match_count: self.matches.len(),
            final_query: self.final_query.clone(),
            validation_pending: self.validator.is_pending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::ManualClock;
    use crate::validate::ValidationStatus;
    use html::parse_document;
    use std::rc::Rc;
    use std::time::Duration;

    const PAGE: &str = "<html><body>\
        <ul class=feed><li class=item>a</li><li class=item>b</li><li class=item>c</li></ul>\
        <div class=element-selector-overlay><span>panel</span></div>\
        </body></html>";

    fn find_all(doc: &Document, selector: &str) -> Vec<NodeId> {
        css::query_all(doc, None, selector).unwrap()
    }

    fn session() -> Session {
        Session::default()
    }

    fn manual_session() -> (Session<Rc<ManualClock>>, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new());
        let config = EngineConfig::default();
        let caps = Capabilities::from_config(&config);
        (Session::with_parts(config, caps, Rc::clone(&clock)), clock)
    }

    #[test]
    fn third_selection_is_a_no_op() {
        let doc = parse_document(PAGE);
        let items = find_all(&doc, "li");
        let mut session = session();
        assert_eq!(session.select_node(&doc, items[0]), SelectOutcome::Accepted { slot: 0 });
        assert_eq!(session.select_node(&doc, items[1]), SelectOutcome::Accepted { slot: 1 });
        assert_eq!(session.select_node(&doc, items[2]), SelectOutcome::Full);
        assert_eq!(session.selection().len(), 2);
        assert_eq!(session.selection().pair(), Some([items[0], items[1]]));
    }

    #[test]
    fn overlay_and_non_elements_are_rejected() {
        let doc = parse_document(PAGE);
        let mut session = session();
        let span = find_all(&doc, "span")[0];
        let text = doc.children(find_all(&doc, "li")[0])[0];
        assert_eq!(
            session.select_node(&doc, span),
            SelectOutcome::Rejected(RejectReason::InsideOverlay)
        );
        assert_eq!(
            session.select_node(&doc, text),
            SelectOutcome::Rejected(RejectReason::NotAnElement)
        );
        assert_eq!(
            session.select_node(&doc, NodeId::from_raw(9_999)),
            SelectOutcome::Rejected(RejectReason::NotAnElement)
        );
        assert!(session.selection().is_empty());
    }

    #[test]
    fn compute_pattern_needs_two_selections() {
        let doc = parse_document(PAGE);
        let mut session = session();
        assert_eq!(
            session.compute_pattern(&doc),
            Err(EngineError::IncompleteSelection { selected: 0 })
        );
        session.select_node(&doc, find_all(&doc, "li")[0]);
        assert_eq!(
            session.compute_pattern(&doc),
            Err(EngineError::IncompleteSelection { selected: 1 })
        );
    }

    #[test]
    fn compute_pattern_stores_query_and_matches() {
        let doc = parse_document(PAGE);
        let items = find_all(&doc, "li");
        let mut session = session();
        session.select_node(&doc, items[0]);
        session.select_node(&doc, items[2]);
        let (pattern, matches) = session.compute_pattern(&doc).unwrap();
        assert_eq!(pattern.full_query, "body > ul.feed > li.item");
        assert_eq!(matches, items);
        assert_eq!(session.final_query(), "body > ul.feed > li.item");
        assert_eq!(session.matches(), items.as_slice());
    }

    #[test]
    fn only_valid_results_replace_the_final_query() {
        let doc = parse_document(PAGE);
        let items = find_all(&doc, "li");
        let mut session = session();
        session.select_node(&doc, items[0]);
        session.select_node(&doc, items[1]);
        session.compute_pattern(&doc).unwrap();

        let warning = session.validate(&doc, "li.nope");
        assert_eq!(warning.status, ValidationStatus::Warning);
        assert_eq!(session.final_query(), "body > ul.feed > li.item");
        assert_eq!(session.matches().len(), 3);

        let invalid = session.validate(&doc, "li[");
        assert_eq!(invalid.status, ValidationStatus::Invalid);
        assert_eq!(session.matches().len(), 3);

        let valid = session.validate(&doc, " li:first-child ");
        assert_eq!(valid.status, ValidationStatus::Valid);
        assert_eq!(session.final_query(), "li:first-child");
        assert_eq!(session.matches(), &items[..1]);
    }

    #[test]
    fn debounced_edits_apply_after_the_window() {
        let doc = parse_document(PAGE);
        let (mut session, clock) = manual_session();
        assert_eq!(session.edit("li").status, ValidationStatus::Pending);
        assert!(session.state().validation_pending);
        clock.advance(Duration::from_millis(499));
        assert_eq!(session.poll(&doc), None);
        clock.advance(Duration::from_millis(1));
        let result = session.poll(&doc).unwrap();
        assert_eq!(result.match_count, 3);
        assert_eq!(session.final_query(), "li");
        assert!(!session.state().validation_pending);
    }

    #[test]
    fn reset_clears_everything_and_is_idempotent() {
        let doc = parse_document(PAGE);
        let items = find_all(&doc, "li");
        let (mut session, clock) = manual_session();
        session.select_node(&doc, items[0]);
        session.select_node(&doc, items[1]);
        session.compute_pattern(&doc).unwrap();
        session.edit("ul");
        session.reset();
        session.reset();
        clock.advance(Duration::from_secs(1));
        assert_eq!(session.poll(&doc), None);
        assert_eq!(
            session.state(),
            SessionState {
                selections: Selection::default(),
                match_count: 0,
                final_query: String::new(),
                validation_pending: false,
            }
        );
        assert!(session.pattern().is_none());
        assert_eq!(session.select_node(&doc, items[2]), SelectOutcome::Accepted { slot: 0 });
    }

    #[test]
    fn injected_reserved_predicate_filters_selection_metadata() {
        let doc = parse_document(
            "<html><body><ul class=feed>\
             <li class=\"row tmp-mark\">a</li><li class=\"row tmp-mark\">b</li>\
             </ul></body></html>",
        );
        let config = EngineConfig::default();
        let caps =
            Capabilities::from_config(&config).with_reserved(|c: &str| c.starts_with("tmp-"));
        let mut session = Session::with_parts(config, caps, Rc::new(ManualClock::new()));
        let items = find_all(&doc, "li");
        session.select_node(&doc, items[0]);
        session.select_node(&doc, items[1]);

        let first = session.selection().get(0).unwrap();
        assert_eq!(first.classes, vec!["row"]);
        assert_eq!(first.describe(), "li.row");
        let (pattern, _) = session.compute_pattern(&doc).unwrap();
        assert_eq!(pattern.full_query, "body > ul.feed > li.row");
        assert_eq!(session.state().selections.get(1).unwrap().classes, vec!["row"]);
    }
}
