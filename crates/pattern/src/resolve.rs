use crate::capability::TreeQuery;
use crate::generalize::Pattern;
use crate::path::relative_depth;
use html::{Document, NodeId};

/// Matched elements in document order.
pub type MatchSet = Vec<NodeId>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub matches: MatchSet,
    /// The pattern's query could not be executed; `matches` holds the original selections.
    pub used_fallback: bool,
}

/// Execute `pattern.relative_query` under `anchor` and keep the hits sitting exactly
/// `expected_depth` levels below it.
///
/// A query syntax error never escapes: the result degrades to `fallback`, the two nodes the
/// pattern was inferred from, with a repeated node reported once.
pub fn resolve(
    doc: &Document,
    query: &dyn TreeQuery,
    pattern: &Pattern,
    anchor: NodeId,
    expected_depth: usize,
    fallback: [NodeId; 2],
) -> Resolution {
    match query.query_all(doc, Some(anchor), &pattern.relative_query) {
        Ok(found) => {
            let total = found.len();
            let matches: MatchSet = found
                .into_iter()
                .filter(|node| relative_depth(doc, *node, anchor) == Some(expected_depth))
                .collect();
            log::debug!(
                target: "pattern.resolve",
                "{:?} under {anchor}: {} of {total} hit(s) at depth {expected_depth}",
                pattern.relative_query,
                matches.len()
            );
            Resolution {
                matches,
                used_fallback: false,
            }
        }
        Err(err) => {
            log::warn!(
                target: "pattern.resolve",
                "query {:?} rejected ({err}); falling back to the selected nodes",
                pattern.relative_query
            );
            let [a, b] = fallback;
            let matches = if a == b { vec![a] } else { vec![a, b] };
            Resolution {
                matches,
                used_fallback: true,
            }
        }
    }
}
