use crate::document::{Document, NodeId};
use crate::tokenizer::{Token, tokenize};

/// Parse markup into a fresh [`Document`].
pub fn parse_document(input: &str) -> Document {
    build_document(&tokenize(input))
}

/// Build a document from a token stream.
///
/// Recovery follows the legacy builder: an end tag pops open elements up to and including the
/// nearest element with that name; an end tag with no matching open element is ignored.
pub fn build_document(tokens: &[Token]) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let mut open_elements: Vec<NodeId> = Vec::new();

    for token in tokens {
        let parent = open_elements.last().copied().unwrap_or(root);
        match token {
            Token::Doctype(s) => doc.set_doctype(s.clone()),
            Token::Comment(text) => {
                let id = doc.create_comment(text.as_str());
                attach(&mut doc, parent, id);
            }
            Token::Text(text) => {
                if !text.is_empty() {
                    let id = doc.create_text(text.as_str());
                    attach(&mut doc, parent, id);
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let id = doc.create_element(name, attributes.clone());
                attach(&mut doc, parent, id);
                if !*self_closing {
                    open_elements.push(id);
                }
            }
            Token::EndTag(name) => {
                let Some(pos) = open_elements
                    .iter()
                    .rposition(|id| doc.tag_name(*id) == Some(name.as_str()))
                else {
                    log::trace!(target: "html.builder", "ignoring unmatched end tag </{name}>");
                    continue;
                };
                open_elements.truncate(pos);
            }
        }
    }

    doc
}

fn attach(doc: &mut Document, parent: NodeId, child: NodeId) {
    // Freshly created nodes under an open element or the document always attach.
    let attached = doc.append_child(parent, child);
    debug_assert!(attached.is_ok(), "builder append failed: {attached:?}");
}
