use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::Html;
use wordcount_core::DocNode;

/// Elements whose content is raw data rather than visible text.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parse HTML into a [`DocNode`] tree.
///
/// Text nodes are kept verbatim; the document and its elements become
/// containers. Comments, doctypes and processing instructions are dropped, as
/// is the content of `<script>` and `<style>`. Malformed markup is repaired by
/// the parser, never rejected.
pub fn parse_document(html: &str) -> DocNode {
    let document = Html::parse_document(html);
    convert(document.tree.root()).unwrap_or_else(DocNode::empty)
}

fn convert(node: NodeRef<'_, Node>) -> Option<DocNode> {
    match node.value() {
        Node::Text(text) => Some(DocNode::text(&**text)),
        Node::Element(element) => {
            if is_raw_text(element.name()) {
                Some(DocNode::empty())
            } else {
                Some(convert_children(node))
            }
        }
        Node::Document | Node::Fragment => Some(convert_children(node)),
        _ => None,
    }
}

fn convert_children(node: NodeRef<'_, Node>) -> DocNode {
    DocNode::Container(node.children().filter_map(convert).collect())
}

fn is_raw_text(name: &str) -> bool {
    RAW_TEXT_ELEMENTS
        .iter()
        .any(|raw| raw.eq_ignore_ascii_case(name))
}
