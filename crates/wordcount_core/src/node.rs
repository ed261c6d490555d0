/// A node of a parsed document, reduced to what word counting needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocNode {
    /// Literal text content.
    Text(String),
    /// A markup element with its children in document order.
    Container(Vec<DocNode>),
}

impl DocNode {
    pub fn text(content: impl Into<String>) -> Self {
        DocNode::Text(content.into())
    }

    pub fn container(children: impl IntoIterator<Item = DocNode>) -> Self {
        DocNode::Container(children.into_iter().collect())
    }

    /// An empty container, as produced by an empty document.
    pub fn empty() -> Self {
        DocNode::Container(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DocNode::Text(content) => content.is_empty(),
            DocNode::Container(children) => children.iter().all(DocNode::is_empty),
        }
    }
}
