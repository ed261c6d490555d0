use crate::{DocNode, FrequencyTable, WordSplitter};

/// Counts the words of every text node under `root` into a fresh table.
pub fn count_words(root: &DocNode, splitter: &WordSplitter) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    accumulate(root, splitter, &mut table);
    table
}

/// Adds the words of every text node under `node` to `table`.
pub fn accumulate(node: &DocNode, splitter: &WordSplitter, table: &mut FrequencyTable) {
    match node {
        DocNode::Text(content) => table.extend(splitter.split(content)),
        DocNode::Container(children) => {
            for child in children {
                accumulate(child, splitter, table);
            }
        }
    }
}
