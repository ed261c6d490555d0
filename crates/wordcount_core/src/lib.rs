//! Word count core: document tree, tokenizing and frequency tables. No IO.
mod count;
mod node;
mod split;
mod table;

pub use count::{accumulate, count_words};
pub use node::DocNode;
pub use split::{SplitterError, WordSplitter};
pub use table::{FrequencyTable, SortDirection, WordCount};
