use pretty_assertions::assert_eq;
use wordcount_core::{count_words, DocNode, FrequencyTable, SortDirection, WordCount, WordSplitter};

fn whitespace() -> WordSplitter {
    WordSplitter::new(r"\s+").unwrap()
}

#[test]
fn counts_repeated_words_in_a_text_node() {
    let doc = DocNode::text("the cat the dog the");
    let table = count_words(&doc, &whitespace());

    assert_eq!(table.get("the"), Some(3));
    assert_eq!(table.get("cat"), Some(1));
    assert_eq!(table.get("dog"), Some(1));
    assert_eq!(table.len(), 3);
    assert_eq!(table.total(), 5);
}

#[test]
fn ascending_breaks_ties_alphabetically() {
    let doc = DocNode::text("the dog the cat the");
    let sorted = count_words(&doc, &whitespace()).sorted(SortDirection::Ascending);

    assert_eq!(
        sorted,
        vec![
            WordCount::new("cat", 1),
            WordCount::new("dog", 1),
            WordCount::new("the", 3),
        ]
    );
}

#[test]
fn descending_puts_most_frequent_first() {
    let doc = DocNode::text("b a b c b a");
    let sorted = count_words(&doc, &whitespace()).sorted(SortDirection::Descending);

    assert_eq!(
        sorted,
        vec![
            WordCount::new("b", 3),
            WordCount::new("a", 2),
            WordCount::new("c", 1),
        ]
    );
}

#[test]
fn alphabetical_ignores_counts() {
    let doc = DocNode::text("pear apple pear fig");
    let sorted = count_words(&doc, &whitespace()).sorted(SortDirection::Alphabetical);
    let words: Vec<&str> = sorted.iter().map(|entry| entry.word.as_str()).collect();

    assert_eq!(words, vec!["apple", "fig", "pear"]);
}

#[test]
fn default_direction_is_ascending() {
    assert_eq!(SortDirection::default(), SortDirection::Ascending);
}

#[test]
fn sorted_counts_are_monotonic() {
    let text = "a b c d a b c a b a e e e e e f";
    let table = count_words(&DocNode::text(text), &whitespace());

    let ascending = table.sorted(SortDirection::Ascending);
    assert!(ascending.windows(2).all(|pair| pair[0].count <= pair[1].count));

    let descending = table.sorted(SortDirection::Descending);
    assert!(descending.windows(2).all(|pair| pair[0].count >= pair[1].count));
}

#[test]
fn traversal_visits_nested_containers() {
    let doc = DocNode::container([
        DocNode::container([DocNode::text("alpha beta")]),
        DocNode::empty(),
        DocNode::container([
            DocNode::text("beta"),
            DocNode::container([DocNode::container([DocNode::text("gamma beta")])]),
        ]),
    ]);
    let table = count_words(&doc, &whitespace());

    assert_eq!(table.get("alpha"), Some(1));
    assert_eq!(table.get("beta"), Some(3));
    assert_eq!(table.get("gamma"), Some(1));
}

#[test]
fn sibling_order_does_not_change_counts() {
    let children = vec![
        DocNode::text("one two"),
        DocNode::container([DocNode::text("two three")]),
        DocNode::text("three three"),
    ];
    let mut reversed = children.clone();
    reversed.reverse();
    let mut rotated = children.clone();
    rotated.rotate_left(1);

    let splitter = whitespace();
    let expected = count_words(&DocNode::container(children), &splitter);
    assert_eq!(count_words(&DocNode::container(reversed), &splitter), expected);
    assert_eq!(count_words(&DocNode::container(rotated), &splitter), expected);
}

#[test]
fn blank_fragments_are_discarded() {
    let splitter = WordSplitter::new(",").unwrap();
    let table = count_words(&DocNode::text(",a,, ,\t,b,"), &splitter);

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("a"), Some(1));
    assert_eq!(table.get("b"), Some(1));
}

#[test]
fn words_are_counted_verbatim() {
    let splitter = WordSplitter::new(",").unwrap();
    let table = count_words(&DocNode::text("Cat, cat,cat"), &splitter);

    assert_eq!(table.get("Cat"), Some(1));
    assert_eq!(table.get(" cat"), Some(1));
    assert_eq!(table.get("cat"), Some(1));
}

#[test]
fn unmatched_delimiter_keeps_text_whole() {
    let splitter = WordSplitter::new("#never#").unwrap();
    let table = count_words(&DocNode::text("  hello brave world\n"), &splitter);

    assert_eq!(table.len(), 1);
    assert_eq!(table.get("  hello brave world\n"), Some(1));
}

#[test]
fn empty_document_yields_empty_table() {
    let table = count_words(&DocNode::empty(), &whitespace());
    assert!(table.is_empty());
    assert!(table.sorted(SortDirection::Descending).is_empty());
}

#[test]
fn table_collects_from_words() {
    let table: FrequencyTable = ["x", "y", "x"].into_iter().collect();
    assert_eq!(table.get("x"), Some(2));
    assert_eq!(table.get("y"), Some(1));
    assert_eq!(table.get("z"), None);

    let mut pairs: Vec<(&str, usize)> = table.iter().collect();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![("x", 2), ("y", 1)]);
}
