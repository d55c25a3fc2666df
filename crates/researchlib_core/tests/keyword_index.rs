use researchlib_core::{
    index_by_keyword, Collection, Document, DocumentRecord, IndexError, KeywordIndex, NewDocument,
};

fn document(identifier: &str, title: &str, abstract_text: &str) -> Document {
    Document::create(
        NewDocument::new(title, "Jane Doe")
            .identifier(identifier)
            .abstract_text(abstract_text),
    )
    .unwrap()
}

#[test]
fn tokens_are_lowercase_words_of_three_or_more_letters() {
    let docs = vec![document("D1", "AI and Machine Learning", "An ML primer")];
    let index = index_by_keyword(&docs);

    assert!(index.contains_key("machine"));
    assert!(index.contains_key("learning"));
    assert!(index.contains_key("and"));
    assert!(index.contains_key("primer"));
    assert!(!index.contains_key("ai"));
    assert!(!index.contains_key("ml"));
    assert!(!index.contains_key("an"));
}

#[test]
fn every_identifier_under_a_term_contains_that_term() {
    let docs = vec![
        document("D1", "Graph Theory", "Vertices and edges in graph structures"),
        document("D2", "Category Theory", "Arrows compose"),
        document("D3", "Streaming Graphs", "Incremental graph updates"),
    ];
    let index = KeywordIndex::from_documents(&docs);

    for (term, identifiers) in index.as_map() {
        for identifier in identifiers {
            let doc = docs
                .iter()
                .find(|doc| doc.identifier() == identifier)
                .unwrap();
            let text = format!("{} {}", doc.title(), doc.abstract_text()).to_lowercase();
            assert!(text.contains(term.as_str()), "{identifier} lacks {term}");
        }
    }
    assert_eq!(index.search_keyword("graph").unwrap(), ["D1", "D3"]);
    assert_eq!(index.search_keyword("THEORY").unwrap(), ["D1", "D2"]);
}

#[test]
fn repeated_terms_post_each_document_once() {
    let docs = vec![document("D1", "Data data DATA", "more data")];
    let index = KeywordIndex::from_documents(&docs);
    assert_eq!(index.search_keyword("data").unwrap(), ["D1"]);
}

#[test]
fn unknown_terms_return_empty_and_blank_terms_fail() {
    let index = KeywordIndex::from_documents(&[document("D1", "Rust", "")]);
    assert!(index.search_keyword("python").unwrap().is_empty());
    assert_eq!(
        index.search_keyword("   ").unwrap_err(),
        IndexError::EmptyKeyword
    );
}

#[test]
fn records_and_collections_index_alike() {
    let mut collection = Collection::new("Shelf", None).unwrap();
    collection.add_document(document("D1", "Quantum Optics", "Photon statistics"));
    let from_collection = KeywordIndex::from_collection(&collection);

    let records: Vec<DocumentRecord> = collection.to_records();
    let from_records = KeywordIndex::from_documents(&records);

    assert_eq!(from_collection, from_records);
    assert_eq!(from_collection.len(), 4);
}

#[test]
fn empty_input_builds_empty_index() {
    let docs: Vec<Document> = Vec::new();
    let index = KeywordIndex::from_documents(&docs);
    assert!(index.is_empty());
    assert_eq!(index.to_string(), "KeywordIndex(0 terms)");
}
