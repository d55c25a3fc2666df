use researchlib_core::{
    generate_unique_id, normalize_author_name, sanitize_input, validate_isbn, Author, FieldError,
};

#[test]
fn author_names_are_reordered_and_capitalized() {
    assert_eq!(normalize_author_name("jane doe").unwrap(), "Doe, Jane");
    assert_eq!(
        normalize_author_name("John Ronald Reuel Tolkien").unwrap(),
        "Tolkien, John Ronald Reuel"
    );
    assert_eq!(normalize_author_name("  ada   LOVELACE ").unwrap(), "Lovelace, Ada");
}

#[test]
fn renormalizing_normalized_names_is_idempotent() {
    for raw in ["jane doe", "John Ronald Reuel Tolkien", "plato", "mary-kate o'neil"] {
        let once = normalize_author_name(raw).unwrap();
        let twice = normalize_author_name(&once).unwrap();
        assert_eq!(once, twice, "normalization drifted for `{raw}`");
    }
}

#[test]
fn empty_author_name_is_a_validation_error() {
    assert_eq!(
        normalize_author_name("").unwrap_err(),
        FieldError::EmptyAuthorName
    );
    assert!(Author::new("", None).is_err());
}

#[test]
fn isbn_examples() {
    assert!(validate_isbn("9780306406157").unwrap());
    assert!(validate_isbn("0306406152").unwrap());
    assert!(validate_isbn("978-0-306-40615-7").unwrap());
    assert!(validate_isbn("0 306 40615 2").unwrap());
    assert!(!validate_isbn("abc123").unwrap());
    assert!(!validate_isbn("123").unwrap());
    assert!(!validate_isbn("97803064061X7").unwrap());
    assert_eq!(validate_isbn("").unwrap_err(), FieldError::EmptyIsbn);
}

#[test]
fn sanitizer_removes_markup_brackets() {
    let cleaned = sanitize_input("Hello<script>alert(\"x\")</script>");
    assert!(!cleaned.contains('<'));
    assert!(!cleaned.contains('>'));
}

#[test]
fn generated_ids_use_prefix_and_stay_unique_at_catalog_scale() {
    let ids = (0..5_000)
        .map(|_| generate_unique_id("DOC"))
        .collect::<std::collections::HashSet<_>>();
    assert_eq!(ids.len(), 5_000);
    assert!(ids.iter().all(|id| id.starts_with("DOC-") && id.len() == 14));
}
