//! Substring search over serialized document records.

use crate::model::document::DocumentRecord;

/// Fields searched when the caller does not name any.
pub const DEFAULT_SEARCH_FIELDS: &[&str] = &["title", "author", "abstract", "keywords"];

/// Returns records whose named fields contain `query`, case-insensitively.
///
/// Unknown field names are ignored. Blank queries match nothing. Result order
/// follows input order.
pub fn search_records<'a>(
    query: &str,
    records: &'a [DocumentRecord],
    fields: Option<&[&str]>,
) -> Vec<&'a DocumentRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let fields = fields.unwrap_or(DEFAULT_SEARCH_FIELDS);

    records
        .iter()
        .filter(|record| {
            fields
                .iter()
                .any(|field| field_matches(record, field, needle.as_str()))
        })
        .collect()
}

fn field_matches(record: &DocumentRecord, field: &str, needle: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);
    match field {
        "title" => contains(&record.title),
        "author" => contains(&record.author),
        "identifier" => contains(&record.identifier),
        "year" => contains(&record.year),
        "abstract" => contains(&record.abstract_text),
        "keywords" => record.keywords.iter().any(|keyword| contains(keyword)),
        "last_updated" => contains(&record.last_updated),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::search_records;
    use crate::model::document::DocumentRecord;

    fn record(identifier: &str, title: &str, keywords: &[&str]) -> DocumentRecord {
        DocumentRecord {
            title: title.to_string(),
            author: "Doe, Jane".to_string(),
            identifier: identifier.to_string(),
            year: "2020".to_string(),
            abstract_text: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            last_updated: "2020-01-01".to_string(),
        }
    }

    #[test]
    fn matches_default_fields_case_insensitively() {
        let records = vec![
            record("A", "Medieval Manuscripts", &[]),
            record("B", "Modern Art", &["manuscript"]),
            record("C", "Cooking", &[]),
        ];
        let hits = search_records("MANUSCRIPT", &records, None);
        let ids = hits.iter().map(|r| r.identifier.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn restricts_to_named_fields() {
        let records = vec![record("A", "Art", &[]), record("B", "Other", &[])];
        assert_eq!(search_records("a", &records, Some(&["identifier"][..])).len(), 1);
        assert!(search_records("doe", &records, Some(&["title"][..])).is_empty());
        assert!(search_records("  ", &records, None).is_empty());
    }
}
