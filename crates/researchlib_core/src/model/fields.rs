//! Pure field normalization helpers.
//!
//! # Responsibility
//! - Canonicalize author names into `Surname, Given Names` form.
//! - Neutralize markup in free-text fields.
//! - Generate record identifiers and check ISBN shape.
//!
//! # Invariants
//! - Every helper is side-effect free except `generate_unique_id`, which only
//!   reads the OS random source.
//! - `normalize_author_name` is idempotent on its own output.

use chrono::{Local, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Prefix used for generated document identifiers.
pub const DOCUMENT_ID_PREFIX: &str = "DOC";
/// Sentinel year used when a record carries no publication date.
pub const NO_DATE: &str = "n.d.";

const ID_HEX_LEN: usize = 10;
const DATE_FORMAT: &str = "%Y-%m-%d";

pub type FieldResult<T> = Result<T, FieldError>;

/// Validation failures raised by field normalizers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Author name is empty or whitespace-only.
    EmptyAuthorName,
    /// ISBN input is empty.
    EmptyIsbn,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAuthorName => write!(f, "author name cannot be empty"),
            Self::EmptyIsbn => write!(f, "isbn cannot be empty"),
        }
    }
}

impl Error for FieldError {}

/// Standardizes an author name into `Surname, Given Names` form.
///
/// Names with fewer than two whitespace tokens are only title-cased. Names
/// that already contain a comma are treated as `Surname, Given` and only
/// re-capitalized, so normalizing twice yields the same value.
///
/// # Errors
/// - Returns [`FieldError::EmptyAuthorName`] for empty or blank input.
pub fn normalize_author_name(name: &str) -> FieldResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FieldError::EmptyAuthorName);
    }

    if let Some((surname, given)) = trimmed.split_once(',') {
        let surname = title_case_tokens(surname);
        let given = title_case_tokens(given);
        return Ok(match (surname.is_empty(), given.is_empty()) {
            (false, false) => format!("{surname}, {given}"),
            (false, true) => surname,
            (true, _) => given,
        });
    }

    let parts = trimmed.split_whitespace().collect::<Vec<_>>();
    let Some((surname, given)) = parts.split_last() else {
        return Err(FieldError::EmptyAuthorName);
    };
    if given.is_empty() {
        return Ok(title_case(surname));
    }

    let given = given
        .iter()
        .map(|token| title_case(token))
        .collect::<Vec<_>>()
        .join(" ");
    Ok(format!("{}, {given}", title_case(surname)))
}

/// Strips markup-significant characters and surrounding whitespace.
pub fn sanitize_input(text: &str) -> String {
    text.replace(['<', '>'], "").trim().to_string()
}

/// Generates `prefix-XXXXXXXXXX` with 10 uppercase hex characters.
///
/// Randomness comes from a v4 UUID, which is drawn from the OS CSPRNG.
pub fn generate_unique_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{prefix}-{}", &hex[..ID_HEX_LEN])
}

/// Checks ISBN-10 / ISBN-13 shape after removing hyphens and whitespace.
///
/// ISBN-10 requires the first nine characters to be digits (the check
/// character is unconstrained); ISBN-13 requires thirteen digits. Checksums
/// are not verified.
///
/// # Errors
/// - Returns [`FieldError::EmptyIsbn`] when `isbn` is empty.
pub fn validate_isbn(isbn: &str) -> FieldResult<bool> {
    if isbn.is_empty() {
        return Err(FieldError::EmptyIsbn);
    }

    let cleaned = isbn
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect::<Vec<_>>();

    let valid = match cleaned.len() {
        10 => cleaned[..9].iter().all(char::is_ascii_digit),
        13 => cleaned.iter().all(char::is_ascii_digit),
        _ => false,
    };
    Ok(valid)
}

/// Renders a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Returns the local current date as `YYYY-MM-DD`.
pub fn today_stamp() -> String {
    format_date(Local::now().date_naive())
}

/// Capitalizes the first letter of every alphabetic run and lowercases the rest.
pub(crate) fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}

fn title_case_tokens(value: &str) -> String {
    value
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{
        format_date, generate_unique_id, normalize_author_name, sanitize_input, title_case,
        validate_isbn, FieldError,
    };
    use chrono::NaiveDate;
    use std::collections::HashSet;

    #[test]
    fn normalize_reorders_surname_first() {
        assert_eq!(
            normalize_author_name("jane doe").expect("name should normalize"),
            "Doe, Jane"
        );
        assert_eq!(
            normalize_author_name("John Ronald Reuel Tolkien").expect("name should normalize"),
            "Tolkien, John Ronald Reuel"
        );
    }

    #[test]
    fn normalize_single_token_only_title_cases() {
        assert_eq!(
            normalize_author_name("plato").expect("name should normalize"),
            "Plato"
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_author_name("ada king lovelace").expect("first pass");
        let twice = normalize_author_name(&once).expect("second pass");
        assert_eq!(once, "Lovelace, Ada King");
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_rejects_blank_names() {
        assert_eq!(
            normalize_author_name("   ").unwrap_err(),
            FieldError::EmptyAuthorName
        );
    }

    #[test]
    fn sanitize_strips_angle_brackets() {
        let cleaned = sanitize_input("Hello<script>alert(\"x\")</script>");
        assert!(!cleaned.contains('<'));
        assert!(!cleaned.contains('>'));
        assert!(cleaned.starts_with("Hello"));
    }

    #[test]
    fn unique_ids_have_prefix_and_ten_hex_chars() {
        let id = generate_unique_id("DOC");
        let (prefix, hex) = id.split_once('-').expect("id should contain separator");
        assert_eq!(prefix, "DOC");
        assert_eq!(hex.len(), 10);
        assert!(hex
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));

        let ids = (0..1000)
            .map(|_| generate_unique_id("DOC"))
            .collect::<HashSet<_>>();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn isbn_shapes() {
        assert!(validate_isbn("9780306406157").expect("valid input"));
        assert!(validate_isbn("0-306-40615-2").expect("valid input"));
        assert!(validate_isbn("030640615X").expect("check char is not validated"));
        assert!(!validate_isbn("abc123").expect("valid input"));
        assert!(!validate_isbn("123").expect("valid input"));
        assert_eq!(validate_isbn("").unwrap_err(), FieldError::EmptyIsbn);
    }

    #[test]
    fn title_case_matches_word_runs() {
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("MCDONALD"), "Mcdonald");
    }

    #[test]
    fn format_date_uses_iso_calendar_form() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).expect("valid date");
        assert_eq!(format_date(date), "2024-03-07");
    }
}
