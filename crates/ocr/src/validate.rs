use std::sync::OnceLock;

use regex::Regex;

use crate::types::{Field, IdRecord};

fn re_valid_id() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"^[2-9][0-9]{11}$").expect("invalid regex"))
}

/// Strip spaces from a candidate ID number and accept it only if exactly 12
/// digits remain with a leading 2–9. The extractor already enforces the
/// leading-digit rule, so re-checking here is redundant but lets the
/// validator stand on its own.
pub fn normalize_id_number(raw: &str) -> Option<String> {
    let stripped = raw.replace(' ', "");
    re_valid_id().is_match(&stripped).then_some(stripped)
}

/// Check and canonicalize each extracted field in isolation. Pure and
/// infallible: a field that fails validation is cleared to absent, logged,
/// and never surfaced as an invalid value. Name, dob, and gender carry no
/// format rules beyond what their extractors matched and pass through.
pub fn validate(mut record: IdRecord) -> IdRecord {
    if let Some(raw) = record.id_number.take() {
        match normalize_id_number(&raw) {
            Some(id) => record.id_number = Some(id),
            None => tracing::warn!(field = %Field::IdNumber, "invalid format, field cleared"),
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Gender;

    #[test]
    fn id_number_accepted_regardless_of_space_placement() {
        for raw in ["987654321098", "9876 5432 1098", "98 76 54 32 10 98", "9 87654321098"] {
            assert_eq!(
                normalize_id_number(raw).as_deref(),
                Some("987654321098"),
                "raw {raw:?}"
            );
        }
    }

    #[test]
    fn id_number_rejects_leading_zero_or_one() {
        assert_eq!(normalize_id_number("123456789012"), None);
        assert_eq!(normalize_id_number("1234 5678 9012"), None);
        assert_eq!(normalize_id_number("023456789012"), None);
    }

    #[test]
    fn id_number_rejects_wrong_length_after_stripping() {
        assert_eq!(normalize_id_number("98765432109"), None);
        assert_eq!(normalize_id_number("9876543210987"), None);
        assert_eq!(normalize_id_number(""), None);
    }

    #[test]
    fn id_number_rejects_non_digits() {
        assert_eq!(normalize_id_number("9876 5432 109A"), None);
        assert_eq!(normalize_id_number("9876-5432-1098"), None);
    }

    #[test]
    fn validate_clears_invalid_id_and_keeps_the_rest() {
        let record = IdRecord {
            id_number: Some("1234 5678 9012".into()),
            name: Some("Asha Kumar".into()),
            dob: Some("01/01/1990".into()),
            gender: Some(Gender::Female),
        };
        let out = validate(record);
        assert_eq!(out.id_number, None);
        assert_eq!(out.name.as_deref(), Some("Asha Kumar"));
        assert_eq!(out.dob.as_deref(), Some("01/01/1990"));
        assert_eq!(out.gender, Some(Gender::Female));
    }

    #[test]
    fn validate_normalizes_spaced_id() {
        let record = IdRecord {
            id_number: Some("9876 5432 1098".into()),
            ..Default::default()
        };
        assert_eq!(validate(record).id_number.as_deref(), Some("987654321098"));
    }

    #[test]
    fn validate_is_idempotent() {
        let record = IdRecord {
            id_number: Some("9876 5432 1098".into()),
            name: Some("Asha Kumar".into()),
            ..Default::default()
        };
        let once = validate(record);
        let twice = validate(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn validate_passes_empty_record_through() {
        assert_eq!(validate(IdRecord::default()), IdRecord::default());
    }
}
