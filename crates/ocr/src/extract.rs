use std::sync::OnceLock;

use regex::Regex;

use crate::types::{Field, Gender, IdRecord};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Three 4-digit groups, optionally space-separated. The leading 2–9 mirrors
// the card numbering scheme and rejects misreads of other numeric fields.
re!(re_id_number, r"\b[2-9][0-9]{3}\s?[0-9]{4}\s?[0-9]{4}\b");

// Label in either script, then a Latin name, bounded by the next field's
// keyword, a newline, or end of text. OCR output has no reliable field
// delimiters; the boundary keyword set is an explicit enumeration and must
// stay one. The boundary is consumed by a non-capturing group (the regex
// crate has no lookahead), which is equivalent when only the first match's
// capture is taken.
re!(re_name,
    r"(?im)(?:Name|नाम)\s*[:।]?\s*([A-Za-z\s]+?)(?:\s*(?:DOB|Year|Birth|Father|Mother|पिता|माता|जन्म|Male|Female|पुरुष|महिला)|\n|$)");

// DD/MM/YYYY or DD-MM-YYYY anywhere in the text. Day/month ranges are not
// checked ("32-13-2090" passes); the source system never did either.
re!(re_dob, r"\b(\d{2}[/-]\d{2}[/-]\d{4})\b");

re!(re_gender, r"(?i)\b(Male|Female|Transgender|पुरुष|महिला|किन्नर)\b");

// ── Extraction rule table ────────────────────────────────────────────────────

/// One pattern-plus-transform unit responsible for recovering one field.
/// Rules are stateless and independent; per field, the first match in
/// reading order wins.
struct FieldRule {
    field: Field,
    pattern: fn() -> &'static Regex,
    /// Capture group carrying the value (0 = whole match).
    group: usize,
    transform: fn(&str) -> String,
}

impl FieldRule {
    fn first_match<'t>(&self, text: &'t str) -> Option<&'t str> {
        (self.pattern)()
            .captures(text)?
            .get(self.group)
            .map(|m| m.as_str())
    }
}

const RULES: [FieldRule; 4] = [
    FieldRule {
        field: Field::IdNumber,
        pattern: re_id_number,
        group: 0,
        transform: |raw| raw.replace(' ', ""),
    },
    FieldRule {
        field: Field::Name,
        pattern: re_name,
        group: 1,
        transform: |raw| raw.trim().to_string(),
    },
    FieldRule {
        field: Field::Dob,
        pattern: re_dob,
        group: 1,
        transform: |raw| raw.to_string(),
    },
    FieldRule {
        field: Field::Gender,
        pattern: re_gender,
        group: 1,
        transform: |raw| raw.to_string(),
    },
];

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Run every field rule against the full recognized text and collect the
    /// matches into an unvalidated record. A rule matching nothing leaves
    /// its field absent; that is the expected common case under OCR noise.
    pub fn extract(text: &str) -> IdRecord {
        let mut record = IdRecord::default();
        for rule in &RULES {
            let Some(raw) = rule.first_match(text) else {
                continue;
            };
            let value = (rule.transform)(raw);
            if value.is_empty() {
                continue;
            }
            match rule.field {
                Field::IdNumber => record.id_number = Some(value),
                Field::Name => record.name = Some(value),
                Field::Dob => record.dob = Some(value),
                Field::Gender => record.gender = Gender::from_token(&value),
            }
        }
        record
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
