use serde::{Deserialize, Serialize};

/// Upper bound on an uploaded card image, checked before any decoding.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Image formats the pipeline accepts from callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
}

impl MediaType {
    /// Parse a declared MIME type. `image/jpg` is tolerated alongside the
    /// registered `image/jpeg` since clients commonly send it.
    pub fn from_mime(mime: &str) -> Option<MediaType> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(MediaType::Jpeg),
            "image/png" => Some(MediaType::Png),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Jpeg => write!(f, "image/jpeg"),
            MediaType::Png => write!(f, "image/png"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Transgender,
}

impl Gender {
    /// Map a recognized gender token, English or Devanagari, to its
    /// canonical value. Total over the card vocabulary; anything outside it
    /// returns `None`. Feeding a canonical value back in is a no-op.
    pub fn from_token(token: &str) -> Option<Gender> {
        match token.trim().to_ascii_lowercase().as_str() {
            "male" | "पुरुष" => Some(Gender::Male),
            "female" | "महिला" => Some(Gender::Female),
            "transgender" | "किन्नर" => Some(Gender::Transgender),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Transgender => write!(f, "Transgender"),
        }
    }
}

/// The four fields the engine recovers from a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    IdNumber,
    Name,
    Dob,
    Gender,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::IdNumber => write!(f, "id_number"),
            Field::Name => write!(f, "name"),
            Field::Dob => write!(f, "dob"),
            Field::Gender => write!(f, "gender"),
        }
    }
}

/// Structured identity fields recovered from one card image. Every field is
/// optional; OCR noise routinely loses some of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdRecord {
    /// 12 decimal digits, first digit 2–9, separators stripped.
    pub id_number: Option<String>,
    /// Latin-script name as recognized. Devanagari-only names do not match
    /// the name pattern and are left absent.
    pub name: Option<String>,
    /// `DD/MM/YYYY` or `DD-MM-YYYY`, preserved exactly as matched.
    pub dob: Option<String>,
    pub gender: Option<Gender>,
}

impl IdRecord {
    /// An extraction succeeds only if at least one field survived.
    pub fn has_any_field(&self) -> bool {
        self.id_number.is_some()
            || self.name.is_some()
            || self.dob.is_some()
            || self.gender.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_accepts_jpeg_png_variants() {
        assert_eq!(MediaType::from_mime("image/jpeg"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_mime("image/jpg"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_mime("image/png"), Some(MediaType::Png));
        assert_eq!(MediaType::from_mime("IMAGE/PNG"), Some(MediaType::Png));
    }

    #[test]
    fn media_type_rejects_everything_else() {
        assert_eq!(MediaType::from_mime("image/gif"), None);
        assert_eq!(MediaType::from_mime("application/pdf"), None);
        assert_eq!(MediaType::from_mime(""), None);
    }

    #[test]
    fn gender_token_table_is_total() {
        let vocabulary = [
            ("Male", Gender::Male),
            ("Female", Gender::Female),
            ("Transgender", Gender::Transgender),
            ("पुरुष", Gender::Male),
            ("महिला", Gender::Female),
            ("किन्नर", Gender::Transgender),
        ];
        for (token, expected) in vocabulary {
            assert_eq!(Gender::from_token(token), Some(expected), "token {token}");
        }
        assert_eq!(Gender::from_token("Other"), None);
    }

    #[test]
    fn gender_normalization_is_idempotent() {
        for token in ["Male", "Female", "Transgender", "पुरुष", "महिला", "किन्नर"] {
            let once = Gender::from_token(token).unwrap();
            let twice = Gender::from_token(&once.to_string()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn gender_token_is_case_insensitive() {
        assert_eq!(Gender::from_token("FEMALE"), Some(Gender::Female));
        assert_eq!(Gender::from_token("male"), Some(Gender::Male));
    }

    #[test]
    fn record_success_criterion() {
        assert!(!IdRecord::default().has_any_field());
        let r = IdRecord { dob: Some("01/01/1990".into()), ..Default::default() };
        assert!(r.has_any_field());
    }

    #[test]
    fn record_serializes_absent_fields_as_null() {
        let json = serde_json::to_value(IdRecord::default()).unwrap();
        assert!(json["id_number"].is_null());
        assert!(json["gender"].is_null());
    }

    #[test]
    fn gender_serializes_as_canonical_word() {
        let r = IdRecord { gender: Some(Gender::Female), ..Default::default() };
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(json["gender"], "Female");
    }
}
