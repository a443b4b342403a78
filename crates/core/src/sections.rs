//! Serializer/deserializer pair for list-valued résumé sections.
//!
//! The backend stores each repeatable section (experience, education,
//! skills, languages, projects, certifications) as a JSON text blob in a
//! single column. This module is the only place that conversion happens:
//! structured entries go out as a JSON array string, and incoming blobs are
//! parsed back with a defined fallback on malformed input.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encode section entries to the JSON array string the backend expects.
///
/// Serialization of plain data structs cannot fail in practice; if it ever
/// does, the section degrades to an empty list rather than aborting the
/// whole submission.
#[must_use]
pub fn encode_entries<T: Serialize>(entries: &[T]) -> String {
    serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_owned())
}

/// Decode a section blob into structured entries.
///
/// Fallback behavior: a blob that is empty, whitespace, or not a valid JSON
/// array of `T` yields a single blank template entry instead of an error.
/// The editor always has something to render, and a corrupt section never
/// blocks loading the résumé.
#[must_use]
pub fn decode_entries<T: DeserializeOwned + Default>(blob: &str) -> Vec<T> {
    if blob.trim().is_empty() {
        return vec![T::default()];
    }

    match serde_json::from_str::<Vec<T>>(blob) {
        Ok(entries) if !entries.is_empty() => entries,
        Ok(_) => vec![T::default()],
        Err(_) => vec![T::default()],
    }
}

/// Append a blank entry to a section.
pub fn add_entry<T: Default>(entries: &mut Vec<T>) {
    entries.push(T::default());
}

/// Remove the entry at `index`, keeping at least one entry in the section.
///
/// Returns `true` if an entry was removed. Removal of the last remaining
/// entry (or an out-of-range index) is a no-op.
pub fn remove_entry<T>(entries: &mut Vec<T>, index: usize) -> bool {
    if entries.len() <= 1 || index >= entries.len() {
        return false;
    }
    entries.remove(index);
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resume::{EducationEntry, ExperienceEntry, LanguageEntry};

    #[test]
    fn test_roundtrip_experience() {
        let entries = vec![
            ExperienceEntry {
                title: "Backend Engineer".to_owned(),
                company: "Acme".to_owned(),
                location: "Berlin".to_owned(),
                start_date: "2021-03".to_owned(),
                end_date: "2024-06".to_owned(),
                description: "Built the billing pipeline.".to_owned(),
            },
            ExperienceEntry {
                title: "Intern".to_owned(),
                company: "Initech".to_owned(),
                ..ExperienceEntry::default()
            },
        ];

        let blob = encode_entries(&entries);
        let decoded: Vec<ExperienceEntry> = decode_entries(&blob);
        assert_eq!(decoded, entries);
    }

    #[test]
    fn test_roundtrip_skills() {
        let skills = vec!["Rust".to_owned(), "SQL".to_owned()];
        let blob = encode_entries(&skills);
        assert_eq!(blob, r#"["Rust","SQL"]"#);
        let decoded: Vec<String> = decode_entries(&blob);
        assert_eq!(decoded, skills);
    }

    #[test]
    fn test_roundtrip_languages() {
        let langs = vec![LanguageEntry {
            name: "French".to_owned(),
            proficiency: "B2".to_owned(),
        }];
        let decoded: Vec<LanguageEntry> = decode_entries(&encode_entries(&langs));
        assert_eq!(decoded, langs);
    }

    #[test]
    fn test_decode_empty_blob_falls_back_to_blank() {
        let decoded: Vec<EducationEntry> = decode_entries("");
        assert_eq!(decoded, vec![EducationEntry::default()]);

        let decoded: Vec<EducationEntry> = decode_entries("   ");
        assert_eq!(decoded, vec![EducationEntry::default()]);
    }

    #[test]
    fn test_decode_malformed_blob_falls_back_to_blank() {
        let decoded: Vec<ExperienceEntry> = decode_entries("not json at all");
        assert_eq!(decoded, vec![ExperienceEntry::default()]);

        // Valid JSON, wrong shape.
        let decoded: Vec<ExperienceEntry> = decode_entries(r#"{"title":"x"}"#);
        assert_eq!(decoded, vec![ExperienceEntry::default()]);
    }

    #[test]
    fn test_decode_empty_array_yields_blank_entry() {
        let decoded: Vec<LanguageEntry> = decode_entries("[]");
        assert_eq!(decoded, vec![LanguageEntry::default()]);
    }

    #[test]
    fn test_remove_entry_keeps_minimum_of_one() {
        let mut entries = vec!["a".to_owned()];
        assert!(!remove_entry(&mut entries, 0));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_remove_entry_out_of_range_is_noop() {
        let mut entries = vec!["a".to_owned(), "b".to_owned()];
        assert!(!remove_entry(&mut entries, 5));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_remove_entry_removes_at_index() {
        let mut entries = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
        assert!(remove_entry(&mut entries, 1));
        assert_eq!(entries, vec!["a".to_owned(), "c".to_owned()]);
    }

    #[test]
    fn test_add_entry_appends_blank() {
        let mut entries = vec![LanguageEntry {
            name: "German".to_owned(),
            proficiency: "C1".to_owned(),
        }];
        add_entry(&mut entries);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], LanguageEntry::default());
    }
}
