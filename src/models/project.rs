//! Section model and project content predicates.
//!
//! A section is a title/description/image triple where every field is
//! optional. The same "empty" predicate drives both write-side
//! filtering (empty sections are never persisted) and read-side
//! content checks (a project of empty parts renders as "no content").

use serde::{Deserialize, Serialize};

/// Title shown when neither the project nor any section provides one.
pub const UNTITLED_PLACEHOLDER: &str = "Untitled project";

/// One content block of a project. Sections are embedded by value and
/// ordered; they have no id of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Section {
    /// A section is empty when all three fields are absent or blank.
    /// Blank means whitespace-only.
    pub fn is_empty(&self) -> bool {
        !is_present(&self.title) && !is_present(&self.description) && !is_present(&self.image_url)
    }
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Drop fully-empty sections, preserving order of the rest.
pub fn filter_empty_sections(sections: Vec<Section>) -> Vec<Section> {
    sections.into_iter().filter(|s| !s.is_empty()).collect()
}

/// True when the project has a non-blank title or any non-empty section.
pub fn has_content(title: &str, sections: &[Section]) -> bool {
    !title.trim().is_empty() || sections.iter().any(|s| !s.is_empty())
}

/// Title to render: the project title, else the first section's title
/// if non-blank, else a fixed placeholder. Only the first section is
/// consulted; a titled section further down does not promote itself.
pub fn display_title(title: &str, sections: &[Section]) -> String {
    if !title.trim().is_empty() {
        return title.to_string();
    }

    sections
        .first()
        .and_then(|s| s.title.as_deref())
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNTITLED_PLACEHOLDER.to_string())
}

/// URL of the first section carrying an image, if any.
pub fn first_image(sections: &[Section]) -> Option<String> {
    sections.iter().find_map(|s| {
        s.image_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: Option<&str>, description: Option<&str>, image_url: Option<&str>) -> Section {
        Section {
            title: title.map(String::from),
            description: description.map(String::from),
            image_url: image_url.map(String::from),
        }
    }

    #[test]
    fn test_section_empty_when_all_absent() {
        assert!(Section::default().is_empty());
    }

    #[test]
    fn test_section_empty_when_all_blank() {
        assert!(section(Some("  "), Some(""), Some("\t")).is_empty());
    }

    #[test]
    fn test_section_not_empty_with_any_field() {
        assert!(!section(Some("Title"), None, None).is_empty());
        assert!(!section(None, Some("Text"), None).is_empty());
        assert!(!section(None, None, Some("/media/x.jpg")).is_empty());
    }

    #[test]
    fn test_has_content_truth_table() {
        // blank title, no sections
        assert!(!has_content("", &[]));
        // blank title, only empty sections
        assert!(!has_content("  ", &[Section::default()]));
        // non-blank title alone suffices
        assert!(has_content("Bridge", &[]));
        // any non-empty section suffices
        assert!(has_content("", &[section(None, Some("Text"), None)]));
        assert!(has_content("", &[Section::default(), section(Some("A"), None, None)]));
    }

    #[test]
    fn test_display_title_fallback_chain() {
        // own title wins
        assert_eq!(display_title("Bridge", &[section(Some("Intro"), None, None)]), "Bridge");
        // falls back to first section title
        assert_eq!(display_title("", &[section(Some("Intro"), None, None)]), "Intro");
        // only the first section is consulted
        assert_eq!(
            display_title("  ", &[
                section(None, Some("Text only"), None),
                section(Some("Later"), None, None),
            ]),
            UNTITLED_PLACEHOLDER
        );
        // placeholder when nothing provides one
        assert_eq!(display_title("", &[]), UNTITLED_PLACEHOLDER);
        assert_eq!(display_title("", &[section(None, Some("Text"), None)]), UNTITLED_PLACEHOLDER);
        // blank first-section title does not count
        assert_eq!(
            display_title("", &[section(Some("  "), Some("Text"), None)]),
            UNTITLED_PLACEHOLDER
        );
    }

    #[test]
    fn test_filter_empty_sections() {
        let input = vec![
            Section::default(),
            section(Some("A"), None, None),
            Section::default(),
        ];
        let kept = filter_empty_sections(input);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title.as_deref(), Some("A"));
    }

    #[test]
    fn test_first_image() {
        assert_eq!(first_image(&[]), None);
        let sections = vec![
            section(Some("No image"), None, None),
            section(None, None, Some("/media/a.jpg")),
            section(None, None, Some("/media/b.jpg")),
        ];
        assert_eq!(first_image(&sections).as_deref(), Some("/media/a.jpg"));
    }

    #[test]
    fn test_section_roundtrips_with_absent_fields() {
        let json = r#"{"title":"A"}"#;
        let s: Section = serde_json::from_str(json).unwrap();
        assert_eq!(s.title.as_deref(), Some("A"));
        assert!(s.description.is_none());
        // absent fields stay absent on re-encode
        assert_eq!(serde_json::to_string(&s).unwrap(), json);
    }
}
