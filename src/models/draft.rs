//! Draft-form model for the admin create and edit flows.
//!
//! Framework-neutral state for a project form: per-section upload
//! tracking and fixed progress checkpoints. Submission is gated on
//! every section upload being settled, so a URL can never be embedded
//! in a document write before the blob behind it is durable.

use serde::{Deserialize, Serialize};

use super::{filter_empty_sections, Section};

/// Progress checkpoints for the create flow (percent).
pub const CREATE_CHECKPOINTS: [u8; 3] = [50, 75, 100];

/// Progress checkpoints for the edit flow (percent).
pub const EDIT_CHECKPOINTS: [u8; 4] = [20, 60, 80, 100];

/// Upload lifecycle of one draft section's image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum UploadState {
    /// No image chosen, or the chosen image was cleared.
    #[default]
    Idle,
    /// Upload in flight; the section holds no usable URL yet.
    Uploading,
    /// Upload finished; the URL is durable and safe to persist.
    Done(String),
    /// Upload failed; the reason is surfaced to the form.
    Failed(String),
}

impl UploadState {
    /// Settled states allow submission: either there is nothing to
    /// wait for, or the URL is already durable.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Idle | Self::Done(_))
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Done(url) => Some(url),
            _ => None,
        }
    }
}

/// One section of a draft under edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSection {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: UploadState,
}

impl DraftSection {
    fn to_section(&self) -> Section {
        Section {
            title: non_blank(&self.title),
            description: non_blank(&self.description),
            image_url: self.image.url().map(str::to_string),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// A project draft: the form state behind both create and edit.
/// Always holds at least one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub title: String,
    pub sections: Vec<DraftSection>,
}

impl ProjectDraft {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            sections: vec![DraftSection::default()],
        }
    }

    /// Build a draft from persisted sections (edit flow). An empty
    /// project still yields one blank section to edit.
    pub fn from_sections(title: &str, sections: &[Section]) -> Self {
        let drafts: Vec<DraftSection> = sections
            .iter()
            .map(|s| DraftSection {
                title: s.title.clone().unwrap_or_default(),
                description: s.description.clone().unwrap_or_default(),
                image: s
                    .image_url
                    .clone()
                    .map(UploadState::Done)
                    .unwrap_or_default(),
            })
            .collect();

        Self {
            title: title.to_string(),
            sections: if drafts.is_empty() {
                vec![DraftSection::default()]
            } else {
                drafts
            },
        }
    }

    pub fn add_section(&mut self) {
        self.sections.push(DraftSection::default());
    }

    /// Remove a section by index. Refuses to drop the last one; the
    /// form always shows at least one section.
    pub fn remove_section(&mut self, index: usize) -> bool {
        if self.sections.len() <= 1 || index >= self.sections.len() {
            return false;
        }
        self.sections.remove(index);
        true
    }

    /// True when every section's upload is settled. A draft with an
    /// in-flight or failed upload cannot be submitted.
    pub fn can_submit(&self) -> bool {
        self.sections.iter().all(|s| s.image.is_settled())
    }

    /// Convert to persistable sections, dropping fully-empty ones.
    /// Same predicate the repository applies on write.
    pub fn into_payload(self) -> (String, Vec<Section>) {
        let sections = filter_empty_sections(
            self.sections.iter().map(DraftSection::to_section).collect(),
        );
        (self.title, sections)
    }
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self::new()
    }
}
