use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialKind {
    Summary,
    Flashcards,
    Notes,
}

impl MaterialKind {
    pub fn as_str(&self) -> &str {
        match self {
            MaterialKind::Summary => "summary",
            MaterialKind::Flashcards => "flashcards",
            MaterialKind::Notes => "notes",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "summary" => Some(MaterialKind::Summary),
            "flashcards" => Some(MaterialKind::Flashcards),
            "notes" => Some(MaterialKind::Notes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteSection {
    pub heading: String,
    pub points: Vec<String>,
}

/// Payload stored in the study_materials content column, variant by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaterialContent {
    Summary { text: String },
    Flashcards { cards: Vec<Flashcard> },
    Notes { sections: Vec<NoteSection> },
}

impl MaterialContent {
    pub fn kind(&self) -> MaterialKind {
        match self {
            MaterialContent::Summary { .. } => MaterialKind::Summary,
            MaterialContent::Flashcards { .. } => MaterialKind::Flashcards,
            MaterialContent::Notes { .. } => MaterialKind::Notes,
        }
    }
}
