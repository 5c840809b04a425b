//! Static fallback content used when generation fails, so the caller always
//! has something to display for study materials

use crate::material::{Flashcard, MaterialContent, NoteSection};

pub fn mock_summary(document_name: &str) -> MaterialContent {
    MaterialContent::Summary {
        text: format!(
            "This summary for \"{}\" could not be generated right now. \
             The document covers its main topics section by section; revisit \
             the original text and try generating again.",
            document_name
        ),
    }
}

pub fn mock_flashcards(document_name: &str) -> MaterialContent {
    MaterialContent::Flashcards {
        cards: vec![
            Flashcard {
                front: "What document is this deck based on?".to_string(),
                back: document_name.to_string(),
            },
            Flashcard {
                front: "Why is this a placeholder card?".to_string(),
                back: "Generation failed; regenerate the deck to replace it.".to_string(),
            },
        ],
    }
}

pub fn mock_notes(document_name: &str) -> MaterialContent {
    MaterialContent::Notes {
        sections: vec![NoteSection {
            heading: format!("Notes for {}", document_name),
            points: vec![
                "Automatic note generation failed for this document.".to_string(),
                "Try again, or review the uploaded text directly.".to_string(),
            ],
        }],
    }
}
