// src/cli/output.rs
use crate::constants::BODY_PREVIEW_CHARS;
use crate::domain::Note;
use crate::util::text::preview;

/// Tab-separated `id`, title and body preview, one note per line
pub fn format_notes(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes".to_string();
    }
    notes
        .iter()
        .map(|note| format!("{}\t{}\t{}", note.id, note.title, preview(&note.body, BODY_PREVIEW_CHARS)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::note;

    #[test]
    fn given_no_notes_when_formatting_then_says_so() {
        assert_eq!(format_notes(&[]), "No notes");
    }

    #[test]
    fn given_notes_when_formatting_then_prints_one_line_each_in_order() {
        let notes = vec![note("1", "A", "first\nsecond"), note("2", "B", "")];

        assert_eq!(format_notes(&notes), "1\tA\tfirst\n2\tB\t");
    }
}
