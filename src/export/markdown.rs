//! Markdown export for note batches.

use crate::notes::NoteRecord;

/// Render an ordered batch of notes as one Markdown document.
///
/// Per record: a heading with the filename, category and summary lines, then
/// the source text verbatim, with a horizontal rule between records.
/// Deterministic: the same input order produces byte-identical output.
pub fn render_markdown(notes: &[NoteRecord]) -> String {
    let mut doc = String::new();

    for note in notes {
        doc.push_str(&format!("# {}\n", note.filename));
        doc.push_str(&format!("**Category:** {}\n\n", note.category));
        doc.push_str(&format!("**Summary:** {}\n\n", note.summary));
        doc.push_str("**Source:**\n");
        doc.push_str(&note.source_text);
        doc.push_str("\n\n---\n");
    }

    doc
}
