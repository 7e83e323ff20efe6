use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::{
    error::SimilarityError,
    extract::{DocumentFormat, TextDecoder},
};

/// Decoder for `DocumentFormat::WordDocument`.
///
/// A .docx file is a ZIP archive holding `word/document.xml`; `docx-rs`
/// parses it into `Document -> Paragraph -> Run -> Text`.
/// Top-level paragraphs are emitted in document order, one line each.
/// Empty paragraphs still produce their (empty) line.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordDocumentDecoder;

impl TextDecoder for WordDocumentDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<String, SimilarityError> {
        let docx = read_docx(bytes).map_err(|e| SimilarityError::Parse {
            format: DocumentFormat::WordDocument,
            message: e.to_string(),
        })?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .collect();
        tracing::debug!(paragraphs = paragraphs.len(), "parsed word document");

        Ok(paragraphs.join("\n"))
    }
}

/// Runs of one paragraph are concatenated without separator;
/// tabs and line breaks inside a run are kept.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                match rc {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use docx_rs::{BreakType, Docx, Run, Table, TableCell, TableRow};

    use super::*;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).expect("pack docx");
        buf.into_inner()
    }

    #[test]
    fn paragraphs_are_joined_in_order() {
        let bytes = build_docx(&["first paragraph", "second paragraph"]);
        let text = WordDocumentDecoder.decode(&bytes).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec!["first paragraph", "second paragraph"]
        );
    }

    #[test]
    fn tabs_breaks_and_empty_paragraphs_are_kept_but_tables_are_not_read() {
        let cell = TableCell::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("tabular")));
        let docx = Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("first")))
            .add_paragraph(Paragraph::new())
            .add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text("before")
                        .add_tab()
                        .add_text("after")
                        .add_break(BreakType::TextWrapping)
                        .add_text("next"),
                ),
            )
            .add_table(Table::new(vec![TableRow::new(vec![cell])]))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("last")));
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).expect("pack docx");

        let text = WordDocumentDecoder.decode(&buf.into_inner()).unwrap();
        assert_eq!(text, "first\n\nbefore\tafter\nnext\nlast");
    }

    #[test]
    fn invalid_container_is_a_parse_error() {
        let res = WordDocumentDecoder.decode(b"this is not a zip archive");
        assert!(matches!(
            res,
            Err(SimilarityError::Parse { format: DocumentFormat::WordDocument, .. })
        ));
    }
}
