//! Word-processor output via `docx-rs`.
//!
//! Layout: one document title heading, then per section a bold heading run
//! and one paragraph per non-empty body line at a fixed readable size.
//! Heading emphasis is done with bold/size runs rather than named styles so
//! the document renders identically without a styles part.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};

use super::{split_sections, RenderError};

// Run sizes are half-points: 22 = 11 pt body, the usual contract body size.
const TITLE_SIZE: usize = 32;
const HEADING_SIZE: usize = 28;
const BODY_SIZE: usize = 22;

pub fn render_docx(content: &str) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new().add_paragraph(
        Paragraph::new().add_run(
            Run::new()
                .add_text("Statement of Work for [Project Title]")
                .bold()
                .size(TITLE_SIZE),
        ),
    );

    for section in split_sections(content) {
        docx = docx.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(section.title).bold().size(HEADING_SIZE)),
        );

        for line in section.body.split('\n') {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            docx = docx
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text(line).size(BODY_SIZE)));
        }
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| RenderError::Docx(e.to_string()))?;

    Ok(buffer.into_inner())
}
