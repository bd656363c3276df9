//! Paginated-document output via `printpdf`.
//!
//! A simplistic fixed-width layout, not real text wrapping: lines are drawn
//! top-down at a fixed left margin, truncated to 90 characters, with a new
//! page whenever the vertical cursor passes the bottom margin. The layout
//! computation lives in [`paginate`] as a pure function so page breaks and
//! truncation are testable without decoding PDF bytes.

use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};

use super::RenderError;

// US-Letter geometry in points.
pub(crate) const PAGE_WIDTH_PT: f32 = 612.0;
pub(crate) const PAGE_HEIGHT_PT: f32 = 792.0;
pub(crate) const LEFT_MARGIN_PT: f32 = 50.0;
pub(crate) const BOTTOM_MARGIN_PT: f32 = 50.0;
pub(crate) const LINE_STEP_PT: f32 = 15.0;
pub(crate) const MAX_LINE_CHARS: usize = 90;
const FONT_SIZE: f32 = 11.0;

/// One line placed on a page, with its baseline height from the page bottom.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedLine {
    pub text: String,
    pub y_pt: f32,
}

/// Lay the document out into pages of placed lines.
///
/// The cursor starts one margin below the top edge, advances one line step
/// per line, and wraps to a fresh page after drawing a line that leaves the
/// cursor below the bottom margin.
pub(crate) fn paginate(content: &str) -> Vec<Vec<PlacedLine>> {
    let mut pages: Vec<Vec<PlacedLine>> = Vec::new();
    let mut current: Vec<PlacedLine> = Vec::new();
    let mut y = PAGE_HEIGHT_PT - 50.0;

    for line in content.split('\n') {
        current.push(PlacedLine {
            text: line.chars().take(MAX_LINE_CHARS).collect(),
            y_pt: y,
        });
        y -= LINE_STEP_PT;
        if y < BOTTOM_MARGIN_PT {
            pages.push(std::mem::take(&mut current));
            y = PAGE_HEIGHT_PT - 50.0;
        }
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

pub fn render_pdf(content: &str) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Statement of Work",
        Mm::from(Pt(PAGE_WIDTH_PT)),
        Mm::from(Pt(PAGE_HEIGHT_PT)),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for (page_idx, lines) in paginate(content).iter().enumerate() {
        let layer = if page_idx == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(
                Mm::from(Pt(PAGE_WIDTH_PT)),
                Mm::from(Pt(PAGE_HEIGHT_PT)),
                "Layer 1",
            );
            doc.get_page(page).get_layer(layer)
        };

        for placed in lines {
            layer.use_text(
                placed.text.clone(),
                FONT_SIZE,
                Mm::from(Pt(LEFT_MARGIN_PT)),
                Mm::from(Pt(placed.y_pt)),
                &font,
            );
        }
    }

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_lines_are_truncated_to_90_chars() {
        let long = "x".repeat(200);
        let pages = paginate(&long);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0][0].text.chars().count(), MAX_LINE_CHARS);
    }

    #[test]
    fn cursor_descends_by_line_step() {
        let pages = paginate("a\nb\nc");
        let lines = &pages[0];
        assert_eq!(lines[0].y_pt, PAGE_HEIGHT_PT - 50.0);
        assert_eq!(lines[1].y_pt, PAGE_HEIGHT_PT - 65.0);
        assert_eq!(lines[2].y_pt, PAGE_HEIGHT_PT - 80.0);
    }

    #[test]
    fn page_break_below_bottom_margin() {
        // Per page: start at 742, step 15, break once y < 50 — that is 47
        // lines (742 down to 52), so 60 lines must span two pages.
        let content = vec!["line"; 60].join("\n");
        let pages = paginate(&content);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 47);
        assert_eq!(pages[1].len(), 13);
        // Every baseline stays on the page.
        for page in &pages {
            for line in page {
                assert!(line.y_pt >= BOTTOM_MARGIN_PT, "baseline {}", line.y_pt);
            }
        }
    }

    #[test]
    fn pdf_bytes_have_magic_header() {
        let bytes = render_pdf("hello\nworld").unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");
    }
}
