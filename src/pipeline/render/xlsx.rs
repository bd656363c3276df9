//! Spreadsheet output via `rust_xlsxwriter`.
//!
//! A best-effort tabular dump: every line of the composed document becomes a
//! two-column row, split on the first `": "` occurrence. Lines without the
//! delimiter land whole in the Section column with an empty Content cell.
//! The split is heuristic and intentionally not smarter than that — body
//! lines containing a colon (URLs, times) split where the first `": "` lands.

use rust_xlsxwriter::Workbook;

use super::RenderError;

/// Split one composed-document line into a (Section, Content) row.
pub(crate) fn split_row(line: &str) -> (&str, &str) {
    match line.split_once(": ") {
        Some((section, content)) => (section, content),
        None => (line, ""),
    }
}

pub fn render_xlsx(content: &str) -> Result<Vec<u8>, RenderError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet
        .write_string(0, 0, "Section")
        .and_then(|ws| ws.write_string(0, 1, "Content"))
        .map_err(|e| RenderError::Xlsx(e.to_string()))?;

    for (i, line) in content.split('\n').enumerate() {
        let (section, cell) = split_row(line);
        let row = (i + 1) as u32;
        worksheet
            .write_string(row, 0, section)
            .and_then(|ws| ws.write_string(row, 1, cell))
            .map_err(|e| RenderError::Xlsx(e.to_string()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| RenderError::Xlsx(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_space_splits_once() {
        assert_eq!(split_row("Cost: $10,000"), ("Cost", "$10,000"));
        assert_eq!(
            split_row("Start: 9:00 on day one"),
            ("Start", "9:00 on day one")
        );
    }

    #[test]
    fn plain_line_gets_empty_content() {
        assert_eq!(split_row("General notes"), ("General notes", ""));
        assert_eq!(split_row(""), ("", ""));
    }

    #[test]
    fn colon_without_space_does_not_split() {
        assert_eq!(split_row("http://example.com"), ("http", "//example.com"));
        assert_eq!(split_row("a:b"), ("a:b", ""));
    }

    #[test]
    fn workbook_bytes_are_a_zip_package() {
        let bytes = render_xlsx("Cost: $10,000\nGeneral notes").unwrap();
        // XLSX is a zip container; PK magic is enough of a smoke check here —
        // the integration suite reads the rows back with calamine.
        assert_eq!(&bytes[..2], b"PK");
    }
}
