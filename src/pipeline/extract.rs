//! Text extraction: pull raw text out of an uploaded document.
//!
//! Dispatch is purely on the (case-insensitive) file extension. Four
//! structured formats get real readers; everything else is decoded as UTF-8
//! with undecodable bytes dropped rather than failing — plain-text and
//! markdown proposals are common and a strict decode would reject them over
//! one stray byte.
//!
//! Reader failures are not caught here: an unreadable input means the whole
//! request cannot proceed, so the error propagates to the caller.

use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

// Drawing-ML text runs inside slide XML.
static RE_TEXT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<a:t>([^<]*)</a:t>").unwrap());

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("pdf: {0}")]
    Pdf(String),
    #[error("docx: {0}")]
    Docx(String),
    #[error("pptx: {0}")]
    Pptx(String),
    #[error("xlsx: {0}")]
    Xlsx(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Extract raw text from `path`, dispatching on its extension.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    debug!("Extracting text from {} ({})", path.display(), ext);

    match ext.as_str() {
        "pdf" => extract_pdf(path),
        "docx" => extract_docx(path),
        "pptx" => extract_pptx(path),
        "xlsx" => extract_xlsx(path),
        _ => {
            let bytes = std::fs::read(path)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// Per-page text concatenation; pages without extractable text contribute
/// nothing and never fail the document.
fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Paragraph texts in document order, newline-joined.
fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let bytes = std::fs::read(path)?;
    let docx = docx_rs::read_docx(&bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in docx.document.children.iter() {
        if let DocumentChild::Paragraph(para) = child {
            let text: String = para
                .children
                .iter()
                .filter_map(|pc| {
                    if let ParagraphChild::Run(run) = pc {
                        Some(
                            run.children
                                .iter()
                                .filter_map(|rc| {
                                    if let RunChild::Text(t) = rc {
                                        Some(t.text.clone())
                                    } else {
                                        None
                                    }
                                })
                                .collect::<Vec<_>>()
                                .join(""),
                        )
                    } else {
                        None
                    }
                })
                .collect::<Vec<_>>()
                .join("");
            paragraphs.push(text);
        }
    }

    Ok(paragraphs.join("\n"))
}

/// All text runs across all slides, in slide order.
fn extract_pptx(path: &Path) -> Result<String, ExtractError> {
    let file = std::fs::File::open(path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| ExtractError::Pptx(e.to_string()))?;

    // ppt/slides/slide12.xml sorts after slide2.xml lexically; order by the
    // numeric index instead.
    let mut slide_names: Vec<String> = archive
        .file_names()
        .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
        .map(String::from)
        .collect();
    slide_names.sort_by_key(|n| slide_index(n));

    let mut lines: Vec<String> = Vec::new();
    for name in &slide_names {
        let mut xml = String::new();
        archive
            .by_name(name)
            .map_err(|e| ExtractError::Pptx(e.to_string()))?
            .read_to_string(&mut xml)?;

        for caps in RE_TEXT_RUN.captures_iter(&xml) {
            lines.push(unescape_xml(&caps[1]));
        }
    }

    Ok(lines.join("\n"))
}

fn slide_index(name: &str) -> usize {
    name.trim_start_matches("ppt/slides/slide")
        .trim_end_matches(".xml")
        .parse()
        .unwrap_or(usize::MAX)
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// One whitespace-aligned textual table per sheet, sheets separated by a
/// blank line.
fn extract_xlsx(path: &Path) -> Result<String, ExtractError> {
    use calamine::{open_workbook, Data, Reader, Xlsx};

    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| ExtractError::Xlsx(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_owned();
    let mut tables: Vec<String> = Vec::new();

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| ExtractError::Xlsx(e.to_string()))?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Data::Empty => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect();

        tables.push(align_table(&rows));
    }

    Ok(tables.join("\n\n"))
}

/// Pad every column to its widest cell so the table reads as columns in
/// plain text.
fn align_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let line = row
                .iter()
                .enumerate()
                .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
                .collect::<Vec<_>>()
                .join("  ");
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
