//! Multi-format rendering: serialise the composed document into bytes.
//!
//! Every renderer is a pure function of the composed text, so all five are
//! unit-testable without a generation backend. They share one parsing
//! contract with the assembler: sections are delimited by the `"### "`
//! marker, the first split segment (the document title line) precedes any
//! marker and is discarded by section-oriented renderers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SowError;

pub mod docx;
pub mod pdf;
pub mod pptx;
pub mod xlsx;

/// The five supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Txt,
    Docx,
    Pptx,
    Xlsx,
    Pdf,
}

impl OutputFormat {
    /// File extension used in storage keys.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Docx => "docx",
            OutputFormat::Pptx => "pptx",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = SowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Txt),
            "docx" => Ok(OutputFormat::Docx),
            "pptx" => Ok(OutputFormat::Pptx),
            "xlsx" => Ok(OutputFormat::Xlsx),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(SowError::UnknownFormat(other.to_string())),
        }
    }
}

/// Renderer-internal failures; wrapped into [`SowError::Render`] at the
/// dispatch boundary.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("docx: {0}")]
    Docx(String),
    #[error("pptx: {0}")]
    Pptx(String),
    #[error("xlsx: {0}")]
    Xlsx(String),
    #[error("pdf: {0}")]
    Pdf(String),
}

/// One parsed section of the composed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// Split the composed document back into sections.
///
/// The first split segment is the document title line and is dropped; each
/// remaining segment starts with the section title line, the rest is body.
pub fn split_sections(content: &str) -> Vec<Section<'_>> {
    content
        .split("### ")
        .skip(1)
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| match segment.split_once('\n') {
            Some((title, body)) => Section {
                title: title.trim(),
                body: body.trim(),
            },
            None => Section {
                title: segment.trim(),
                body: "",
            },
        })
        .collect()
}

/// Serialise `content` into the requested format.
pub fn render(content: &str, format: OutputFormat) -> Result<Vec<u8>, SowError> {
    let result = match format {
        OutputFormat::Txt => Ok(content.as_bytes().to_vec()),
        OutputFormat::Docx => docx::render_docx(content),
        OutputFormat::Pptx => pptx::render_pptx(content),
        OutputFormat::Xlsx => xlsx::render_xlsx(content),
        OutputFormat::Pdf => pdf::render_pdf(content),
    };

    result.map_err(|e| SowError::Render {
        format,
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPOSED: &str = "**Statement of Work for [Project Title]**\n\n\
### DURATION\n\nSix months.\n\n\
### TEAM & ROLES\n\nOne lead.\nTwo engineers.";

    #[test]
    fn txt_round_trips() {
        let bytes = render(COMPOSED, OutputFormat::Txt).unwrap();
        assert_eq!(std::str::from_utf8(&bytes).unwrap(), COMPOSED);
    }

    #[test]
    fn split_discards_title_line() {
        let sections = split_sections(COMPOSED);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "DURATION");
        assert_eq!(sections[0].body, "Six months.");
        assert_eq!(sections[1].title, "TEAM & ROLES");
        assert_eq!(sections[1].body, "One lead.\nTwo engineers.");
    }

    #[test]
    fn split_of_title_only_document_is_empty() {
        assert!(split_sections("**Statement of Work for [Project Title]**\n").is_empty());
    }

    #[test]
    fn format_parsing() {
        assert_eq!("pdf".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert_eq!("TXT".parse::<OutputFormat>().unwrap(), OutputFormat::Txt);
        assert!("odt".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn extension_matches_display() {
        for f in [
            OutputFormat::Txt,
            OutputFormat::Docx,
            OutputFormat::Pptx,
            OutputFormat::Xlsx,
            OutputFormat::Pdf,
        ] {
            assert_eq!(f.to_string(), f.extension());
        }
    }
}
