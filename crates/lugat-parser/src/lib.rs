pub mod extract;
pub mod wordlist;

pub use extract::{ExtractedDocument, extract_text};
pub use wordlist::{ParsedList, parse_pdf, parse_text};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Not a readable PDF: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
