use crate::ParseError;

/// Plain text pulled out of a PDF, with per-page end offsets so callers
/// can map a character position back to a page.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub page_count: usize,
    /// Cumulative character offset where each page ends
    pub page_boundaries: Vec<usize>,
}

impl ExtractedDocument {
    /// Page (1-indexed) containing the given character offset.
    pub fn page_of(&self, offset: usize) -> usize {
        for (i, &end) in self.page_boundaries.iter().enumerate() {
            if offset < end {
                return i + 1;
            }
        }
        self.page_count.max(1)
    }
}

/// Extract the text of every page, in page order.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<ExtractedDocument, ParseError> {
    let doc = lopdf::Document::load_mem(pdf_bytes).map_err(|e| ParseError::Pdf(e.to_string()))?;

    let mut pages: Vec<u32> = doc.get_pages().keys().cloned().collect();
    pages.sort();
    let page_count = pages.len();

    let mut text = String::new();
    let mut page_boundaries = Vec::with_capacity(page_count);

    for page in &pages {
        let page_text = doc.extract_text(&[*page]).unwrap_or_default();
        text.push_str(&page_text);
        if !page_text.is_empty() && !page_text.ends_with('\n') {
            text.push('\n');
        }
        page_boundaries.push(text.len());
    }

    tracing::debug!(
        "Extracted {} chars from {} pages",
        text.len(),
        page_count
    );

    Ok(ExtractedDocument {
        text,
        page_count,
        page_boundaries,
    })
}
