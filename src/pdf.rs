//! PDF text extraction

use lopdf::Document;

use crate::types::AppResult;

/// Extract the text of every page, in document order, joined with newlines.
///
/// A page with no recoverable text contributes an empty segment rather than
/// an error; a byte stream that does not parse as a PDF is an error.
pub fn extract_text(bytes: &[u8]) -> AppResult<String> {
    let doc = Document::load_mem(bytes)?;

    let pages: Vec<String> = doc
        .get_pages()
        .keys()
        .map(|&number| {
            doc.extract_text(&[number])
                // lopdf terminates each page with a newline of its own
                .map(|text| text.trim_end().to_string())
                .unwrap_or_default()
        })
        .collect();

    Ok(pages.join("\n"))
}
