use crate::extraction::ExtractionError;

/// Extracts the text of every page and concatenates the pages in document order.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    Ok(pages.concat())
}
