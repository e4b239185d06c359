use crate::error::IndexBuildError;
use lopdf::Document;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PageText {
    /// 1-based, as reported by the PDF page tree.
    pub number: u32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ExtractedPdf {
    pub page_count: usize,
    pub pages: Vec<PageText>,
}

pub trait PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<ExtractedPdf, IndexBuildError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl PdfExtractor for LopdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<ExtractedPdf, IndexBuildError> {
        if !path.is_file() {
            return Err(IndexBuildError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )));
        }

        let document =
            Document::load(path).map_err(|error| IndexBuildError::PdfParse(error.to_string()))?;

        let page_numbers = document.get_pages().into_keys().collect::<Vec<_>>();
        let mut pages = Vec::new();
        for page_no in &page_numbers {
            let text = document
                .extract_text(&[*page_no])
                .map_err(|error| IndexBuildError::PdfParse(error.to_string()))?;

            if !text.trim().is_empty() {
                pages.push(PageText {
                    number: *page_no,
                    text,
                });
            }
        }

        if pages.is_empty() {
            return Err(IndexBuildError::NoText(path.display().to_string()));
        }

        Ok(ExtractedPdf {
            page_count: page_numbers.len(),
            pages,
        })
    }
}

pub fn extract_page_texts(path: &Path) -> Result<ExtractedPdf, IndexBuildError> {
    LopdfExtractor.extract_pages(path)
}
