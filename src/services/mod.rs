pub mod arxiv_search;
pub mod markdown;
pub mod pdf_fetcher;
pub mod pdf_render;
pub mod pdf_text;
pub mod report;
pub mod summarizer;

pub use arxiv_search::{ArxivSearch, SortCriterion};
pub use markdown::MarkdownConverter;
pub use pdf_fetcher::PdfFetcher;
pub use pdf_render::PdfRenderer;
pub use pdf_text::PdfExtractor;
pub use report::ReportWriter;
pub use summarizer::Summarizer;
