//! PDF 文本提取服务 - 业务能力层
//!
//! 只负责"从一个本地 PDF 提取前 N 页文本"能力，不关心流程
//!
//! 使用 `lopdf` 逐页提取。提取是同步的 CPU 密集操作，
//! 调用方应放在 `spawn_blocking` 中执行。

use std::path::Path;

use lopdf::Document;
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::models::paper::ExtractedText;

/// PDF 文本提取服务
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 提取 PDF 前 `max_pages` 页的文本
    ///
    /// 逐页提取，页码从 1 开始。某一页提取不到文本（或页码超出
    /// 文档页数）时立即停止，返回已累积的文本——这是正常结果，
    /// 不是错误。只有文档本身无法打开才返回 `ExtractError`。
    pub fn extract_first_n_pages(
        &self,
        pdf_path: &Path,
        max_pages: u32,
    ) -> Result<ExtractedText, ExtractError> {
        info!("📖 正在提取 PDF 文本: {}", pdf_path.display());

        let document = Document::load(pdf_path).map_err(|source| ExtractError::Open {
            path: pdf_path.to_path_buf(),
            source,
        })?;
        let pages = document.get_pages();

        let mut parts: Vec<String> = Vec::new();

        for page_number in 1..=max_pages {
            if !pages.contains_key(&page_number) {
                debug!("第 {} 页超出文档页数，停止提取", page_number);
                break;
            }

            let page_text = match document.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    debug!("第 {} 页文本提取失败，停止提取: {}", page_number, e);
                    break;
                }
            };

            if page_text.trim().is_empty() {
                debug!("第 {} 页没有可用文本，停止提取", page_number);
                break;
            }

            parts.push(page_text);
        }

        let pages_consumed = parts.len() as u32;
        let text = parts.join("\n").trim().to_string();

        info!(
            "✓ 从前 {} 页提取到 {} 个字符: {}",
            pages_consumed,
            text.chars().count(),
            pdf_path.display()
        );

        Ok(ExtractedText {
            source_path: pdf_path.to_path_buf(),
            text,
            pages_consumed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use std::path::PathBuf;

    /// 构造一个多页 PDF，每页的文本由调用方给定；空字符串生成无文本的页
    fn build_pdf(dir: &Path, name: &str, page_texts: &[&str]) -> PathBuf {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let mut operations = Vec::new();
            if !text.is_empty() {
                operations.extend([
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![50.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]);
            }
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let path = dir.join(name);
        doc.save(&path).expect("save pdf");
        path
    }

    #[test]
    fn extracts_requested_pages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = build_pdf(dir.path(), "two_pages.pdf", &["Alpha page", "Beta page"]);

        let extracted = PdfExtractor::new()
            .extract_first_n_pages(&path, 2)
            .unwrap();

        assert_eq!(extracted.pages_consumed, 2);
        let alpha = extracted.text.find("Alpha").expect("first page text");
        let beta = extracted.text.find("Beta").expect("second page text");
        assert!(alpha < beta);
    }

    #[test]
    fn stops_at_first_empty_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = build_pdf(
            dir.path(),
            "gap.pdf",
            &["Alpha page", "", "Gamma page"],
        );

        let extracted = PdfExtractor::new()
            .extract_first_n_pages(&path, 3)
            .unwrap();

        assert_eq!(extracted.pages_consumed, 1);
        assert!(extracted.text.contains("Alpha"));
        assert!(!extracted.text.contains("Gamma"));
    }

    #[test]
    fn page_count_overrun_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = build_pdf(dir.path(), "short.pdf", &["Only page"]);

        let extracted = PdfExtractor::new()
            .extract_first_n_pages(&path, 5)
            .unwrap();

        assert_eq!(extracted.pages_consumed, 1);
        assert!(extracted.text.contains("Only"));
    }

    #[test]
    fn empty_document_text_is_a_valid_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = build_pdf(dir.path(), "blank.pdf", &[""]);

        let extracted = PdfExtractor::new()
            .extract_first_n_pages(&path, 2)
            .unwrap();

        assert_eq!(extracted.pages_consumed, 0);
        assert!(extracted.text.is_empty());
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.pdf");

        let result = PdfExtractor::new().extract_first_n_pages(&missing, 2);

        assert!(matches!(result, Err(ExtractError::Open { .. })));
    }
}
