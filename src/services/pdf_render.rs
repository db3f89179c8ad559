//! PDF 渲染服务 - 业务能力层
//!
//! 只负责"把一个 PDF 的每页渲染为 PNG 图片"能力，不关心流程
//!
//! ## 技术栈
//! - `pdfium-render` 绑定系统的 pdfium 库做栅格化
//! - `image` 保存 PNG
//!
//! pdfium 不是 async-safe 的，整个渲染过程是同步的，
//! 调用方应放在 `spawn_blocking` 中执行。

use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;
use tracing::info;

use crate::error::RenderError;

/// PDF 页面渲染服务
pub struct PdfRenderer {
    zoom: f32,
}

impl PdfRenderer {
    /// `zoom` 是页面渲染的放大倍数，2.0 约等于 144 DPI
    pub fn new(zoom: f32) -> Self {
        Self { zoom }
    }

    /// 把 PDF 的每一页渲染为 PNG，返回输出目录
    ///
    /// 输出目录是 PDF 同级的、以文件名（去扩展名）命名的文件夹，
    /// 图片命名为 `page_1.png`、`page_2.png` 等，页码从 1 开始。
    pub fn render_to_images(&self, pdf_path: &Path) -> Result<PathBuf, RenderError> {
        let output_dir = output_dir_for(pdf_path);
        std::fs::create_dir_all(&output_dir).map_err(|source| RenderError::Io {
            path: output_dir.clone(),
            source,
        })?;

        info!("🖼️ 开始渲染 PDF 页面: {}", pdf_path.display());

        let bindings = Pdfium::bind_to_system_library()
            .map_err(|e| RenderError::Pdfium(e.to_string()))?;
        let pdfium = Pdfium::new(bindings);

        let document = pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| RenderError::Pdfium(e.to_string()))?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(self.zoom);

        for (index, page) in document.pages().iter().enumerate() {
            let image_path = output_dir.join(format!("page_{}.png", index + 1));

            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|e| RenderError::Pdfium(e.to_string()))?;

            bitmap
                .as_image()
                .into_rgb8()
                .save_with_format(&image_path, image::ImageFormat::Png)
                .map_err(|source| RenderError::SaveImage {
                    path: image_path.clone(),
                    source,
                })?;

            info!("✓ 已保存第 {} 页: {}", index + 1, image_path.display());
        }

        info!("✓ PDF 渲染完成: {}", output_dir.display());
        Ok(output_dir)
    }
}

/// PDF 对应的图片输出目录：同级、以文件名（去扩展名）命名
fn output_dir_for(pdf_path: &Path) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pdf_pages".to_string());

    match pdf_path.parent() {
        Some(parent) => parent.join(stem),
        None => PathBuf::from(stem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dir_is_sibling_folder_named_after_stem() {
        let dir = output_dir_for(Path::new("data/quantum/pdfs/Some_Paper.pdf"));
        assert_eq!(dir, PathBuf::from("data/quantum/pdfs/Some_Paper"));
    }

    #[test]
    fn output_dir_without_parent_uses_stem_only() {
        let dir = output_dir_for(Path::new("Some_Paper.pdf"));
        assert_eq!(dir, PathBuf::from("Some_Paper"));
    }

    /// 依赖系统安装的 pdfium 动态库，默认跳过
    #[test]
    #[ignore]
    fn renders_real_pdf_pages() {
        use lopdf::{dictionary, Document, Object};

        let dir = tempfile::tempdir().unwrap();
        let pdf_path = dir.path().join("sample.pdf");

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(&pdf_path).unwrap();

        let output_dir = PdfRenderer::new(2.0).render_to_images(&pdf_path).unwrap();
        assert!(output_dir.join("page_1.png").exists());
    }
}
