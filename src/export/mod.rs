//! PDF export: page tree -> raster -> A4 PDF -> saved file.
//!
//! Nothing is written until every earlier stage has succeeded.

pub mod delivery;
pub mod filename;
pub mod pdf;
pub mod raster;

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub use delivery::{Delivery, DirectoryDelivery};
pub use filename::{filename_for, offer_letter_filename, salary_slip_filename};
pub use pdf::{package_a4, PdfError};
pub use raster::{RasterError, Rasterizer, TypstRasterizer};

use crate::config::PortalConfig;
use crate::render::{DocumentData, DocumentRenderer, VisualTree};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to render document: {0}")]
    Raster(#[from] RasterError),
    #[error("Failed to build PDF: {0}")]
    Pdf(#[from] PdfError),
    #[error("Failed to save PDF: {0}")]
    Delivery(#[source] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub filename: String,
    pub path: PathBuf,
}

#[derive(Clone)]
pub struct ExportPipeline {
    renderer: DocumentRenderer,
    rasterizer: Arc<dyn Rasterizer>,
    delivery: Arc<dyn Delivery>,
}

impl ExportPipeline {
    pub fn new(
        renderer: DocumentRenderer,
        rasterizer: Arc<dyn Rasterizer>,
        delivery: Arc<dyn Delivery>,
    ) -> Self {
        Self {
            renderer,
            rasterizer,
            delivery,
        }
    }

    /// Typst rasterizer and directory delivery as configured.
    pub fn from_config(config: &PortalConfig) -> Self {
        Self::new(
            DocumentRenderer::new(config.company_name.clone(), config.logo_path.clone()),
            Arc::new(TypstRasterizer::new(config.typst_bin.clone())),
            Arc::new(DirectoryDelivery::new(config.download_dir.clone())),
        )
    }

    pub fn renderer(&self) -> &DocumentRenderer {
        &self.renderer
    }

    /// Render the record and save it under its conventional filename.
    pub async fn download(&self, document: &DocumentData) -> Result<ExportedDocument, ExportError> {
        let tree = self.renderer.render(document);
        self.export(&tree, &filename_for(document)).await
    }

    pub async fn export(
        &self,
        tree: &VisualTree,
        filename: &str,
    ) -> Result<ExportedDocument, ExportError> {
        log::info!("Exporting {}", filename);

        let raster = self
            .rasterizer
            .rasterize(tree)
            .await
            .inspect_err(|e| log::error!("Rasterizing {} failed: {}", filename, e))?;
        let pdf = package_a4(&raster)
            .inspect_err(|e| log::error!("Packaging {} failed: {}", filename, e))?;
        let path = self
            .delivery
            .deliver(filename, &pdf)
            .map_err(ExportError::Delivery)?;

        Ok(ExportedDocument {
            filename: filename.to_string(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::{DynamicImage, ImageFormat};
    use parking_lot::Mutex;
    use rust_decimal::Decimal;
    use std::io::Cursor;

    struct BlankPage;

    #[async_trait]
    impl Rasterizer for BlankPage {
        async fn rasterize(&self, _tree: &VisualTree) -> Result<Vec<u8>, RasterError> {
            let mut out = Vec::new();
            DynamicImage::new_rgb8(19, 27)
                .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
                .unwrap();
            Ok(out)
        }
    }

    struct Broken;

    #[async_trait]
    impl Rasterizer for Broken {
        async fn rasterize(&self, _tree: &VisualTree) -> Result<Vec<u8>, RasterError> {
            Err(RasterError::Empty)
        }
    }

    struct Garbage;

    #[async_trait]
    impl Rasterizer for Garbage {
        async fn rasterize(&self, _tree: &VisualTree) -> Result<Vec<u8>, RasterError> {
            Ok(b"not an image".to_vec())
        }
    }

    #[derive(Default)]
    struct Recorder {
        saved: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl Delivery for Recorder {
        fn deliver(&self, filename: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
            self.saved.lock().push((filename.to_string(), bytes.to_vec()));
            Ok(PathBuf::from(filename))
        }
    }

    fn slip() -> DocumentData {
        DocumentData::SalarySlip(crate::models::SalarySlip {
            id: None,
            employee_name: "Jane Doe".to_string(),
            employee_id: "E001".to_string(),
            designation: "Engineer".to_string(),
            department: "Engineering".to_string(),
            month: "March".to_string(),
            year: 2025,
            basic_salary: Decimal::from(50000),
            hra: Decimal::ZERO,
            allowances: Decimal::from(5000),
            deductions: Decimal::from(2000),
            net_salary: Decimal::from(53000),
        })
    }

    fn pipeline(rasterizer: Arc<dyn Rasterizer>, recorder: Arc<Recorder>) -> ExportPipeline {
        ExportPipeline::new(DocumentRenderer::new("PizeonFly", None), rasterizer, recorder)
    }

    #[tokio::test]
    async fn test_download_saves_pdf_under_conventional_name() {
        let recorder = Arc::new(Recorder::default());
        let exported = pipeline(Arc::new(BlankPage), recorder.clone())
            .download(&slip())
            .await
            .unwrap();

        assert_eq!(exported.filename, "Salary_Slip_Jane Doe_March_2025.pdf");
        let saved = recorder.saved.lock();
        assert_eq!(saved.len(), 1);
        assert!(pdf::is_pdf(&saved[0].1));
    }

    #[tokio::test]
    async fn test_raster_failure_saves_nothing() {
        let recorder = Arc::new(Recorder::default());
        let err = pipeline(Arc::new(Broken), recorder.clone())
            .download(&slip())
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Raster(_)));
        assert!(recorder.saved.lock().is_empty());
    }

    #[tokio::test]
    async fn test_packaging_failure_saves_nothing() {
        let recorder = Arc::new(Recorder::default());
        let err = pipeline(Arc::new(Garbage), recorder.clone())
            .download(&slip())
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Pdf(_)));
        assert!(recorder.saved.lock().is_empty());
    }
}
