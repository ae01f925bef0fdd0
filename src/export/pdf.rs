//! Single-page A4 PDF container around a raster image.
//!
//! The image is re-encoded as JPEG and embedded with `/DCTDecode`, placed in
//! the 190 x 277 mm content box 10 mm from the page edges.

use image::DynamicImage;
use thiserror::Error;

use crate::render::PageGeometry;

const JPEG_QUALITY: u8 = 92;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("unsupported raster image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to encode page image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("raster image has no pixels")]
    Empty,
}

fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}

/// Wrap a PNG (or any format `image` can read) into an A4 PDF.
pub fn package_a4(raster: &[u8]) -> Result<Vec<u8>, PdfError> {
    let decoded = image::load_from_memory(raster).map_err(PdfError::Decode)?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(PdfError::Empty);
    }

    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    let mut jpeg = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    rgb.write_with_encoder(encoder).map_err(PdfError::Encode)?;

    Ok(write_pdf(&jpeg, rgb.width(), rgb.height()))
}

/// Sniff whether `data` is a PDF document.
pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF")
}

fn write_pdf(jpeg: &[u8], width: u32, height: u32) -> Vec<u8> {
    let page_w = mm_to_pt(PageGeometry::PAGE_WIDTH_MM);
    let page_h = mm_to_pt(PageGeometry::PAGE_HEIGHT_MM);
    let margin = mm_to_pt(PageGeometry::MARGIN_MM);
    let box_w = mm_to_pt(PageGeometry::CONTENT_WIDTH_MM);
    let box_h = mm_to_pt(PageGeometry::CONTENT_HEIGHT_MM);
    // PDF origin is bottom-left.
    let y = page_h - margin - box_h;

    let content = format!(
        "q\n{box_w:.2} 0 0 {box_h:.2} {margin:.2} {y:.2} cm\n/Im0 Do\nQ\n"
    );

    let mut out: Vec<u8> = Vec::with_capacity(jpeg.len() + 1024);
    let mut offsets = Vec::with_capacity(5);
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    offsets.push(out.len());
    out.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    offsets.push(out.len());
    out.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");

    offsets.push(out.len());
    out.extend_from_slice(
        format!(
            "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {page_w:.2} {page_h:.2}] \
             /Resources << /XObject << /Im0 4 0 R >> >> /Contents 5 0 R >>\nendobj\n"
        )
        .as_bytes(),
    );

    offsets.push(out.len());
    out.extend_from_slice(
        format!(
            "4 0 obj\n<< /Type /XObject /Subtype /Image /Width {width} /Height {height} \
             /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode /Length {} >>\nstream\n",
            jpeg.len()
        )
        .as_bytes(),
    );
    out.extend_from_slice(jpeg);
    out.extend_from_slice(b"\nendstream\nendobj\n");

    offsets.push(out.len());
    out.extend_from_slice(
        format!(
            "5 0 obj\n<< /Length {} >>\nstream\n{content}endstream\nendobj\n",
            content.len()
        )
        .as_bytes(),
    );

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n",
            offsets.len() + 1
        )
        .as_bytes(),
    );
    out
}
