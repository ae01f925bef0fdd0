//! Document renderer - records to a fixed-layout page tree.
//!
//! The tree is laid out on the printable content area of an A4 sheet
//! (190 x 277 mm) so that its raster maps onto the page without scaling.

pub mod layout;
pub mod typst;

pub use layout::{
    Body, DocumentData, DocumentRenderer, Footer, Header, PageGeometry, SalaryRow, SalaryTable,
    Signature, VisualTree,
};
