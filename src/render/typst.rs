//! Typst source for a page tree.

use std::fmt::Write;

use super::layout::{Body, Footer, Header, PageGeometry, SalaryRow, SalaryTable, VisualTree};

/// Escape special characters for Typst strings.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
}

/// A quoted Typst string literal.
fn lit(value: &str) -> String {
    format!("\"{}\"", escape_typst_string(value))
}

/// Lines joined with hard breaks, as markup.
fn lines(value: &str) -> String {
    value
        .lines()
        .map(|line| format!("#{}", lit(line)))
        .collect::<Vec<_>>()
        .join(" \\\n")
}

/// Render `tree` to Typst markup.
///
/// `logo_file` is the logo's path relative to the compilation root; when
/// `None` the company name is set as text instead.
pub fn to_typst_source(tree: &VisualTree, logo_file: Option<&str>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "#set page(width: {}mm, height: {}mm, margin: (x: 14mm, y: 12mm))",
        PageGeometry::CONTENT_WIDTH_MM,
        PageGeometry::CONTENT_HEIGHT_MM
    );
    out.push_str("#set text(size: 10.5pt)\n");
    out.push_str("#set par(justify: true)\n\n");

    write_header(&mut out, &tree.header, logo_file);

    let _ = writeln!(
        out,
        "#align(center, text(size: 18pt, weight: \"bold\", {}))\n#v(4mm)\n",
        lit(&tree.title)
    );

    for line in &tree.recipient {
        let _ = writeln!(out, "#text(weight: \"bold\", {}) \\", lit(line));
    }
    out.push_str("#v(6mm)\n\n");

    match &tree.body {
        Body::Text(paragraphs) => {
            for paragraph in paragraphs {
                let _ = writeln!(out, "{}\n", lines(paragraph));
            }
        }
        Body::Salary(table) => write_salary_table(&mut out, table),
    }

    write_footer(&mut out, &tree.footer);
    out
}

fn write_header(out: &mut String, header: &Header, logo_file: Option<&str>) {
    let brand = match logo_file {
        Some(path) => format!("image({}, height: 14mm)", lit(path)),
        None => format!("text(size: 16pt, weight: \"bold\", {})", lit(&header.company)),
    };
    let _ = writeln!(
        out,
        "#grid(columns: (1fr, auto), align: (left + horizon, right + horizon),\n  {},\n  text({}),\n)",
        brand,
        lit(&header.date)
    );
    out.push_str("#line(length: 100%, stroke: 0.6pt)\n#v(6mm)\n\n");
}

fn row_cells(rows: &[SalaryRow]) -> String {
    rows.iter()
        .map(|row| format!("  [#{}], [#{}],\n", lit(&row.label), lit(&row.amount)))
        .collect()
}

fn write_salary_table(out: &mut String, table: &SalaryTable) {
    out.push_str("#table(columns: (1fr, 2fr), stroke: 0.5pt + gray, inset: 6pt,\n");
    for (label, value) in &table.details {
        let _ = writeln!(out, "  [#strong({})], [#{}],", lit(label), lit(value));
    }
    out.push_str(")\n#v(6mm)\n\n");

    out.push_str("#table(columns: (1fr, auto), stroke: 0.5pt + gray, inset: 6pt,\n");
    out.push_str("  [#strong(\"Earnings\")], [#strong(\"Amount\")],\n");
    out.push_str(&row_cells(&table.earnings));
    let _ = writeln!(
        out,
        "  [#strong(\"Total Earnings\")], [#strong({})],",
        lit(&table.total_earnings)
    );
    out.push_str("  [#strong(\"Deductions\")], [#strong(\"Amount\")],\n");
    out.push_str(&row_cells(&table.deductions));
    let _ = writeln!(
        out,
        "  [#strong(\"Total Deductions\")], [#strong({})],",
        lit(&table.total_deductions)
    );
    out.push_str(")\n#v(6mm)\n\n");

    let _ = writeln!(
        out,
        "#align(right, text(size: 14pt, weight: \"bold\", \"Net Salary: \" + {}))\n",
        lit(&table.net_salary)
    );
}

fn write_footer(out: &mut String, footer: &Footer) {
    if let Some(signature) = &footer.signature {
        let _ = writeln!(
            out,
            "#v(12mm)\n#{}\n#v(14mm)\n#strong({}) \\\n#{}\n",
            lit(&signature.closing),
            lit(&signature.name),
            lit(&signature.title)
        );
    }
    if let Some(note) = &footer.note {
        let _ = writeln!(
            out,
            "#place(bottom + center, text(size: 8.5pt, fill: gray, {}))",
            lit(note)
        );
    }
}
