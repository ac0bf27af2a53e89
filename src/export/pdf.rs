//! PDF export
//!
//! Encodes a `PagedDocument` as a PDF 1.4 file using the built-in
//! Helvetica font, so no font data is embedded. Layout works in
//! millimetres with y growing downward; PDF user space is points with y
//! growing upward, so every coordinate is scaled and flipped here.
//!
//! Output is plain ASCII: characters outside printable ASCII are written
//! as octal escapes of their WinAnsi code.

use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::config::PageGeometry;
use crate::error::{FinanceError, FinanceResult};
use crate::reports::{layout, Align, PageItem, PagedDocument, ReportDocument, Rgb};

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Fixed object numbers; pages follow as (page, contents) pairs
const CATALOG_OBJ: usize = 1;
const PAGES_OBJ: usize = 2;
const FONT_OBJ: usize = 3;
const INFO_OBJ: usize = 4;
const FIRST_PAGE_OBJ: usize = 5;

/// Helvetica advance widths for ' ' through '~', in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' to '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
    278, 278, 584, 584, 584, 556, 1015, // ':' to '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' to 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' to 'Z'
    278, 278, 278, 469, 556, 333, // '[' to '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' to 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' to 'z'
    334, 260, 334, 584, // '{' to '~'
];

/// Encode a report straight to PDF bytes
pub fn export_document(document: &ReportDocument, geometry: &PageGeometry) -> FinanceResult<Vec<u8>> {
    let paged = layout(document, geometry);
    encode_pdf(&paged, document.generated_at)
}

/// Encode laid-out pages as a PDF file
pub fn encode_pdf(document: &PagedDocument, created: DateTime<Local>) -> FinanceResult<Vec<u8>> {
    if document.pages.is_empty() {
        return Err(FinanceError::Export("document has no pages".into()));
    }
    check_finite(document)?;

    let width = document.width * PT_PER_MM;
    let height = document.height * PT_PER_MM;
    let page_count = document.pages.len();

    let mut pdf = PdfWriter::default();
    pdf.raw("%PDF-1.4\n")?;

    pdf.object(
        CATALOG_OBJ,
        &format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_OBJ),
    )?;

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", page_obj(i)))
        .collect();
    pdf.object(
        PAGES_OBJ,
        &format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        ),
    )?;

    pdf.object(
        FONT_OBJ,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    )?;

    pdf.object(
        INFO_OBJ,
        &format!(
            "<< /Title ({}) /Producer (fintrack {}) /CreationDate (D:{}) >>",
            escape_text(&document.title),
            env!("CARGO_PKG_VERSION"),
            created.format("%Y%m%d%H%M%S")
        ),
    )?;

    for (i, page) in document.pages.iter().enumerate() {
        pdf.object(
            page_obj(i),
            &format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
                PAGES_OBJ,
                num(width),
                num(height),
                FONT_OBJ,
                page_obj(i) + 1
            ),
        )?;

        let content = content_stream(&page.items, height)?;
        pdf.object(
            page_obj(i) + 1,
            &format!(
                "<< /Length {} >>\nstream\n{}endstream",
                content.len(),
                content
            ),
        )?;
    }

    let bytes = pdf.finish(INFO_OBJ)?;
    tracing::debug!(pages = page_count, bytes = bytes.len(), "encoded pdf");
    Ok(bytes)
}

fn page_obj(index: usize) -> usize {
    FIRST_PAGE_OBJ + index * 2
}

/// Accumulates objects and remembers their byte offsets for the xref table
#[derive(Default)]
struct PdfWriter {
    out: String,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn raw(&mut self, s: &str) -> FinanceResult<()> {
        self.out.write_str(s).map_err(fmt_err)
    }

    fn object(&mut self, number: usize, body: &str) -> FinanceResult<()> {
        self.offsets.push((number, self.out.len()));
        write!(self.out, "{} 0 obj\n{}\nendobj\n", number, body).map_err(fmt_err)
    }

    fn finish(mut self, info: usize) -> FinanceResult<Vec<u8>> {
        self.offsets.sort_unstable();
        let size = self.offsets.len() + 1;
        let xref_at = self.out.len();

        write!(self.out, "xref\n0 {}\n0000000000 65535 f \n", size).map_err(fmt_err)?;
        for (_, offset) in &self.offsets {
            write!(self.out, "{:010} 00000 n \n", offset).map_err(fmt_err)?;
        }
        write!(
            self.out,
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, CATALOG_OBJ, info, xref_at
        )
        .map_err(fmt_err)?;

        Ok(self.out.into_bytes())
    }
}

fn fmt_err(e: std::fmt::Error) -> FinanceError {
    FinanceError::Export(e.to_string())
}

fn content_stream(items: &[PageItem], page_height: f32) -> FinanceResult<String> {
    let mut out = String::new();

    for item in items {
        match item {
            PageItem::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                let bottom = page_height - (y + height) * PT_PER_MM;
                write!(
                    out,
                    "{} rg\n{} {} {} {} re\nf\n",
                    color(*fill),
                    num(x * PT_PER_MM),
                    num(bottom),
                    num(width * PT_PER_MM),
                    num(height * PT_PER_MM)
                )
                .map_err(fmt_err)?;
            }
            PageItem::Text {
                x,
                y,
                size,
                color: fill,
                align,
                text,
            } => {
                let mut left = x * PT_PER_MM;
                if *align == Align::Right {
                    left -= text_width(text, *size);
                }
                write!(
                    out,
                    "BT\n/F1 {} Tf\n{} rg\n{} {} Td\n({}) Tj\nET\n",
                    num(*size),
                    color(*fill),
                    num(left),
                    num(page_height - y * PT_PER_MM),
                    escape_text(text)
                )
                .map_err(fmt_err)?;
            }
        }
    }

    Ok(out)
}

fn check_finite(document: &PagedDocument) -> FinanceResult<()> {
    let bad = |v: f32| !v.is_finite();
    if bad(document.width) || bad(document.height) {
        return Err(FinanceError::Export("page size is not a finite number".into()));
    }

    for page in &document.pages {
        for item in &page.items {
            let non_finite = match item {
                PageItem::Text { x, y, size, .. } => bad(*x) || bad(*y) || bad(*size),
                PageItem::Rect {
                    x,
                    y,
                    width,
                    height,
                    ..
                } => bad(*x) || bad(*y) || bad(*width) || bad(*height),
            };
            if non_finite {
                return Err(FinanceError::Export(format!(
                    "non-finite coordinate on page {}",
                    page.number
                )));
            }
        }
    }
    Ok(())
}

fn num(v: f32) -> String {
    format!("{:.2}", v)
}

fn color(rgb: Rgb) -> String {
    let (r, g, b) = rgb.unit();
    format!("{:.3} {:.3} {:.3}", r, g, b)
}

/// WinAnsi code for a character; unmappable characters become '?'
fn win_ansi(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '\u{a0}'..='\u{ff}' => c as u8,
        _ => b'?',
    }
}

/// Escape text for a PDF string literal
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let code = win_ansi(c);
        match code {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(code as char);
            }
            0x20..=0x7e => out.push(code as char),
            _ => out.push_str(&format!("\\{:03o}", code)),
        }
    }
    out
}

fn glyph_width(code: u8) -> u16 {
    match code {
        0x20..=0x7e => HELVETICA_WIDTHS[usize::from(code - 0x20)],
        0x95 => 350,
        0x85 | 0x97 => 1000,
        _ => 556,
    }
}

/// Rendered width of `text` in points
fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(win_ansi(c)))).sum();
    units as f32 * size / 1000.0
}
