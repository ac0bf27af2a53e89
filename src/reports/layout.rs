//! Page layout
//!
//! Assigns every line of a `ReportDocument` to a page and a position. A
//! vertical cursor starts at the top margin and advances per line; once it
//! passes the page-height threshold the next line starts a new page, and
//! if that line is a table row the table's header band is emitted again
//! first. Footers go on in a final pass, when the page count is known.

use serde::Serialize;

use crate::config::PageGeometry;
use crate::display::format::format_date_us;

use super::document::{
    BulletBlock, Column, ReportDocument, Rgb, Section, SummaryBlock, TableBlock, TitleBlock,
};

const TITLE_SIZE: f32 = 20.0;
const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;
const BULLET_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;

/// Gap between the period and "Generated on" lines
const SUBTITLE_GAP: f32 = 6.0;
/// Gap after the title block
const TITLE_BLOCK_GAP: f32 = 15.0;
/// Height of a table's filled header band
const HEADER_BAND: f32 = 8.0;
/// Header text baseline inside the band
const HEADER_BASELINE: f32 = 6.0;
/// Width of the header band
const TABLE_WIDTH: f32 = 170.0;
/// Right edge the page number is aligned to
const PAGE_NUMBER_X: f32 = 180.0;
/// Wrapped bullet text never exceeds this many characters per line
const BULLET_WRAP: usize = 100;
/// Advance between wrapped continuation lines
const WRAP_GAP: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Right,
}

/// Something placed on a page; `y` grows downward from the top edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PageItem {
    Text {
        x: f32,
        y: f32,
        size: f32,
        color: Rgb,
        align: Align,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgb,
    },
}

impl PageItem {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::Rect { .. } => None,
        }
    }
}

/// One laid-out page, items in reading order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutPage {
    /// 1-based
    pub number: usize,
    pub items: Vec<PageItem>,
}

impl LaidOutPage {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(PageItem::text)
    }
}

/// The page-indexed form of a report, ready for encoding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedDocument {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub pages: Vec<LaidOutPage>,
}

impl PagedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

struct Cursor<'g> {
    geometry: &'g PageGeometry,
    pages: Vec<LaidOutPage>,
    y: f32,
}

impl<'g> Cursor<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![LaidOutPage {
                number: 1,
                items: Vec::new(),
            }],
            y: geometry.top_margin,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(LaidOutPage {
            number: self.pages.len() + 1,
            items: Vec::new(),
        });
        self.y = self.geometry.top_margin;
    }

    /// Start a new page when the cursor is already past `limit`
    fn break_if_past(&mut self, limit: f32) -> bool {
        if self.y > limit {
            self.new_page();
            true
        } else {
            false
        }
    }

    fn place(&mut self, item: PageItem) {
        if let Some(page) = self.pages.last_mut() {
            page.items.push(item);
        }
    }

    fn text(&mut self, x: f32, size: f32, color: Rgb, text: impl Into<String>) {
        let y = self.y;
        self.place(PageItem::Text {
            x,
            y,
            size,
            color,
            align: Align::Left,
            text: text.into(),
        });
    }

    fn heading(&mut self, text: &str) {
        self.text(self.geometry.left_margin, HEADING_SIZE, Rgb::BLACK, text);
        self.y += self.geometry.title_height;
    }

    fn table_header(&mut self, columns: &[Column], fill: Rgb, size: f32) {
        let (x, y) = (self.geometry.left_margin, self.y);
        self.place(PageItem::Rect {
            x,
            y,
            width: TABLE_WIDTH,
            height: HEADER_BAND,
            fill,
        });
        for column in columns {
            self.place(PageItem::Text {
                x: column.x,
                y: y + HEADER_BASELINE,
                size,
                color: Rgb::WHITE,
                align: Align::Left,
                text: column.label.clone(),
            });
        }
        self.y += self.geometry.header_height;
    }
}

/// Lay out a document onto pages
pub fn layout(document: &ReportDocument, geometry: &PageGeometry) -> PagedDocument {
    let mut cursor = Cursor::new(geometry);

    for section in &document.sections {
        match section {
            Section::Title(title) => layout_title(&mut cursor, title, document),
            Section::Summary(summary) => layout_summary(&mut cursor, summary),
            Section::Table(table) => layout_table(&mut cursor, table),
            Section::Bullets(bullets) => layout_bullets(&mut cursor, bullets),
        }
    }

    let mut pages = cursor.pages;
    stamp_footers(&mut pages, document.kind.footer_label(), geometry);

    tracing::debug!(
        report = document.kind.title(),
        sections = document.sections.len(),
        pages = pages.len(),
        "laid out report"
    );

    PagedDocument {
        title: document.kind.title().to_string(),
        width: geometry.page_width,
        height: geometry.page_height,
        pages,
    }
}

fn layout_title(cursor: &mut Cursor<'_>, title: &TitleBlock, document: &ReportDocument) {
    let left = cursor.geometry.left_margin;
    cursor.text(left, TITLE_SIZE, title.color, title.title.as_str());
    cursor.y += cursor.geometry.title_height;
    cursor.text(left, BODY_SIZE, Rgb::GRAY, title.period.as_str());
    if title.show_generated {
        cursor.y += SUBTITLE_GAP;
        let generated = format!("Generated on: {}", format_date_us(document.generated_at.date_naive()));
        cursor.text(left, BODY_SIZE, Rgb::GRAY, generated);
    }
    cursor.y += TITLE_BLOCK_GAP;
}

fn layout_summary(cursor: &mut Cursor<'_>, summary: &SummaryBlock) {
    let geometry = cursor.geometry;
    cursor.break_if_past(geometry.page_height_threshold);
    cursor.heading(&summary.heading);

    for (label, value) in &summary.rows {
        cursor.break_if_past(geometry.page_height_threshold);
        cursor.text(geometry.left_margin, BODY_SIZE, Rgb::GRAY, label.as_str());
        cursor.text(summary.value_x, BODY_SIZE, value.color, value.text.as_str());
        cursor.y += geometry.row_height;
    }

    cursor.y += geometry.section_spacing;
}

fn layout_table(cursor: &mut Cursor<'_>, table: &TableBlock) {
    let geometry = cursor.geometry;
    cursor.break_if_past(table.break_after);
    cursor.heading(&table.heading);
    cursor.table_header(&table.columns, table.header_fill, table.font_size);

    for row in &table.rows {
        if cursor.break_if_past(geometry.page_height_threshold) {
            cursor.table_header(&table.columns, table.header_fill, table.font_size);
        }
        for (column, cell) in table.columns.iter().zip(row) {
            cursor.text(column.x, table.font_size, cell.color, cell.text.as_str());
        }
        cursor.y += geometry.row_height;
    }

    cursor.y += geometry.section_spacing;
}

fn layout_bullets(cursor: &mut Cursor<'_>, bullets: &BulletBlock) {
    let geometry = cursor.geometry;
    cursor.break_if_past(bullets.break_after);
    cursor.heading(&bullets.heading);

    for item in &bullets.items {
        cursor.break_if_past(geometry.page_height_threshold);
        let lines = wrap(&format!("• {}", item), BULLET_WRAP);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.into_iter().enumerate() {
            cursor.text(geometry.left_margin, BULLET_SIZE, Rgb::GRAY, line);
            if i < last {
                cursor.y += WRAP_GAP;
            }
        }
        cursor.y += geometry.row_height;
    }

    cursor.y += geometry.section_spacing;
}

/// Footer label plus "Page i of N" on every page
fn stamp_footers(pages: &mut [LaidOutPage], label: &str, geometry: &PageGeometry) {
    let total = pages.len();
    for page in pages.iter_mut() {
        page.items.push(PageItem::Text {
            x: geometry.left_margin,
            y: geometry.footer_y,
            size: FOOTER_SIZE,
            color: Rgb::GRAY,
            align: Align::Left,
            text: label.to_string(),
        });
        page.items.push(PageItem::Text {
            x: PAGE_NUMBER_X,
            y: geometry.footer_y,
            size: FOOTER_SIZE,
            color: Rgb::GRAY,
            align: Align::Right,
            text: format!("Page {} of {}", page.number, total),
        });
    }
}

/// Greedy word wrap on character counts
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use crate::reports::document::{Cell, ReportKind};
    use chrono::NaiveDate;

    fn document_with_rows(rows: usize) -> ReportDocument {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        let mut doc = ReportDocument::new(ReportKind::Financial, range);
        doc.push(Section::Table(TableBlock {
            heading: "Rows".into(),
            columns: vec![Column::new("Name", 22.0), Column::new("Value", 100.0)],
            header_fill: Rgb::BLUE,
            font_size: 8.0,
            rows: (0..rows)
                .map(|i| vec![Cell::plain(format!("row {}", i)), Cell::plain("1.00")])
                .collect(),
            break_after: 250.0,
        }));
        doc
    }

    #[test]
    fn test_short_table_fits_one_page() {
        let paged = layout(&document_with_rows(3), &PageGeometry::default());
        assert_eq!(paged.page_count(), 1);
        let texts: Vec<&str> = paged.pages[0].texts().collect();
        assert_eq!(texts.last(), Some(&"Page 1 of 1"));
    }

    #[test]
    fn test_header_repeats_on_continuation_pages() {
        let paged = layout(&document_with_rows(80), &PageGeometry::default());
        assert!(paged.page_count() > 2);

        for page in &paged.pages[1..] {
            assert!(matches!(page.items[0], PageItem::Rect { fill: Rgb::BLUE, .. }));
            let texts: Vec<&str> = page.texts().take(3).collect();
            assert_eq!(texts, vec!["Name", "Value", texts[2]]);
            assert!(texts[2].starts_with("row "));
        }
    }

    #[test]
    fn test_rows_never_start_past_threshold() {
        let geometry = PageGeometry::default();
        let paged = layout(&document_with_rows(80), &geometry);

        for page in &paged.pages {
            for item in &page.items {
                if let PageItem::Text { y, text, .. } = item {
                    if text.starts_with("row ") {
                        assert!(*y <= geometry.page_height_threshold + geometry.row_height);
                    }
                }
            }
        }
    }

    #[test]
    fn test_every_row_is_placed_once() {
        let paged = layout(&document_with_rows(80), &PageGeometry::default());
        let rows = paged
            .pages
            .iter()
            .flat_map(|p| p.texts())
            .filter(|t| t.starts_with("row "))
            .count();
        assert_eq!(rows, 80);
    }

    #[test]
    fn test_footers_number_all_pages() {
        let paged = layout(&document_with_rows(80), &PageGeometry::default());
        let n = paged.page_count();
        for (i, page) in paged.pages.iter().enumerate() {
            let texts: Vec<&str> = page.texts().collect();
            assert_eq!(texts[texts.len() - 2], "Generated by Personal Finance Tracker");
            assert_eq!(texts[texts.len() - 1], format!("Page {} of {}", i + 1, n));
        }
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("unbreakableword", 4), vec!["unbreakableword"]);
    }
}
