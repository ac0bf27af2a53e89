//! Report document model
//!
//! A `ReportDocument` is the logical, unpaginated form of a report: an
//! ordered list of sections. Page assignment happens later in `layout`,
//! and byte encoding after that in `export::pdf`.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::models::DateRange;

/// An RGB color used for text and table header bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(100, 100, 100);
    pub const BLUE: Rgb = Rgb(59, 130, 246);
    pub const GREEN: Rgb = Rgb(16, 185, 129);
    pub const RED: Rgb = Rgb(239, 68, 68);
    pub const ORANGE: Rgb = Rgb(245, 158, 11);

    /// Components scaled to `0.0..=1.0`
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        )
    }
}

/// A piece of text with its color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub text: String,
    pub color: Rgb,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::colored(text, Rgb::BLACK)
    }

    pub fn colored(text: impl Into<String>, color: Rgb) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// A table column: its header label and the x offset of its text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub label: String,
    pub x: f32,
}

impl Column {
    pub fn new(label: impl Into<String>, x: f32) -> Self {
        Self {
            label: label.into(),
            x,
        }
    }
}

/// Document heading and report window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleBlock {
    pub title: String,
    pub color: Rgb,
    /// `Period: Jan 1, 2024 - Jan 31, 2024`
    pub period: String,
    /// Print a "Generated on" line under the period
    pub show_generated: bool,
}

/// Label/value pairs, values colored individually
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBlock {
    pub heading: String,
    pub value_x: f32,
    pub rows: Vec<(String, Cell)>,
}

/// A table with a filled header band that repeats on every page it spans
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableBlock {
    pub heading: String,
    pub columns: Vec<Column>,
    pub header_fill: Rgb,
    pub font_size: f32,
    pub rows: Vec<Vec<Cell>>,
    /// Start the section on a new page if the cursor is already past this
    pub break_after: f32,
}

/// A heading followed by bullet lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletBlock {
    pub heading: String,
    pub items: Vec<String>,
    pub break_after: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Section {
    Title(TitleBlock),
    Summary(SummaryBlock),
    Table(TableBlock),
    Bullets(BulletBlock),
}

impl Section {
    pub fn heading(&self) -> &str {
        match self {
            Self::Title(t) => &t.title,
            Self::Summary(s) => &s.heading,
            Self::Table(t) => &t.heading,
            Self::Bullets(b) => &b.heading,
        }
    }
}

/// Which report a document is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportKind {
    Financial,
    BudgetAnalysis,
}

impl ReportKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Financial => "Financial Report",
            Self::BudgetAnalysis => "Budget Analysis Report",
        }
    }

    /// File name prefix, e.g. `financial-report-2024-01-01-to-2024-01-31.pdf`
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Financial => "financial-report",
            Self::BudgetAnalysis => "budget-analysis",
        }
    }

    /// Text printed at the left of every page footer
    pub fn footer_label(&self) -> &'static str {
        match self {
            Self::Financial => "Generated by Personal Finance Tracker",
            Self::BudgetAnalysis => "Budget Analysis Report - Personal Finance Tracker",
        }
    }
}

/// An unpaginated report
///
/// `sections` depend only on the inputs the document was built from;
/// `generated_at` is the single field that varies between builds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub kind: ReportKind,
    pub range: DateRange,
    pub generated_at: DateTime<Local>,
    pub sections: Vec<Section>,
}

impl ReportDocument {
    pub fn new(kind: ReportKind, range: DateRange) -> Self {
        Self {
            kind,
            range,
            generated_at: Local::now(),
            sections: Vec::new(),
        }
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn file_name(&self) -> String {
        self.range.file_name(self.kind.file_prefix(), "pdf")
    }

    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading() == heading)
    }
}
