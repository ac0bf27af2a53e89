//! User settings for fintrack
//!
//! Manages display preferences and the report layout knobs: how many rows
//! each report section shows and the page geometry used for pagination.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;

/// Page geometry in layout units (A4 portrait, millimetres)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Cursor position where content starts on every page
    pub top_margin: f32,
    /// Left edge for text
    pub left_margin: f32,
    /// Cursor advance per body row or summary line
    pub row_height: f32,
    /// Cursor advance after a table header band
    pub header_height: f32,
    /// Cursor advance after a section title
    pub title_height: f32,
    /// Gap inserted after each section
    pub section_spacing: f32,
    /// A row may not start below this position
    pub page_height_threshold: f32,
    /// Vertical position of the footer line
    pub footer_y: f32,
    /// Physical page width
    pub page_width: f32,
    /// Physical page height
    pub page_height: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            top_margin: 20.0,
            left_margin: 20.0,
            row_height: 8.0,
            header_height: 12.0,
            title_height: 10.0,
            section_spacing: 10.0,
            page_height_threshold: 270.0,
            footer_y: 285.0,
            page_width: 210.0,
            page_height: 297.0,
        }
    }
}

/// Row limits and geometry for generated reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Maximum rows in the expense-by-category table
    #[serde(default = "default_breakdown_rows")]
    pub breakdown_rows: usize,

    /// Maximum rows in the budget performance table
    #[serde(default = "default_budget_rows")]
    pub budget_rows: usize,

    /// Maximum rows in the recent transactions ledger
    #[serde(default = "default_ledger_rows")]
    pub ledger_rows: usize,

    /// Number of months in the monthly income/expense series
    #[serde(default = "default_series_months")]
    pub monthly_series_months: usize,

    #[serde(default)]
    pub page: PageGeometry,
}

fn default_breakdown_rows() -> usize {
    8
}

fn default_budget_rows() -> usize {
    10
}

fn default_ledger_rows() -> usize {
    15
}

fn default_series_months() -> usize {
    6
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            breakdown_rows: default_breakdown_rows(),
            budget_rows: default_budget_rows(),
            ledger_rows: default_ledger_rows(),
            monthly_series_months: default_series_months(),
            page: PageGeometry::default(),
        }
    }
}

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in every formatted amount
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    #[serde(default)]
    pub report: ReportSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            report: ReportSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject geometry that would make pagination loop forever
    pub fn validate(&self) -> Result<(), FinanceError> {
        let page = &self.report.page;
        if page.row_height <= 0.0 || page.header_height <= 0.0 {
            return Err(FinanceError::Config(
                "Row and header heights must be positive".into(),
            ));
        }
        if page.page_height_threshold <= page.top_margin + page.header_height + page.title_height {
            return Err(FinanceError::Config(
                "Page height threshold leaves no room for body rows".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.report.breakdown_rows, 8);
        assert_eq!(settings.report.ledger_rows, 15);
        assert_eq!(settings.report.page.page_height_threshold, 270.0);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "₱".into();
        settings.report.ledger_rows = 30;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "₱");
        assert_eq!(loaded.report.ledger_rows, 30);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"currency_symbol":"€"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.report.breakdown_rows, 8);
    }

    #[test]
    fn test_rejects_degenerate_geometry() {
        let mut settings = Settings::default();
        settings.report.page.row_height = 0.0;
        assert!(settings.validate().is_err());
    }
}
