//! Argument helpers shared by the subcommands

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{DateRange, EntryKind, Money};

/// `--from` / `--to` report window flags
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// First day of the window (YYYY-MM-DD); defaults to the first of this month
    #[arg(long)]
    pub from: Option<String>,

    /// Last day of the window (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub to: Option<String>,
}

impl WindowArgs {
    /// Resolve against `today`, month-to-date when no flag is given
    pub fn resolve(&self, today: NaiveDate) -> FinanceResult<DateRange> {
        let default = DateRange::month_to_date(today);
        let from = match &self.from {
            Some(s) => parse_date(s)?,
            None => default.from,
        };
        let to = match &self.to {
            Some(s) => parse_date(s)?,
            None => default.to,
        };

        if from > to {
            return Err(FinanceError::Validation(format!(
                "--from {} is after --to {}",
                from, to
            )));
        }
        Ok(DateRange::new(from, to))
    }

    /// The window only when at least one flag was given
    pub fn resolve_if_set(&self, today: NaiveDate) -> FinanceResult<Option<DateRange>> {
        if self.from.is_none() && self.to.is_none() {
            Ok(None)
        } else {
            self.resolve(today).map(Some)
        }
    }
}

/// `--output-dir` flag for commands that write files
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Directory to write into (defaults to the exports directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl OutputArgs {
    /// Write `bytes` as `file_name` and return the full path
    pub fn write(&self, default_dir: &Path, file_name: &str, bytes: &[u8]) -> FinanceResult<PathBuf> {
        let dir = self.output_dir.as_deref().unwrap_or(default_dir);
        let path = dir.join(file_name);
        let failed = |e: std::io::Error| {
            FinanceError::Export(format!("Failed to write {}: {}", path.display(), e))
        };

        fs::create_dir_all(dir).map_err(failed)?;
        fs::write(&path, bytes).map_err(failed)?;

        tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote export");
        Ok(path)
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| FinanceError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s)))
}

/// Parse an amount such as `150`, `85.50` or `$1,200`
pub fn parse_money(s: &str) -> FinanceResult<Money> {
    Money::parse(s).map_err(|e| FinanceError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse `income` or `expense`
pub fn parse_kind(s: &str) -> FinanceResult<EntryKind> {
    s.parse().map_err(FinanceError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_window_is_month_to_date() {
        let range = WindowArgs::default().resolve(date(2024, 3, 14)).unwrap();
        assert_eq!(range, DateRange::new(date(2024, 3, 1), date(2024, 3, 14)));
        assert_eq!(WindowArgs::default().resolve_if_set(date(2024, 3, 14)).unwrap(), None);
    }

    #[test]
    fn test_explicit_window() {
        let args = WindowArgs {
            from: Some("2024-01-01".into()),
            to: Some("2024-01-31".into()),
        };
        let range = args.resolve(date(2024, 3, 14)).unwrap();
        assert_eq!(range.file_name("transactions", "csv"), "transactions-2024-01-01-to-2024-01-31.csv");
    }

    #[test]
    fn test_reversed_window_is_rejected() {
        let args = WindowArgs {
            from: Some("2024-02-01".into()),
            to: Some("2024-01-01".into()),
        };
        assert!(args.resolve(date(2024, 3, 14)).unwrap_err().is_validation());
    }

    #[test]
    fn test_output_goes_to_default_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = OutputArgs::default()
            .write(temp_dir.path(), "report.pdf", b"%PDF-1.4")
            .unwrap();
        assert_eq!(path, temp_dir.path().join("report.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_parse_helpers() {
        assert!(parse_date("01/15/2024").is_err());
        assert_eq!(parse_money("$1,200").unwrap(), Money::from_cents(120000));
        assert!(parse_money("abc").unwrap_err().is_validation());
        assert_eq!(parse_kind("Income").unwrap(), EntryKind::Income);
        assert!(parse_kind("transfer").is_err());
    }
}
