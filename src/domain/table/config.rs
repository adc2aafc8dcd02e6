use std::collections::BTreeSet;

use super::column::ColumnDef;
use super::filter::MatchMode;
use super::pagination::DEFAULT_FETCH_THRESHOLD_PX;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidSize { field: &'static str, value: f64 },
    NoColumns,
    DuplicateColumn(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidSize { field, value } => {
                write!(f, "{field} must be a positive number, got {value}")
            }
            ConfigError::NoColumns => write!(f, "table needs at least one column"),
            ConfigError::DuplicateColumn(key) => write!(f, "duplicate column key: {key}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipelineOrder {
    #[default]
    SortThenFilter,
    FilterThenSort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub container_height: f64,
    pub row_height: f64,
    pub virtualized: bool,
    pub show_filters: bool,
    pub overscan: usize,
    pub fetch_threshold: f64,
    pub virtualization_min_rows: usize,
    pub empty_message: String,
    pub match_mode: MatchMode,
    pub pipeline: PipelineOrder,
    pub skeleton_rows: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            container_height: 400.0,
            row_height: 52.0,
            virtualized: true,
            show_filters: false,
            overscan: 10,
            fetch_threshold: DEFAULT_FETCH_THRESHOLD_PX,
            virtualization_min_rows: 10,
            empty_message: "No data found".to_string(),
            match_mode: MatchMode::CaseSensitive,
            pipeline: PipelineOrder::SortThenFilter,
            skeleton_rows: 3,
        }
    }
}

impl TableConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("container_height", self.container_height),
            ("row_height", self.row_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidSize { field, value });
            }
        }
        if !self.fetch_threshold.is_finite() || self.fetch_threshold < 0.0 {
            return Err(ConfigError::InvalidSize {
                field: "fetch_threshold",
                value: self.fetch_threshold,
            });
        }
        Ok(self)
    }
}

pub fn validate_columns(columns: &[ColumnDef]) -> Result<(), ConfigError> {
    if columns.is_empty() {
        return Err(ConfigError::NoColumns);
    }
    let mut seen = BTreeSet::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(ConfigError::DuplicateColumn(column.key.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TableConfig::default().validate().expect("default should be valid");

        assert_eq!(config.row_height, 52.0);
        assert_eq!(config.empty_message, "No data found");
    }

    #[test]
    fn rejects_non_positive_sizes() {
        let err = TableConfig {
            row_height: 0.0,
            ..TableConfig::default()
        }
        .validate()
        .expect_err("zero row height should fail");

        assert_eq!(
            err,
            ConfigError::InvalidSize {
                field: "row_height",
                value: 0.0
            }
        );

        let err = TableConfig {
            container_height: f64::NAN,
            ..TableConfig::default()
        }
        .validate()
        .expect_err("NaN height should fail");
        assert!(err.to_string().contains("container_height"));
    }

    #[test]
    fn rejects_duplicate_or_missing_columns() {
        assert_eq!(validate_columns(&[]), Err(ConfigError::NoColumns));

        let columns = vec![ColumnDef::new("title", "A"), ColumnDef::new("title", "B")];
        assert_eq!(
            validate_columns(&columns),
            Err(ConfigError::DuplicateColumn("title".to_string()))
        );
    }
}
