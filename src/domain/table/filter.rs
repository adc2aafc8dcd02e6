use std::collections::BTreeMap;

use super::column::{ColumnDef, TableRow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    CaseSensitive,
    IgnoreCase,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column_key: &str, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return self.clear(column_key);
        }
        if self.values.get(column_key).map(String::as_str) == Some(trimmed) {
            return false;
        }
        self.values
            .insert(column_key.to_string(), trimmed.to_string());
        true
    }

    pub fn clear(&mut self, column_key: &str) -> bool {
        self.values.remove(column_key).is_some()
    }

    pub fn clear_all(&mut self) -> bool {
        let had_any = !self.values.is_empty();
        self.values.clear();
        had_any
    }

    pub fn get(&self, column_key: &str) -> Option<&str> {
        self.values.get(column_key).map(String::as_str)
    }

    pub fn active_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_active(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: AsRef<str>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = FilterState::new();
        for (key, value) in iter {
            let key: String = key.into();
            state.set(&key, value.as_ref());
        }
        state
    }
}

pub fn matches_filter(haystack: &str, needle: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::CaseSensitive => haystack.contains(needle),
        MatchMode::IgnoreCase => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

pub fn apply_filters<R: TableRow>(
    rows: Vec<R>,
    columns: &[ColumnDef],
    filters: &FilterState,
    mode: MatchMode,
) -> Vec<R> {
    let active: Vec<(&str, &str)> = filters
        .iter()
        .filter(|(key, _)| columns.iter().any(|col| col.key == *key && col.filterable))
        .collect();

    if active.is_empty() {
        return rows;
    }

    rows.into_iter()
        .filter(|row| {
            active.iter().all(|(key, needle)| {
                row.cell(key)
                    .map(|value| matches_filter(&value.to_filter_text(), needle, mode))
                    .unwrap_or(false)
            })
        })
        .collect()
}
