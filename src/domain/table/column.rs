use std::cmp::Ordering;

use chrono::NaiveDate;

pub const DEFAULT_COLUMN_WIDTH: f64 = 120.0;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    List(Vec<String>),
}

impl CellValue {
    pub fn to_filter_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => format_number(*value),
            CellValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            CellValue::List(items) => items.join(", "),
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Number(_) => 1,
            CellValue::Date(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::List(_) => 4,
        }
    }

    /// Total order used by the sort engine. Values of different kinds are
    /// ordered by kind, empty cells first.
    pub fn total_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::List(a), CellValue::List(b)) => a.join(", ").cmp(&b.join(", ")),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

pub trait TableRow {
    fn cell(&self, column_key: &str) -> Option<CellValue>;

    fn row_key(&self) -> Option<String> {
        None
    }
}

impl<T: TableRow + ?Sized> TableRow for &T {
    fn cell(&self, column_key: &str) -> Option<CellValue> {
        (**self).cell(column_key)
    }

    fn row_key(&self) -> Option<String> {
        (**self).row_key()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Indexed<'a, T> {
    pub index: usize,
    pub row: &'a T,
}

impl<T: TableRow> TableRow for Indexed<'_, T> {
    fn cell(&self, column_key: &str) -> Option<CellValue> {
        self.row.cell(column_key)
    }

    fn row_key(&self) -> Option<String> {
        self.row.row_key()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub key: String,
    pub display_name: String,
    pub sortable: bool,
    pub filterable: bool,
    pub width: f64,
}

impl ColumnDef {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            sortable: false,
            filterable: false,
            width: 0.0,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn effective_width(&self) -> f64 {
        if self.width > 0.0 {
            self.width
        } else {
            DEFAULT_COLUMN_WIDTH
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableWidth {
    Fill,
    MaxContent,
}

impl TableWidth {
    pub fn css(&self) -> &'static str {
        match self {
            TableWidth::Fill => "width: 100%;",
            TableWidth::MaxContent => "min-width: max-content; width: 100%;",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    Percent(f64),
    Px(f64),
}

impl ColumnWidth {
    pub fn value(&self) -> String {
        match self {
            ColumnWidth::Percent(pct) => format!("{pct}%"),
            ColumnWidth::Px(px) => format!("{px}px"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub table_width: TableWidth,
    pub widths: Vec<ColumnWidth>,
}

pub fn column_layout(columns: &[ColumnDef], container_width: f64) -> ColumnLayout {
    let pixel_widths = || {
        columns
            .iter()
            .map(|col| ColumnWidth::Px(col.effective_width()))
            .collect::<Vec<_>>()
    };

    if container_width <= 0.0 || columns.is_empty() {
        return ColumnLayout {
            table_width: TableWidth::Fill,
            widths: pixel_widths(),
        };
    }

    let total: f64 = columns.iter().map(ColumnDef::effective_width).sum();
    if total <= container_width {
        let share = 100.0 / columns.len() as f64;
        ColumnLayout {
            table_width: TableWidth::Fill,
            widths: vec![ColumnWidth::Percent(share); columns.len()],
        }
    } else {
        ColumnLayout {
            table_width: TableWidth::MaxContent,
            widths: pixel_widths(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("title", "標題").width(200.0),
            ColumnDef::new("status", "狀態"),
        ]
    }

    #[test]
    fn unmeasured_container_uses_pixel_widths() {
        let layout = column_layout(&columns(), 0.0);

        assert_eq!(layout.table_width, TableWidth::Fill);
        assert_eq!(
            layout.widths,
            vec![ColumnWidth::Px(200.0), ColumnWidth::Px(DEFAULT_COLUMN_WIDTH)]
        );
    }

    #[test]
    fn wide_container_splits_columns_evenly() {
        let layout = column_layout(&columns(), 800.0);

        assert_eq!(layout.table_width, TableWidth::Fill);
        assert_eq!(
            layout.widths,
            vec![ColumnWidth::Percent(50.0), ColumnWidth::Percent(50.0)]
        );
    }

    #[test]
    fn narrow_container_scrolls_horizontally() {
        let layout = column_layout(&columns(), 300.0);

        assert_eq!(layout.table_width, TableWidth::MaxContent);
        assert_eq!(layout.widths[0], ColumnWidth::Px(200.0));
    }

    #[test]
    fn width_value_is_a_bare_css_length() {
        assert_eq!(ColumnWidth::Px(200.0).value(), "200px");
        assert_eq!(ColumnWidth::Percent(12.5).value(), "12.5%");
    }

    #[test]
    fn cell_order_is_numeric_for_numbers() {
        let nine = CellValue::Number(9.0);
        let ten = CellValue::Number(10.0);

        assert_eq!(nine.total_cmp(&ten), Ordering::Less);
        assert_eq!(
            CellValue::Text("9".into()).total_cmp(&CellValue::Text("10".into())),
            Ordering::Greater
        );
        assert_eq!(CellValue::Empty.total_cmp(&nine), Ordering::Less);
    }

    #[test]
    fn filter_text_formats_each_kind() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date");

        assert_eq!(CellValue::Number(42.0).to_filter_text(), "42");
        assert_eq!(CellValue::Number(1.5).to_filter_text(), "1.5");
        assert_eq!(CellValue::Date(date).to_filter_text(), "2024-03-05");
        assert_eq!(
            CellValue::List(vec!["教育".into(), "科技".into()]).to_filter_text(),
            "教育, 科技"
        );
    }
}
