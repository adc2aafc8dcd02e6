use super::column::{CellValue, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column_key: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<SortSpec>,
}

impl SortState {
    pub fn active(&self) -> Option<&SortSpec> {
        self.active.as_ref()
    }

    pub fn direction_for(&self, column_key: &str) -> Option<SortDirection> {
        self.active
            .as_ref()
            .filter(|spec| spec.column_key == column_key)
            .map(|spec| spec.direction)
    }

    /// Header click: a new column starts ascending, the same column cycles
    /// asc → desc → unsorted.
    pub fn toggle(&mut self, column_key: &str) {
        self.active = match self.active.take() {
            Some(spec) if spec.column_key == column_key => match spec.direction {
                SortDirection::Asc => Some(SortSpec {
                    direction: SortDirection::Desc,
                    ..spec
                }),
                SortDirection::Desc => None,
            },
            _ => Some(SortSpec {
                column_key: column_key.to_string(),
                direction: SortDirection::Asc,
            }),
        };
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

pub fn apply_sort<R: TableRow>(mut rows: Vec<R>, sort: Option<&SortSpec>) -> Vec<R> {
    let Some(spec) = sort else {
        return rows;
    };

    let key = spec.column_key.as_str();
    let mut keyed: Vec<(CellValue, R)> = rows
        .drain(..)
        .map(|row| (row.cell(key).unwrap_or(CellValue::Empty), row))
        .collect();

    match spec.direction {
        SortDirection::Asc => keyed.sort_by(|a, b| a.0.total_cmp(&b.0)),
        SortDirection::Desc => keyed.sort_by(|a, b| b.0.total_cmp(&a.0)),
    }

    keyed.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Track {
        id: u32,
        plays: f64,
        genre: &'static str,
    }

    impl TableRow for Track {
        fn cell(&self, column_key: &str) -> Option<CellValue> {
            match column_key {
                "plays" => Some(CellValue::Number(self.plays)),
                "genre" => Some(CellValue::Text(self.genre.to_string())),
                _ => None,
            }
        }
    }

    fn tracks() -> Vec<Track> {
        vec![
            Track { id: 1, plays: 10.0, genre: "rock" },
            Track { id: 2, plays: 9.0, genre: "jazz" },
            Track { id: 3, plays: 100.0, genre: "rock" },
            Track { id: 4, plays: 9.0, genre: "pop" },
        ]
    }

    fn ids(rows: &[&Track]) -> Vec<u32> {
        rows.iter().map(|t| t.id).collect()
    }

    fn spec(key: &str, direction: SortDirection) -> SortSpec {
        SortSpec {
            column_key: key.to_string(),
            direction,
        }
    }

    #[test]
    fn no_sort_keeps_input_order() {
        let data = tracks();

        let out = apply_sort(data.iter().collect(), None);

        assert_eq!(ids(&out), vec![1, 2, 3, 4]);
    }

    #[test]
    fn numbers_sort_numerically() {
        let data = tracks();

        let out = apply_sort(data.iter().collect(), Some(&spec("plays", SortDirection::Asc)));

        assert_eq!(ids(&out), vec![2, 4, 1, 3]);
    }

    #[test]
    fn ties_keep_original_order_in_both_directions() {
        let data = tracks();

        let asc = apply_sort(data.iter().collect(), Some(&spec("genre", SortDirection::Asc)));
        let desc = apply_sort(data.iter().collect(), Some(&spec("genre", SortDirection::Desc)));

        assert_eq!(ids(&asc), vec![2, 4, 1, 3]);
        assert_eq!(ids(&desc), vec![1, 3, 4, 2]);
    }

    #[test]
    fn descending_reverses_ascending_without_duplicates() {
        let data = vec![
            Track { id: 1, plays: 3.0, genre: "a" },
            Track { id: 2, plays: 1.0, genre: "b" },
            Track { id: 3, plays: 2.0, genre: "c" },
        ];

        let asc = apply_sort(data.iter().collect(), Some(&spec("plays", SortDirection::Asc)));
        let mut desc = apply_sort(data.iter().collect(), Some(&spec("plays", SortDirection::Desc)));
        desc.reverse();

        assert_eq!(ids(&asc), ids(&desc));
    }

    #[test]
    fn toggle_cycles_per_column() {
        let mut state = SortState::default();

        state.toggle("title");
        assert_eq!(state.direction_for("title"), Some(SortDirection::Asc));
        state.toggle("title");
        assert_eq!(state.direction_for("title"), Some(SortDirection::Desc));
        state.toggle("title");
        assert_eq!(state.active(), None);

        state.toggle("title");
        state.toggle("date");
        assert_eq!(state.direction_for("title"), None);
        assert_eq!(state.direction_for("date"), Some(SortDirection::Asc));
    }
}
