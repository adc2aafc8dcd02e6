use std::collections::BTreeMap;

use super::column::{column_layout, ColumnDef, ColumnLayout, Indexed, TableRow};
use super::config::{validate_columns, ConfigError, PipelineOrder, TableConfig};
use super::filter::{apply_filters, FilterState};
use super::pagination::{BottomTrigger, ScrollMetrics};
use super::sort::{apply_sort, SortDirection, SortState};
use super::virtualizer::Virtualizer;

pub const NO_MATCH_MESSAGE: &str = "沒有符合篩選條件的資料";
pub const FILTER_STATS_HEIGHT: f64 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<T> {
    RowsReplaced(Vec<T>),
    RowsAppended(Vec<T>),
    FilterDraftChanged { column_key: String, value: String },
    FilterSubmitted { column_key: String },
    FilterCleared { column_key: String },
    ShowFiltersChanged(bool),
    SortToggled { column_key: String },
    Scrolled(ScrollMetrics),
    Resized { width: f64, height: f64 },
    HeaderMeasured { height: f64 },
    /// `position` is the row's index in the visible (sorted, filtered) order.
    RowMeasured { position: usize, height: f64 },
    LoadingChanged(bool),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reaction {
    pub fetch_more: bool,
    pub scroll_to_top: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    NoData,
    NoMatches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePhase {
    Empty(EmptyReason),
    Loaded,
    LoadingMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterStats {
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub active_filters: usize,
}

impl FilterStats {
    pub fn has_active_filters(&self) -> bool {
        self.active_filters > 0
    }

    pub fn summary(&self) -> String {
        let mut text = format!("顯示 {} / {} 筆資料", self.filtered_rows, self.total_rows);
        if self.active_filters > 0 {
            text.push_str(&format!(" ({} 個篩選條件)", self.active_filters));
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
    Empty { message: String },
    Flow,
    Virtual { total_height: f64 },
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedRow {
    pub position: usize,
    pub source_index: usize,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub mode: RenderMode,
    pub rows: Vec<RenderedRow>,
    pub skeleton_tops: Vec<f64>,
    pub body_height: f64,
    pub scroll_height: f64,
    pub stats: FilterStats,
    pub show_stats: bool,
    pub layout: ColumnLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Change {
    /// Different rows or a different order: old measurements and scroll
    /// position no longer apply.
    ResultSet,
    /// Rows added at the end of an unchanged order.
    Appended,
}

#[derive(Debug, Clone)]
pub struct TableModel<T> {
    columns: Vec<ColumnDef>,
    config: TableConfig,
    rows: Vec<T>,
    visible: Vec<usize>,
    filters: FilterState,
    drafts: BTreeMap<String, String>,
    sort: SortState,
    virtualizer: Virtualizer,
    trigger: BottomTrigger,
    is_loading: bool,
    container_width: f64,
    client_height: f64,
    header_height: f64,
}

impl<T: TableRow> TableModel<T> {
    pub fn new(columns: Vec<ColumnDef>, config: TableConfig) -> Result<Self, ConfigError> {
        validate_columns(&columns)?;
        let config = config.validate()?;
        Ok(Self {
            virtualizer: Virtualizer::new(0, config.row_height, config.overscan),
            trigger: BottomTrigger::new(config.fetch_threshold),
            columns,
            config,
            rows: Vec::new(),
            visible: Vec::new(),
            filters: FilterState::new(),
            drafts: BTreeMap::new(),
            sort: SortState::default(),
            is_loading: false,
            container_width: 0.0,
            client_height: 0.0,
            header_height: 0.0,
        })
    }

    pub fn with_rows(mut self, rows: Vec<T>) -> Self {
        self.dispatch(TableEvent::RowsReplaced(rows));
        self
    }

    pub fn dispatch(&mut self, event: TableEvent<T>) -> Reaction {
        match event {
            TableEvent::RowsReplaced(rows) => {
                self.rows = rows;
                self.trigger.rearm();
                self.recompute(Change::ResultSet)
            }
            TableEvent::RowsAppended(rows) => {
                if rows.is_empty() {
                    return Reaction::default();
                }
                self.rows.extend(rows);
                self.trigger.rearm();
                if self.sort.active().is_some() {
                    // Appended rows can land anywhere in a sorted order.
                    self.recompute_visible();
                    self.virtualizer.reset_measurements();
                    Reaction::default()
                } else {
                    self.recompute(Change::Appended)
                }
            }
            TableEvent::FilterDraftChanged { column_key, value } => {
                self.drafts.insert(column_key, value);
                Reaction::default()
            }
            TableEvent::FilterSubmitted { column_key } => {
                if !self.config.show_filters || !self.is_filterable(&column_key) {
                    return Reaction::default();
                }
                let draft = self.drafts.get(&column_key).cloned().unwrap_or_default();
                if self.filters.set(&column_key, &draft) {
                    self.recompute(Change::ResultSet)
                } else {
                    Reaction::default()
                }
            }
            TableEvent::FilterCleared { column_key } => {
                self.drafts.remove(&column_key);
                if self.filters.clear(&column_key) {
                    self.recompute(Change::ResultSet)
                } else {
                    Reaction::default()
                }
            }
            TableEvent::ShowFiltersChanged(show) => {
                self.config.show_filters = show;
                if show {
                    return Reaction::default();
                }
                self.drafts.clear();
                if self.filters.clear_all() {
                    self.recompute(Change::ResultSet)
                } else {
                    self.virtualizer.scroll_to_top();
                    Reaction {
                        scroll_to_top: true,
                        ..Reaction::default()
                    }
                }
            }
            TableEvent::SortToggled { column_key } => {
                let sortable = self
                    .columns
                    .iter()
                    .any(|col| col.key == column_key && col.sortable);
                if !sortable {
                    return Reaction::default();
                }
                self.sort.toggle(&column_key);
                self.recompute(Change::ResultSet)
            }
            TableEvent::Scrolled(metrics) => {
                self.virtualizer
                    .set_scroll_top(metrics.scroll_top - self.header_height);
                if metrics.client_height > 0.0 {
                    self.client_height = metrics.client_height;
                    self.sync_viewport();
                }
                Reaction {
                    fetch_more: self.trigger.check(metrics, self.is_loading),
                    ..Reaction::default()
                }
            }
            TableEvent::Resized { width, height } => {
                self.container_width = width.max(0.0);
                if height > 0.0 {
                    self.client_height = height;
                    self.sync_viewport();
                }
                Reaction::default()
            }
            TableEvent::HeaderMeasured { height } => {
                self.header_height = height.max(0.0);
                self.sync_viewport();
                Reaction::default()
            }
            TableEvent::RowMeasured { position, height } => {
                self.virtualizer.measure(position, height);
                Reaction::default()
            }
            TableEvent::LoadingChanged(loading) => {
                self.is_loading = loading;
                Reaction::default()
            }
        }
    }

    // Rows start below the header, so the part of the viewport it covers
    // holds no rows.
    fn sync_viewport(&mut self) {
        let rows_height = self.client_height - self.header_height;
        if rows_height > 0.0 {
            self.virtualizer.set_viewport_height(rows_height);
        }
    }

    fn recompute(&mut self, change: Change) -> Reaction {
        self.recompute_visible();
        match change {
            Change::ResultSet => {
                self.virtualizer.reset_measurements();
                self.virtualizer.scroll_to_top();
                Reaction {
                    scroll_to_top: true,
                    ..Reaction::default()
                }
            }
            Change::Appended => Reaction::default(),
        }
    }

    fn recompute_visible(&mut self) {
        let indexed: Vec<Indexed<'_, T>> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| Indexed { index, row })
            .collect();
        let sort = self.sort.active();
        let mode = self.config.match_mode;

        let ordered = match self.config.pipeline {
            PipelineOrder::SortThenFilter => {
                apply_filters(apply_sort(indexed, sort), &self.columns, &self.filters, mode)
            }
            PipelineOrder::FilterThenSort => {
                apply_sort(apply_filters(indexed, &self.columns, &self.filters, mode), sort)
            }
        };

        self.visible = ordered.into_iter().map(|item| item.index).collect();
        self.virtualizer.set_count(self.visible.len());
    }

    fn is_filterable(&self, column_key: &str) -> bool {
        self.columns
            .iter()
            .any(|col| col.key == column_key && col.filterable)
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn row(&self, source_index: usize) -> Option<&T> {
        self.rows.get(source_index)
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().filter_map(|&idx| self.rows.get(idx))
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filter_input(&self, column_key: &str) -> &str {
        self.drafts
            .get(column_key)
            .map(String::as_str)
            .or_else(|| self.filters.get(column_key))
            .unwrap_or("")
    }

    pub fn sort_direction(&self, column_key: &str) -> Option<SortDirection> {
        self.sort.direction_for(column_key)
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn stats(&self) -> FilterStats {
        FilterStats {
            total_rows: self.rows.len(),
            filtered_rows: self.visible.len(),
            active_filters: self.filters.active_count(),
        }
    }

    pub fn phase(&self) -> TablePhase {
        if self.is_loading {
            TablePhase::LoadingMore
        } else if self.visible.is_empty() {
            if self.filters.is_active() {
                TablePhase::Empty(EmptyReason::NoMatches)
            } else {
                TablePhase::Empty(EmptyReason::NoData)
            }
        } else {
            TablePhase::Loaded
        }
    }

    pub fn uses_virtualization(&self) -> bool {
        self.config.virtualized
            && self.container_width > 0.0
            && self.visible.len() > self.config.virtualization_min_rows
    }

    pub fn view(&self) -> TableView {
        let stats = self.stats();
        let layout = column_layout(&self.columns, self.container_width);
        let show_stats = self.config.show_filters && stats.has_active_filters();
        let scroll_height = if show_stats {
            (self.config.container_height - FILTER_STATS_HEIGHT).max(0.0)
        } else {
            self.config.container_height
        };
        let row_height = self.config.row_height;

        let base = TableView {
            mode: RenderMode::Flow,
            rows: Vec::new(),
            skeleton_tops: Vec::new(),
            body_height: 0.0,
            scroll_height,
            stats,
            show_stats,
            layout,
        };

        if let TablePhase::Empty(reason) = self.phase() {
            let message = match reason {
                EmptyReason::NoMatches => NO_MATCH_MESSAGE.to_string(),
                EmptyReason::NoData => self.config.empty_message.clone(),
            };
            return TableView {
                mode: RenderMode::Empty { message },
                ..base
            };
        }

        let flow_rows = || -> Vec<RenderedRow> {
            self.visible
                .iter()
                .enumerate()
                .map(|(position, &source_index)| RenderedRow {
                    position,
                    source_index,
                    top: position as f64 * row_height,
                    height: row_height,
                })
                .collect()
        };
        let flow_height = self.visible.len() as f64 * row_height;

        if !self.uses_virtualization() {
            return TableView {
                mode: RenderMode::Flow,
                rows: flow_rows(),
                body_height: flow_height,
                ..base
            };
        }

        let show_skeleton = self.is_loading && !stats.has_active_filters();
        let skeleton_height = if show_skeleton {
            self.config.skeleton_rows as f64 * row_height
        } else {
            0.0
        };

        let items = self.virtualizer.virtual_items();
        let Some(last) = items.last().copied() else {
            return TableView {
                mode: RenderMode::Fallback,
                rows: flow_rows(),
                body_height: flow_height + skeleton_height,
                ..base
            };
        };

        let rows = items
            .iter()
            .filter_map(|item| {
                self.visible.get(item.index).map(|&source_index| RenderedRow {
                    position: item.index,
                    source_index,
                    top: item.start,
                    height: item.size,
                })
            })
            .collect();

        let skeleton_tops = if show_skeleton {
            (0..self.config.skeleton_rows)
                .map(|k| last.end() + k as f64 * row_height)
                .collect()
        } else {
            Vec::new()
        };

        let total_height = self.virtualizer.total_size();
        TableView {
            mode: RenderMode::Virtual { total_height },
            rows,
            skeleton_tops,
            body_height: total_height + skeleton_height,
            ..base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::column::CellValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Clip {
        title: String,
        views: f64,
    }

    impl TableRow for Clip {
        fn cell(&self, column_key: &str) -> Option<CellValue> {
            match column_key {
                "title" => Some(CellValue::Text(self.title.clone())),
                "views" => Some(CellValue::Number(self.views)),
                _ => None,
            }
        }
    }

    fn clips(count: usize) -> Vec<Clip> {
        (1..=count)
            .map(|n| Clip {
                title: format!("Title {n}"),
                views: (n % 4) as f64,
            })
            .collect()
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::new("title", "Title").sortable().filterable().width(200.0),
            ColumnDef::new("views", "Views").sortable(),
        ]
    }

    fn model(count: usize, config: TableConfig) -> TableModel<Clip> {
        TableModel::new(columns(), config)
            .expect("config should be valid")
            .with_rows(clips(count))
    }

    fn rendered_titles(table: &TableModel<Clip>) -> Vec<String> {
        table
            .view()
            .rows
            .iter()
            .filter_map(|r| table.row(r.source_index))
            .map(|clip| clip.title.clone())
            .collect()
    }

    fn commit_filter(table: &mut TableModel<Clip>, key: &str, value: &str) -> Reaction {
        table.dispatch(TableEvent::ShowFiltersChanged(true));
        table.dispatch(TableEvent::FilterDraftChanged {
            column_key: key.to_string(),
            value: value.to_string(),
        });
        table.dispatch(TableEvent::FilterSubmitted {
            column_key: key.to_string(),
        })
    }

    #[test]
    fn three_rows_render_in_flow_mode() {
        let table = model(3, TableConfig::default());
        let view = table.view();

        assert_eq!(view.mode, RenderMode::Flow);
        assert_eq!(rendered_titles(&table), vec!["Title 1", "Title 2", "Title 3"]);
    }

    #[test]
    fn no_rows_shows_empty_message() {
        let table = model(0, TableConfig::default());

        assert_eq!(
            table.view().mode,
            RenderMode::Empty {
                message: "No data found".to_string()
            }
        );
        assert_eq!(table.phase(), TablePhase::Empty(EmptyReason::NoData));
    }

    #[test]
    fn filter_shows_stats_and_clear_restores_rows() {
        let mut table = model(
            3,
            TableConfig {
                show_filters: true,
                ..TableConfig::default()
            },
        );

        let reaction = commit_filter(&mut table, "title", "Title 1");
        let view = table.view();

        assert!(reaction.scroll_to_top);
        assert_eq!(view.rows.len(), 1);
        assert!(view.show_stats);
        assert!(view.stats.summary().starts_with("顯示 1 / 3 筆資料"));

        table.dispatch(TableEvent::FilterCleared {
            column_key: "title".to_string(),
        });
        let view = table.view();

        assert_eq!(view.rows.len(), 3);
        assert!(!view.show_stats);
        assert_eq!(table.filter_input("title"), "");
    }

    #[test]
    fn drafts_do_not_filter_until_submitted() {
        let mut table = model(3, TableConfig::default());

        table.dispatch(TableEvent::FilterDraftChanged {
            column_key: "title".to_string(),
            value: "Title 2".to_string(),
        });

        assert_eq!(table.view().rows.len(), 3);
        assert_eq!(table.filter_input("title"), "Title 2");
    }

    #[test]
    fn submits_are_ignored_while_filters_are_hidden() {
        let mut table = model(3, TableConfig::default());
        table.dispatch(TableEvent::FilterDraftChanged {
            column_key: "title".to_string(),
            value: "Title 2".to_string(),
        });

        let reaction = table.dispatch(TableEvent::FilterSubmitted {
            column_key: "title".to_string(),
        });

        assert_eq!(reaction, Reaction::default());
        assert!(!table.filters().is_active());
        assert_eq!(table.view().rows.len(), 3);
    }

    #[test]
    fn no_matches_uses_filter_message() {
        let mut table = model(3, TableConfig::default());

        commit_filter(&mut table, "title", "missing");

        assert_eq!(
            table.view().mode,
            RenderMode::Empty {
                message: NO_MATCH_MESSAGE.to_string()
            }
        );
        assert_eq!(table.phase(), TablePhase::Empty(EmptyReason::NoMatches));
    }

    #[test]
    fn hiding_filters_clears_them() {
        let mut table = model(
            3,
            TableConfig {
                show_filters: true,
                ..TableConfig::default()
            },
        );
        commit_filter(&mut table, "title", "Title 3");
        assert_eq!(table.view().rows.len(), 1);

        let reaction = table.dispatch(TableEvent::ShowFiltersChanged(false));

        assert!(reaction.scroll_to_top);
        assert_eq!(table.view().rows.len(), 3);
        assert!(!table.filters().is_active());
    }

    #[test]
    fn large_virtualized_set_renders_a_window() {
        let mut table = model(1000, TableConfig::default());
        table.dispatch(TableEvent::Resized {
            width: 1000.0,
            height: 600.0,
        });

        let view = table.view();

        assert!(matches!(view.mode, RenderMode::Virtual { .. }));
        assert!(view.rows.len() < 50, "rendered {} rows", view.rows.len());
        assert_eq!(view.body_height, 1000.0 * 52.0);
    }

    #[test]
    fn disabling_virtualization_renders_every_row() {
        let mut table = model(
            100,
            TableConfig {
                virtualized: false,
                ..TableConfig::default()
            },
        );
        table.dispatch(TableEvent::Resized {
            width: 1000.0,
            height: 600.0,
        });

        let view = table.view();

        assert_eq!(view.mode, RenderMode::Flow);
        assert_eq!(view.rows.len(), 100);
    }

    #[test]
    fn small_result_sets_skip_virtualization() {
        let mut table = model(10, TableConfig::default());
        table.dispatch(TableEvent::Resized {
            width: 1000.0,
            height: 600.0,
        });

        assert!(!table.uses_virtualization());
        assert_eq!(table.view().rows.len(), 10);
    }

    #[test]
    fn unknown_viewport_height_falls_back_to_all_rows() {
        let mut table = model(40, TableConfig::default());
        table.dispatch(TableEvent::Resized {
            width: 800.0,
            height: 0.0,
        });

        let view = table.view();

        assert_eq!(view.mode, RenderMode::Fallback);
        assert_eq!(view.rows.len(), 40);
        assert_eq!(view.rows[39].top, 39.0 * 52.0);
    }

    #[test]
    fn scrolling_moves_the_window() {
        let mut table = model(1000, TableConfig::default());
        table.dispatch(TableEvent::Resized {
            width: 800.0,
            height: 520.0,
        });

        table.dispatch(TableEvent::Scrolled(ScrollMetrics {
            scroll_top: 52.0 * 500.0,
            scroll_height: 52.0 * 1000.0,
            client_height: 520.0,
        }));
        let view = table.view();

        assert!(view.rows.iter().any(|r| r.position == 500));
        // Row 499 ends exactly at the viewport top; 10 overscan rows above it.
        assert_eq!(view.rows.first().map(|r| r.position), Some(489));
    }

    #[test]
    fn header_height_is_taken_off_the_scroll_offset() {
        let config = TableConfig {
            overscan: 0,
            ..TableConfig::default()
        };
        let mut table = model(1000, config);
        table.dispatch(TableEvent::Resized {
            width: 800.0,
            height: 520.0,
        });
        table.dispatch(TableEvent::HeaderMeasured { height: 60.0 });
        let at = |scroll_top: f64| {
            TableEvent::Scrolled(ScrollMetrics {
                scroll_top,
                scroll_height: 60.0 + 52.0 * 1000.0,
                client_height: 520.0,
            })
        };

        table.dispatch(at(60.0));
        let view = table.view();
        assert_eq!(view.rows.first().map(|r| r.position), Some(0));
        // 460px of rows are visible under the header.
        assert_eq!(view.rows.last().map(|r| r.position), Some(8));

        table.dispatch(at(60.0 + 52.0 * 10.0 + 10.0));
        assert_eq!(table.view().rows.first().map(|r| r.position), Some(10));
    }

    #[test]
    fn bottom_reached_fires_once_per_crossing_on_small_table() {
        let mut table = model(10, TableConfig::default());
        let content = 10.0 * 52.0;
        let at = |scroll_top: f64| {
            TableEvent::Scrolled(ScrollMetrics {
                scroll_top,
                scroll_height: content,
                client_height: 400.0,
            })
        };

        // Mount check: 120px left below the viewport.
        assert!(table.dispatch(at(0.0)).fetch_more);
        assert!(!table.dispatch(at(60.0)).fetch_more);
        assert!(!table.dispatch(at(120.0)).fetch_more);
    }

    #[test]
    fn loading_suppresses_fetch_until_cleared() {
        let mut table = model(10, TableConfig::default());
        let metrics = ScrollMetrics {
            scroll_top: 0.0,
            scroll_height: 520.0,
            client_height: 400.0,
        };

        table.dispatch(TableEvent::LoadingChanged(true));
        assert!(!table.dispatch(TableEvent::Scrolled(metrics)).fetch_more);
        assert_eq!(table.phase(), TablePhase::LoadingMore);

        table.dispatch(TableEvent::LoadingChanged(false));
        assert!(table.dispatch(TableEvent::Scrolled(metrics)).fetch_more);
    }

    #[test]
    fn appended_rows_rearm_the_trigger() {
        let mut table = model(10, TableConfig::default());
        let near_bottom = TableEvent::Scrolled(ScrollMetrics {
            scroll_top: 100.0,
            scroll_height: 520.0,
            client_height: 400.0,
        });
        assert!(table.dispatch(near_bottom.clone()).fetch_more);

        let reaction = table.dispatch(TableEvent::RowsAppended(clips(2)));

        assert!(!reaction.scroll_to_top);
        assert_eq!(table.stats().total_rows, 12);
        assert!(table.dispatch(near_bottom).fetch_more);
    }

    #[test]
    fn loading_adds_skeleton_rows_after_window() {
        let mut table = model(100, TableConfig::default());
        table.dispatch(TableEvent::Resized {
            width: 800.0,
            height: 400.0,
        });
        table.dispatch(TableEvent::LoadingChanged(true));

        let view = table.view();
        let last = view.rows.last().copied().expect("window should not be empty");

        assert_eq!(view.skeleton_tops.len(), 3);
        assert_eq!(view.skeleton_tops[0], last.top + last.height);
        assert_eq!(view.body_height, 100.0 * 52.0 + 3.0 * 52.0);
    }

    #[test]
    fn sort_toggle_reorders_and_ignores_unsortable_columns() {
        let mut table = model(5, TableConfig::default());

        table.dispatch(TableEvent::SortToggled {
            column_key: "views".to_string(),
        });
        let sorted: Vec<f64> = table.visible_rows().map(|c| c.views).collect();
        assert_eq!(sorted, vec![0.0, 1.0, 1.0, 2.0, 3.0]);
        // Ties keep source order.
        let titles: Vec<&str> = table.visible_rows().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Title 4", "Title 1", "Title 5", "Title 2", "Title 3"]);

        let reaction = table.dispatch(TableEvent::SortToggled {
            column_key: "missing".to_string(),
        });
        assert_eq!(reaction, Reaction::default());
        assert_eq!(table.sort_direction("views"), Some(SortDirection::Asc));
    }

    #[test]
    fn measured_rows_shift_following_offsets() {
        let mut table = model(100, TableConfig::default());
        table.dispatch(TableEvent::Resized {
            width: 800.0,
            height: 400.0,
        });

        table.dispatch(TableEvent::RowMeasured {
            position: 0,
            height: 80.0,
        });
        let view = table.view();

        assert_eq!(view.rows[0].height, 80.0);
        assert_eq!(view.rows[1].top, 80.0);
    }

    #[test]
    fn both_pipeline_orders_agree() {
        let mut first = model(40, TableConfig::default());
        let mut second = model(
            40,
            TableConfig {
                pipeline: PipelineOrder::FilterThenSort,
                ..TableConfig::default()
            },
        );
        for table in [&mut first, &mut second] {
            commit_filter(table, "title", "Title 1");
            table.dispatch(TableEvent::SortToggled {
                column_key: "views".to_string(),
            });
        }

        let a: Vec<&Clip> = first.visible_rows().collect();
        let b: Vec<&Clip> = second.visible_rows().collect();
        assert_eq!(a, b);
    }
}
