use dioxus::prelude::*;

use crate::domain::table::{
    ColumnDef, ColumnWidth, Reaction, RenderMode, RenderedRow, ScrollMetrics, SortDirection,
    TableEvent, TableModel, TableRow,
};

pub const DEFAULT_CONTAINER_ID: &str = "data-table-scroll";

fn sort_icon(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => "▲",
        Some(SortDirection::Desc) => "▼",
        None => "↕",
    }
}

fn cell_style(width: &ColumnWidth) -> String {
    let width = width.value();
    format!(
        "flex: 0 0 {width}; width: {width}; min-width: {width}; max-width: {width}; padding: 0 12px; box-sizing: border-box; overflow: hidden; text-overflow: ellipsis;"
    )
}

async fn read_scroll_metrics(container_id: &str) -> Option<ScrollMetrics> {
    let script = format!(
        r#"const el = document.getElementById("{container_id}");
if (!el) {{ return []; }}
return [el.scrollTop, el.scrollHeight, el.clientHeight];"#
    );
    let values = document::eval(&script).join::<Vec<f64>>().await.ok()?;
    match values.as_slice() {
        [scroll_top, scroll_height, client_height] => Some(ScrollMetrics {
            scroll_top: *scroll_top,
            scroll_height: *scroll_height,
            client_height: *client_height,
        }),
        _ => None,
    }
}

pub fn scroll_to_top(container_id: &str) {
    let _ = document::eval(&format!(
        r#"const el = document.getElementById("{container_id}");
if (el) {{ el.scrollTop = 0; }}"#
    ));
}

fn apply_reaction(reaction: Reaction, container_id: &str, on_bottom_reached: EventHandler<()>) {
    if reaction.scroll_to_top {
        scroll_to_top(container_id);
    }
    if reaction.fetch_more {
        on_bottom_reached.call(());
    }
}

async fn sync_scroll<T: TableRow + 'static>(
    mut model: Signal<TableModel<T>>,
    container_id: String,
    on_bottom_reached: EventHandler<()>,
) {
    let Some(metrics) = read_scroll_metrics(&container_id).await else {
        return;
    };
    let reaction = model.write().dispatch(TableEvent::Scrolled(metrics));
    apply_reaction(reaction, &container_id, on_bottom_reached);
}

/// Headless [`TableModel`] rendered as a scrollable grid.
///
/// The container reports its size and scroll position back to the model and
/// draws whatever [`TableModel::view`] derives. Cells come from
/// `render_cell`, called with the row and the column key.
#[component]
pub fn DataTable<T: TableRow + Clone + PartialEq + 'static>(
    mut model: Signal<TableModel<T>>,
    render_cell: Callback<(T, String), Element>,
    on_bottom_reached: EventHandler<()>,
    #[props(default = DEFAULT_CONTAINER_ID.to_string())] container_id: String,
) -> Element {
    let row_counts = use_memo(move || {
        let stats = model.read().stats();
        (stats.total_rows, stats.filtered_rows)
    });
    let container_id_for_effect = container_id.clone();
    use_effect(move || {
        // Re-check the bottom trigger whenever the row set changes size.
        let _ = row_counts();
        spawn(sync_scroll(
            model,
            container_id_for_effect.clone(),
            on_bottom_reached,
        ));
    });

    let table = model.read();
    let view = table.view();
    let columns = table.columns().to_vec();
    let show_filters = table.config().show_filters;
    let row_height = table.config().row_height;
    let sort_icons: Vec<&'static str> = columns
        .iter()
        .map(|column| sort_icon(table.sort_direction(&column.key)))
        .collect();
    let filter_inputs: Vec<String> = columns
        .iter()
        .map(|column| table.filter_input(&column.key).to_string())
        .collect();
    let rendered: Vec<(RenderedRow, T)> = view
        .rows
        .iter()
        .filter_map(|row| table.row(row.source_index).cloned().map(|item| (*row, item)))
        .collect();
    drop(table);

    let table_width = view.layout.table_width.css();
    let widths = view.layout.widths.clone();
    let scroll_height = view.scroll_height;
    let body_height = view.body_height;
    let measure_rows = matches!(view.mode, RenderMode::Virtual { .. });
    let positioned = matches!(
        view.mode,
        RenderMode::Virtual { .. } | RenderMode::Fallback
    );
    let empty_message = match &view.mode {
        RenderMode::Empty { message } => Some(message.clone()),
        _ => None,
    };

    let container_id_for_mount = container_id.clone();
    let container_id_for_scroll = container_id.clone();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; width: 100%; border: 1px solid #ddd; border-radius: 8px; overflow: hidden;",

            if view.show_stats {
                div {
                    style: "height: 40px; display: flex; align-items: center; padding: 0 12px; background: #f7f9fc; border-bottom: 1px solid #ddd; font-size: 0.9rem; color: #555;",
                    "{view.stats.summary()}"
                }
            }

            div {
                id: "{container_id}",
                style: "height: {scroll_height}px; overflow: auto; position: relative; width: 100%;",
                onmounted: move |event| {
                    let container_id = container_id_for_mount.clone();
                    async move {
                        if let Ok(rect) = event.get_client_rect().await {
                            model.write().dispatch(TableEvent::Resized {
                                width: rect.size.width,
                                height: rect.size.height,
                            });
                        }
                        sync_scroll(model, container_id, on_bottom_reached).await;
                    }
                },
                onresize: move |event| {
                    if let Ok(size) = event.get_border_box_size() {
                        model.write().dispatch(TableEvent::Resized {
                            width: size.width,
                            height: size.height,
                        });
                    }
                },
                onscroll: move |_| {
                    spawn(sync_scroll(
                        model,
                        container_id_for_scroll.clone(),
                        on_bottom_reached,
                    ));
                },

                div {
                    style: "{table_width}",

                    div {
                        style: "display: flex; position: sticky; top: 0; z-index: 2; background: #f5f5f5; border-bottom: 1px solid #ddd; font-weight: 600;",
                        onmounted: move |event| async move {
                            if let Ok(rect) = event.get_client_rect().await {
                                model.write().dispatch(TableEvent::HeaderMeasured {
                                    height: rect.size.height,
                                });
                            }
                        },
                        onresize: move |event| {
                            if let Ok(size) = event.get_border_box_size() {
                                model.write().dispatch(TableEvent::HeaderMeasured {
                                    height: size.height,
                                });
                            }
                        },
                        {columns.iter().enumerate().map(|(idx, column)| {
                            let style = widths.get(idx).map(cell_style).unwrap_or_default();
                            let key_for_sort = column.key.clone();
                            let key_for_input = column.key.clone();
                            let key_for_enter = column.key.clone();
                            let key_for_search = column.key.clone();
                            let key_for_clear = column.key.clone();
                            let sortable = column.sortable;
                            let filterable = column.filterable && show_filters;
                            let icon = sort_icons[idx];
                            let input = filter_inputs[idx].clone();
                            let id_for_sort = container_id.clone();
                            let id_for_enter = container_id.clone();
                            let id_for_search = container_id.clone();
                            let id_for_clear = container_id.clone();
                            let cursor = if sortable { "pointer" } else { "default" };
                            rsx!(
                                div {
                                    key: "{column.key}",
                                    style: "{style} padding-top: 10px; padding-bottom: 10px;",
                                    div {
                                        style: "display: flex; align-items: center; gap: 4px; cursor: {cursor}; user-select: none;",
                                        onclick: move |_| {
                                            if !sortable {
                                                return;
                                            }
                                            let reaction = model.write().dispatch(TableEvent::SortToggled {
                                                column_key: key_for_sort.clone(),
                                            });
                                            apply_reaction(reaction, &id_for_sort, on_bottom_reached);
                                        },
                                        span { "{column.display_name}" }
                                        if sortable {
                                            span { style: "color: #999; font-size: 0.75rem;", "{icon}" }
                                        }
                                    }
                                    if filterable {
                                        div {
                                            style: "display: flex; gap: 4px; margin-top: 6px;",
                                            input {
                                                style: "flex: 1; min-width: 0; padding: 2px 6px; border: 1px solid #ccc; border-radius: 4px; font-weight: normal;",
                                                placeholder: "搜尋",
                                                value: "{input}",
                                                oninput: move |event| {
                                                    model.write().dispatch(TableEvent::FilterDraftChanged {
                                                        column_key: key_for_input.clone(),
                                                        value: event.value(),
                                                    });
                                                },
                                                onkeydown: move |event| {
                                                    if event.key() != Key::Enter {
                                                        return;
                                                    }
                                                    let reaction = model.write().dispatch(TableEvent::FilterSubmitted {
                                                        column_key: key_for_enter.clone(),
                                                    });
                                                    apply_reaction(reaction, &id_for_enter, on_bottom_reached);
                                                },
                                            }
                                            button {
                                                style: "padding: 2px 6px; font-size: 0.75rem;",
                                                onclick: move |_| {
                                                    let reaction = model.write().dispatch(TableEvent::FilterSubmitted {
                                                        column_key: key_for_search.clone(),
                                                    });
                                                    apply_reaction(reaction, &id_for_search, on_bottom_reached);
                                                },
                                                "搜尋"
                                            }
                                            button {
                                                style: "padding: 2px 6px; font-size: 0.75rem;",
                                                onclick: move |_| {
                                                    let reaction = model.write().dispatch(TableEvent::FilterCleared {
                                                        column_key: key_for_clear.clone(),
                                                    });
                                                    apply_reaction(reaction, &id_for_clear, on_bottom_reached);
                                                },
                                                "清除"
                                            }
                                        }
                                    }
                                }
                            )
                        })}
                    }

                    if let Some(message) = empty_message {
                        div {
                            style: "padding: 32px; text-align: center; color: #888;",
                            "{message}"
                        }
                    } else if positioned {
                        div {
                            style: "position: relative; width: 100%; height: {body_height}px;",
                            {rendered.iter().map(|(row, item)| {
                                let position = row.position;
                                let row_key = item.row_key().unwrap_or_else(|| position.to_string());
                                rsx!(
                                    div {
                                        key: "{row_key}",
                                        style: "position: absolute; left: 0; right: 0; top: {row.top}px; min-height: {row_height}px; display: flex; align-items: center; border-bottom: 1px solid #eee; background: #fff;",
                                        onmounted: move |event| async move {
                                            if !measure_rows {
                                                return;
                                            }
                                            if let Ok(rect) = event.get_client_rect().await {
                                                let height = rect.size.height;
                                                if (height - row_height).abs() > 0.5 {
                                                    model.write().dispatch(TableEvent::RowMeasured { position, height });
                                                }
                                            }
                                        },
                                        {row_cells(&columns, &widths, item, render_cell)}
                                    }
                                )
                            })}
                            {view.skeleton_tops.iter().map(|top| rsx!(
                                div {
                                    key: "skeleton-{top}",
                                    style: "position: absolute; left: 0; right: 0; top: {top}px; height: {row_height}px; display: flex; align-items: center; padding: 0 12px; box-sizing: border-box;",
                                    div { style: "height: 16px; width: 100%; background: #eee; border-radius: 4px;" }
                                }
                            ))}
                        }
                    } else {
                        div {
                            {rendered.iter().map(|(row, item)| {
                                let row_key = item.row_key().unwrap_or_else(|| row.position.to_string());
                                rsx!(
                                    div {
                                        key: "{row_key}",
                                        style: "min-height: {row_height}px; display: flex; align-items: center; border-bottom: 1px solid #eee;",
                                        {row_cells(&columns, &widths, item, render_cell)}
                                    }
                                )
                            })}
                        }
                    }
                }
            }
        }
    }
}

fn row_cells<T: Clone + 'static>(
    columns: &[ColumnDef],
    widths: &[ColumnWidth],
    item: &T,
    render_cell: Callback<(T, String), Element>,
) -> Element {
    rsx! {
        {columns.iter().enumerate().map(|(idx, column)| {
            let style = widths.get(idx).map(cell_style).unwrap_or_default();
            let content = render_cell.call((item.clone(), column.key.clone()));
            rsx!(
                div { key: "{column.key}", style: "{style}", {content} }
            )
        })}
    }
}
