use dioxus::prelude::*;

use crate::domain::entities::video::Video;
use crate::domain::table::{ColumnDef, ConfigError, TableConfig, TableModel};
use crate::ui::components::data_table::DataTable;

pub const ACTIONS_COLUMN: &str = "actions";
const VISIBLE_TAGS: usize = 2;

pub fn video_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("title", "標題").sortable().filterable().width(200.0),
        ColumnDef::new("description", "描述").filterable().width(300.0),
        ColumnDef::new("status", "狀態").sortable().filterable().width(120.0),
        ColumnDef::new("uploadDate", "上傳日期")
            .sortable()
            .filterable()
            .width(120.0),
        ColumnDef::new("tags", "標籤").filterable().width(150.0),
        ColumnDef::new(ACTIONS_COLUMN, "操作").width(100.0),
    ]
}

pub fn video_table_model() -> Result<TableModel<Video>, ConfigError> {
    TableModel::new(video_columns(), TableConfig::default())
}

fn render_video_cell(
    video: &Video,
    column_key: &str,
    on_edit: EventHandler<Video>,
    on_delete: EventHandler<Video>,
) -> Element {
    match column_key {
        "title" => rsx! {
            span { style: "font-weight: 500;", "{video.title}" }
        },
        "description" => rsx! {
            span {
                style: "display: block; color: #555; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;",
                title: "{video.description}",
                "{video.description}"
            }
        },
        "status" => {
            let color = video.status.badge_color();
            rsx! {
                span {
                    style: "display: inline-block; padding: 2px 10px; border-radius: 12px; font-size: 0.8rem; color: #fff; background: {color};",
                    "{video.status.label()}"
                }
            }
        }
        "uploadDate" => {
            let date = video.upload_date.format("%Y-%m-%d").to_string();
            rsx! { span { "{date}" } }
        }
        "tags" => {
            let hidden = video.tags.len().saturating_sub(VISIBLE_TAGS);
            rsx! {
                div {
                    style: "display: flex; gap: 4px; flex-wrap: nowrap; overflow: hidden;",
                    {video.tags.iter().take(VISIBLE_TAGS).map(|tag| rsx!(
                        span {
                            key: "{tag}",
                            style: "padding: 1px 8px; border: 1px solid #ccc; border-radius: 10px; font-size: 0.75rem; white-space: nowrap;",
                            "{tag}"
                        }
                    ))}
                    if hidden > 0 {
                        span { style: "font-size: 0.75rem; color: #888;", "+{hidden}" }
                    }
                }
            }
        }
        ACTIONS_COLUMN => {
            let for_edit = video.clone();
            let for_delete = video.clone();
            rsx! {
                div {
                    style: "display: flex; gap: 6px;",
                    button {
                        title: "編輯",
                        onclick: move |_| on_edit.call(for_edit.clone()),
                        "✎"
                    }
                    button {
                        title: "刪除",
                        style: "color: #e03131;",
                        onclick: move |_| on_delete.call(for_delete.clone()),
                        "🗑"
                    }
                }
            }
        }
        _ => rsx! {},
    }
}

#[component]
pub fn VideoTable(
    model: Signal<TableModel<Video>>,
    on_edit: EventHandler<Video>,
    on_delete: EventHandler<Video>,
    on_load_more: EventHandler<()>,
) -> Element {
    let render_cell = use_callback(move |(video, column_key): (Video, String)| {
        render_video_cell(&video, &column_key, on_edit, on_delete)
    });

    rsx! {
        DataTable::<Video> {
            model,
            render_cell,
            on_bottom_reached: on_load_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::config::validate_columns;

    #[test]
    fn video_columns_are_valid_and_keep_actions_inert() {
        let columns = video_columns();

        assert!(validate_columns(&columns).is_ok());
        let actions = columns
            .iter()
            .find(|column| column.key == ACTIONS_COLUMN)
            .expect("actions column");
        assert!(!actions.sortable && !actions.filterable);
        assert!(video_table_model().is_ok());
    }
}
