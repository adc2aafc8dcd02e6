use std::sync::Arc;

use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::entities::video::{Pagination, Video, VideoEdit};
use crate::domain::table::{TableEvent, TableModel};
use crate::infra::sqlite::repo::SqliteVideoRepo;
use crate::ui::components::data_table::{scroll_to_top, DEFAULT_CONTAINER_ID};
use crate::ui::components::edit_modal::EditVideoModal;
use crate::ui::components::video_table::VideoTable;
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::repo::{RepoError, VideoRepository};
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::video_service::VideoManagementService;

fn replace_rows(mut table: Signal<TableModel<Video>>, rows: Vec<Video>) {
    let reaction = table.write().dispatch(TableEvent::RowsReplaced(rows));
    if reaction.scroll_to_top {
        scroll_to_top(DEFAULT_CONTAINER_ID);
    }
}

fn reload_first_page(
    service: &VideoManagementService,
    table: Signal<TableModel<Video>>,
    mut pagination: Signal<Option<Pagination>>,
) -> Result<Pagination, RepoError> {
    let page = service.first_page()?;
    pagination.set(Some(page.pagination));
    replace_rows(table, page.videos);
    Ok(page.pagination)
}

fn set_loading(mut is_loading: Signal<bool>, mut table: Signal<TableModel<Video>>, loading: bool) {
    is_loading.set(loading);
    table.write().dispatch(TableEvent::LoadingChanged(loading));
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();

    let AppState {
        mut table,
        mut pagination,
        is_loading,
        mut editing,
        mut busy,
        mut status,
    } = match AppState::new() {
        Ok(state) => state,
        Err(err) => {
            return rsx! {
                div {
                    p { "表格設定錯誤：{err}" }
                }
            };
        }
    };

    let filters_shown = use_memo(move || table.read().config().show_filters);
    let loaded_rows = use_memo(move || table.read().rows().len());

    let repo = Arc::new(SqliteVideoRepo::new(config.db_path.clone()));
    let video_service = Arc::new(VideoManagementService::new(
        repo.clone(),
        config.page_size,
    ));
    let import_service = Arc::new(ImportService::new(repo.clone()));

    let repo_for_init = repo.clone();
    let service_for_init = video_service.clone();
    use_effect(move || {
        *busy.write() = true;
        let result = repo_for_init
            .init()
            .and_then(|_| reload_first_page(&service_for_init, table, pagination));
        match result {
            Ok(loaded) => {
                info!(total = loaded.total, "loaded videos");
                *status.write() = "就緒".to_string();
            }
            Err(err) => {
                warn!("failed to load videos: {err}");
                *status.write() = format!("載入資料失敗：{err}");
            }
        }
        *busy.write() = false;
    });

    let service_for_more = video_service.clone();
    let on_load_more = move |_: ()| {
        if is_loading() {
            return;
        }
        let Some(current) = pagination() else {
            return;
        };
        if !current.has_more() {
            return;
        }

        let loaded = table.read().rows().len();
        set_loading(is_loading, table, true);
        match service_for_more.next_page(loaded, &current) {
            Ok(Some(next)) => {
                pagination.set(Some(next.pagination));
                table
                    .write()
                    .dispatch(TableEvent::RowsAppended(next.videos));
            }
            Ok(None) => {}
            Err(err) => {
                warn!("failed to load more videos: {err}");
                *status.write() = format!("載入資料失敗：{err}");
            }
        }
        set_loading(is_loading, table, false);
    };

    let service_for_save = video_service.clone();
    let on_save = move |edit: VideoEdit| {
        let Some(video) = editing() else {
            return;
        };
        match service_for_save.update_video(&video.id, &edit) {
            Ok(updated) => {
                let rows: Vec<Video> = table
                    .read()
                    .rows()
                    .iter()
                    .map(|row| {
                        if row.id == updated.id {
                            updated.clone()
                        } else {
                            row.clone()
                        }
                    })
                    .collect();
                replace_rows(table, rows);
                editing.set(None);
                *status.write() = format!("已更新「{}」", updated.title);
            }
            Err(err) => {
                warn!("failed to update video {}: {err}", video.id);
                *status.write() = format!("更新失敗：{err}");
            }
        }
    };

    let service_for_delete = video_service.clone();
    let on_delete = move |video: Video| {
        let confirmed = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("確認刪除")
            .set_description(format!("確定要刪除「{}」嗎？此動作不可復原。", video.title))
            .set_buttons(MessageButtons::YesNo)
            .show();
        if confirmed != MessageDialogResult::Yes {
            return;
        }

        match service_for_delete.delete_video(&video.id) {
            Ok(()) => {
                let rows: Vec<Video> = table
                    .read()
                    .rows()
                    .iter()
                    .filter(|row| row.id != video.id)
                    .cloned()
                    .collect();
                replace_rows(table, rows);
                let remaining = pagination().map(|page| page.after_removal());
                pagination.set(remaining);
                *status.write() = format!("已刪除「{}」", video.title);
            }
            Err(err) => {
                warn!("failed to delete video {}: {err}", video.id);
                *status.write() = format!("刪除失敗：{err}");
            }
        }
    };

    let service_for_import = video_service.clone();
    let on_import = move |_: MouseEvent| {
        if busy() {
            return;
        }

        let Some(file_path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .pick_file()
        else {
            *status.write() = "已取消匯入".to_string();
            return;
        };

        *busy.write() = true;
        *status.write() = format!("正在匯入 {}", file_path.display());
        let result = import_service.import_csv(&file_path).and_then(|imported| {
            reload_first_page(&service_for_import, table, pagination).map(|_| imported)
        });
        match result {
            Ok(imported) => {
                *status.write() = format!("已匯入 {} 筆影片", imported.row_count);
            }
            Err(err) => {
                warn!("failed to import {}: {err}", file_path.display());
                *status.write() = format!("匯入失敗：{err}");
            }
        }
        *busy.write() = false;
    };

    let filters_shown = filters_shown();
    let loaded_rows = loaded_rows();
    let total_rows = pagination().map(|page| page.total).unwrap_or(0);
    let filter_button_label = if filters_shown { "隱藏篩選" } else { "顯示篩選" };

    rsx! {
        div {
            style: "padding: 16px; font-family: sans-serif; display: flex; flex-direction: column; gap: 12px;",
            h2 { style: "margin: 0;", "影片管理" }
            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",
                button {
                    disabled: busy(),
                    onclick: on_import,
                    "匯入 CSV"
                }
                button {
                    onclick: move |_| {
                        let reaction = table
                            .write()
                            .dispatch(TableEvent::ShowFiltersChanged(!filters_shown));
                        if reaction.scroll_to_top {
                            scroll_to_top(DEFAULT_CONTAINER_ID);
                        }
                    },
                    "{filter_button_label}"
                }
                span { style: "color: #666;", "已載入 {loaded_rows} / {total_rows} 筆" }
                span { style: "color: #666;", "{status}" }
            }

            VideoTable {
                model: table,
                on_edit: move |video: Video| editing.set(Some(video)),
                on_delete,
                on_load_more,
            }

            if let Some(video) = editing() {
                EditVideoModal {
                    key: "{video.id}",
                    video,
                    on_cancel: move |_| editing.set(None),
                    on_save,
                }
            }
        }
    }
}
