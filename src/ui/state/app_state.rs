use dioxus::prelude::{use_hook, use_signal, Signal};

use crate::domain::entities::video::{Pagination, Video};
use crate::domain::table::{ConfigError, TableModel};
use crate::ui::components::video_table::video_table_model;

pub struct AppState {
    pub table: Signal<TableModel<Video>>,
    pub pagination: Signal<Option<Pagination>>,
    pub is_loading: Signal<bool>,
    pub editing: Signal<Option<Video>>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Result<Self, ConfigError> {
        let table = use_hook(|| video_table_model().map(Signal::new))?;
        Ok(Self {
            table,
            pagination: use_signal(|| None::<Pagination>),
            is_loading: use_signal(|| false),
            editing: use_signal(|| None::<Video>),
            busy: use_signal(|| false),
            status: use_signal(|| "就緒".to_string()),
        })
    }
}
