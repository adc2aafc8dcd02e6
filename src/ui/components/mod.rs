pub mod data_table;
pub mod edit_modal;
pub mod video_table;
