pub mod import_service;
pub mod video_service;
