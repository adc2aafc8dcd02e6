use std::path::PathBuf;

use crate::domain::entities::video::{
    Pagination, Video, VideoEdit, VideoId, VideoPage, VideoQuery,
};
use crate::infra::sqlite::queries::{
    count_videos, delete_video, get_video, insert_videos, list_videos, update_video,
};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{RepoError, VideoRepository};

pub struct SqliteVideoRepo {
    pub db_path: PathBuf,
}

impl SqliteVideoRepo {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

impl VideoRepository for SqliteVideoRepo {
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path).map_err(RepoError::from)
    }

    fn list_videos(&self, query: VideoQuery) -> Result<VideoPage, RepoError> {
        let (videos, total) =
            list_videos(&self.db_path, query.offset, query.limit, query.status)?;
        let pagination =
            Pagination::after_fetch(query.offset, videos.len() as i64, query.limit, total);
        Ok(VideoPage { videos, pagination })
    }

    fn get_video(&self, id: &VideoId) -> Result<Option<Video>, RepoError> {
        get_video(&self.db_path, id).map_err(RepoError::from)
    }

    fn insert_videos(&self, videos: &[Video]) -> Result<usize, RepoError> {
        insert_videos(&self.db_path, videos).map_err(RepoError::from)
    }

    fn update_video(&self, id: &VideoId, edit: &VideoEdit) -> Result<Video, RepoError> {
        if edit.title.trim().is_empty() {
            return Err(RepoError::Invalid("標題不可為空".to_string()));
        }
        let edit = VideoEdit {
            title: edit.title.trim().to_string(),
            description: edit.description.trim().to_string(),
            tags: edit.tags.clone(),
        };

        update_video(&self.db_path, id, &edit)?.ok_or_else(|| RepoError::NotFound(id.clone()))
    }

    fn delete_video(&self, id: &VideoId) -> Result<(), RepoError> {
        if delete_video(&self.db_path, id)? {
            Ok(())
        } else {
            Err(RepoError::NotFound(id.clone()))
        }
    }

    fn count_videos(&self) -> Result<i64, RepoError> {
        count_videos(&self.db_path).map_err(RepoError::from)
    }
}
