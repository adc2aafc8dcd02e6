use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::video::{Pagination, Video, VideoEdit, VideoId, VideoPage, VideoQuery};
use crate::usecase::ports::repo::{RepoError, VideoRepository};

pub struct VideoManagementService {
    repo: Arc<dyn VideoRepository>,
    page_size: i64,
}

impl VideoManagementService {
    pub fn new(repo: Arc<dyn VideoRepository>, page_size: i64) -> Self {
        Self {
            repo,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self, page: i64) -> Result<VideoPage, RepoError> {
        self.fetch(VideoQuery::page(page, self.page_size))
    }

    fn fetch(&self, query: VideoQuery) -> Result<VideoPage, RepoError> {
        let result = self.repo.list_videos(query)?;
        debug!(
            offset = query.offset,
            page = result.pagination.page,
            rows = result.videos.len(),
            total = result.pagination.total,
            "loaded video page"
        );
        Ok(result)
    }

    pub fn first_page(&self) -> Result<VideoPage, RepoError> {
        self.page(1)
    }

    /// Continues after the `loaded` rows the caller already holds.
    pub fn next_page(
        &self,
        loaded: usize,
        current: &Pagination,
    ) -> Result<Option<VideoPage>, RepoError> {
        let offset = loaded as i64;
        if offset >= current.total {
            return Ok(None);
        }
        self.fetch(VideoQuery {
            offset,
            limit: self.page_size,
            status: None,
        })
        .map(Some)
    }

    pub fn update_video(&self, id: &VideoId, edit: &VideoEdit) -> Result<Video, RepoError> {
        if edit.title.trim().is_empty() {
            return Err(RepoError::Invalid("標題不可為空".to_string()));
        }
        let video = self.repo.update_video(id, edit)?;
        info!(id = %id, tags = video.tags.len(), "updated video");
        Ok(video)
    }

    pub fn delete_video(&self, id: &VideoId) -> Result<(), RepoError> {
        self.repo.delete_video(id)?;
        info!(id = %id, "deleted video");
        Ok(())
    }
}
