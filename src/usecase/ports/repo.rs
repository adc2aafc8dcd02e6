use crate::domain::entities::video::{Video, VideoEdit, VideoId, VideoPage, VideoQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Message(String),
    NotFound(VideoId),
    Invalid(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::Message(message) => write!(f, "{message}"),
            RepoError::NotFound(id) => write!(f, "找不到影片：{id}"),
            RepoError::Invalid(message) => write!(f, "資料無效：{message}"),
        }
    }
}

impl std::error::Error for RepoError {}

impl From<anyhow::Error> for RepoError {
    fn from(err: anyhow::Error) -> Self {
        RepoError::Message(format!("{err:#}"))
    }
}

pub trait VideoRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    fn list_videos(&self, query: VideoQuery) -> Result<VideoPage, RepoError>;
    fn get_video(&self, id: &VideoId) -> Result<Option<Video>, RepoError>;

    fn insert_videos(&self, videos: &[Video]) -> Result<usize, RepoError>;
    fn update_video(&self, id: &VideoId, edit: &VideoEdit) -> Result<Video, RepoError>;
    fn delete_video(&self, id: &VideoId) -> Result<(), RepoError>;
    fn count_videos(&self) -> Result<i64, RepoError>;
}
