use chrono::NaiveDate;

use crate::domain::table::{CellValue, TableRow};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VideoId(pub String);

impl From<&str> for VideoId {
    fn from(value: &str) -> Self {
        VideoId(value.to_string())
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoStatus {
    Pending,
    Published,
    Rejected,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::Pending => "pending",
            VideoStatus::Published => "published",
            VideoStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "pending" => Some(VideoStatus::Pending),
            "published" => Some(VideoStatus::Published),
            "rejected" => Some(VideoStatus::Rejected),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VideoStatus::Pending => "審核中",
            VideoStatus::Published => "已發布",
            VideoStatus::Rejected => "被拒絕",
        }
    }

    pub fn badge_color(&self) -> &'static str {
        match self {
            VideoStatus::Pending => "#f5a524",
            VideoStatus::Published => "#2f9e44",
            VideoStatus::Rejected => "#e03131",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub status: VideoStatus,
    pub upload_date: NaiveDate,
    pub tags: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
    pub views: Option<i64>,
}

impl TableRow for Video {
    fn cell(&self, column_key: &str) -> Option<CellValue> {
        let value = match column_key {
            "id" => CellValue::Text(self.id.0.clone()),
            "title" => CellValue::Text(self.title.clone()),
            "description" => CellValue::Text(self.description.clone()),
            "status" => CellValue::Text(self.status.as_str().to_string()),
            "uploadDate" => CellValue::Date(self.upload_date),
            "tags" => CellValue::List(self.tags.clone()),
            "duration" => self
                .duration
                .clone()
                .map(CellValue::Text)
                .unwrap_or(CellValue::Empty),
            "views" => self
                .views
                .map(|views| CellValue::Number(views as f64))
                .unwrap_or(CellValue::Empty),
            _ => return None,
        };
        Some(value)
    }

    fn row_key(&self) -> Option<String> {
        Some(self.id.0.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoEdit {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl VideoEdit {
    pub fn from_video(video: &Video) -> Self {
        Self {
            title: video.title.clone(),
            description: video.description.clone(),
            tags: video.tags.clone(),
        }
    }

    pub fn tags_input(&self) -> String {
        self.tags.join(", ")
    }
}

pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoQuery {
    pub offset: i64,
    pub limit: i64,
    pub status: Option<VideoStatus>,
}

impl VideoQuery {
    /// `page` is 1-based.
    pub fn page(page: i64, limit: i64) -> Self {
        Self {
            offset: (page.max(1) - 1) * limit,
            limit,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub loaded: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self::after_fetch(0, (page.max(0) * limit).min(total), limit, total)
    }

    pub fn after_fetch(offset: i64, fetched: i64, limit: i64, total: i64) -> Self {
        let loaded = (offset + fetched).min(total).max(0);
        let pages = |rows: i64| if limit > 0 { (rows + limit - 1) / limit } else { 0 };
        Self {
            page: pages(loaded),
            limit,
            total,
            total_pages: pages(total),
            loaded,
        }
    }

    pub fn after_removal(&self) -> Self {
        let total = (self.total - 1).max(0);
        Self::after_fetch(0, (self.loaded - 1).max(0), self.limit, total)
    }

    pub fn has_more(&self) -> bool {
        self.loaded < self.total
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoPage {
    pub videos: Vec<Video>,
    pub pagination: Pagination,
}
