use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use csv::StringRecord;

use crate::domain::entities::video::{Video, VideoId, VideoStatus};
use crate::infra::sqlite::queries::DATE_FORMAT;

/// One parsed CSV line. `id` is `None` when the file left it blank.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvVideo {
    pub id: Option<VideoId>,
    pub title: String,
    pub description: String,
    pub status: VideoStatus,
    pub upload_date: NaiveDate,
    pub tags: Vec<String>,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
    pub views: Option<i64>,
}

impl CsvVideo {
    pub fn into_video(self, id: VideoId) -> Video {
        Video {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            upload_date: self.upload_date,
            tags: self.tags,
            thumbnail_url: self.thumbnail_url,
            duration: self.duration,
            views: self.views,
        }
    }
}

struct HeaderIndex {
    id: Option<usize>,
    title: usize,
    description: Option<usize>,
    status: Option<usize>,
    upload_date: Option<usize>,
    tags: Option<usize>,
    thumbnail_url: Option<usize>,
    duration: Option<usize>,
    views: Option<usize>,
}

impl HeaderIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };

        Ok(Self {
            id: find("id"),
            title: find("title").ok_or_else(|| anyhow!("csv header `title` is required"))?,
            description: find("description"),
            status: find("status"),
            upload_date: find("upload_date"),
            tags: find("tags"),
            thumbnail_url: find("thumbnail_url"),
            duration: find("duration"),
            views: find("views"),
        })
    }
}

fn field<'r>(record: &'r StringRecord, idx: Option<usize>) -> &'r str {
    idx.and_then(|idx| record.get(idx)).unwrap_or("").trim()
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_record(record: &StringRecord, index: &HeaderIndex, line: usize) -> Result<CsvVideo> {
    let title = field(record, Some(index.title));
    if title.is_empty() {
        anyhow::bail!("line {line}: title is required")
    }

    let status = match field(record, index.status) {
        "" => VideoStatus::Pending,
        raw => VideoStatus::parse(raw)
            .ok_or_else(|| anyhow!("line {line}: unknown status `{raw}`"))?,
    };

    let upload_date = match field(record, index.upload_date) {
        "" => Local::now().date_naive(),
        raw => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .with_context(|| format!("line {line}: invalid upload_date `{raw}`"))?,
    };

    let views = match field(record, index.views) {
        "" => None,
        raw => Some(
            raw.parse::<i64>()
                .with_context(|| format!("line {line}: invalid views `{raw}`"))?,
        ),
    };

    let tags = field(record, index.tags)
        .split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    Ok(CsvVideo {
        id: optional(field(record, index.id)).map(VideoId),
        title: title.to_string(),
        description: field(record, index.description).to_string(),
        status,
        upload_date,
        tags,
        thumbnail_url: optional(field(record, index.thumbnail_url)),
        duration: optional(field(record, index.duration)),
        views,
    })
}

pub fn read_videos_csv(csv_path: &Path) -> Result<Vec<CsvVideo>> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }
    let index = HeaderIndex::from_headers(&headers)?;

    let mut videos = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.context("failed to parse csv record")?;
        // Header is line 1.
        videos.push(parse_record(&record, &index, row_idx + 2)?);
    }

    Ok(videos)
}
