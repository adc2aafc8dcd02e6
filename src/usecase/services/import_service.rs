use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::domain::entities::video::{Video, VideoId};
use crate::infra::import::csv::read_videos_csv;
use crate::usecase::ports::repo::{RepoError, VideoRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub row_count: usize,
}

pub struct ImportService {
    repo: Arc<dyn VideoRepository>,
}

impl ImportService {
    pub fn new(repo: Arc<dyn VideoRepository>) -> Self {
        Self { repo }
    }

    pub fn import_csv(&self, path: &Path) -> Result<ImportResult, RepoError> {
        let parsed = read_videos_csv(path)?;

        let mut taken: HashSet<VideoId> = parsed.iter().filter_map(|row| row.id.clone()).collect();
        let mut next_number = self.repo.count_videos()? + 1;
        let mut videos: Vec<Video> = Vec::with_capacity(parsed.len());

        for row in parsed {
            let id = match row.id.clone() {
                Some(id) => id,
                None => loop {
                    let candidate = VideoId(format!("video-{next_number}"));
                    next_number += 1;
                    if !taken.contains(&candidate) && self.repo.get_video(&candidate)?.is_none() {
                        taken.insert(candidate.clone());
                        break candidate;
                    }
                },
            };
            videos.push(row.into_video(id));
        }

        let row_count = self.repo.insert_videos(&videos)?;
        info!(path = %path.display(), row_count, "imported videos from csv");
        Ok(ImportResult { row_count })
    }
}
