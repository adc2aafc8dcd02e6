use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, types::Value, Connection, OptionalExtension};

use crate::domain::entities::video::{Video, VideoEdit, VideoId, VideoStatus};
use crate::infra::sqlite::schema::open_connection;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const VIDEO_COLUMNS: &str =
    "id, title, description, status, upload_date, thumbnail_url, duration, views";

struct VideoRecord {
    id: String,
    title: String,
    description: String,
    status: String,
    upload_date: String,
    thumbnail_url: Option<String>,
    duration: Option<String>,
    views: Option<i64>,
}

fn read_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<VideoRecord> {
    Ok(VideoRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: row.get(3)?,
        upload_date: row.get(4)?,
        thumbnail_url: row.get(5)?,
        duration: row.get(6)?,
        views: row.get(7)?,
    })
}

fn into_video(record: VideoRecord, tags: Vec<String>) -> Result<Video> {
    let status = VideoStatus::parse(&record.status)
        .ok_or_else(|| anyhow!("invalid status for {}: {}", record.id, record.status))?;
    let upload_date = NaiveDate::parse_from_str(&record.upload_date, DATE_FORMAT)
        .with_context(|| format!("invalid upload_date for {}: {}", record.id, record.upload_date))?;

    Ok(Video {
        id: VideoId(record.id),
        title: record.title,
        description: record.description,
        status,
        upload_date,
        tags,
        thumbnail_url: record.thumbnail_url,
        duration: record.duration,
        views: record.views,
    })
}

fn load_tags(conn: &Connection, ids: &[String]) -> Result<HashMap<String, Vec<String>>> {
    let mut tags: HashMap<String, Vec<String>> = HashMap::new();
    if ids.is_empty() {
        return Ok(tags);
    }

    let placeholders = vec!["?"; ids.len()].join(",");
    let sql = format!(
        "SELECT video_id, tag
         FROM video_tag
         WHERE video_id IN ({placeholders})
         ORDER BY video_id ASC, tag_idx ASC"
    );
    let mut stmt = conn.prepare(&sql).context("failed to prepare tag query")?;
    let mut rows = stmt
        .query(rusqlite::params_from_iter(ids.iter()))
        .context("failed to run tag query")?;

    while let Some(row) = rows.next().context("failed to read tag row")? {
        let video_id: String = row.get(0).context("failed to read video_id")?;
        let tag: String = row.get(1).context("failed to read tag")?;
        tags.entry(video_id).or_default().push(tag);
    }

    Ok(tags)
}

fn hydrate(conn: &Connection, records: Vec<VideoRecord>) -> Result<Vec<Video>> {
    let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
    let mut tags = load_tags(conn, &ids)?;
    records
        .into_iter()
        .map(|record| {
            let video_tags = tags.remove(&record.id).unwrap_or_default();
            into_video(record, video_tags)
        })
        .collect()
}

fn write_tags(tx: &rusqlite::Transaction<'_>, video_id: &str, tags: &[String]) -> Result<()> {
    tx.execute("DELETE FROM video_tag WHERE video_id = ?1", [video_id])
        .with_context(|| format!("failed to clear tags of {video_id}"))?;

    let mut insert_tag = tx
        .prepare("INSERT INTO video_tag(video_id, tag_idx, tag) VALUES (?1, ?2, ?3)")
        .context("failed to prepare tag insert")?;
    for (tag_idx, tag) in tags.iter().enumerate() {
        insert_tag
            .execute(params![video_id, tag_idx as i64, tag])
            .context("failed to insert tag")?;
    }

    Ok(())
}

/// Page of videos in insertion order plus the filtered total.
pub fn list_videos(
    db_path: &Path,
    offset: i64,
    limit: i64,
    status: Option<VideoStatus>,
) -> Result<(Vec<Video>, i64)> {
    if limit <= 0 {
        anyhow::bail!("limit must be greater than zero")
    }

    let conn = open_connection(db_path)?;

    let mut where_sql = String::new();
    let mut filter_params = Vec::<Value>::new();
    if let Some(status) = status {
        where_sql.push_str("WHERE status = ?");
        filter_params.push(Value::Text(status.as_str().to_string()));
    }

    let total: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM video {where_sql}"),
            rusqlite::params_from_iter(filter_params.iter().cloned()),
            |row| row.get(0),
        )
        .context("failed to count videos")?;

    let mut row_params = filter_params;
    row_params.push(Value::Integer(limit));
    row_params.push(Value::Integer(offset.max(0)));

    let mut stmt = conn
        .prepare(&format!(
            "SELECT {VIDEO_COLUMNS}
             FROM video {where_sql}
             ORDER BY position ASC
             LIMIT ? OFFSET ?"
        ))
        .context("failed to prepare video page query")?;
    let records = stmt
        .query_map(rusqlite::params_from_iter(row_params), read_record)
        .context("failed to query video page")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect video page")?;
    drop(stmt);

    let videos = hydrate(&conn, records)?;
    Ok((videos, total))
}

pub fn get_video(db_path: &Path, id: &VideoId) -> Result<Option<Video>> {
    let conn = open_connection(db_path)?;
    let record = conn
        .query_row(
            &format!("SELECT {VIDEO_COLUMNS} FROM video WHERE id = ?1"),
            [&id.0],
            read_record,
        )
        .optional()
        .with_context(|| format!("failed to load video {id}"))?;

    match record {
        Some(record) => Ok(hydrate(&conn, vec![record])?.pop()),
        None => Ok(None),
    }
}

pub fn count_videos(db_path: &Path) -> Result<i64> {
    let conn = open_connection(db_path)?;
    conn.query_row("SELECT COUNT(*) FROM video", [], |row| row.get(0))
        .context("failed to count videos")
}

pub fn insert_videos(db_path: &Path, videos: &[Video]) -> Result<usize> {
    let mut conn = open_connection(db_path)?;
    let tx = conn.transaction().context("failed to start transaction")?;

    let mut position: i64 = tx
        .query_row("SELECT COALESCE(MAX(position), -1) FROM video", [], |row| {
            row.get(0)
        })
        .context("failed to read last position")?;

    {
        let mut insert_video = tx
            .prepare(
                "INSERT INTO video(id, position, title, description, status, upload_date,
                                   thumbnail_url, duration, views)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .context("failed to prepare video insert")?;

        for video in videos {
            position += 1;
            insert_video
                .execute(params![
                    video.id.0,
                    position,
                    video.title,
                    video.description,
                    video.status.as_str(),
                    video.upload_date.format(DATE_FORMAT).to_string(),
                    video.thumbnail_url,
                    video.duration,
                    video.views,
                ])
                .with_context(|| format!("failed to insert video {}", video.id))?;
            write_tags(&tx, &video.id.0, &video.tags)?;
        }
    }

    tx.commit().context("failed to commit video insert")?;
    Ok(videos.len())
}

/// Returns `None` when no video has the id.
pub fn update_video(db_path: &Path, id: &VideoId, edit: &VideoEdit) -> Result<Option<Video>> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start update transaction")?;

    let changed = tx
        .execute(
            "UPDATE video
             SET title = ?1, description = ?2, updated_at = CURRENT_TIMESTAMP
             WHERE id = ?3",
            params![edit.title, edit.description, id.0],
        )
        .with_context(|| format!("failed to update video {id}"))?;
    if changed == 0 {
        return Ok(None);
    }
    write_tags(&tx, &id.0, &edit.tags)?;
    tx.commit().context("failed to commit update transaction")?;

    get_video(db_path, id)
}

/// Returns `false` when no video had the id.
pub fn delete_video(db_path: &Path, id: &VideoId) -> Result<bool> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start delete transaction")?;
    tx.execute("DELETE FROM video_tag WHERE video_id = ?1", [&id.0])
        .with_context(|| format!("failed to delete tags of {id}"))?;
    let deleted = tx
        .execute("DELETE FROM video WHERE id = ?1", [&id.0])
        .with_context(|| format!("failed to delete video {id}"))?;
    tx.commit().context("failed to commit delete transaction")?;
    Ok(deleted > 0)
}
