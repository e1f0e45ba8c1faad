use chrono::DateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Result, Row};
use shutterbox_domain::{AssetId, ImageAsset, UploadStatus};

const ASSET_COLUMNS: &str =
    "id, image_data, thumbnail_data, source_uri, created_at, is_uploaded";

pub fn insert_asset(conn: &Connection, asset: &ImageAsset) -> Result<()> {
    conn.execute(
        "INSERT INTO assets (id, image_data, thumbnail_data, source_uri, created_at, is_uploaded)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            asset.id.as_str(),
            asset.image_data,
            asset.thumbnail_data,
            asset.source_uri,
            asset.created_at.timestamp_micros(),
            asset.upload_status.is_uploaded(),
        ],
    )?;
    Ok(())
}

pub fn list_assets(conn: &Connection) -> Result<Vec<ImageAsset>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ASSET_COLUMNS}
         FROM assets
         ORDER BY created_at DESC, seq DESC"
    ))?;
    let rows = stmt.query_map([], asset_from_row)?;
    rows.collect()
}

pub fn find_asset(conn: &Connection, asset_id: &str) -> Result<Option<ImageAsset>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ASSET_COLUMNS}
         FROM assets
         WHERE id = ?1"
    ))?;
    let mut rows = stmt.query(params![asset_id])?;
    match rows.next()? {
        Some(row) => asset_from_row(row).map(Some),
        None => Ok(None),
    }
}

/// SQLite counts matched rows, so re-marking an uploaded asset still reports 1.
pub fn mark_uploaded(conn: &Connection, asset_id: &str) -> Result<usize> {
    conn.execute(
        "UPDATE assets SET is_uploaded = 1 WHERE id = ?1",
        params![asset_id],
    )
}

pub fn delete_asset(conn: &Connection, asset_id: &str) -> Result<usize> {
    conn.execute("DELETE FROM assets WHERE id = ?1", params![asset_id])
}

pub fn delete_all(conn: &mut Connection) -> Result<usize> {
    let tx = conn.transaction()?;
    let removed = tx.execute("DELETE FROM assets", [])?;
    tx.commit()?;
    Ok(removed)
}

fn asset_from_row(row: &Row<'_>) -> Result<ImageAsset> {
    let id_value: String = row.get(0)?;
    let id = AssetId::parse(&id_value)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(error)))?;

    let created_at_micros: i64 = row.get(4)?;
    let created_at = DateTime::from_timestamp_micros(created_at_micros).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Integer,
            format!("timestamp out of range: {created_at_micros}").into(),
        )
    })?;

    let is_uploaded: bool = row.get(5)?;
    Ok(ImageAsset {
        id,
        image_data: row.get(1)?,
        thumbnail_data: row.get(2)?,
        source_uri: row.get(3)?,
        created_at,
        upload_status: UploadStatus::from_flag(is_uploaded),
    })
}
