//! Region and entry CRUD operations.
//!
//! Regions are created implicitly by the first write into them. Writes
//! replace the whole entry inside one transaction, so a reader sees either
//! the previous response or the new one, never a mix.

use super::connection::CacheDb;
use super::key::CacheKey;
use super::store::{BatchEntry, CachedEntry};
use crate::{Error, Response};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

fn ensure_region(conn: &rusqlite::Connection, name: &str, now: &str) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO regions (name, created_at) VALUES (?1, ?2) ON CONFLICT(name) DO NOTHING",
        params![name, now],
    )
}

fn upsert_entry(
    conn: &rusqlite::Connection, entry: &BatchEntry, headers_json: &str, now: &str,
) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO entries (region, key_hash, url, status, status_text, headers_json, body, stored_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT(region, key_hash) DO UPDATE SET
            url = excluded.url,
            status = excluded.status,
            status_text = excluded.status_text,
            headers_json = excluded.headers_json,
            body = excluded.body,
            stored_at = excluded.stored_at",
        params![
            &entry.region,
            &entry.key.hash,
            &entry.key.url,
            entry.response.status,
            &entry.response.status_text,
            headers_json,
            entry.response.body.as_ref(),
            now,
        ],
    )
}

impl CacheDb {
    /// Create a region if it doesn't exist yet.
    pub async fn create_region(&self, name: &str) -> Result<(), Error> {
        let name = name.to_string();
        let now = chrono::Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                ensure_region(conn, &name, &now)?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or replace the entry for `key` in `region`.
    pub async fn put_entry(&self, region: &str, key: &CacheKey, response: &Response) -> Result<(), Error> {
        self.put_entries(&[BatchEntry { region: region.to_string(), key: key.clone(), response: response.clone() }])
            .await
    }

    /// Write every entry in one transaction: either all of them land or
    /// none do, and entries already in storage are untouched on failure.
    pub async fn put_entries(&self, entries: &[BatchEntry]) -> Result<(), Error> {
        let rows = entries
            .iter()
            .map(|entry| {
                serde_json::to_string(&entry.response.headers)
                    .map(|headers_json| (entry.clone(), headers_json))
                    .map_err(|e| Error::CorruptEntry(format!("{}: failed to encode headers: {e}", entry.key.url)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let now = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction()?;
                for (entry, headers_json) in &rows {
                    ensure_region(&tx, &entry.region, &now)?;
                    upsert_entry(&tx, entry, headers_json, &now)?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Get the entry for `key` in `region`.
    ///
    /// Returns None if either the region or the entry doesn't exist.
    pub async fn get_entry(&self, region: &str, key: &CacheKey) -> Result<Option<CachedEntry>, Error> {
        let region = region.to_string();
        let hash = key.hash.clone();
        self.conn
            .call(move |conn| -> Result<Option<CachedEntry>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT url, status, status_text, headers_json, body, stored_at
                    FROM entries WHERE region = ?1 AND key_hash = ?2",
                )?;

                let row = stmt.query_row(params![region, hash], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, u16>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, Vec<u8>>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                });

                let (url, status, status_text, headers_json, body, stored_at) = match row {
                    Ok(r) => r,
                    Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                    Err(e) => return Err(e.into()),
                };

                let headers: Vec<(String, String)> = serde_json::from_str(&headers_json)
                    .map_err(|e| Error::CorruptEntry(format!("{url}: bad headers: {e}")))?;

                Ok(Some(CachedEntry {
                    url,
                    response: Response { status, status_text, headers, body: body.into() },
                    stored_at,
                }))
            })
            .await
            .map_err(Error::from)
    }

    /// Delete one entry. Returns whether anything was removed.
    pub async fn delete_entry(&self, region: &str, key: &CacheKey) -> Result<bool, Error> {
        let region = region.to_string();
        let hash = key.hash.clone();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let count =
                    conn.execute("DELETE FROM entries WHERE region = ?1 AND key_hash = ?2", params![region, hash])?;
                Ok(count > 0)
            })
            .await
            .map_err(Error::from)
    }

    /// Request URLs stored in a region, sorted.
    pub async fn entry_urls(&self, region: &str) -> Result<Vec<String>, Error> {
        let region = region.to_string();
        self.conn
            .call(move |conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare("SELECT url FROM entries WHERE region = ?1 ORDER BY url")?;
                let urls = stmt
                    .query_map(params![region], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(urls)
            })
            .await
            .map_err(Error::from)
    }

    /// Names of all regions currently in storage, sorted.
    pub async fn region_names(&self) -> Result<Vec<String>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare("SELECT name FROM regions ORDER BY name")?;
                let names = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(names)
            })
            .await
            .map_err(Error::from)
    }

    /// Drop a region and, through the cascade, all of its entries.
    ///
    /// Returns whether the region existed.
    pub async fn drop_region(&self, name: &str) -> Result<bool, Error> {
        let name = name.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let count = conn.execute("DELETE FROM regions WHERE name = ?1", params![name])?;
                Ok(count > 0)
            })
            .await
            .map_err(Error::from)
    }
}
