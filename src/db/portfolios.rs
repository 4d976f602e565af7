// src/db/portfolios.rs
use crate::errors::ServerError;
use crate::store::SavedPortfolio;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub fn upsert_portfolio(conn: &Connection, portfolio: &SavedPortfolio) -> Result<(), ServerError> {
    let zpids = serde_json::to_string(&portfolio.zpids)
        .map_err(|e| ServerError::DbError(format!("Failed to encode zpids: {e}")))?;

    conn.execute(
        r#"
        INSERT INTO portfolios (name, zpids, saved_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(name) DO UPDATE SET
            zpids = excluded.zpids,
            saved_at = excluded.saved_at
        "#,
        params![portfolio.name, zpids, portfolio.saved_at],
    )
    .map_err(|e| ServerError::DbError(format!("Failed to save portfolio: {e}")))?;

    Ok(())
}

pub fn get_portfolio(conn: &Connection, name: &str) -> Result<Option<SavedPortfolio>, ServerError> {
    conn.query_row(
        "SELECT name, zpids, saved_at FROM portfolios WHERE name = ?",
        params![name],
        read_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("Failed to load portfolio: {e}")))?
    .map(decode)
    .transpose()
}

/// Most recently saved first.
pub fn list_portfolios(conn: &Connection) -> Result<Vec<SavedPortfolio>, ServerError> {
    let mut stmt = conn
        .prepare("SELECT name, zpids, saved_at FROM portfolios ORDER BY saved_at DESC, name ASC")
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], read_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(decode(r.map_err(|e| ServerError::DbError(e.to_string()))?)?);
    }
    Ok(out)
}

pub fn delete_portfolio(conn: &Connection, name: &str) -> Result<bool, ServerError> {
    let removed = conn
        .execute("DELETE FROM portfolios WHERE name = ?", params![name])
        .map_err(|e| ServerError::DbError(format!("Failed to delete portfolio: {e}")))?;
    Ok(removed > 0)
}

type PortfolioRow = (String, String, DateTime<Utc>);

fn read_row(row: &Row<'_>) -> rusqlite::Result<PortfolioRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn decode((name, zpids, saved_at): PortfolioRow) -> Result<SavedPortfolio, ServerError> {
    let zpids: Vec<String> = serde_json::from_str(&zpids)
        .map_err(|e| ServerError::DbError(format!("Corrupt zpids for {name}: {e}")))?;

    Ok(SavedPortfolio {
        name,
        zpids,
        saved_at,
    })
}
