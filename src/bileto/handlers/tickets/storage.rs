//! Database access for tickets.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::Instrument;
use utoipa::ToSchema;
use uuid::Uuid;

/// A stored support ticket.
#[derive(ToSchema, Serialize, Debug, Clone)]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub description: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}

fn ticket_from_row(row: &PgRow) -> Ticket {
    Ticket {
        id: row.get::<Uuid, _>("id").to_string(),
        subject: row.get("subject"),
        description: row.get("description"),
        priority: row.get("priority"),
        created_at: row.get("created_at"),
    }
}

pub(super) async fn insert_ticket(
    pool: &PgPool,
    subject: &str,
    description: &str,
    priority: &str,
) -> Result<Ticket> {
    let query = r"
        INSERT INTO tickets (subject, description, priority)
        VALUES ($1, $2, $3)
        RETURNING id, subject, description, priority, created_at
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(subject)
        .bind(description)
        .bind(priority)
        .fetch_one(pool)
        .instrument(span)
        .await
        .context("failed to insert ticket")?;

    Ok(ticket_from_row(&row))
}

/// All tickets, newest first.
pub(super) async fn list_all_tickets(pool: &PgPool) -> Result<Vec<Ticket>> {
    let query = r"
        SELECT id, subject, description, priority, created_at
        FROM tickets
        ORDER BY created_at DESC
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let rows = sqlx::query(query)
        .fetch_all(pool)
        .instrument(span)
        .await
        .context("failed to list tickets")?;

    Ok(rows.iter().map(ticket_from_row).collect())
}

pub(super) async fn get_ticket_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Ticket>> {
    let query = r"
        SELECT id, subject, description, priority, created_at
        FROM tickets
        WHERE id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch ticket")?;

    Ok(row.map(|row| ticket_from_row(&row)))
}
