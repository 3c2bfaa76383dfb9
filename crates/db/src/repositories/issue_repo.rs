//! Repository for the `issues` table.

use async_trait::async_trait;
use campus_core::inventory::StockEntryKind;
use campus_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::ledger::LedgerEntryRepo;
use crate::models::issue::{CreateIssue, Issue, UpdateIssue};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campus_id, product_id, issued_to, quantity, status, \
    issue_date, return_date, notes, created_at, updated_at";

/// Campus-scoped reads and ledger-driven writes for issued items.
pub struct IssueRepo;

impl IssueRepo {
    /// Find an issue by ID within a campus.
    pub async fn find_by_id(
        pool: &PgPool,
        campus_id: DbId,
        id: DbId,
    ) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM issues WHERE id = $1 AND campus_id = $2");
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .bind(campus_id)
            .fetch_optional(pool)
            .await
    }

    /// List issues on a campus, newest first.
    pub async fn list_by_campus(
        pool: &PgPool,
        campus_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Issue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM issues
             WHERE campus_id = $1
             ORDER BY issue_date DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(campus_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}

#[async_trait]
impl LedgerEntryRepo for IssueRepo {
    const KIND: StockEntryKind = StockEntryKind::Issue;

    type Row = Issue;
    type Create = CreateIssue;
    type Update = UpdateIssue;

    async fn insert(
        conn: &mut PgConnection,
        campus_id: DbId,
        input: &CreateIssue,
    ) -> Result<Issue, sqlx::Error> {
        let query = format!(
            "INSERT INTO issues (campus_id, product_id, issued_to, quantity, status, issue_date, notes)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, CURRENT_DATE), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(campus_id)
            .bind(input.product_id)
            .bind(&input.issued_to)
            .bind(input.quantity)
            .bind(
                input
                    .status
                    .as_deref()
                    .unwrap_or(Self::KIND.default_status()),
            )
            .bind(input.issue_date)
            .bind(&input.notes)
            .fetch_one(conn)
            .await
    }

    async fn lock_by_id(
        conn: &mut PgConnection,
        campus_id: DbId,
        id: DbId,
    ) -> Result<Option<Issue>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM issues WHERE id = $1 AND campus_id = $2 FOR UPDATE");
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .bind(campus_id)
            .fetch_optional(conn)
            .await
    }

    /// Moving an issue to `Returned` without a return date stamps today.
    async fn update(
        conn: &mut PgConnection,
        campus_id: DbId,
        id: DbId,
        input: &UpdateIssue,
    ) -> Result<Option<Issue>, sqlx::Error> {
        let query = format!(
            "UPDATE issues SET
                product_id = COALESCE($3, product_id),
                issued_to = COALESCE($4, issued_to),
                quantity = COALESCE($5, quantity),
                status = COALESCE($6, status),
                issue_date = COALESCE($7, issue_date),
                return_date = COALESCE(
                    $8,
                    CASE WHEN $6 = 'Returned' THEN COALESCE(return_date, CURRENT_DATE)
                         ELSE return_date END
                ),
                notes = COALESCE($9, notes)
             WHERE id = $1 AND campus_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Issue>(&query)
            .bind(id)
            .bind(campus_id)
            .bind(input.product_id)
            .bind(&input.issued_to)
            .bind(input.quantity)
            .bind(&input.status)
            .bind(input.issue_date)
            .bind(input.return_date)
            .bind(&input.notes)
            .fetch_optional(conn)
            .await
    }

    async fn delete(
        conn: &mut PgConnection,
        campus_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM issues WHERE id = $1 AND campus_id = $2")
            .bind(id)
            .bind(campus_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
