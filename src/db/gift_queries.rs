use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{Gift, GiftWithInvestment};

const GIFT_COLUMNS: &str = "id, child_id, contributor_id, contributor_name, contributor_email, \
                            investment_id, amount, shares, status, message, video_url, \
                            approved_at, rejected_at, viewed_at, created_at";

pub async fn insert(conn: &mut PgConnection, input: Gift) -> Result<Gift, sqlx::Error> {
    sqlx::query_as::<_, Gift>(&format!(
        "INSERT INTO gifts ({GIFT_COLUMNS})
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
         RETURNING {GIFT_COLUMNS}"
    ))
    .bind(input.id)
    .bind(input.child_id)
    .bind(input.contributor_id)
    .bind(input.contributor_name)
    .bind(input.contributor_email)
    .bind(input.investment_id)
    .bind(input.amount)
    .bind(input.shares)
    .bind(input.status)
    .bind(input.message)
    .bind(input.video_url)
    .bind(input.approved_at)
    .bind(input.rejected_at)
    .bind(input.viewed_at)
    .bind(input.created_at)
    .fetch_one(&mut *conn)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Gift>, sqlx::Error> {
    sqlx::query_as::<_, Gift>(&format!(
        "SELECT {GIFT_COLUMNS} FROM gifts WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_for_child(
    pool: &PgPool,
    child_id: Uuid,
) -> Result<Vec<GiftWithInvestment>, sqlx::Error> {
    sqlx::query_as::<_, GiftWithInvestment>(
        "SELECT g.id, g.child_id, g.contributor_id, g.contributor_name, g.contributor_email,
                g.investment_id, g.amount, g.shares, g.status, g.message, g.video_url,
                g.approved_at, g.rejected_at, g.viewed_at, g.created_at,
                i.symbol, i.name AS investment_name, i.investment_type, i.current_price
         FROM gifts g
         JOIN investments i ON i.id = g.investment_id
         WHERE g.child_id = $1
         ORDER BY g.created_at DESC",
    )
    .bind(child_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_for_contributor(
    pool: &PgPool,
    contributor_id: Uuid,
) -> Result<Vec<GiftWithInvestment>, sqlx::Error> {
    sqlx::query_as::<_, GiftWithInvestment>(
        "SELECT g.id, g.child_id, g.contributor_id, g.contributor_name, g.contributor_email,
                g.investment_id, g.amount, g.shares, g.status, g.message, g.video_url,
                g.approved_at, g.rejected_at, g.viewed_at, g.created_at,
                i.symbol, i.name AS investment_name, i.investment_type, i.current_price
         FROM gifts g
         JOIN investments i ON i.id = g.investment_id
         WHERE g.contributor_id = $1
         ORDER BY g.created_at DESC",
    )
    .bind(contributor_id)
    .fetch_all(pool)
    .await
}

// The status guard makes decisions single-shot: a gift that is no longer
// pending matches zero rows and the caller sees None.
pub async fn mark_approved(conn: &mut PgConnection, id: Uuid) -> Result<Option<Gift>, sqlx::Error> {
    sqlx::query_as::<_, Gift>(&format!(
        "UPDATE gifts
         SET status = 'approved', approved_at = now()
         WHERE id = $1 AND status = 'pending'
         RETURNING {GIFT_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn mark_rejected(conn: &mut PgConnection, id: Uuid) -> Result<Option<Gift>, sqlx::Error> {
    sqlx::query_as::<_, Gift>(&format!(
        "UPDATE gifts
         SET status = 'rejected', rejected_at = now()
         WHERE id = $1 AND status = 'pending'
         RETURNING {GIFT_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

// Keeps the first view timestamp; replaying the video does not move it.
pub async fn mark_viewed(pool: &PgPool, id: Uuid) -> Result<Option<Gift>, sqlx::Error> {
    sqlx::query_as::<_, Gift>(&format!(
        "UPDATE gifts
         SET viewed_at = COALESCE(viewed_at, now())
         WHERE id = $1
         RETURNING {GIFT_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

// Claims guest gifts left under this email before the contributor signed up.
pub async fn adopt_guest_gifts(
    pool: &PgPool,
    contributor_id: Uuid,
    email: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE gifts
         SET contributor_id = $1
         WHERE contributor_email = $2 AND contributor_id IS NULL",
    )
    .bind(contributor_id)
    .bind(email)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
