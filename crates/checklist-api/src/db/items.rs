//! Item persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `items` table.

use sqlx::PgPool;

use checklist_core::{ItemId, ItemPatch, ItemRecord, ListId, NewItem, ReorderPlan};

use super::StoreError;

const ITEM_COLUMNS: &str = "id, list_id, label, quantity, checked, sort_order";

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    list_id: i64,
    label: String,
    quantity: i32,
    checked: bool,
    sort_order: i32,
}

impl From<ItemRow> for ItemRecord {
    fn from(row: ItemRow) -> Self {
        Self {
            id: ItemId(row.id),
            list_id: ListId(row.list_id),
            label: row.label,
            quantity: row.quantity,
            checked: row.checked,
            sort_order: row.sort_order,
        }
    }
}

pub async fn list_for(pool: &PgPool, list_id: ListId) -> Result<Vec<ItemRecord>, StoreError> {
    let rows = sqlx::query_as::<_, ItemRow>(&format!(
        "SELECT {ITEM_COLUMNS} FROM items WHERE list_id = $1 ORDER BY sort_order, id"
    ))
    .bind(list_id.get())
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ItemRecord::from).collect())
}

/// Append an item after the current last item of the list.
pub async fn insert(pool: &PgPool, list_id: ListId, item: &NewItem) -> Result<ItemRecord, StoreError> {
    let result = sqlx::query_as::<_, ItemRow>(&format!(
        "INSERT INTO items (list_id, label, quantity, sort_order)
         VALUES ($1, $2, $3,
                 (SELECT COALESCE(MAX(sort_order) + 1, 0) FROM items WHERE list_id = $1))
         RETURNING {ITEM_COLUMNS}"
    ))
    .bind(list_id.get())
    .bind(&item.label)
    .bind(item.quantity)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => Ok(row.into()),
        Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
            Err(StoreError::ListNotFound(list_id))
        }
        Err(e) => Err(e.into()),
    }
}

/// Apply the fields present in `patch`; absent fields keep their value.
pub async fn update(pool: &PgPool, id: ItemId, patch: &ItemPatch) -> Result<ItemRecord, StoreError> {
    let row = sqlx::query_as::<_, ItemRow>(&format!(
        "UPDATE items SET
             checked  = COALESCE($2, checked),
             quantity = COALESCE($3, quantity),
             label    = COALESCE($4, label)
         WHERE id = $1
         RETURNING {ITEM_COLUMNS}"
    ))
    .bind(id.get())
    .bind(patch.checked)
    .bind(patch.quantity)
    .bind(patch.label.as_deref())
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::ItemNotFound(id))?;
    Ok(row.into())
}

pub async fn delete(pool: &PgPool, id: ItemId) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM items WHERE id = $1")
        .bind(id.get())
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::ItemNotFound(id));
    }
    Ok(())
}

/// Write positions `0..n` for the requested order in one transaction.
///
/// The list row and its item rows are locked while the request is checked
/// against the current item set.
pub async fn reorder(
    pool: &PgPool,
    list_id: ListId,
    order: &[ItemId],
) -> Result<Vec<ItemRecord>, StoreError> {
    let mut tx = pool.begin().await?;

    sqlx::query_scalar::<_, i64>("SELECT id FROM lists WHERE id = $1 FOR UPDATE")
        .bind(list_id.get())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::ListNotFound(list_id))?;

    let current: Vec<ItemId> =
        sqlx::query_scalar::<_, i64>("SELECT id FROM items WHERE list_id = $1 FOR UPDATE")
            .bind(list_id.get())
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .map(ItemId)
            .collect();

    let plan = ReorderPlan::new(&current, order)?;
    let (ids, positions): (Vec<i64>, Vec<i32>) =
        plan.positions().map(|(id, pos)| (id.get(), pos)).unzip();

    sqlx::query(
        "UPDATE items AS i SET sort_order = p.pos
         FROM UNNEST($1::bigint[], $2::int[]) AS p(id, pos)
         WHERE i.id = p.id AND i.list_id = $3",
    )
    .bind(&ids)
    .bind(&positions)
    .bind(list_id.get())
    .execute(&mut *tx)
    .await?;

    let rows = sqlx::query_as::<_, ItemRow>(&format!(
        "SELECT {ITEM_COLUMNS} FROM items WHERE list_id = $1 ORDER BY sort_order, id"
    ))
    .bind(list_id.get())
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(rows.into_iter().map(ItemRecord::from).collect())
}
