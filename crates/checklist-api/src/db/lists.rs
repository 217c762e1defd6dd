//! List persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `lists` table. Items
//! follow their list through `ON DELETE CASCADE`.

use chrono::NaiveDate;
use sqlx::PgPool;

use checklist_core::list::{COPY_NAME_PREFIX_LEN, COPY_SUFFIX};
use checklist_core::{CountryCode, ListDraft, ListId, ListRecord};

use super::StoreError;

const LIST_COLUMNS: &str = "id, name, start_date, end_date, country";

#[derive(sqlx::FromRow)]
struct ListRow {
    id: i64,
    name: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    country: Option<String>,
}

impl ListRow {
    fn into_record(self) -> Result<ListRecord, StoreError> {
        Ok(ListRecord {
            id: ListId(self.id),
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            country: self
                .country
                .map(CountryCode::try_from)
                .transpose()
                .map_err(|e| StoreError::Sqlx(sqlx::Error::Decode(Box::new(e))))?,
        })
    }
}

fn country_param(draft: &ListDraft) -> Option<&str> {
    draft.country.as_ref().map(CountryCode::as_str)
}

/// All lists, dated lists first by start date descending, then newest first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<ListRecord>, StoreError> {
    let rows = sqlx::query_as::<_, ListRow>(&format!(
        "SELECT {LIST_COLUMNS} FROM lists
         ORDER BY start_date IS NULL, start_date DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(ListRow::into_record).collect()
}

pub async fn find(pool: &PgPool, id: ListId) -> Result<ListRecord, StoreError> {
    sqlx::query_as::<_, ListRow>(&format!("SELECT {LIST_COLUMNS} FROM lists WHERE id = $1"))
        .bind(id.get())
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::ListNotFound(id))?
        .into_record()
}

pub async fn insert(pool: &PgPool, draft: &ListDraft) -> Result<ListRecord, StoreError> {
    let row = sqlx::query_as::<_, ListRow>(&format!(
        "INSERT INTO lists (name, start_date, end_date, country)
         VALUES ($1, $2, $3, $4)
         RETURNING {LIST_COLUMNS}"
    ))
    .bind(&draft.name)
    .bind(draft.dates.start())
    .bind(draft.dates.end())
    .bind(country_param(draft))
    .fetch_one(pool)
    .await?;
    row.into_record()
}

/// Replace every field of list `id`.
pub async fn update(pool: &PgPool, id: ListId, draft: &ListDraft) -> Result<ListRecord, StoreError> {
    sqlx::query_as::<_, ListRow>(&format!(
        "UPDATE lists SET name = $2, start_date = $3, end_date = $4, country = $5
         WHERE id = $1
         RETURNING {LIST_COLUMNS}"
    ))
    .bind(id.get())
    .bind(&draft.name)
    .bind(draft.dates.start())
    .bind(draft.dates.end())
    .bind(country_param(draft))
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::ListNotFound(id))?
    .into_record()
}

pub async fn delete(pool: &PgPool, id: ListId) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM lists WHERE id = $1")
        .bind(id.get())
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::ListNotFound(id));
    }
    Ok(())
}

/// Duplicate list `id` and its items in one transaction.
pub async fn copy(pool: &PgPool, id: ListId) -> Result<ListRecord, StoreError> {
    let mut tx = pool.begin().await?;

    let copy = sqlx::query_as::<_, ListRow>(&format!(
        "INSERT INTO lists (name, start_date, end_date, country)
         SELECT left(name, $3) || $2, start_date, end_date, country FROM lists WHERE id = $1
         RETURNING {LIST_COLUMNS}"
    ))
    .bind(id.get())
    .bind(COPY_SUFFIX)
    .bind(COPY_NAME_PREFIX_LEN as i32)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(StoreError::ListNotFound(id))?;

    let copied = sqlx::query(
        "INSERT INTO items (list_id, label, quantity, checked, sort_order)
         SELECT $2, label, quantity, checked, sort_order FROM items
         WHERE list_id = $1
         ORDER BY sort_order, id",
    )
    .bind(id.get())
    .bind(copy.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::debug!(source = %id, copy = copy.id, items = copied.rows_affected(), "list copied");
    copy.into_record()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: Option<&str>) -> ListRow {
        ListRow {
            id: 1,
            name: "Trip".to_string(),
            start_date: None,
            end_date: None,
            country: country.map(str::to_string),
        }
    }

    #[test]
    fn stored_country_is_parsed() {
        let record = row(Some("FR")).into_record().unwrap();
        assert_eq!(record.country.unwrap().as_str(), "FR");
    }

    #[test]
    fn corrupt_stored_country_is_a_decode_error() {
        let err = row(Some("France")).into_record().unwrap_err();
        assert!(matches!(err, StoreError::Sqlx(sqlx::Error::Decode(_))));
    }
}
