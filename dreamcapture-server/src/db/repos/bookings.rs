//! Bookings repository
//!
//! Owns the bookings table schema and the CRUD statements over it.
//! Concurrent update/delete against the same id relies on per-statement
//! atomicity; there is no version column, so last writer wins.

use sqlx::PgPool;

use crate::models::{Booking, NewBooking};

/// Columns selected for every read, in struct order.
const BOOKING_COLUMNS: &str = "id, name, phone, email, package_type, session_type, \
     date, time, subjects, additional_info, referral, submitted_at";

/// Store error taxonomy.
///
/// Every failure out of the repository classifies into one of these; the
/// HTTP layer maps them to status codes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport/network failure talking to the database. Not retried.
    #[error("database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// A column constraint rejected the data (empty required field,
    /// length bound exceeded).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// No booking with the requested id. Expected, recoverable.
    #[error("booking {id} not found")]
    NotFound { id: i64 },

    /// Structurally invalid argument, rejected before any statement is
    /// issued.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure creating or resetting the table. Fatal at startup.
    #[error("schema error: {0}")]
    Schema(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    /// Classify a driver error.
    ///
    /// NOT NULL (23502), string truncation (22001), and check (23514)
    /// violations become Constraint; everything else is a transport
    /// failure. RowNotFound never reaches this - reads use
    /// `fetch_optional`.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if matches!(db.code().as_deref(), Some("23502" | "22001" | "23514")) {
                return Self::Constraint(db.message().to_owned());
            }
        }
        Self::Connection(err)
    }
}

/// Bookings repository
pub struct BookingRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create the bookings table if absent. Safe to call on every startup.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(250) NOT NULL,
                phone VARCHAR(20) NOT NULL,
                email VARCHAR(100) NOT NULL,
                package_type VARCHAR(50) NOT NULL,
                session_type VARCHAR(50) NOT NULL,
                date DATE NOT NULL,
                time TIME NOT NULL,
                subjects VARCHAR(500),
                additional_info VARCHAR(1000),
                referral VARCHAR(100),
                submitted_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(self.pool)
        .await
        .map_err(StoreError::Schema)?;

        tracing::info!("bookings schema ensured");
        Ok(())
    }

    /// Drop the bookings table. Development mode only - production
    /// startups never call this.
    pub async fn reset_schema(&self) -> Result<(), StoreError> {
        sqlx::query("DROP TABLE IF EXISTS bookings")
            .execute(self.pool)
            .await
            .map_err(StoreError::Schema)?;

        tracing::warn!("bookings table dropped (development reset)");
        Ok(())
    }

    /// Insert a booking and return the persisted record.
    ///
    /// The store assigns the id and the submission timestamp; callers
    /// cannot supply either.
    pub async fn create(&self, booking: &NewBooking) -> Result<Booking, StoreError> {
        let created: Booking = sqlx::query_as(&format!(
            r#"
            INSERT INTO bookings
                (name, phone, email, package_type, session_type, date, time,
                 subjects, additional_info, referral)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(&booking.name)
        .bind(&booking.phone)
        .bind(&booking.email)
        .bind(&booking.package_type)
        .bind(&booking.session_type)
        .bind(booking.date)
        .bind(booking.time)
        .bind(&booking.subjects)
        .bind(&booking.additional_info)
        .bind(&booking.referral)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }

    /// List every booking, ordered by id (insertion order).
    ///
    /// An empty table yields an empty vec, not an error.
    pub async fn list(&self) -> Result<Vec<Booking>, StoreError> {
        let bookings = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(bookings)
    }

    /// Get a single booking by id.
    pub async fn get(&self, id: i64) -> Result<Booking, StoreError> {
        sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StoreError::NotFound { id })
    }

    /// Full-record replace of every mutable field, keyed by id.
    ///
    /// Returns the row as persisted after the update; a concurrent
    /// writer may have replaced it again before the re-read.
    pub async fn update(&self, id: i64, booking: &NewBooking) -> Result<Booking, StoreError> {
        if id == 0 {
            return Err(StoreError::InvalidArgument(format!(
                "invalid id to update: {id}"
            )));
        }

        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET name = $1, phone = $2, email = $3, package_type = $4,
                session_type = $5, date = $6, time = $7, subjects = $8,
                additional_info = $9, referral = $10
            WHERE id = $11
            "#,
        )
        .bind(&booking.name)
        .bind(&booking.phone)
        .bind(&booking.email)
        .bind(&booking.package_type)
        .bind(&booking.session_type)
        .bind(booking.date)
        .bind(booking.time)
        .bind(&booking.subjects)
        .bind(&booking.additional_info)
        .bind(&booking.referral)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        self.get(id).await
    }

    /// Delete the booking with `id`. Deletion is physical.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use sqlx::postgres::PgPoolOptions;

    fn jane_doe() -> NewBooking {
        NewBooking {
            name: "Jane Doe".into(),
            phone: "555-1234".into(),
            email: "jane@example.com".into(),
            package_type: "Gold".into(),
            session_type: "Portrait".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            subjects: Some("Family".into()),
            additional_info: Some(String::new()),
            referral: Some("Instagram".into()),
        }
    }

    #[tokio::test]
    async fn zero_id_update_rejected_before_any_query() {
        // Lazy pool: never connects, so reaching the database would fail.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://unused@localhost/unused")
            .expect("lazy pool");

        let err = BookingRepo::new(&pool)
            .update(0, &jane_doe())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }

    // Integration tests - run against a scratch database:
    // DATABASE_URL=postgres://... cargo test -p dreamcapture-server -- --ignored

    async fn fresh_repo_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        let repo = BookingRepo::new(&pool);
        repo.reset_schema().await.expect("reset failed");
        repo.ensure_schema().await.expect("migrate failed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn create_then_read_echoes_fields() {
        let pool = fresh_repo_pool().await;
        let repo = BookingRepo::new(&pool);

        let created = repo.create(&jane_doe()).await.expect("create failed");
        assert!(created.id > 0);
        assert_eq!(created.name, "Jane Doe");
        assert_eq!(created.package_type, "Gold");
        assert_eq!(created.referral.as_deref(), Some("Instagram"));

        let read = repo.get(created.id).await.expect("get failed");
        assert_eq!(read, created);

        let all = repo.list().await.expect("list failed");
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn list_is_complete_and_ordered_by_id() {
        let pool = fresh_repo_pool().await;
        let repo = BookingRepo::new(&pool);

        assert!(repo.list().await.expect("empty list failed").is_empty());

        let mut ids = Vec::new();
        for n in 0..3 {
            let mut b = jane_doe();
            b.name = format!("Client {n}");
            ids.push(repo.create(&b).await.expect("create failed").id);
        }

        let all = repo.list().await.expect("list failed");
        assert_eq!(all.iter().map(|b| b.id).collect::<Vec<_>>(), ids);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_with_same_values_is_idempotent() {
        let pool = fresh_repo_pool().await;
        let repo = BookingRepo::new(&pool);

        let created = repo.create(&jane_doe()).await.expect("create failed");
        let updated = repo.update(created.id, &jane_doe()).await.expect("update failed");
        assert_eq!(updated, created);
        assert_eq!(repo.get(created.id).await.expect("get failed"), created);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_replaces_all_mutable_fields() {
        let pool = fresh_repo_pool().await;
        let repo = BookingRepo::new(&pool);

        let created = repo.create(&jane_doe()).await.expect("create failed");

        let mut replacement = jane_doe();
        replacement.name = "Jane Smith".into();
        replacement.session_type = "Wedding".into();
        replacement.subjects = None;

        let updated = repo.update(created.id, &replacement).await.expect("update failed");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Jane Smith");
        assert_eq!(updated.session_type, "Wedding");
        assert_eq!(updated.subjects, None);
        // Immutable across updates
        assert_eq!(updated.submitted_at, created.submitted_at);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_id_is_not_found_everywhere() {
        let pool = fresh_repo_pool().await;
        let repo = BookingRepo::new(&pool);

        assert!(matches!(
            repo.get(9999).await.unwrap_err(),
            StoreError::NotFound { id: 9999 }
        ));
        assert!(matches!(
            repo.update(9999, &jane_doe()).await.unwrap_err(),
            StoreError::NotFound { id: 9999 }
        ));
        assert!(matches!(
            repo.delete(9999).await.unwrap_err(),
            StoreError::NotFound { id: 9999 }
        ));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_removes_record() {
        let pool = fresh_repo_pool().await;
        let repo = BookingRepo::new(&pool);

        let created = repo.create(&jane_doe()).await.expect("create failed");
        repo.delete(created.id).await.expect("delete failed");

        let err = repo.get(created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        // Deleted id stays deleted
        let err = repo.delete(created.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ensure_schema_is_idempotent() {
        let pool = fresh_repo_pool().await;
        let repo = BookingRepo::new(&pool);

        let created = repo.create(&jane_doe()).await.expect("create failed");

        // Second call must not error or alter existing data
        repo.ensure_schema().await.expect("second migrate failed");
        assert_eq!(repo.list().await.expect("list failed"), vec![created]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn oversized_field_is_constraint_error() {
        let pool = fresh_repo_pool().await;
        let repo = BookingRepo::new(&pool);

        let mut b = jane_doe();
        b.phone = "5".repeat(21);
        let err = repo.create(&b).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }
}
