use diesel::r2d2::ConnectionManager;
use diesel::PgConnection;
use larder::db::DbPool;
use std::time::Duration;

/// Pool pointing at nothing. The endpoints under test never need a live
/// database: preference loads fail closed and scan-history writes are
/// best-effort, so a fast connection timeout keeps the tests snappy.
pub fn unreachable_pool() -> DbPool {
    let manager =
        ConnectionManager::<PgConnection>::new("postgres://localhost:1/unreachable");
    diesel::r2d2::Pool::builder()
        .max_size(1)
        .connection_timeout(Duration::from_millis(100))
        .build_unchecked(manager)
}
