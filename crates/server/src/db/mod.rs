use std::time::Duration;

use anyhow::bail;
use include_dir::{include_dir, Dir};
use rusqlite::{Connection, OpenFlags};
use rusqlite_migration::{Migrations, SchemaVersion};
use tracing::{debug, instrument, trace};

mod database_connection;
pub use database_connection::*;

static MIGRATIONS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/migrations");

fn sqlite_connection_profiling_callback(query: &str, duration: Duration) {
    trace!(target: "sqlite_profiling", ?duration, query);
}

fn sqlite_connection_trace_callback(query: &str) {
    trace!(target: "sqlite_tracing", query);
}

pub fn get_migrations() -> Result<Migrations<'static>, anyhow::Error> {
    Migrations::from_directory(&MIGRATIONS_DIR)
        .map_err(|e| anyhow::anyhow!("Migrations::from_directory: {e:?}"))
}

#[instrument(skip(conn))]
pub fn configure_new_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    run_pragmas(conn)?;

    if cfg!(debug_assertions) {
        conn.trace(Some(sqlite_connection_trace_callback));
    } else {
        conn.profile(Some(sqlite_connection_profiling_callback));
    }

    Ok(())
}

#[instrument(skip(conn))]
pub fn run_pragmas(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}

fn version_number(version: SchemaVersion) -> Result<usize, anyhow::Error> {
    match version {
        SchemaVersion::Inside(n) => Ok(n.into()),
        SchemaVersion::NoneSet => Ok(0),
        SchemaVersion::Outside(n) => {
            bail!("Schema version {n} is outside of known schema migrations. Manual intervention required")
        },
    }
}

/// Brings the database at `connection_string` up to the latest schema,
/// creating it if needed. Returns the number of migrations that ran.
#[instrument]
pub fn run_migrations(connection_string: &str) -> Result<usize, anyhow::Error> {
    let open_flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
        | OpenFlags::SQLITE_OPEN_CREATE;

    let mut conn = Connection::open_with_flags(connection_string, open_flags)?;
    configure_new_connection(&mut conn)?;

    let migrations = get_migrations()?;

    let initial_version = version_number(migrations.current_version(&conn)?)?;
    debug!(initial_version, "Running migrations");
    migrations.to_latest(&mut conn)?;
    let final_version = version_number(migrations.current_version(&conn)?)?;

    if let Err((_conn, e)) = conn.close() {
        Err(e)?;
    }

    Ok(final_version - initial_version)
}
