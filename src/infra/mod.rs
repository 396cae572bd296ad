//! Infrastructure: SQLite connection, migrations, change bus, default data.

pub mod db;
pub mod seed;

pub(crate) use db::read_date;
pub use db::{
    get_connection, init_db, reset_database, run_blocking, schema_version, DbPool, Table,
    SCHEMA_VERSION,
};
pub use seed::{seed_defaults, spawn_seed, SeedReport, CARDIO_DEFAULTS, STRENGTH_DEFAULTS};
