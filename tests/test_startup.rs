//! Startup, on-disk persistence and schema maintenance tests

use chrono::NaiveDate;
use fitjournal::app::{goal_current, master_delete, master_list, strength_insert, strength_list_all};
use fitjournal::config::AppConfig;
use fitjournal::domain::{MasterKind, SortOrder, StrengthExercise};
use fitjournal::infra::{init_db, reset_database, schema_version, SCHEMA_VERSION};
use fitjournal::start;
use tempfile::tempdir;

fn squat() -> StrengthExercise {
    StrengthExercise::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), "Squat", 5, 5, 100.0)
}

#[tokio::test]
async fn start_creates_database_and_seeds() {
    let dir = tempdir().unwrap();
    let config = AppConfig::with_data_dir(dir.path().join("nested"));

    let startup = start(&config).await.unwrap();
    let report = startup.seeding.expect("seeding enabled").await.unwrap().unwrap();

    assert!(config.db_path().exists());
    assert_eq!(report.strength_inserted, 8);
    assert_eq!(master_list(&startup.pool, MasterKind::Strength).unwrap().len(), 8);
    assert_eq!(goal_current(&startup.pool).unwrap(), 3);
}

#[tokio::test]
async fn relaunch_does_not_restore_emptied_catalog() {
    let dir = tempdir().unwrap();
    let config = AppConfig::with_data_dir(dir.path());

    {
        let startup = start(&config).await.unwrap();
        startup.seeding.expect("seeding enabled").await.unwrap().unwrap();
        for m in master_list(&startup.pool, MasterKind::Strength).unwrap() {
            master_delete(&startup.pool, MasterKind::Strength, m.id).unwrap();
        }
    }

    let startup = start(&config).await.unwrap();
    let report = startup.seeding.expect("seeding enabled").await.unwrap().unwrap();
    assert!(report.is_noop());
    assert!(master_list(&startup.pool, MasterKind::Strength).unwrap().is_empty());
    assert_eq!(master_list(&startup.pool, MasterKind::Cardio).unwrap().len(), 8);
}

#[tokio::test]
async fn start_without_seeding_leaves_catalogs_empty() {
    let dir = tempdir().unwrap();
    let config = AppConfig {
        seed_defaults: false,
        log_level: "warn".into(),
        ..AppConfig::with_data_dir(dir.path())
    };

    let startup = start(&config).await.unwrap();
    assert!(startup.seeding.is_none());
    assert!(master_list(&startup.pool, MasterKind::Cardio).unwrap().is_empty());
}

#[test]
fn data_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.db");

    {
        let pool = init_db(&path).unwrap();
        strength_insert(&pool, squat()).unwrap();
    }

    let pool = init_db(&path).unwrap();
    assert_eq!(schema_version(&pool).unwrap(), SCHEMA_VERSION);
    assert_eq!(strength_list_all(&pool, SortOrder::Ascending).unwrap().len(), 1);
}

#[test]
fn reset_empties_every_table() {
    let dir = tempdir().unwrap();
    let pool = init_db(&dir.path().join("journal.db")).unwrap();
    fitjournal::infra::seed_defaults(&pool).unwrap();
    strength_insert(&pool, squat()).unwrap();

    reset_database(&pool).unwrap();

    assert!(strength_list_all(&pool, SortOrder::Ascending).unwrap().is_empty());
    assert!(master_list(&pool, MasterKind::Strength).unwrap().is_empty());
    assert_eq!(schema_version(&pool).unwrap(), SCHEMA_VERSION);
}

#[test]
fn config_file_round_trip_drives_db_path() {
    let dir = tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    let config = AppConfig {
        db_file_name: "lifts.db".into(),
        ..AppConfig::with_data_dir(dir.path())
    };
    config.save(&settings).unwrap();

    let loaded = AppConfig::load(&settings).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.db_path(), dir.path().join("lifts.db"));
}
