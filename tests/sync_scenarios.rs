use csv_log_sync::{
    count_rows, create_synced_data, extract_columns, find_sync_point, list_columns, LogSyncError,
    SyncOutcome,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SYNC: &str = " TimeInteractionSubscription";

/// A raw log in the shape recorded by the exoskeleton loggers.
fn raw_log(dir: &Path, name: &str, stamps: &[u64]) -> PathBuf {
    let mut content = format!(
        "Time,{}, JointPositions_1, JointPositions_2, JointTorques_1\n",
        SYNC
    );
    for (i, stamp) in stamps.iter().enumerate() {
        content.push_str(&format!(
            "{:.3},{},{},{},{}\n",
            i as f64 * 0.01,
            stamp,
            i as f64 * 0.5,
            -(i as f64),
            i * 3
        ));
    }
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn columns() -> Vec<String> {
    vec![SYNC.to_string(), " JointPositions_1".to_string()]
}

#[test]
fn extract_then_sync_two_subjects() {
    let dir = TempDir::new().unwrap();
    let raw_a = raw_log(dir.path(), "X2_SRA_A.csv", &[10, 11, 12, 13, 14]);
    let raw_b = raw_log(dir.path(), "X2_SRA_B.csv", &[12, 13, 14]);
    let mod_a = dir.path().join("X2_SRA_A-mod.csv");
    let mod_b = dir.path().join("X2_SRA_B-mod.csv");

    assert_eq!(extract_columns(&raw_a, &mod_a, &columns(), 2).unwrap(), 5);
    assert_eq!(extract_columns(&raw_b, &mod_b, &columns(), 2).unwrap(), 3);
    assert_eq!(list_columns(&mod_a).unwrap(), columns());

    assert_eq!(find_sync_point(&mod_a, &mod_b, SYNC, 2).unwrap().index(), Some(2));

    let outcome = create_synced_data(&mod_a, &mod_b, SYNC, 2).unwrap();
    let report = outcome.report().expect("sync point should exist");
    assert!(report.lengths_match());
    assert_eq!(report.output_a, dir.path().join("X2_SRA_A-mod-sync.csv"));
    assert_eq!(report.output_b, dir.path().join("X2_SRA_B-mod-sync.csv"));

    let synced_a = fs::read_to_string(&report.output_a).unwrap();
    let stamps: Vec<&str> = synced_a
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(stamps, vec!["12", "13", "14"]);
    assert_eq!(
        fs::read_to_string(&report.output_b).unwrap(),
        fs::read_to_string(&mod_b).unwrap()
    );
}

#[test]
fn non_overlapping_logs_produce_no_outputs() {
    let dir = TempDir::new().unwrap();
    let a = raw_log(dir.path(), "a.csv", &[1, 2, 3]);
    let b = raw_log(dir.path(), "b.csv", &[50, 51]);

    let outcome = create_synced_data(&a, &b, SYNC, 10).unwrap();

    assert!(matches!(outcome, SyncOutcome::NoSyncPoint { .. }));
    assert!(!dir.path().join("a-sync.csv").exists());
    assert!(!dir.path().join("b-sync.csv").exists());
}

#[test]
fn synced_outputs_are_reproducible() {
    let dir = TempDir::new().unwrap();
    let a = raw_log(dir.path(), "a.csv", &[5, 6, 7, 8, 9, 10, 11]);
    let b = raw_log(dir.path(), "b.csv", &[8, 9, 10, 11]);

    create_synced_data(&a, &b, SYNC, 3).unwrap();
    let first_a = fs::read(dir.path().join("a-sync.csv")).unwrap();
    let first_b = fs::read(dir.path().join("b-sync.csv")).unwrap();

    create_synced_data(&a, &b, SYNC, 3).unwrap();
    assert_eq!(fs::read(dir.path().join("a-sync.csv")).unwrap(), first_a);
    assert_eq!(fs::read(dir.path().join("b-sync.csv")).unwrap(), first_b);
    assert_eq!(count_rows(dir.path().join("a-sync.csv")).unwrap(), 4);
}

#[test]
fn chunk_size_does_not_change_results() {
    let dir = TempDir::new().unwrap();
    let stamps: Vec<u64> = (1000..1250).collect();
    let a = raw_log(dir.path(), "a.csv", &stamps);
    let b = raw_log(dir.path(), "b.csv", &stamps[173..]);

    for chunk_size in [1, 7, 173, 174, 10_000] {
        let point = find_sync_point(&a, &b, SYNC, chunk_size).unwrap();
        assert_eq!(point.index(), Some(173), "chunk size {}", chunk_size);
    }
}

#[test]
fn unknown_extraction_column_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let raw = raw_log(dir.path(), "raw.csv", &[1, 2]);
    let out = dir.path().join("raw-mod.csv");

    let err = extract_columns(&raw, &out, &["TimeInteractionSubscription".to_string()], 10)
        .unwrap_err();

    assert!(matches!(err, LogSyncError::ColumnNotFound { .. }));
    assert!(!out.exists());
}
