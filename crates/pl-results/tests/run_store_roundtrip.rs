use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use pl_results::{
    ResultsError, RunManifest, RunStore, RunTiming, SampleRecord, compute_run_id, records_to_csv,
};
use pl_sim::Sample;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn manifest(experiment: &str, v: f64) -> RunManifest {
    let params: BTreeMap<String, f64> = [("v".to_string(), v)].into_iter().collect();
    let timing = RunTiming {
        dt_s: 0.5,
        t_end_s: 1.0,
        steps: 2,
    };
    RunManifest::new(
        compute_run_id(experiment, &params, &timing),
        experiment,
        params,
        timing,
        vec!["t".to_string(), "x".to_string()],
    )
}

fn records() -> Vec<SampleRecord> {
    [0.0, 0.5, 1.0]
        .iter()
        .map(|t| SampleRecord::from(&Sample::new().with("t", *t).with("x", 5.0 * t)))
        .collect()
}

#[test]
fn save_list_load_roundtrip() {
    let root = unique_temp_dir("pl_results_roundtrip");
    let store = RunStore::new(&root).expect("failed to create run store");

    let m = manifest("uniform-motion", 5.0);
    store.save_run(&m, &records()).expect("failed to save run");
    assert!(store.has_run(&m.run_id));

    let runs = store.list_runs(Some("uniform-motion")).expect("failed to list runs");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0], m);
    assert!(chrono::DateTime::parse_from_rfc3339(&runs[0].timestamp).is_ok());

    let loaded = store.load_samples(&m.run_id).expect("failed to load samples");
    assert_eq!(loaded, records());
    assert_eq!(
        records_to_csv(&m.columns, &loaded),
        "t,x\n0,0\n0.5,2.5\n1,5\n"
    );

    let _ = fs::remove_dir_all(root);
}

#[test]
fn list_filters_by_experiment() {
    let root = unique_temp_dir("pl_results_filter");
    let store = RunStore::new(&root).unwrap();
    store.save_run(&manifest("uniform-motion", 1.0), &[]).unwrap();
    store.save_run(&manifest("uniform-motion", 2.0), &[]).unwrap();
    store.save_run(&manifest("free-fall", 1.0), &[]).unwrap();

    assert_eq!(store.list_runs(None).unwrap().len(), 3);
    assert_eq!(store.list_runs(Some("free-fall")).unwrap().len(), 1);
    assert!(store.list_runs(Some("projectile")).unwrap().is_empty());

    let _ = fs::remove_dir_all(root);
}

#[test]
fn delete_and_missing_runs() {
    let root = unique_temp_dir("pl_results_delete");
    let store = RunStore::new(&root).unwrap();
    let m = manifest("free-fall", 3.0);
    store.save_run(&m, &records()).unwrap();

    store.delete_run(&m.run_id).unwrap();
    assert!(!store.has_run(&m.run_id));
    assert!(matches!(
        store.load_manifest(&m.run_id),
        Err(ResultsError::RunNotFound { .. })
    ));
    assert!(matches!(
        store.load_samples("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
    // Deleting twice is fine.
    store.delete_run(&m.run_id).unwrap();

    let _ = fs::remove_dir_all(root);
}
