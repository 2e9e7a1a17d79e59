use district_toolkit::config::SourceSettings;
use district_toolkit::data::cache::MergedTableCache;
use district_toolkit::data::export::{write_merged_csv, OUTPUT_COLUMNS};
use district_toolkit::data::reference::ReferenceTables;
use district_toolkit::DataMerger;
use std::fs;
use std::path::Path;
use std::rc::Rc;

const HEADER: &str = "행정구역(시군구)별,성별,연령별,2023\n";

fn merger_for(path: &Path) -> DataMerger {
    let settings = SourceSettings {
        path: path.to_path_buf(),
        ..SourceSettings::default()
    };
    DataMerger::new(settings, ReferenceTables::embedded())
}

#[test]
fn test_cache_recomputes_after_source_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("population.csv");
    fs::write(&path, format!("{HEADER}강남구,계,계,1000\n")).unwrap();

    let cache = MergedTableCache::for_merger(merger_for(&path));
    let first = cache.get_or_compute();
    assert_eq!(first.records.len(), 1);
    assert!(!cache.refresh_if_stale());
    assert!(Rc::ptr_eq(&first, &cache.get_or_compute()));

    // Different length guarantees a new fingerprint even on coarse mtime clocks
    fs::write(&path, format!("{HEADER}강남구,계,계,1000\n서초구,계,계,2000\n")).unwrap();
    assert!(cache.refresh_if_stale());
    let second = cache.get_or_compute();

    assert_eq!(second.records.len(), 2);
    assert_eq!(first.records.len(), 1);
    assert_eq!(cache.computations(), 2);
}

#[test]
fn test_cached_failure_is_empty_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let cache = MergedTableCache::for_merger(merger_for(&dir.path().join("missing.csv")));

    let outcome = cache.get_or_compute();
    assert!(outcome.is_empty());
    assert!(outcome.diagnostic.is_some());

    // Still missing, nothing to refresh
    assert!(!cache.refresh_if_stale());
    cache.get_or_compute();
    assert_eq!(cache.computations(), 1);
}

#[test]
fn test_export_round_file() {
    let dir = tempfile::tempdir().unwrap();
    let merged = merger_for(Path::new("tests/data/population_sample.csv"))
        .load_and_process()
        .unwrap();
    let out = dir.path().join("merged.csv");

    write_merged_csv(&out, &merged).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), OUTPUT_COLUMNS.join(","));
    assert_eq!(lines.count(), merged.len());
}
