use importer_core::{ActiveJob, ImportSource, JobRegistry};

fn ids(registry: &JobRegistry) -> Vec<&str> {
    registry.list().iter().map(|entry| entry.id.as_str()).collect()
}

#[test]
fn entries_keep_insertion_order() {
    let mut registry = JobRegistry::new();
    registry.add(ActiveJob::new("a", ImportSource::GoogleDrive));
    registry.add(ActiveJob::new("b", ImportSource::Dropbox));
    registry.add(ActiveJob::new("c", ImportSource::GoogleDrive));

    assert_eq!(ids(&registry), vec!["a", "b", "c"]);
}

#[test]
fn removing_later_job_first_keeps_remaining_order() {
    let mut registry = JobRegistry::new();
    registry.add(ActiveJob::new("a", ImportSource::GoogleDrive));
    registry.add(ActiveJob::new("b", ImportSource::Dropbox));
    registry.add(ActiveJob::new("c", ImportSource::GoogleDrive));

    assert!(registry.remove("b").is_some());
    registry.add(ActiveJob::new("d", ImportSource::Dropbox));
    assert!(registry.remove("a").is_some());

    assert_eq!(ids(&registry), vec!["c", "d"]);
}

#[test]
fn remove_of_unknown_id_is_noop() {
    let mut registry = JobRegistry::new();
    registry.add(ActiveJob::new("a", ImportSource::GoogleDrive));

    assert!(registry.remove("missing").is_none());
    assert!(registry.remove("a").is_some());
    assert!(registry.remove("a").is_none());
    assert!(registry.is_empty());
}

#[test]
fn duplicate_add_is_ignored() {
    let mut registry = JobRegistry::new();
    assert!(registry.add(ActiveJob::new("a", ImportSource::GoogleDrive)));
    assert!(!registry.add(ActiveJob::new("a", ImportSource::Dropbox)));

    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.get("a").map(|entry| entry.source),
        Some(ImportSource::GoogleDrive)
    );
}
