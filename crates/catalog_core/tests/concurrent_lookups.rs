use catalog_core::db::migrations::latest_version;
use catalog_core::db::open_db;
use catalog_core::{CategoryLookup, CategoryLookupService, CategoryStore, SqliteCategoryStore};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn callers_on_separate_connections_see_the_same_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteCategoryStore::try_new(&conn).unwrap();
        for name in ["Antibiotics", "antiseptic", "Painkillers", "Vitamins"] {
            store.create_category(name).unwrap();
        }
    }

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let path = path.clone();
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                let store = SqliteCategoryStore::try_new(&conn).unwrap();
                let service = CategoryLookupService::new(store);
                let mut observations = Vec::new();
                for _ in 0..25 {
                    observations.push((
                        service.exists_by_name("Vitamins").unwrap(),
                        service.search_by_name_fragment("anti").unwrap().len(),
                        service.get_by_name("vitamins").unwrap().is_none(),
                    ));
                }
                observations
            })
        })
        .collect();

    for worker in workers {
        for observation in worker.join().unwrap() {
            assert_eq!(observation, (true, 2, true));
        }
    }
}

#[test]
fn concurrent_first_opens_migrate_a_new_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.db");
    let barrier = Arc::new(Barrier::new(6));

    let openers: Vec<_> = (0..6)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let conn = open_db(&path).unwrap();
                conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
                    .unwrap()
            })
        })
        .collect();

    for opener in openers {
        assert_eq!(opener.join().unwrap(), latest_version());
    }

    let conn = open_db(&path).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'categories';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
}
