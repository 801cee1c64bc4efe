use fog_map::fog::model::{Stroke, StrokeStore};
use fog_map::fog::store::{FileStorage, FogPersistence, KeyValueStorage, MemoryStorage};

fn strokes() -> Vec<Stroke> {
    vec![
        Stroke::reveal(512.5, 300.25, 40.0),
        Stroke::reveal(514.0, 301.0, 40.0),
        Stroke::erase(600.0, 100.0, 12.5),
        Stroke::reveal(-20.0, 4000.0, 40.0),
    ]
}

#[test]
fn load_after_save_returns_identical_history() {
    let mut persistence = FogPersistence::new(MemoryStorage::new());
    let store = StrokeStore::from_strokes(strokes());
    assert!(persistence.save(&store).is_saved());
    assert_eq!(persistence.load().all(), store.all());
}

#[test]
fn history_survives_reload_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    {
        let mut persistence = FogPersistence::new(FileStorage::new(dir.path()));
        persistence.save(&StrokeStore::from_strokes(strokes()));
    }
    let reloaded = FogPersistence::new(FileStorage::new(dir.path())).load();
    assert_eq!(reloaded.all(), strokes().as_slice());
}

#[test]
fn truncated_blob_loads_as_empty() {
    let mut storage = MemoryStorage::new();
    let mut full = FogPersistence::new(MemoryStorage::new());
    full.save(&StrokeStore::from_strokes(strokes()));
    let bytes = full.storage().read("fog_v1").expect("read").expect("blob");
    storage
        .write("fog_v1", &bytes[..bytes.len() / 2])
        .expect("write truncated blob");

    assert!(FogPersistence::new(storage).load().is_empty());
}

#[test]
fn data_under_another_schema_key_is_ignored() {
    let mut storage = MemoryStorage::new();
    storage
        .write("fog_v0", br#"[{"x":1,"y":2,"r":3,"erase":false}]"#)
        .expect("write old blob");
    assert!(FogPersistence::new(storage).load().is_empty());
}
