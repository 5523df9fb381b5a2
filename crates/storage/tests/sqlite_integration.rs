use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_round_trips_blobs() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("catemu_leaderboard").await.unwrap(), None);

    repo.set("catemu_leaderboard", br#"[{"userName":"Viajero_1"}]"#)
        .await
        .unwrap();
    let stored = repo.get("catemu_leaderboard").await.unwrap().expect("stored");
    assert_eq!(stored, br#"[{"userName":"Viajero_1"}]"#.to_vec());
}

#[tokio::test]
async fn sqlite_set_overwrites_existing_key() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.set("k", b"one").await.unwrap();
    repo.set("k", b"two").await.unwrap();
    repo.set("other", b"three").await.unwrap();

    assert_eq!(repo.get("k").await.unwrap(), Some(b"two".to_vec()));
    assert_eq!(repo.get("other").await.unwrap(), Some(b"three".to_vec()));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");
}

#[tokio::test]
async fn storage_sqlite_exposes_key_value_store() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.kv.set("k", b"v").await.unwrap();
    assert_eq!(storage.kv.get("k").await.unwrap(), Some(b"v".to_vec()));
}
