//! Integration Test: ファイルDBに対する並行更新
//!
//! 書き込みはSQLiteが直列化する。並行に更新しても履歴の連鎖が途切れないことを確認する。

use inventory_common::types::LogRange;
use inventory_server::db::migrations::initialize_database;
use inventory_server::AppState;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_keep_log_chain_consistent() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("inventory.db").display());
    let state = AppState::new(initialize_database(&url).await.unwrap());

    state.items.add_item("widget", 0).await.unwrap();

    let mut handles = Vec::new();
    for value in 1..=20i64 {
        let items = state.items.clone();
        handles.push(tokio::spawn(async move {
            items.update_quantity("widget", value).await
        }));
    }
    for handle in handles {
        let updated = handle.await.unwrap().unwrap();
        assert!(updated.logged);
    }

    let logs = state.audit_log.update_logs(&LogRange::all()).await.unwrap();
    assert_eq!(logs.len(), 20);

    // 各履歴の変更前の値は直前の履歴の変更後の値
    assert_eq!(logs[0].old_quantity, 0);
    for pair in logs.windows(2) {
        assert_eq!(pair[1].old_quantity, pair[0].new_quantity);
    }

    let item = state.items.find_item("widget").await.unwrap().unwrap();
    assert_eq!(item.quantity, logs[19].new_quantity);

    state.db_pool.close().await;
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("inventory.db").display());

    {
        let state = AppState::new(initialize_database(&url).await.unwrap());
        state.items.add_item("widget", 3).await.unwrap();
        state.items.update_quantity("widget", 4).await.unwrap();
        state.db_pool.close().await;
    }

    let state = AppState::new(initialize_database(&url).await.unwrap());
    let item = state.items.find_item("widget").await.unwrap().unwrap();
    assert_eq!(item.quantity, 4);
    let logs = state.audit_log.update_logs(&LogRange::all()).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].new_quantity, 4);
    state.db_pool.close().await;
}
