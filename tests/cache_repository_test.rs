// ==========================================
// 命名缓存仓储集成测试
// ==========================================
// 测试范围:
// 1. SQLite 文件存储: 跨连接持久化, 整体替换
// 2. 缓存键格式 (_V1 后缀)
// 3. 损坏/缺失内容按空集合处理
// ==========================================


use facility_ops::domain::{Branch, WorkOrder};
use facility_ops::repository::{
    CacheName, CacheStore, CollectionRepository, InMemoryCacheStore, Repositories,
    SqliteCacheStore,
};
use facility_ops::{Priority, WorkOrderType};
use rusqlite::params;
use std::sync::Arc;
use test_helpers::*;

#[test]
fn test_sqlite_缓存跨连接持久化() {
    let (_temp, db_path) = create_test_db().unwrap();
    let orders = vec![
        work_order("WO-1", Priority::High, WorkOrderType::Ppm, dt(2026, 3, 1, 8), date(2026, 3, 10)),
        work_order("WO-2", Priority::Low, WorkOrderType::Reactive, dt(2026, 3, 2, 8), date(2026, 3, 12)),
    ];

    {
        let store: Arc<dyn CacheStore> = Arc::new(SqliteCacheStore::new(&db_path).unwrap());
        let repos = Repositories::new(store);
        repos.work_orders.put_all(&orders).unwrap();
    }

    let store: Arc<dyn CacheStore> = Arc::new(SqliteCacheStore::new(&db_path).unwrap());
    let repos = Repositories::new(store);
    assert_eq!(repos.work_orders.get_all().unwrap(), orders);
    // 其他缓存未写入
    assert!(repos.branches.get_all().unwrap().is_empty());
}

#[test]
fn test_put_all_整体替换() {
    let store: Arc<dyn CacheStore> = Arc::new(InMemoryCacheStore::new());
    let repo: CollectionRepository<Branch> =
        CollectionRepository::new(store, CacheName::Branches);

    repo.put_all(&[branch("B1"), branch("B2"), branch("B3")]).unwrap();
    repo.put_all(&[branch("B9")]).unwrap();

    let all = repo.get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "B9");
}

#[test]
fn test_缓存键与_json_格式() {
    let (_temp, db_path) = create_test_db().unwrap();
    let store = Arc::new(SqliteCacheStore::new(&db_path).unwrap());
    let repos = Repositories::new(store);
    repos
        .work_orders
        .put_all(&[work_order(
            "WO-1",
            Priority::Critical,
            WorkOrderType::Reactive,
            dt(2026, 3, 1, 8),
            date(2026, 3, 10),
        )])
        .unwrap();

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let payload: String = conn
        .query_row(
            "SELECT payload FROM cache_entry WHERE cache_key = ?1",
            params!["work_orders_V1"],
            |row| row.get(0),
        )
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    let first = &json[0];
    assert_eq!(first["id"], "WO-1");
    assert_eq!(first["assetId"], "A1");
    assert_eq!(first["dueDate"], "2026-03-10");
    assert!(first.get("workOrderType").is_some());
}

#[test]
fn test_损坏内容按空集合处理() {
    let (_temp, db_path) = create_test_db().unwrap();
    let store = SqliteCacheStore::new(&db_path).unwrap();
    store
        .write_raw(CacheName::WorkOrders, "{not json")
        .unwrap();

    let repo: CollectionRepository<WorkOrder> =
        CollectionRepository::new(Arc::new(store), CacheName::WorkOrders);
    assert!(repo.get_all().unwrap().is_empty());

    // 写入后恢复正常
    repo.put_all(&[]).unwrap();
    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn test_clear_后读取为空() {
    let store = Arc::new(InMemoryCacheStore::new());
    let repos = Repositories::new(store.clone());
    repos.branches.put_all(&[branch("B1")]).unwrap();
    assert_eq!(repos.branches.get_all().unwrap().len(), 1);

    store.clear(CacheName::Branches).unwrap();
    assert!(repos.branches.get_all().unwrap().is_empty());
}
