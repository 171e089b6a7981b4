// ==========================================
// ImportApi 端到端测试
// ==========================================
// 测试目标: 验证 API 层装配与错误映射
// ==========================================


use pilot_csv_importer::api::{ApiError, ImportApi};
use pilot_csv_importer::logging;
use std::sync::Arc;
use test_helpers::{
    create_test_app_root, create_test_db, write_roster_csv, FailingFetcher, MessengerLog,
    RecordingMessenger, StubFetcher,
};

#[tokio::test]
async fn test_import_roster_with_assembles_full_pipeline() {
    logging::init_test();

    let (_db_file, db_path) = create_test_db().expect("Failed to create test db");
    let app_root = create_test_app_root();
    write_roster_csv(
        app_root.path(),
        "name,callsign,heat\nAlice,AL1,1\nBob,BO2,1\n",
    );

    let api = ImportApi::new(db_path, app_root.path());
    let log = Arc::new(MessengerLog::default());
    let response = api
        .import_roster_with(
            Box::new(FailingFetcher),
            Box::new(RecordingMessenger(log.clone())),
        )
        .await
        .expect("Import should succeed");

    assert_eq!(response.total_rows, 2);
    assert_eq!(response.pilots_created, 2);
    assert_eq!(response.heats_created, 1);
    assert_eq!(response.slots_assigned, 2);
    assert!(response.overflows.is_empty());
    assert!(!response.run_id.is_empty());
    assert!(response.elapsed_ms >= 0);
    assert_eq!(log.notification_count(), 1);
}

#[tokio::test]
async fn test_second_run_maps_duplicate_class_to_import_failed() {
    logging::init_test();

    let (_db_file, db_path) = create_test_db().unwrap();
    let app_root = create_test_app_root();
    write_roster_csv(app_root.path(), "name,callsign,heat\nAlice,AL1,1\n");

    let api = ImportApi::new(db_path, app_root.path());
    let log = Arc::new(MessengerLog::default());
    api.import_roster_with(
        Box::new(FailingFetcher),
        Box::new(RecordingMessenger(log.clone())),
    )
    .await
    .unwrap();

    // 第二次运行赛级名称冲突
    let result = api
        .import_roster_with(
            Box::new(FailingFetcher),
            Box::new(RecordingMessenger(log.clone())),
        )
        .await;
    assert!(matches!(result, Err(ApiError::ImportFailed(_))));
    assert_eq!(log.alert_count(), 1);
}

#[tokio::test]
async fn test_response_serializes_to_json() {
    logging::init_test();

    let (_db_file, db_path) = create_test_db().unwrap();
    let app_root = create_test_app_root();
    write_roster_csv(app_root.path(), "name,callsign,heat\nAlice,AL1,1\n");

    let api = ImportApi::new(db_path, app_root.path());
    let response = api
        .import_roster_with(
            Box::new(StubFetcher::new(b"")),
            Box::new(pilot_csv_importer::host::LogMessenger),
        )
        .await
        .unwrap();

    let json = serde_json::to_string(&response).expect("Response should serialize");
    assert!(json.contains("\"total_rows\":1"));
    assert!(json.contains("\"pilots_created\":1"));
}
