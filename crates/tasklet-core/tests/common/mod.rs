use tasklet_core::AppBuilder;
use tempfile::TempDir;

/// Helper function to create a test app backed by a fresh database
pub async fn create_test_app() -> (TempDir, tasklet_core::App) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = open_app(&temp_dir).await;
    (temp_dir, app)
}

/// Opens (or reopens) the app whose database lives in `temp_dir`
pub async fn open_app(temp_dir: &TempDir) -> tasklet_core::App {
    let db_path = temp_dir.path().join("test.db");
    AppBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create app")
}
