use encore::config::{AppConfig, ConfigManager};
use encore::models::UserProfile;
use encore::ui::theme::ThemePreference;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("encore=debug")
        .try_init();
}

#[test]
fn test_missing_file_yields_defaults() {
    init_tracing();
    // Arrange
    let dir = tempfile::tempdir().expect("cannot create temp dir");
    let config = ConfigManager::with_path(dir.path().join("config.json"));
    // Act
    let loaded = config.load();
    // Assert
    assert_eq!(loaded, AppConfig::default());
    assert!(!config.path().exists(), "load must not create the file");
}

#[test]
fn test_save_and_load_round_trip() {
    init_tracing();
    // Arrange
    let dir = tempfile::tempdir().expect("cannot create temp dir");
    let config = ConfigManager::with_path(dir.path().join("config.json"));
    let saved = AppConfig {
        theme: ThemePreference::Dark,
        profile: UserProfile {
            nickname: "jisoo".to_string(),
            ..Default::default()
        },
    };
    // Act
    config.save(&saved).expect("save failed");
    // Assert
    assert_eq!(config.load(), saved);
}

#[test]
fn test_set_theme_keeps_profile() {
    init_tracing();
    // Arrange
    let dir = tempfile::tempdir().expect("cannot create temp dir");
    let config = ConfigManager::with_path(dir.path().join("config.json"));
    let profile = UserProfile {
        name: "Jisoo Han".to_string(),
        ..Default::default()
    };
    config.set_profile(&profile).expect("set_profile failed");

    // Act
    config.set_theme(ThemePreference::Dark).expect("set_theme failed");

    // Assert: both edits survive
    let loaded = config.load();
    assert_eq!(loaded.theme, ThemePreference::Dark);
    assert_eq!(loaded.profile.name, "Jisoo Han");
}

#[test]
fn test_save_creates_nested_directories() {
    init_tracing();
    // Arrange
    let dir = tempfile::tempdir().expect("cannot create temp dir");
    let path = dir.path().join("deeply").join("nested").join("config.json");
    let config = ConfigManager::with_path(&path);
    // Act
    config.set_theme(ThemePreference::Dark).expect("set_theme failed");
    // Assert
    assert!(path.exists());
    assert_eq!(config.load().theme, ThemePreference::Dark);
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    init_tracing();
    // Arrange
    let dir = tempfile::tempdir().expect("cannot create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json at all").expect("cannot write file");
    let config = ConfigManager::with_path(&path);
    // Act
    let loaded = config.load();
    // Assert
    assert_eq!(loaded, AppConfig::default());
}
