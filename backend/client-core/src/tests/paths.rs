use crate::error::ConfigError;
use crate::paths::{DATA_DIR_ENV, PathSource, detect_data_paths_with};

use std::path::PathBuf;

/// **VALUE**: Verifies the lookup order: override, platform dir, home fallback, error.
///
/// **WHY THIS MATTERS**: The credential file lives under this directory. Picking a
/// different directory on the next launch looks to the user like a lost API key.
#[test]
fn given_data_dir_override_when_detecting_then_override_wins() {
    let paths = detect_data_paths_with(
        |key| (key == DATA_DIR_ENV).then(|| String::from("/tmp/korektor-override")),
        Some(PathBuf::from("/home/user/.config")),
    )
    .expect("override is a valid path");

    assert_eq!(paths.source, PathSource::EnvVar);
    assert_eq!(paths.data_dir, PathBuf::from("/tmp/korektor-override"));
    assert_eq!(
        paths.credential_file,
        PathBuf::from("/tmp/korektor-override/credentials.json")
    );
}

#[test]
fn given_platform_dir_when_detecting_then_app_subdirectory_used() {
    let paths = detect_data_paths_with(|_| None, Some(PathBuf::from("/home/user/.config")))
        .expect("platform dir is available");

    assert_eq!(paths.source, PathSource::PlatformDefault);
    assert_eq!(paths.data_dir, PathBuf::from("/home/user/.config/korektor"));
    assert!(paths.log_dir.starts_with(&paths.data_dir));
}

#[test]
fn given_only_home_when_detecting_then_home_fallback_used() {
    let paths = detect_data_paths_with(
        |key| (key == "HOME").then(|| String::from("/home/user")),
        None,
    )
    .expect("home is available");

    assert_eq!(paths.source, PathSource::HomeFallback);
    assert_eq!(paths.data_dir, PathBuf::from("/home/user/.config/korektor"));
}

#[test]
fn given_nothing_when_detecting_then_directory_not_found() {
    let result = detect_data_paths_with(|_| None, None);

    match result {
        Err(ConfigError::DirectoryNotFound { message, .. }) => {
            assert!(message.contains(DATA_DIR_ENV), "Should tell the user what to set");
        }
        other => panic!("Expected DirectoryNotFound, got {other:?}"),
    }
}
