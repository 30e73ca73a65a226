use crate::correction::helpers::{COMPLETIONS_PATH, completion_body, start_endpoint};

use client_core::CREDENTIAL_KEY;
use client_core::credential_store::{CredentialStore, FileCredentialStore};
use client_core::error::{SaveCredentialError, StoreError};

use common::ValidationError;

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn store_in(dir: &TempDir) -> (FileCredentialStore, PathBuf) {
    let path = dir.path().join("korektor").join("credentials.json");
    (FileCredentialStore::new(&path), path)
}

/// **VALUE**: Verifies save-then-load round trip through the file, including trimming.
///
/// **WHY THIS MATTERS**: This is the only persisted state. If it does not survive a
/// restart, the user is asked for their key on every launch.
#[test]
fn given_saved_credential_when_new_store_loads_same_file_then_value_survives() {
    // GIVEN: A store in a fresh directory (parent does not exist yet)
    let dir = TempDir::new().expect("temp dir");
    let (store, path) = store_in(&dir);
    assert!(store.load().expect("load succeeds").is_none(), "Nothing saved yet");

    // WHEN: Saving a padded value and reopening the store
    store.save("  sk-abc \n").expect("save succeeds");
    let reopened = FileCredentialStore::new(&path);

    // THEN: The trimmed value is loaded
    let loaded = reopened.load().expect("load succeeds").expect("credential present");
    assert_eq!(loaded.expose(), "sk-abc");
    assert!(reopened.has_credential().expect("load succeeds"));

    // AND: The document uses the fixed key
    let document: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document[CREDENTIAL_KEY], Value::from("sk-abc"));
}

/// **VALUE**: Verifies blank input is rejected and leaves the previous credential intact.
///
/// **BUG THIS CATCHES**: Would catch validation happening after the write, which would
/// replace a working key with an empty one.
#[test]
fn given_existing_credential_when_saving_blank_then_validation_error_and_value_kept() {
    let dir = TempDir::new().expect("temp dir");
    let (store, _) = store_in(&dir);
    store.save("sk-abc").expect("save succeeds");

    for blank in ["", "   "] {
        let result = store.save(blank);
        assert!(
            matches!(
                result,
                Err(SaveCredentialError::Validation(ValidationError::Empty { .. }))
            ),
            "Expected Validation(Empty) for {blank:?}, got {result:?}"
        );
    }

    let loaded = store.load().expect("load succeeds").expect("credential present");
    assert_eq!(loaded.expose(), "sk-abc");
}

#[test]
fn given_existing_credential_when_saving_new_value_then_replaced_wholesale() {
    let dir = TempDir::new().expect("temp dir");
    let (store, path) = store_in(&dir);
    store.save("sk-a-much-longer-first-key").expect("save succeeds");

    store.save("sk-b").expect("save succeeds");

    assert_eq!(store.load().unwrap().unwrap().expose(), "sk-b");
    let temp_name = format!("{}.tmp", path.file_name().unwrap().to_string_lossy());
    assert!(
        !path.with_file_name(temp_name).exists(),
        "Temp file must be renamed away"
    );
}

#[test]
fn given_saved_credential_when_cleared_then_load_returns_none() {
    let dir = TempDir::new().expect("temp dir");
    let (store, path) = store_in(&dir);
    store.save("sk-abc").expect("save succeeds");

    store.clear().expect("clear succeeds");
    store.clear().expect("clearing an empty slot is not an error");

    assert!(!path.exists());
    assert!(store.load().expect("load succeeds").is_none());
}

/// **VALUE**: Verifies corrupt or unexpected documents surface as StoreError, not panics.
///
/// **WHY THIS MATTERS**: The file can be edited by hand or truncated by a crash in
/// another tool. The shell must report it and keep running.
#[test]
fn given_corrupt_document_when_loading_then_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    let (store, path) = store_in(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    for contents in ["{not json", "[1, 2, 3]", r#"{"openai_api_key": 42}"#] {
        fs::write(&path, contents).unwrap();

        let result = store.load();

        assert!(
            matches!(result, Err(StoreError::Parse { .. })),
            "Expected Parse for {contents:?}, got {result:?}"
        );
    }
}

#[test]
fn given_document_with_blank_or_null_value_when_loading_then_none() {
    let dir = TempDir::new().expect("temp dir");
    let (store, path) = store_in(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    for contents in [r#"{"openai_api_key": "  "}"#, r#"{"openai_api_key": null}"#, "{}"] {
        fs::write(&path, contents).unwrap();
        assert!(store.load().expect("load succeeds").is_none(), "{contents}");
    }
}

#[test]
fn given_unreadable_location_when_loading_then_read_error() {
    // GIVEN: The credential path is a directory
    let dir = TempDir::new().expect("temp dir");
    let store = FileCredentialStore::new(dir.path());

    let result = store.load();

    assert!(matches!(result, Err(StoreError::Read { .. })), "got {result:?}");
}

/// **VALUE**: Verifies persistence failures come back as StoreError, not a validation error.
///
/// **WHY THIS MATTERS**: "Enter an API key" would be the wrong notice when the disk is
/// the problem; the user would retype a perfectly good key.
#[test]
fn given_unwritable_location_when_saving_then_store_error() {
    // GIVEN: A parent "directory" that is actually a file
    let dir = TempDir::new().expect("temp dir");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let store = FileCredentialStore::new(blocker.join("credentials.json"));

    let result = store.save("sk-abc");

    assert!(
        matches!(result, Err(SaveCredentialError::Store(StoreError::Write { .. }))),
        "got {result:?}"
    );
}

#[cfg(unix)]
#[test]
fn given_saved_credential_when_inspecting_permissions_then_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("temp dir");
    let (store, path) = store_in(&dir);

    store.save("sk-abc").expect("save succeeds");

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

/// **VALUE**: Verifies a hand-edited value with surrounding whitespace loads trimmed.
///
/// **WHY THIS MATTERS**: `save` always trims, but the file can be edited or seeded by
/// hand. A trailing newline makes the `Authorization` header invalid, the request is
/// never sent, and the user is told the network is down.
///
/// **BUG THIS CATCHES**: Would catch `load` trimming only for the blank check and
/// then wrapping the raw value.
#[tokio::test]
async fn given_hand_edited_value_with_whitespace_when_loaded_then_trimmed_and_usable() {
    // GIVEN: A document whose value carries a trailing newline and leading spaces
    let dir = TempDir::new().expect("temp dir");
    let (store, file_path) = store_in(&dir);
    fs::create_dir_all(file_path.parent().unwrap()).unwrap();
    fs::write(&file_path, format!(r#"{{"{CREDENTIAL_KEY}": "  sk-abc\n"}}"#)).unwrap();

    // AND: An endpoint that only accepts the trimmed bearer value
    let (server, service) = start_endpoint().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer sk-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Gotowe.")))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Loading and correcting with the loaded credential
    let credential = store.load().expect("load succeeds").expect("credential present");
    let result = service.correct("gotowe", &credential).await;

    // THEN: The value is trimmed and the request goes out
    assert_eq!(credential.expose(), "sk-abc");
    assert_eq!(result.expect("correction succeeds"), "Gotowe.");
}

/// **VALUE**: Verifies a failed save leaves no temp file holding the key.
///
/// **WHY THIS MATTERS**: The temp file contains the plaintext key. Leaving it behind
/// after a failed rename keeps a copy on disk the user believes was never written.
#[test]
fn given_rename_fails_when_saving_then_temp_file_removed() {
    // GIVEN: The target path is a non-empty directory, so the rename cannot replace it
    let dir = TempDir::new().expect("temp dir");
    let (store, path) = store_in(&dir);
    fs::create_dir_all(path.join("occupied")).unwrap();

    // WHEN: Saving
    let result = store.save("sk-secret");

    // THEN: The save fails and the temp file is gone
    assert!(
        matches!(result, Err(SaveCredentialError::Store(StoreError::Write { .. }))),
        "got {result:?}"
    );
    let temp_name = format!("{}.tmp", path.file_name().unwrap().to_string_lossy());
    assert!(
        !path.with_file_name(temp_name).exists(),
        "Temp file with the key must not survive a failed save"
    );
}

/// **BUG THIS CATCHES**: Would catch a stale world-readable temp file (left by an
/// older version or a crash) keeping its mode when reused for the next save.
#[cfg(unix)]
#[test]
fn given_stale_readable_temp_file_when_saving_then_result_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("temp dir");
    let (store, path) = store_in(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let temp_path = path.with_file_name(format!(
        "{}.tmp",
        path.file_name().unwrap().to_string_lossy()
    ));
    fs::write(&temp_path, "stale").unwrap();
    fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o644)).unwrap();

    store.save("sk-abc").expect("save succeeds");

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert!(!temp_path.exists());
}
