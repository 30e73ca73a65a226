use client_core::credential_store::{CredentialStore, InMemoryCredentialStore};
use client_core::error::SaveCredentialError;

use std::sync::Arc;

/// **VALUE**: Verifies the in-memory store honours the same contract as the file store.
///
/// **WHY THIS MATTERS**: Shell tests substitute this store for the real one. If its
/// semantics drift, those tests stop proving anything about production behaviour.
#[test]
fn given_in_memory_store_when_saving_and_loading_then_contract_holds() {
    let store = InMemoryCredentialStore::new();
    assert!(store.load().unwrap().is_none());

    assert!(matches!(store.save(""), Err(SaveCredentialError::Validation(_))));
    assert!(matches!(store.save("   "), Err(SaveCredentialError::Validation(_))));
    assert!(store.load().unwrap().is_none(), "Rejected save must not write");

    let saved = store.save("sk-abc").expect("save succeeds");
    assert_eq!(saved.expose(), "sk-abc");
    assert_eq!(store.load().unwrap().unwrap().expose(), "sk-abc");

    store.clear().unwrap();
    assert!(!store.has_credential().unwrap());
}

#[test]
fn given_shared_store_when_used_through_trait_object_then_writes_are_visible() {
    let store: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::with_credential("sk-old"));
    let other = Arc::clone(&store);

    other.save("sk-new").expect("save succeeds");

    assert_eq!(store.load().unwrap().unwrap().expose(), "sk-new");
}
