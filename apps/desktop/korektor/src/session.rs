//! The collaborators a shell instance works with.

use crate::state::AppState;

use client_core::clipboard::ClipboardSink;
use client_core::correction::CorrectionService;
use client_core::credential_store::CredentialStore;
use client_core::deep_link::DeepLinkHub;

use std::sync::Arc;

/// Everything a shell command needs, injected at construction.
///
/// Cheap to clone; clones share the same store, clipboard, hub and state.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn CredentialStore>,
    service: CorrectionService,
    clipboard: Arc<dyn ClipboardSink>,
    hub: DeepLinkHub,
    state: AppState,
}

impl Session {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        service: CorrectionService,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Self {
        Self {
            store,
            service,
            clipboard,
            hub: DeepLinkHub::new(),
            state: AppState::new(),
        }
    }

    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    pub fn service(&self) -> &CorrectionService {
        &self.service
    }

    pub fn clipboard(&self) -> &dyn ClipboardSink {
        self.clipboard.as_ref()
    }

    pub fn hub(&self) -> &DeepLinkHub {
        &self.hub
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
