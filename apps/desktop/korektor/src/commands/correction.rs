use crate::error::KorektorError;
use crate::session::Session;
use crate::state::StateCommand;

use common::Credential;

use log::{debug, info, warn};

/// Replace the input text.
pub async fn set_input(session: &Session, text: impl Into<String>) -> Result<(), KorektorError> {
    session.state().update(StateCommand::SetInput(text.into())).await
}

/// Submit the current input for correction.
///
/// Only one correction runs at a time: a second call while one is in flight
/// fails with [`KorektorError::Busy`] and leaves state untouched. The input is
/// copied at submission, so later input changes do not affect this request.
/// The in-flight flag is cleared on every exit path.
///
/// # Returns
///
/// * `Ok(String)` - The corrected text, also stored as the latest result
/// * `Err(KorektorError)` - The failure; its notice is also stored in state
pub async fn submit_correction(session: &Session) -> Result<String, KorektorError> {
    let _in_flight = session.state().try_begin_correction().ok_or_else(|| {
        warn!("Submit requested while a correction is in flight");
        KorektorError::busy()
    })?;

    let text = session.state().input().await;
    session.state().update(StateCommand::BeginSubmission).await?;

    debug!("Submitting {} chars for correction", text.chars().count());

    match correct_text(session, &text).await {
        Ok(corrected) => {
            session
                .state()
                .update(StateCommand::SetResult(corrected.clone()))
                .await?;
            info!("Correction stored");
            Ok(corrected)
        }
        Err(error) => {
            warn!("Correction failed: {}", error);
            session
                .state()
                .update(StateCommand::SetNotice(error.user_message().to_string()))
                .await?;
            Err(error)
        }
    }
}

/// Correct `text` with the stored credential, without touching shell state.
pub async fn correct_text(session: &Session, text: &str) -> Result<String, KorektorError> {
    let credential = session
        .store()
        .load()?
        .unwrap_or_else(|| Credential::new(String::new()));

    Ok(session.service().correct(text, &credential).await?)
}

/// Reset input, result and notice.
pub async fn clear(session: &Session) -> Result<(), KorektorError> {
    session.state().update(StateCommand::Clear).await
}
