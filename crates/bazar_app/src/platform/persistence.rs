use std::path::PathBuf;

use bazar_logging::{bazar_error, bazar_info, bazar_warn};
use listing_core::{AuthCollaborator, CurrentUser};
use listing_engine::{AtomicFileWriter, PersistError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SESSION_FILENAME: &str = ".campus_bazar_session.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    user: CurrentUser,
}

#[derive(Debug, Error)]
pub(crate) enum SessionError {
    #[error("could not encode session: {0}")]
    Encode(#[from] ron::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Signed-in user, kept in a small RON file between runs.
pub(crate) struct AuthSessionStore {
    writer: AtomicFileWriter,
    current: Option<CurrentUser>,
}

impl AuthSessionStore {
    /// Loads the persisted user. Missing or unreadable state means nobody is signed in.
    pub(crate) fn load(state_dir: PathBuf) -> Self {
        let writer = AtomicFileWriter::new(state_dir);
        let current = match writer.read(SESSION_FILENAME) {
            Ok(Some(text)) => match ron::from_str::<PersistedSession>(&text) {
                Ok(session) => {
                    bazar_info!("Restored session for user {}", session.user.id);
                    Some(session.user)
                }
                Err(err) => {
                    bazar_warn!("Ignoring unreadable session file: {}", err);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                bazar_warn!("Failed to read session file: {}", err);
                None
            }
        };
        Self { writer, current }
    }

    /// Signs the user in only once the session is on disk.
    pub(crate) fn login(&mut self, user: CurrentUser) -> Result<(), SessionError> {
        let session = PersistedSession { user };
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&session, pretty).map_err(|err| {
            bazar_error!("Failed to serialize session: {}", err);
            SessionError::Encode(err)
        })?;
        self.writer.write(SESSION_FILENAME, &content).map_err(|err| {
            bazar_error!("Failed to save session: {}", err);
            SessionError::Persist(err)
        })?;
        bazar_info!("Signed in as {}", session.user.id);
        self.current = Some(session.user);
        Ok(())
    }

    pub(crate) fn logout(&mut self) -> Result<(), PersistError> {
        self.current = None;
        self.writer.remove(SESSION_FILENAME)
    }
}

impl AuthCollaborator for AuthSessionStore {
    fn current_user(&self) -> Option<CurrentUser> {
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn user() -> CurrentUser {
        CurrentUser {
            id: "user-42".to_string(),
            name: "Ada Lovelace".to_string(),
            email: Some("ada@state.edu".to_string()),
            university: "State University".to_string(),
        }
    }

    #[test]
    fn login_survives_a_restart() {
        let temp = TempDir::new().unwrap();
        let mut store = AuthSessionStore::load(temp.path().to_path_buf());
        assert_eq!(store.current_user(), None);

        store.login(user()).unwrap();
        assert_eq!(store.current_user(), Some(user()));

        let reloaded = AuthSessionStore::load(temp.path().to_path_buf());
        assert_eq!(reloaded.current_user(), Some(user()));
    }

    #[test]
    fn logout_forgets_the_user() {
        let temp = TempDir::new().unwrap();
        let mut store = AuthSessionStore::load(temp.path().to_path_buf());
        store.login(user()).unwrap();
        store.logout().unwrap();
        assert_eq!(store.current_user(), None);
        assert_eq!(
            AuthSessionStore::load(temp.path().to_path_buf()).current_user(),
            None
        );
    }

    #[test]
    fn unsaved_login_leaves_user_signed_out() {
        let temp = TempDir::new().unwrap();
        let not_a_dir = temp.path().join("state");
        fs::write(&not_a_dir, "").unwrap();
        let mut store = AuthSessionStore::load(not_a_dir);

        let err = store.login(user()).unwrap_err();
        assert!(matches!(err, SessionError::Persist(_)));
        assert_eq!(store.current_user(), None);
    }

    #[test]
    fn corrupt_file_means_signed_out() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SESSION_FILENAME), "(user: 12").unwrap();
        let store = AuthSessionStore::load(temp.path().to_path_buf());
        assert_eq!(store.current_user(), None);
    }
}
