//! Editor authentication.
//!
//! Editors are CMS documents in the `editors` collection holding an email
//! and an Argon2 password hash. Authentication exists solely to gate the
//! draft preview mode; there are no visitor accounts.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tracing::instrument;

use oakline_core::{DocumentId, DocumentStatus, Email, EmailError};

use crate::cms::collections;
use crate::cms::documents::{Document, EditorData};
use crate::cms::store::{DocumentQuery, MutationCtx, Store, StoreError};

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid credentials (wrong password or unknown editor).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Editor not found.
    #[error("editor not found")]
    EditorNotFound,

    /// Password hashing error.
    #[error("password hashing error: {0}")]
    PasswordHash(String),

    /// Document store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// An authenticated editor.
#[derive(Debug, Clone)]
pub struct Editor {
    pub id: DocumentId,
    pub email: Email,
}

/// Verify an editor's email and password against the store.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` for a wrong password or unknown
/// email. Unknown email and wrong password are indistinguishable to the
/// caller, but a hash verification still runs in both cases so response
/// timing does not reveal which it was.
#[instrument(skip(store, password))]
pub async fn verify_editor(
    store: &Store,
    email: &str,
    password: &str,
) -> Result<Editor, AuthError> {
    let email = Email::parse(email)?;

    let editor = find_editor(store, &email).await?;

    match editor {
        Some((id, data)) => {
            verify_password(password, &data.password_hash)?;
            Ok(Editor {
                id,
                email: data.email,
            })
        }
        None => {
            // Burn a verification against a throwaway hash
            let dummy = hash_password("dummy-password")?;
            let _ = verify_password(password, &dummy);
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Create an editor account. Used by the CLI.
///
/// # Errors
///
/// Returns `AuthError::InvalidEmail` for a malformed email and a store
/// error if the insert fails.
pub async fn create_editor(
    store: &Store,
    email: &str,
    password: &str,
) -> Result<Editor, AuthError> {
    let email = Email::parse(email)?;
    let password_hash = hash_password(password)?;

    let data = EditorData {
        email: email.clone(),
        password_hash,
    };
    let doc = Document::new(collections::EDITORS, None, DocumentStatus::Published, &data)
        .map_err(|e| AuthError::Store(StoreError::Serialization(e)))?;
    let doc = store.create(&MutationCtx::local(), doc).await?;

    Ok(Editor { id: doc.id, email })
}

async fn find_editor(
    store: &Store,
    email: &Email,
) -> Result<Option<(DocumentId, EditorData)>, AuthError> {
    let docs = store
        .find(
            collections::EDITORS,
            &DocumentQuery {
                draft: true,
                ..DocumentQuery::default()
            },
        )
        .await?;

    for doc in docs {
        let Ok(data) = doc.payload::<EditorData>(false) else {
            continue;
        };
        if data.email == *email {
            return Ok(Some((doc.id, data)));
        }
    }
    Ok(None)
}

/// Hash a password with Argon2id and a fresh salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Verify a password against a PHC-format hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_verify_editor() {
        let store = Store::memory();
        let created = create_editor(&store, "editor@oakline.supply", "a-long-password")
            .await
            .expect("create");

        let editor = verify_editor(&store, "editor@oakline.supply", "a-long-password")
            .await
            .expect("verify");
        assert_eq!(editor.id, created.id);
        assert_eq!(editor.email.as_str(), "editor@oakline.supply");
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let store = Store::memory();
        create_editor(&store, "editor@oakline.supply", "a-long-password")
            .await
            .expect("create");

        let result = verify_editor(&store, "editor@oakline.supply", "wrong-password").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_email_rejected() {
        let store = Store::memory();
        let result = verify_editor(&store, "nobody@oakline.supply", "whatever").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_malformed_email_rejected() {
        let store = Store::memory();
        let result = verify_editor(&store, "not-an-email", "whatever").await;
        assert!(matches!(result, Err(AuthError::InvalidEmail(_))));
    }

    #[test]
    fn test_hash_roundtrip() {
        let hash = hash_password("secret-phrase").expect("hash");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret-phrase", &hash).is_ok());
        assert!(verify_password("other-phrase", &hash).is_err());
    }
}
