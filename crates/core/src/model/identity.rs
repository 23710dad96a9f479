use thiserror::Error;

/// Shared passphrase every candidate enters at login.
pub const AUTH_PASSPHRASE: &str = "INFO.TEST";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CredentialError {
    #[error("full name cannot be empty")]
    EmptyName,

    #[error("authentication id does not match {AUTH_PASSPHRASE}")]
    WrongPassphrase,
}

/// Who is taking the assessment and the credential they typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    full_name: String,
    submitted_credential: String,
}

impl Identity {
    /// Check a login attempt against the shared passphrase.
    ///
    /// Both inputs are trimmed; the passphrase comparison ignores case.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::EmptyName` for a blank name and
    /// `CredentialError::WrongPassphrase` for any other credential.
    pub fn authenticate(full_name: &str, credential: &str) -> Result<Self, CredentialError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(CredentialError::EmptyName);
        }

        let credential = credential.trim();
        if !credential.eq_ignore_ascii_case(AUTH_PASSPHRASE) {
            return Err(CredentialError::WrongPassphrase);
        }

        Ok(Self {
            full_name: full_name.to_owned(),
            submitted_credential: credential.to_owned(),
        })
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn submitted_credential(&self) -> &str {
        &self.submitted_credential
    }
}
