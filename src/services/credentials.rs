use std::sync::{PoisonError, RwLock};

/// Token-based credentials presented to the backend
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("Token {}", self.token)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Accessor the backend consults before every request
///
/// Implementations may refresh or rotate the credentials between calls; the
/// backend never caches what it gets back.
pub trait CredentialSource: Send + Sync {
    fn current(&self) -> Option<Credentials>;
}

impl<F> CredentialSource for F
where
    F: Fn() -> Option<Credentials> + Send + Sync,
{
    fn current(&self) -> Option<Credentials> {
        self()
    }
}

/// Credentials that can be swapped at runtime, e.g. after a fresh login
#[derive(Debug, Default)]
pub struct SharedCredentials {
    inner: RwLock<Option<Credentials>>,
}

impl SharedCredentials {
    pub fn new(initial: Option<Credentials>) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    pub fn replace(&self, credentials: Credentials) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(credentials);
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl CredentialSource for SharedCredentials {
    fn current(&self) -> Option<Credentials> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
