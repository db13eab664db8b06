/// Errors from the session store layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// The underlying redb database failed (open, read, or commit).
    #[error("session storage error: {0}")]
    Storage(String),
}
