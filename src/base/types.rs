//! Common result types.

/// Error type used across the crate's plumbing.
pub type Err = anyhow::Error;
/// Result alias over [`Err`].
pub type Res<T> = Result<T, Err>;
/// Result of an operation that returns nothing on success.
pub type Void = Res<()>;
