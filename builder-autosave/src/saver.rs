//! The persistence seam.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::cancel::CancellationToken;
use crate::error::SaveResult;

/// Persists snapshots of type `T`.
///
/// Implementations should stop early and return
/// [`SaveError::Cancelled`](crate::SaveError::Cancelled) once `cancel`
/// fires. The controller drops cancelled attempts anyway and ignores
/// their results.
#[async_trait]
pub trait Saver<T>: Send + Sync {
    /// Persist one snapshot.
    async fn save(&self, snapshot: T, cancel: CancellationToken) -> SaveResult;
}

#[async_trait]
impl<T, S> Saver<T> for Arc<S>
where
    T: Send + 'static,
    S: Saver<T> + ?Sized,
{
    async fn save(&self, snapshot: T, cancel: CancellationToken) -> SaveResult {
        (**self).save(snapshot, cancel).await
    }
}

/// A [`Saver`] backed by a closure. Built with [`saver_fn`].
pub struct FnSaver<F> {
    f: F,
}

impl<F> std::fmt::Debug for FnSaver<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSaver").finish_non_exhaustive()
    }
}

/// Wrap a closure returning a boxed future as a [`Saver`].
///
/// ```
/// use builder_autosave::{saver_fn, SaveResult};
/// use futures::FutureExt;
///
/// let saver = saver_fn(|snapshot: Vec<u8>, _cancel| {
///     async move {
///         println!("saving {} bytes", snapshot.len());
///         SaveResult::Ok(())
///     }
///     .boxed()
/// });
/// # let _ = saver;
/// ```
#[must_use]
pub fn saver_fn<T, F>(f: F) -> FnSaver<F>
where
    T: Send + 'static,
    F: Fn(T, CancellationToken) -> BoxFuture<'static, SaveResult> + Send + Sync,
{
    FnSaver { f }
}

#[async_trait]
impl<T, F> Saver<T> for FnSaver<F>
where
    T: Send + 'static,
    F: Fn(T, CancellationToken) -> BoxFuture<'static, SaveResult> + Send + Sync,
{
    async fn save(&self, snapshot: T, cancel: CancellationToken) -> SaveResult {
        (self.f)(snapshot, cancel).await
    }
}
