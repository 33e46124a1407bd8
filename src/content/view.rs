//! Per-page view state and mount lifetime.
//!
//! A [`Mount`] is one page render. It owns the page's [`ViewState`] and a
//! cancellation token; the state settles at most once, and only while the
//! mount is live. Dropping the mount cancels whatever it is still waiting on.

use crate::log;
use parking_lot::Mutex;
use std::{fmt::Display, future::Future, sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

/// What a page shows for its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Move out of `Loading`. Returns false if the state already settled.
    pub fn settle<E: Display>(&mut self, result: Result<T, E>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match result {
            Ok(data) => Self::Ready(data),
            Err(err) => Self::Error(err.to_string()),
        };
        true
    }
}

/// One page render's lifetime.
#[derive(Debug)]
pub struct Mount<T> {
    state: Arc<Mutex<ViewState<T>>>,
    token: CancellationToken,
}

/// Write side of a mount, usable from a spawned task.
///
/// Results are applied only while the owning mount is live.
#[derive(Debug)]
pub struct MountHandle<T> {
    state: Arc<Mutex<ViewState<T>>>,
    token: CancellationToken,
}

impl<T> Clone for MountHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            token: self.token.clone(),
        }
    }
}

impl<T> MountHandle<T> {
    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Settle the mount's state with `result`.
    ///
    /// Returns false when the mount is gone or the state already settled.
    pub fn apply<E: Display>(&self, result: Result<T, E>) -> bool {
        if !self.is_live() {
            return false;
        }
        if let Err(err) = &result {
            log!("fetch"; "{err}");
        }
        self.state.lock().settle(result)
    }
}

impl<T> Default for Mount<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mount<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewState::Loading)),
            token: CancellationToken::new(),
        }
    }

    pub fn handle(&self) -> MountHandle<T> {
        MountHandle {
            state: Arc::clone(&self.state),
            token: self.token.clone(),
        }
    }

    /// Unmount early. Pending results are discarded.
    #[cfg(test)]
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading()
    }

    /// Drive `fut` until it finishes or the mount is cancelled.
    ///
    /// On cancellation the future is dropped and the state stays `Loading`.
    pub async fn run<F, E>(&self, fut: F)
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let handle = self.handle();
        tokio::select! {
            _ = self.token.cancelled() => {}
            result = fut => {
                handle.apply(result);
            }
        }
    }

    /// Like [`Mount::run`], but give up after `deadline`.
    ///
    /// A timed-out mount settles in `Error`; nothing retries it.
    pub async fn run_with_deadline<F, E>(&self, fut: F, deadline: Duration)
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        if tokio::time::timeout(deadline, self.run(fut)).await.is_err() {
            self.handle().apply(Err::<T, _>(timed_out(deadline)));
        }
    }

    /// End the mount and take its final state.
    pub fn finish(self) -> ViewState<T> {
        self.token.cancel();
        std::mem::take(&mut *self.state.lock())
    }
}

/// Error shown by a mount that missed its deadline.
fn timed_out(deadline: Duration) -> String {
    format!("Request timed out after {}ms", deadline.as_millis())
}

impl<T> Drop for Mount<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_settle_once() {
        let mut state: ViewState<u32> = ViewState::Loading;
        assert!(state.settle::<String>(Ok(1)));
        assert!(!state.settle(Err("late")));
        assert_eq!(state, ViewState::Ready(1));
    }

    #[test]
    fn test_settle_error_message() {
        let mut state: ViewState<u32> = ViewState::default();
        state.settle(Err("Failed to fetch projects: 500"));
        assert_eq!(state, ViewState::Error("Failed to fetch projects: 500".into()));
    }

    #[tokio::test]
    async fn test_run_ready() {
        let mount = Mount::new();
        mount.run(async { Ok::<_, String>(vec![1, 2]) }).await;
        assert_eq!(mount.finish(), ViewState::Ready(vec![1, 2]));
    }

    #[tokio::test]
    async fn test_run_error() {
        let mount: Mount<()> = Mount::new();
        mount.run(async { Err("boom") }).await;
        assert_eq!(mount.finish(), ViewState::Error("boom".into()));
    }

    #[tokio::test]
    async fn test_cancelled_mount_stays_loading() {
        let mount: Mount<u32> = Mount::new();
        mount.cancel();
        mount
            .run(async {
                tokio::time::sleep(ms(10)).await;
                Ok::<_, String>(7)
            })
            .await;
        assert!(mount.is_loading());
    }

    #[tokio::test]
    async fn test_result_after_unmount_is_discarded() {
        let mount: Mount<u32> = Mount::new();
        let handle = mount.handle();
        drop(mount);

        assert!(!handle.is_live());
        assert!(!handle.apply::<String>(Ok(1)));
        assert!(handle.state.lock().is_loading());
    }

    #[tokio::test]
    async fn test_spawned_fetch_lands_while_live() {
        let mount: Mount<u32> = Mount::new();
        let handle = mount.handle();

        tokio::spawn(async move { handle.apply::<String>(Ok(3)) })
            .await
            .unwrap();

        assert_eq!(mount.finish(), ViewState::Ready(3));
    }

    #[tokio::test]
    async fn test_deadline_settles_error() {
        let mount: Mount<u32> = Mount::new();
        mount
            .run_with_deadline(
                async {
                    tokio::time::sleep(ms(500)).await;
                    Ok::<_, String>(1)
                },
                ms(20),
            )
            .await;
        assert_eq!(
            mount.finish(),
            ViewState::Error("Request timed out after 20ms".into())
        );
    }

    #[tokio::test]
    async fn test_deadline_not_hit() {
        let mount: Mount<u32> = Mount::new();
        mount
            .run_with_deadline(async { Ok::<_, String>(1) }, ms(1000))
            .await;
        assert_eq!(mount.finish(), ViewState::Ready(1));
    }
}
