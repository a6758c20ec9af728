// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fire-and-forget command dispatch.
//!
//! Host callbacks must return without waiting on the network. The
//! dispatcher hands each action to a background task that sends them one at
//! a time in enqueue order. Every send is bounded by a timeout, so a
//! controller that never answers delays the queue but cannot stall it.
//! Nothing is retried and believed state is never rolled back; failures,
//! timeouts included, are logged and reported to the [`ErrorSink`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::command::DeviceAction;
use crate::error::{Error, ProtocolError};
use crate::protocol::Protocol;

/// Callback receiving every failed command.
pub type ErrorSink = Arc<dyn Fn(&DispatchFailure) + Send + Sync>;

/// A command the controller never acknowledged.
#[derive(Debug)]
pub struct DispatchFailure {
    action: DeviceAction,
    error: ProtocolError,
}

impl DispatchFailure {
    /// Returns the action that failed.
    #[must_use]
    pub fn action(&self) -> DeviceAction {
        self.action
    }

    /// Returns the underlying protocol error.
    #[must_use]
    pub fn error(&self) -> &ProtocolError {
        &self.error
    }
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.action, self.error)
    }
}

enum Job {
    Send(DeviceAction),
    Flush(oneshot::Sender<()>),
}

/// Background sender for lightd commands.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use lightd_bridge::command::DeviceAction;
/// use lightd_bridge::protocol::{CommandDispatcher, DispatchFailure, HttpClient};
///
/// # async fn example() -> lightd_bridge::Result<()> {
/// let client = HttpClient::new("http://host", "d1")?;
/// let dispatcher = CommandDispatcher::spawn(
///     Arc::new(client),
///     Arc::new(|failure: &DispatchFailure| eprintln!("{failure}")),
/// )?;
///
/// dispatcher.dispatch(DeviceAction::TogglePower);
/// dispatcher.flush().await?;
/// # Ok(())
/// # }
/// ```
pub struct CommandDispatcher {
    tx: mpsc::UnboundedSender<Job>,
    worker: JoinHandle<()>,
}

impl CommandDispatcher {
    /// Upper bound on a single send when none is configured.
    pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

    /// Spawns the worker task on the current tokio runtime, bounding each
    /// send by [`DEFAULT_SEND_TIMEOUT`](Self::DEFAULT_SEND_TIMEOUT).
    ///
    /// # Errors
    ///
    /// Returns `Error::NoRuntime` when called outside a tokio runtime.
    pub fn spawn<P: Protocol>(protocol: Arc<P>, sink: ErrorSink) -> Result<Self, Error> {
        Self::spawn_with_timeout(protocol, sink, Self::DEFAULT_SEND_TIMEOUT)
    }

    /// Spawns the worker task, giving up on any send after `send_timeout`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoRuntime` when called outside a tokio runtime.
    pub fn spawn_with_timeout<P: Protocol>(
        protocol: Arc<P>,
        sink: ErrorSink,
        send_timeout: Duration,
    ) -> Result<Self, Error> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| Error::NoRuntime)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = runtime.spawn(run_worker(protocol, rx, sink, send_timeout));
        Ok(Self { tx, worker })
    }

    /// Queues an action and returns immediately.
    pub fn dispatch(&self, action: DeviceAction) {
        tracing::trace!(action = %action, "Queueing lightd command");
        if self.tx.send(Job::Send(action)).is_err() {
            tracing::warn!(action = %action, "Command dispatcher stopped, dropping command");
        }
    }

    /// Waits until every action queued before this call has been attempted.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::ChannelClosed` if the worker is gone.
    pub async fn flush(&self) -> Result<(), ProtocolError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(Job::Flush(done_tx))
            .map_err(|_| ProtocolError::ChannelClosed("command dispatcher stopped".to_string()))?;
        done_rx
            .await
            .map_err(|_| ProtocolError::ChannelClosed("command dispatcher stopped".to_string()))
    }

    /// Sends everything still queued, then stops the worker.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.worker.await {
            tracing::error!(error = %e, "Command dispatcher task failed");
        }
    }
}

impl fmt::Debug for CommandDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("closed", &self.tx.is_closed())
            .finish_non_exhaustive()
    }
}

async fn run_worker<P: Protocol>(
    protocol: Arc<P>,
    mut rx: mpsc::UnboundedReceiver<Job>,
    sink: ErrorSink,
    send_timeout: Duration,
) {
    while let Some(job) = rx.recv().await {
        match job {
            Job::Send(action) => {
                let result = tokio::time::timeout(send_timeout, protocol.send_action(action))
                    .await
                    .unwrap_or_else(|_| Err(ProtocolError::Timeout(millis(send_timeout))));
                if let Err(error) = result {
                    tracing::warn!(action = %action, error = %error, "lightd command failed");
                    sink(&DispatchFailure { action, error });
                }
            }
            Job::Flush(done) => {
                // Receiver may have given up waiting
                let _ = done.send(());
            }
        }
    }
    tracing::debug!("Command dispatcher stopped");
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::protocol::testing::RecordingProtocol;

    fn ignore_failures() -> ErrorSink {
        Arc::new(|_: &DispatchFailure| {})
    }

    #[tokio::test]
    async fn sends_in_enqueue_order() {
        let protocol = Arc::new(RecordingProtocol::default());
        let dispatcher =
            CommandDispatcher::spawn(Arc::clone(&protocol), ignore_failures()).unwrap();

        dispatcher.dispatch(DeviceAction::TogglePower);
        dispatcher.dispatch(DeviceAction::Brightness75);
        dispatcher.dispatch(DeviceAction::MinimumBrightness);
        dispatcher.flush().await.unwrap();

        assert_eq!(
            protocol.sent(),
            [
                DeviceAction::TogglePower,
                DeviceAction::Brightness75,
                DeviceAction::MinimumBrightness,
            ]
        );
    }

    #[tokio::test]
    async fn failures_reach_the_sink_without_retry() {
        let protocol = Arc::new(RecordingProtocol::failing_on(DeviceAction::TogglePower));
        let failures = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&failures);
        let sink: ErrorSink = Arc::new(move |failure: &DispatchFailure| {
            recorded.lock().push(failure.action());
        });
        let dispatcher = CommandDispatcher::spawn(Arc::clone(&protocol), sink).unwrap();

        dispatcher.dispatch(DeviceAction::TogglePower);
        dispatcher.dispatch(DeviceAction::Brightness50);
        dispatcher.flush().await.unwrap();

        assert_eq!(*failures.lock(), [DeviceAction::TogglePower]);
        assert_eq!(
            protocol.sent(),
            [DeviceAction::TogglePower, DeviceAction::Brightness50]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_send_times_out_and_queue_moves_on() {
        let protocol = Arc::new(RecordingProtocol::stalling_on(DeviceAction::TogglePower));
        let failures = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&failures);
        let sink: ErrorSink = Arc::new(move |failure: &DispatchFailure| {
            recorded
                .lock()
                .push((failure.action(), failure.error().to_string()));
        });
        let dispatcher = CommandDispatcher::spawn_with_timeout(
            Arc::clone(&protocol),
            sink,
            Duration::from_millis(250),
        )
        .unwrap();

        dispatcher.dispatch(DeviceAction::TogglePower);
        dispatcher.dispatch(DeviceAction::Brightness75);
        dispatcher.dispatch(DeviceAction::Brightness25);
        dispatcher.flush().await.unwrap();

        assert_eq!(
            protocol.sent(),
            [
                DeviceAction::TogglePower,
                DeviceAction::Brightness75,
                DeviceAction::Brightness25,
            ]
        );
        assert_eq!(
            *failures.lock(),
            [(
                DeviceAction::TogglePower,
                "request timed out after 250 ms".to_string()
            )]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn default_timeout_bounds_a_stalled_send() {
        let protocol = Arc::new(RecordingProtocol::stalling_on(DeviceAction::Brightness50));
        let dispatcher =
            CommandDispatcher::spawn(Arc::clone(&protocol), ignore_failures()).unwrap();

        let started = tokio::time::Instant::now();
        dispatcher.dispatch(DeviceAction::Brightness50);
        dispatcher.dispatch(DeviceAction::Brightness100);
        dispatcher.flush().await.unwrap();

        assert!(started.elapsed() >= CommandDispatcher::DEFAULT_SEND_TIMEOUT);
        assert_eq!(
            protocol.sent(),
            [DeviceAction::Brightness50, DeviceAction::Brightness100]
        );
    }

    #[tokio::test]
    async fn shutdown_drains_queue() {
        let protocol = Arc::new(RecordingProtocol::default());
        let dispatcher =
            CommandDispatcher::spawn(Arc::clone(&protocol), ignore_failures()).unwrap();

        dispatcher.dispatch(DeviceAction::Brightness100);
        dispatcher.shutdown().await;

        assert_eq!(protocol.sent(), [DeviceAction::Brightness100]);
    }

    #[test]
    fn spawn_outside_runtime_fails() {
        let protocol = Arc::new(RecordingProtocol::default());
        let result = CommandDispatcher::spawn(protocol, ignore_failures());
        assert!(matches!(result, Err(Error::NoRuntime)));
    }

    #[test]
    fn failure_display() {
        let failure = DispatchFailure {
            action: DeviceAction::TogglePower,
            error: ProtocolError::ChannelClosed("gone".to_string()),
        };
        assert_eq!(
            failure.to_string(),
            "toggle_power failed: channel closed: gone"
        );
    }
}
