//! The payment watcher: one blocking-with-timeout wait per request.

use std::collections::HashSet;
use std::time::Duration;

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use nanolattice_relay::{ConfirmationEvent, LedgerRelay};
use nanolattice_types::{Address, Amount, BlockHash, PendingPayment};

use crate::cancel::CancelToken;

/// Tunables for the polling fallback.
#[derive(Clone, Copy, Debug)]
pub struct WatcherConfig {
    /// How often the pending set is polled when the relay has no
    /// confirmation feed. Trade-off against missed-payment latency: a
    /// payment is surfaced at most one interval after it lands.
    pub poll_interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// One observation request, scoped to one [`PaymentWatcher::wait`] call.
#[derive(Clone, Debug)]
pub struct WatchRequest {
    /// The account expecting the payment.
    pub account: Address,
    /// When set, only a payment of exactly this amount matches.
    pub expected_amount: Option<Amount>,
    /// How long to wait before resolving `TimedOut`.
    pub timeout: Duration,
}

/// How a wait resolved.
///
/// `TimedOut` and `Cancelled` are ordinary outcomes, not errors — both are
/// routine in payment-waiting workflows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WatchOutcome {
    /// A matching incoming payment was observed.
    Confirmed(PendingPayment),
    /// The timeout elapsed with no match.
    TimedOut,
    /// The caller cancelled the wait.
    Cancelled,
}

/// Observes incoming payments for accounts through a ledger relay.
///
/// Stateless between calls: each wait subscribes or polls on its own, and
/// everything it started is torn down when the wait resolves — the strategy
/// runs inside the wait's own future, so no background task can outlive it.
/// Concurrent waits are independent, including waits on the same account
/// (each gets its own subscription receiver or poll loop).
pub struct PaymentWatcher<R> {
    relay: Arc<R>,
    config: WatcherConfig,
}

impl<R: LedgerRelay> PaymentWatcher<R> {
    pub fn new(relay: Arc<R>) -> Self {
        Self::with_config(relay, WatcherConfig::default())
    }

    pub fn with_config(relay: Arc<R>, config: WatcherConfig) -> Self {
        debug_assert!(!config.poll_interval.is_zero(), "poll interval must be non-zero");
        Self { relay, config }
    }

    /// Wait for a matching incoming payment, without external cancellation.
    pub async fn wait(&self, request: WatchRequest) -> WatchOutcome {
        self.wait_with(request, &CancelToken::new()).await
    }

    /// Wait for a matching incoming payment.
    ///
    /// Exactly one observation strategy runs per call: the relay's
    /// confirmation feed when it offers one for this account, otherwise
    /// polling of the pending set. The call resolves on the first match, on
    /// the deadline, or when `cancel` fires — whichever comes first.
    pub async fn wait_with(&self, request: WatchRequest, cancel: &CancelToken) -> WatchOutcome {
        let deadline = Instant::now() + request.timeout;

        let strategy = async {
            match self.relay.subscribe_confirmations(&request.account) {
                Some(receiver) => {
                    debug!(account = %request.account, "watching via confirmation feed");
                    self.watch_subscription(receiver, &request).await
                }
                None => {
                    debug!(
                        account = %request.account,
                        interval_ms = self.config.poll_interval.as_millis() as u64,
                        "no confirmation feed, polling pending set"
                    );
                    self.watch_polling(&request).await
                }
            }
        };

        tokio::select! {
            _ = cancel.cancelled() => {
                debug!(account = %request.account, "wait cancelled");
                WatchOutcome::Cancelled
            }
            _ = time::sleep_until(deadline) => {
                debug!(account = %request.account, "wait timed out");
                WatchOutcome::TimedOut
            }
            payment = strategy => {
                debug!(account = %request.account, hash = %payment.send_hash, "payment observed");
                WatchOutcome::Confirmed(payment)
            }
        }
    }

    /// Consume the confirmation feed until an event matches the request.
    async fn watch_subscription(
        &self,
        mut receiver: broadcast::Receiver<ConfirmationEvent>,
        request: &WatchRequest,
    ) -> PendingPayment {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Some(payment) = match_event(event, request) {
                        return payment;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, account = %request.account, "confirmation feed lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    // The feed ended without a match. A wait runs exactly one
                    // strategy, so park and let the deadline resolve the call.
                    debug!(account = %request.account, "confirmation feed closed before a match");
                    return futures_util::future::pending().await;
                }
            }
        }
    }

    /// Poll the pending set, resolving on the first entry that was not in an
    /// earlier snapshot and matches the request.
    async fn watch_polling(&self, request: &WatchRequest) -> PendingPayment {
        let mut interval = time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Baseline: whatever is pending when the wait begins predates the
        // awaited payment and never matches. Taken on the first successful
        // poll.
        let mut seen: Option<HashSet<BlockHash>> = None;

        loop {
            interval.tick().await;
            let snapshot = match self.relay.pending(&request.account).await {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!(account = %request.account, error = %err, "pending poll failed, retrying");
                    continue;
                }
            };

            match seen.as_mut() {
                None => {
                    seen = Some(snapshot.iter().map(|p| p.send_hash).collect());
                }
                Some(seen) => {
                    for payment in snapshot {
                        if seen.insert(payment.send_hash) && matches_amount(&payment, request) {
                            return payment;
                        }
                    }
                }
            }
        }
    }
}

fn matches_amount(payment: &PendingPayment, request: &WatchRequest) -> bool {
    match request.expected_amount {
        Some(expected) => payment.amount == expected,
        None => true,
    }
}

fn match_event(event: ConfirmationEvent, request: &WatchRequest) -> Option<PendingPayment> {
    if event.destination != request.account {
        return None;
    }
    let payment = PendingPayment {
        send_hash: event.hash,
        source: event.source,
        amount: event.amount,
    };
    matches_amount(&payment, request).then_some(payment)
}
