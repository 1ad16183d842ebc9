//! Asynchronous fetch dispatch.
//!
//! The search controller never calls a provider directly. It hands a
//! [`FetchTicket`] to a [`FetchDispatcher`] and later applies the matching
//! [`FetchCompletion`]. Completions may arrive in any order; the ticket's
//! epoch tells the controller whether a completion is still relevant.

use super::{FetchQuery, ResultPage, ResultProvider};
use crate::model::ProviderError;
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{trace, warn};

// ===== Tickets =====

/// Which state transition a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page of a new query.
    Initial,
    /// Additional page appended by load-more.
    More,
}

/// A fetch handed to a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Request epoch captured when the fetch was issued.
    pub epoch: u64,
    /// Initial page or load-more.
    pub kind: FetchKind,
    /// The page being requested.
    pub query: FetchQuery,
}

/// A finished fetch, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCompletion {
    /// The ticket this completion answers.
    pub ticket: FetchTicket,
    /// Page on success, provider error on failure.
    pub outcome: Result<ResultPage, ProviderError>,
}

impl FetchCompletion {
    /// Run `ticket` against `provider` synchronously.
    pub fn resolve(ticket: FetchTicket, provider: &dyn ResultProvider) -> Self {
        let outcome = provider.fetch(&ticket.query);
        Self { ticket, outcome }
    }
}

// ===== FetchDispatcher =====

/// Seam between the controller and whatever runs the provider.
pub trait FetchDispatcher {
    /// Start a fetch. Must not block on the provider.
    fn dispatch(&mut self, ticket: FetchTicket);

    /// Completions that have arrived since the last call, in arrival order.
    fn drain_completed(&mut self) -> Vec<FetchCompletion>;
}

// ===== InlineDispatcher =====

/// Runs the provider immediately; the completion is delivered on the next drain.
pub struct InlineDispatcher<P> {
    provider: P,
    ready: VecDeque<FetchCompletion>,
}

impl<P: ResultProvider> InlineDispatcher<P> {
    /// Wrap a provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            ready: VecDeque::new(),
        }
    }

    /// Borrow the wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: ResultProvider> FetchDispatcher for InlineDispatcher<P> {
    fn dispatch(&mut self, ticket: FetchTicket) {
        let completion = FetchCompletion::resolve(ticket, &self.provider);
        self.ready.push_back(completion);
    }

    fn drain_completed(&mut self) -> Vec<FetchCompletion> {
        self.ready.drain(..).collect()
    }
}

// ===== ThreadedDispatcher =====

/// Runs each fetch on its own worker thread after a simulated latency.
///
/// Completions come back over a channel and are collected without blocking,
/// so several fetches may be outstanding at once and finish out of order.
pub struct ThreadedDispatcher {
    provider: Arc<dyn ResultProvider>,
    latency: Duration,
    tx: Sender<FetchCompletion>,
    rx: Receiver<FetchCompletion>,
    in_flight: usize,
}

impl ThreadedDispatcher {
    /// Create a dispatcher that waits `latency` before each fetch.
    pub fn new(provider: Arc<dyn ResultProvider>, latency: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            provider,
            latency,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Fetches dispatched but not yet drained.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl FetchDispatcher for ThreadedDispatcher {
    fn dispatch(&mut self, ticket: FetchTicket) {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        let latency = self.latency;
        let fallback = ticket.clone();

        let spawned = thread::Builder::new()
            .name(format!("fetch-e{}-p{}", ticket.epoch, ticket.query.page))
            .spawn(move || {
                if !latency.is_zero() {
                    thread::sleep(latency);
                }
                let completion = FetchCompletion::resolve(ticket, provider.as_ref());
                // Receiver gone means the app is shutting down.
                let _ = tx.send(completion);
            });

        self.in_flight += 1;
        if let Err(err) = spawned {
            warn!(error = %err, "Failed to spawn fetch worker");
            let _ = self.tx.send(FetchCompletion {
                ticket: fallback,
                outcome: Err(ProviderError::WorkerDisconnected),
            });
        }
    }

    fn drain_completed(&mut self) -> Vec<FetchCompletion> {
        let completed: Vec<FetchCompletion> = self.rx.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(completed.len());
        if !completed.is_empty() {
            trace!(count = completed.len(), in_flight = self.in_flight, "Drained fetches");
        }
        completed
    }
}

// ===== DeferredDispatcher =====

/// Holds tickets until the caller completes them, in whatever order it likes.
///
/// Useful for driving the controller deterministically: tests resolve
/// fetches out of order to exercise stale-response discarding.
#[derive(Debug, Default)]
pub struct DeferredDispatcher {
    pending: VecDeque<FetchTicket>,
    ready: VecDeque<FetchCompletion>,
    history: Vec<FetchTicket>,
}

impl DeferredDispatcher {
    /// Empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tickets dispatched but not yet completed, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &FetchTicket> {
        self.pending.iter()
    }

    /// Number of tickets awaiting completion.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Every ticket ever dispatched, in dispatch order.
    pub fn history(&self) -> &[FetchTicket] {
        &self.history
    }

    /// Remove and return the oldest pending ticket.
    pub fn take_oldest(&mut self) -> Option<FetchTicket> {
        self.pending.pop_front()
    }

    /// Remove and return the newest pending ticket.
    pub fn take_newest(&mut self) -> Option<FetchTicket> {
        self.pending.pop_back()
    }

    /// Queue a completion for the next drain.
    pub fn complete(&mut self, completion: FetchCompletion) {
        self.ready.push_back(completion);
    }

    /// Resolve the oldest pending ticket against `provider`.
    ///
    /// Returns `false` if nothing was pending.
    pub fn resolve_oldest(&mut self, provider: &dyn ResultProvider) -> bool {
        match self.pending.pop_front() {
            Some(ticket) => {
                self.ready
                    .push_back(FetchCompletion::resolve(ticket, provider));
                true
            }
            None => false,
        }
    }

    /// Resolve every pending ticket in dispatch order.
    pub fn resolve_all(&mut self, provider: &dyn ResultProvider) {
        while self.resolve_oldest(provider) {}
    }

    /// Fail the oldest pending ticket with `error`.
    pub fn fail_oldest(&mut self, error: ProviderError) -> bool {
        match self.pending.pop_front() {
            Some(ticket) => {
                self.ready.push_back(FetchCompletion {
                    ticket,
                    outcome: Err(error),
                });
                true
            }
            None => false,
        }
    }
}

impl FetchDispatcher for DeferredDispatcher {
    fn dispatch(&mut self, ticket: FetchTicket) {
        self.history.push(ticket.clone());
        self.pending.push_back(ticket);
    }

    fn drain_completed(&mut self) -> Vec<FetchCompletion> {
        self.ready.drain(..).collect()
    }
}
