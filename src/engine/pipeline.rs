//! Query pipeline - from typed text to provider requests
//!
//! The pipeline normalizes text, applies the minimum length gate, debounces
//! changes and numbers every provider request. Timers and requests run as
//! tokio tasks that report back through the engine's transition channel; the
//! pipeline only decides which of those reports are still current.
//!
//! Two counters drive the decisions:
//! - the debounce generation: only the most recently scheduled timer may fire
//! - the request sequence: only the latest issued request may deliver

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::trace;

use super::provider::{self, MatchProvider, ProviderResult};
use crate::config::EngineConfig;

/// Work posted back onto the engine's control path
#[derive(Debug)]
pub(crate) enum Transition<T> {
    /// A debounce timer expired
    DebounceElapsed { generation: u64, query: String },
    /// A provider request settled
    Resolved {
        seq: u64,
        query: String,
        result: ProviderResult<T>,
    },
}

/// Debounce and request bookkeeping for one engine instance
#[derive(Debug)]
pub(crate) struct QueryPipeline {
    trim: bool,
    min_length: usize,
    delay: Duration,
    debounce: Option<JoinHandle<()>>,
    /// Generation of the timer that has not fired yet
    scheduled: Option<u64>,
    generation: u64,
    last_seq: u64,
    /// Sequence number whose result is still wanted
    in_flight: Option<u64>,
}

impl QueryPipeline {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            trim: config.trim,
            min_length: config.min_length,
            delay: config.delay(),
            debounce: None,
            scheduled: None,
            generation: 0,
            last_seq: 0,
            in_flight: None,
        }
    }

    /// Normalize raw input the way queries are compared and dispatched
    pub fn normalize(&self, raw: &str) -> String {
        if self.trim {
            raw.trim().to_string()
        } else {
            raw.to_string()
        }
    }

    /// Whether `query` is long enough to be searched
    pub fn meets_min_length(&self, query: &str) -> bool {
        query.chars().count() >= self.min_length
    }

    /// Restart the debounce timer for `query`
    ///
    /// Any timer scheduled earlier is aborted; should it have posted already,
    /// its generation no longer matches and the post is ignored.
    pub fn schedule<T>(&mut self, query: String, tx: &UnboundedSender<Transition<T>>)
    where
        T: Send + 'static,
    {
        self.abort_timer();
        self.generation += 1;
        let generation = self.generation;
        self.scheduled = Some(generation);

        let delay = self.delay;
        let tx = tx.clone();
        trace!(generation, ?delay, "debounce scheduled");
        self.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver lives as long as the engine
            let _ = tx.send(Transition::DebounceElapsed { generation, query });
        }));
    }

    /// Claim a fired timer; false when it was superseded
    pub fn accept_debounce(&mut self, generation: u64) -> bool {
        if self.scheduled == Some(generation) {
            self.scheduled = None;
            self.debounce = None;
            true
        } else {
            trace!(generation, "superseded debounce ignored");
            false
        }
    }

    /// Issue a provider request for `query` and return its sequence number
    pub fn dispatch<T>(
        &mut self,
        provider: Arc<dyn MatchProvider<T>>,
        query: String,
        tx: &UnboundedSender<Transition<T>>,
    ) -> u64
    where
        T: Send + 'static,
    {
        self.last_seq += 1;
        let seq = self.last_seq;
        self.in_flight = Some(seq);

        let tx = tx.clone();
        let request = provider::request(provider, query.clone());
        tokio::spawn(async move {
            let result = request.await;
            let _ = tx.send(Transition::Resolved { seq, query, result });
        });

        seq
    }

    /// Claim a settled request; false when a newer request superseded it
    pub fn accept_result(&mut self, seq: u64) -> bool {
        if self.in_flight == Some(seq) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Stop wanting the in-flight result; the call itself keeps running
    pub fn invalidate(&mut self) {
        if let Some(seq) = self.in_flight.take() {
            trace!(seq, "in-flight request invalidated");
        }
    }

    /// Drop the pending timer and the in-flight request
    pub fn cancel(&mut self) {
        self.abort_timer();
        self.invalidate();
    }

    /// True strictly between dispatch and settle/discard of the wanted request
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True while a timer or a wanted request is outstanding
    pub fn is_busy(&self) -> bool {
        self.scheduled.is_some() || self.in_flight.is_some()
    }

    fn abort_timer(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
        self.scheduled = None;
    }
}

impl Drop for QueryPipeline {
    fn drop(&mut self) {
        self.abort_timer();
    }
}
