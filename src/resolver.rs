/*
 *
 * Copyright 2025 gRPC authors.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

//! The resolver core (C4): polls DNS on a fixed-delay schedule, deduplicates
//! results, suppresses unchanged notifications, and hands failure recovery
//! back to the host via the Idle/Polling/Quiescent state machine from the
//! design.
//!
//! All of a resolver's mutable state lives inside a single spawned task; the
//! public handle only ever sends messages into it. That task is this
//! crate's rendition of the host's "synchronization context": because state
//! is touched from exactly one place, no additional locking is needed (see
//! the design notes on re-entering a serialized context after an
//! asynchronous DNS completion).

use std::net::IpAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, UnboundedSender};

use crate::error::ResolveError;
use crate::listener::{Address, EndpointGroup, Listener, ResolveStatus};
use crate::rt::{self, DnsClient, DnsClientOptions, Runtime, Sleep, TaskHandle};
use crate::target::ParsedTarget;

/// The last successful resolution: the canonical (sorted, deduplicated)
/// address list and when it was accepted. Seeds the delay computation for a
/// `refresh()` issued after a failure.
struct SuccessResult {
    addresses: Vec<IpAddr>,
    receive_time: Instant,
}

enum Event {
    Start(Arc<dyn Listener>),
    Refresh,
    Shutdown,
    LookupDone(Result<Vec<IpAddr>, String>),
}

/// A name resolver instance bound to one parsed target.
///
/// Constructed by a [`crate::provider::ResolverProvider`]; the host calls
/// [`Resolver::start`] exactly once, then [`Resolver::refresh`] any number
/// of times, then [`Resolver::shutdown`] exactly once.
pub struct Resolver {
    target: ParsedTarget,
    tx: UnboundedSender<Event>,
    task: Box<dyn TaskHandle>,
}

impl Resolver {
    pub(crate) fn new(target: ParsedTarget, refresh_interval: Duration) -> Self {
        Self::with_runtime(target, refresh_interval, Arc::new(rt::tokio::TokioRuntime))
    }

    fn with_runtime(target: ParsedTarget, refresh_interval: Duration, runtime: Arc<dyn Runtime>) -> Self {
        let dns = runtime.dns_client(DnsClientOptions {
            host: target.host().clone(),
            server_addr: None,
        });
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let self_tx = tx.clone();
        let host_str = target.host_str().to_string();
        let port = target.port();
        let runtime_for_task = runtime.clone();
        let task = runtime.spawn(Box::pin(run(
            dns,
            host_str,
            port,
            refresh_interval,
            runtime_for_task,
            rx,
            self_tx,
        )));
        Self { target, tx, task }
    }

    /// Returns the target's authority. Pure, callable any time after
    /// construction.
    pub fn service_authority(&self) -> &str {
        self.target.authority()
    }

    /// Stores `listener` and schedules an immediate refresh, followed by
    /// recurring refreshes at the provider's configured interval. Must be
    /// called exactly once, before any call to [`Resolver::refresh`]; a
    /// second call is ignored rather than leaking a second recurring task.
    pub fn start(&self, listener: Arc<dyn Listener>) {
        let _ = self.tx.send(Event::Start(listener));
    }

    /// Re-arms polling if the resolver is currently Quiescent (most often
    /// because the last tick failed). A no-op if a recurring task is
    /// already scheduled, per the "at most one scheduled task" invariant.
    pub fn refresh(&self) {
        let _ = self.tx.send(Event::Refresh);
    }

    /// Cancels the scheduled task, if any, and stops the resolver for good.
    /// Idempotent.
    pub fn shutdown(&self) {
        let _ = self.tx.send(Event::Shutdown);
        self.task.abort();
    }
}

impl Drop for Resolver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn compute_refresh_delay(last_success: &Option<SuccessResult>, refresh_interval: Duration) -> Duration {
    match last_success {
        None => Duration::ZERO,
        Some(success) => {
            let target_instant = success.receive_time + refresh_interval;
            let now = Instant::now();
            target_instant.saturating_duration_since(now)
        }
    }
}

/// Sorts ascending by textual representation and removes duplicates. This
/// is the canonicalization change detection is based on (§3).
fn sort_and_dedup(mut ips: Vec<IpAddr>) -> Vec<IpAddr> {
    ips.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
    ips.dedup();
    ips
}

fn to_groups(addresses: &[IpAddr], port: u16) -> Vec<EndpointGroup> {
    addresses
        .iter()
        .map(|ip| EndpointGroup {
            address: Address { ip: *ip, port },
        })
        .collect()
}

/// The resolver's serialized task body: owns every piece of mutable state
/// named in the design's `ResolverState` (listener, scheduled task,
/// lastSuccess, refreshing) as plain locals, since this function is the
/// only place that ever touches them.
async fn run(
    dns: Result<Box<dyn DnsClient>, String>,
    host_str: String,
    port: u16,
    refresh_interval: Duration,
    runtime: Arc<dyn Runtime>,
    mut rx: mpsc::UnboundedReceiver<Event>,
    self_tx: UnboundedSender<Event>,
) {
    let dns: Option<Arc<dyn DnsClient>> = match dns {
        Ok(dns) => Some(Arc::from(dns)),
        Err(err) => {
            tracing::warn!(host = %host_str, error = %err, "failed to construct DNS client");
            None
        }
    };

    let mut listener: Option<Arc<dyn Listener>> = None;
    let mut last_success: Option<SuccessResult> = None;
    let mut refreshing = false;
    let mut scheduled: Option<Pin<Box<dyn Sleep>>> = None;
    let mut shut_down = false;

    loop {
        // Take the pending sleep (if any) out of `scheduled` for this
        // iteration so the tick future below only ever borrows a private
        // local, never `scheduled` itself; the event arm restores it
        // unchanged if the tick didn't fire.
        let mut tick = scheduled.take();
        let tick_fired = async {
            match tick.as_mut() {
                Some(sleep) => sleep.as_mut().await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            _ = tick_fired => {
                if refreshing {
                    // Single-flight gate: a tick should never fire while one
                    // is already in flight under fixed-delay scheduling, but
                    // guard the invariant explicitly rather than trust it.
                    continue;
                }
                refreshing = true;
                match dns.clone() {
                    Some(dns) => {
                        let self_tx = self_tx.clone();
                        runtime.spawn(Box::pin(async move {
                            let result = dns.lookup_a().await;
                            let _ = self_tx.send(Event::LookupDone(result));
                        }));
                    }
                    None => {
                        let _ = self_tx.send(Event::LookupDone(Err(
                            "no DNS client available".to_string(),
                        )));
                    }
                }
            }
            event = rx.recv() => {
                // The tick future above didn't fire, so whatever sleep it
                // was holding (if any) is still pending; give it back
                // before handling the event, which may replace or clear it.
                scheduled = tick;
                match event {
                    None => break,
                    Some(Event::Start(new_listener)) => {
                        if listener.is_none() && !shut_down {
                            listener = Some(new_listener);
                            scheduled = Some(runtime.sleep(Duration::ZERO));
                        }
                    }
                    Some(Event::Refresh) => {
                        if listener.is_some() && !shut_down && scheduled.is_none() {
                            let delay = compute_refresh_delay(&last_success, refresh_interval);
                            scheduled = Some(runtime.sleep(delay));
                        }
                    }
                    Some(Event::Shutdown) => {
                        shut_down = true;
                        scheduled = None;
                        listener = None;
                        break;
                    }
                    Some(Event::LookupDone(result)) => {
                        refreshing = false;
                        let Some(active_listener) = listener.as_ref() else {
                            continue;
                        };
                        if shut_down {
                            continue;
                        }
                        match result {
                            Ok(ips) if !ips.is_empty() => {
                                let addresses = sort_and_dedup(ips);
                                let changed = last_success
                                    .as_ref()
                                    .map(|prev| prev.addresses != addresses)
                                    .unwrap_or(true);
                                if changed {
                                    tracing::debug!(host = %host_str, count = addresses.len(), "resolved new address set");
                                    active_listener.on_addresses(to_groups(&addresses, port));
                                }
                                last_success = Some(SuccessResult {
                                    addresses,
                                    receive_time: Instant::now(),
                                });
                                scheduled = Some(runtime.sleep(refresh_interval));
                            }
                            Ok(_) => {
                                tracing::warn!(host = %host_str, "DNS returned no A records");
                                active_listener.on_error(ResolveStatus::new(ResolveError::EmptyResolution {
                                    host: host_str.clone(),
                                }));
                                scheduled = None;
                            }
                            Err(cause) => {
                                tracing::warn!(host = %host_str, error = %cause, "DNS lookup failed");
                                active_listener.on_error(ResolveStatus::new(ResolveError::Transport {
                                    host: host_str.clone(),
                                    cause,
                                }));
                                scheduled = None;
                            }
                        }
                    }
                }
            }
        }
    }
}
