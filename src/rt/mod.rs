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

use std::{future::Future, net::IpAddr, pin::Pin};

pub mod tokio;

/// An abstraction over an asynchronous runtime.
///
/// This stands in for the host-provided synchronization context and
/// scheduled executor of the design: it is how the resolver spawns its own
/// serialized background task and how that task sleeps between ticks,
/// without the resolver core depending on Tokio directly. Tests substitute a
/// fake implementation to drive the state machine without wall-clock delays.
pub(crate) trait Runtime: Send + Sync {
    /// Spawns the given asynchronous task to run in the background.
    fn spawn(&self, task: Pin<Box<dyn Future<Output = ()> + Send + 'static>>) -> Box<dyn TaskHandle>;

    /// Builds a DNS client bound to the given target host.
    fn dns_client(&self, opts: DnsClientOptions) -> Result<Box<dyn DnsClient>, String>;

    /// Returns a future that completes after the specified duration.
    fn sleep(&self, duration: std::time::Duration) -> Pin<Box<dyn Sleep>>;
}

/// A future that resolves after a specified duration.
pub(crate) trait Sleep: Send + Future<Output = ()> {}

pub(crate) trait TaskHandle: Send + Sync {
    /// Abort the associated task.
    fn abort(&self);
}

/// A DNS client bound to a single target host, queried with an empty/relative
/// name per §4.2: the client is configured with the target as its implicit
/// lookup target rather than being re-handed the name on every call.
#[async_trait::async_trait]
pub(crate) trait DnsClient: Send + Sync {
    /// Resolve the bound host's A records. An `Ok` empty vector means DNS
    /// returned zero records (the caller converts this to a failure per
    /// §4.4 step 5c); this trait itself just reports what the wire said.
    async fn lookup_a(&self) -> Result<Vec<IpAddr>, String>;
}

pub(crate) struct DnsClientOptions {
    /// The fully-qualified name this client always resolves.
    pub(crate) host: hickory_resolver::Name,
    /// Overrides the system DNS server. `None` uses the host's configured
    /// resolv.conf / platform resolver.
    pub(crate) server_addr: Option<std::net::SocketAddr>,
}
