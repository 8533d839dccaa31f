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

//! The observer surface a host RPC channel implements to receive resolver
//! updates.

use std::fmt;
use std::net::IpAddr;

use crate::error::ResolveError;

/// An address this resolver can hand to a transport: an IP and the port
/// from the resolved target (never the DNS server's own port).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Address {
    pub ip: IpAddr,
    pub port: u16,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip {
            IpAddr::V4(ip) => write!(f, "{ip}:{}", self.port),
            IpAddr::V6(ip) => write!(f, "[{ip}]:{}", self.port),
        }
    }
}

/// A group of addresses that are equivalent attempts at reaching one logical
/// backend. This resolver never discovers more than one address per backend
/// (A records only, no SRV), so every group it produces wraps exactly one
/// [`Address`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointGroup {
    pub address: Address,
}

/// The coarse-grained status handed to [`Listener::on_error`].
///
/// This resolver only ever reports the `Unavailable` category: it has no
/// notion of, e.g., permission or argument errors once a target has parsed
/// successfully.
#[derive(Debug, Clone)]
pub struct ResolveStatus {
    cause: ResolveError,
}

impl ResolveStatus {
    pub(crate) fn new(cause: ResolveError) -> Self {
        Self { cause }
    }

    /// The host string the failing lookup was for.
    pub fn host(&self) -> &str {
        self.cause.host()
    }

    /// A human-readable description, always of the form
    /// `Unable to resolve host <host>: <cause>`.
    pub fn description(&self) -> String {
        self.cause.to_string()
    }

    /// The underlying error this status wraps.
    pub fn cause(&self) -> &ResolveError {
        &self.cause
    }
}

/// The observer a host RPC channel supplies to [`Resolver::start`]
/// (`crate::resolver::Resolver::start`) to receive resolution results.
///
/// Implementations are invoked from inside the resolver's own serialized
/// task; they must not block, and must tolerate being called zero or more
/// times before being dropped (no calls are guaranteed after `shutdown`, but
/// none are gated on it aborting instantaneously either, see
/// `crate::resolver` docs on the shutdown race).
pub trait Listener: Send + Sync {
    /// Called on every detected change to the resolved address set. `groups`
    /// is already sorted ascending by address and deduplicated; this
    /// resolver always emits an empty attributes bag (attribute enrichment
    /// beyond raw addresses is out of scope), so there is no second
    /// parameter to carry it.
    fn on_addresses(&self, groups: Vec<EndpointGroup>);

    /// Called when a resolution attempt fails, including when DNS returns
    /// zero records. The host is expected to call
    /// `crate::resolver::Resolver::refresh` to re-arm polling; this resolver
    /// does not retry failures on its own.
    fn on_error(&self, status: ResolveStatus);
}
