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

use thiserror::Error;

/// Raised by the target parser (C1) for a malformed resolver URI.
///
/// Terminal for the resolver construction it occurred in; the original URI
/// text is always attached so the host can surface it to its caller.
#[derive(Debug, Error)]
pub enum TargetParseError {
    #[error("invalid target URI {uri:?}: empty authority and path does not start with '/'")]
    PathMissingSlash { uri: String },

    #[error("invalid target URI {uri:?}: missing host")]
    MissingHost { uri: String },

    #[error("invalid target URI {uri:?}: {reason}")]
    MalformedAuthority { uri: String, reason: String },

    #[error("invalid target URI {uri:?}: host {host:?} does not parse as a DNS name: {source}")]
    InvalidDnsName {
        uri: String,
        host: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Raised by the resolver provider (C3) when constructed with out-of-range
/// configuration. Terminal at provider construction: no provider is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolverConfigError {
    #[error("priority must be in [0, 10], got {0}")]
    PriorityOutOfRange(u8),

    #[error("refreshIntervalSeconds must be positive, got {0}")]
    NonPositiveRefreshInterval(i64),

    #[error("scheme must not be empty")]
    EmptyScheme,
}

/// The failure half of a resolution attempt (C4 tick).
///
/// `EmptyResolution` and `Transport` are handled identically by the resolver
/// core (both transition it to the Quiescent state and notify the listener),
/// but are kept distinct so callers can tell a DNS outage from a genuinely
/// nonexistent service.
#[derive(Debug, Error, Clone)]
pub enum ResolveError {
    #[error("Unable to resolve host {host}: {cause}")]
    Transport { host: String, cause: String },

    #[error("Unable to resolve host {host}: DNS returned no A records")]
    EmptyResolution { host: String },
}

impl ResolveError {
    pub fn host(&self) -> &str {
        match self {
            ResolveError::Transport { host, .. } => host,
            ResolveError::EmptyResolution { host } => host,
        }
    }
}
