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

//! The resolver provider (C3): validated configuration plus the
//! scheme-keyed registry a host RPC framework uses to find it.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

use crate::error::ResolverConfigError;
use crate::resolver::Resolver;
use crate::target::ParsedTarget;

const DEFAULT_SCHEME: &str = "k8s-dns";
const DEFAULT_PRIORITY: u8 = 5;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;

/// Validated, immutable configuration for a [`ResolverProvider`].
///
/// Constructed via [`ResolverProviderConfig::builder`]; build-time
/// validation means a `ResolverProvider` can never exist in an invalid
/// state, so `new_resolver` never has to re-check these bounds.
#[derive(Debug, Clone)]
pub struct ResolverProviderConfig {
    scheme: String,
    priority: u8,
    refresh_interval: Duration,
}

impl Default for ResolverProviderConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            priority: DEFAULT_PRIORITY,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
        }
    }
}

impl ResolverProviderConfig {
    pub fn builder() -> ResolverProviderConfigBuilder {
        ResolverProviderConfigBuilder::default()
    }
}

#[derive(Debug, Default)]
pub struct ResolverProviderConfigBuilder {
    scheme: Option<String>,
    priority: Option<u8>,
    refresh_interval_secs: Option<i64>,
}

impl ResolverProviderConfigBuilder {
    /// URI scheme this provider will claim. Defaults to `k8s-dns`.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Rank used by the host to pick between competing providers registered
    /// for the same scheme. Must be in `[0, 10]`; defaults to 5.
    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Delay between DNS polls while the resolver is in the Polling state.
    /// Must be positive; defaults to 10 seconds. Taken as a signed value so
    /// that a non-positive caller input is a validation error rather than a
    /// silent wraparound.
    pub fn refresh_interval_secs(mut self, seconds: i64) -> Self {
        self.refresh_interval_secs = Some(seconds);
        self
    }

    pub fn build(self) -> Result<ResolverProviderConfig, ResolverConfigError> {
        let scheme = self.scheme.unwrap_or_else(|| DEFAULT_SCHEME.to_string());
        if scheme.is_empty() {
            return Err(ResolverConfigError::EmptyScheme);
        }
        let priority = self.priority.unwrap_or(DEFAULT_PRIORITY);
        if priority > 10 {
            return Err(ResolverConfigError::PriorityOutOfRange(priority));
        }
        let refresh_interval_secs = self
            .refresh_interval_secs
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS as i64);
        if refresh_interval_secs <= 0 {
            return Err(ResolverConfigError::NonPositiveRefreshInterval(
                refresh_interval_secs,
            ));
        }
        Ok(ResolverProviderConfig {
            scheme,
            priority,
            refresh_interval: Duration::from_secs(refresh_interval_secs as u64),
        })
    }
}

/// A name resolver factory: registers under a URI scheme with a priority,
/// and manufactures [`Resolver`] instances bound to a parsed target.
pub struct ResolverProvider {
    config: ResolverProviderConfig,
}

impl ResolverProvider {
    pub fn new(config: ResolverProviderConfig) -> Self {
        Self { config }
    }

    /// Always true: this provider has no external dependency that could
    /// make it unavailable (unlike, say, a provider backed by a control
    /// plane connection).
    pub fn is_available(&self) -> bool {
        true
    }

    pub fn priority(&self) -> u8 {
        self.config.priority
    }

    pub fn scheme(&self) -> &str {
        &self.config.scheme
    }

    /// Parses `uri` via the target parser (C1) using `default_port`, and
    /// constructs a [`Resolver`] wired to this provider's refresh interval.
    ///
    /// Returns `Ok(None)` — not an error — if `uri`'s scheme does not match
    /// this provider's configured scheme, per §6.
    pub fn new_resolver(
        &self,
        uri: &str,
        default_port: u16,
    ) -> Result<Option<Resolver>, crate::error::TargetParseError> {
        let uri_scheme = uri.splitn(2, ':').next().unwrap_or("");
        if uri_scheme != self.scheme {
            return Ok(None);
        }
        let target: ParsedTarget = ParsedTarget::parse(uri, default_port)?;
        Ok(Some(Resolver::new(target, self.config.refresh_interval)))
    }
}

/// A registry of resolver providers indexed by the URI scheme they handle.
///
/// If multiple providers register the same scheme, the one registered last
/// takes effect, matching the teacher's own name-resolver registry
/// (`client::name_resolution::registry::ResolverRegistry`).
#[derive(Default)]
pub struct ResolverRegistry {
    inner: Mutex<HashMap<String, Arc<ResolverProvider>>>,
}

impl ResolverRegistry {
    fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    pub fn register(&self, provider: ResolverProvider) {
        let scheme = provider.scheme().to_string();
        self.inner.lock().unwrap().insert(scheme, Arc::new(provider));
    }

    pub fn get(&self, scheme: &str) -> Option<Arc<ResolverProvider>> {
        self.inner.lock().unwrap().get(scheme).cloned()
    }
}

static GLOBAL_RESOLVER_REGISTRY: OnceLock<ResolverRegistry> = OnceLock::new();

/// The registry a host RPC framework consults to find a provider for a
/// target's URI scheme.
pub fn global_registry() -> &'static ResolverRegistry {
    GLOBAL_RESOLVER_REGISTRY.get_or_init(ResolverRegistry::new)
}
