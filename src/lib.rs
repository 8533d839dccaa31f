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

//! A DNS-polling name resolver for headless-service-style RPC targets.
//!
//! This crate is meant to be plugged into a host RPC channel implementation:
//! the channel instantiates a [`Resolver`](resolver::Resolver) through a
//! [`ResolverProvider`](provider::ResolverProvider) registered under a URI
//! scheme, starts it with a [`Listener`](listener::Listener), and receives
//! deduplicated address-set updates for as long as the channel lives.
//!
//! Everything downstream of the resolver (load balancing, connection
//! pooling, transport) is the host's concern, not this crate's.

#![allow(dead_code)]

pub mod error;
pub mod listener;
pub mod provider;
pub(crate) mod rt;
pub mod target;

pub mod resolver;

pub use error::{ResolveError, ResolverConfigError, TargetParseError};
pub use listener::{Address, EndpointGroup, Listener, ResolveStatus};
pub use provider::{ResolverProvider, ResolverProviderConfig};
pub use resolver::Resolver;
pub use target::ParsedTarget;
