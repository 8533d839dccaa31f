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

use std::{future::Future, pin::Pin};

use super::{DnsClient, DnsClientOptions, Runtime, Sleep, TaskHandle};

mod hickory_resolver;

pub(crate) struct TokioRuntime;

impl TaskHandle for ::tokio::task::JoinHandle<()> {
    fn abort(&self) {
        ::tokio::task::JoinHandle::abort(self)
    }
}

impl Sleep for ::tokio::time::Sleep {}

impl Runtime for TokioRuntime {
    fn spawn(&self, task: Pin<Box<dyn Future<Output = ()> + Send + 'static>>) -> Box<dyn TaskHandle> {
        Box::new(::tokio::spawn(task))
    }

    fn dns_client(&self, opts: DnsClientOptions) -> Result<Box<dyn DnsClient>, String> {
        Ok(Box::new(hickory_resolver::HickoryDnsClient::new(opts)?))
    }

    fn sleep(&self, duration: std::time::Duration) -> Pin<Box<dyn Sleep>> {
        Box::pin(::tokio::time::sleep(duration))
    }
}
