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

//! Decodes a resolver target URI into a [`ParsedTarget`].

use hickory_resolver::Name;

use crate::error::TargetParseError;

/// The decoded form of a `scheme://host[:port]` or `scheme:///host[:port]`
/// target URI, produced once at resolver construction and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTarget {
    /// The authority presented to the RPC channel (used for TLS hostname,
    /// auth). This is the `host:port` pair as written in the target, before
    /// DNS-name normalization.
    authority: String,
    /// The fully-qualified DNS name to poll.
    host: Name,
    /// String form of `host`, used in error messages and in the resolver's
    /// search-path configuration for the DNS client.
    host_str: String,
    /// Non-zero; either parsed from the URI or the caller's default port.
    port: u16,
}

impl ParsedTarget {
    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn host(&self) -> &Name {
        &self.host
    }

    pub fn host_str(&self) -> &str {
        &self.host_str
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Parses `uri` (`scheme://host[:port]` or `scheme:///host[:port]`)
    /// using `default_port` when the URI omits a port.
    ///
    /// `default_port` must be non-zero; resolvers are always constructed
    /// with a caller-supplied default, so this is an invariant of the
    /// provider rather than something this parser needs to validate.
    pub fn parse(uri: &str, default_port: u16) -> Result<ParsedTarget, TargetParseError> {
        // Split on the scheme's colon, not on "://": an opaque-form target
        // with no authority marker at all (`scheme:host`) must still be
        // distinguishable from `scheme://host`, since the former is a
        // PathMissingSlash error rather than a valid bare host.
        let rest = uri.splitn(2, ':').nth(1).unwrap_or("");

        // `scheme:///host[:port]` has an empty authority and puts the host
        // in the path, prefixed with a `/`. `scheme://host[:port]` has a
        // non-empty authority and no meaningful path.
        let (authority, path) = match rest.strip_prefix("//") {
            Some(after_slashes) => match after_slashes.find('/') {
                Some(idx) => (&after_slashes[..idx], &after_slashes[idx..]),
                None => (after_slashes, ""),
            },
            None => ("", rest),
        };

        let host_and_port = if authority.is_empty() {
            if path.is_empty() {
                ""
            } else {
                path.strip_prefix('/')
                    .ok_or_else(|| TargetParseError::PathMissingSlash {
                        uri: uri.to_string(),
                    })?
            }
        } else {
            authority
        };
        // Trailing path segments (if any) are not part of the authority.
        let host_and_port = host_and_port.split('/').next().unwrap_or("");

        if host_and_port.is_empty() {
            return Err(TargetParseError::MissingHost {
                uri: uri.to_string(),
            });
        }

        // Reuse the `url` crate's authority parser the same way production
        // URI handling elsewhere in this ecosystem does: prepend a scheme
        // `url::Url` understands so it splits host and port for us,
        // including bracketed IPv6 literals.
        let probe = format!("https://{host_and_port}");
        let parsed = url::Url::parse(&probe).map_err(|err| TargetParseError::MalformedAuthority {
            uri: uri.to_string(),
            reason: err.to_string(),
        })?;

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| TargetParseError::MissingHost {
                uri: uri.to_string(),
            })?;
        let port = parsed.port().unwrap_or(default_port);

        let mut name = Name::from_ascii(host).map_err(|err| TargetParseError::InvalidDnsName {
            uri: uri.to_string(),
            host: host.to_string(),
            source: Box::new(err),
        })?;
        name.set_fqdn(true);
        let host_str = name.to_ascii();

        Ok(ParsedTarget {
            authority: host_and_port.to_string(),
            host: name,
            host_str,
            port,
        })
    }
}
