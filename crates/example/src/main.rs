//! Example CLI that resolves text into typed values.
//!
//! # Usage
//!
//! ```bash
//! strparse-demo <type> <text>
//! ```
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=strparse_core=debug strparse-demo version 1.4.2
//! ```

use core::fmt;
use std::net::SocketAddr;
use strparse_core::ParsedValue;
use strparse_core::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// A `major.minor.patch` triple, resolved through its `parse` factory.
struct Version {
    major: u32,
    minor: u32,
    patch: u32,
}

#[derive(Debug, thiserror::Error)]
#[error("expected major.minor.patch, got '{0}'")]
struct MalformedVersion(String);

#[parse_factory]
impl Version {
    pub fn parse(input: &str) -> Result<Self, MalformedVersion> {
        let malformed = || MalformedVersion(input.to_owned());
        let mut parts = input.split('.').map(str::parse::<u32>);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor)), Some(Ok(patch)), None) => Ok(Self {
                major,
                minor,
                patch,
            }),
            _ => Err(malformed()),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A comma-separated tag list, resolved through an explicit registration.
struct Tags(Vec<String>);

fn parse_tags(input: &str) -> Result<Tags, core::convert::Infallible> {
    Ok(Tags(
        input
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect(),
    ))
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// A percentage, resolved through its declared `FromStr` convention.
#[derive(ParseConvention)]
struct Percent(u8);

#[derive(Debug, thiserror::Error)]
#[error("expected a percentage between 0% and 100%, got '{0}'")]
struct InvalidPercent(String);

impl core::str::FromStr for Percent {
    type Err = InvalidPercent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_end_matches('%')
            .parse::<u8>()
            .ok()
            .filter(|value| *value <= 100)
            .map(Percent)
            .ok_or_else(|| InvalidPercent(s.to_owned()))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Maps a command-line type name to its key and a formatter for the result.
fn lookup(name: &str) -> Option<(TypeKey, fn(&ParsedValue) -> String)> {
    fn show<T: fmt::Display + 'static>(value: &ParsedValue) -> String {
        value
            .downcast_ref::<T>()
            .map_or_else(|| "<unexpected type>".to_owned(), ToString::to_string)
    }

    Some(match name {
        "bool" => (TypeKey::of::<bool>(), show::<bool>),
        "int" => (TypeKey::of::<i64>(), show::<i64>),
        "float" => (TypeKey::of::<f64>(), show::<f64>),
        "addr" => (TypeKey::of::<SocketAddr>(), show::<SocketAddr>),
        "version" => (TypeKey::of::<Version>(), show::<Version>),
        "tags" => (TypeKey::of::<Tags>(), show::<Tags>),
        "percent" => (TypeKey::of::<Percent>(), show::<Percent>),
        _ => return None,
    })
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
        .ok();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        tracing::error!("usage: strparse-demo <bool|int|float|addr|version|tags|percent> <text>");
        std::process::exit(1);
    }

    let Some((key, show)) = lookup(&args[1]) else {
        tracing::error!(type_name = %args[1], "unknown type");
        std::process::exit(1);
    };

    let registry = ParserRegistry::new();
    if let Err(e) = registry.register(parse_tags) {
        tracing::error!(error = %e, "failed to register tag parser");
        std::process::exit(1);
    }

    match registry.parse_as(&args[2], key) {
        Ok(value) => {
            let origin = registry
                .cached(key)
                .map_or_else(|| "unknown".to_owned(), |c| c.origin().to_string());
            tracing::info!(type_name = %key, %origin, value = %show(&value), "parsed");
        }
        Err(e) => {
            tracing::error!(type_name = %key, error = %e, "conversion failed");
            std::process::exit(1);
        }
    }
}
