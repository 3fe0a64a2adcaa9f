//! # Local Address Candidates
//!
//! Addresses surfaced while gathering local connection candidates, and the
//! best-effort network class guessed from them.
//!
//! A browser or host never exposes the real subnet mask to this layer, so
//! [`NetworkClass`] is a labelled hint derived from the address prefix alone.

use std::fmt;

use serde::Serialize;

/// An IPv4-shaped address taken verbatim from a candidate line.
///
/// Equality and hashing use the literal text, so `"10.0.0.1"` and
/// `"010.0.0.1"` are distinct candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AddressCandidate(String);

impl AddressCandidate {
    /// Accepts `text` unless it is an unspecified or loopback address.
    pub fn accept(text: &str) -> Option<Self> {
        if is_discarded(text) {
            return None;
        }
        Some(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Same prefix test as [`NetworkClass::of`], so a candidate labelled
    /// private always lands in one of the private classes.
    pub fn is_private(&self) -> bool {
        NetworkClass::of(self) != NetworkClass::Unknown
    }
}

impl fmt::Display for AddressCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_discarded(text: &str) -> bool {
    text.starts_with("0.") || text.starts_with("127.") || text == "0.0.0.0"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NetworkClass {
    ClassAPrivate,
    ClassBPrivate,
    ClassCPrivate,
    Unknown,
}

impl NetworkClass {
    /// Guesses the class from the first gathered candidate.
    pub fn of(candidate: &AddressCandidate) -> Self {
        let text = candidate.as_str();
        if text.starts_with("192.168.") {
            NetworkClass::ClassCPrivate
        } else if text.starts_with("10.") {
            NetworkClass::ClassAPrivate
        } else if text.starts_with("172.") {
            NetworkClass::ClassBPrivate
        } else {
            NetworkClass::Unknown
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NetworkClass::ClassAPrivate => "Class A Private",
            NetworkClass::ClassBPrivate => "Class B Private",
            NetworkClass::ClassCPrivate => "Class C Private",
            NetworkClass::Unknown => "Unknown",
        }
    }

    pub fn subnet_guess(self) -> &'static str {
        match self {
            NetworkClass::ClassAPrivate => "255.0.0.0 or 255.255.0.0 (likely)",
            NetworkClass::ClassBPrivate => "255.255.0.0 (likely)",
            NetworkClass::ClassCPrivate => "255.255.255.0 (likely)",
            NetworkClass::Unknown => "N/A",
        }
    }
}
