//! Capabilities an extension can provide

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Set of adapter capabilities registered under one extension name
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        const AUTHORIZATION = 1 << 0;
        const AUDITING = 1 << 1;
        const CONFIGURATION = 1 << 2;
    }
}

impl Capabilities {
    /// Lowercase name of a single capability, as used in error messages
    pub fn label(self) -> &'static str {
        if self == Self::AUTHORIZATION {
            "authorization"
        } else if self == Self::AUDITING {
            "auditing"
        } else if self == Self::CONFIGURATION {
            "configuration"
        } else {
            "mixed"
        }
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|c| c.label()).collect();
        f.write_str(&names.join(", "))
    }
}
