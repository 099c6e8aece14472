// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    strings::*,
    structs::{serde_as_string, Address},
    AddressError,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::{fmt, str::FromStr};

// One delimiter kind per literal, no leading or trailing delimiter.
lazy_static! {
    static ref MAC_RE: Regex = Regex::new(
        r"(?ix)^(?:
            [0-9a-f]{2}(?::[0-9a-f]{2}){5}
          | [0-9a-f]{2}(?:-[0-9a-f]{2}){5}
          | [0-9a-f]{6}[:-][0-9a-f]{6}
          | [0-9a-f]{4}(?:\.[0-9a-f]{4}){2}
        )$"
    )
    .expect("valid MAC address regex");
}

/**
A 48-bit IEEE MAC address.

Accepted notations: `08:00:2b:01:02:03`, `08-00-2b-01-02-03`,
`08002b:010203`, `08002b-010203` and `0800.2b01.0203` (case-insensitive).
Always displayed as lowercase colon-separated pairs.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddr(bytes)
    }

    pub const fn bytes(&self) -> [u8; 6] {
        self.0
    }

    /// Link-local IPv6 address with this MAC as a modified EUI-64 interface
    /// identifier (`fe80::xxxx:xxff:fexx:xxxx`).
    pub fn to_link_local(&self) -> Address {
        let m: [u8; 6] = self.0;
        let mut o: [u8; 16] = [0; 16];
        o[0] = 0xFE;
        o[1] = 0x80;
        o[8..11].copy_from_slice(&[m[0] ^ 0x02, m[1], m[2]]);
        o[11] = 0xFF;
        o[12] = 0xFE;
        o[13..].copy_from_slice(&m[3..]);
        Address::v6(o)
    }
}

impl FromStr for MacAddr {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text: &str = s.trim();
        if !MAC_RE.is_match(text) {
            return Err(AddressError::format(text, ERR_MAC));
        }
        let digits: Vec<u8> = text.bytes().filter(u8::is_ascii_hexdigit).collect();
        let mut out: [u8; 6] = [0; 6];
        for (byte, pair) in out.iter_mut().zip(digits.chunks_exact(2)) {
            let pair: &str = std::str::from_utf8(pair).map_err(|_| AddressError::format(text, ERR_MAC))?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| AddressError::format(text, ERR_MAC))?;
        }
        Ok(MacAddr(out))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddr(bytes)
    }
}

serde_as_string!(MacAddr);

/* -------------------------------------------------------------------------- */
