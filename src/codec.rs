// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text <-> value conversion for addresses, cidr networks and inet values.

use super::{
    strings::*,
    structs::{embeds_ipv4_rule, mask_u128, Address, Inet, Network},
    AddressError, IPV6_BITS,
};
use tracing::trace;

/// Which textual context a literal comes from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseMode {
    /// Network literal: IPv4 may be shortened to `a[.b[.c[.d]]]`.
    Cidr,
    /// Host literal: IPv4 must be a full dotted quad.
    Inet,
}

/**
Parse a single address (no `/prefix`) from a string.

Accepts:
- IPv4 dotted decimal. With [ParseMode::Cidr] 1 to 4 groups are allowed and
  missing trailing groups are zero, with [ParseMode::Inet] exactly 4.
- IPv6 colon-hex, full or compressed with a single `::`. The last group may be
  a dotted-decimal IPv4 address, which marks the result as embedding IPv4.
*/
pub fn parse_address(text: &str, mode: ParseMode) -> Result<Address, AddressError> {
    parse_host(text.trim(), mode).map_err(|reason| AddressError::format(text, reason))
}

/**
Parse a cidr-style network `addr[/prefix]`.

Without an explicit prefix IPv6 networks get /128 and IPv4 networks get the
minimal classful netmask covering the non-zero octets (see [classful_prefix]).
Host bits beyond the prefix must be zero.
*/
pub fn parse_network(text: &str) -> Result<Network, AddressError> {
    let (host, prefix) = split_prefix(text)?;
    let addr: Address = parse_host(host, ParseMode::Cidr)
        .map_err(|reason| AddressError::format(text, reason))?;

    let prefix: u8 = match (prefix, addr) {
        (Some(p), _) => parse_prefix(text, p, addr.bit_width())?,
        (None, Address::V4(octets)) => {
            let inferred: u8 = classful_prefix(octets);
            trace!(literal = text, prefix = inferred, "inferred classful netmask");
            inferred
        }
        (None, Address::V6 { .. }) => IPV6_BITS,
    };

    if addr.as_u128() & !mask_u128(addr.bit_width(), prefix) != 0 {
        return Err(AddressError::HostBitsNotZero(text.trim().to_string()));
    }
    Ok(Network::new_unchecked(addr, prefix))
}

/// Parse an inet-style value `addr[/prefix]`; the prefix defaults to the full width.
pub fn parse_inet(text: &str) -> Result<Inet, AddressError> {
    let (host, prefix) = split_prefix(text)?;
    let addr: Address = parse_host(host, ParseMode::Inet)
        .map_err(|reason| AddressError::format(text, reason))?;
    let prefix: u8 = match prefix {
        Some(p) => parse_prefix(text, p, addr.bit_width())?,
        None => addr.bit_width(),
    };
    Inet::new(addr, prefix)
}

/**
Canonical text for an address, optionally followed by `/prefix`.

IPv6 is always written as eight zero-padded lowercase hex groups, never
compressed; when the address embeds IPv4 the last 32 bits are dotted decimal.
The prefix is only written when it is shorter than the address width.
*/
pub fn format_address(addr: &Address, prefix: Option<u8>) -> String {
    let mut s: String = match addr {
        Address::V4(octets) => dotted(octets),
        Address::V6 { octets, embeds_ipv4 } => {
            let hex_len: usize = if *embeds_ipv4 { 12 } else { 16 };
            let mut groups: Vec<String> = octets[..hex_len]
                .chunks_exact(2)
                .map(|w| format!("{:02x}{:02x}", w[0], w[1]))
                .collect();
            if *embeds_ipv4 {
                groups.push(dotted(&octets[12..]));
            }
            groups.join(COLON)
        }
    };
    if let Some(p) = prefix {
        if p < addr.bit_width() {
            s.push_str(SLASH);
            s.push_str(&p.to_string());
        }
    }
    s
}

/**
Legacy BSD-style default netmask for an IPv4 network literal without a prefix:
the shortest of /8, /16, /24 that covers all non-zero octets, but never
shorter than the address class allows (A: /8, B: /16, C: /24). Anything
else gets /32.
*/
pub(crate) fn classful_prefix(octets: [u8; 4]) -> u8 {
    let [a, b, c, d] = octets;
    match a {
        0..=127 if b == 0 && c == 0 && d == 0 => 8,
        0..=191 if c == 0 && d == 0 => 16,
        0..=223 if d == 0 => 24,
        _ => 32,
    }
}

/* ---------------------------------- */

/// Split `addr[/prefix]` into its parts.
fn split_prefix(text: &str) -> Result<(&str, Option<&str>), AddressError> {
    let mut parts = text.trim().split(SLASH);
    let host: &str = parts.next().unwrap_or_default().trim();
    let prefix: Option<&str> = parts.next();
    if parts.next().is_some() {
        return Err(AddressError::format(text, ERR_SLASHES));
    }
    Ok((host, prefix))
}

fn parse_prefix(text: &str, prefix: &str, bits: u8) -> Result<u8, AddressError> {
    let p: &str = prefix.trim();
    let invalid = || AddressError::InvalidPrefix {
        literal: text.trim().to_string(),
        prefix: p.to_string(),
    };
    if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match p.parse::<u8>() {
        Ok(v) if v <= bits => Ok(v),
        _ => Err(invalid()),
    }
}

fn parse_host(host: &str, mode: ParseMode) -> Result<Address, &'static str> {
    if host.is_empty() {
        return Err(ERR_EMPTY);
    }
    if host.contains(COLON) {
        let (octets, dotted) = parse_v6(host)?;
        return Ok(Address::V6 {
            embeds_ipv4: dotted || embeds_ipv4_rule(&octets),
            octets,
        });
    }
    parse_v4(host, mode == ParseMode::Cidr).map(Address::V4)
}

fn parse_v4(s: &str, allow_short: bool) -> Result<[u8; 4], &'static str> {
    let groups: Vec<&str> = s.split(DOT).collect();
    let valid_len: bool = match allow_short {
        true => (1..=4).contains(&groups.len()),
        false => groups.len() == 4,
    };
    if !valid_len {
        return Err(ERR_V4_GROUPS);
    }

    let mut octets: [u8; 4] = [0; 4];
    for (i, g) in groups.iter().enumerate() {
        if g.is_empty() || g.len() > 3 || !g.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ERR_V4_GROUP);
        }
        octets[i] = g.parse::<u8>().map_err(|_| ERR_V4_GROUP)?;
    }
    Ok(octets)
}

/// Returns the 16 bytes and whether a dotted IPv4 suffix was used.
fn parse_v6(s: &str) -> Result<([u8; 16], bool), &'static str> {
    /*
    Split around the (single) "::" if present: the head fills the address
    from the front, the tail from the back, and the gap is zeroes.
    */
    let (head, tail, compressed) = match s.find(DOUBLE_COLON) {
        Some(i) => {
            let tail: &str = &s[i + 2..];
            if tail.contains(DOUBLE_COLON) {
                return Err(ERR_V6_SHORTHAND);
            }
            (&s[..i], tail, true)
        }
        None => (s, "", false),
    };

    // only the very last group of the literal may be dotted
    let (head_words, head_dotted) = v6_words(&v6_groups(head)?, !compressed)?;
    let (tail_words, tail_dotted) = v6_words(&v6_groups(tail)?, compressed)?;

    // "::" must stand for at least one zero group
    let total: usize = head_words.len() + tail_words.len();
    if (compressed && total > 7) || (!compressed && total != 8) {
        return Err(ERR_V6_GROUPS);
    }

    let mut words: [u16; 8] = [0; 8];
    words[..head_words.len()].copy_from_slice(&head_words);
    words[8 - tail_words.len()..].copy_from_slice(&tail_words);

    let mut octets: [u8; 16] = [0; 16];
    for (i, w) in words.iter().enumerate() {
        octets[2 * i..2 * i + 2].copy_from_slice(&w.to_be_bytes());
    }
    Ok((octets, head_dotted || tail_dotted))
}

/// Colon separated groups; an empty group means a stray ':'.
fn v6_groups(s: &str) -> Result<Vec<&str>, &'static str> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    let groups: Vec<&str> = s.split(COLON).collect();
    if groups.iter().any(|g| g.is_empty()) {
        return Err(ERR_V6_COLON);
    }
    Ok(groups)
}

fn v6_words(groups: &[&str], last_may_be_dotted: bool) -> Result<(Vec<u16>, bool), &'static str> {
    let mut words: Vec<u16> = Vec::with_capacity(8);
    let mut dotted: bool = false;
    for (i, g) in groups.iter().enumerate() {
        if g.contains(DOT) {
            if !last_may_be_dotted || i + 1 != groups.len() {
                return Err(ERR_V6_DOTTED);
            }
            let o: [u8; 4] = parse_v4(g, false)?;
            words.push(u16::from_be_bytes([o[0], o[1]]));
            words.push(u16::from_be_bytes([o[2], o[3]]));
            dotted = true;
        } else {
            if g.len() > 4 || !g.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ERR_V6_GROUP);
            }
            words.push(u16::from_str_radix(g, 16).map_err(|_| ERR_V6_GROUP)?);
        }
    }
    Ok((words, dotted))
}

#[inline]
fn dotted(octets: &[u8]) -> String {
    octets
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<String>>()
        .join(DOT)
}

/* -------------------------------------------------------------------------- */
