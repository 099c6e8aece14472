// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    codec::{self, ParseMode},
    AddressError, IPV4_BITS, IPV6_BITS,
};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

/// IP address family
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum IpFam {
    V4,
    V6,
}

impl IpFam {
    /// Address width in bits (32 or 128).
    pub const fn bits(self) -> u8 {
        match self {
            IpFam::V4 => IPV4_BITS,
            IpFam::V6 => IPV6_BITS,
        }
    }
}

/* -------------------------------------------------------------------------- */

/**
A single IPv4 or IPv6 address as its big-endian bytes.

The `embeds_ipv4` flag of the v6 variant only affects presentation (last 32
bits rendered as dotted decimal) and the usable-range/broadcast rules of
networks built on it. It never takes part in equality, ordering or hashing.
*/
#[derive(Clone, Copy, Debug)]
pub enum Address {
    V4([u8; 4]),
    V6 { octets: [u8; 16], embeds_ipv4: bool },
}

impl Address {
    pub const fn v4(octets: [u8; 4]) -> Self {
        Address::V4(octets)
    }

    /// IPv6 address; the embedded-IPv4 flag is derived from the bytes.
    pub const fn v6(octets: [u8; 16]) -> Self {
        Address::V6 {
            embeds_ipv4: embeds_ipv4_rule(&octets),
            octets,
        }
    }

    /// Build an address from a 4 or 16 byte slice.
    pub fn from_octets(bytes: &[u8]) -> Result<Self, AddressError> {
        if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
            return Ok(Address::v4(octets));
        }
        if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
            return Ok(Address::v6(octets));
        }
        Err(AddressError::format(
            format!("{bytes:02x?}"),
            "address must be 4 or 16 bytes long",
        ))
    }

    /// The all-zero address of the given family.
    pub const fn zero(fam: IpFam) -> Self {
        match fam {
            IpFam::V4 => Address::V4([0; 4]),
            IpFam::V6 => Address::V6 {
                octets: [0; 16],
                embeds_ipv4: false,
            },
        }
    }

    pub fn octets(&self) -> &[u8] {
        match self {
            Address::V4(o) => o,
            Address::V6 { octets, .. } => octets,
        }
    }

    pub const fn family(&self) -> IpFam {
        match self {
            Address::V4(_) => IpFam::V4,
            Address::V6 { .. } => IpFam::V6,
        }
    }

    pub const fn bit_width(&self) -> u8 {
        self.family().bits()
    }

    pub const fn is_ipv4(&self) -> bool {
        matches!(self, Address::V4(_))
    }

    pub const fn is_ipv6(&self) -> bool {
        matches!(self, Address::V6 { .. })
    }

    /// True for v6 addresses whose low 32 bits are an IPv4 address, either
    /// by the zero/marker byte pattern or because they were written dotted.
    pub const fn embeds_ipv4(&self) -> bool {
        match self {
            Address::V4(_) => false,
            Address::V6 { embeds_ipv4, .. } => *embeds_ipv4,
        }
    }

    /// Same bytes, explicit embedded-IPv4 flag. No-op for IPv4.
    pub const fn with_embedded_ipv4(self, flag: bool) -> Self {
        match self {
            Address::V4(_) => self,
            Address::V6 { octets, .. } => Address::V6 {
                octets,
                embeds_ipv4: flag,
            },
        }
    }

    /// Checked comparison: addresses of different families are not comparable.
    pub fn try_cmp(&self, other: &Address) -> Result<Ordering, AddressError> {
        self.same_family(other)?;
        Ok(self.cmp(other))
    }

    pub(crate) fn same_family(&self, other: &Address) -> Result<(), AddressError> {
        if self.family() != other.family() {
            return Err(AddressError::FamilyMismatch(*self, *other));
        }
        Ok(())
    }

    /// The address as an unsigned integer; IPv4 occupies the low 32 bits.
    #[inline]
    pub(crate) fn as_u128(&self) -> u128 {
        match self {
            Address::V4(o) => u32::from_be_bytes(*o) as u128,
            Address::V6 { octets, .. } => u128::from_be_bytes(*octets),
        }
    }

    /// New address of the same family from an integer, keeping this
    /// address' embedded-IPv4 flag. `v` must fit the family's width.
    #[inline]
    pub(crate) fn derive(&self, v: u128) -> Address {
        match self {
            Address::V4(_) => {
                debug_assert!(v <= u32::MAX as u128);
                Address::V4((v as u32).to_be_bytes())
            }
            Address::V6 { embeds_ipv4, .. } => {
                let octets: [u8; 16] = v.to_be_bytes();
                Address::V6 {
                    embeds_ipv4: *embeds_ipv4 || embeds_ipv4_rule(&octets),
                    octets,
                }
            }
        }
    }
}

/// bytes 0-9 zero, bytes 10-11 `00 00` or `ff ff`, byte 12 non-zero
pub(crate) const fn embeds_ipv4_rule(o: &[u8; 16]) -> bool {
    let mut i = 0;
    while i < 10 {
        if o[i] != 0 {
            return false;
        }
        i += 1;
    }
    let marker = (o[10] == 0 && o[11] == 0) || (o[10] == 0xFF && o[11] == 0xFF);
    marker && o[12] != 0
}

impl PartialEq for Address {
    fn eq(&self, other: &Address) -> bool {
        self.octets() == other.octets()
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.octets().hash(state);
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Address) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order for sorting: all IPv4 before all IPv6, numeric within a
/// family. Use [Address::try_cmp] when mixing families is an error.
impl Ord for Address {
    fn cmp(&self, other: &Address) -> Ordering {
        let fam_key = |a: &Address| match a.family() {
            IpFam::V4 => 0u8,
            IpFam::V6 => 1u8,
        };
        (fam_key(self), self.as_u128()).cmp(&(fam_key(other), other.as_u128()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::format_address(self, None))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Full host literal without a prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::parse_address(s, ParseMode::Inet)
    }
}

/* -------------------------------------------------------------------------- */

/// A cidr-style network: base address plus prefix, host bits always zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Network {
    addr: Address,
    /// **v4**: `0..=32`, **v6**: `0..=128`
    prefix: u8,
}

impl Network {
    /// Create a network. Fails if `prefix` is too long for the family or
    /// `addr` has bits set beyond `prefix`.
    pub fn new(addr: Address, prefix: u8) -> Result<Self, AddressError> {
        check_prefix(&addr, prefix)?;
        if addr.as_u128() & !mask_u128(addr.bit_width(), prefix) != 0 {
            return Err(AddressError::HostBitsNotZero(
                codec::format_address(&addr, Some(prefix)),
            ));
        }
        Ok(Network { addr, prefix })
    }

    /// The network of the given prefix which contains `addr`.
    pub fn covering(addr: Address, prefix: u8) -> Result<Self, AddressError> {
        check_prefix(&addr, prefix)?;
        let base: u128 = addr.as_u128() & mask_u128(addr.bit_width(), prefix);
        Ok(Network {
            addr: addr.derive(base),
            prefix,
        })
    }

    /// Construct without validation; callers guarantee the invariant.
    pub(crate) const fn new_unchecked(addr: Address, prefix: u8) -> Self {
        Network { addr, prefix }
    }

    /// The base (first) address.
    pub const fn address(&self) -> Address {
        self.addr
    }

    pub const fn prefix(&self) -> u8 {
        self.prefix
    }

    pub const fn family(&self) -> IpFam {
        self.addr.family()
    }

    pub const fn bit_width(&self) -> u8 {
        self.addr.bit_width()
    }

    pub const fn is_ipv4(&self) -> bool {
        self.addr.is_ipv4()
    }

    pub const fn is_ipv6(&self) -> bool {
        self.addr.is_ipv6()
    }

    pub const fn embeds_ipv4(&self) -> bool {
        self.addr.embeds_ipv4()
    }

    /// Number of host bits, i.e. `bit_width - prefix`.
    pub const fn host_bits(&self) -> u8 {
        self.bit_width() - self.prefix
    }

    /// Returns true if the network is a single host (/32 or /128).
    pub const fn is_host(&self) -> bool {
        self.prefix == self.bit_width()
    }
}

#[inline]
fn check_prefix(addr: &Address, prefix: u8) -> Result<(), AddressError> {
    if prefix > addr.bit_width() {
        return Err(AddressError::InvalidPrefix {
            literal: addr.to_string(),
            prefix: prefix.to_string(),
        });
    }
    Ok(())
}

impl PartialOrd for Network {
    fn partial_cmp(&self, other: &Network) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Network {
    fn cmp(&self, other: &Network) -> Ordering {
        self.addr
            .cmp(&other.addr)
            .then(self.prefix.cmp(&other.prefix))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::format_address(&self.addr, Some(self.prefix)))
    }
}

impl FromStr for Network {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::parse_network(s)
    }
}

/* -------------------------------------------------------------------------- */

/// An inet-style value: a host address within a network context. The host
/// bits are kept as given.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Inet {
    addr: Address,
    prefix: u8,
}

impl Inet {
    pub fn new(addr: Address, prefix: u8) -> Result<Self, AddressError> {
        check_prefix(&addr, prefix)?;
        Ok(Inet { addr, prefix })
    }

    pub(crate) const fn new_unchecked(addr: Address, prefix: u8) -> Self {
        Inet { addr, prefix }
    }

    /// A single host: full-width prefix.
    pub const fn host(addr: Address) -> Self {
        Inet {
            prefix: addr.bit_width(),
            addr,
        }
    }

    pub const fn address(&self) -> Address {
        self.addr
    }

    pub const fn prefix(&self) -> u8 {
        self.prefix
    }

    pub const fn family(&self) -> IpFam {
        self.addr.family()
    }

    /// The cidr-style network this host lives in.
    pub fn network(&self) -> Network {
        let base: u128 = self.addr.as_u128() & mask_u128(self.addr.bit_width(), self.prefix);
        Network::new_unchecked(self.addr.derive(base), self.prefix)
    }
}

impl From<Address> for Inet {
    fn from(addr: Address) -> Self {
        Inet::host(addr)
    }
}

impl fmt::Display for Inet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::format_address(&self.addr, Some(self.prefix)))
    }
}

impl FromStr for Inet {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::parse_inet(s)
    }
}

/* ---------------------------------- */

macro_rules! serde_as_string {
    ($($ty:ty),+) => {$(
        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $ty {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<$ty, D::Error> {
                let s = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                s.parse::<$ty>().map_err(::serde::de::Error::custom)
            }
        }
    )+};
}
pub(crate) use serde_as_string;

serde_as_string!(Address, Network, Inet);

/* ---------------------------------- */

/**
Returns a u128 with prefix high bits set, remaining low bits zero.

bits: 32 or 128, prefix: `0..=bits`
*/
#[inline]
pub(crate) fn mask_u128(bits: u8, prefix: u8) -> u128 {
    if prefix == 0 {
        return 0;
    }
    let all: u128 = if bits == IPV6_BITS {
        !0u128
    } else {
        (1u128 << bits) - 1
    };
    if prefix >= bits {
        return all;
    }
    let low: u8 = bits - prefix;
    all & (!((1u128 << low) - 1))
}

/// All-ones value of the given width.
#[inline]
pub(crate) fn max_u128(bits: u8) -> u128 {
    mask_u128(bits, bits)
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const TEST_V4: &str = "192.168.1.0/30";
    const TEST_V6: &str = "::/126";
    const TEST_EMB: &str = "::ffff:192.168.1.1";
    const TEST_EMB_HEX: &str = "::ffff:c0a8:101";

    #[test]
    fn test_network_parse_v4() {
        let net: Network = TEST_V4.parse().unwrap();
        assert_eq!(net.address(), Address::v4([192, 168, 1, 0]));
        assert_eq!(net.prefix(), 30);
        assert_eq!(net.to_string(), TEST_V4);
    }

    #[test]
    fn test_network_parse_v6() {
        let net: Network = TEST_V6.parse().unwrap();
        assert_eq!(net.address(), Address::zero(IpFam::V6));
        assert_eq!(net.prefix(), 126);
        assert_eq!(net.host_bits(), 2);
    }

    #[test]
    fn test_new_rejects_host_bits() {
        let err = Network::new(Address::v4([10, 0, 0, 1]), 24).unwrap_err();
        assert!(matches!(err, AddressError::HostBitsNotZero(_)));
        assert!(Network::new(Address::v4([10, 0, 0, 1]), 33).is_err());
        assert!(Network::new(Address::v4([10, 0, 0, 1]), 32).is_ok());
    }

    #[test]
    fn test_covering() {
        let net = Network::covering(Address::v4([10, 1, 2, 3]), 16).unwrap();
        assert_eq!(net.to_string(), "10.1.0.0/16");
    }

    #[test]
    fn test_flag_ignored_by_equality() {
        let a: Address = TEST_EMB.parse().unwrap();
        let b: Address = TEST_EMB_HEX.parse().unwrap();
        assert!(a.embeds_ipv4());
        // the marker pattern applies here too
        assert!(b.embeds_ipv4());
        let c = b.with_embedded_ipv4(false);
        assert_eq!(a, c);

        let mut set: HashSet<Address> = HashSet::new();
        set.insert(a);
        assert!(set.contains(&c));
    }

    #[test]
    fn test_embedding_rule() {
        assert!(!Address::v6([0; 16]).embeds_ipv4());
        let mut loopback = [0u8; 16];
        loopback[15] = 1;
        assert!(!Address::v6(loopback).embeds_ipv4());
        let mut compat = [0u8; 16];
        compat[12..].copy_from_slice(&[10, 0, 0, 1]);
        assert!(Address::v6(compat).embeds_ipv4());
        compat[10] = 0xFF;
        assert!(!Address::v6(compat).embeds_ipv4());
    }

    #[test]
    fn test_ordering() {
        let a: Address = "10.0.0.1".parse().unwrap();
        let b: Address = "10.0.0.2".parse().unwrap();
        let c: Address = "::1".parse().unwrap();
        assert!(a < b);
        assert_eq!(a.try_cmp(&b).unwrap(), Ordering::Less);
        assert!(matches!(a.try_cmp(&c), Err(AddressError::FamilyMismatch(_, _))));
        assert!(b < c);

        let n1: Network = "10.0.0.0/8".parse().unwrap();
        let n2: Network = "10.0.0.0/16".parse().unwrap();
        assert!(n1 < n2);
    }

    #[test]
    fn test_from_octets() {
        assert_eq!(Address::from_octets(&[1, 2, 3, 4]).unwrap(), Address::v4([1, 2, 3, 4]));
        assert!(Address::from_octets(&[0u8; 16]).unwrap().is_ipv6());
        assert!(Address::from_octets(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_inet_network() {
        let inet: Inet = "10.10.10.120/8".parse().unwrap();
        assert_eq!(inet.address(), Address::v4([10, 10, 10, 120]));
        assert_eq!(inet.network().to_string(), "10.0.0.0/8");
        assert_eq!(Inet::host(inet.address()).prefix(), 32);
    }

    #[test]
    fn test_mask_u128() {
        assert_eq!(mask_u128(IPV4_BITS, 0), 0);
        assert_eq!(mask_u128(IPV4_BITS, 24), 0xFFFF_FF00);
        assert_eq!(mask_u128(IPV4_BITS, 32), 0xFFFF_FFFF);
        assert_eq!(mask_u128(IPV6_BITS, 128), u128::MAX);
        assert_eq!(mask_u128(IPV6_BITS, 1), 1u128 << 127);
    }

    #[test]
    fn test_serde_as_string() {
        let net: Network = "2002::123.45.67.64/122".parse().unwrap();
        let json = serde_json::to_string(&net).unwrap();
        assert_eq!(json, "\"2002:0000:0000:0000:0000:0000:123.45.67.64/122\"");
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back, net);
        assert!(serde_json::from_str::<Network>("\"10.0.0.1/8\"").is_err());
    }
}
