// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Netmask, wildcard, broadcast and usable-range derivation.

use super::{
    structs::{mask_u128, max_u128, Address, Inet, Network},
    AddressError,
};
use num_bigint::BigInt;
use serde::Serialize;
use std::cmp::Ordering;

/// Whether the first and last address of a network are usable hosts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum UsableRange {
    /// network and broadcast addresses are excluded (`low + 1 ..= high - 1`)
    ExcludeEdges,
    /// every address from `low` to `high` is usable
    Raw,
}

/**
Usable-range rule for IPv6 networks which embed an IPv4 address.

Legacy fixtures disagree here: some treat `2002::123.45.67.64/122` like an
IPv4 network (first and last address reserved), others report the raw
bounds. This crate reserves them; use [Network::lowest_usable_with] and
friends to get the other behaviour.
*/
pub const EMBEDDED_IPV4_USABLE_RANGE: UsableRange = UsableRange::ExcludeEdges;

/// Extended properties of a network, in one bundle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct NetworkInfo {
    pub network: Network,
    pub netmask: Address,
    pub hostmask: Address,
    pub broadcast: Option<Address>,
    pub mask_length: u8,
}

impl Network {
    /// `prefix / 8` bytes of 0xFF, a boundary byte with the top
    /// `prefix % 8` bits set, then zeroes.
    pub fn netmask(&self) -> Address {
        let mask: u128 = mask_u128(self.bit_width(), self.prefix());
        Address::zero(self.family()).derive(mask)
    }

    /// Bitwise complement of [Network::netmask], a.k.a. hostmask.
    pub fn wildcard(&self) -> Address {
        let bits: u8 = self.bit_width();
        let mask: u128 = !mask_u128(bits, self.prefix()) & max_u128(bits);
        Address::zero(self.family()).derive(mask)
    }

    /// First address, all host bits clear.
    pub fn low(&self) -> Address {
        let addr: Address = self.address();
        addr.derive(addr.as_u128() & mask_u128(self.bit_width(), self.prefix()))
    }

    /// Last address, all host bits set.
    pub fn high(&self) -> Address {
        let bits: u8 = self.bit_width();
        let addr: Address = self.address();
        addr.derive(addr.as_u128() | (!mask_u128(bits, self.prefix()) & max_u128(bits)))
    }

    /// The rule applied to this network by default.
    pub fn usable_range_rule(&self) -> UsableRange {
        match self.address() {
            Address::V4(_) => UsableRange::ExcludeEdges,
            Address::V6 { embeds_ipv4: true, .. } => EMBEDDED_IPV4_USABLE_RANGE,
            Address::V6 { .. } => UsableRange::Raw,
        }
    }

    /**
    First usable host address.

    For IPv4 (and IPv6 embedding IPv4, per [EMBEDDED_IPV4_USABLE_RANGE])
    networks shorter than the full width this skips the network address.
    Note that for an IPv4 /31 the usable range is empty and
    `lowest_usable > highest_usable`.
    */
    pub fn lowest_usable(&self) -> Address {
        self.lowest_usable_with(self.usable_range_rule())
    }

    /// Last usable host address, see [Network::lowest_usable].
    pub fn highest_usable(&self) -> Address {
        self.highest_usable_with(self.usable_range_rule())
    }

    pub fn lowest_usable_with(&self, rule: UsableRange) -> Address {
        let low: Address = self.low();
        match rule {
            UsableRange::ExcludeEdges if !self.is_host() => low.derive(low.as_u128() + 1),
            _ => low,
        }
    }

    pub fn highest_usable_with(&self, rule: UsableRange) -> Address {
        let high: Address = self.high();
        match rule {
            UsableRange::ExcludeEdges if !self.is_host() => high.derive(high.as_u128() - 1),
            _ => high,
        }
    }

    /// Inclusive `(lowest_usable, highest_usable)`, or None if empty.
    pub fn usable_range(&self) -> Option<(Address, Address)> {
        let (lo, hi) = (self.lowest_usable(), self.highest_usable());
        (lo <= hi).then_some((lo, hi))
    }

    /// Broadcast address: IPv4, or IPv6 embedding IPv4 with a prefix > 96.
    pub fn broadcast(&self) -> Option<Address> {
        match self.address() {
            Address::V4(_) => Some(self.high()),
            Address::V6 { embeds_ipv4: true, .. } if self.prefix() > 96 => Some(self.high()),
            Address::V6 { .. } => None,
        }
    }

    /// Whether `addr` lies within the usable range of this network.
    pub fn contains(&self, addr: &Address) -> Result<bool, AddressError> {
        self.address().same_family(addr)?;
        Ok(self.lowest_usable() <= *addr && *addr <= self.highest_usable())
    }

    /// Whether `other` lies completely within this network (raw bounds).
    pub fn contains_network(&self, other: &Network) -> Result<bool, AddressError> {
        self.address().same_family(&other.address())?;
        Ok(self.low() <= other.low() && other.high() <= self.high())
    }

    /// Number of addresses in the network, `2^(bits - prefix)`.
    pub fn size(&self) -> BigInt {
        BigInt::from(1u8) << self.host_bits() as usize
    }

    /**
    Order networks by the sum of their first and last address, which places a
    network between its lower and upper halves. Networks of different
    families are not comparable.
    */
    pub fn cmp_span(&self, other: &Network) -> Result<Ordering, AddressError> {
        self.address().same_family(&other.address())?;
        let span = |n: &Network| BigInt::from(n.low().as_u128()) + n.high().as_u128();
        Ok(span(self).cmp(&span(other)))
    }

    /// The extended properties collaborators ask for.
    pub fn info(&self) -> NetworkInfo {
        NetworkInfo {
            network: *self,
            netmask: self.netmask(),
            hostmask: self.wildcard(),
            broadcast: self.broadcast(),
            mask_length: self.prefix(),
        }
    }
}

impl Inet {
    pub fn netmask(&self) -> Address {
        self.network().netmask()
    }

    pub fn wildcard(&self) -> Address {
        self.network().wildcard()
    }

    pub fn broadcast(&self) -> Option<Address> {
        self.network().broadcast()
    }

    /// Whether `addr` is a usable host of the network this value lives in.
    pub fn contains(&self, addr: &Address) -> Result<bool, AddressError> {
        self.network().contains(addr)
    }
}

/* -------------------------------------------------------------------------- */
