// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IPv4/IPv6 address and CIDR network math: parsing into canonical values,
//! mask derivation, address-as-integer arithmetic, and splitting/merging of
//! networks into equal power-of-two blocks.

mod arith;
mod codec;
mod interop;
mod mac;
mod mask;
mod strings;
mod structs;
mod subnets;

use num_bigint::BigInt;
use std::{error, fmt};
use strings::*;

pub use codec::{format_address, parse_address, parse_inet, parse_network, ParseMode};
pub use mac::MacAddr;
pub use mask::{NetworkInfo, UsableRange, EMBEDDED_IPV4_USABLE_RANGE};
pub use structs::{Address, Inet, IpFam, Network};
pub use subnets::{merge, split, split_by_count, split_by_power};

pub(crate) const IPV4_BITS: u8 = 32;
pub(crate) const IPV6_BITS: u8 = 128;
/// Smallest number of sub-networks a split may produce.
pub const SPLIT_MIN: u64 = 2;
/// Largest number of sub-networks a split may produce (2^30).
pub const SPLIT_MAX: u64 = 1 << 30;

/// The category an [AddressError] belongs to. Every failure maps to exactly one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    InvalidFormat,
    HostBitsNotZero,
    FamilyMismatch,
    RangeExceeded,
    InsufficientBits,
    InvalidCount,
    InvalidMergeInput,
}

#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddressError {
    /// malformed address, network or MAC literal
    InvalidFormat { literal: String, reason: &'static str },
    /// prefix is not a number or lies outside `0..=bits`
    InvalidPrefix { literal: String, prefix: String },
    /// cidr value with bits set to the right of its prefix
    HostBitsNotZero(String),
    /// operands are not the same IP family (v4 vs v6).
    FamilyMismatch(Address, Address),
    /// `base + offset` does not fit into the family's address space
    RangeExceeded { base: Address, offset: BigInt },
    /// `prefix + power` exceeds the address width
    InsufficientBits { network: Network, power: u32 },
    SplitCountTooLow  { network: Network, count: u64 },
    SplitCountTooHigh { network: Network, count: u64 },
    SplitCountNotPow2 { network: Network, count: u64 },
    /// `2^power` is outside of [SPLIT_MIN]..=[SPLIT_MAX]
    SplitPowerOutOfRange { network: Network, power: u32 },
    /// number of networks to merge is not a power of 2 (or below 2)
    MergeCount(usize),
    /// merged prefix would be < 1
    MergeAnyAddress(usize),
    /// element `index` is not the next block after its predecessor, or
    /// (index 0) the first element does not start on the merged boundary
    MergeOrder { count: usize, index: usize },
}

impl AddressError {
    pub(crate) fn format(literal: impl Into<String>, reason: &'static str) -> Self {
        AddressError::InvalidFormat {
            literal: literal.into(),
            reason,
        }
    }

    /// Which of the error categories this failure belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AddressError::InvalidFormat { .. } | AddressError::InvalidPrefix { .. } => {
                ErrorKind::InvalidFormat
            }
            AddressError::HostBitsNotZero(_) => ErrorKind::HostBitsNotZero,
            AddressError::FamilyMismatch(_, _) => ErrorKind::FamilyMismatch,
            AddressError::RangeExceeded { .. } => ErrorKind::RangeExceeded,
            AddressError::InsufficientBits { .. } => ErrorKind::InsufficientBits,
            AddressError::SplitCountTooLow { .. }
            | AddressError::SplitCountTooHigh { .. }
            | AddressError::SplitCountNotPow2 { .. }
            | AddressError::SplitPowerOutOfRange { .. }
            | AddressError::MergeCount(_) => ErrorKind::InvalidCount,
            AddressError::MergeAnyAddress(_) | AddressError::MergeOrder { .. } => {
                ErrorKind::InvalidMergeInput
            }
        }
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::InvalidFormat { literal, reason } => {
                write!(f, "{ERR_FORMAT}: '{literal}': {reason}")
            }
            AddressError::InvalidPrefix { literal, prefix } => {
                write!(f, "{ERR_PREFIX} '{prefix}' in '{literal}'")
            }
            AddressError::HostBitsNotZero(literal) => {
                write!(f, "{ERR_HOST_BITS}: '{literal}'")
            }
            AddressError::FamilyMismatch(a, b) => {
                write!(f, "{ERR_MISMATCH}: {a} - {b}")
            }
            AddressError::RangeExceeded { base, offset } => {
                write!(f, "{ERR_RANGE}: {base} + ({offset})")
            }
            AddressError::InsufficientBits { network, power } => {
                write!(f, "{ERR_SPLIT} {network} into 2^{power} network(s): {ERR_BITS}")
            }
            AddressError::SplitCountTooLow { network, count } => {
                write!(f, "{ERR_SPLIT} {network} into {count} network(s): {ERR_LOWER} {SPLIT_MIN}")
            }
            AddressError::SplitCountTooHigh { network, count } => {
                write!(f, "{ERR_SPLIT} {network} into {count} network(s): {ERR_HIGHER} 2^30")
            }
            AddressError::SplitCountNotPow2 { network, count } => {
                write!(f, "{ERR_SPLIT} {network} into {count} network(s): {ERR_NOT_POW2}")
            }
            AddressError::SplitPowerOutOfRange { network, power } => {
                let bound = if *power == 0 {
                    format!("{ERR_LOWER} {SPLIT_MIN}")
                } else {
                    format!("{ERR_HIGHER} 2^30")
                };
                write!(f, "{ERR_SPLIT} {network} into 2^{power} network(s): {bound}")
            }
            AddressError::MergeCount(count) => {
                write!(f, "{ERR_MERGE} {count} networks into one: {ERR_MERGE_COUNT}")
            }
            AddressError::MergeAnyAddress(count) => {
                write!(f, "{ERR_MERGE} {count} networks into one: {ERR_MERGE_ANY}")
            }
            AddressError::MergeOrder { count, index } => {
                write!(f, "{ERR_MERGE} {count} networks into one: {ERR_MERGE_ORDER} (#{index})")
            }
        }
    }
}

impl error::Error for AddressError {}

/* -------------------------------------------------------------------------- */
