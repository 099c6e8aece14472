// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static SLASH: &str = "/";
pub(crate) static COLON: &str = ":";
pub(crate) static DOUBLE_COLON: &str = "::";
pub(crate) static DOT: &str = ".";

// lib.rs
pub(crate) static ERR_FORMAT: &str = "invalid address, network or MAC literal";
pub(crate) static ERR_PREFIX: &str = "invalid prefix length";
pub(crate) static ERR_HOST_BITS: &str = "host bits not all zero";
pub(crate) static ERR_MISMATCH: &str = "cannot mix IPv4 and IPv6 operands";
pub(crate) static ERR_RANGE: &str = "result outside of the address space";
pub(crate) static ERR_SPLIT: &str = "unable to split";
pub(crate) static ERR_MERGE: &str = "unable to merge";
pub(crate) static ERR_BITS: &str = "not enough free bits in netmask";
pub(crate) static ERR_LOWER: &str = "value is lower than";
pub(crate) static ERR_HIGHER: &str = "value is higher than";
pub(crate) static ERR_NOT_POW2: &str = "value is not a valid power of 2";
pub(crate) static ERR_MERGE_COUNT: &str = "invalid number of sub-networks";
pub(crate) static ERR_MERGE_ANY: &str = "any address";
pub(crate) static ERR_MERGE_ORDER: &str = "arguments not in order or invalid";

// codec.rs
pub(crate) static ERR_EMPTY: &str = "empty literal";
pub(crate) static ERR_V4_GROUPS: &str = "wrong number of IPv4 groups";
pub(crate) static ERR_V4_GROUP: &str = "IPv4 group must be a decimal number <= 255";
pub(crate) static ERR_V6_SHORTHAND: &str = "'::' may appear only once";
pub(crate) static ERR_V6_COLON: &str = "stray ':' outside of '::'";
pub(crate) static ERR_V6_GROUPS: &str = "wrong number of IPv6 groups";
pub(crate) static ERR_V6_GROUP: &str = "IPv6 group must be 1-4 hex digits";
pub(crate) static ERR_V6_DOTTED: &str = "dotted IPv4 suffix must be the last group";
pub(crate) static ERR_SLASHES: &str = "too many slashes";

// mac.rs
pub(crate) static ERR_MAC: &str = "invalid MAC address";
