// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use inetmath::{merge, split_by_count, Address, ErrorKind, Network};
use num_bigint::BigInt;

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

fn net(s: &str) -> Network {
    s.parse().unwrap()
}

#[test]
fn netmask_of_short_v4_literal() {
    let n: Network = net("192.168.167/24");
    assert_eq!(n.netmask(), addr("255.255.255.0"));
    assert_eq!(n.wildcard(), addr("0.0.0.255"));
    assert_eq!(n.lowest_usable(), addr("192.168.167.1"));
    assert_eq!(n.highest_usable(), addr("192.168.167.254"));
    assert_eq!(n.broadcast(), Some(addr("192.168.167.255")));
}

#[test]
fn split_into_sixteen_and_merge_back() {
    let n: Network = net("10.0.0.0/8");
    let subs: Vec<Network> = split_by_count(&n, 16).unwrap();
    assert_eq!(subs.len(), 16);
    assert_eq!(subs[0], net("10.0.0.0/12"));
    assert_eq!(subs[1], net("10.16.0.0/12"));
    assert_eq!(subs[15], net("10.240.0.0/12"));
    assert_eq!(merge(&subs).unwrap(), n);
}

#[test]
fn split_count_errors() {
    let n: Network = net("192.168.107.0/24");
    let cases: [(u64, ErrorKind, &str); 4] = [
        (1, ErrorKind::InvalidCount, "lower than 2"),
        (1 << 31, ErrorKind::InvalidCount, "higher than 2^30"),
        (9, ErrorKind::InvalidCount, "not a valid power of 2"),
        (512, ErrorKind::InsufficientBits, "not enough free bits"),
    ];
    for (count, kind, msg) in cases {
        let err = split_by_count(&n, count).unwrap_err();
        assert_eq!(err.kind(), kind, "{count}");
        assert!(err.to_string().contains(msg), "{err}");
    }
}

#[test]
fn address_arithmetic() {
    let a: Address = addr("192.168.1.43");
    let b: Address = addr("192.168.1.19");
    assert_eq!(a.difference(&b).unwrap(), BigInt::from(24));
    assert_eq!(a.subtract(24).unwrap(), b);
    assert_eq!(a.add(-24).unwrap(), b);
}

#[test]
fn eui64_and_solicited_node() {
    let a: Address = addr("fe80::20e:cff:fe33:d204");
    assert_eq!(a.eui64_mac().unwrap().to_string(), "00:0e:0c:33:d2:04");
    assert_eq!(a.solicited_node_multicast(), Some(addr("ff02::1:ff33:d204")));
}

#[test]
fn huge_offsets_exceed_range() {
    let a: Address = addr("192.168.1.43");
    let off: BigInt = BigInt::from(1) << 200usize;
    for result in [a.subtract(off.clone()), a.add(off.clone()), a.subtract(-off.clone()), a.add(-off)] {
        assert_eq!(result.unwrap_err().kind(), ErrorKind::RangeExceeded);
    }
}
