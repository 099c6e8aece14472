// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Splitting a network into equal power-of-two blocks, and merging such
//! blocks back into their supernet.

use super::{
    structs::{mask_u128, max_u128, Network},
    AddressError, SPLIT_MAX, SPLIT_MIN,
};
use std::iter;
use tracing::{debug, trace};

impl Network {
    /// The adjacent network of the same size above this one, None if it
    /// would leave the address space.
    pub fn next_block(&self) -> Option<Network> {
        let step: u128 = 1u128.checked_shl(self.host_bits() as u32)?;
        let base: u128 = self.address().as_u128().checked_add(step)?;
        if base > max_u128(self.bit_width()) {
            return None;
        }
        Some(Network::new_unchecked(self.address().derive(base), self.prefix()))
    }

    /// The adjacent network of the same size below this one.
    pub fn previous_block(&self) -> Option<Network> {
        let step: u128 = 1u128.checked_shl(self.host_bits() as u32)?;
        let base: u128 = self.address().as_u128().checked_sub(step)?;
        Some(Network::new_unchecked(self.address().derive(base), self.prefix()))
    }
}

/**
Split `net` into `2^power` equally sized, contiguous networks of prefix
`net.prefix() + power`, in ascending order.

`2^power` must lie within [SPLIT_MIN]..=[SPLIT_MAX].
*/
pub fn split_by_power(net: &Network, power: u32) -> Result<Vec<Network>, AddressError> {
    if power == 0 || (1u64 << power.min(63)) > SPLIT_MAX {
        return Err(AddressError::SplitPowerOutOfRange { network: *net, power });
    }
    if net.prefix() as u32 + power > net.bit_width() as u32 {
        return Err(AddressError::InsufficientBits { network: *net, power });
    }

    let count: usize = 1 << power;
    let first = Network::new_unchecked(net.address(), net.prefix() + power as u8);
    debug!(network = %net, count, prefix = first.prefix(), "splitting network");

    let out: Vec<Network> = iter::successors(Some(first), |n| n.next_block())
        .take(count)
        .collect();
    Ok(out)
}

/**
Split `net` into `count` networks. `count` must be a power of 2 within
[SPLIT_MIN]..=[SPLIT_MAX].

```
use inetmath::{split_by_count, Network};

let net: Network = "10.0.0.0/8".parse().unwrap();
let subs = split_by_count(&net, 16).unwrap();
assert_eq!(subs[1].to_string(), "10.16.0.0/12");
```
*/
pub fn split_by_count(net: &Network, count: u64) -> Result<Vec<Network>, AddressError> {
    let network: Network = *net;
    if count < SPLIT_MIN {
        return Err(AddressError::SplitCountTooLow { network, count });
    }
    if count > SPLIT_MAX {
        return Err(AddressError::SplitCountTooHigh { network, count });
    }
    if !count.is_power_of_two() {
        return Err(AddressError::SplitCountNotPow2 { network, count });
    }
    split_by_power(net, count.trailing_zeros())
}

/// Halve `net`.
pub fn split(net: &Network) -> Result<Vec<Network>, AddressError> {
    split_by_power(net, 1)
}

/**
Merge `2^x` contiguous networks of equal prefix `q` into the network of
prefix `q - x` which they tile. Networks must be given in ascending order,
each one the [Network::next_block] of its predecessor.

The result takes its embedded-IPv4 flag from the last input network.
*/
pub fn merge(networks: &[Network]) -> Result<Network, AddressError> {
    let count: usize = networks.len();
    let (first, last) = match (networks.first(), networks.last()) {
        (Some(f), Some(l)) if count >= 2 && count.is_power_of_two() => (*f, *l),
        _ => return Err(AddressError::MergeCount(count)),
    };

    for (i, pair) in networks.windows(2).enumerate() {
        let (prev, cur) = (pair[0], pair[1]);
        prev.address().same_family(&cur.address())?;
        if cur.prefix() != prev.prefix() || prev.next_block() != Some(cur) {
            trace!(prev = %prev, cur = %cur, "networks are not contiguous");
            return Err(AddressError::MergeOrder { count, index: i + 1 });
        }
    }

    let power: u32 = count.trailing_zeros();
    if (first.prefix() as u32) < power + 1 {
        return Err(AddressError::MergeAnyAddress(count));
    }
    let prefix: u8 = first.prefix() - power as u8;
    let base: u128 = first.address().as_u128() & mask_u128(first.bit_width(), prefix);
    // the run must start on a boundary of the merged prefix
    if base != first.address().as_u128() {
        trace!(first = %first, prefix, "first network is not aligned to the merged prefix");
        return Err(AddressError::MergeOrder { count, index: 0 });
    }
    let addr = first
        .address()
        .derive(base)
        .with_embedded_ipv4(last.embeds_ipv4());
    debug!(count, prefix, "merged networks");
    Ok(Network::new_unchecked(addr, prefix))
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{strings::*, ErrorKind};

    const NET_A: &str = "10.0.0.0/8";
    const NET_B: &str = "192.168.107.0/24";
    const NET_V6: &str = "fe80::/64";
    const NET_EMB: &str = "2002::123.45.67.64/122";

    fn net(s: &str) -> Network {
        s.parse().unwrap()
    }

    fn strings(nets: &[Network]) -> Vec<String> {
        nets.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_split_by_count_and_merge() {
        let subs = split_by_count(&net(NET_A), 16).unwrap();
        let expect: Vec<String> = (0..16).map(|i| format!("10.{}.0.0/12", i * 16)).collect();
        assert_eq!(strings(&subs), expect);
        assert_eq!(merge(&subs).unwrap(), net(NET_A));
    }

    #[test]
    fn test_split_halves() {
        let subs = split(&net(NET_B)).unwrap();
        assert_eq!(strings(&subs), ["192.168.107.0/25", "192.168.107.128/25"]);

        let subs = split(&net(NET_V6)).unwrap();
        assert_eq!(
            strings(&subs),
            [
                "fe80:0000:0000:0000:0000:0000:0000:0000/65",
                "fe80:0000:0000:0000:8000:0000:0000:0000/65",
            ]
        );
        let subs = split_by_count(&net(NET_V6), 4).unwrap();
        assert_eq!(subs[3], net("fe80::c000:0:0:0/66"));
        assert_eq!(merge(&subs).unwrap(), net(NET_V6));
    }

    #[test]
    fn test_split_embedded() {
        let subs = split_by_count(&net(NET_EMB), 8).unwrap();
        assert_eq!(subs.len(), 8);
        assert_eq!(subs[0].to_string(), "2002:0000:0000:0000:0000:0000:123.45.67.64/125");
        assert_eq!(subs[7].to_string(), "2002:0000:0000:0000:0000:0000:123.45.67.120/125");
        assert!(subs.iter().all(|n| n.embeds_ipv4()));

        let merged = merge(&subs).unwrap();
        assert_eq!(merged, net(NET_EMB));
        assert!(merged.embeds_ipv4());
    }

    #[test]
    fn test_split_invalid_counts() {
        let n: Network = net(NET_B);
        #[rustfmt::skip]
        let cases: [(u64, ErrorKind, &str); 4] = [
            (1,       ErrorKind::InvalidCount,     ERR_LOWER),
            (1 << 31, ErrorKind::InvalidCount,     ERR_HIGHER),
            (9,       ErrorKind::InvalidCount,     ERR_NOT_POW2),
            (512,     ErrorKind::InsufficientBits, ERR_BITS),
        ];
        for (count, kind, msg) in cases {
            let err = split_by_count(&n, count).unwrap_err();
            assert_eq!(err.kind(), kind, "{count}");
            assert!(err.to_string().contains(msg), "{err}");
            assert!(err.to_string().contains(NET_B), "{err}");
        }
    }

    #[test]
    fn test_split_power_range() {
        let n: Network = net("::/0");
        assert!(matches!(
            split_by_power(&n, 0),
            Err(AddressError::SplitPowerOutOfRange { power: 0, .. })
        ));
        assert!(matches!(
            split_by_power(&n, 31),
            Err(AddressError::SplitPowerOutOfRange { power: 31, .. })
        ));
        assert!(split_by_power(&net("1.2.3.4/32"), 1).is_err());
        assert_eq!(split_by_power(&net("1.2.3.0/31"), 1).unwrap().len(), 2);
    }

    #[test]
    fn test_merge_errors() {
        let subs = split_by_count(&net(NET_A), 4).unwrap();

        assert_eq!(merge(&[]).unwrap_err(), AddressError::MergeCount(0));
        assert_eq!(merge(&subs[..1]).unwrap_err(), AddressError::MergeCount(1));
        assert_eq!(merge(&subs[..3]).unwrap_err(), AddressError::MergeCount(3));

        let swapped = [subs[1], subs[0]];
        assert_eq!(
            merge(&swapped).unwrap_err(),
            AddressError::MergeOrder { count: 2, index: 1 }
        );
        let gap = [subs[0], subs[2]];
        assert_eq!(merge(&gap).unwrap_err().kind(), ErrorKind::InvalidMergeInput);

        let halves = split(&net("0.0.0.0/0")).unwrap();
        let err = merge(&halves).unwrap_err();
        assert_eq!(err, AddressError::MergeAnyAddress(2));
        assert!(err.to_string().contains(ERR_MERGE_ANY));

        let unaligned = [net("10.16.0.0/12"), net("10.32.0.0/12")];
        assert_eq!(
            merge(&unaligned).unwrap_err(),
            AddressError::MergeOrder { count: 2, index: 0 }
        );

        let mixed = [net("0.0.0.0/32"), net("::1/128")];
        assert_eq!(merge(&mixed).unwrap_err().kind(), ErrorKind::FamilyMismatch);
    }

    #[test]
    fn test_merge_covers_inputs() {
        let subs = split_by_count(&net(NET_A), 8).unwrap();
        for run in subs.chunks(2).chain(subs.chunks(4)) {
            let merged = merge(run).unwrap();
            for n in run {
                assert!(merged.contains_network(n).unwrap(), "{merged} / {n}");
            }
        }
        // contiguous, but straddles a /10 boundary
        assert!(merge(&subs[1..3]).is_err());
    }

    #[test]
    fn test_next_previous_block() {
        let n: Network = net(NET_B);
        assert_eq!(n.next_block(), Some(net("192.168.108.0/24")));
        assert_eq!(n.previous_block(), Some(net("192.168.106.0/24")));
        assert_eq!(net("255.255.255.0/24").next_block(), None);
        assert_eq!(net("0.0.0.0/24").previous_block(), None);
        assert_eq!(net("0.0.0.0/0").next_block(), None);
        assert_eq!(net("::/0").next_block(), None);
        assert_eq!(net("8000::/1").next_block(), None);
    }
}
