// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversions to and from `std::net` and `ipnet` types.

use super::{
    structs::{Address, Inet, Network},
    AddressError,
};
use ipnet::IpNet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address::v4(ip.octets())
    }
}

impl From<Ipv6Addr> for Address {
    fn from(ip: Ipv6Addr) -> Self {
        Address::v6(ip.octets())
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

/// The embedded-IPv4 flag is lost in the conversion.
impl From<Address> for IpAddr {
    fn from(addr: Address) -> Self {
        match addr {
            Address::V4(o) => IpAddr::V4(Ipv4Addr::from(o)),
            Address::V6 { octets, .. } => IpAddr::V6(Ipv6Addr::from(octets)),
        }
    }
}

/* ---------------------------------- */

impl TryFrom<IpNet> for Network {
    type Error = AddressError;

    /// Fails with [AddressError::HostBitsNotZero] for e.g. `10.1.2.3/8`;
    /// use `IpNet::trunc()` first to get the containing network.
    fn try_from(net: IpNet) -> Result<Self, Self::Error> {
        Network::new(net.addr().into(), net.prefix_len())
    }
}

impl From<IpNet> for Inet {
    fn from(net: IpNet) -> Self {
        Inet::new_unchecked(net.addr().into(), net.prefix_len())
    }
}

impl TryFrom<Network> for IpNet {
    type Error = AddressError;

    fn try_from(net: Network) -> Result<Self, Self::Error> {
        to_ipnet(net.address(), net.prefix())
    }
}

impl TryFrom<Inet> for IpNet {
    type Error = AddressError;

    fn try_from(inet: Inet) -> Result<Self, Self::Error> {
        to_ipnet(inet.address(), inet.prefix())
    }
}

fn to_ipnet(addr: Address, prefix: u8) -> Result<IpNet, AddressError> {
    IpNet::new(addr.into(), prefix).map_err(|_| AddressError::InvalidPrefix {
        literal: addr.to_string(),
        prefix: prefix.to_string(),
    })
}

/* -------------------------------------------------------------------------- */
