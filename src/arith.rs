// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Addresses as unsigned integers: offsets, differences and the special
//! addresses derivable from a v6 address.

use super::{
    mac::MacAddr,
    structs::{embeds_ipv4_rule, max_u128, Address, IpFam},
    AddressError,
};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use tracing::trace;

impl Address {
    /// Unsigned value of the address; IPv4 uses the low 32 bits.
    pub fn to_integer(&self) -> u128 {
        self.as_u128()
    }

    /// Address of family `fam` with the value `v`.
    pub fn from_integer(fam: IpFam, v: u128) -> Result<Address, AddressError> {
        let zero: Address = Address::zero(fam);
        if v > max_u128(fam.bits()) {
            return Err(AddressError::RangeExceeded {
                base: zero,
                offset: BigInt::from(v),
            });
        }
        Ok(match fam {
            IpFam::V4 => zero.derive(v),
            IpFam::V6 => Address::v6(v.to_be_bytes()),
        })
    }

    pub fn to_bigint(&self) -> BigInt {
        BigInt::from(self.as_u128())
    }

    pub fn from_bigint(fam: IpFam, v: &BigInt) -> Result<Address, AddressError> {
        match v.to_u128() {
            Some(n) => Address::from_integer(fam, n),
            None => Err(AddressError::RangeExceeded {
                base: Address::zero(fam),
                offset: v.clone(),
            }),
        }
    }

    /**
    `self + offset`, where offset may be negative and arbitrarily large. The
    result keeps this address' family and embedded-IPv4 flag.

    ```
    use inetmath::Address;

    let a: Address = "10.0.0.255".parse().unwrap();
    assert_eq!(a.add(1).unwrap().to_string(), "10.0.1.0");
    assert!(a.add(-(1i64 << 40)).is_err());
    ```
    */
    pub fn add(&self, offset: impl Into<BigInt>) -> Result<Address, AddressError> {
        let offset: BigInt = offset.into();
        let sum: BigInt = self.to_bigint() + &offset;
        match sum.to_u128() {
            Some(v) if v <= max_u128(self.bit_width()) => Ok(self.derive(v)),
            _ => {
                trace!("{self} + ({offset}) leaves the address space");
                Err(AddressError::RangeExceeded { base: *self, offset })
            }
        }
    }

    /// `self - offset`, see [Address::add].
    pub fn subtract(&self, offset: impl Into<BigInt>) -> Result<Address, AddressError> {
        let offset: BigInt = offset.into();
        self.add(-offset)
    }

    /// Signed distance `self - other`. Both must be of the same family.
    pub fn difference(&self, other: &Address) -> Result<BigInt, AddressError> {
        self.same_family(other)?;
        Ok(self.to_bigint() - other.to_bigint())
    }

    /// The following address, None after the all-ones address.
    pub fn next(&self) -> Option<Address> {
        let v: u128 = self.as_u128();
        (v < max_u128(self.bit_width())).then(|| self.derive(v + 1))
    }

    /// The preceding address, None before the all-zeros address.
    pub fn previous(&self) -> Option<Address> {
        let v: u128 = self.as_u128();
        v.checked_sub(1).map(|p| self.derive(p))
    }

    /// The IPv4 address in the last 4 bytes of a v6 address of the form
    /// `::a.b.c.d` or `::ffff:a.b.c.d`.
    pub fn embedded_ipv4(&self) -> Option<Address> {
        match self {
            Address::V6 { octets: o, .. } if embeds_ipv4_rule(o) => {
                Some(Address::v4([o[12], o[13], o[14], o[15]]))
            }
            _ => None,
        }
    }

    /// MAC address of a modified EUI-64 interface identifier (`..:xxff:fexx:..`).
    pub fn eui64_mac(&self) -> Option<MacAddr> {
        match self {
            Address::V6 { octets: o, .. } if o[0] != 0xFF && o[11] == 0xFF && o[12] == 0xFE => {
                Some(MacAddr::new([o[8] ^ 0x02, o[9], o[10], o[13], o[14], o[15]]))
            }
            _ => None,
        }
    }

    /// `ff02::1:ffXX:XXXX` carrying the low 24 bits of this address.
    /// None for IPv4, multicast addresses, `::` and `::1`.
    pub fn solicited_node_multicast(&self) -> Option<Address> {
        let o: &[u8; 16] = match self {
            Address::V6 { octets, .. } => octets,
            Address::V4(_) => return None,
        };
        if o[0] == 0xFF || u128::from_be_bytes(*o) <= 1 {
            return None;
        }
        let mut out: [u8; 16] = [0; 16];
        out[0] = 0xFF;
        out[1] = 0x02;
        out[11] = 0x01;
        out[12] = 0xFF;
        out[13..].copy_from_slice(&o[13..]);
        Some(Address::v6(out))
    }
}

/* -------------------------------------------------------------------------- */
