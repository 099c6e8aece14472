// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use inetmath::{split_by_count, AddressError, Network, NetworkInfo};
use std::process;

/// Print the properties of a cidr network and optionally split it.
#[derive(Parser, Debug)]
#[command(name = "netcalc")]
struct Args {
    /// Network literal, e.g. 192.168.167/24 or fe80::/64
    network: Network,

    /// Split the network into this many (power of 2) sub-networks
    count: Option<u64>,
}

fn run(args: &Args) -> Result<(), AddressError> {
    let net: Network = args.network;
    let info: NetworkInfo = net.info();
    println!("network:   {}", info.network);
    println!("netmask:   {}", info.netmask);
    println!("wildcard:  {}", info.hostmask);
    match info.broadcast {
        Some(b) => println!("broadcast: {b}"),
        None => println!("broadcast: -"),
    }
    match net.usable_range() {
        Some((lo, hi)) => println!("usable:    {lo} - {hi}"),
        None => println!("usable:    -"),
    }
    println!("size:      {}", net.size());

    if let Some(count) = args.count {
        for sub in split_by_count(&net, count)? {
            println!("{sub}");
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{e}");
        process::exit(1);
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["netcalc", "192.168.167/24", "4"]).unwrap();
        assert_eq!(args.network.to_string(), "192.168.167.0/24");
        assert_eq!(args.count, Some(4));

        let args = Args::try_parse_from(["netcalc", "fe80::/64"]).unwrap();
        assert_eq!(args.count, None);
    }

    #[test]
    fn test_bad_args() {
        assert!(Args::try_parse_from(["netcalc"]).is_err());
        assert!(Args::try_parse_from(["netcalc", "10.0.0.0/8", "x"]).is_err());
        assert!(Args::try_parse_from(["netcalc", "10.0.0.1/8"]).is_err());
    }

    #[test]
    fn test_run_reports_split_errors() {
        let args = Args::try_parse_from(["netcalc", "192.168.107.0/24", "512"]).unwrap();
        assert!(matches!(run(&args), Err(AddressError::InsufficientBits { .. })));
    }
}
