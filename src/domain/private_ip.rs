//! RFC 1918 address matching
//!
//! Only IPv4 is considered. IPv6 addresses, IPv4-mapped ones included, never match.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

const PRIVATE_RANGES: [(Ipv4Addr, u8); 3] = [
    (Ipv4Addr::new(10, 0, 0, 0), 8),
    (Ipv4Addr::new(172, 16, 0, 0), 12),
    (Ipv4Addr::new(192, 168, 0, 0), 16),
];

fn private_nets() -> impl Iterator<Item = Ipv4Net> {
    PRIVATE_RANGES
        .iter()
        .filter_map(|&(addr, prefix_len)| Ipv4Net::new(addr, prefix_len).ok())
}

/// Returns true when `candidate` is an IPv4 address inside a private range.
/// Anything that does not parse is simply not private.
pub fn is_private_ip(candidate: &str) -> bool {
    let Ok(addr) = candidate.parse::<Ipv4Addr>() else {
        return false;
    };
    private_nets().any(|net| net.contains(&addr))
}

#[cfg(test)]
mod tests {
    use super::is_private_ip;

    #[test]
    fn range_boundaries() {
        assert!(is_private_ip("10.0.0.0"));
        assert!(is_private_ip("10.255.255.255"));
        assert!(!is_private_ip("9.255.255.255"));
        assert!(!is_private_ip("11.0.0.0"));

        assert!(is_private_ip("172.16.0.0"));
        assert!(is_private_ip("172.31.255.255"));
        assert!(!is_private_ip("172.15.255.255"));
        assert!(!is_private_ip("172.32.0.0"));

        assert!(is_private_ip("192.168.0.0"));
        assert!(is_private_ip("192.168.255.255"));
        assert!(!is_private_ip("192.167.255.255"));
        assert!(!is_private_ip("192.169.0.0"));
    }

    #[test]
    fn public_addresses_are_not_private() {
        assert!(!is_private_ip("8.8.8.8"));
        assert!(!is_private_ip("127.0.0.1"));
        assert!(!is_private_ip("100.64.0.1"));
    }

    #[test]
    fn malformed_input_is_not_private() {
        assert!(!is_private_ip("not-an-ip"));
        assert!(!is_private_ip(""));
        assert!(!is_private_ip("10.0.0"));
        assert!(!is_private_ip("10.0.0.256"));
        assert!(!is_private_ip(" 10.0.0.1"));
    }

    #[test]
    fn ipv6_is_never_private() {
        assert!(!is_private_ip("fd00::1"));
        assert!(!is_private_ip("::ffff:10.0.0.1"));
    }
}
