//! Passive address parsing
//!
//! Extracts the `(h1,h2,h3,h4,p1,p2)` tuple from a PASV reply.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};

use crate::error::AddressParseError;

/// Address a server listens on for the next data connection, as announced by PASV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassiveAddress {
    octets: [u8; 6],
    tokens: String,
}

impl PassiveAddress {
    /// Parses the first parenthesized group in `text`.
    ///
    /// The group must hold exactly six comma-separated decimal tokens, each 0-255.
    /// Tokens are kept verbatim for the PORT command.
    pub fn parse(text: &str) -> Result<Self, AddressParseError> {
        let open = text.find('(').ok_or(AddressParseError::MissingGroup)?;
        let close = text[open..]
            .find(')')
            .map(|i| open + i)
            .ok_or(AddressParseError::MissingGroup)?;
        let inner = &text[open + 1..close];

        let tokens: Vec<&str> = inner.split(',').collect();
        if tokens.len() != 6 {
            return Err(AddressParseError::TokenCount(tokens.len()));
        }

        let mut octets = [0u8; 6];
        for (octet, token) in octets.iter_mut().zip(&tokens) {
            *octet = parse_octet(token)?;
        }

        Ok(Self {
            octets,
            tokens: inner.to_string(),
        })
    }

    pub fn ip(&self) -> Ipv4Addr {
        let [a, b, c, d, _, _] = self.octets;
        Ipv4Addr::new(a, b, c, d)
    }

    /// Port number, `p1 * 256 + p2`.
    pub fn port(&self) -> u16 {
        u16::from(self.octets[4]) * 256 + u16::from(self.octets[5])
    }

    pub fn socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(self.ip(), self.port())
    }

    /// The six tokens exactly as the server sent them, for `PORT`.
    pub fn port_argument(&self) -> &str {
        &self.tokens
    }
}

impl fmt::Display for PassiveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

fn parse_octet(token: &str) -> Result<u8, AddressParseError> {
    let invalid = || AddressParseError::InvalidOctet(token.to_string());

    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse::<u8>().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_pasv_reply() {
        let addr =
            PassiveAddress::parse("227 Entering Passive Mode (192,168,1,10,19,136).").unwrap();
        assert_eq!(addr.ip(), Ipv4Addr::new(192, 168, 1, 10));
        assert_eq!(addr.port(), 5000);
        assert_eq!(addr.port_argument(), "192,168,1,10,19,136");
        assert_eq!(addr.to_string(), "192.168.1.10:5000");
    }

    #[test]
    fn test_port_bounds() {
        assert_eq!(PassiveAddress::parse("(0,0,0,0,0,0)").unwrap().port(), 0);
        assert_eq!(PassiveAddress::parse("(255,255,255,255,255,255)").unwrap().port(), 65535);
    }

    #[test]
    fn test_tokens_are_kept_verbatim() {
        let addr = PassiveAddress::parse("227 =(010,000,000,001,004,001)").unwrap();
        assert_eq!(addr.ip(), Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(addr.port(), 1025);
        assert_eq!(addr.port_argument(), "010,000,000,001,004,001");
    }

    #[test]
    fn test_missing_group() {
        assert_eq!(
            PassiveAddress::parse("227 Entering Passive Mode 192,168,1,10,19,136"),
            Err(AddressParseError::MissingGroup)
        );
        assert_eq!(
            PassiveAddress::parse("227 Entering Passive Mode (192,168,1,10,19,136"),
            Err(AddressParseError::MissingGroup)
        );
    }

    #[test]
    fn test_wrong_token_count() {
        assert_eq!(
            PassiveAddress::parse("(192,168,1,10,19)"),
            Err(AddressParseError::TokenCount(5))
        );
        assert_eq!(
            PassiveAddress::parse("(192,168,1,10,19,136,7)"),
            Err(AddressParseError::TokenCount(7))
        );
        assert_eq!(PassiveAddress::parse("()"), Err(AddressParseError::TokenCount(1)));
    }

    #[test]
    fn test_invalid_octets() {
        assert_eq!(
            PassiveAddress::parse("(192,168,1,256,19,136)"),
            Err(AddressParseError::InvalidOctet("256".into()))
        );
        assert_eq!(
            PassiveAddress::parse("(192,168,1,x,19,136)"),
            Err(AddressParseError::InvalidOctet("x".into()))
        );
        assert_eq!(
            PassiveAddress::parse("(192, 168,1,10,19,136)"),
            Err(AddressParseError::InvalidOctet(" 168".into()))
        );
        assert_eq!(
            PassiveAddress::parse("(192,168,,10,19,136)"),
            Err(AddressParseError::InvalidOctet("".into()))
        );
        assert_eq!(
            PassiveAddress::parse("(192,168,1,10,19,-1)"),
            Err(AddressParseError::InvalidOctet("-1".into()))
        );
    }
}
