use alloy::primitives::Address;
use chrono::{SecondsFormat, Utc};

use crate::constants::{CHAIN_ID, SIWE_DOMAIN, SIWE_STATEMENT, SIWE_URI, SIWE_VERSION};

/// EIP-4361 sign-in message. `Issued At` is stamped once at construction,
/// so rendering the same value twice produces byte-identical text.
pub struct SiweMessage {
    pub domain: &'static str,
    pub address: String,
    pub statement: &'static str,
    pub uri: &'static str,
    pub version: &'static str,
    pub chain_id: u64,
    pub nonce: String,
    pub issued_at: String,
}

impl SiweMessage {
    pub fn new(address: Address, nonce: String) -> Self {
        Self {
            domain: SIWE_DOMAIN,
            // Display renders the EIP-55 checksummed form
            address: address.to_string(),
            statement: SIWE_STATEMENT,
            uri: SIWE_URI,
            version: SIWE_VERSION,
            chain_id: CHAIN_ID,
            nonce,
            issued_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Canonical EIP-4361 text. The same rendered copy must be both signed
    /// and submitted as `signedMessage`.
    pub fn prepare(&self) -> String {
        format!(
            "{domain} wants you to sign in with your Ethereum account:\n\
             {address}\n\
             \n\
             {statement}\n\
             \n\
             URI: {uri}\n\
             Version: {version}\n\
             Chain ID: {chain_id}\n\
             Nonce: {nonce}\n\
             Issued At: {issued_at}",
            domain = self.domain,
            address = self.address,
            statement = self.statement,
            uri = self.uri,
            version = self.version,
            chain_id = self.chain_id,
            nonce = self.nonce,
            issued_at = self.issued_at,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn fixed_message() -> SiweMessage {
        SiweMessage {
            domain: "cyber.co",
            address: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_owned(),
            statement: "Sign in Cyber",
            uri: "https://cyber.co",
            version: "1",
            chain_id: 10,
            nonce: "32891756".to_owned(),
            issued_at: "2024-10-22T10:00:00.000Z".to_owned(),
        }
    }

    #[test]
    fn renders_canonical_eip4361_text() {
        let expected = "cyber.co wants you to sign in with your Ethereum account:\n\
                        0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266\n\
                        \n\
                        Sign in Cyber\n\
                        \n\
                        URI: https://cyber.co\n\
                        Version: 1\n\
                        Chain ID: 10\n\
                        Nonce: 32891756\n\
                        Issued At: 2024-10-22T10:00:00.000Z";

        assert_eq!(fixed_message().prepare(), expected);
    }

    #[test]
    fn rendering_is_byte_stable() {
        let message = fixed_message();
        assert_eq!(message.prepare(), message.prepare());
    }

    #[test]
    fn new_uses_the_checksummed_address() {
        let address =
            Address::from_str("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap();
        let message = SiweMessage::new(address, "nonce".to_owned());

        assert_eq!(
            message.address,
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }
}
