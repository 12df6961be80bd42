use alloy_chains::NamedChain;

pub const API_ENDPOINT: &str = "https://api.cyberconnect.dev/l2/";

// SIWE parameters the API verifies the signed message against
pub const SIWE_DOMAIN: &str = "cyber.co";
pub const SIWE_STATEMENT: &str = "Sign in Cyber";
pub const SIWE_URI: &str = "https://cyber.co";
pub const SIWE_VERSION: &str = "1";

pub const CHAIN_ID: u64 = NamedChain::Optimism as u64;

// FILES
pub const ACCOUNTS_FILE_PATH: &str = "data/accounts.txt";
pub const PROXIES_FILE_PATH: &str = "data/proxies.txt";
