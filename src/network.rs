//! Network constants for the Canopy Swap SDK.

/// Default query API base URL (transactions, heights).
pub const DEFAULT_QUERY_URL: &str = "http://localhost:50002";

/// Default admin API base URL (node-held keystore).
pub const DEFAULT_ADMIN_URL: &str = "http://localhost:50003";

/// Default network id (mainnet).
pub const DEFAULT_NETWORK_ID: u64 = 1;

/// Default chain id (the root chain).
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Environment variables read by `CanopyClientBuilder::from_env`.
pub mod env {
    pub const QUERY_URL: &str = "CANOPY_QUERY_URL";
    pub const ADMIN_URL: &str = "CANOPY_ADMIN_URL";
    pub const NETWORK_ID: &str = "CANOPY_NETWORK_ID";
    pub const CHAIN_ID: &str = "CANOPY_CHAIN_ID";
}
