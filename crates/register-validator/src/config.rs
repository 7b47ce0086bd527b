//! # Registration Configuration
//!
//! Everything a registration attempt needs, as one explicit value.
//!
//! Defaults target a local network. Every field can be overridden from a
//! `WARP_*` environment variable:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `WARP_NETWORK_ID` | `network_id` | `12345` |
//! | `WARP_SUBNET_ID` | `subnet_id` (cb58) | local test subnet |
//! | `WARP_SOURCE_CHAIN_ID` | `source_chain_id` (cb58) | local test chain |
//! | `WARP_SOURCE_ADDRESS` | `source_address` (hex) | empty |
//! | `WARP_NODE_ID` | `node_id` | `NodeID-6L5yRNPTuciSgXGHqYwn9N6NeoKMvqvy` |
//! | `WARP_NODE_BLS_KEY` | `node_bls_key_hex` | signer key |
//! | `WARP_SIGNER_KEY` | `signer_key_hex` | local test key |
//! | `WARP_COMMITTEE` | `committee` (`pk:weight,...`) | signer alone, weight 1 |
//! | `WARP_COMMITTEE_EPOCH` | `committee_epoch` | `0` |
//! | `WARP_QUORUM` | `quorum` (`num/den`) | `67/100` |
//! | `WARP_WEIGHT` | `weight` | `1` |
//! | `WARP_BALANCE` | `balance` (nAVAX) | `1000000000` |
//! | `WARP_EXPIRY` | `expiry` (unix secs) | now + TTL |
//! | `WARP_EXPIRY_TTL_SECS` | `expiry_ttl` | `300` |
//! | `WARP_NODE_INFO_TIMEOUT_MS` | `node_info_timeout` | `30000` |
//! | `WARP_ISSUE_TIMEOUT_MS` | `issue_timeout` | `30000` |
//! | `WARP_COLLECT_TIMEOUT_MS` | `collect_timeout` | `30000` |
//! | `WARP_LOG_LEVEL` | `log_level` | `info` |

use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use qc_15_warp_messaging::Quorum;
use shared_crypto::BlsPublicKey;
use shared_types::{Id, NetworkId, NodeId, LOCAL_ID};
use thiserror::Error;

/// Local test subnet.
pub const DEFAULT_SUBNET_ID: &str = "2DeHa7Qb6sufPkmQcFWG2uCd4pBPv9WB6dkzroiMQhd1NSRtof";

/// Local test source chain.
pub const DEFAULT_SOURCE_CHAIN_ID: &str = "2BMFrJ9xeh5JdwZEx6uuFcjfZC2SV2hdbMT8ee5HrvjtfJb5br";

/// Local test node.
pub const DEFAULT_NODE_ID: &str = "NodeID-6L5yRNPTuciSgXGHqYwn9N6NeoKMvqvy";

/// Local test signer key. Never use outside a local network.
pub const DEFAULT_SIGNER_KEY: &str =
    "3f783929b295f16cd1172396acb23b20eed057b9afb1caa419e9915f92860b35";

/// One AVAX in nAVAX.
pub const DEFAULT_BALANCE: u64 = 1_000_000_000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable could not be parsed.
    #[error("{var}: {reason}")]
    Invalid {
        /// Variable or field name
        var: &'static str,
        /// What was wrong
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            reason: reason.to_string(),
        }
    }
}

/// One committee entry as configured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitteeEntry {
    /// Compressed BLS public key, hex.
    pub public_key_hex: String,
    /// Stake weight.
    pub weight: u64,
}

/// Complete registration configuration.
#[derive(Clone, Debug)]
pub struct RegistrationConfig {
    /// Network ID.
    pub network_id: NetworkId,
    /// Subnet the validator joins.
    pub subnet_id: Id,
    /// Chain attesting the registration.
    pub source_chain_id: Id,
    /// Addressed-call source address.
    pub source_address: Vec<u8>,
    /// Node being registered.
    pub node_id: NodeId,
    /// Node's BLS staking key; defaults to the signer key.
    pub node_bls_key_hex: Option<String>,
    /// Local committee member's key.
    pub signer_key_hex: String,
    /// Committee members; empty means the signer alone.
    pub committee: Vec<CommitteeEntry>,
    /// Committee snapshot epoch.
    pub committee_epoch: u64,
    /// Weight threshold.
    pub quorum: Quorum,
    /// Validator weight.
    pub weight: u64,
    /// Validator balance (nAVAX).
    pub balance: u64,
    /// Fixed expiry; computed from `expiry_ttl` when absent.
    pub expiry: Option<u64>,
    /// Expiry offset from now.
    pub expiry_ttl: Duration,
    /// Budget for the node-info call.
    pub node_info_timeout: Duration,
    /// Budget for transaction issuance.
    pub issue_timeout: Duration,
    /// Budget for collecting peer signatures.
    pub collect_timeout: Duration,
    /// Log filter directive.
    pub log_level: String,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            network_id: LOCAL_ID,
            subnet_id: Id::from_str(DEFAULT_SUBNET_ID).unwrap_or_default(),
            source_chain_id: Id::from_str(DEFAULT_SOURCE_CHAIN_ID).unwrap_or_default(),
            source_address: Vec::new(),
            node_id: NodeId::from_str(DEFAULT_NODE_ID).unwrap_or_default(),
            node_bls_key_hex: None,
            signer_key_hex: DEFAULT_SIGNER_KEY.to_string(),
            committee: Vec::new(),
            committee_epoch: 0,
            quorum: Quorum::default(),
            weight: 1,
            balance: DEFAULT_BALANCE,
            expiry: None,
            expiry_ttl: Duration::from_secs(300),
            node_info_timeout: Duration::from_secs(30),
            issue_timeout: Duration::from_secs(30),
            collect_timeout: Duration::from_secs(30),
            log_level: "info".to_string(),
        }
    }
}

impl RegistrationConfig {
    /// Defaults overridden by process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = lookup("WARP_NETWORK_ID") {
            config.network_id = parse_num("WARP_NETWORK_ID", &v)?;
        }
        if let Some(v) = lookup("WARP_SUBNET_ID") {
            config.subnet_id = v
                .parse()
                .map_err(|e| ConfigError::invalid("WARP_SUBNET_ID", e))?;
        }
        if let Some(v) = lookup("WARP_SOURCE_CHAIN_ID") {
            config.source_chain_id = v
                .parse()
                .map_err(|e| ConfigError::invalid("WARP_SOURCE_CHAIN_ID", e))?;
        }
        if let Some(v) = lookup("WARP_SOURCE_ADDRESS") {
            config.source_address =
                hex::decode(v.trim()).map_err(|e| ConfigError::invalid("WARP_SOURCE_ADDRESS", e))?;
        }
        if let Some(v) = lookup("WARP_NODE_ID") {
            config.node_id = v
                .parse()
                .map_err(|e| ConfigError::invalid("WARP_NODE_ID", e))?;
        }
        if let Some(v) = lookup("WARP_NODE_BLS_KEY") {
            config.node_bls_key_hex = Some(v);
        }
        if let Some(v) = lookup("WARP_SIGNER_KEY") {
            config.signer_key_hex = v;
        }
        if let Some(v) = lookup("WARP_COMMITTEE") {
            config.committee = parse_committee(&v)?;
        }
        if let Some(v) = lookup("WARP_COMMITTEE_EPOCH") {
            config.committee_epoch = parse_num("WARP_COMMITTEE_EPOCH", &v)?;
        }
        if let Some(v) = lookup("WARP_QUORUM") {
            config.quorum = parse_quorum(&v)?;
        }
        if let Some(v) = lookup("WARP_WEIGHT") {
            config.weight = parse_num("WARP_WEIGHT", &v)?;
        }
        if let Some(v) = lookup("WARP_BALANCE") {
            config.balance = parse_num("WARP_BALANCE", &v)?;
        }
        if let Some(v) = lookup("WARP_EXPIRY") {
            config.expiry = Some(parse_num("WARP_EXPIRY", &v)?);
        }
        if let Some(v) = lookup("WARP_EXPIRY_TTL_SECS") {
            config.expiry_ttl = Duration::from_secs(parse_num("WARP_EXPIRY_TTL_SECS", &v)?);
        }
        if let Some(v) = lookup("WARP_NODE_INFO_TIMEOUT_MS") {
            config.node_info_timeout =
                Duration::from_millis(parse_num("WARP_NODE_INFO_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = lookup("WARP_ISSUE_TIMEOUT_MS") {
            config.issue_timeout = Duration::from_millis(parse_num("WARP_ISSUE_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = lookup("WARP_COLLECT_TIMEOUT_MS") {
            config.collect_timeout =
                Duration::from_millis(parse_num("WARP_COLLECT_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = lookup("WARP_LOG_LEVEL") {
            config.log_level = v;
        }

        Ok(config)
    }

    /// Check values a registration cannot proceed without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weight == 0 {
            return Err(ConfigError::invalid("weight", "must be non-zero"));
        }
        if self.balance == 0 {
            return Err(ConfigError::invalid("balance", "must be non-zero"));
        }
        if self.expiry.is_none() && self.expiry_ttl.is_zero() {
            return Err(ConfigError::invalid("expiry_ttl", "must be non-zero"));
        }
        self.expiry_at(unix_now())?;
        if self.node_info_timeout.is_zero()
            || self.issue_timeout.is_zero()
            || self.collect_timeout.is_zero()
        {
            return Err(ConfigError::invalid("timeouts", "must be non-zero"));
        }
        if self.subnet_id.is_empty() || self.source_chain_id.is_empty() {
            return Err(ConfigError::invalid(
                "subnet_id/source_chain_id",
                "must not be empty",
            ));
        }
        self.committee_keys()?;
        Ok(())
    }

    /// Payload expiry for a registration built at unix time `now`.
    pub fn expiry_at(&self, now: u64) -> Result<u64, ConfigError> {
        match self.expiry {
            Some(expiry) => Ok(expiry),
            None => now
                .checked_add(self.expiry_ttl.as_secs())
                .ok_or_else(|| ConfigError::invalid("expiry_ttl", "now + ttl overflows u64")),
        }
    }

    /// Parsed committee entries.
    pub fn committee_keys(&self) -> Result<Vec<(BlsPublicKey, u64)>, ConfigError> {
        self.committee
            .iter()
            .map(|entry| {
                let bytes = hex::decode(entry.public_key_hex.trim_start_matches("0x"))
                    .map_err(|e| ConfigError::invalid("WARP_COMMITTEE", e))?;
                let key = BlsPublicKey::from_bytes(&bytes)
                    .map_err(|e| ConfigError::invalid("WARP_COMMITTEE", e))?;
                Ok((key, entry.weight))
            })
            .collect()
    }
}

fn parse_num<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::invalid(var, e))
}

fn parse_committee(value: &str) -> Result<Vec<CommitteeEntry>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|item| {
            let (pk, weight) = item
                .split_once(':')
                .ok_or_else(|| ConfigError::invalid("WARP_COMMITTEE", "expected pk:weight"))?;
            Ok(CommitteeEntry {
                public_key_hex: pk.to_string(),
                weight: parse_num("WARP_COMMITTEE", weight)?,
            })
        })
        .collect()
}

fn parse_quorum(value: &str) -> Result<Quorum, ConfigError> {
    let (num, den) = value
        .split_once('/')
        .ok_or_else(|| ConfigError::invalid("WARP_QUORUM", "expected num/den"))?;
    Quorum::new(parse_num("WARP_QUORUM", num)?, parse_num("WARP_QUORUM", den)?)
        .map_err(|e| ConfigError::invalid("WARP_QUORUM", e))
}

/// Seconds since the unix epoch; zero if the clock is before it.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
