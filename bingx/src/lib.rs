//! BingX perpetual-futures leverage tier discovery.
//!
//! BingX has no leverage bracket endpoint. [`TierProber`] recovers the tier
//! schedule by stepping the account's long leverage down and watching the
//! enforced maximum position value, and [`TierComparator`] checks the result
//! against reference data.

pub mod client;
pub mod compare;
pub mod config;
pub mod error;
pub mod gateway;
pub mod probe;
pub mod reference;
pub mod rest;
pub mod signing;
pub mod types;
pub mod utils;

// ---- Top-level re-exports for ergonomic usage ----

// Client + config
pub use client::BingxClient;
pub use config::BingxConfig;
pub use error::{BingxError, Result};
pub use gateway::LeverageGateway;

// REST client
pub use rest::BingxHttpClient;

// Wire types
pub use types::{ApiResponse, ContractInfo, LeverageInfo, PositionSide, SetLeverageData, Ticker};

// Tiers
pub use types::{tiers_from_discovered, DiscoveredTier, Tier};

// Discovery
pub use probe::{
    probe_sequence, BoundaryScanner, ProbeConfig, ProbeObservation, ScanStep, TierProber,
    DEFAULT_PROBE_LEVERAGES, DEFAULT_RESTORE_LEVERAGE,
};

// Validation
pub use compare::{
    ComparisonResult, ExtraLeverage, TierComparator, TierMatch, Tolerance, UnmatchedTier,
    ValidationSummary,
};

// Reference data
pub use reference::{continuity_gaps, ContinuityGap, ReferenceError, ReferenceTiers};

pub use utils::normalize_symbol;
