/// Freeboard h1 above the operating water level [m].
pub const FREEBOARD: f64 = 0.3;

/// Smallest constructible grit-hopper depth for a horizontal-flow chamber [m].
pub const MIN_HOPPER_DEPTH: f64 = 0.4;

/// Geometric allowance added to the spread grit layer [m].
pub const HOPPER_ALLOWANCE: f64 = 0.2;

/// Grit sump below the aerated chamber's water depth [m].
pub const AERATED_SUMP_DEPTH: f64 = 0.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Sewage volume the grit load is quoted against [m³].
pub const GRIT_REFERENCE_VOLUME: f64 = 1_000_000.0;

// Display precision of the returned record.
pub const LENGTH_DECIMALS: u32 = 2;
pub const GRIT_VOLUME_DECIMALS: u32 = 3;
pub const AIR_SUPPLY_DECIMALS: u32 = 1;
pub const TOTAL_VOLUME_DECIMALS: u32 = 1;
