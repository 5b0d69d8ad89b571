//! Stable error codes embedded in error display strings.
//!
//! Codes are part of the public contract: callers may match on them in logs
//! or automated triage, so existing codes must never be renumbered.

pub const CFG_DUPLICATE_ROW: &str = "BLANKGRID_CFG_001";
pub const CFG_DUPLICATE_COLUMN: &str = "BLANKGRID_CFG_002";
pub const CFG_UNKNOWN_ROW: &str = "BLANKGRID_CFG_003";
pub const CFG_UNKNOWN_COLUMN: &str = "BLANKGRID_CFG_004";
pub const CFG_UNKNOWN_GROUP: &str = "BLANKGRID_CFG_005";
pub const CFG_GROUP_QUOTA_EXCEEDS_COLUMN: &str = "BLANKGRID_CFG_006";
pub const CFG_KIND_TOTAL_MISMATCH: &str = "BLANKGRID_CFG_007";
pub const CFG_PIN_IN_ZERO_COLUMN: &str = "BLANKGRID_CFG_008";
pub const CFG_ROW_QUOTA_TOO_LARGE: &str = "BLANKGRID_CFG_009";
pub const CFG_NON_POSITIVE_LIMIT: &str = "BLANKGRID_CFG_010";
pub const CFG_DUPLICATE_GROUP_QUOTA: &str = "BLANKGRID_CFG_011";

pub const SOLVE_INFEASIBLE: &str = "BLANKGRID_SOLVE_001";
pub const SOLVE_BUDGET_EXHAUSTED: &str = "BLANKGRID_SOLVE_002";

pub const SINK_WRITE_FAILED: &str = "BLANKGRID_SINK_001";
