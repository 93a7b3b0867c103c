//! Shared data model for conditional recurring transfer intents.
//!
//! The same types are produced by the parser, consumed by the planner and persisted by the
//! compiler, so everything here serializes to the wire-stable JSON shapes.

pub mod decimal;
pub mod destination;
pub mod evm_serde;
pub mod intent;
pub mod manifest;
pub mod plan;
pub mod schedule;

pub use alloy_primitives::{Address, FixedBytes, B256, U256};

pub use decimal::{Decimal, DecimalError};
pub use destination::{Destination, DestinationError, NAME_SUFFIX};
pub use intent::{Intent, IntentError, IntentParts, PriceCondition, SEND_ACTION};
pub use manifest::{ConstructorArgs, Manifest, MANIFEST_VERSION};
pub use plan::{Plan, PlanError, PlanParts};
pub use schedule::{Schedule, ScheduleError};
