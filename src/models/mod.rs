//! Scheduling domain models.
//!
//! Core data types for the mixed-team assembly problem: task identifiers,
//! agents and the agent pool, and the tick-by-tick work record.
//!
//! # Domain Mappings
//!
//! | u-crew | Scaffold assembly | Warehouse | Field service |
//! |--------|-------------------|-----------|---------------|
//! | TaskId | Component placement | Pick/stow job | Work order |
//! | Agent | Humanoid / transport robot | Picker / AGV | Technician / van |
//! | Timeline | Site log | Shift log | Dispatch log |

mod agent;
mod task;
mod timeline;

pub use agent::{Agent, AgentCategory, AgentPool, IdleCounts};
pub use task::TaskId;
pub use timeline::{IdleReport, TickRecord, Timeline};
