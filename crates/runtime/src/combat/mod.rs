//! Combat session registry and orchestration service.

mod registry;
mod service;

pub use registry::{SessionHandle, SessionRegistry};
pub use service::CombatService;
