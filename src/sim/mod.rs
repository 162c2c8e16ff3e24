//! Deterministic simulation module
//!
//! All table physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (registration order)
//! - No rendering or input dependencies

pub mod body;
pub mod boundary;
pub mod collision;
pub mod pocket;
pub mod registry;
pub mod resolver;
pub mod rules;
pub mod state;
pub mod tick;
pub mod world;

pub use body::{Body, WallContact, WallKind, integrate_symplectic};
pub use boundary::{Boundary, CushionContact};
pub use collision::{friction_force, impact_force_between, impact_force_by_cushion, spin_sign};
pub use pocket::Pocket;
pub use registry::{Actor, Registry};
pub use resolver::{CollisionResolver, PairContact};
pub use rules::Outcome;
pub use state::{BallView, Phase, SimError, Simulation, Snapshot};
pub use tick::{StopReason, advance, tick};
pub use world::World;
