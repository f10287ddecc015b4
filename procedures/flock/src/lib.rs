pub mod agent;
pub mod bounds;
pub mod config;
pub mod engine;
pub mod plugin;
pub mod predator;
pub mod steering;

pub use agent::{Agent, WobbleGains};
pub use bounds::BoundingVolume;
pub use config::{FlockConfig, FlockParams};
pub use engine::BoidsEngine;
pub use plugin::{Flock, FlockMember, FlockPlugin, SwimWobble, ThreatSource};
pub use predator::{PredatorRegistry, ThreatId};
pub use steering::SteeringForces;
