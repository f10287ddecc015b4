pub mod bed;
pub mod color;
pub mod error;
pub mod forest;
pub mod grammar;
pub mod grower;
pub mod render;
pub mod skeleton;
pub mod turtle;

pub use bed::{CoralBed, CoralBedConfig};
pub use color::ColorJitter;
pub use error::GrowthError;
pub use forest::{CoralForest, CoralForestConfig, PlacedCoral};
pub use grammar::{Grammar, GrowthLimits, Production};
pub use grower::LSystemGrower;
pub use render::CoralSegmentMesh;
pub use skeleton::{CoralSkeleton, SegmentInstance};
pub use turtle::{Turtle, TurtleConfig, TurtleState};
