pub mod anatomy;
pub mod body;
pub mod curve;
pub mod error;
pub mod fin;
pub mod organism;

pub use anatomy::{FinProfile, OrganismProfile};
pub use body::{BodyLoft, BodyLoftConfig, BodyMesh};
pub use curve::{CatmullRomCurve, Polyline, ProfileCurve};
pub use error::GeometryError;
pub use fin::{FinBuilder, FinConfig, FinMesh, FinSide};
pub use organism::{OrganismBuilder, OrganismMesh};
