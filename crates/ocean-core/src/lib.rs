//! Ocean Core Library
//!
//! Domain model, validation errors and dashboard shaping for the ocean
//! governance knowledge graph. Nothing in here touches the network or the
//! graph store.

pub mod dashboard;
pub mod error;
pub mod model;
pub mod news;

pub use error::{OceanError, OceanResult};
pub use model::{EntityLabel, RelationshipType};
pub use news::NewsRecord;
