//! neodb — in-memory linkage and query engine for near-Earth object close
//! approaches
//!
//! The crate ingests two related record sets — a catalog of NEOs and the
//! timestamped close approaches referencing them — links them into a
//! navigable in-memory structure, and answers multi-criteria queries over the
//! approaches as a lazy, optionally limited stream.
//!
//! ```no_run
//! use neodb::extract::{load_approaches, load_neos};
//! use neodb::filters::{create_filters, QuerySpec};
//! use neodb::{limit, NeoDatabase};
//!
//! # fn main() -> Result<(), neodb::NeoError> {
//! let db = NeoDatabase::new(
//!     load_neos("data/neos.csv".as_ref())?,
//!     load_approaches("data/cad.json".as_ref())?,
//! );
//!
//! let mut spec = QuerySpec::default();
//! spec.set("hazardous", "true")?;
//! spec.set("distance_max", "0.1")?;
//!
//! let filters = create_filters(&spec);
//! for approach in limit(db.query(&filters), Some(10)) {
//!     println!("{approach}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod error;
pub mod extract;
pub mod filters;
pub mod models;
pub mod write;

pub use database::{limit, NeoDatabase};
pub use error::{IngestError, NeoError, QueryError};
pub use filters::{create_filters, AttributeFilter, QuerySpec};
pub use models::{CloseApproach, NearEarthObject};
