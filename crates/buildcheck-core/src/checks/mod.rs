//! The five built-in checks, in the order the harness runs them.
//!
//! - [`structure`]: required project files exist
//! - [`manifest`]: required dependencies are declared and installed
//! - [`build`]: the build command succeeds and produces its artifacts
//! - [`roundtrip`]: a synthetic config survives write and re-read
//! - [`schema`]: the server source references the expected identifiers

pub mod build;
pub mod manifest;
pub mod roundtrip;
pub mod schema;
pub mod structure;

pub use build::{BuildCheck, BuildSettings};
pub use manifest::{ManifestCheck, ManifestSettings, PackageManifest};
pub use roundtrip::{ConfigRoundTripCheck, RoundTripSettings, ScratchFile, SyntheticConfig};
pub use schema::{SchemaCheck, SchemaSettings};
pub use structure::{StructureCheck, StructureSettings};
