//! A library for reconstructing the user interface of an application from its code
//!
//! This crate recognises the instruction idioms that build widgets (lookups,
//! allocations, attachments, inflations, adapter rows), stitches them into
//! widget trees per screen and fragment, and attributes menus, dialogs and API
//! uses to the component that produced them. Program access goes through the
//! [`program::InstructionQuery`] and [`program::ValueOracle`] traits.

pub mod errors;
pub mod constants;
pub mod config;
pub mod program;
pub mod models;
pub mod analyzer;

pub use analyzer::{MethodUnit, Reconstruction, TreeAssembler};
pub use config::AssemblerConfig;
pub use errors::{ReconstructionError, ReconstructionResult};

use log::info;

use program::{InstructionQuery, ValueOracle};

/// Main entry point: assemble every unit with a prepared assembler
pub fn reconstruct<Q, O>(
    mut assembler: TreeAssembler<Q::Site>,
    query: &Q,
    oracle: &O,
    units: &[MethodUnit<Q::Site>],
) -> Reconstruction
where
    Q: InstructionQuery,
    O: ValueOracle<Q::Site>,
{
    info!("Reconstructing UI model from {} methods", units.len());
    assembler.assemble(query, oracle, units);
    assembler.finish()
}

/// Version of the UI model extractor
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
