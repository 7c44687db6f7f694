//! Reconstruction engine
//!
//! [`classifier`] recognises UI idioms on single instructions,
//! [`assembler`] turns them into a [`UiModel`](crate::models::UiModel) and
//! [`provenance`] records which component each fact belongs to.

pub mod input_type;
pub mod classifier;
pub mod provenance;
pub mod assembler;
#[cfg(test)]
mod tests;

pub use self::assembler::{
    LayoutTemplate, MethodStats, MethodUnit, Reconstruction, SkippedMethod, TreeAssembler,
};
pub use self::classifier::{classify, primary_idiom, Idiom};
pub use self::provenance::OriginTracker;
