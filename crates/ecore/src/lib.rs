//! Facade crate: re-exports the metamodel (`ecore-schema`) and the
//! instance/command layer (`ecore-core`) under a single `prelude`.

pub use ecore_core;
pub use ecore_schema;

///
/// Prelude
/// Everything a caller needs to build a metamodel, instantiate it, and
/// mutate instances through reversible commands, without reaching into
/// either crate by its own name.
///

pub mod prelude {
    pub use ecore_core::prelude::*;
    pub use ecore_schema::prelude::*;
}

#[cfg(test)]
mod tests;
