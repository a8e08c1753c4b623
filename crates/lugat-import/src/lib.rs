pub mod error;
pub mod importer;

pub use error::{ImportError, ImportOutcome};
pub use importer::Importer;

#[cfg(test)]
mod tests;
