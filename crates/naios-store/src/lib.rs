//! Storage layer: the `producers` and `producer_translations` tables behind one trait.

mod error;
mod memory;
mod profile;
mod records;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use profile::{assemble_profile, translation_rows};
pub use records::{NewProducer, ProducerRow, ProducerUpdate, TABLES, TranslationRow};
pub use store::ProducerStore;

#[cfg(feature = "rest")]
mod rest;
#[cfg(feature = "rest")]
pub use rest::{RestConfig, RestStore};
