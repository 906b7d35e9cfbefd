mod batch_loader;
mod errors;
mod importer;

pub use batch_loader::BatchLoader;
pub use errors::ImportError;
pub use importer::{ImportSummary, Importer};
