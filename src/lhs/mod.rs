mod hash_table;
mod registry;

pub use hash_table::{LhsEntry, LhsHashTable};
pub use registry::TableRegistry;
