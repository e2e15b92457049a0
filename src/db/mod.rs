pub mod memory_store;
pub mod pg_store;
pub mod pool;
pub mod store;

pub use memory_store::MemoryDiaryStore;
pub use pg_store::PgDiaryStore;
pub use pool::create_pool;
pub use store::{DiaryStore, Outcome};
