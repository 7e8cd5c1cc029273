// Process-local caches over the repositories

pub mod persistence_context;

pub use persistence_context::PersistenceContext;
