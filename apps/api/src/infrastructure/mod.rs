// Infrastructure layer module
// Contains database adapters and process-local caches

pub mod cache;
pub mod repositories;
