// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_store;
mod member_team_query;
pub mod postgres_member_repository;
pub mod postgres_team_repository;

pub use in_memory_store::InMemoryStore;
pub use postgres_member_repository::PostgresMemberRepository;
pub use postgres_team_repository::PostgresTeamRepository;
