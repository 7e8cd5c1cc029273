use async_trait::async_trait;

use crate::domain::errors::RepositoryResult;
use crate::domain::member::{Member, NewMember};

/// Repository trait for Member entities
///
/// The bulk operations run directly against the store and return the
/// number of affected rows. They do not touch any member already loaded
/// into a process-local cache.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a member and return it with its assigned id
    async fn save(&self, member: &NewMember) -> RepositoryResult<Member>;

    /// Persist username, age and team of an existing member
    async fn update(&self, member: &Member) -> RepositoryResult<()>;

    /// Find a member by ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>>;

    /// Find all members
    async fn find_all(&self) -> RepositoryResult<Vec<Member>>;

    /// Find members with exactly this username
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>>;

    /// Find the members of a team
    async fn find_by_team(&self, team_id: i64) -> RepositoryResult<Vec<Member>>;

    /// Set `username` on every member younger than `age_lt`
    async fn bulk_rename_younger_than(&self, username: &str, age_lt: i32)
        -> RepositoryResult<u64>;

    /// Add `delta` to every member's age
    async fn bulk_add_age(&self, delta: i32) -> RepositoryResult<u64>;

    /// Delete every member older than `age_gt`
    async fn bulk_delete_older_than(&self, age_gt: i32) -> RepositoryResult<u64>;
}
