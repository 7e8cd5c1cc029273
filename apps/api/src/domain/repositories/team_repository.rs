use async_trait::async_trait;

use crate::domain::errors::RepositoryResult;
use crate::domain::team::{NewTeam, Team};

/// Repository trait for Team entities
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a team and return it with its assigned id
    async fn save(&self, team: &NewTeam) -> RepositoryResult<Team>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>>;

    /// Find all teams with exactly this name
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Team>>;

    /// Find all teams
    async fn find_all(&self) -> RepositoryResult<Vec<Team>>;
}
