use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::errors::RepositoryResult;
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{NewTeam, Team};

#[derive(Debug, sqlx::FromRow)]
struct TeamRecord {
    id: i64,
    name: String,
}

impl From<TeamRecord> for Team {
    fn from(r: TeamRecord) -> Self {
        Team::from_persistence(r.id, r.name)
    }
}

/// PostgreSQL implementation of TeamRepository
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn save(&self, team: &NewTeam) -> RepositoryResult<Team> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO teams (name)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(team.name())
        .fetch_one(&self.pool)
        .await?;

        Ok(team.clone().into_team(id))
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRecord>("SELECT id, name FROM teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Team::from))
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRecord>(
            "SELECT id, name FROM teams WHERE name = $1 ORDER BY id",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRecord>("SELECT id, name FROM teams ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Team::from).collect())
    }
}
