use async_trait::async_trait;
use sqlx::PgPool;

use super::member_team_query::{self, CountedMemberTeamRecord, MemberTeamRecord};
use crate::domain::errors::{RepositoryError, RepositoryResult};
use crate::domain::member::{Member, NewMember};
use crate::domain::repositories::{MemberRepository, MemberSearchRepository};
use crate::domain::search::{MemberSearchCondition, MemberTeamRow, Page, Pageable};

#[derive(Debug, sqlx::FromRow)]
struct MemberRecord {
    id: i64,
    username: Option<String>,
    age: i32,
    team_id: Option<i64>,
}

impl From<MemberRecord> for Member {
    fn from(r: MemberRecord) -> Self {
        Member::from_persistence(r.id, r.username, r.age, r.team_id)
    }
}

impl From<MemberTeamRecord> for MemberTeamRow {
    fn from(r: MemberTeamRecord) -> Self {
        MemberTeamRow::new(r.member_id, r.username, r.age, r.team_id, r.team_name)
    }
}

impl From<CountedMemberTeamRecord> for MemberTeamRow {
    fn from(r: CountedMemberTeamRecord) -> Self {
        MemberTeamRow::new(r.member_id, r.username, r.age, r.team_id, r.team_name)
    }
}

/// PostgreSQL implementation of the member repositories
///
/// Searches are assembled at runtime with `sqlx::QueryBuilder`, since the
/// WHERE clause depends on which criteria are present.
pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    /// Creates a new PostgresMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn save(&self, member: &NewMember) -> RepositoryResult<Member> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO members (username, age, team_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id())
        .fetch_one(&self.pool)
        .await?;

        Ok(member.clone().into_member(id))
    }

    async fn update(&self, member: &Member) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET username = $1, age = $2, team_id = $3
            WHERE id = $4
            "#,
        )
        .bind(member.username())
        .bind(member.age())
        .bind(member.team_id())
        .bind(member.id())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::MemberNotFound(member.id()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRecord>(
            "SELECT id, username, age, team_id FROM members WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Member::from))
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRecord>(
            "SELECT id, username, age, team_id FROM members ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRecord>(
            "SELECT id, username, age, team_id FROM members WHERE username = $1 ORDER BY id",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn find_by_team(&self, team_id: i64) -> RepositoryResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRecord>(
            "SELECT id, username, age, team_id FROM members WHERE team_id = $1 ORDER BY id",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn bulk_rename_younger_than(
        &self,
        username: &str,
        age_lt: i32,
    ) -> RepositoryResult<u64> {
        let result = sqlx::query("UPDATE members SET username = $1 WHERE age < $2")
            .bind(username)
            .bind(age_lt)
            .execute(&self.pool)
            .await?;

        tracing::debug!(affected = result.rows_affected(), "bulk rename executed");
        Ok(result.rows_affected())
    }

    async fn bulk_add_age(&self, delta: i32) -> RepositoryResult<u64> {
        let result = sqlx::query("UPDATE members SET age = age + $1")
            .bind(delta)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn bulk_delete_older_than(&self, age_gt: i32) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM members WHERE age > $1")
            .bind(age_gt)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl MemberSearchRepository for PostgresMemberRepository {
    async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> RepositoryResult<Vec<MemberTeamRow>> {
        let mut qb = member_team_query::search(condition);
        let rows = qb
            .build_query_as::<MemberTeamRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(MemberTeamRow::from).collect())
    }

    async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
    ) -> RepositoryResult<Page<MemberTeamRow>> {
        let mut qb = member_team_query::page(condition, pageable, true);
        let rows = qb
            .build_query_as::<CountedMemberTeamRecord>()
            .fetch_all(&self.pool)
            .await?;

        // An empty window has no row to read the total from
        let total = match rows.first() {
            Some(first) => u64::try_from(first.total_count).unwrap_or_default(),
            None if pageable.offset() > 0 => self.count(condition).await?,
            None => 0,
        };

        let content = rows.into_iter().map(MemberTeamRow::from).collect();
        Ok(Page::new(content, pageable.clone(), total))
    }

    async fn fetch_page(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
    ) -> RepositoryResult<Vec<MemberTeamRow>> {
        let mut qb = member_team_query::page(condition, pageable, false);
        let rows = qb
            .build_query_as::<MemberTeamRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(MemberTeamRow::from).collect())
    }

    async fn count(&self, condition: &MemberSearchCondition) -> RepositoryResult<u64> {
        let mut qb = member_team_query::count(condition);
        let (total,) = qb
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}
