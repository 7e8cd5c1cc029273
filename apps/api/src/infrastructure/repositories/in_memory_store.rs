use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::{RepositoryError, RepositoryResult};
use crate::domain::member::{Member, NewMember};
use crate::domain::repositories::{MemberRepository, MemberSearchRepository, TeamRepository};
use crate::domain::search::{
    MemberFilter, MemberSearchCondition, MemberTeamRow, Page, Pageable,
};
use crate::domain::team::{NewTeam, Team};

#[derive(Debug, Default)]
struct StoreState {
    teams: BTreeMap<i64, Team>,
    members: BTreeMap<i64, Member>,
    last_team_id: i64,
    last_member_id: i64,
}

impl StoreState {
    /// Outer join of members with their team, in member id order
    fn joined_rows(&self) -> impl Iterator<Item = MemberTeamRow> + '_ {
        self.members.values().map(|m| {
            let team = m.team_id().and_then(|id| self.teams.get(&id));
            MemberTeamRow::new(
                m.id(),
                m.username().map(str::to_string),
                m.age(),
                team.map(Team::id),
                team.map(|t| t.name().to_string()),
            )
        })
    }

    fn filtered_rows(&self, condition: &MemberSearchCondition) -> Vec<MemberTeamRow> {
        let filter = MemberFilter::from_condition(condition);
        self.joined_rows().filter(|row| filter.matches(row)).collect()
    }

    fn window(&self, condition: &MemberSearchCondition, pageable: &Pageable) -> Vec<MemberTeamRow> {
        let mut rows = self.filtered_rows(condition);
        rows.sort_by(|a, b| pageable.sort().compare(a, b));

        rows.into_iter()
            .skip(usize::try_from(pageable.offset()).unwrap_or(usize::MAX))
            .take(pageable.page_size() as usize)
            .collect()
    }

    fn check_team(&self, team_id: Option<i64>) -> RepositoryResult<()> {
        match team_id {
            Some(id) if !self.teams.contains_key(&id) => Err(RepositoryError::TeamNotFound(id)),
            _ => Ok(()),
        }
    }
}

/// Process-local entity store
///
/// Implements every repository port over in-memory maps. Ids are assigned
/// sequentially from 1. The number of count queries served is recorded so
/// callers can observe count elision.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
    count_queries: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `count` calls served so far
    pub fn count_queries(&self) -> usize {
        self.count_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn save(&self, team: &NewTeam) -> RepositoryResult<Team> {
        let mut state = self.state.write().await;
        state.last_team_id += 1;
        let team = team.clone().into_team(state.last_team_id);
        state.teams.insert(team.id(), team.clone());

        Ok(team)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Team>> {
        Ok(self.state.read().await.teams.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Team>> {
        let state = self.state.read().await;
        Ok(state
            .teams
            .values()
            .filter(|t| t.name() == name)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Team>> {
        Ok(self.state.read().await.teams.values().cloned().collect())
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn save(&self, member: &NewMember) -> RepositoryResult<Member> {
        let mut state = self.state.write().await;
        state.check_team(member.team_id())?;
        state.last_member_id += 1;
        let member = member.clone().into_member(state.last_member_id);
        state.members.insert(member.id(), member.clone());

        Ok(member)
    }

    async fn update(&self, member: &Member) -> RepositoryResult<()> {
        let mut state = self.state.write().await;
        state.check_team(member.team_id())?;
        match state.members.get_mut(&member.id()) {
            Some(stored) => {
                *stored = member.clone();
                Ok(())
            }
            None => Err(RepositoryError::MemberNotFound(member.id())),
        }
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>> {
        Ok(self.state.read().await.members.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        Ok(self.state.read().await.members.values().cloned().collect())
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let state = self.state.read().await;
        Ok(state
            .members
            .values()
            .filter(|m| m.username() == Some(username))
            .cloned()
            .collect())
    }

    async fn find_by_team(&self, team_id: i64) -> RepositoryResult<Vec<Member>> {
        let state = self.state.read().await;
        Ok(state
            .members
            .values()
            .filter(|m| m.team_id() == Some(team_id))
            .cloned()
            .collect())
    }

    async fn bulk_rename_younger_than(
        &self,
        username: &str,
        age_lt: i32,
    ) -> RepositoryResult<u64> {
        let mut state = self.state.write().await;
        let mut affected = 0;
        for member in state.members.values_mut().filter(|m| m.age() < age_lt) {
            member.rename(Some(username.to_string()));
            affected += 1;
        }

        Ok(affected)
    }

    async fn bulk_add_age(&self, delta: i32) -> RepositoryResult<u64> {
        let mut state = self.state.write().await;
        // Every new age is computed before any member changes
        let shifted = state
            .members
            .values()
            .map(|m| {
                m.age()
                    .checked_add(delta)
                    .filter(|age| *age >= 0)
                    .map(|age| {
                        Member::from_persistence(
                            m.id(),
                            m.username().map(str::to_string),
                            age,
                            m.team_id(),
                        )
                    })
                    .ok_or(RepositoryError::AgeOutOfRange {
                        member_id: m.id(),
                        age: m.age(),
                        delta,
                    })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        state.members = shifted.into_iter().map(|m| (m.id(), m)).collect();
        Ok(state.members.len() as u64)
    }

    async fn bulk_delete_older_than(&self, age_gt: i32) -> RepositoryResult<u64> {
        let mut state = self.state.write().await;
        let before = state.members.len();
        state.members.retain(|_, m| m.age() <= age_gt);

        Ok((before - state.members.len()) as u64)
    }
}

#[async_trait]
impl MemberSearchRepository for InMemoryStore {
    async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> RepositoryResult<Vec<MemberTeamRow>> {
        Ok(self.state.read().await.filtered_rows(condition))
    }

    async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
    ) -> RepositoryResult<Page<MemberTeamRow>> {
        let state = self.state.read().await;
        let total = state.filtered_rows(condition).len() as u64;
        let content = state.window(condition, pageable);

        Ok(Page::new(content, pageable.clone(), total))
    }

    async fn fetch_page(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
    ) -> RepositoryResult<Vec<MemberTeamRow>> {
        Ok(self.state.read().await.window(condition, pageable))
    }

    async fn count(&self, condition: &MemberSearchCondition) -> RepositoryResult<u64> {
        self.count_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.read().await.filtered_rows(condition).len() as u64)
    }
}
