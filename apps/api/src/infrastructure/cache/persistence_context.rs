use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::RepositoryResult;
use crate::domain::member::{Member, NewMember};
use crate::domain::repositories::MemberRepository;

/// Process-local identity map in front of a member repository
///
/// Once a member id has been loaded, every later read returns the managed
/// instance rather than the stored row, until the entry is detached or the
/// context is cleared. Saves and updates write through and refresh the
/// managed instance. Bulk operations go straight to the store and leave
/// managed instances untouched, so callers must `clear()` to observe them.
///
/// # Example
/// ```
/// use member_search_api::infrastructure::cache::PersistenceContext;
/// use member_search_api::infrastructure::repositories::InMemoryStore;
///
/// let context = PersistenceContext::new(InMemoryStore::new());
/// assert!(context.inner().count_queries() == 0);
/// ```
pub struct PersistenceContext<R> {
    inner: R,
    managed: Mutex<HashMap<i64, Member>>,
}

impl<R: MemberRepository> PersistenceContext<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            managed: Mutex::new(HashMap::new()),
        }
    }

    /// The wrapped repository
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Forgets every managed instance
    pub async fn clear(&self) {
        let mut managed = self.managed.lock().await;
        tracing::debug!(evicted = managed.len(), "persistence context cleared");
        managed.clear();
    }

    /// Forgets one managed instance; returns whether it was managed
    pub async fn detach(&self, id: i64) -> bool {
        self.managed.lock().await.remove(&id).is_some()
    }

    pub async fn contains(&self, id: i64) -> bool {
        self.managed.lock().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.managed.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.managed.lock().await.is_empty()
    }

    /// Replaces loaded rows by their managed instances, managing new ones
    async fn merge(&self, loaded: Vec<Member>) -> Vec<Member> {
        let mut managed = self.managed.lock().await;
        loaded
            .into_iter()
            .map(|member| managed.entry(member.id()).or_insert(member).clone())
            .collect()
    }
}

#[async_trait]
impl<R: MemberRepository> MemberRepository for PersistenceContext<R> {
    async fn save(&self, member: &NewMember) -> RepositoryResult<Member> {
        let saved = self.inner.save(member).await?;
        self.managed.lock().await.insert(saved.id(), saved.clone());
        Ok(saved)
    }

    async fn update(&self, member: &Member) -> RepositoryResult<()> {
        self.inner.update(member).await?;
        self.managed.lock().await.insert(member.id(), member.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Member>> {
        if let Some(member) = self.managed.lock().await.get(&id) {
            return Ok(Some(member.clone()));
        }

        let loaded = self.inner.find_by_id(id).await?;
        Ok(self.merge(loaded.into_iter().collect()).await.pop())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        let loaded = self.inner.find_all().await?;
        Ok(self.merge(loaded).await)
    }

    async fn find_by_username(&self, username: &str) -> RepositoryResult<Vec<Member>> {
        let loaded = self.inner.find_by_username(username).await?;
        Ok(self.merge(loaded).await)
    }

    async fn find_by_team(&self, team_id: i64) -> RepositoryResult<Vec<Member>> {
        let loaded = self.inner.find_by_team(team_id).await?;
        Ok(self.merge(loaded).await)
    }

    async fn bulk_rename_younger_than(
        &self,
        username: &str,
        age_lt: i32,
    ) -> RepositoryResult<u64> {
        tracing::debug!("bulk rename bypasses the persistence context");
        self.inner.bulk_rename_younger_than(username, age_lt).await
    }

    async fn bulk_add_age(&self, delta: i32) -> RepositoryResult<u64> {
        tracing::debug!("bulk age update bypasses the persistence context");
        self.inner.bulk_add_age(delta).await
    }

    async fn bulk_delete_older_than(&self, age_gt: i32) -> RepositoryResult<u64> {
        tracing::debug!("bulk delete bypasses the persistence context");
        self.inner.bulk_delete_older_than(age_gt).await
    }
}
