use async_trait::async_trait;

use crate::domain::errors::RepositoryResult;
use crate::domain::search::paging::{self, Page, Pageable};
use crate::domain::search::{MemberSearchCondition, MemberTeamRow};

/// Member search over the member/team outer join
///
/// Every method applies the conjunction of the condition's active
/// fragments; an empty condition selects every member.
#[async_trait]
pub trait MemberSearchRepository: Send + Sync {
    /// All matching rows, unpaged
    async fn search(&self, condition: &MemberSearchCondition)
        -> RepositoryResult<Vec<MemberTeamRow>>;

    /// One page of matching rows with the total fetched in the same round trip
    async fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
    ) -> RepositoryResult<Page<MemberTeamRow>>;

    /// One page of matching rows, without a total
    async fn fetch_page(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
    ) -> RepositoryResult<Vec<MemberTeamRow>>;

    /// Number of matching rows, ignoring any window
    async fn count(&self, condition: &MemberSearchCondition) -> RepositoryResult<u64>;

    /// One page of matching rows; the count query is skipped when the page
    /// is provably the last one
    async fn search_page_complex(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
    ) -> RepositoryResult<Page<MemberTeamRow>> {
        let content = self.fetch_page(condition, pageable).await?;
        paging::page_with_count(content, pageable.clone(), || self.count(condition)).await
    }
}
