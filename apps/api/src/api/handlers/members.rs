use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::search::{MemberSearchCondition, MemberTeamRow, Page, Pageable, Sort};

/// Page size used when `size` is absent or unusable
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest accepted `size`; bigger requests are capped
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Parses a numeric parameter, treating empty or malformed values as absent
fn lenient<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Search criteria as sent on the query string
///
/// Numbers are taken as text so that a malformed value reads as "no
/// constraint" instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchParams {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<String>,
    pub age_loe: Option<String>,
}

impl From<MemberSearchParams> for MemberSearchCondition {
    fn from(params: MemberSearchParams) -> Self {
        MemberSearchCondition::new(
            params.username,
            params.team_name,
            lenient(params.age_goe.as_deref()),
            lenient(params.age_loe.as_deref()),
        )
    }
}

/// Paging parameters: `page` (0-based), `size` and `sort`
///
/// `sort` takes `property[,asc|desc]` entries separated by `;`.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
}

impl PageParams {
    pub fn to_pageable(&self) -> Result<Pageable, ApiError> {
        let size = lenient::<u32>(self.size.as_deref())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let page = lenient::<u64>(self.page.as_deref())
            .unwrap_or(0)
            .min(u64::MAX / u64::from(size));
        let sort = self
            .sort
            .as_deref()
            .map(Sort::parse_lenient)
            .unwrap_or_default();

        Pageable::of(page, size)
            .map(|pageable| pageable.with_sort(sort))
            .map_err(ApiError::internal_server_error)
    }
}

/// One joined member/team row
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamResponse {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl From<MemberTeamRow> for MemberTeamResponse {
    fn from(row: MemberTeamRow) -> Self {
        Self {
            member_id: row.member_id,
            username: row.username,
            age: row.age,
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}

/// A page of rows with its position in the whole result set
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u64,
    pub size: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
}

impl From<Page<MemberTeamRow>> for PageResponse<MemberTeamResponse> {
    fn from(page: Page<MemberTeamRow>) -> Self {
        let page = page.map(MemberTeamResponse::from);
        Self {
            total_elements: page.total_elements(),
            total_pages: page.total_pages(),
            number: page.number(),
            size: page.size(),
            number_of_elements: page.number_of_elements(),
            first: page.is_first(),
            last: page.is_last(),
            content: page.into_content(),
        }
    }
}

/// Search members without paging
///
/// GET /v1/members
pub async fn search_member_v1(
    State(state): State<AppState>,
    Query(params): Query<MemberSearchParams>,
) -> Result<Json<Vec<MemberTeamResponse>>, ApiError> {
    let condition = MemberSearchCondition::from(params);
    let rows = state.members.search(&condition).await?;

    Ok(Json(rows.into_iter().map(MemberTeamResponse::from).collect()))
}

/// Search members, one page with its total
///
/// GET /v2/members
pub async fn search_member_v2(
    State(state): State<AppState>,
    Query(params): Query<MemberSearchParams>,
    Query(paging): Query<PageParams>,
) -> Result<Json<PageResponse<MemberTeamResponse>>, ApiError> {
    let condition = MemberSearchCondition::from(params);
    let pageable = paging.to_pageable()?;
    let page = state.members.search_page_simple(&condition, &pageable).await?;

    Ok(Json(PageResponse::from(page)))
}

/// Search members, one page; the count query is skipped on the last page
///
/// GET /v3/members
pub async fn search_member_v3(
    State(state): State<AppState>,
    Query(params): Query<MemberSearchParams>,
    Query(paging): Query<PageParams>,
) -> Result<Json<PageResponse<MemberTeamResponse>>, ApiError> {
    let condition = MemberSearchCondition::from(params);
    let pageable = paging.to_pageable()?;
    let page = state
        .members
        .search_page_complex(&condition, &pageable)
        .await?;

    Ok(Json(PageResponse::from(page)))
}
