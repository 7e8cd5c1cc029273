//! SQL rendering of member searches
//!
//! Builds `sqlx` queries over `members m LEFT JOIN teams t`. Every criterion
//! value is sent as a bound parameter; column names come from a fixed set.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::search::{
    Direction, MemberFilter, MemberPredicate, MemberSearchCondition, Pageable, SortProperty,
};

const MEMBER_TEAM_COLUMNS: &str =
    "SELECT m.id AS member_id, m.username, m.age, t.id AS team_id, t.name AS team_name";

const MEMBER_TEAM_JOIN: &str = " FROM members m LEFT JOIN teams t ON t.id = m.team_id";

/// Row shape shared by every member search query
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MemberTeamRecord {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

/// Member search row carrying the window-function total
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct CountedMemberTeamRecord {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub total_count: i64,
}

/// Sort expression for a property; text sorts bytewise whatever the database collation
fn column(property: SortProperty) -> &'static str {
    match property {
        SortProperty::MemberId => "m.id",
        SortProperty::Username => r#"m.username COLLATE "C""#,
        SortProperty::Age => "m.age",
        SortProperty::TeamId => "t.id",
        SortProperty::TeamName => r#"t.name COLLATE "C""#,
    }
}

/// Appends ` WHERE a AND b ...`, or nothing for an empty filter
fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &MemberFilter) {
    for (i, predicate) in filter.predicates().iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match predicate {
            MemberPredicate::UsernameEq(username) => {
                qb.push("m.username = ").push_bind(username.clone());
            }
            MemberPredicate::TeamNameEq(name) => {
                qb.push("t.name = ").push_bind(name.clone());
            }
            MemberPredicate::AgeGoe(bound) => {
                qb.push("m.age >= ").push_bind(*bound);
            }
            MemberPredicate::AgeLoe(bound) => {
                qb.push("m.age <= ").push_bind(*bound);
            }
        }
    }
}

/// Appends the requested order, member id as tie-breaker, then the window
fn push_order_and_window(qb: &mut QueryBuilder<'static, Postgres>, pageable: &Pageable) {
    qb.push(" ORDER BY ");
    for order in pageable.sort().orders() {
        qb.push(column(order.property));
        qb.push(match order.direction {
            Direction::Asc => " ASC, ",
            Direction::Desc => " DESC, ",
        });
    }
    qb.push("m.id ASC");

    qb.push(" LIMIT ")
        .push_bind(i64::from(pageable.page_size()));
    qb.push(" OFFSET ")
        .push_bind(i64::try_from(pageable.offset()).unwrap_or(i64::MAX));
}

/// Unpaged search
pub(crate) fn search(condition: &MemberSearchCondition) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(MEMBER_TEAM_COLUMNS);
    qb.push(MEMBER_TEAM_JOIN);
    push_filter(&mut qb, &MemberFilter::from_condition(condition));
    qb
}

/// One window of the search; with `with_total` each row also carries
/// `total_count`, the filtered total before the window
pub(crate) fn page(
    condition: &MemberSearchCondition,
    pageable: &Pageable,
    with_total: bool,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(MEMBER_TEAM_COLUMNS);
    if with_total {
        qb.push(", COUNT(*) OVER () AS total_count");
    }
    qb.push(MEMBER_TEAM_JOIN);
    push_filter(&mut qb, &MemberFilter::from_condition(condition));
    push_order_and_window(&mut qb, pageable);
    qb
}

/// Filtered row count; joined so that team-name criteria apply
pub(crate) fn count(condition: &MemberSearchCondition) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*)");
    qb.push(MEMBER_TEAM_JOIN);
    push_filter(&mut qb, &MemberFilter::from_condition(condition));
    qb
}
