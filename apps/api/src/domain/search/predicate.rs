use super::condition::MemberSearchCondition;
use super::projection::MemberTeamRow;

/// A single filter fragment derived from one search criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberPredicate {
    /// `member.username = value`
    UsernameEq(String),
    /// `team.name = value`
    TeamNameEq(String),
    /// `member.age >= value`
    AgeGoe(i32),
    /// `member.age <= value`
    AgeLoe(i32),
}

impl MemberPredicate {
    /// Evaluates the fragment against a joined row
    ///
    /// A row without a team never satisfies a team-name fragment.
    pub fn matches(&self, row: &MemberTeamRow) -> bool {
        match self {
            MemberPredicate::UsernameEq(username) => row.username.as_deref() == Some(username),
            MemberPredicate::TeamNameEq(name) => row.team_name.as_deref() == Some(name),
            MemberPredicate::AgeGoe(bound) => row.age >= *bound,
            MemberPredicate::AgeLoe(bound) => row.age <= *bound,
        }
    }
}

/// True when the value is non-empty and contains a non-whitespace character
fn has_text(value: &str) -> bool {
    value.chars().any(|c| !c.is_whitespace())
}

/// Exact username match, active only when the username has text
pub fn username_eq(username: Option<&str>) -> Option<MemberPredicate> {
    username
        .filter(|u| has_text(u))
        .map(|u| MemberPredicate::UsernameEq(u.to_string()))
}

/// Exact team-name match, active only when the name has text
pub fn team_name_eq(team_name: Option<&str>) -> Option<MemberPredicate> {
    team_name
        .filter(|t| has_text(t))
        .map(|t| MemberPredicate::TeamNameEq(t.to_string()))
}

/// Inclusive lower age bound
pub fn age_goe(bound: Option<i32>) -> Option<MemberPredicate> {
    bound.map(MemberPredicate::AgeGoe)
}

/// Inclusive upper age bound
pub fn age_loe(bound: Option<i32>) -> Option<MemberPredicate> {
    bound.map(MemberPredicate::AgeLoe)
}

/// Conjunction of the active fragments of a search condition
///
/// Absent fragments are dropped, so an empty filter matches every row.
///
/// # Example
/// ```
/// use member_search_api::domain::search::{MemberFilter, MemberSearchCondition};
///
/// let condition = MemberSearchCondition::builder().username("  ").age_goe(30).build();
/// let filter = MemberFilter::from_condition(&condition);
///
/// assert_eq!(filter.predicates().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    predicates: Vec<MemberPredicate>,
}

impl MemberFilter {
    pub fn from_condition(condition: &MemberSearchCondition) -> Self {
        let predicates = [
            username_eq(condition.username()),
            team_name_eq(condition.team_name()),
            age_goe(condition.age_goe()),
            age_loe(condition.age_loe()),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self { predicates }
    }

    pub fn predicates(&self) -> &[MemberPredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, row: &MemberTeamRow) -> bool {
        self.predicates.iter().all(|p| p.matches(row))
    }
}
