/// Flattened read-only view of a member joined with its team
///
/// Team fields are `None` when the member has no team. Rows are derived
/// per query and never written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTeamRow {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

impl MemberTeamRow {
    pub fn new(
        member_id: i64,
        username: Option<String>,
        age: i32,
        team_id: Option<i64>,
        team_name: Option<String>,
    ) -> Self {
        Self {
            member_id,
            username,
            age,
            team_id,
            team_name,
        }
    }
}
