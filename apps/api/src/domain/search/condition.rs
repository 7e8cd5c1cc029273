/// Member search criteria
///
/// All four fields are independently optional; an absent field means
/// "no constraint". The value is immutable once built.
///
/// # Example
/// ```
/// use member_search_api::domain::search::MemberSearchCondition;
///
/// let condition = MemberSearchCondition::builder()
///     .team_name("teamB")
///     .age_goe(35)
///     .age_loe(40)
///     .build();
///
/// assert_eq!(condition.team_name(), Some("teamB"));
/// assert_eq!(condition.username(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSearchCondition {
    username: Option<String>,
    team_name: Option<String>,
    age_goe: Option<i32>,
    age_loe: Option<i32>,
}

impl MemberSearchCondition {
    /// Creates a condition from already-optional parts
    pub fn new(
        username: Option<String>,
        team_name: Option<String>,
        age_goe: Option<i32>,
        age_loe: Option<i32>,
    ) -> Self {
        Self {
            username,
            team_name,
            age_goe,
            age_loe,
        }
    }

    /// Condition without any constraint
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> MemberSearchConditionBuilder {
        MemberSearchConditionBuilder::default()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref()
    }

    /// Inclusive lower age bound
    pub fn age_goe(&self) -> Option<i32> {
        self.age_goe
    }

    /// Inclusive upper age bound
    pub fn age_loe(&self) -> Option<i32> {
        self.age_loe
    }
}

/// Consuming builder for [`MemberSearchCondition`]
#[derive(Debug, Default)]
pub struct MemberSearchConditionBuilder {
    inner: MemberSearchCondition,
}

impl MemberSearchConditionBuilder {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.inner.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.inner.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.inner.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.inner.age_loe = Some(age);
        self
    }

    pub fn build(self) -> MemberSearchCondition {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_condition_has_no_fields() {
        let condition = MemberSearchCondition::empty();

        assert_eq!(condition.username(), None);
        assert_eq!(condition.team_name(), None);
        assert_eq!(condition.age_goe(), None);
        assert_eq!(condition.age_loe(), None);
    }

    #[test]
    fn builder_sets_only_given_fields() {
        let condition = MemberSearchCondition::builder()
            .username("member1")
            .age_loe(20)
            .build();

        assert_eq!(condition.username(), Some("member1"));
        assert_eq!(condition.team_name(), None);
        assert_eq!(condition.age_goe(), None);
        assert_eq!(condition.age_loe(), Some(20));
    }

    #[test]
    fn builder_matches_new() {
        let built = MemberSearchCondition::builder()
            .username("member1")
            .team_name("teamA")
            .age_goe(10)
            .age_loe(20)
            .build();
        let direct = MemberSearchCondition::new(
            Some("member1".to_string()),
            Some("teamA".to_string()),
            Some(10),
            Some(20),
        );

        assert_eq!(built, direct);
    }
}
