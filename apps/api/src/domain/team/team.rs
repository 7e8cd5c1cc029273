/// Team entity
///
/// A named group that members may belong to. The team does not own its
/// members' lifecycle; membership is recorded on the member side and looked
/// up through `MemberRepository::find_by_team`.
///
/// # Example
/// ```
/// use member_search_api::domain::team::{NewTeam, Team};
///
/// let new_team = NewTeam::new("teamA").expect("valid team");
/// assert_eq!(new_team.name(), "teamA");
///
/// let team = Team::from_persistence(1, "teamA".to_string());
/// assert_eq!(team.id(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: i64,
    name: String,
}

impl Team {
    /// Returns the team's ID
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the team's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// Bypasses validation since the row was validated before it was stored.
    pub fn from_persistence(id: i64, name: String) -> Self {
        Self { id, name }
    }
}

/// A team that has not been stored yet
///
/// The store assigns the surrogate id on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    name: String,
}

impl NewTeam {
    /// Creates a new team
    ///
    /// # Returns
    /// * `Ok(NewTeam)` - If the name has text
    /// * `Err(String)` - If the name is empty or whitespace only
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Team name cannot be empty".to_string());
        }

        Ok(Self { name })
    }

    /// Returns the team's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attaches the id assigned by the store
    pub fn into_team(self, id: i64) -> Team {
        Team::from_persistence(id, self.name)
    }
}
