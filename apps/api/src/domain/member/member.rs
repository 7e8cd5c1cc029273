use crate::domain::team::Team;

/// Member entity
///
/// # Invariants
/// - Age is never negative
/// - A member belongs to at most one team; `None` is a valid, permanent state
///
/// # Example
/// ```
/// use member_search_api::domain::member::NewMember;
///
/// let member = NewMember::new(Some("member1".to_string()), 10, Some(1)).expect("valid member");
/// assert_eq!(member.username(), Some("member1"));
/// assert_eq!(member.team_id(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: i64,
    username: Option<String>,
    age: i32,
    team_id: Option<i64>,
}

impl Member {
    /// Moves the member to another team, or out of any team with `None`
    pub fn change_team(&mut self, team: Option<&Team>) {
        self.team_id = team.map(Team::id);
    }

    /// Replaces the member's username
    pub fn rename(&mut self, username: Option<String>) {
        self.username = username;
    }

    // ===== Getters =====

    /// Returns the member's ID
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the username, if any
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the member's age
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Returns the ID of the member's team, if any
    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    /// Reconstructs a Member from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: i64,
        username: Option<String>,
        age: i32,
        team_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            username,
            age,
            team_id,
        }
    }
}

/// A member that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    username: Option<String>,
    age: i32,
    team_id: Option<i64>,
}

impl NewMember {
    /// Creates a new member
    ///
    /// # Arguments
    /// * `username` - Optional username
    /// * `age` - Age in years (cannot be negative)
    /// * `team_id` - Team the member joins, if any
    ///
    /// # Returns
    /// * `Ok(NewMember)` - If the age is valid
    /// * `Err(String)` - If the age is negative
    pub fn new(username: Option<String>, age: i32, team_id: Option<i64>) -> Result<Self, String> {
        if age < 0 {
            return Err(format!("Age cannot be negative: {}", age));
        }

        Ok(Self {
            username,
            age,
            team_id,
        })
    }

    /// Shorthand for a named member of the given team
    pub fn in_team(username: &str, age: i32, team: &Team) -> Result<Self, String> {
        Self::new(Some(username.to_string()), age, Some(team.id()))
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    /// Attaches the id assigned by the store
    pub fn into_member(self, id: i64) -> Member {
        Member::from_persistence(id, self.username, self.age, self.team_id)
    }
}
