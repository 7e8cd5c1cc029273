use thiserror::Error;

/// Errors surfaced by repository implementations
///
/// Store failures are carried unmodified so callers see the driver's own error.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Team not found: {0}")]
    TeamNotFound(i64),

    #[error("Member not found: {0}")]
    MemberNotFound(i64),

    #[error("Age of member {member_id} out of range: {age} + {delta}")]
    AgeOutOfRange { member_id: i64, age: i32, delta: i32 },
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages() {
        assert_eq!(RepositoryError::TeamNotFound(7).to_string(), "Team not found: 7");
        assert_eq!(
            RepositoryError::MemberNotFound(3).to_string(),
            "Member not found: 3"
        );
    }

    #[test]
    fn age_out_of_range_message() {
        let err = RepositoryError::AgeOutOfRange {
            member_id: 2,
            age: i32::MAX,
            delta: 1,
        };

        assert_eq!(
            err.to_string(),
            "Age of member 2 out of range: 2147483647 + 1"
        );
    }

    #[test]
    fn database_error_is_transparent() {
        let err = RepositoryError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), sqlx::Error::RowNotFound.to_string());
    }
}
