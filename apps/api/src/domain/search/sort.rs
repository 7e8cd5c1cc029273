use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::projection::MemberTeamRow;

/// Properties of [`MemberTeamRow`] that a page may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    MemberId,
    Username,
    Age,
    TeamId,
    TeamName,
}

impl FromStr for SortProperty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memberId" => Ok(SortProperty::MemberId),
            "username" => Ok(SortProperty::Username),
            "age" => Ok(SortProperty::Age),
            "teamId" => Ok(SortProperty::TeamId),
            "teamName" => Ok(SortProperty::TeamName),
            other => Err(format!("Unknown sort property: {}", other)),
        }
    }
}

impl fmt::Display for SortProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortProperty::MemberId => write!(f, "memberId"),
            SortProperty::Username => write!(f, "username"),
            SortProperty::Age => write!(f, "age"),
            SortProperty::TeamId => write!(f, "teamId"),
            SortProperty::TeamName => write!(f, "teamName"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

/// One `property[,direction]` entry of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub property: SortProperty,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Desc,
        }
    }

    /// Compares two rows on this order's property
    ///
    /// Ascending places missing values last and descending places them
    /// first, the way PostgreSQL orders NULLs by default. Text compares
    /// bytewise, matching `COLLATE "C"`.
    pub fn compare(&self, a: &MemberTeamRow, b: &MemberTeamRow) -> Ordering {
        let ordering = match self.property {
            SortProperty::MemberId => a.member_id.cmp(&b.member_id),
            SortProperty::Username => nulls_last(&a.username, &b.username),
            SortProperty::Age => a.age.cmp(&b.age),
            SortProperty::TeamId => nulls_last(&a.team_id, &b.team_id),
            SortProperty::TeamName => nulls_last(&a.team_name, &b.team_name),
        };

        match self.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

impl FromStr for SortOrder {
    type Err = String;

    /// Parses `age`, `age,desc` or `teamName,ASC`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let property = parts.next().unwrap_or_default().parse()?;
        let direction = match parts.next() {
            Some(d) if !d.is_empty() => d.parse()?,
            _ => Direction::Asc,
        };

        if parts.next().is_some() {
            return Err(format!("Invalid sort order: {}", s));
        }

        Ok(Self {
            property,
            direction,
        })
    }
}

/// Ordered list of sort orders; earlier entries take precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(orders: Vec<SortOrder>) -> Self {
        Self { orders }
    }

    /// Parses `;`-separated orders, skipping entries that do not parse
    pub fn parse_lenient(raw: &str) -> Self {
        let orders = raw
            .split(';')
            .filter(|s| !s.trim().is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();

        Self { orders }
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }

    /// Full ordering of two rows with member id as the final tie-breaker
    pub fn compare(&self, a: &MemberTeamRow, b: &MemberTeamRow) -> Ordering {
        self.orders
            .iter()
            .map(|o| o.compare(a, b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| a.member_id.cmp(&b.member_id))
    }
}
