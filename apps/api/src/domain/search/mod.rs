// Member search: condition, filter fragments, projection and paging

pub mod condition;
pub mod paging;
pub mod predicate;
pub mod projection;
pub mod sort;

pub use condition::MemberSearchCondition;
pub use paging::{Page, Pageable};
pub use predicate::{MemberFilter, MemberPredicate};
pub use projection::MemberTeamRow;
pub use sort::{Direction, Sort, SortOrder, SortProperty};
