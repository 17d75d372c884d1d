use serde::{Deserialize, Serialize};

/// Maximum number of rows any list query returns
pub const QUERY_HARD_LIMIT: i64 = 100;

/// The rows of branch owned data a caller is allowed to see
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub enum BranchScope {
	/// Every branch, granted to superusers
	All,
	/// A single branch, identified by its id
	Branch(i32),
	/// A regular user without a branch assignment
	Unassigned,
}

impl BranchScope {
	/// Check if this scope can never match any row
	#[must_use]
	pub fn is_empty(&self) -> bool { matches!(self, Self::Unassigned) }

	/// The branch id this scope is restricted to, if any
	#[must_use]
	pub fn branch_id(&self) -> Option<i32> {
		match self {
			Self::Branch(id) => Some(*id),
			_ => None,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct PaginationConfig {
	pub limit:  i64,
	pub offset: i64,
}

impl Default for PaginationConfig {
	fn default() -> Self { Self { limit: QUERY_HARD_LIMIT, offset: 0 } }
}
