use models_common::{PaginationConfig, QUERY_HARD_LIMIT};
use serde::{Deserialize, Deserializer};

use crate::schemas::BoundedU32Visitor;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const LIMIT_MAX: u32 = QUERY_HARD_LIMIT as u32;

const fn limit_default() -> u32 { LIMIT_MAX }

/// Offset based pagination request parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PaginationOptions {
	#[serde(default, deserialize_with = "ds_skip_bounds")]
	pub skip:  u32,
	#[serde(default = "limit_default", deserialize_with = "ds_limit_bounds")]
	pub limit: u32,
}

impl Default for PaginationOptions {
	fn default() -> Self { Self { skip: 0, limit: LIMIT_MAX } }
}

impl From<PaginationOptions> for PaginationConfig {
	fn from(value: PaginationOptions) -> Self {
		Self { limit: value.limit.into(), offset: value.skip.into() }
	}
}

/// Deserialization visitor for `skip` bounds.
fn ds_skip_bounds<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
	d.deserialize_u32(BoundedU32Visitor { start: 0, end: u32::MAX })
}

/// Deserialization visitor for `limit` bounds.
fn ds_limit_bounds<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
	d.deserialize_u32(BoundedU32Visitor { start: 1, end: LIMIT_MAX })
}
