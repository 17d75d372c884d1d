use std::collections::BTreeMap;

use diesel::deserialize::{FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{Output, ToSql};
use diesel::sql_types::Jsonb;
use serde::{Deserialize, Serialize};

/// A mapping of link keys (`order`, `instagram`, ...) to URLs, stored as a
/// `jsonb` object with string values
#[derive(
	AsExpression,
	Clone,
	Debug,
	Default,
	Deserialize,
	Eq,
	FromSqlRow,
	PartialEq,
	Serialize,
)]
#[diesel(sql_type = Jsonb)]
#[serde(transparent)]
pub struct LinkMap(pub BTreeMap<String, String>);

impl LinkMap {
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&String> { self.0.get(key) }

	/// Merge `other` over this map, entries in `other` win on collision
	#[must_use]
	pub fn merged_with(&self, other: Option<&LinkMap>) -> LinkMap {
		let mut merged = self.0.clone();

		if let Some(other) = other {
			merged.extend(other.0.iter().map(|(k, v)| (k.clone(), v.clone())));
		}

		LinkMap(merged)
	}
}

impl<K, V> FromIterator<(K, V)> for LinkMap
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

impl FromSql<Jsonb, Pg> for LinkMap {
	fn from_sql(bytes: PgValue<'_>) -> diesel::deserialize::Result<Self> {
		let value = <serde_json::Value as FromSql<Jsonb, Pg>>::from_sql(bytes)?;
		Ok(serde_json::from_value(value)?)
	}
}

impl ToSql<Jsonb, Pg> for LinkMap {
	fn to_sql<'b>(
		&'b self,
		out: &mut Output<'b, '_, Pg>,
	) -> diesel::serialize::Result {
		let value = serde_json::to_value(self)?;
		<serde_json::Value as ToSql<Jsonb, Pg>>::to_sql(
			&value,
			&mut out.reborrow(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn merge_prefers_the_override() {
		let defaults: LinkMap =
			[("order", "u1"), ("feedback", "u2")].into_iter().collect();
		let overrides: LinkMap = [("feedback", "u3")].into_iter().collect();

		let merged = defaults.merged_with(Some(&overrides));

		assert_eq!(merged.get("order").map(String::as_str), Some("u1"));
		assert_eq!(merged.get("feedback").map(String::as_str), Some("u3"));
		assert_eq!(defaults.get("feedback").map(String::as_str), Some("u2"));
	}

	#[test]
	fn non_string_values_are_rejected() {
		let value = serde_json::json!({ "order": 5 });

		assert!(serde_json::from_value::<LinkMap>(value).is_err());
	}
}
