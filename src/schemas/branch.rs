use std::sync::LazyLock;

use branch::{BranchUpdate, LinkMap, NewBranch};
use common::Error;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

static SLUG_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct CreateBranchRequest {
	#[validate(regex(
		path = *SLUG_REGEX,
		message = "slug must only contain lowercase letters, numbers and single dashes",
		code = "slug-regex"
	))]
	#[validate(length(
		min = 1,
		max = 64,
		message = "slug must be between 1 and 64 characters long",
		code = "slug-length"
	))]
	pub slug:                    String,
	#[validate(length(
		min = 1,
		max = 128,
		message = "name must be between 1 and 128 characters long",
		code = "name-length"
	))]
	pub name:                    String,
	pub display_whatsapp_number: Option<String>,
	#[serde(default)]
	pub default_links:           LinkMap,
	#[serde(default)]
	pub link_order:              Vec<String>,
}

impl From<CreateBranchRequest> for NewBranch {
	fn from(value: CreateBranchRequest) -> Self {
		Self {
			slug:                    value.slug,
			name:                    value.name,
			display_whatsapp_number: value.display_whatsapp_number,
			default_links:           value.default_links,
			link_order:              value.link_order,
		}
	}
}

/// Partial branch update, an explicit `null` WhatsApp number clears it
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateBranchRequest {
	pub slug:                    Option<String>,
	#[validate(length(
		min = 1,
		max = 128,
		message = "name must be between 1 and 128 characters long",
		code = "name-length"
	))]
	pub name:                    Option<String>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "::serde_with::rust::double_option"
	)]
	pub display_whatsapp_number: Option<Option<String>>,
	pub default_links:           Option<LinkMap>,
	pub link_order:              Option<Vec<String>>,
}

impl UpdateBranchRequest {
	/// Turn this request into the changes for a branch with the given slug
	///
	/// # Errors
	/// The slug of a branch never changes, a request carrying a different
	/// slug is rejected
	pub fn into_update(self, current_slug: &str) -> Result<BranchUpdate, Error> {
		if let Some(slug) = &self.slug
			&& slug != current_slug
		{
			return Err(Error::ValidationError(
				"the slug of a branch can not be changed".to_string(),
			));
		}

		Ok(BranchUpdate {
			name:                    self.name,
			display_whatsapp_number: self.display_whatsapp_number,
			default_links:           self.default_links,
			link_order:              self.link_order,
		})
	}
}
