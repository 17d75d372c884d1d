//! Customer facing link resolution

use branch::{Branch, LinkMap};
use serde::{Deserialize, Serialize};

use crate::Table;

/// A single link shown to a customer scanning a table's QR code
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct LinkItem {
	pub key:   String,
	pub label: String,
	pub icon:  String,
	pub url:   String,
}

const FALLBACK_DISPLAY: (&str, &str) = ("Website", "icons8-location-50.png");

/// Display label and icon for every known link key
const LINK_CATALOG: &[(&str, &str, &str)] = &[
	("order", "Bir Tıkla Sipariş Ver!", "icons8-buy-48.png"),
	("feedback", "Yorum Bırak", "icons8-review-50.png"),
	("instagram", "Instagram", "icons8-instagram-48.png"),
	("whatsapp", "WhatsApp", "icons8-whatsapp-48.png"),
	("branchIstanbul", "İstanbul Şubemiz", "icons8-location-50.png"),
	("branchAnkara", "Ankara Şubemiz", "icons8-location-50.png"),
	("branchKurttepe", "Kurttepe Şubemiz", "icons8-location-50.png"),
	("branchBarajyolu", "Barajyolu Şubemiz", "icons8-location-50.png"),
	("threads", "Threads", "icons8-threads-50.png"),
	("twitter", "Twitter", "icons8-twitter-50.png"),
	("tiktok", "TikTok", "icons8-tiktok-50.png"),
];

/// Look up the label and icon for a link key
#[must_use]
pub fn display_for(key: &str) -> (&'static str, &'static str) {
	LINK_CATALOG
		.iter()
		.find(|(k, ..)| *k == key)
		.map_or(FALLBACK_DISPLAY, |(_, label, icon)| (*label, *icon))
}

/// Merge `overrides` over `defaults` and emit one item per key of
/// `link_order` that has a URL after the merge
///
/// Keys missing from `link_order` are not emitted and duplicate keys in
/// `link_order` are emitted once per occurrence.
#[must_use]
pub fn resolve(
	defaults: &LinkMap,
	overrides: Option<&LinkMap>,
	link_order: &[String],
) -> Vec<LinkItem> {
	let merged = defaults.merged_with(overrides);

	link_order
		.iter()
		.filter_map(|key| {
			let url = merged.get(key)?;
			let (label, icon) = display_for(key);

			Some(LinkItem {
				key:   key.clone(),
				label: label.to_string(),
				icon:  icon.to_string(),
				url:   url.clone(),
			})
		})
		.collect()
}

/// Resolve the ordered customer links for a table of a branch
#[must_use]
pub fn resolve_links(branch: &Branch, table: &Table) -> Vec<LinkItem> {
	resolve(
		&branch.default_links,
		table.overridden_links.as_ref(),
		&branch.link_order,
	)
}
