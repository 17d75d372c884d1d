use serde::{Deserialize, Serialize};
use table::LinkItem;

/// Everything a customer sees after scanning a table's QR code
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CustomerViewResponse {
	pub ordered_links:           Vec<LinkItem>,
	pub display_whatsapp_number: Option<String>,
}
