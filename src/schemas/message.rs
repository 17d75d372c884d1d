use message::NewMessage;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct CreateMessageRequest {
	#[validate(length(min = 1, max = 128, code = "name-length"))]
	pub name:       String,
	#[validate(email(message = "invalid email", code = "email"))]
	pub email:      String,
	pub phone:      Option<String>,
	pub subject:    Option<String>,
	#[validate(length(min = 1, code = "message-length"))]
	pub message:    String,
	pub branch_key: String,
}

impl From<CreateMessageRequest> for NewMessage {
	fn from(value: CreateMessageRequest) -> Self {
		Self {
			name:       value.name,
			email:      value.email,
			phone:      value.phone,
			subject:    value.subject,
			message:    value.message,
			branch_key: value.branch_key,
		}
	}
}
