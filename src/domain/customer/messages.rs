// Notification messages shared by validators and use cases

pub const NOT_FOUND_RECORD: &str = "not found";
pub const INVALID_DOCUMENT: &str = "invalid document number";
pub const INVALID_STATE_CODE: &str = "must be a two-letter state code";
