pub mod catalog;
pub mod email;
pub mod error;
pub mod field;
pub mod lead;
pub mod status;

pub use catalog::{RangeCatalog, RangeChoice};
pub use email::{email_key, is_valid_email};
pub use error::{ModelError, Result};
pub use field::{EMAIL_MAX_LEN, LeadField};
pub use lead::{Lead, LeadDraft, LeadId};
pub use status::LeadStatus;
