//! Lead filtering.
//!
//! - **range**: value normalizer, range parser and overlap matcher for the
//!   free-text `employees` / `revenue` attributes
//! - **criteria**: [`LeadFilter`], the validated multi-field filter
//! - **choices**: data-derived selectable values plus the range catalog
//! - **form**: builds a [`LeadFilter`] from raw input and explicit choices

pub mod choices;
pub mod criteria;
pub mod form;
pub mod range;
pub mod split;

pub use choices::{ChoiceSet, FilterChoices, SelectOption};
pub use criteria::LeadFilter;
pub use form::{FilterForm, FilterFormError, FilterQuery};
pub use range::{Range, check_multiple_ranges, check_range_overlap, parse_range, parse_value};
pub use split::{split_list, split_range_list};
