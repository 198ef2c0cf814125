//! UI widgets for the college picker
//!
//! The search box and the dropdown/result rendering built around it.

pub mod college_autocomplete;
pub mod search_input;
