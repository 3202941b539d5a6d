//! Input validation for submitted HTML forms.

pub mod bug_form;
