//! Output formatting for answers, consensus results and index reports

pub mod console;
pub mod formatter;
