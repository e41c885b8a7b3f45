pub mod checklist;
pub mod selection;
