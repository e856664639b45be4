pub mod dto;
pub mod rules;
pub mod service;

pub use dto::{CampusSummary, LinkView};
pub use rules::RecordRules;
pub use service::CampusService;
