pub mod builtin;
pub mod reader;
pub mod report;

pub use builtin::rogue_invitational_2024;
pub use reader::{read_events_csv, read_events_file, read_events_json, EventRecord};
pub use report::{event_report, event_type_distribution, style_mapping, EventReportRow, TypeDistributionRow, TypeStyle};
