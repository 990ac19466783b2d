/**
 * Responsibility
 *  - One tag + alias per resource addressed by id
 *  - Everything here is re-exported through ./mod.rs
 */
use super::core::{ResourceId, ResourceTag};

// activities
pub enum ActivityTag {}
impl ResourceTag for ActivityTag {
    const NAME: &'static str = "activity";
}
pub type ActivityId = ResourceId<ActivityTag>;

// reports
pub enum ReportTag {}
impl ResourceTag for ReportTag {
    const NAME: &'static str = "report";
}
pub type ReportId = ResourceId<ReportTag>;

// schedule_items
pub enum ScheduleTag {}
impl ResourceTag for ScheduleTag {
    const NAME: &'static str = "schedule";
}
pub type ScheduleId = ResourceId<ScheduleTag>;
