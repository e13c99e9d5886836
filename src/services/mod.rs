pub(crate) mod final_report;
pub(crate) mod grade_sources;
