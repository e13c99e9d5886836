use crate::schemas::report::{FinalReport, SubjectReport, SubjectSummary, Verdict};

const SCALE_20: u32 = 20;
const SCALE_100: u32 = 100;

/// Averages above 20 can only come from a 0-100 grading scale.
pub(crate) fn detect_scale(subjects: &[SubjectSummary]) -> u32 {
    let highest = subjects.iter().map(|subject| subject.average).fold(f64::NEG_INFINITY, f64::max);
    if highest > f64::from(SCALE_20) {
        SCALE_100
    } else {
        SCALE_20
    }
}

/// Half-up rounding, so 84.5 becomes 85 and -0.5 becomes 0.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub(crate) fn percent_of(average: f64, scale: u32) -> i64 {
    if scale == 0 {
        return 0;
    }
    round_half_up(average / f64::from(scale) * 100.0)
}

/// Grades every subject against the detected scale and averages the
/// percentages. `subjects` must not be empty.
pub(crate) fn finalize(student_id: i64, subjects: Vec<SubjectSummary>) -> FinalReport {
    let scale = detect_scale(&subjects);

    let subjects: Vec<SubjectReport> = subjects
        .into_iter()
        .map(|summary| {
            let percent = percent_of(summary.average, scale);
            let status = Verdict::from_percent(percent);
            SubjectReport { summary, percent, status, status_label: status.label() }
        })
        .collect();

    let total: i64 = subjects.iter().map(|subject| subject.percent).sum();
    let average_percent = if subjects.is_empty() {
        0
    } else {
        round_half_up(total as f64 / subjects.len() as f64)
    };
    let status = Verdict::from_percent(average_percent);

    FinalReport {
        student_id,
        scale,
        subjects,
        average_percent,
        status,
        status_label: status.label(),
    }
}
