use serde::Serialize;

/// Pass/fail outcome. Serialized as `approved`/`failed`; `label` is the text
/// shown to students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Verdict {
    Approved,
    Failed,
}

impl Verdict {
    pub(crate) const PASSING_PERCENT: i64 = 60;

    pub(crate) fn from_percent(percent: i64) -> Self {
        if percent >= Self::PASSING_PERCENT {
            Self::Approved
        } else {
            Self::Failed
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Approved => "Aprobado",
            Self::Failed => "Reprobado",
        }
    }
}

/// One graded activity inside a subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ActivityContribution {
    pub(crate) activity_id: i64,
    pub(crate) title: String,
    pub(crate) score: f64,
    pub(crate) weight: f64,
    pub(crate) contribution: f64,
}

/// Per-subject aggregate before the scale is known.
///
/// `average` is on the original score scale. On the unweighted path
/// `activities` is empty and the weight fields are absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SubjectSummary {
    pub(crate) subject_name: String,
    pub(crate) teacher_name: String,
    pub(crate) average: f64,
    pub(crate) activities: Vec<ActivityContribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) evaluated_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) total_contribution: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SubjectReport {
    #[serde(flatten)]
    pub(crate) summary: SubjectSummary,
    pub(crate) percent: i64,
    pub(crate) status: Verdict,
    pub(crate) status_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct FinalReport {
    pub(crate) student_id: i64,
    /// 20 or 100, detected from the highest subject average.
    pub(crate) scale: u32,
    pub(crate) subjects: Vec<SubjectReport>,
    pub(crate) average_percent: i64,
    pub(crate) status: Verdict,
    pub(crate) status_label: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_is_a_pass() {
        assert_eq!(Verdict::from_percent(60), Verdict::Approved);
        assert_eq!(Verdict::from_percent(59), Verdict::Failed);
        assert_eq!(Verdict::Approved.label(), "Aprobado");
        assert_eq!(Verdict::Failed.label(), "Reprobado");
    }

    #[test]
    fn fallback_subject_omits_weight_fields() {
        let summary = SubjectSummary {
            subject_name: "Historia".to_string(),
            teacher_name: String::new(),
            average: 14.5,
            activities: Vec::new(),
            evaluated_percent: None,
            total_contribution: None,
        };
        let json = serde_json::to_value(SubjectReport {
            summary,
            percent: 73,
            status: Verdict::Approved,
            status_label: Verdict::Approved.label(),
        })
        .unwrap();

        assert_eq!(json["subject_name"], "Historia");
        assert_eq!(json["status"], "approved");
        assert!(json.get("evaluated_percent").is_none());
        assert!(json.get("total_contribution").is_none());
    }
}
