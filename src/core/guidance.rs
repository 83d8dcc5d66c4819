//! Follow-up guidance derived from a classification and the number of
//! selected risk factors.

use crate::domain::model::{AssessmentResult, Classification};
use chrono::{Months, NaiveDate};
use serde::Serialize;

pub const DEFAULT_REVIEW_MONTHS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionFocus {
    Undergrowth,
    Overgrowth,
    RiskFactorsPresent,
}

impl InterventionFocus {
    pub fn title(&self) -> &'static str {
        match self {
            InterventionFocus::Undergrowth => "Undergrowth",
            InterventionFocus::Overgrowth => "Overgrowth",
            InterventionFocus::RiskFactorsPresent => "Risk factors present",
        }
    }
}

/// Visual weight of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Success,
    Outline,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RecommendedAction {
    Reassess { months: u32 },
    ValidateMeasurements,
    ReviewRiskFactors,
    ProceedToIntervention { focus: Option<InterventionFocus> },
    ValidateAndReassess { months: u32 },
    ReferToSpecialist,
}

impl RecommendedAction {
    pub fn label(&self) -> String {
        match self {
            RecommendedAction::Reassess { months } => format!("Reassess in {} Months", months),
            RecommendedAction::ValidateMeasurements => "Validate Measurements".to_string(),
            RecommendedAction::ReviewRiskFactors => "Review Risk Factors".to_string(),
            RecommendedAction::ProceedToIntervention { focus: None } => {
                "Proceed to Intervention".to_string()
            }
            RecommendedAction::ProceedToIntervention { focus: Some(focus) } => {
                format!("Proceed to Intervention ({})", focus.title())
            }
            RecommendedAction::ValidateAndReassess { months } => {
                format!("Validate & Reassess in {} Months", months)
            }
            RecommendedAction::ReferToSpecialist => "Refer to Specialist".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionStep {
    pub action: RecommendedAction,
    pub label: String,
    pub emphasis: Emphasis,
}

impl ActionStep {
    fn new(action: RecommendedAction, emphasis: Emphasis) -> Self {
        Self {
            label: action.label(),
            action,
            emphasis,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanSection {
    pub heading: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceLink {
    pub title: &'static str,
    pub url: &'static str,
}

pub const RESOURCES: &[ResourceLink] = &[
    ResourceLink {
        title: "WHO Growth Standards (Weight-for-age)",
        url: "https://www.who.int/tools/child-growth-standards/standards/weight-for-age",
    },
    ResourceLink {
        title: "WHO Feeding Recommendations (0–2 years)",
        url: "https://www.who.int/news-room/fact-sheets/detail/infant-and-young-child-feeding",
    },
    ResourceLink {
        title: "RCH Clinical Practice Guidelines: Growth and Nutrition",
        url: "https://www.rch.org.au/clinicalguide/guideline_index/Weight_and_growth/",
    },
    ResourceLink {
        title: "RACGP Paediatric Nutrition resources",
        url: "https://www.racgp.org.au/clinical-resources/clinical-guidelines",
    },
    ResourceLink {
        title: "Medicare: Allied Health (Care Plan) info",
        url: "https://www.servicesaustralia.gov.au/medicare-services-allied-health",
    },
];

const UNDERGROWTH_SECTIONS: &[PlanSection] = &[
    PlanSection {
        heading: "Diet recommendations",
        text: "Optimise energy-dense, nutrient-rich foods; monitor both food and fluid intake.",
    },
    PlanSection {
        heading: "Behavioural strategies",
        text: "Regular meals/snacks; supervised feeding; support feeding skills and positive mealtime environment.",
    },
    PlanSection {
        heading: "Nutritional optimisation",
        text: "Consider paediatric oral nutritional supplements where clinically indicated.",
    },
];

const OVERGROWTH_SECTIONS: &[PlanSection] = &[
    PlanSection {
        heading: "Diet recommendations",
        text: "Limit energy-dense, low-nutrient foods; prioritise balanced intake with fruits/vegetables; mindful beverages.",
    },
    PlanSection {
        heading: "Behavioural strategies",
        text: "Structure meals/snacks; responsive feeding; limit screen-time during meals; caregiver role-modelling.",
    },
    PlanSection {
        heading: "Physical activity",
        text: "Encourage age-appropriate active play daily; avoid prolonged sedentary time.",
    },
    PlanSection {
        heading: "Nutritional optimisation",
        text: "Consider supplementation only when clinically indicated; liaise with dietetics if unsure.",
    },
];

const FOLLOW_UP_SECTION: PlanSection = PlanSection {
    heading: "Follow-up and referral",
    text: "Continue intervention for 3 months, then review. If growth metrics do not improve, consider referral to appropriate allied health services and paediatric specialist.",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterventionPlan {
    pub focus: InterventionFocus,
    pub title: String,
    pub sections: Vec<PlanSection>,
    pub resources: &'static [ResourceLink],
}

impl InterventionPlan {
    pub fn for_focus(focus: InterventionFocus) -> Self {
        // Risk factors alone get the overgrowth-style lifestyle advice.
        let body = match focus {
            InterventionFocus::Undergrowth => UNDERGROWTH_SECTIONS,
            InterventionFocus::Overgrowth | InterventionFocus::RiskFactorsPresent => {
                OVERGROWTH_SECTIONS
            }
        };
        let mut sections = body.to_vec();
        sections.push(FOLLOW_UP_SECTION);

        Self {
            focus,
            title: format!("Step 3: Intervention — {}", focus.title()),
            sections,
            resources: RESOURCES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowUp {
    pub assessed_on: NaiveDate,
    pub review_after_months: u32,
    pub review_due: NaiveDate,
}

impl FollowUp {
    /// Review date `months` after `assessed_on`, clamped to the end of a
    /// shorter month (31 Jan + 1 month is 28/29 Feb).
    pub fn from_date(assessed_on: NaiveDate, months: u32) -> Self {
        let review_due = assessed_on
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDate::MAX);
        Self {
            assessed_on,
            review_after_months: months,
            review_due,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guidance {
    pub next_step: String,
    pub actions: Vec<ActionStep>,
    pub intervention: Option<InterventionPlan>,
    pub risk_note: String,
}

pub fn next_step_text(
    classification: Classification,
    weight_kg: f64,
    risk_count: usize,
    months: u32,
) -> String {
    if weight_kg.is_nan() || weight_kg <= 0.0 {
        return String::new();
    }
    match classification {
        Classification::Within if risk_count >= 1 => format!(
            "Within range but risk factors present — consider proceeding to intervention or provide supports and reassess in {} months.",
            months
        ),
        Classification::Within => format!(
            "Within range. Reassess height and weight in {} months or sooner if concerns arise.",
            months
        ),
        Classification::Under => format!(
            "Under 15th centile. Validate measurements and reassess in {} months. Proceed to intervention sooner if risk factors present.",
            months
        ),
        Classification::Over => format!(
            "Over 85th centile. Validate measurements and reassess in {} months. Proceed to intervention sooner if risk factors present.",
            months
        ),
    }
}

pub fn recommended_actions(
    classification: Classification,
    risk_count: usize,
    months: u32,
) -> Vec<ActionStep> {
    use Emphasis::*;
    use RecommendedAction::*;

    let steps = match (classification, risk_count) {
        (Classification::Within, 0) => vec![
            (Reassess { months }, Success),
            (ValidateMeasurements, Outline),
            (ReviewRiskFactors, Outline),
        ],
        (Classification::Within, _) => vec![
            (ProceedToIntervention { focus: None }, Warning),
            (Reassess { months }, Success),
            (ReviewRiskFactors, Outline),
        ],
        (_, 0) => vec![
            (ValidateAndReassess { months }, Success),
            (ProceedToIntervention { focus: None }, Outline),
            (ReviewRiskFactors, Outline),
        ],
        (flagged, _) => vec![
            (
                ProceedToIntervention {
                    focus: intervention_focus(flagged, risk_count),
                },
                Warning,
            ),
            (ValidateAndReassess { months }, Success),
            (ReferToSpecialist, Danger),
        ],
    };

    steps
        .into_iter()
        .map(|(action, emphasis)| ActionStep::new(action, emphasis))
        .collect()
}

/// `None` when no intervention section applies.
pub fn intervention_focus(
    classification: Classification,
    risk_count: usize,
) -> Option<InterventionFocus> {
    match classification {
        Classification::Under => Some(InterventionFocus::Undergrowth),
        Classification::Over => Some(InterventionFocus::Overgrowth),
        Classification::Within if risk_count >= 1 => Some(InterventionFocus::RiskFactorsPresent),
        Classification::Within => None,
    }
}

pub fn risk_note(risk_count: usize, months: u32) -> String {
    if risk_count > 1 {
        format!(
            "If >1 risk factor then weight should be checked every {} months and supports put in place.",
            months
        )
    } else {
        "Select relevant risks to inform follow-up.".to_string()
    }
}

pub fn guidance(
    result: &AssessmentResult,
    weight_kg: f64,
    risk_count: usize,
    months: u32,
) -> Guidance {
    let classification = result.classification;
    let intervention =
        intervention_focus(classification, risk_count).map(InterventionPlan::for_focus);
    if let Some(plan) = &intervention {
        tracing::debug!(focus = ?plan.focus, risk_count, "Intervention recommended");
    }

    Guidance {
        next_step: next_step_text(classification, weight_kg, risk_count, months),
        actions: recommended_actions(classification, risk_count, months),
        intervention,
        risk_note: risk_note(risk_count, months),
    }
}
