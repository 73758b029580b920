use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;

/// Topic category attached to every catalog document and inferred from queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Hiring through first-day onboarding paperwork
    HiringOnboarding,
    /// Employment contracts and working conditions
    LaborContract,
    /// Working hours, overtime, Article 36 agreements
    WorkTimeOvertime,
    /// Wages and the minimum wage
    WagesMinWage,
    /// Health insurance and employees' pension
    SocialInsurance,
    EmploymentInsurance,
    WorkersComp,
    /// Childcare, maternity and family-care leave
    LeaveParenting,
    Harassment,
    /// Occupational safety, health checks, mental health
    SafetyHealth,
    WorkRules,
    Subsidy,
    /// e-Gov portal entry points
    EGov,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::HiringOnboarding,
        Category::LaborContract,
        Category::WorkTimeOvertime,
        Category::WagesMinWage,
        Category::SocialInsurance,
        Category::EmploymentInsurance,
        Category::WorkersComp,
        Category::LeaveParenting,
        Category::Harassment,
        Category::SafetyHealth,
        Category::WorkRules,
        Category::Subsidy,
        Category::EGov,
    ];

    /// Wire key, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::HiringOnboarding => "hiring_onboarding",
            Category::LaborContract => "labor_contract",
            Category::WorkTimeOvertime => "work_time_overtime",
            Category::WagesMinWage => "wages_min_wage",
            Category::SocialInsurance => "social_insurance",
            Category::EmploymentInsurance => "employment_insurance",
            Category::WorkersComp => "workers_comp",
            Category::LeaveParenting => "leave_parenting",
            Category::Harassment => "harassment",
            Category::SafetyHealth => "safety_health",
            Category::WorkRules => "work_rules",
            Category::Subsidy => "subsidy",
            Category::EGov => "e_gov",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::HiringOnboarding => "採用〜入社手続き",
            Category::LaborContract => "雇用契約・労働条件",
            Category::WorkTimeOvertime => "労働時間・残業・36協定",
            Category::WagesMinWage => "賃金・最低賃金",
            Category::SocialInsurance => "社会保険（健保・厚年）",
            Category::EmploymentInsurance => "雇用保険",
            Category::WorkersComp => "労災",
            Category::LeaveParenting => "育休・産休・介護",
            Category::Harassment => "ハラスメント",
            Category::SafetyHealth => "安全衛生・健診・メンタル",
            Category::WorkRules => "就業規則",
            Category::Subsidy => "助成金",
            Category::EGov => "e-Gov入口",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = RetrievalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| RetrievalError::UnknownCategory {
                given: key.to_string(),
                available: Category::ALL
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// A primary-source reference in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Display title, e.g. "労働基準法（e-Gov）"
    pub title: String,
    /// Link target; unique across the catalog and used as the de-duplication key
    pub url: String,
    pub category: Category,
    /// 1–5, higher is more authoritative within its category
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Keywords matched as substrings of the lowercased query
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_priority() -> u8 {
    1
}

/// Classifier rule: a category and the keywords that suggest it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryHint {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl CategoryHint {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// A document paired with its score for one ranking call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredDocument<'a> {
    pub document: &'a Document,
    pub score: u32,
}
