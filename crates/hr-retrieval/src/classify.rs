/// Keyword-based topic classifier.
///
/// Counts how many of each hint's keywords occur in the lowercased query, keeps the
/// strongest two categories, and then applies the subsidy adjustments. Classification
/// only biases ranking; it never removes documents from consideration.
use tracing::debug;

use crate::model::{Category, CategoryHint};

/// Returned when no hint keyword occurs in the query.
pub const DEFAULT_CATEGORIES: [Category; 4] = [
    Category::HiringOnboarding,
    Category::LaborContract,
    Category::SocialInsurance,
    Category::Subsidy,
];

const PRIMARY_CATEGORY_COUNT: usize = 2;

/// Generic "employ/hire" token that pulls subsidies into hiring queries.
const HIRE_TOKEN: &str = "雇";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintHit {
    pub category: Category,
    pub hits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub categories: Vec<Category>,
    /// Every hint with at least one hit, strongest first.
    pub hits: Vec<HintHit>,
    /// `true` when nothing matched and [`DEFAULT_CATEGORIES`] was used.
    pub fallback: bool,
}

#[derive(Debug, Clone)]
pub struct Classifier {
    hints: Vec<CategoryHint>,
}

impl Classifier {
    /// Declaration order breaks ties between hints with equal hit counts.
    pub fn new(hints: Vec<CategoryHint>) -> Self {
        Self { hints }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_hints())
    }

    pub fn hints(&self) -> &[CategoryHint] {
        &self.hints
    }

    pub fn classify(&self, query: &str) -> Vec<Category> {
        self.classify_detailed(query).categories
    }

    pub fn classify_detailed(&self, query: &str) -> Classification {
        let normalized = normalize(query);
        let hits = self.hits(&normalized);

        if hits.is_empty() {
            debug!("no hint matched, using default categories");
            return Classification {
                categories: DEFAULT_CATEGORIES.to_vec(),
                hits,
                fallback: true,
            };
        }

        let mut categories: Vec<Category> = hits
            .iter()
            .take(PRIMARY_CATEGORY_COUNT)
            .map(|h| h.category)
            .collect();

        if !categories.contains(&Category::Subsidy)
            && hits.iter().any(|h| h.category == Category::Subsidy)
        {
            categories.push(Category::Subsidy);
        }

        if categories.contains(&Category::HiringOnboarding)
            && !categories.contains(&Category::Subsidy)
            && normalized.contains(HIRE_TOKEN)
        {
            categories.push(Category::Subsidy);
        }

        debug!(?categories, matched = hits.len(), "query classified");
        Classification {
            categories,
            hits,
            fallback: false,
        }
    }

    fn hits(&self, normalized_query: &str) -> Vec<HintHit> {
        let mut hits: Vec<HintHit> = self
            .hints
            .iter()
            .map(|hint| HintHit {
                category: hint.category,
                hits: hint
                    .keywords
                    .iter()
                    .filter(|kw| normalized_query.contains(&normalize(kw)))
                    .count(),
            })
            .filter(|h| h.hits > 0)
            .collect();
        // Stable: equal counts keep declaration order.
        hits.sort_by(|a, b| b.hits.cmp(&a.hits));
        hits
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builtin()
    }
}

pub(crate) fn normalize(s: &str) -> String {
    s.to_lowercase()
}

fn builtin_hints() -> Vec<CategoryHint> {
    vec![
        CategoryHint::new(
            Category::Subsidy,
            &["助成金", "補助金", "支給", "申請", "キャリアアップ"],
        ),
        CategoryHint::new(
            Category::HiringOnboarding,
            &["初めて", "雇用", "採用", "入社", "雇い", "社員を雇う", "手順", "必要書類"],
        ),
        CategoryHint::new(
            Category::SocialInsurance,
            &[
                "社会保険",
                "健康保険",
                "厚生年金",
                "年金",
                "資格取得",
                "年金事務所",
                "協会けんぽ",
                "算定基礎",
            ],
        ),
        CategoryHint::new(
            Category::EmploymentInsurance,
            &[
                "雇用保険",
                "ハローワーク",
                "離職票",
                "被保険者",
                "基本手当",
                "適用事業所",
                "資格取得届",
            ],
        ),
        CategoryHint::new(
            Category::WorkTimeOvertime,
            &["残業", "時間外", "36協定", "上限規制", "休日出勤", "所定労働時間"],
        ),
        CategoryHint::new(
            Category::LaborContract,
            &["労働条件", "契約書", "雇用契約", "試用期間", "解雇", "雇止め", "内定"],
        ),
        CategoryHint::new(
            Category::WagesMinWage,
            &["賃金", "給与", "最低賃金", "時給", "手当"],
        ),
        CategoryHint::new(
            Category::WorkersComp,
            &["労災", "通勤災害", "業務災害", "休業補償"],
        ),
        CategoryHint::new(
            Category::LeaveParenting,
            &["育休", "産休", "介護休業", "両立支援"],
        ),
        CategoryHint::new(
            Category::Harassment,
            &["ハラスメント", "パワハラ", "セクハラ", "マタハラ", "カスハラ"],
        ),
        CategoryHint::new(
            Category::WorkRules,
            &["就業規則", "規程", "ルール", "服務規律"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_hits_falls_back_to_defaults() {
        let classifier = Classifier::builtin();
        for query in ["", "   ", "hello world"] {
            let result = classifier.classify_detailed(query);
            assert!(result.fallback);
            assert!(result.hits.is_empty());
            assert_eq!(result.categories, DEFAULT_CATEGORIES.to_vec());
        }
    }

    #[test]
    fn first_hire_appends_subsidy_via_hire_token() {
        let result = Classifier::builtin().classify_detailed("初めて雇用します");
        assert!(!result.fallback);
        assert_eq!(
            result.hits,
            vec![HintHit { category: Category::HiringOnboarding, hits: 2 }]
        );
        assert_eq!(
            result.categories,
            vec![Category::HiringOnboarding, Category::Subsidy]
        );
    }

    #[test]
    fn matched_subsidy_outside_primary_is_appended() {
        // work_time_overtime, harassment and work_rules hit twice each, subsidy once
        let categories = Classifier::builtin()
            .classify("パワハラとセクハラ、残業と36協定、就業規則の規程、助成金");
        assert_eq!(
            categories,
            vec![Category::WorkTimeOvertime, Category::Harassment, Category::Subsidy]
        );
    }

    #[test]
    fn subsidy_already_primary_is_not_repeated() {
        let categories = Classifier::builtin().classify("パワハラとセクハラの規程と申請");
        assert_eq!(categories, vec![Category::Harassment, Category::Subsidy]);
    }

    #[test]
    fn hiring_without_hire_token_does_not_add_subsidy() {
        let categories = Classifier::builtin().classify("入社の手順を知りたい");
        assert_eq!(categories, vec![Category::HiringOnboarding]);
    }

    #[test]
    fn ties_keep_declaration_order() {
        // one hit each for social_insurance and work_time_overtime
        let categories = Classifier::builtin().classify("残業と年金");
        assert_eq!(
            categories,
            vec![Category::SocialInsurance, Category::WorkTimeOvertime]
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let classifier = Classifier::new(vec![CategoryHint::new(
            Category::EGov,
            &["e-Gov"],
        )]);
        assert_eq!(classifier.classify("E-GOV で申請"), vec![Category::EGov]);
    }

    #[test]
    fn never_returns_duplicates() {
        let classifier = Classifier::builtin();
        for query in [
            "助成金の申請",
            "初めて社員を雇う、助成金も",
            "雇用保険と社会保険の資格取得",
            "",
        ] {
            let categories = classifier.classify(query);
            assert!(!categories.is_empty());
            assert!(categories.len() <= 4);
            let unique: std::collections::HashSet<_> = categories.iter().collect();
            assert_eq!(unique.len(), categories.len(), "duplicates for {query}");
        }
    }
}
