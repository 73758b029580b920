/// Immutable catalog of primary-source references.
///
/// Built once at startup, either from the compiled-in table or from a JSON array of
/// documents, validated, and then shared read-only (`Arc<Catalog>`) with the ranker.
use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::error::RetrievalError;
use crate::model::{Category, Document};

const MIN_PRIORITY: u8 = 1;
const MAX_PRIORITY: u8 = 5;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    documents: Vec<Document>,
}

impl Catalog {
    /// Validate and wrap a document list. Order is preserved and is significant:
    /// it breaks score ties during ranking.
    pub fn new(documents: Vec<Document>) -> Result<Self, RetrievalError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(documents.len());
        for (index, doc) in documents.iter().enumerate() {
            if doc.title.trim().is_empty() {
                return Err(RetrievalError::EmptyField { index, field: "title" });
            }
            if doc.url.trim().is_empty() {
                return Err(RetrievalError::EmptyField { index, field: "url" });
            }
            if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&doc.priority) {
                return Err(RetrievalError::PriorityOutOfRange {
                    url: doc.url.clone(),
                    priority: doc.priority,
                });
            }
            if !seen.insert(doc.url.as_str()) {
                return Err(RetrievalError::DuplicateUrl(doc.url.clone()));
            }
        }
        Ok(Self { documents })
    }

    /// Parse a JSON array of documents, then validate it like [`Catalog::new`].
    pub fn from_json(json: &str) -> Result<Self, RetrievalError> {
        let documents: Vec<Document> = serde_json::from_str(json)?;
        Self::new(documents)
    }

    pub fn builtin() -> Self {
        // The compiled-in table has unique urls and in-range priorities (see tests).
        Self::new(builtin_documents()).expect("built-in catalog is valid")
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, url: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.url == url)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(move |d| d.category == category)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        let mut out: Vec<Category> = Vec::new();
        for doc in &self.documents {
            if !out.contains(&doc.category) {
                out.push(doc.category);
            }
        }
        out
    }

    /// Hex SHA-256 over every document field, in catalog order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for doc in &self.documents {
            hasher.update(doc.title.as_bytes());
            hasher.update(b"|");
            hasher.update(doc.url.as_bytes());
            hasher.update(b"|");
            hasher.update(doc.category.as_str().as_bytes());
            hasher.update(b"|");
            hasher.update([doc.priority]);
            for tag in &doc.tags {
                hasher.update(b"|");
                hasher.update(tag.as_bytes());
            }
            hasher.update(b"\n");
        }
        format!("{:x}", hasher.finalize())
    }
}

fn doc(title: &str, url: &str, category: Category, priority: u8, tags: &[&str]) -> Document {
    Document {
        title: title.to_string(),
        url: url.to_string(),
        category,
        priority,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn builtin_documents() -> Vec<Document> {
    use Category::*;

    vec![
        // Hiring and onboarding
        doc(
            "スタートアップ労働条件：電子申請様式作成支援ツール（厚労省）",
            "https://www.startup-roudou.mhlw.go.jp/support_1.html",
            HiringOnboarding,
            5,
            &["初めて", "雇用", "入社", "採用", "労働条件", "36協定", "就業規則", "電子申請", "テンプレ", "作成支援"],
        ),
        doc(
            "労働基準法等の届出の電子申請（厚労省）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/0000184033.html",
            HiringOnboarding,
            4,
            &["電子申請", "届出", "労基署", "36協定", "就業規則", "e-Gov"],
        ),
        doc(
            "e-Govポータル（電子申請・法令検索の入口）",
            "https://www.e-gov.go.jp/",
            EGov,
            3,
            &["e-Gov", "電子申請", "法令検索", "手続き"],
        ),
        // Contracts and working conditions
        doc(
            "労働契約法（e-Gov）",
            "https://laws.e-gov.go.jp/law/419AC0000000128/",
            LaborContract,
            5,
            &["労働契約", "労働契約法", "契約", "変更", "解雇", "雇止め", "労働条件", "試用期間"],
        ),
        doc(
            "労働基準法（e-Gov）",
            "https://laws.e-gov.go.jp/law/322AC0000000049/",
            LaborContract,
            5,
            &["労基法", "労働基準法", "労働時間", "残業", "休憩", "休日", "年休", "賃金", "解雇", "労働条件", "就業規則"],
        ),
        // Working hours
        doc(
            "時間外労働の上限規制（働き方改革 特設サイト）",
            "https://hatarakikatakaikaku.mhlw.go.jp/overtime.html",
            WorkTimeOvertime,
            5,
            &["残業", "上限規制", "36協定", "月45時間", "年360時間", "時間外労働"],
        ),
        // Wages
        doc(
            "最低賃金法（e-Gov）",
            "https://laws.e-gov.go.jp/law/334AC0000000137",
            WagesMinWage,
            4,
            &["最低賃金", "賃金", "時給", "地域別最低賃金", "特定最低賃金"],
        ),
        doc(
            "最低賃金制度の概要（厚労省）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/koyou_roudou/roudoukijun/chingin/newpage_43875.html",
            WagesMinWage,
            4,
            &["最低賃金", "制度概要", "適用範囲"],
        ),
        // Health insurance and pension
        doc(
            "就職したとき（資格取得）の手続き（日本年金機構）",
            "https://www.nenkin.go.jp/service/kounen/tekiyo/hihokensha1/20150422.html",
            SocialInsurance,
            5,
            &["社会保険", "資格取得", "健康保険", "厚生年金", "入社", "手続き"],
        ),
        doc(
            "健康保険・厚生年金保険の適用関係届書（日本年金機構）",
            "https://www.nenkin.go.jp/shinsei/kounen/tekiyo/index.html",
            SocialInsurance,
            4,
            &["届書", "電子申請", "適用", "年金事務所", "事務センター"],
        ),
        // Employment insurance
        doc(
            "雇用保険制度（厚労省）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/koyou_roudou/koyou/koyouhoken/index_00003.html",
            EmploymentInsurance,
            5,
            &["雇用保険", "加入", "手続き", "事業主", "給付", "基本手当"],
        ),
        doc(
            "育児休業等給付について（厚労省）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/0000135090_00001.html",
            EmploymentInsurance,
            4,
            &["育児休業給付", "雇用保険", "給付金", "時短給付"],
        ),
        // Workers' compensation
        doc(
            "労災保険法（労働者災害補償保険法）（e-Gov）",
            "https://laws.e-gov.go.jp/law/322AC0000000050",
            WorkersComp,
            4,
            &["労災", "通勤災害", "業務災害", "休業補償", "給付"],
        ),
        doc(
            "労災保険（厚労省：総合ページ）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/koyou_roudou/roudoukijun/rousai/index.html",
            WorkersComp,
            4,
            &["労災", "給付", "事業主", "保険料"],
        ),
        // Childcare and family-care leave
        doc(
            "育児・介護休業法について（厚労省）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/0000130583.html",
            LeaveParenting,
            5,
            &["育休", "産後パパ育休", "介護休業", "両立支援"],
        ),
        doc(
            "育児・介護休業法のあらまし（厚労省）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/000103504.html",
            LeaveParenting,
            4,
            &["育休", "介護休業", "制度概要", "パンフレット"],
        ),
        // Harassment
        doc(
            "職場のハラスメントの防止（厚労省）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/koyou_roudou/koyoukintou/seisaku06/index.html",
            Harassment,
            5,
            &["ハラスメント", "パワハラ", "セクハラ", "マタハラ", "カスハラ", "就活セクハラ"],
        ),
        doc(
            "あかるい職場応援団（職場のハラスメント ポータル）",
            "https://www.no-harassment.mhlw.go.jp/",
            Harassment,
            4,
            &["ハラスメント", "相談窓口", "社内体制", "研修"],
        ),
        // Safety and health
        doc(
            "労働安全衛生法（e-Gov）",
            "https://laws.e-gov.go.jp/law/347AC0000000057",
            SafetyHealth,
            4,
            &["安衛法", "安全衛生", "健康診断", "ストレスチェック", "産業医", "衛生管理者"],
        ),
        doc(
            "心の健康問題により休業した労働者の職場復帰支援の手引き（厚労省）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/0000055195_00005.html",
            SafetyHealth,
            4,
            &["メンタルヘルス", "休職", "復職", "産業医", "主治医", "就業配慮"],
        ),
        // Work rules
        doc(
            "モデル就業規則について（厚労省）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/koyou_roudou/roudoukijun/zigyonushi/model/index.html",
            WorkRules,
            5,
            &["就業規則", "モデル", "作成", "変更", "届出"],
        ),
        // Subsidies
        doc(
            "雇用関係助成金（厚生労働省：総合）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/koyou_roudou/koyou/kyufukin/index.html",
            Subsidy,
            5,
            &["助成金", "雇用関係助成金", "申請", "支給要件", "手続き"],
        ),
        doc(
            "キャリアアップ助成金（厚労省：案内）",
            "https://www.mhlw.go.jp/stf/seisakunitsuite/bunya/0000082805.html",
            Subsidy,
            4,
            &["キャリアアップ助成金", "正社員化", "有期", "パート", "処遇改善"],
        ),
    ]
}
