//! Curriculum taxonomy: chapter rules and chapter reference data.
//!
//! The rule list is a first-class, versioned artifact. List position is the
//! priority order (most specific first) and doubles as the tie-break for
//! equal scores, so reordering rules changes report output even with
//! unchanged input. The built-in table consolidates the maintainer-authored
//! ordering; a JSON file can replace it wholesale.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NewslinkError, Result};

/// A single keyword rule mapping text to a curriculum chapter.
///
/// Immutable within a run. `base_score` encodes specificity/confidence;
/// higher means a more specific trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterRule {
    /// Keywords tested by substring containment, in order.
    pub keywords: Vec<String>,
    /// Textbook volume, e.g. 九年级上册.
    pub book_name: String,
    /// Target chapter title.
    pub chapter_title: String,
    /// Relevance score awarded on a hit.
    pub base_score: u32,
    /// Maintainer note on why this rule exists.
    #[serde(default)]
    pub rationale: String,
}

/// Reference data for one curriculum chapter, attached by renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter_title: String,
    pub book_name: String,
    /// The chapter's central idea, one sentence.
    pub core_point: String,
    /// Knowledge points quoted in reports.
    #[serde(default)]
    pub knowledge_points: Vec<String>,
    /// Textbook page range, e.g. `P45 - P52`.
    #[serde(default)]
    pub page_range: String,
}

/// The full taxonomy: ordered rules plus chapter reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    pub rules: Vec<ChapterRule>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Taxonomy {
    /// Loads a taxonomy from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(NewslinkError::FileNotFound(path.to_path_buf()));
        }
        let data = std::fs::read_to_string(path)?;
        let taxonomy: Taxonomy = serde_json::from_str(&data)?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Checks that the rule table is usable.
    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(NewslinkError::ConfigError("taxonomy has no rules".to_string()));
        }
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.keywords.is_empty() {
                return Err(NewslinkError::ConfigError(format!(
                    "rule {} ({}) has no keywords",
                    i, rule.chapter_title
                )));
            }
            if rule.chapter_title.is_empty() {
                return Err(NewslinkError::ConfigError(format!("rule {} has no chapter title", i)));
            }
        }
        Ok(())
    }

    /// Looks up chapter reference data by title.
    pub fn chapter(&self, chapter_title: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.chapter_title == chapter_title)
    }

    /// The built-in rule table and chapter knowledge base.
    pub fn builtin() -> Self {
        let rule = |keywords: &[&str], chapter: &str, score: u32, rationale: &str| ChapterRule {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            book_name: GRADE_NINE_VOL_ONE.to_string(),
            chapter_title: chapter.to_string(),
            base_score: score,
            rationale: rationale.to_string(),
        };

        // Priority order: cross-strait and rule-of-law triggers are the most
        // specific and sit first; broad 发展/民生 catch-alls sit last.
        let rules = vec![
            rule(
                &["台湾", "两岸", "台独", "国台办", "台海", "赖清德"],
                "中华一家亲",
                90,
                "两岸关系与国家统一",
            ),
            rule(
                &["反腐", "违纪", "违法", "受贿", "调查", "检察院", "法治", "行政复议", "信访"],
                "民主与法治",
                85,
                "反腐与法治",
            ),
            rule(
                &["航天", "月球", "卫星", "风光发电", "碳中和", "新能源", "人工心脏"],
                "创新驱动发展",
                85,
                "科技自立自强",
            ),
            rule(&["国防", "解放军", "军队", "军事"], "中华一家亲", 80, "国防与国家安全"),
            rule(&["科技", "创新", "AI", "互联网", "数字经济"], "创新驱动发展", 75, "科技创新政策"),
            rule(
                &["就业", "关税", "企业", "经济", "消费", "汽车", "外贸"],
                "富强与创新",
                75,
                "经济高质量发展",
            ),
            rule(&["改革", "开放", "发展"], "踏上强国之路", 72, "改革开放"),
            rule(&["交通", "安全", "事故", "环境"], "建设美丽中国", 72, "公共安全与生态环境"),
            rule(
                &["美国", "日本", "韩国", "加拿大", "印尼", "国际"],
                "建设美丽中国",
                70,
                "国际视野下的发展道路",
            ),
            rule(&["旅游", "文化", "生活", "民生", "社会"], "建设美丽中国", 70, "文化与民生"),
        ];

        Taxonomy { rules, chapters: builtin_chapters() }
    }
}

const GRADE_NINE_VOL_ONE: &str = "九年级上册";

fn builtin_chapters() -> Vec<Chapter> {
    let chapter = |title: &str, core: &str, points: &[&str], pages: &str| Chapter {
        chapter_title: title.to_string(),
        book_name: GRADE_NINE_VOL_ONE.to_string(),
        core_point: core.to_string(),
        knowledge_points: points.iter().map(|s| s.to_string()).collect(),
        page_range: pages.to_string(),
    };

    vec![
        chapter(
            "中华一家亲",
            "维护祖国统一、民族团结是每个公民的责任和义务",
            &[
                "坚持一个中国原则是处理台湾问题的政治基础",
                "加强民族团结，维护国家统一是各民族的共同愿望",
                "实现祖国完全统一是全体中华儿女的共同愿望",
            ],
            "P45 - P52",
        ),
        chapter(
            "民主与法治",
            "依法治国是党领导人民治理国家的基本方略",
            &[
                "法治是人类社会进入现代文明的重要标志",
                "法治要求实行良法之治和善治",
                "依法行政是依法治国的重要环节",
            ],
            "P38 - P45",
        ),
        chapter(
            "创新驱动发展",
            "创新是引领发展的第一动力",
            &[
                "创新是一个民族进步的灵魂，是国家兴旺发达的不竭动力",
                "科技创新是提高社会生产力和综合国力的战略支撑",
                "建设创新型国家，要坚持自主创新、重点跨越",
            ],
            "P56 - P63",
        ),
        chapter(
            "建设美丽中国",
            "坚持人与自然和谐共生，建设美丽中国",
            &[
                "生态兴则文明兴，生态衰则文明衰",
                "坚持节约资源和保护环境的基本国策",
                "坚持绿色发展理念，走生产发展、生活富裕、生态良好的文明发展道路",
            ],
            "P22 - P28",
        ),
        chapter(
            "富强与创新",
            "以人民为中心，实现共同富裕",
            &[
                "以人民为中心的发展思想是新时代坚持和发展中国特色社会主义的根本立场",
                "共同富裕是社会主义的本质要求",
                "全面深化改革是推进中国特色社会主义事业的强大动力",
            ],
            "P15 - P22",
        ),
        chapter(
            "踏上强国之路",
            "改革开放是决定当代中国命运的关键一招",
            &[
                "改革开放是党和人民大踏步赶上时代的重要法宝",
                "坚持党的领导是中国特色社会主义最本质的特征",
            ],
            "P8 - P14",
        ),
        chapter(
            "文明与家园",
            "中华优秀传统文化是中华民族的精神命脉",
            &["文化自信是更基础、更广泛、更深厚的自信", "培育和践行社会主义核心价值观"],
            "P68 - P75",
        ),
        chapter(
            "中国人 中国梦",
            "实现中华民族伟大复兴是中华民族近代以来最伟大的梦想",
            &[
                "中国梦是国家的梦、民族的梦，也是每个中国人的梦",
                "实现中国梦必须走中国道路、弘扬中国精神、凝聚中国力量",
            ],
            "P1 - P8",
        ),
    ]
}
