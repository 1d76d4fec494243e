use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::rules::{AnswerLevelRuleGroup, ConditionGroup};

/// The thirteen input kinds a question can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Choice,
    Dropdown,
    RadioButton,
    MultiSelect,
    Text,
    TextArea,
    Number,
    Decimal,
    Date,
    Boolean,
    Rating,
    Document,
    DownloadableDocument,
}

impl QuestionType {
    /// Whether answers come from an authored answer set rather than free input.
    pub fn is_choice_based(self) -> bool {
        matches!(
            self,
            QuestionType::Choice
                | QuestionType::Dropdown
                | QuestionType::RadioButton
                | QuestionType::MultiSelect
        )
    }
}

/// A single selectable option inside an answer set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Answer {
    pub id: String,
    pub label: String,
    pub value: String,
    /// Inactive answers are excluded from evaluation and rendering.
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

/// A named, ordered list of selectable answers for a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerSet {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<Answer>,
}

impl AnswerSet {
    pub fn active_answers(&self) -> impl Iterator<Item = &Answer> {
        self.answers.iter().filter(|answer| answer.active)
    }

    pub fn find_active_answer(&self, answer_id: &str) -> Option<&Answer> {
        self.active_answers().find(|answer| answer.id == answer_id)
    }
}

/// Value constraints enforced during answer validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Constraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// A single form question together with its visibility and answer-set rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Position relative to every other question in the questionnaire.
    /// Rule authoring only offers questions with a strictly smaller order;
    /// the evaluator itself tolerates anything and fails closed.
    pub order: u32,
    #[serde(default)]
    pub required: bool,
    /// Unconditional override: a hidden question is never visible,
    /// whatever its condition group says.
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answer_sets: Vec<AnswerSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_group: Option<ConditionGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answer_level_rule_groups: Vec<AnswerLevelRuleGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
}

impl Question {
    /// Resolves an answer set by id: direct sets first, then the inline
    /// sets carried by answer-level rule groups.
    pub fn find_answer_set(&self, set_id: &str) -> Option<&AnswerSet> {
        self.answer_sets
            .iter()
            .find(|set| set.id == set_id)
            .or_else(|| {
                self.answer_level_rule_groups
                    .iter()
                    .filter_map(|group| group.inline_answer_set.as_ref())
                    .find(|set| set.id == set_id)
            })
    }

    /// The default answer set: the first one flagged `is_default`, else the
    /// first listed.
    pub fn default_answer_set(&self) -> Option<&AnswerSet> {
        self.answer_sets
            .iter()
            .find(|set| set.is_default)
            .or_else(|| self.answer_sets.first())
    }
}
