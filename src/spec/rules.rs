use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::question::AnswerSet;

/// How a group combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchType {
    And,
    Or,
}

/// Comparison operators available to rule authors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RuleOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
}

/// Leaf comparison used by question and branch visibility rules.
///
/// For choice-based source questions `source_answer_id` points into the
/// source's answer sets; for simple-value sources `literal_value` carries
/// the comparison value directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Rule {
    pub operator: RuleOperator,
    pub source_question_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_answer_set_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_answer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_value: Option<String>,
}

/// Recursive AND/OR container of visibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConditionGroup {
    pub match_type: MatchType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ConditionNode>,
}

/// One child of a condition group: a nested group or a leaf rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionNode {
    Group(ConditionGroup),
    Rule(Rule),
}

/// Leaf comparison used by answer-level rules. Structurally identical to
/// [`Rule`] but bound to the "previous question" naming of that context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerLevelRule {
    pub operator: RuleOperator,
    pub previous_question_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_answer_set_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_answer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_value: Option<String>,
}

/// Nested AND/OR container inside an answer-level rule tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerLevelGroup {
    pub match_type: MatchType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AnswerLevelNode>,
}

/// One child of an answer-level group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerLevelNode {
    Group(AnswerLevelGroup),
    AnswerRule(AnswerLevelRule),
}

/// A condition group whose truth activates an alternate inline answer set
/// for the question that carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerLevelRuleGroup {
    pub id: String,
    pub match_type: MatchType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AnswerLevelNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_answer_set: Option<AnswerSet>,
}
