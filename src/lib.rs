#![allow(missing_docs)]

pub mod conditions;
pub mod integrity;
pub mod operator;
pub mod responses;
pub mod responses_schema;
pub mod selection;
pub mod spec;
pub mod traversal;
pub mod validate;
pub mod visibility;

pub use conditions::{
    evaluate_answer_level_group, evaluate_answer_level_rule, evaluate_group, evaluate_rule,
};
pub use integrity::{IntegrityIssue, check_questionnaire};
pub use operator::evaluate_operator;
pub use responses::{ResponseMap, ResponseValue, ValidationError, ValidationResult};
pub use responses_schema::generate as responses_schema;
pub use selection::active_answer_set_for_question;
pub use spec::{
    Answer, AnswerLevelGroup, AnswerLevelNode, AnswerLevelRule, AnswerLevelRuleGroup, AnswerSet,
    Branch, ConditionGroup, ConditionNode, Constraint, MatchType, Page, Question, QuestionType,
    Questionnaire, Rule, RuleOperator, Section,
};
pub use traversal::{flatten_questions, questions_before};
pub use validate::validate;
pub use visibility::{
    VisibilityMap, is_branch_visible, is_question_visible, resolve_visibility,
    visible_questions_for_page,
};
