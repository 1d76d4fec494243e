pub mod question;
pub mod rules;
pub mod tree;

pub use question::{Answer, AnswerSet, Constraint, Question, QuestionType};
pub use rules::{
    AnswerLevelGroup, AnswerLevelNode, AnswerLevelRule, AnswerLevelRuleGroup, ConditionGroup,
    ConditionNode, MatchType, Rule, RuleOperator,
};
pub use tree::{Branch, Page, Questionnaire, Section};
