use std::collections::BTreeSet;

use thiserror::Error;

use crate::conditions::find_question;
use crate::spec::question::Question;
use crate::spec::rules::{AnswerLevelNode, ConditionGroup, ConditionNode};
use crate::spec::tree::{Branch, Questionnaire};
use crate::traversal::flatten_questions;

/// Advisory findings for the editor's pre-publish pass. The evaluators
/// never consult these; a stale rule simply fails closed at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityIssue {
    #[error("question id '{0}' is declared more than once")]
    DuplicateQuestionId(String),
    #[error("rule on '{consumer}' references unknown question '{source_id}'")]
    UnknownSourceQuestion { consumer: String, source_id: String },
    #[error("rule on '{consumer}' references '{source_id}', which comes later in the form")]
    ForwardReference { consumer: String, source_id: String },
    #[error("rule on '{consumer}' references unknown answer set '{answer_set}' of '{source_id}'")]
    UnknownAnswerSet {
        consumer: String,
        source_id: String,
        answer_set: String,
    },
    #[error("rule on '{consumer}' references unknown or inactive answer '{answer}' of '{source_id}'")]
    UnknownAnswer {
        consumer: String,
        source_id: String,
        answer: String,
    },
}

/// Checks every rule reference in the questionnaire against the flattened
/// question list.
pub fn check_questionnaire(questionnaire: &Questionnaire) -> Vec<IntegrityIssue> {
    let all_questions = flatten_questions(questionnaire);
    let mut issues = Vec::new();

    let mut seen = BTreeSet::new();
    for question in &all_questions {
        if !seen.insert(question.id.as_str()) {
            issues.push(IntegrityIssue::DuplicateQuestionId(question.id.clone()));
        }
    }

    for question in &all_questions {
        if let Some(group) = &question.condition_group {
            check_condition_group(
                &question.id,
                Some(question.order),
                group,
                &all_questions,
                &mut issues,
            );
        }
        for rule_group in &question.answer_level_rule_groups {
            check_answer_level_nodes(
                &question.id,
                &rule_group.children,
                &all_questions,
                &mut issues,
            );
        }
    }

    for page in &questionnaire.pages {
        for section in &page.sections {
            for branch in &section.branches {
                check_branch(branch, &all_questions, &mut issues);
            }
        }
    }

    issues
}

fn check_branch(branch: &Branch, all_questions: &[Question], issues: &mut Vec<IntegrityIssue>) {
    if let Some(group) = &branch.condition_group {
        // Branches carry no order, so the forward-reference check does not apply.
        check_condition_group(&branch.id, None, group, all_questions, issues);
    }
    for child in &branch.branches {
        check_branch(child, all_questions, issues);
    }
}

fn check_condition_group(
    consumer: &str,
    consumer_order: Option<u32>,
    group: &ConditionGroup,
    all_questions: &[Question],
    issues: &mut Vec<IntegrityIssue>,
) {
    for child in &group.children {
        match child {
            ConditionNode::Group(nested) => {
                check_condition_group(consumer, consumer_order, nested, all_questions, issues);
            }
            ConditionNode::Rule(rule) => check_reference(
                consumer,
                consumer_order,
                &rule.source_question_id,
                rule.source_answer_set_id.as_deref(),
                rule.source_answer_id.as_deref(),
                all_questions,
                issues,
            ),
        }
    }
}

fn check_answer_level_nodes(
    consumer: &str,
    children: &[AnswerLevelNode],
    all_questions: &[Question],
    issues: &mut Vec<IntegrityIssue>,
) {
    for child in children {
        match child {
            AnswerLevelNode::Group(nested) => {
                check_answer_level_nodes(consumer, &nested.children, all_questions, issues);
            }
            AnswerLevelNode::AnswerRule(rule) => check_reference(
                consumer,
                None,
                &rule.previous_question_id,
                rule.previous_answer_set_id.as_deref(),
                rule.previous_answer_id.as_deref(),
                all_questions,
                issues,
            ),
        }
    }
}

fn check_reference(
    consumer: &str,
    consumer_order: Option<u32>,
    source_question_id: &str,
    answer_set_id: Option<&str>,
    answer_id: Option<&str>,
    all_questions: &[Question],
    issues: &mut Vec<IntegrityIssue>,
) {
    let Some(source) = find_question(all_questions, source_question_id) else {
        issues.push(IntegrityIssue::UnknownSourceQuestion {
            consumer: consumer.to_string(),
            source_id: source_question_id.to_string(),
        });
        return;
    };

    if let Some(order) = consumer_order
        && source.order >= order
    {
        issues.push(IntegrityIssue::ForwardReference {
            consumer: consumer.to_string(),
            source_id: source_question_id.to_string(),
        });
    }

    if !source.kind.is_choice_based() {
        return;
    }

    let set = match answer_set_id {
        Some(set_id) => match source.find_answer_set(set_id) {
            Some(set) => set,
            None => {
                issues.push(IntegrityIssue::UnknownAnswerSet {
                    consumer: consumer.to_string(),
                    source_id: source_question_id.to_string(),
                    answer_set: set_id.to_string(),
                });
                return;
            }
        },
        None => return,
    };

    if let Some(answer) = answer_id
        && set.find_active_answer(answer).is_none()
    {
        issues.push(IntegrityIssue::UnknownAnswer {
            consumer: consumer.to_string(),
            source_id: source_question_id.to_string(),
            answer: answer.to_string(),
        });
    }
}
