use std::collections::BTreeSet;

use regex::Regex;

use crate::responses::{ResponseMap, ResponseValue, ValidationError, ValidationResult};
use crate::selection::active_answer_set_for_question;
use crate::spec::question::{Constraint, Question, QuestionType};
use crate::visibility::is_question_visible;

/// Validates the live responses against the currently visible questions.
/// Hidden questions are skipped entirely; a stale answer behind a hidden
/// question is not an error.
pub fn validate(all_questions: &[Question], responses: &ResponseMap) -> ValidationResult {
    let mut errors = Vec::new();
    let mut missing_required = Vec::new();

    for question in all_questions {
        if !is_question_visible(question, responses, all_questions) {
            continue;
        }

        match responses.get(&question.id) {
            None | Some(ResponseValue::Empty) => {
                if question.required {
                    missing_required.push(question.id.clone());
                }
            }
            Some(value) => {
                if let Some(error) = validate_value(question, value, responses, all_questions) {
                    errors.push(error);
                }
            }
        }
    }

    let all_ids: BTreeSet<&str> = all_questions
        .iter()
        .map(|question| question.id.as_str())
        .collect();
    let unknown_fields: Vec<String> = responses
        .keys()
        .filter(|key| !all_ids.contains(key.as_str()))
        .cloned()
        .collect();

    ValidationResult {
        valid: errors.is_empty() && missing_required.is_empty() && unknown_fields.is_empty(),
        errors,
        missing_required,
        unknown_fields,
    }
}

fn validate_value(
    question: &Question,
    value: &ResponseValue,
    responses: &ResponseMap,
    all_questions: &[Question],
) -> Option<ValidationError> {
    if !matches_type(question.kind, value) {
        return Some(base_error(question, "type mismatch", "type_mismatch"));
    }

    if let Some(constraint) = &question.constraint
        && let Some(error) = enforce_constraint(question, value, constraint)
    {
        return Some(error);
    }

    if question.kind.is_choice_based()
        && let Some(error) = enforce_choice_membership(question, value, responses, all_questions)
    {
        return Some(error);
    }

    None
}

fn matches_type(kind: QuestionType, value: &ResponseValue) -> bool {
    match kind {
        QuestionType::Text
        | QuestionType::TextArea
        | QuestionType::Date
        | QuestionType::Choice
        | QuestionType::Dropdown
        | QuestionType::RadioButton
        | QuestionType::Document
        | QuestionType::DownloadableDocument => matches!(value, ResponseValue::Text(_)),
        QuestionType::MultiSelect => matches!(value, ResponseValue::Selection(_)),
        QuestionType::Number | QuestionType::Decimal | QuestionType::Rating => {
            matches!(value, ResponseValue::Number(_))
        }
        QuestionType::Boolean => matches!(value, ResponseValue::Flag(_)),
    }
}

fn enforce_constraint(
    question: &Question,
    value: &ResponseValue,
    constraint: &Constraint,
) -> Option<ValidationError> {
    if let Some(pattern) = &constraint.pattern
        && let ResponseValue::Text(text) = value
        && let Ok(regex) = Regex::new(pattern)
        && !regex.is_match(text)
    {
        return Some(base_error(
            question,
            "value does not match pattern",
            "pattern_mismatch",
        ));
    }

    if let Some(min_len) = constraint.min_len
        && let ResponseValue::Text(text) = value
        && text.len() < min_len
    {
        return Some(base_error(
            question,
            "value shorter than min length",
            "min_length",
        ));
    }

    if let Some(max_len) = constraint.max_len
        && let ResponseValue::Text(text) = value
        && text.len() > max_len
    {
        return Some(base_error(
            question,
            "value longer than max length",
            "max_length",
        ));
    }

    if let Some(min) = constraint.min
        && let ResponseValue::Number(number) = value
        && *number < min
    {
        return Some(base_error(question, "value below minimum", "min"));
    }

    if let Some(max) = constraint.max
        && let ResponseValue::Number(number) = value
        && *number > max
    {
        return Some(base_error(question, "value above maximum", "max"));
    }

    None
}

/// Choice answers must come from the question's currently active answer
/// set, so an answer that was valid under a previous selection becomes an
/// error once an earlier response swaps the set.
fn enforce_choice_membership(
    question: &Question,
    value: &ResponseValue,
    responses: &ResponseMap,
    all_questions: &[Question],
) -> Option<ValidationError> {
    let active_set = active_answer_set_for_question(question, responses, all_questions)?;
    let allowed: Vec<&str> = active_set
        .active_answers()
        .map(|answer| answer.value.as_str())
        .collect();

    let is_member = match value {
        ResponseValue::Text(text) => allowed.contains(&text.as_str()),
        ResponseValue::Selection(items) => {
            items.iter().all(|item| allowed.contains(&item.as_str()))
        }
        ResponseValue::Number(_) | ResponseValue::Flag(_) | ResponseValue::Empty => true,
    };

    if is_member {
        None
    } else {
        Some(base_error(
            question,
            "answer is not an option of the active answer set",
            "option_mismatch",
        ))
    }
}

fn base_error(question: &Question, message: &str, code: &str) -> ValidationError {
    ValidationError {
        question_id: Some(question.id.clone()),
        path: Some(format!("/{}", question.id)),
        message: message.into(),
        code: Some(code.into()),
    }
}
