use crate::conditions::evaluate_answer_level_group;
use crate::responses::ResponseMap;
use crate::spec::question::{AnswerSet, Question};

/// Picks the answer set currently active for a question.
///
/// Answer-level rule groups are tried in declaration order; the first one
/// that evaluates true and carries an inline set wins immediately. If none
/// match, the question falls back to its own sets: the default-flagged one,
/// else the first, else `None`.
pub fn active_answer_set_for_question<'a>(
    question: &'a Question,
    responses: &ResponseMap,
    all_questions: &[Question],
) -> Option<&'a AnswerSet> {
    for group in &question.answer_level_rule_groups {
        if let Some(inline) = &group.inline_answer_set
            && evaluate_answer_level_group(group, responses, all_questions)
        {
            return Some(inline);
        }
    }
    question.default_answer_set()
}
