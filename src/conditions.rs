use crate::operator::evaluate_operator;
use crate::responses::ResponseMap;
use crate::spec::question::Question;
use crate::spec::rules::{
    AnswerLevelNode, AnswerLevelRule, AnswerLevelRuleGroup, ConditionGroup, ConditionNode,
    MatchType, Rule, RuleOperator,
};

pub(crate) fn find_question<'a>(all_questions: &'a [Question], id: &str) -> Option<&'a Question> {
    all_questions.iter().find(|question| question.id == id)
}

/// Evaluates a visibility leaf rule. Any unresolved reference fails closed.
pub fn evaluate_rule(rule: &Rule, responses: &ResponseMap, all_questions: &[Question]) -> bool {
    evaluate_comparison(
        rule.operator,
        &rule.source_question_id,
        rule.source_answer_set_id.as_deref(),
        rule.source_answer_id.as_deref(),
        rule.literal_value.as_deref(),
        responses,
        all_questions,
    )
}

/// Evaluates an answer-level leaf rule, the "previous question" twin of
/// [`evaluate_rule`].
pub fn evaluate_answer_level_rule(
    rule: &AnswerLevelRule,
    responses: &ResponseMap,
    all_questions: &[Question],
) -> bool {
    evaluate_comparison(
        rule.operator,
        &rule.previous_question_id,
        rule.previous_answer_set_id.as_deref(),
        rule.previous_answer_id.as_deref(),
        rule.literal_value.as_deref(),
        responses,
        all_questions,
    )
}

fn evaluate_comparison(
    operator: RuleOperator,
    source_question_id: &str,
    answer_set_id: Option<&str>,
    answer_id: Option<&str>,
    literal_value: Option<&str>,
    responses: &ResponseMap,
    all_questions: &[Question],
) -> bool {
    let Some(source) = find_question(all_questions, source_question_id) else {
        return false;
    };
    let Some(actual) = responses.get(source_question_id) else {
        return false;
    };
    // An unanswered question never satisfies a rule, NotEquals included.
    if actual.is_empty() {
        return false;
    }
    let Some(target) = comparison_target(source, answer_set_id, answer_id, literal_value) else {
        return false;
    };
    evaluate_operator(operator, actual, &target)
}

/// Resolves what the rule compares against. Choice-based sources point at
/// an authored answer whose `value` is the target; simple-value sources
/// carry the literal directly.
fn comparison_target(
    source: &Question,
    answer_set_id: Option<&str>,
    answer_id: Option<&str>,
    literal_value: Option<&str>,
) -> Option<String> {
    if source.kind.is_choice_based() {
        let reference = answer_id?;
        let resolved = answer_set_id
            .and_then(|set_id| source.find_answer_set(set_id))
            .and_then(|set| set.find_active_answer(reference));
        // Stale references degrade to comparing the raw id itself.
        Some(resolved.map_or_else(|| reference.to_string(), |answer| answer.value.clone()))
    } else {
        literal_value.or(answer_id).map(str::to_string)
    }
}

/// Evaluates a visibility condition group. An empty group is vacuously
/// true: no rules means always shown.
pub fn evaluate_group(
    group: &ConditionGroup,
    responses: &ResponseMap,
    all_questions: &[Question],
) -> bool {
    if group.children.is_empty() {
        return true;
    }
    combine(
        group.match_type,
        group.children.iter().map(|child| match child {
            ConditionNode::Group(nested) => evaluate_group(nested, responses, all_questions),
            ConditionNode::Rule(rule) => evaluate_rule(rule, responses, all_questions),
        }),
    )
}

/// Evaluates an answer-level rule group. Unlike visibility groups, an
/// empty group is vacuously false: an inline set is never auto-selected
/// without explicit conditions. The same holds at every nesting level.
pub fn evaluate_answer_level_group(
    group: &AnswerLevelRuleGroup,
    responses: &ResponseMap,
    all_questions: &[Question],
) -> bool {
    evaluate_answer_level_children(group.match_type, &group.children, responses, all_questions)
}

fn evaluate_answer_level_children(
    match_type: MatchType,
    children: &[AnswerLevelNode],
    responses: &ResponseMap,
    all_questions: &[Question],
) -> bool {
    if children.is_empty() {
        return false;
    }
    combine(
        match_type,
        children.iter().map(|child| match child {
            AnswerLevelNode::Group(nested) => evaluate_answer_level_children(
                nested.match_type,
                &nested.children,
                responses,
                all_questions,
            ),
            AnswerLevelNode::AnswerRule(rule) => {
                evaluate_answer_level_rule(rule, responses, all_questions)
            }
        }),
    )
}

fn combine(match_type: MatchType, mut results: impl Iterator<Item = bool>) -> bool {
    match match_type {
        MatchType::And => results.all(|result| result),
        MatchType::Or => results.any(|result| result),
    }
}
