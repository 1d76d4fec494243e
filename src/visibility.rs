use crate::conditions::evaluate_group;
use crate::responses::ResponseMap;
use crate::spec::question::Question;
use crate::spec::tree::{Branch, Questionnaire, Section};
use crate::traversal::flatten_questions;

pub type VisibilityMap = std::collections::BTreeMap<String, bool>;

/// Whether a question should currently be drawn. The `hidden` flag is an
/// unconditional override; otherwise an absent or empty condition group
/// means always visible.
pub fn is_question_visible(
    question: &Question,
    responses: &ResponseMap,
    all_questions: &[Question],
) -> bool {
    if question.hidden {
        return false;
    }
    match &question.condition_group {
        Some(group) => evaluate_group(group, responses, all_questions),
        None => true,
    }
}

/// Whether a branch and therefore its subtree should currently be drawn.
pub fn is_branch_visible(
    branch: &Branch,
    responses: &ResponseMap,
    all_questions: &[Question],
) -> bool {
    if branch.hidden {
        return false;
    }
    match &branch.condition_group {
        Some(group) => evaluate_group(group, responses, all_questions),
        None => true,
    }
}

/// Filter convenience for page renderers.
pub fn visible_questions_for_page(
    questions: &[Question],
    responses: &ResponseMap,
    all_questions: &[Question],
) -> Vec<Question> {
    questions
        .iter()
        .filter(|question| is_question_visible(question, responses, all_questions))
        .cloned()
        .collect()
}

/// Resolves visibility for every question in the tree in one pass. A
/// hidden or false-evaluating branch hides its whole subtree; descendants
/// are not evaluated independently.
pub fn resolve_visibility(questionnaire: &Questionnaire, responses: &ResponseMap) -> VisibilityMap {
    let all_questions = flatten_questions(questionnaire);
    let mut map = VisibilityMap::new();
    for page in &questionnaire.pages {
        for section in &page.sections {
            resolve_section(section, responses, &all_questions, &mut map);
        }
    }
    map
}

fn resolve_section(
    section: &Section,
    responses: &ResponseMap,
    all_questions: &[Question],
    map: &mut VisibilityMap,
) {
    for question in &section.questions {
        map.insert(
            question.id.clone(),
            is_question_visible(question, responses, all_questions),
        );
    }
    for branch in &section.branches {
        resolve_branch(branch, true, responses, all_questions, map);
    }
}

fn resolve_branch(
    branch: &Branch,
    ancestors_visible: bool,
    responses: &ResponseMap,
    all_questions: &[Question],
    map: &mut VisibilityMap,
) {
    let visible = ancestors_visible && is_branch_visible(branch, responses, all_questions);
    for question in &branch.questions {
        map.insert(
            question.id.clone(),
            visible && is_question_visible(question, responses, all_questions),
        );
    }
    for child in &branch.branches {
        resolve_branch(child, visible, responses, all_questions, map);
    }
}
