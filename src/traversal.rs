use crate::spec::question::Question;
use crate::spec::tree::{Branch, Questionnaire, Section};

/// Flattens the questionnaire into declaration order: pages, sections,
/// each section's direct questions, then its branches depth-first. Branch
/// nesting is unbounded.
pub fn flatten_questions(questionnaire: &Questionnaire) -> Vec<Question> {
    let mut questions = Vec::new();
    for page in &questionnaire.pages {
        for section in &page.sections {
            collect_section(section, &mut questions);
        }
    }
    questions
}

fn collect_section(section: &Section, out: &mut Vec<Question>) {
    out.extend(section.questions.iter().cloned());
    for branch in &section.branches {
        collect_branch(branch, out);
    }
}

fn collect_branch(branch: &Branch, out: &mut Vec<Question>) {
    out.extend(branch.questions.iter().cloned());
    for child in &branch.branches {
        collect_branch(child, out);
    }
}

/// Questions a rule attached at `order` may reference: strictly earlier
/// ones. Feeds the rule-authoring pickers.
pub fn questions_before(all_questions: &[Question], order: u32) -> Vec<Question> {
    all_questions
        .iter()
        .filter(|question| question.order < order)
        .cloned()
        .collect()
}
