use formlogic::{
    ConditionGroup, ConditionNode, IntegrityIssue, MatchType, Questionnaire, ResponseMap,
    ResponseValue, Rule, RuleOperator, active_answer_set_for_question, check_questionnaire,
    flatten_questions, questions_before, resolve_visibility,
};

fn fixture() -> Questionnaire {
    serde_json::from_str(include_str!("fixtures/support_form.json")).expect("deserialize")
}

fn answered(entries: &[(&str, ResponseValue)]) -> ResponseMap {
    entries
        .iter()
        .map(|(id, value)| (id.to_string(), value.clone()))
        .collect()
}

#[test]
fn fixture_round_trips_through_serde() {
    let questionnaire = fixture();
    let json = serde_json::to_value(&questionnaire).expect("serialize");
    let back: Questionnaire = serde_json::from_value(json).expect("deserialize again");
    assert_eq!(questionnaire, back);
}

#[test]
fn flatten_preserves_depth_first_declaration_order() {
    let questionnaire = fixture();
    let ids: Vec<String> = flatten_questions(&questionnaire)
        .into_iter()
        .map(|question| question.id)
        .collect();
    assert_eq!(
        ids,
        vec![
            "q_category",
            "q_item",
            "q_serial",
            "q_legacy_notes",
            "q_priority",
            "q_escalate",
            "q_admin_notes",
        ]
    );
}

#[test]
fn questions_before_feeds_the_rule_picker() {
    let questionnaire = fixture();
    let all = flatten_questions(&questionnaire);
    let ids: Vec<String> = questions_before(&all, 3)
        .into_iter()
        .map(|question| question.id)
        .collect();
    assert_eq!(ids, vec!["q_category", "q_item"]);
}

#[test]
fn unanswered_form_shows_only_unconditional_questions() {
    let questionnaire = fixture();
    let visibility = resolve_visibility(&questionnaire, &ResponseMap::new());

    assert_eq!(visibility["q_category"], true);
    assert_eq!(visibility["q_item"], true);
    assert_eq!(visibility["q_priority"], true);
    // Branch condition unanswered: fails closed.
    assert_eq!(visibility["q_serial"], false);
    assert_eq!(visibility["q_legacy_notes"], false);
    // greater_than over an unanswered rating: fails closed.
    assert_eq!(visibility["q_escalate"], false);
    // Hidden flag overrides everything.
    assert_eq!(visibility["q_admin_notes"], false);
}

#[test]
fn hardware_answer_opens_the_branch_and_its_legacy_child() {
    let questionnaire = fixture();
    let responses = answered(&[
        ("q_category", ResponseValue::Text("hardware".into())),
        ("q_serial", ResponseValue::Text("HW-0123".into())),
    ]);
    let visibility = resolve_visibility(&questionnaire, &responses);
    assert_eq!(visibility["q_serial"], true);
    assert_eq!(visibility["q_legacy_notes"], true);
}

#[test]
fn or_branch_is_visible_when_only_the_second_rule_matches() {
    let questionnaire = fixture();
    // "HW-1299" does not start with "HW-0" but ends with "99".
    let responses = answered(&[
        ("q_category", ResponseValue::Text("hardware".into())),
        ("q_serial", ResponseValue::Text("HW-1299".into())),
    ]);
    let visibility = resolve_visibility(&questionnaire, &responses);
    assert_eq!(visibility["q_legacy_notes"], true);

    // A modern serial satisfies neither rule of the nested branch, even
    // though its parent stays visible.
    let responses = answered(&[
        ("q_category", ResponseValue::Text("hardware".into())),
        ("q_serial", ResponseValue::Text("HW-1234".into())),
    ]);
    let visibility = resolve_visibility(&questionnaire, &responses);
    assert_eq!(visibility["q_serial"], true);
    assert_eq!(visibility["q_legacy_notes"], false);
}

#[test]
fn false_ancestor_branch_hides_the_whole_subtree() {
    let questionnaire = fixture();
    // The legacy rule would match this serial, but the ancestor branch is
    // closed by the software answer, so nothing underneath is visible.
    let responses = answered(&[
        ("q_category", ResponseValue::Text("software".into())),
        ("q_serial", ResponseValue::Text("HW-0123".into())),
    ]);
    let visibility = resolve_visibility(&questionnaire, &responses);
    assert_eq!(visibility["q_serial"], false);
    assert_eq!(visibility["q_legacy_notes"], false);
}

#[test]
fn rating_gate_opens_on_high_priority() {
    let questionnaire = fixture();
    let responses = answered(&[("q_priority", ResponseValue::Number(4.0))]);
    let visibility = resolve_visibility(&questionnaire, &responses);
    assert_eq!(visibility["q_escalate"], true);

    let responses = answered(&[("q_priority", ResponseValue::Number(2.0))]);
    let visibility = resolve_visibility(&questionnaire, &responses);
    assert_eq!(visibility["q_escalate"], false);
}

#[test]
fn answer_set_swap_follows_the_category() {
    let questionnaire = fixture();
    let all = flatten_questions(&questionnaire);
    let item = all.iter().find(|question| question.id == "q_item").unwrap();

    let responses = answered(&[("q_category", ResponseValue::Text("hardware".into()))]);
    let active = active_answer_set_for_question(item, &responses, &all).unwrap();
    assert_eq!(active.id, "set_hw");

    let responses = answered(&[("q_category", ResponseValue::Text("software".into()))]);
    let active = active_answer_set_for_question(item, &responses, &all).unwrap();
    assert_eq!(active.id, "set_generic");
}

#[test]
fn fixture_passes_the_integrity_check() {
    let questionnaire = fixture();
    assert_eq!(check_questionnaire(&questionnaire), vec![]);
}

#[test]
fn integrity_check_flags_dangling_and_forward_references() {
    let mut questionnaire = fixture();
    let section = &mut questionnaire.pages[0].sections[0];

    // q_category now references q_item, which comes later in the form.
    section.questions[0].condition_group = Some(ConditionGroup {
        match_type: MatchType::And,
        children: vec![ConditionNode::Rule(Rule {
            operator: RuleOperator::Equals,
            source_question_id: "q_item".into(),
            source_answer_set_id: None,
            source_answer_id: None,
            literal_value: Some("other".into()),
        })],
    });
    // q_item references a question that no longer exists.
    section.questions[1].condition_group = Some(ConditionGroup {
        match_type: MatchType::And,
        children: vec![ConditionNode::Rule(Rule {
            operator: RuleOperator::Equals,
            source_question_id: "q_deleted".into(),
            source_answer_set_id: None,
            source_answer_id: None,
            literal_value: Some("x".into()),
        })],
    });

    let issues = check_questionnaire(&questionnaire);
    assert!(issues.contains(&IntegrityIssue::ForwardReference {
        consumer: "q_category".into(),
        source_id: "q_item".into(),
    }));
    assert!(issues.contains(&IntegrityIssue::UnknownSourceQuestion {
        consumer: "q_item".into(),
        source_id: "q_deleted".into(),
    }));
}

#[test]
fn integrity_check_flags_stale_answer_references() {
    let mut questionnaire = fixture();
    // Deactivate the hardware answer the branch rule points at.
    questionnaire.pages[0].sections[0].questions[0].answer_sets[0].answers[0].active = false;

    let issues = check_questionnaire(&questionnaire);
    assert!(issues.contains(&IntegrityIssue::UnknownAnswer {
        consumer: "branch_hw".into(),
        source_id: "q_category".into(),
        answer: "a_hw".into(),
    }));
}

#[test]
fn integrity_issues_render_as_error_messages() {
    // Issues are plain diagnostics: they carry no underlying error cause,
    // only the ids needed to point the editor at the stale rule.
    let issue = IntegrityIssue::UnknownSourceQuestion {
        consumer: "q_item".into(),
        source_id: "q_deleted".into(),
    };
    assert_eq!(
        issue.to_string(),
        "rule on 'q_item' references unknown question 'q_deleted'"
    );
    let error: &dyn std::error::Error = &issue;
    assert!(error.source().is_none());
}

#[test]
fn integrity_check_flags_duplicate_ids() {
    let mut questionnaire = fixture();
    let duplicate = questionnaire.pages[0].sections[0].questions[0].clone();
    questionnaire.pages[1].sections[0].questions.push(duplicate);

    let issues = check_questionnaire(&questionnaire);
    assert!(issues.contains(&IntegrityIssue::DuplicateQuestionId("q_category".into())));
}
