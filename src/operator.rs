use crate::responses::ResponseValue;
use crate::spec::rules::RuleOperator;

/// Applies a rule operator to the actual response value and the authored
/// target literal. Pure and total: malformed input degrades to `false`.
pub fn evaluate_operator(operator: RuleOperator, actual: &ResponseValue, target: &str) -> bool {
    match actual {
        ResponseValue::Selection(items) => evaluate_on_selection(operator, items, target),
        ResponseValue::Empty => false,
        scalar => evaluate_on_scalar(operator, scalar, target),
    }
}

fn evaluate_on_selection(operator: RuleOperator, items: &[String], target: &str) -> bool {
    match operator {
        RuleOperator::Equals => items.iter().any(|item| item == target),
        RuleOperator::NotEquals => !items.iter().any(|item| item == target),
        RuleOperator::Contains => items.iter().any(|item| item.contains(target)),
        RuleOperator::NotContains => !items.iter().any(|item| item.contains(target)),
        // Ordering and affix operators are undefined for multi-selects.
        RuleOperator::GreaterThan
        | RuleOperator::LessThan
        | RuleOperator::StartsWith
        | RuleOperator::EndsWith => false,
    }
}

fn evaluate_on_scalar(operator: RuleOperator, actual: &ResponseValue, target: &str) -> bool {
    match operator {
        RuleOperator::Equals => with_text(actual, |text| text == target),
        RuleOperator::NotEquals => with_text(actual, |text| text != target),
        RuleOperator::Contains => with_text(actual, |text| text.contains(target)),
        RuleOperator::NotContains => with_text(actual, |text| !text.contains(target)),
        RuleOperator::StartsWith => with_text(actual, |text| text.starts_with(target)),
        RuleOperator::EndsWith => with_text(actual, |text| text.ends_with(target)),
        RuleOperator::GreaterThan => compare_numeric(actual, target, |left, right| left > right),
        RuleOperator::LessThan => compare_numeric(actual, target, |left, right| left < right),
    }
}

fn with_text(actual: &ResponseValue, predicate: impl Fn(&str) -> bool) -> bool {
    actual
        .as_comparison_string()
        .is_some_and(|text| predicate(&text))
}

fn compare_numeric(
    actual: &ResponseValue,
    target: &str,
    compare: impl Fn(f64, f64) -> bool,
) -> bool {
    match (actual.as_number(), target.parse::<f64>().ok()) {
        (Some(left), Some(right)) if !left.is_nan() && !right.is_nan() => compare(left, right),
        _ => false,
    }
}
