use serde_json::{Map, Value, json};

use crate::spec::question::{Question, QuestionType};
use crate::visibility::VisibilityMap;

/// Builds a JSON schema for the response map covering the currently
/// visible questions.
pub fn generate(all_questions: &[Question], visibility: &VisibilityMap) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for question in all_questions {
        if !visibility.get(&question.id).copied().unwrap_or(true) {
            continue;
        }
        properties.insert(question.id.clone(), question_schema(question));
        if question.required {
            required.push(Value::String(question.id.clone()));
        }
    }

    json!({
        "type": "object",
        "properties": Value::Object(properties),
        "required": required,
        "additionalProperties": false,
    })
}

fn question_schema(question: &Question) -> Value {
    let mut schema = Map::new();
    schema.insert("title".into(), Value::String(question.title.clone()));
    if let Some(description) = &question.description {
        schema.insert("description".into(), Value::String(description.clone()));
    }

    match question.kind {
        QuestionType::MultiSelect => {
            schema.insert("type".into(), json!("array"));
            let mut items = Map::new();
            items.insert("type".into(), json!("string"));
            if let Some(values) = enum_values(question) {
                items.insert("enum".into(), values);
            }
            schema.insert("items".into(), Value::Object(items));
        }
        QuestionType::Number | QuestionType::Decimal | QuestionType::Rating => {
            schema.insert("type".into(), json!("number"));
        }
        QuestionType::Boolean => {
            schema.insert("type".into(), json!("boolean"));
        }
        QuestionType::Choice | QuestionType::Dropdown | QuestionType::RadioButton => {
            schema.insert("type".into(), json!("string"));
            if let Some(values) = enum_values(question) {
                schema.insert("enum".into(), values);
            }
        }
        QuestionType::Text
        | QuestionType::TextArea
        | QuestionType::Date
        | QuestionType::Document
        | QuestionType::DownloadableDocument => {
            schema.insert("type".into(), json!("string"));
        }
    }

    Value::Object(schema)
}

// Enum values come from the default set; the schema is a static contract
// and does not track answer-level swaps.
fn enum_values(question: &Question) -> Option<Value> {
    let set = question.default_answer_set()?;
    let values: Vec<Value> = set
        .active_answers()
        .map(|answer| Value::String(answer.value.clone()))
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(Value::Array(values))
    }
}
