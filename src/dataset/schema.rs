//! The training-sample contract, checked on untyped JSON.
//!
//! Every problem in a record is collected before failing, so one report
//! names all missing, mistyped and out-of-domain fields at once. Extra
//! fields are tolerated.

use crate::core::{BusinessStage, Error, Result, SchemaError, SchemaViolation};
use crate::dataset::sample::{Difficulty, Language, SourceType, TaskType};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

#[derive(Default)]
struct Checker {
    violations: Vec<SchemaViolation>,
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Checker {
    fn report(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(SchemaViolation::new(path, message));
    }

    fn field<'a>(&mut self, obj: &'a Map<String, Value>, parent: &str, key: &str) -> Option<&'a Value> {
        let value = obj.get(key);
        if value.is_none() {
            self.report(join(parent, key), "field required");
        }
        value
    }

    fn object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.report(path, format!("expected an object, got {}", type_name(other)));
                None
            }
        }
    }

    fn array<'a>(&mut self, obj: &'a Map<String, Value>, parent: &str, key: &str) -> Option<&'a Vec<Value>> {
        match self.field(obj, parent, key)? {
            Value::Array(items) => Some(items),
            other => {
                self.report(join(parent, key), format!("expected an array, got {}", type_name(other)));
                None
            }
        }
    }

    fn string<'a>(&mut self, obj: &'a Map<String, Value>, parent: &str, key: &str) -> Option<&'a str> {
        match self.field(obj, parent, key)? {
            Value::String(s) => Some(s),
            other => {
                self.report(join(parent, key), format!("expected a string, got {}", type_name(other)));
                None
            }
        }
    }

    fn one_of(&mut self, obj: &Map<String, Value>, parent: &str, key: &str, allowed: &[&str]) {
        if let Some(value) = self.string(obj, parent, key) {
            if !allowed.contains(&value) {
                self.report(
                    join(parent, key),
                    format!("expected one of {}, got {:?}", allowed.join(", "), value),
                );
            }
        }
    }

    fn string_list(&mut self, obj: &Map<String, Value>, parent: &str, key: &str) {
        let path = join(parent, key);
        if let Some(items) = self.array(obj, parent, key) {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    self.report(
                        format!("{}[{}]", path, i),
                        format!("expected a string, got {}", type_name(item)),
                    );
                }
            }
        }
    }

    fn integer(&mut self, obj: &Map<String, Value>, parent: &str, key: &str) -> Option<i64> {
        let value = self.field(obj, parent, key)?;
        let int = value.as_i64();
        if int.is_none() {
            self.report(join(parent, key), format!("expected an integer, got {}", value));
        }
        int
    }

    fn context_item(&mut self, value: &Value, path: &str) {
        let Some(obj) = self.object(value, path) else {
            return;
        };
        let source_types = SourceType::ALL.map(|s| s.as_str());
        self.one_of(obj, path, "source_type", &source_types);
        self.string(obj, path, "path");
        self.string(obj, path, "content");
    }

    fn trace_step(&mut self, value: &Value, path: &str) -> Option<i64> {
        let obj = self.object(value, path)?;
        let step = self.integer(obj, path, "step");
        if let Some(step) = step.filter(|s| *s < 1) {
            self.report(join(path, "step"), format!("must be >= 1, got {}", step));
        }
        self.string(obj, path, "goal");
        self.string_list(obj, path, "evidence_ref");
        self.string(obj, path, "intermediate_conclusion");
        step
    }

    fn reasoning_trace(&mut self, obj: &Map<String, Value>) {
        let Some(steps) = self.array(obj, "", "reasoning_trace") else {
            return;
        };
        let mut previous: Option<i64> = None;
        for (i, value) in steps.iter().enumerate() {
            let path = format!("reasoning_trace[{}]", i);
            let Some(step) = self.trace_step(value, &path) else {
                continue;
            };
            match previous {
                None if step != 1 && step >= 1 => {
                    self.report(join(&path, "step"), format!("trace must start at step 1, got {}", step));
                }
                Some(prev) if step <= prev => {
                    self.report(
                        join(&path, "step"),
                        format!("steps must be strictly increasing, got {} after {}", step, prev),
                    );
                }
                _ => {}
            }
            previous = Some(step);
        }
    }

    fn metadata(&mut self, obj: &Map<String, Value>) {
        let Some(value) = self.field(obj, "", "metadata") else {
            return;
        };
        let Some(meta) = self.object(value, "metadata") else {
            return;
        };
        let stages = BusinessStage::ALL.map(|s| s.as_str());
        let difficulties = Difficulty::ALL.map(|d| d.as_str());
        let languages = Language::ALL.map(|l| l.as_str());
        self.string(meta, "metadata", "repo");
        self.one_of(meta, "metadata", "business_stage", &stages);
        self.string(meta, "metadata", "question_id");
        self.one_of(meta, "metadata", "difficulty", &difficulties);
        self.one_of(meta, "metadata", "language", &languages);
    }

    fn sample(&mut self, value: &Value) {
        let Some(obj) = self.object(value, "") else {
            return;
        };
        let task_types = TaskType::ALL.map(|t| t.as_str());
        self.string(obj, "", "id");
        self.one_of(obj, "", "task_type", &task_types);
        self.string(obj, "", "instruction");
        if let Some(items) = self.array(obj, "", "context") {
            for (i, item) in items.iter().enumerate() {
                self.context_item(item, &format!("context[{}]", i));
            }
        }
        self.reasoning_trace(obj);
        self.string(obj, "", "output");
        self.metadata(obj);
    }
}

/// Check one JSON record against the sample contract.
pub fn validate_value(value: &Value) -> std::result::Result<(), SchemaError> {
    let mut checker = Checker::default();
    checker.sample(value);
    if checker.violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::new(checker.violations))
    }
}

/// One rejected line of a JSONL file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFailure {
    /// 1-based line number in the file.
    pub line: usize,
    pub reason: String,
}

/// Outcome of checking a whole JSONL file. Never fails on bad records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Non-blank lines seen.
    pub total: usize,
    pub failures: Vec<LineFailure>,
}

impl ValidationReport {
    pub fn invalid(&self) -> usize {
        self.failures.len()
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Check every non-blank line of JSONL text independently.
pub fn validate_jsonl_str(text: &str) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        report.total += 1;
        let outcome = serde_json::from_str::<Value>(line)
            .map_err(|e| format!("invalid JSON: {}", e))
            .and_then(|value| validate_value(&value).map_err(|e| e.to_string()));
        if let Err(reason) = outcome {
            report.failures.push(LineFailure {
                line: index + 1,
                reason,
            });
        }
    }
    report
}

/// Check a persisted JSONL file. Only a missing or unreadable file is an error.
pub fn validate_jsonl(path: &Path) -> Result<ValidationReport> {
    if !path.is_file() {
        return Err(Error::missing_input(format!("File not found: {}", path.display())));
    }
    let text = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read records", path, e))?;
    Ok(validate_jsonl_str(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn valid_sample() -> Value {
        json!({
            "id": "qa_auto_0001",
            "task_type": "qa",
            "instruction": "What does `Foo` do?",
            "context": [{"source_type": "code", "path": "pkg/foo.py", "content": "class Foo: ..."}],
            "reasoning_trace": [
                {"step": 1, "goal": "locate", "evidence_ref": ["pkg/foo.py"], "intermediate_conclusion": "found"},
                {"step": 2, "goal": "summarize", "evidence_ref": ["pkg/foo.py"], "intermediate_conclusion": "done"}
            ],
            "output": "Foo does things.",
            "metadata": {
                "repo": "demo",
                "business_stage": "other",
                "question_id": "AUTO_FACT",
                "difficulty": "easy",
                "language": "en"
            }
        })
    }

    #[test]
    fn test_valid_sample_passes() {
        assert_eq!(validate_value(&valid_sample()), Ok(()));
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let mut sample = valid_sample();
        sample["extra"] = json!({"anything": true});
        assert!(validate_value(&sample).is_ok());
    }

    #[test]
    fn test_unknown_task_type_fails() {
        let mut sample = valid_sample();
        sample["task_type"] = json!("summary");
        let err = validate_value(&sample).unwrap_err();
        assert!(err.mentions("task_type"));
    }

    #[test]
    fn test_step_zero_fails() {
        let mut sample = valid_sample();
        sample["reasoning_trace"][0]["step"] = json!(0);
        let err = validate_value(&sample).unwrap_err();
        assert!(err.mentions("reasoning_trace[0].step"));
    }

    #[test]
    fn test_non_increasing_steps_fail() {
        let mut sample = valid_sample();
        sample["reasoning_trace"][1]["step"] = json!(1);
        let err = validate_value(&sample).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.mentions("reasoning_trace[1].step"));
    }

    #[test]
    fn test_every_violation_is_listed() {
        let mut sample = valid_sample();
        sample.as_object_mut().unwrap().remove("output");
        sample["metadata"]["business_stage"] = json!("claims");
        sample["metadata"]["difficulty"] = json!(3);
        sample["context"][0]["source_type"] = json!("wiki");
        sample["reasoning_trace"][0]["evidence_ref"] = json!(["ok", 7]);

        let err = validate_value(&sample).unwrap_err();
        let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "context[0].source_type",
                "reasoning_trace[0].evidence_ref[1]",
                "output",
                "metadata.business_stage",
                "metadata.difficulty",
            ]
        );
    }

    #[test]
    fn test_non_object_record_fails() {
        let err = validate_value(&json!([1, 2])).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.violations[0].message.contains("expected an object"));
    }

    #[test]
    fn test_jsonl_report_counts_and_line_numbers() {
        let good = valid_sample().to_string();
        let mut bad = valid_sample();
        bad["task_type"] = json!("summary");
        let text = format!("{}\n\n{{not json\n{}\n", good, bad);

        let report = validate_jsonl_str(&text);
        assert_eq!(report.total, 3);
        assert_eq!(report.invalid(), 2);
        let lines: Vec<usize> = report.failures.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![3, 4]);
        assert!(report.failures[0].reason.starts_with("invalid JSON"));
        assert!(report.failures[1].reason.contains("task_type"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = validate_jsonl(Path::new("/definitely/not/here.jsonl")).unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
    }
}
