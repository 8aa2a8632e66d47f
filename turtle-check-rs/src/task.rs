//! Tasks, their reference drawings and solution checking.

use crate::compare::{compare, diff_alpha, AlphaDiff};
use crate::engine::TurtleEngine;
use crate::error::{ExtractionError, TaskError};
use crate::snapshot::PixelSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Message shown when a run could not be captured for checking.
pub const UNVERIFIABLE_MESSAGE: &str = "could not verify solution, try running again";

/// An exercise a learner solves by drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Code placed in the editor when the task is opened.
    #[serde(default)]
    pub initial_code: String,
    /// The administrator's solution source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
    /// Reference drawing, stored as a base64 PNG.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "png_base64")]
    pub reference: Option<PixelSnapshot>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            initial_code: String::new(),
            solution: None,
            hints: Vec::new(),
            reference: None,
        }
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }
}

/// Who is acting on the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Learner,
}

/// Result of checking a submission against a task's reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The task has no reference drawing yet.
    NoReference,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "Correct"),
            Verdict::Incorrect => write!(f, "Incorrect"),
            Verdict::NoReference => write!(f, "No reference solution"),
        }
    }
}

/// Result of capturing a run and comparing it with a reference.
#[derive(Debug)]
pub enum CheckOutcome {
    Correct,
    Incorrect(AlphaDiff),
    /// The run could not be captured. Not the same as an incorrect drawing.
    Unverifiable(ExtractionError),
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, CheckOutcome::Correct)
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::Correct => write!(f, "Correct"),
            CheckOutcome::Incorrect(_) => write!(f, "Incorrect"),
            CheckOutcome::Unverifiable(_) => write!(f, "{UNVERIFIABLE_MESSAGE}"),
        }
    }
}

/// Capture the engine's surface and compare it with `reference`.
pub fn verify_run(engine: &TurtleEngine, reference: &PixelSnapshot) -> CheckOutcome {
    let submission = match engine.capture() {
        Ok(submission) => submission,
        Err(err) => {
            log::warn!(target: "turtle", "Could not capture run for checking: {err}");
            return CheckOutcome::Unverifiable(err);
        }
    };
    if compare(&submission, reference) {
        CheckOutcome::Correct
    } else {
        let diff = diff_alpha(&submission, reference);
        log::info!(target: "turtle", "Submission differs from reference: {diff}");
        CheckOutcome::Incorrect(diff)
    }
}

/// Tasks keyed by id.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a task, returning the one it replaced.
    pub fn insert(&mut self, task: Task) -> Option<Task> {
        self.tasks.insert(task.id.clone(), task)
    }

    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// Tasks in id order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn task_mut(&mut self, task_id: &str) -> Result<&mut Task, TaskError> {
        self.tasks
            .get_mut(task_id)
            .ok_or_else(|| TaskError::UnknownTask(task_id.to_string()))
    }

    /// Store the solution source of a task.
    pub fn update_solution(
        &mut self,
        task_id: &str,
        source: impl Into<String>,
    ) -> Result<(), TaskError> {
        self.task_mut(task_id)?.solution = Some(source.into());
        Ok(())
    }

    /// Set or overwrite the reference drawing of a task. Admins only.
    pub fn save_reference(
        &mut self,
        role: Role,
        task_id: &str,
        snapshot: PixelSnapshot,
    ) -> Result<(), TaskError> {
        let task = self.task_mut(task_id)?;
        if role != Role::Admin {
            return Err(TaskError::PermissionDenied(task_id.to_string()));
        }
        log::info!(
            target: "turtle",
            "Saving {}x{} reference for task {task_id}",
            snapshot.width(),
            snapshot.height()
        );
        task.reference = Some(snapshot);
        Ok(())
    }

    /// Compare `submission` with the task's reference drawing.
    pub fn check_solution(
        &self,
        task_id: &str,
        submission: &PixelSnapshot,
    ) -> Result<Verdict, TaskError> {
        let task = self
            .get(task_id)
            .ok_or_else(|| TaskError::UnknownTask(task_id.to_string()))?;
        let Some(reference) = &task.reference else {
            log::warn!(target: "turtle", "Task {task_id} has no reference solution");
            return Ok(Verdict::NoReference);
        };
        Ok(if compare(submission, reference) {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        })
    }

    /// Parse a JSON array of tasks. A repeated id replaces the earlier task.
    pub fn from_json_str(json: &str) -> Result<Self, TaskError> {
        let tasks: Vec<Task> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for task in tasks {
            let id = task.id.clone();
            if registry.insert(task).is_some() {
                log::warn!(target: "turtle", "Duplicate task id {id}, keeping the last one");
            }
        }
        Ok(registry)
    }

    pub fn to_json_string(&self) -> Result<String, TaskError> {
        let tasks: Vec<&Task> = self.tasks().collect();
        Ok(serde_json::to_string_pretty(&tasks)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TaskError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TaskError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

/// Serde adapter storing an optional snapshot as a base64 PNG string.
mod png_base64 {
    use crate::snapshot::PixelSnapshot;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(snapshot: &Option<PixelSnapshot>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match snapshot {
            Some(snapshot) => {
                let png = snapshot.to_png().map_err(S::Error::custom)?;
                serializer.serialize_some(&STANDARD.encode(png))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PixelSnapshot>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(encoded) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let png = STANDARD.decode(encoded.trim()).map_err(D::Error::custom)?;
        PixelSnapshot::from_png(&png)
            .map(Some)
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, alpha: u8) -> PixelSnapshot {
        let data = (0..width * height).flat_map(|_| [0, 0, 0, alpha]).collect();
        PixelSnapshot::from_rgba(width, height, data).unwrap()
    }

    fn registry() -> TaskRegistry {
        let mut registry = TaskRegistry::new();
        registry.insert(Task::new("square", "Square", "Draw a square"));
        registry
    }

    #[test]
    fn test_no_reference_is_not_passed() {
        let registry = registry();
        let verdict = registry.check_solution("square", &solid(2, 2, 0)).unwrap();
        assert_eq!(verdict, Verdict::NoReference);
        assert!(!verdict.passed());
    }

    #[test]
    fn test_learner_cannot_save_reference() {
        let mut registry = registry();
        assert!(matches!(
            registry.save_reference(Role::Learner, "square", solid(2, 2, 255)),
            Err(TaskError::PermissionDenied(id)) if id == "square"
        ));
        assert!(!registry.get("square").unwrap().has_reference());
    }

    #[test]
    fn test_admin_reference_overwrites() {
        let mut registry = registry();
        registry
            .save_reference(Role::Admin, "square", solid(2, 2, 255))
            .unwrap();
        assert_eq!(
            registry.check_solution("square", &solid(2, 2, 255)).unwrap(),
            Verdict::Correct
        );

        registry
            .save_reference(Role::Admin, "square", solid(2, 2, 0))
            .unwrap();
        assert_eq!(
            registry.check_solution("square", &solid(2, 2, 255)).unwrap(),
            Verdict::Incorrect
        );
    }

    #[test]
    fn test_unknown_task() {
        let mut registry = registry();
        assert!(matches!(
            registry.check_solution("circle", &solid(1, 1, 0)),
            Err(TaskError::UnknownTask(_))
        ));
        assert!(matches!(
            registry.update_solution("circle", "forward 10"),
            Err(TaskError::UnknownTask(_))
        ));
        assert!(matches!(
            registry.save_reference(Role::Admin, "circle", solid(1, 1, 0)),
            Err(TaskError::UnknownTask(_))
        ));
    }

    #[test]
    fn test_update_solution() {
        let mut registry = registry();
        registry.update_solution("square", "forward 100").unwrap();
        assert_eq!(
            registry.get("square").unwrap().solution.as_deref(),
            Some("forward 100")
        );
    }

    #[test]
    fn test_json_round_trip_keeps_reference() {
        let mut registry = registry();
        let mut task = Task::new("dot", "Dot", "Draw a dot");
        task.hints = vec!["use circle".to_string()];
        task.initial_code = "import turtle".to_string();
        registry.insert(task);
        registry
            .save_reference(Role::Admin, "dot", solid(3, 2, 128))
            .unwrap();

        let json = registry.to_json_string().unwrap();
        let restored = TaskRegistry::from_json_str(&json).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.get("dot"), registry.get("dot"));
        assert!(!restored.get("square").unwrap().has_reference());
    }

    #[test]
    fn test_json_minimal_task() {
        let registry = TaskRegistry::from_json_str(
            r#"[{ "id": "a", "title": "A", "description": "first" },
                { "id": "a", "title": "A2", "description": "second" }]"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 1);
        let task = registry.get("a").unwrap();
        assert_eq!(task.title, "A2");
        assert!(task.solution.is_none());
        assert!(task.hints.is_empty());
    }

    #[test]
    fn test_json_bad_reference() {
        let result = TaskRegistry::from_json_str(
            r#"[{ "id": "a", "title": "A", "description": "", "reference": "not base64!" }]"#,
        );
        assert!(matches!(result, Err(TaskError::Json(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let registry = registry();
        registry.save(&path).unwrap();
        let loaded = TaskRegistry::from_path(&path).unwrap();
        assert_eq!(loaded.get("square"), registry.get("square"));
    }

    #[test]
    fn test_verify_run_unattached_is_unverifiable() {
        let outcome = verify_run(&TurtleEngine::new(), &solid(2, 2, 0));
        assert!(matches!(
            outcome,
            CheckOutcome::Unverifiable(ExtractionError::UnattachedSurface)
        ));
        assert!(!outcome.passed());
        assert_eq!(outcome.to_string(), UNVERIFIABLE_MESSAGE);
    }
}
