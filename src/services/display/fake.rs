use super::r#trait::DisplayManager;
use crate::error::{LayoutError, Result};
use crate::model::MonitorGeometry;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Scripted display manager for tests.
///
/// `monitors` pops queued answers and keeps returning the last one once the
/// queue is down to a single entry.
#[derive(Default)]
pub struct FakeDisplayManager {
    answers: Mutex<VecDeque<Option<Vec<MonitorGeometry>>>>,
    pub applied: Mutex<Vec<String>>,
    /// Answers queued by every `apply` call
    pub after_apply: Mutex<Vec<Option<Vec<MonitorGeometry>>>>,
}

impl FakeDisplayManager {
    pub fn with_monitors(monitors: Vec<MonitorGeometry>) -> Self {
        let fake = Self::default();
        fake.answers.lock().push_back(Some(monitors));
        fake
    }

    /// Replaces every queued answer with one fixed monitor set
    pub fn set_monitors(&self, monitors: Vec<MonitorGeometry>) {
        let mut answers = self.answers.lock();
        answers.clear();
        answers.push_back(Some(monitors));
    }

    pub fn applied(&self) -> Vec<String> {
        self.applied.lock().clone()
    }
}

#[async_trait::async_trait]
impl DisplayManager for FakeDisplayManager {
    async fn monitors(&self) -> Result<Vec<MonitorGeometry>> {
        let mut answers = self.answers.lock();
        let answer = if answers.len() > 1 {
            answers.pop_front().flatten()
        } else {
            answers.front().cloned().flatten()
        };
        answer.ok_or_else(|| LayoutError::tool_failed("xrandr", "scripted failure"))
    }

    async fn apply(&self, args: &str) -> Result<()> {
        self.applied.lock().push(args.to_string());
        let queued = std::mem::take(&mut *self.after_apply.lock());
        if !queued.is_empty() {
            let mut answers = self.answers.lock();
            answers.clear();
            answers.extend(queued);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DisplayManager for std::sync::Arc<FakeDisplayManager> {
    async fn monitors(&self) -> Result<Vec<MonitorGeometry>> {
        self.as_ref().monitors().await
    }

    async fn apply(&self, args: &str) -> Result<()> {
        self.as_ref().apply(args).await
    }
}
