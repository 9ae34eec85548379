// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle run reducer.
//!
//! A run belongs to one navigation target. It only moves forward through the
//! loader steps, never re-enters a step and never enters a parent step. The
//! error flag is orthogonal to the step: once set, the run is frozen until a
//! new run replaces it.

use crate::step::{LoaderStep, StepGlyph};
use crate::workspace::WorkspaceId;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("run is frozen by an earlier error")]
    Frozen,
    #[error("run is already complete")]
    Completed,
    #[error("cannot move back from step {from} to step {to}")]
    Backwards { from: u8, to: u8 },
    #[error("step {0} is a parent step and cannot be entered")]
    ParentStep(u8),
}

/// Data gathered while the run progresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunContext {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub devfile_location_info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<WorkspaceId>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub workspace_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ide_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleRun<S: LoaderStep> {
    target: String,
    step: S,
    error: Option<String>,
    completed: bool,
    history: Vec<S>,
    context: RunContext,
}

impl<S: LoaderStep> LifecycleRun<S> {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            step: S::INITIAL,
            error: None,
            completed: false,
            history: vec![S::INITIAL],
            context: RunContext::default(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn step(&self) -> S {
        self.step
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Steps entered so far, in order.
    pub fn history(&self) -> &[S] {
        &self.history
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Whether the run has reached `step` (entered it or moved past it).
    pub fn reached(&self, step: S) -> bool {
        self.step >= step
    }

    fn check_open(&self) -> Result<(), RunError> {
        if self.error.is_some() {
            return Err(RunError::Frozen);
        }
        if self.completed {
            return Err(RunError::Completed);
        }
        Ok(())
    }

    /// Move to `to`. Moving to the current step is a no-op.
    pub fn advance(&mut self, to: S) -> Result<(), RunError> {
        self.check_open()?;
        if to.is_parent() {
            return Err(RunError::ParentStep(to.index()));
        }
        if to < self.step {
            return Err(RunError::Backwards {
                from: self.step.index(),
                to: to.index(),
            });
        }
        if to != self.step {
            self.step = to;
            self.history.push(to);
        }
        Ok(())
    }

    /// Park the run at its current step. Only the first error is kept;
    /// returns whether this call set it.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if self.error.is_some() || self.completed {
            return false;
        }
        self.error = Some(message.into());
        true
    }

    /// Mark the terminal step as finished.
    pub fn complete(&mut self) -> Result<(), RunError> {
        self.check_open()?;
        self.completed = true;
        Ok(())
    }

    /// Mutable access to the gathered data, refused once the run is frozen.
    pub fn context_mut(&mut self) -> Result<&mut RunContext, RunError> {
        self.check_open()?;
        Ok(&mut self.context)
    }

    /// Icon for `step` given the run's progress.
    pub fn glyph(&self, step: S) -> StepGlyph {
        if step.covers(self.step) {
            if self.error.is_some() {
                StepGlyph::Failed
            } else if self.completed {
                StepGlyph::Done
            } else {
                StepGlyph::InProgress
            }
        } else if step < self.step {
            StepGlyph::Done
        } else {
            StepGlyph::Pending
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
