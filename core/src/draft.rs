//! The pending-creation form.
//!
//! A draft is never persisted. Priority input is coerced rather than
//! rejected; due-date input is parsed and an unreadable value leaves the
//! previous date in place.

use chrono::{Local, NaiveDate};

use crate::error::DraftError;
use crate::types::{due_date, NewTodo, Priority, Status};

/// Today's date in the local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    due_date: NaiveDate,
    priority: Priority,
}

impl TodoDraft {
    /// An empty draft due on `today` with low priority.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: today,
            priority: Priority::Low,
        }
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_due_date(&mut self, input: &str) -> Result<(), DraftError> {
        self.due_date = due_date::parse(input).ok_or_else(|| DraftError::InvalidDueDate(input.to_string()))?;
        Ok(())
    }

    pub fn set_priority(&mut self, input: &str) {
        self.priority = Priority::coerce(input);
    }

    /// Required-field check, then the create payload. New todos always
    /// start out not finished.
    pub fn to_new_todo(&self) -> Result<NewTodo, DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(DraftError::MissingField("description"));
        }
        Ok(NewTodo {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
            status: Status::NotFinished,
        })
    }
}

impl Default for TodoDraft {
    fn default() -> Self {
        Self::new(local_today())
    }
}
