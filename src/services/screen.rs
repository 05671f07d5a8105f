use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::ResourceApi;
use crate::error::AppError;
use crate::listing::{ListState, ListView};
use crate::models::Resource;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenStatus {
    Idle,
    Ready,
    Failed(String),
}

/// Blocking yes/no prompt shown before a delete.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// One entity's working set, list inputs and fetch/mutate cycle.
///
/// After an authorization failure the screen is halted: every action
/// returns [`AppError::Halted`] without touching the network until
/// [`Screen::remount`] is called.
pub struct Screen<R: Resource> {
    api: Arc<dyn ResourceApi<R>>,
    session: Arc<dyn SessionStore>,
    records: Vec<R>,
    list: ListState,
    status: ScreenStatus,
    halted: bool,
    notifications: Vec<Notification>,
}

impl<R: Resource> Screen<R> {
    pub fn new(api: Arc<dyn ResourceApi<R>>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            session,
            records: Vec::new(),
            list: ListState::new(),
            status: ScreenStatus::Idle,
            halted: false,
            notifications: Vec::new(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn find(&self, id: i64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn status(&self) -> &ScreenStatus {
        &self.status
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn list_state(&self) -> &ListState {
        &self.list
    }

    pub fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list
    }

    pub fn view(&self) -> ListView<'_, R> {
        self.list.apply(&self.records)
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Drops all state, as if the screen had been closed and reopened.
    pub fn remount(&mut self) {
        self.records.clear();
        self.list = ListState::new();
        self.status = ScreenStatus::Idle;
        self.halted = false;
        self.notifications.clear();
    }

    pub async fn load(&mut self) -> Result<(), AppError> {
        self.ensure_active()?;
        self.fetch().await
    }

    pub async fn create(&mut self, draft: R::Draft) -> Result<Option<R>, AppError> {
        self.ensure_active()?;
        let draft = R::prepare_draft(draft, true)?;
        self.ensure_token()?;

        let created = match self.api.create(&draft).await {
            Ok(created) => created,
            Err(e) => return Err(self.action_failed(e, "create")),
        };
        self.notify(
            format!("{} created successfully.", capitalize(R::NOUN)),
            Severity::Success,
        );
        self.refresh().await;
        Ok(created)
    }

    pub async fn update(&mut self, id: i64, draft: R::Draft) -> Result<Option<R>, AppError> {
        self.ensure_active()?;
        let draft = R::prepare_draft(draft, false)?;
        self.ensure_token()?;

        let updated = match self.api.update(id, &draft).await {
            Ok(updated) => updated,
            Err(e) => return Err(self.action_failed(e, "update")),
        };
        self.notify(
            format!("{} with ID {} updated successfully.", capitalize(R::NOUN), id),
            Severity::Success,
        );
        self.refresh().await;
        Ok(updated)
    }

    /// Returns `Ok(false)` when the operator declines the prompt; no
    /// request is made in that case.
    pub async fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> Result<bool, AppError> {
        self.ensure_active()?;
        let prompt = format!("Are you sure you want to delete this {}?", R::NOUN);
        if !confirm.confirm(&prompt) {
            return Ok(false);
        }
        self.ensure_token()?;

        if let Err(e) = self.api.delete(id).await {
            return Err(self.action_failed(e, "delete"));
        }
        self.records.retain(|r| r.id() != id);
        self.notify(
            format!("{} with ID {} deleted successfully.", capitalize(R::NOUN), id),
            Severity::Success,
        );
        self.refresh().await;
        Ok(true)
    }

    async fn fetch(&mut self) -> Result<(), AppError> {
        if let Err(e) = self.session.token() {
            return Err(self.load_failed(e));
        }
        match self.api.list().await {
            Ok(records) => {
                info!("{} screen loaded {} records", R::TITLE, records.len());
                self.records = records;
                self.status = ScreenStatus::Ready;
                Ok(())
            }
            Err(e) => Err(self.load_failed(e)),
        }
    }

    /// Re-fetch after an accepted mutation. A failure here lands in the
    /// status and notifications only; the mutation itself stands.
    async fn refresh(&mut self) {
        if let Err(e) = self.fetch().await {
            debug!("{} refresh after mutation failed: {}", R::TITLE, e);
        }
    }

    fn ensure_active(&self) -> Result<(), AppError> {
        if self.halted {
            return Err(AppError::Halted);
        }
        Ok(())
    }

    fn ensure_token(&mut self) -> Result<(), AppError> {
        match self.session.token() {
            Ok(_) => Ok(()),
            Err(e) => Err(self.action_failed(e, "authorize")),
        }
    }

    fn load_failed(&mut self, err: AppError) -> AppError {
        warn!("Failed to fetch {}: {}", R::TITLE, err);
        let message = match &err {
            AppError::MissingToken => err.to_string(),
            AppError::Unauthorized(_) => format!(
                "Not authorized to view {}. Please log in again.",
                R::TITLE.to_lowercase()
            ),
            _ => format!(
                "Failed to fetch {}. Check your token or network.",
                R::TITLE.to_lowercase()
            ),
        };
        if err.is_auth() {
            self.halted = true;
        }
        self.status = ScreenStatus::Failed(message.clone());
        self.notify(message, Severity::Error);
        err
    }

    fn action_failed(&mut self, err: AppError, action: &str) -> AppError {
        warn!("Failed to {} {}: {}", action, R::NOUN, err);
        if err.is_auth() {
            self.halted = true;
            self.status = ScreenStatus::Failed(err.to_string());
        }
        let message = match &err {
            AppError::Api { message, .. } if !message.is_empty() => message.clone(),
            AppError::MissingToken | AppError::Unauthorized(_) => err.to_string(),
            _ => format!("Failed to {} {}. Please try again.", action, R::NOUN),
        };
        self.notify(message, Severity::Error);
        err
    }

    fn notify(&mut self, message: String, severity: Severity) {
        self.notifications.push(Notification { message, severity });
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
