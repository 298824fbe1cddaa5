//! Journal store.
//!
//! Wraps a `KvStore` and keeps the working text of the journal. Only `save`
//! and `clear` touch storage; every operation posts a notice on the board
//! except a declined `clear`.

use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone};
use tracing::{debug, info, warn};

use sleepyhead_types::error::JournalError;
use sleepyhead_types::notice::Notice;

use crate::notice::NoticeBoard;
use crate::storage::kv_store::KvStore;

use super::export::{self, JournalExport};
use super::ports::{Confirm, Printer};

/// Storage key holding the journal text.
pub const JOURNAL_KEY: &str = "savedThought";

/// Prompt shown before clearing a non-empty journal.
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear your thought?";

/// The single-slot thought journal.
pub struct JournalStore<K: KvStore> {
    kv: K,
    text: String,
    notices: NoticeBoard,
}

impl<K: KvStore> JournalStore<K> {
    /// Create the store and load any previously saved text.
    pub async fn load(kv: K, notice_ttl: Duration) -> Result<Self, JournalError> {
        let text = kv.get(JOURNAL_KEY).await?.unwrap_or_default();
        debug!(chars = export::char_count(&text), "Journal loaded");

        Ok(Self {
            kv,
            text,
            notices: NoticeBoard::new(notice_ttl),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the working text. Nothing is persisted until `save`.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn char_count(&self) -> usize {
        export::char_count(&self.text)
    }

    /// The notice visible right now, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.current(Instant::now())
    }

    fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.show(notice, Instant::now());
    }

    fn reject_empty(&mut self, message: &str) -> JournalError {
        self.notify(Notice::error(message));
        JournalError::EmptyInput
    }

    /// Persist the working text verbatim.
    pub async fn save(&mut self) -> Result<(), JournalError> {
        if !self.has_content() {
            return Err(self.reject_empty("Please write something before saving!"));
        }

        let stored = self.kv.set(JOURNAL_KEY, &self.text).await;
        if let Err(e) = stored {
            warn!(error = %e, "Failed to save journal");
            self.notify(Notice::error("Could not save your thought."));
            return Err(e.into());
        }

        info!(chars = self.char_count(), "Journal saved");
        self.notify(Notice::success("Thought saved successfully! 💭"));
        Ok(())
    }

    /// Render the export document. Does not change the text or storage.
    pub fn export<Tz>(&mut self, now: &DateTime<Tz>) -> Result<JournalExport, JournalError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if !self.has_content() {
            return Err(self.reject_empty("Nothing to export!"));
        }

        let rendered = export::render(&self.text, now);
        self.notify(Notice::success("Exported successfully! 📄"));
        Ok(rendered)
    }

    /// Empty the journal and remove the stored value.
    ///
    /// Asks `confirm` first only when there is something to lose.
    pub async fn clear(&mut self, confirm: &impl Confirm) -> Result<(), JournalError> {
        if self.has_content() && !confirm.confirm(CLEAR_PROMPT) {
            debug!("Journal clear declined");
            return Err(JournalError::ConfirmationDeclined);
        }

        self.kv.remove(JOURNAL_KEY).await?;
        self.text.clear();

        info!("Journal cleared");
        self.notify(Notice::success("Cleared! 🧹"));
        Ok(())
    }

    /// Send the journal text to `printer`.
    pub async fn print(&mut self, printer: &impl Printer) -> Result<(), JournalError> {
        if !self.has_content() {
            return Err(self.reject_empty("Nothing to print!"));
        }

        printer.print(&self.text).await?;
        Ok(())
    }
}
