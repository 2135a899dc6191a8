//! Editing session: live highlighting plus debounced validation.
//!
//! Edits re-lex the touched lines immediately and push the validation
//! deadline back. The host calls [`Session::poll`] from its event loop;
//! once the user has been idle for the configured wait, the document is
//! validated and the outcome is returned.

use std::ops::Range;
use std::time::Duration;

use crate::Error;
use crate::config::SessionConfig;
use crate::diagnostic::{Marker, to_markers};
use crate::document::Highlighter;
use crate::schedule::{Clock, Debouncer, SystemClock};
use crate::theme::{Style, ThemeMode, style_for};
use crate::token::TokenKind;
use crate::validate::Validator;

/// One editable document with its highlighter, scheduler, and markers.
pub struct Session<V, C = SystemClock> {
    document: Highlighter,
    /// Pending validation, keyed by document revision.
    scheduler: Debouncer<u64, C>,
    validator: V,
    markers: Vec<Marker>,
    mode: ThemeMode,
}

impl<V: Validator> Session<V> {
    #[must_use]
    pub fn new(config: SessionConfig, validator: V) -> Self {
        Self::with_clock(config, validator, SystemClock)
    }
}

impl<V: Validator, C: Clock> Session<V, C> {
    #[must_use]
    pub fn with_clock(config: SessionConfig, validator: V, clock: C) -> Self {
        Self {
            document: Highlighter::default(),
            scheduler: Debouncer::with_clock(config.wait, clock),
            validator,
            markers: Vec::new(),
            mode: config.mode,
        }
    }

    /// Replace the whole text.
    pub fn set_text(&mut self, text: &str) {
        self.document.set_text(text);
        self.schedule();
    }

    /// Replace one line, or several when `text` contains `\n`; returns
    /// the lines that were re-lexed.
    pub fn replace_line(&mut self, index: usize, text: &str) -> Result<Range<usize>, Error> {
        let relexed = self.document.replace_line(index, text)?;
        self.schedule();
        Ok(relexed)
    }

    pub fn insert_line(&mut self, index: usize, text: &str) -> Result<Range<usize>, Error> {
        let relexed = self.document.insert_line(index, text)?;
        self.schedule();
        Ok(relexed)
    }

    pub fn remove_line(&mut self, index: usize) -> Result<Range<usize>, Error> {
        let relexed = self.document.remove_line(index)?;
        self.schedule();
        Ok(relexed)
    }

    /// Validate if the quiet period has passed.
    ///
    /// Returns `None` when nothing was due. Otherwise returns the new
    /// markers (empty when the document is valid), or the failure when
    /// the validator reported an error without a position. The stored
    /// markers are left as they were in that case.
    pub fn poll(&mut self) -> Option<Result<Vec<Marker>, Error>> {
        let revision = self.scheduler.take_due()?;
        let text = self.document.text();
        let outcome = match self.validator.validate(&text) {
            Ok(()) => Ok(Vec::new()),
            Err(error) => to_markers(&error),
        };
        match &outcome {
            Ok(markers) => {
                tracing::debug!(revision, markers = markers.len(), "validation finished");
                self.markers.clone_from(markers);
            }
            Err(err) => tracing::warn!(revision, %err, "validation failed without a position"),
        }
        Some(outcome)
    }

    /// Time until the pending validation is due.
    #[must_use]
    pub fn time_until_due(&self) -> Option<Duration> {
        self.scheduler.time_until_due()
    }

    #[must_use]
    pub const fn is_validation_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Markers from the last positioned validation result.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub const fn document(&self) -> &Highlighter {
        &self.document
    }

    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub const fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    #[must_use]
    pub const fn style_for(&self, kind: TokenKind) -> Style {
        style_for(kind, self.mode)
    }

    fn schedule(&mut self) {
        let revision = self.document.revision();
        self.scheduler.call(revision);
        tracing::trace!(revision, "validation scheduled");
    }
}
