use ratatui::widgets::ListState;

use crate::feed::FeedRecord;
use crate::launch;
use crate::worker::{Command, WorkerMsg};

/// Which part of the screen receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Path,
    Tag,
    List,
}

/// A modal dialog that captures input until dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    /// Save was attempted with an empty tag or path.
    MissingInput,
    /// Waiting for the user to confirm clearing every feed.
    ConfirmClear,
}

/// "1 feed", "3 feeds".
pub fn feed_count(n: usize) -> String {
    if n == 1 {
        "1 feed".to_string()
    } else {
        format!("{n} feeds")
    }
}

pub struct App {
    /// Feeds sorted by tag, case-insensitive.  Mirrors the store
    /// optimistically; it is never re-read after startup.
    pub feeds: Vec<FeedRecord>,
    /// List selection state for scrolling.
    pub list_state: ListState,
    pub path_input: String,
    pub tag_input: String,
    pub focus: Focus,
    pub dialog: Option<Dialog>,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last status message.
    pub status: String,
    base_url: String,
}

impl App {
    pub fn new(base_url: impl Into<String>, mut feeds: Vec<FeedRecord>) -> Self {
        feeds.sort();
        let status = format!("Loaded {}", feed_count(feeds.len()));
        Self {
            feeds,
            list_state: ListState::default(),
            path_input: String::new(),
            tag_input: String::new(),
            focus: Focus::Path,
            dialog: None,
            quit: false,
            status,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -- commands ------------------------------------------------------------

    /// Turn the input fields into a saved feed.
    ///
    /// Empty tag or path opens [`Dialog::MissingInput`] and issues nothing.
    /// Otherwise the local list is updated immediately (replacing any feed
    /// with the same tag), the inputs are cleared and the save command is
    /// returned for the worker.
    pub fn save_draft(&mut self) -> Option<Command> {
        if self.tag_input.is_empty() || self.path_input.is_empty() {
            self.dialog = Some(Dialog::MissingInput);
            return None;
        }

        let feed = FeedRecord::new(
            std::mem::take(&mut self.tag_input),
            std::mem::take(&mut self.path_input),
        );
        self.upsert(feed.clone());
        self.focus = Focus::Path;
        self.status = format!("Saving \"{}\"…", feed.tag);
        Some(Command::Save(feed))
    }

    fn upsert(&mut self, feed: FeedRecord) {
        self.feeds.retain(|f| f.tag != feed.tag);
        self.feeds.push(feed);
        self.feeds.sort();
    }

    /// Copy the selected feed into the input fields for editing.
    pub fn edit_selected(&mut self) {
        if let Some(feed) = self.selected_feed().cloned() {
            self.tag_input = feed.tag;
            self.path_input = feed.path;
            self.focus = Focus::Path;
        }
    }

    pub fn remove_selected(&mut self) -> Option<Command> {
        let index = self.list_state.selected()?;
        if index >= self.feeds.len() {
            return None;
        }

        let feed = self.feeds.remove(index);
        if self.feeds.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(index.min(self.feeds.len() - 1)));
        }
        self.status = format!("Removing \"{}\"…", feed.tag);
        Some(Command::Remove(feed))
    }

    pub fn request_clear_all(&mut self) {
        self.dialog = Some(Dialog::ConfirmClear);
    }

    pub fn confirm_clear_all(&mut self) -> Command {
        self.dialog = None;
        self.feeds.clear();
        self.list_state.select(None);
        self.status = "Clearing all feeds…".into();
        Command::ClearAll
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    /// Record the outcome of a background command.
    ///
    /// Failures are only reported; the optimistic local change stays.
    pub fn apply(&mut self, msg: &WorkerMsg) {
        self.status = msg.status();
    }

    // -- selection -----------------------------------------------------------

    pub fn selected_feed(&self) -> Option<&FeedRecord> {
        self.list_state.selected().and_then(|i| self.feeds.get(i))
    }

    /// URL for the selected feed, ready to hand to the launcher.
    pub fn selected_url(&self) -> Option<String> {
        self.selected_feed()
            .map(|feed| launch::feed_url(&self.base_url, feed))
    }

    // -- text input ----------------------------------------------------------

    fn focused_input(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Path => Some(&mut self.path_input),
            Focus::Tag => Some(&mut self.tag_input),
            Focus::List => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(input) = self.focused_input() {
            input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(input) = self.focused_input() {
            input.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Path => Focus::Tag,
            Focus::Tag => Focus::List,
            Focus::List => Focus::Path,
        };
        self.enter_list();
    }

    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            Focus::Path => Focus::List,
            Focus::Tag => Focus::Path,
            Focus::List => Focus::Tag,
        };
        self.enter_list();
    }

    /// Move focus to the list, selecting the first feed if none is.
    pub fn focus_list(&mut self) {
        self.focus = Focus::List;
        self.enter_list();
    }

    fn enter_list(&mut self) {
        if self.focus == Focus::List && self.list_state.selected().is_none() {
            self.select_first();
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.feeds.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.feeds.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.feeds.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.feeds.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.feeds.is_empty() {
            self.list_state.select(Some(self.feeds.len() - 1));
        }
    }
}
