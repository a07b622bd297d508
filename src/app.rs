//! Popup session driver: owns the search session, the back stack and the
//! currently mounted page, and executes user commands against them.

use crate::channel::DataChannel;
use crate::config::BrowseConfig;
use crate::error::PageError;
use crate::navigation::{MemoryHistory, Navigator, Route, SearchSession};
use crate::page::BrowsePage;
use crate::render::{PageBody, PageView};
use crate::types::{ResourceId, TagId};
use std::sync::Arc;

/// A user action in the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the search box contents. An empty string clears it.
    Search(String),
    /// Open the tag list from the home view.
    Tags,
    /// Select the n-th (1-based) row of a tag list.
    SelectTag(usize),
    /// Select the n-th (1-based) row of a resource list.
    SelectResource(usize),
    Back,
    Retry,
    Show,
}

/// What the user sees after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The popup's landing view.
    Home,
    /// A browse page.
    Page(PageView),
    /// A resource detail view (rendered elsewhere).
    Resource(ResourceId),
}

/// One open popup. Dropping it discards every remembered search.
pub struct Popup {
    channel: Arc<dyn DataChannel>,
    config: BrowseConfig,
    session: SearchSession,
    history: MemoryHistory,
    page: Option<BrowsePage>,
}

impl std::fmt::Debug for Popup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Popup")
            .field("path", &self.history.current_path())
            .field("query", &self.session.query())
            .field("remembered", &self.session.history().len())
            .finish()
    }
}

impl Popup {
    /// Open the popup on its home view.
    pub fn new(channel: Arc<dyn DataChannel>, config: BrowseConfig) -> Self {
        Self {
            channel,
            config,
            session: SearchSession::new(),
            history: MemoryHistory::new(Route::Home.path()),
            page: None,
        }
    }

    pub const fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn current_path(&self) -> &str {
        self.history.current_path()
    }

    pub const fn page(&self) -> Option<&BrowsePage> {
        self.page.as_ref()
    }

    /// Execute `command` and return the resulting screen.
    pub async fn execute(&mut self, command: Command) -> Result<Screen, PageError> {
        tracing::debug!("Executing {:?} on {}", command, self.current_path());
        match command {
            Command::Search(query) => self.session.set_query(query),
            Command::Tags => {
                if self.page.is_none() {
                    self.history.push(Route::Tags.path(), None);
                    self.remount().await?;
                }
            }
            Command::SelectTag(n) => {
                let tag_id = self.tag_at(n)?;
                let page = self.page.take().ok_or(PageError::Unmounted)?;
                if let Err(e) = page.select_tag(&tag_id, &mut self.session, &mut self.history) {
                    self.page = Some(page);
                    return Err(e);
                }
                self.remount().await?;
            }
            Command::SelectResource(n) => {
                let resource_id = self.resource_at(n)?;
                let page = self.page.take().ok_or(PageError::Unmounted)?;
                if let Err(e) = page.select_resource(&resource_id, &mut self.session, &mut self.history) {
                    self.page = Some(page);
                    return Err(e);
                }
            }
            Command::Back => {
                match self.page.take() {
                    Some(page) => page.go_back(&mut self.session, &mut self.history),
                    None => self.history.go_back(),
                }
                self.remount().await?;
            }
            Command::Retry => {
                if let Some(page) = self.page.as_mut() {
                    let load = page.retry()?;
                    let outcome = load.run(self.channel.as_ref()).await;
                    page.apply(outcome);
                }
            }
            Command::Show => {}
        }
        Ok(self.screen())
    }

    /// The screen for the current state.
    pub fn screen(&self) -> Screen {
        if let Some(page) = &self.page {
            return Screen::Page(page.view(&self.session));
        }
        match Route::parse(self.current_path()) {
            Some(Route::Resource(id)) => Screen::Resource(id),
            _ => Screen::Home,
        }
    }

    /// Mount a page for the current path when it is a browse route, and
    /// run its first load.
    async fn remount(&mut self) -> Result<(), PageError> {
        if let Some(old) = self.page.take() {
            old.unmount();
        }

        match Route::parse(self.current_path()) {
            Some(Route::Tags | Route::TagResources(_)) => {}
            _ => return Ok(()),
        }

        let (mut page, load) = BrowsePage::mount(&mut self.session, &self.history, &self.config)?;
        let outcome = load.run(self.channel.as_ref()).await;
        page.apply(outcome);
        self.page = Some(page);
        Ok(())
    }

    fn tag_at(&self, n: usize) -> Result<TagId, PageError> {
        let view = self.current_view()?;
        match view.body {
            PageBody::Tags(rows) => n
                .checked_sub(1)
                .and_then(|i| rows.into_iter().nth(i))
                .map(|row| row.id)
                .ok_or(PageError::NoSuchRow(n)),
            _ => Err(PageError::NoSuchRow(n)),
        }
    }

    fn resource_at(&self, n: usize) -> Result<ResourceId, PageError> {
        let view = self.current_view()?;
        match view.body {
            PageBody::Resources(rows) => n
                .checked_sub(1)
                .and_then(|i| rows.into_iter().nth(i))
                .map(|row| row.id)
                .ok_or(PageError::NoSuchRow(n)),
            _ => Err(PageError::NoSuchRow(n)),
        }
    }

    fn current_view(&self) -> Result<PageView, PageError> {
        self.page
            .as_ref()
            .map(|page| page.view(&self.session))
            .ok_or(PageError::Unmounted)
    }
}

impl Drop for Popup {
    fn drop(&mut self) {
        tracing::debug!(
            "Closing popup, forgetting {} remembered searches",
            self.session.history().len()
        );
    }
}
