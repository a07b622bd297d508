//! View model of the browse page and its plain-text rendering.

use crate::types::{Resource, ResourceId, Tag, TagId};
use std::fmt::{self, Write as _};

pub(crate) const TAGS_TITLE: &str = "Tags";
pub(crate) const LOADING_TAGS: &str = "Retrieving your tags";
pub(crate) const LOADING_RESOURCES: &str = "Retrieving your passwords";
pub(crate) const NO_SEARCH_MATCH: &str =
    "No result match your search. Try with another search term.";
pub(crate) const NO_TAGS: &str =
    "No passwords are yet tagged. It does feel a bit empty here, tag your first password.";
pub(crate) const NO_TAGGED_RESOURCES: &str = "No passwords are marked with this tag yet. \
     Mark a password with this tag or wait for a team member to mark a password with this tag.";
pub(crate) const RETRY_HINT: &str = "Something went wrong while retrieving your data. Try again.";

/// Everything a frontend needs to draw the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Back-link title: the selected tag's slug, or "Tags".
    pub title: String,
    pub body: PageBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
    Loading { message: &'static str },
    Failed { error: String, hint: &'static str },
    Empty { message: &'static str },
    Tags(Vec<TagRow>),
    Resources(Vec<ResourceRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    pub id: TagId,
    pub slug: String,
}

impl From<&Tag> for TagRow {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id.clone(),
            slug: tag.slug.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRow {
    pub id: ResourceId,
    pub name: String,
    pub username: Option<String>,
    pub uri: Option<String>,
}

impl From<&Resource> for ResourceRow {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id.clone(),
            name: resource.name.clone(),
            username: resource.username.clone().filter(|u| !u.is_empty()),
            uri: resource.uri.clone(),
        }
    }
}

impl PageView {
    /// Number of selectable rows in the body.
    pub fn row_count(&self) -> usize {
        match &self.body {
            PageBody::Tags(rows) => rows.len(),
            PageBody::Resources(rows) => rows.len(),
            PageBody::Loading { .. } | PageBody::Failed { .. } | PageBody::Empty { .. } => 0,
        }
    }
}

/// Render the page as numbered text lines, one per row.
pub fn render_page(output: &mut String, view: &PageView) -> fmt::Result {
    writeln!(output, "< {}", view.title)?;

    match &view.body {
        PageBody::Loading { message } => writeln!(output, "  {}...", message)?,
        PageBody::Failed { error, hint } => {
            writeln!(output, "  {}", hint)?;
            writeln!(output, "  ({})", error)?;
        }
        PageBody::Empty { message } => writeln!(output, "  {}", message)?,
        PageBody::Tags(rows) => {
            for (i, row) in rows.iter().enumerate() {
                writeln!(output, "{:>4}. {}", i + 1, row.slug)?;
            }
        }
        PageBody::Resources(rows) => {
            for (i, row) in rows.iter().enumerate() {
                write!(output, "{:>4}. {}", i + 1, row.name)?;
                if let Some(username) = &row.username {
                    write!(output, " ({})", username)?;
                }
                if let Some(uri) = row.uri.as_deref().filter(|u| !u.is_empty()) {
                    write!(output, "  {}", uri)?;
                }
                writeln!(output)?;
            }
        }
    }

    Ok(())
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        render_page(&mut output, self)?;
        f.write_str(&output)
    }
}
