//! Computes the records a list view should currently display.
//!
//! The pipeline is tokenize → sort → filter → cap. Sorting runs whether or not
//! a query is active so unfiltered browsing is alphabetical too. All steps are
//! synchronous, so the displayed set always reflects the latest query.

use super::matcher::{Searchable, matches};
use super::sort::{limit, sort_alphabetically};
use super::tokenize::tokenize;
use crate::config::DisplayLimits;

/// What a list view should render for a given collection and query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Displayed<'a, T> {
    /// The collection has not been fetched yet.
    NotReady,
    /// Nothing to show. `searching` is true when the query produced terms.
    Empty { searching: bool },
    /// Records to render, sorted and capped.
    Records(Vec<&'a T>),
}

impl<'a, T> Displayed<'a, T> {
    pub const fn is_ready(&self) -> bool {
        !matches!(self, Self::NotReady)
    }

    pub fn records(&self) -> &[&'a T] {
        match self {
            Self::Records(records) => records,
            Self::NotReady | Self::Empty { .. } => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Stateless filter engine parameterized by the display limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchFilterEngine {
    limits: DisplayLimits,
}

impl SearchFilterEngine {
    pub const fn new(limits: DisplayLimits) -> Self {
        Self { limits }
    }

    /// Answer "what should be displayed" for `fetched` under `query`.
    ///
    /// `None` means the fetch is still in flight. The input slice is never
    /// reordered; the result borrows from it.
    pub fn compute_displayed<'a, T: Searchable>(
        &self,
        fetched: Option<&'a [T]>,
        query: &str,
    ) -> Displayed<'a, T> {
        let Some(fetched) = fetched else {
            return Displayed::NotReady;
        };

        let terms = tokenize(query);
        let searching = !terms.is_empty();

        let mut ordered: Vec<&T> = fetched.iter().collect();
        sort_alphabetically(&mut ordered, |record| record.sort_key());

        if searching {
            ordered.retain(|record| matches(*record, &terms));
        }

        let kind = T::KIND;
        let cap = self.limits.for_kind(kind);
        let matched = ordered.len();
        let displayed = limit(ordered, cap);

        tracing::trace!(
            kind = %kind,
            fetched = fetched.len(),
            matched,
            displayed = displayed.len(),
            terms = terms.len(),
            "Computed displayed records"
        );

        if displayed.is_empty() {
            Displayed::Empty { searching }
        } else {
            Displayed::Records(displayed)
        }
    }
}
