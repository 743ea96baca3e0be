// SPDX-License-Identifier: Apache-2.0

use crate::mapper::{map_row, map_row_from_pairs, ColumnMap, MapError};
use crate::shape::{FieldDescriptor, RowShape};
use maud::Markup;
use relief_model::{Cell, RawRow};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

type RenderFn<R> = Box<dyn Fn(&R) -> Markup + Send + Sync>;

/// A card kind: the row shape it reads and the function rendering one row.
pub struct Card<R> {
    name: String,
    shape: RowShape<R>,
    render: RenderFn<R>,
}

impl<R: Default> Card<R> {
    pub fn new(
        name: impl Into<String>,
        shape: RowShape<R>,
        render: impl Fn(&R) -> Markup + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            shape,
            render: Box::new(render),
        }
    }

    #[must_use]
    pub fn shape(&self) -> &RowShape<R> {
        &self.shape
    }

    pub fn parse(&self, raw: &[Option<Cell>], columns: &ColumnMap) -> Result<R, MapError> {
        map_row(&self.shape, raw, columns)
    }

    pub fn parse_pairs(&self, flat: &[Option<Cell>]) -> Result<R, MapError> {
        map_row_from_pairs(&self.shape, flat)
    }

    #[must_use]
    pub fn render(&self, row: &R) -> Markup {
        (self.render)(row)
    }
}

#[derive(Debug)]
pub struct SkippedRow {
    pub index: usize,
    pub error: MapError,
}

/// Cards rendered from a batch of rows, plus the rows that failed to map.
#[derive(Debug, Default)]
pub struct RenderedRows {
    pub cards: Vec<Markup>,
    pub skipped: Vec<SkippedRow>,
}

/// Object-safe view of a [`Card`] so kinds with different row types can
/// share one registry. Rows never leave the card untyped.
pub trait CardType: Send + Sync {
    fn name(&self) -> &str;

    fn shape_name(&self) -> &'static str;

    fn fields(&self) -> Vec<FieldDescriptor>;

    fn render_row(&self, raw: &[Option<Cell>], columns: &ColumnMap) -> Result<Markup, MapError>;

    fn render_pairs(&self, flat: &[Option<Cell>]) -> Result<Markup, MapError>;

    /// Renders every row that maps cleanly; failures are collected, not fatal.
    fn render_rows(&self, rows: &[RawRow], columns: &ColumnMap) -> RenderedRows {
        let mut out = RenderedRows::default();
        for (index, raw) in rows.iter().enumerate() {
            match self.render_row(raw, columns) {
                Ok(card) => out.cards.push(card),
                Err(error) => {
                    warn!(card = self.name(), row = index, error = %error, "row skipped");
                    out.skipped.push(SkippedRow { index, error });
                }
            }
        }
        out
    }
}

impl<R: Default + Send + Sync + 'static> CardType for Card<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn shape_name(&self) -> &'static str {
        self.shape.name()
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        self.shape.describe()
    }

    fn render_row(&self, raw: &[Option<Cell>], columns: &ColumnMap) -> Result<Markup, MapError> {
        self.parse(raw, columns).map(|row| self.render(&row))
    }

    fn render_pairs(&self, flat: &[Option<Cell>]) -> Result<Markup, MapError> {
        self.parse_pairs(flat).map(|row| self.render(&row))
    }
}

/// Card kinds by component name. Built once at startup, then shared
/// read-only.
#[derive(Default, Clone)]
pub struct CardRegistry {
    entries: HashMap<String, Arc<dyn CardType>>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four company-list card kinds.
    #[must_use]
    pub fn with_builtin_cards() -> Self {
        let mut registry = Self::new();
        crate::cards::register_builtin(&mut registry);
        registry
    }

    /// Stores `shape` and `render` under `name`, replacing any earlier entry.
    pub fn register<R: Default + Send + Sync + 'static>(
        &mut self,
        name: &str,
        shape: RowShape<R>,
        render: impl Fn(&R) -> Markup + Send + Sync + 'static,
    ) -> &mut Self {
        self.insert(Arc::new(Card::new(name, shape, render)))
    }

    pub fn insert(&mut self, card: Arc<dyn CardType>) -> &mut Self {
        let name = card.name().to_string();
        if self.entries.insert(name.clone(), card).is_some() {
            debug!(card = %name, "card registration replaced an existing entry");
        }
        self
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&dyn CardType> {
        self.entries.get(name).map(|card| &**card)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for CardRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardRegistry")
            .field("cards", &self.names())
            .finish()
    }
}
