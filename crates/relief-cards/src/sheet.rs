// SPDX-License-Identifier: Apache-2.0

use crate::components::row_card_container;
use crate::mapper::ColumnMap;
use crate::registry::{CardType, SkippedRow};
use maud::Markup;
use relief_model::RawRow;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no rows in range")]
pub struct EmptySheet;

/// A rendered tab: the card container plus per-row outcomes.
#[derive(Debug)]
pub struct SheetRender {
    pub markup: Markup,
    pub rendered: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Renders `data` (header row first) as a container of `card` entries.
pub fn render_sheet(card: &dyn CardType, data: &[RawRow]) -> Result<SheetRender, EmptySheet> {
    let (header, rows) = data.split_first().ok_or(EmptySheet)?;
    let columns = ColumnMap::from_header(header);
    debug!(card = card.name(), columns = columns.len(), rows = rows.len(), "rendering sheet");
    let rendered = card.render_rows(rows, &columns);
    Ok(SheetRender {
        rendered: rendered.cards.len(),
        markup: row_card_container(&rendered.cards),
        skipped: rendered.skipped,
    })
}
