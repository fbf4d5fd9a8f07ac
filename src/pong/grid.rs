//! Cup grids for both sides of the table.

use super::format::{Format, FormatCatalog};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which side of the table a grid belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The local player's cups.
    #[display("mine")]
    Mine,
    /// The opponent's cups (the targets).
    #[display("theirs")]
    Theirs,
}

/// One cup position in a rendered grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct CupSlot {
    side: Side,
    name: String,
    alive: bool,
    pending: bool,
}

impl CupSlot {
    /// Side of the table.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Cup label from the format layout.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cup is still on the table.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// A previous hit on this cup awaits confirmation. Opponent side only.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Alive and not pending: can be marked as a new hit.
    pub fn is_normal_target(&self) -> bool {
        self.alive && !self.pending
    }
}

/// A rendered grid: rows of slots in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CupGrid {
    side: Side,
    format: Format,
    rows: Vec<Vec<CupSlot>>,
}

impl CupGrid {
    /// Builds the grid for one side.
    ///
    /// `active` lists the cups still on the table; `None` treats every cup
    /// as alive. Only alive cups listed in `pending` are flagged; on
    /// [`Side::Mine`] the flag marks a pending loss. The mine side is rendered with the catalog
    /// rows reversed so its base is nearest the viewer.
    #[instrument(skip(active, pending))]
    pub fn render(format: Format, active: Option<&[String]>, side: Side, pending: &[String]) -> Self {
        let layout = FormatCatalog::layout_for(format);

        let build_row = |row: &&[&str]| -> Vec<CupSlot> {
            row.iter()
                .map(|&name| {
                    let alive = active.is_none_or(|list| list.iter().any(|c| c == name));
                    let pending = alive && pending.iter().any(|c| c == name);
                    CupSlot::new(side, name.to_string(), alive, pending)
                })
                .collect()
        };

        let rows: Vec<Vec<CupSlot>> = match side {
            Side::Theirs => layout.iter().map(build_row).collect(),
            Side::Mine => layout.iter().rev().map(build_row).collect(),
        };

        let grid = Self { side, format, rows };
        debug!(
            alive = grid.alive_count(),
            pending = grid.pending_count(),
            speculative = active.is_none(),
            "Rendered cup grid"
        );
        grid
    }

    /// An empty opponent grid.
    pub fn empty(side: Side) -> Self {
        Self {
            side,
            format: Format::Pyramid,
            rows: Vec::new(),
        }
    }

    /// Side of the table.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Format the grid was rendered with.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Rows in display order.
    pub fn rows(&self) -> &[Vec<CupSlot>] {
        &self.rows
    }

    /// All slots in display order.
    pub fn slots(&self) -> impl Iterator<Item = &CupSlot> {
        self.rows.iter().flatten()
    }

    /// Looks up a slot by cup name.
    pub fn slot(&self, name: &str) -> Option<&CupSlot> {
        self.slots().find(|s| s.name == name)
    }

    /// Cups still on the table.
    pub fn alive_count(&self) -> usize {
        self.slots().filter(|s| s.alive).count()
    }

    /// Alive cups awaiting re-hit confirmation.
    pub fn pending_count(&self) -> usize {
        self.slots().filter(|s| s.pending).count()
    }

    /// Alive cups that can be marked as new hits.
    pub fn selectable_normal_count(&self) -> usize {
        self.slots().filter(|s| s.is_normal_target()).count()
    }

    /// Every remaining cup is pending.
    pub fn all_pending(&self) -> bool {
        let alive = self.alive_count();
        alive > 0 && alive == self.pending_count()
    }

    /// Formats the grid as text: `o` alive, `?` pending, `.` eliminated.
    pub fn display(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|slot| {
                        let mark = if !slot.alive {
                            '.'
                        } else if slot.pending {
                            '?'
                        } else {
                            'o'
                        };
                        format!("[{} {}]", mark, slot.name)
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Both grids of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CupGridModel {
    mine: CupGrid,
    theirs: CupGrid,
}

impl CupGridModel {
    /// Wraps two rendered grids.
    pub fn new(mine: CupGrid, theirs: CupGrid) -> Self {
        Self { mine, theirs }
    }

    /// The local player's grid.
    pub fn mine(&self) -> &CupGrid {
        &self.mine
    }

    /// The opponent's grid.
    pub fn theirs(&self) -> &CupGrid {
        &self.theirs
    }

    /// Opponent cups still on the table.
    pub fn alive_opponent_count(&self) -> usize {
        self.theirs.alive_count()
    }

    /// Opponent cups awaiting re-hit confirmation.
    pub fn pending_opponent_count(&self) -> usize {
        self.theirs.pending_count()
    }
}
