//! ASCII rendering of the ring: per-tick frames, tick headers, and the
//! startup legend.
//!
//! Everything here is a pure function of a [`RingSnapshot`] or a
//! [`TickReport`]; nothing reaches back into the engine.

use relay_core::engine::TickReport;
use relay_types::{Polarity, Position, RingSnapshot, TickEvent};

/// Canvas height in rows.
const CANVAS_ROWS: usize = 13;
/// Canvas width in columns.
const CANVAS_COLS: usize = 28;
/// Row where the `DIR=` travel label renders.
const DIRECTION_ROW: usize = 11;

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Fixed-size character grid with bounds-checked writes.
struct Canvas {
    cells: [[char; CANVAS_COLS]; CANVAS_ROWS],
}

impl Canvas {
    const fn new() -> Self {
        Self {
            cells: [[' '; CANVAS_COLS]; CANVAS_ROWS],
        }
    }

    /// Writes one character; coordinates off the grid are ignored.
    fn put(&mut self, row: usize, col: usize, glyph: char) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            *cell = glyph;
        }
    }

    fn put_str(&mut self, row: usize, col: usize, text: &str) {
        for (offset, glyph) in text.chars().enumerate() {
            self.put(row, col.saturating_add(offset), glyph);
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        for (index, row) in self.cells.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.extend(row.iter());
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Glyph tables
// ---------------------------------------------------------------------------

/// Anchor cell (row, column) of each tile's mark on the canvas.
const fn layout(pos: Position) -> (usize, usize) {
    match pos {
        Position::A => (2, 6),
        Position::B => (0, 10),
        Position::C => (2, 14),
        Position::D => (6, 14),
        Position::E => (8, 10),
        Position::F => (6, 6),
    }
}

/// Shadow halo glyph: blank, faint, strong, saturated.
const fn halo_glyph(level: u8) -> char {
    match level {
        0 => ' ',
        1 => '·',
        2 => 'o',
        _ => '*',
    }
}

/// Committed mark: the held polarity, or `0` while the baton is on the tile.
const fn committed_glyph(value: Option<Polarity>) -> char {
    match value {
        Some(polarity) => polarity.glyph(),
        None => '0',
    }
}

/// One tile's mark, e.g. `C:+·[b+]`.
fn tile_mark(snapshot: &RingSnapshot, pos: Position) -> String {
    let committed = committed_glyph(*snapshot.committed.get(pos));
    let halo = halo_glyph(*snapshot.shadows.get(pos));
    let buffer = snapshot.buffers.get(pos).glyph();
    format!("{pos}:{committed}{halo}[b{buffer}]")
}

// ---------------------------------------------------------------------------
// Public surface
// ---------------------------------------------------------------------------

/// Renders one snapshot as a multi-line ring frame.
///
/// Tile marks sit on a rough circle, the baton is flagged with a `B` over a
/// `^` just above its tile (clamped at the top edge), and the travel
/// direction labels the bottom-left corner.
pub fn frame(snapshot: &RingSnapshot) -> String {
    let mut canvas = Canvas::new();

    for pos in Position::ALL {
        let (row, col) = layout(pos);
        canvas.put_str(row, col, &tile_mark(snapshot, pos));
    }

    let (baton_row, baton_col) = layout(snapshot.baton);
    canvas.put(baton_row.saturating_sub(2), baton_col.saturating_add(1), 'B');
    canvas.put(baton_row.saturating_sub(1), baton_col.saturating_add(1), '^');

    canvas.put_str(DIRECTION_ROW, 0, &format!("DIR={}", snapshot.direction));

    canvas.to_text()
}

/// The startup legend, parameterized by the configured hesitation cap.
pub fn legend(hesitation_cap: u8) -> String {
    let mut out = String::new();
    out.push_str("LEGEND\n");
    out.push_str(" Tile:Xh[bY]  -> X=state (+,0,-), h=shadow, bY=buffer sign\n");
    out.push_str(&format!(
        " Shadow levels: ' ' = 0 (none), '·' = 1, 'o' = 2, '*' = 3..{hesitation_cap}\n"
    ));
    out.push_str(" Baton marker: B/^ above tile holding the baton (state 0)\n");
    out.push_str(" DIR= direction of baton travel\n");
    out.push_str(" Occurrence: ARRIVE_C when baton enters C\n");
    out.push_str(" Task: jump once, then act on next ARRIVE_C; repeat via TTL\n");
    out.push_str(" ACT success: mirror pulse -> latch shadows on B & D (neighbors of C)\n");
    out.push_str(
        " ACT fail: hesitation accumulates at C (cap), reverse DIR; after K fails -> PARK H steps and flip buf(C)\n",
    );
    out.push_str(&"-".repeat(72));
    out
}

/// The one-line header printed above each tick's frame.
///
/// Parked ticks read `t=NN (PARK)`; active ticks append the comma-joined
/// event list when one exists.
pub fn tick_header(report: &TickReport) -> String {
    let parked = report
        .events
        .iter()
        .any(|event| matches!(event, TickEvent::Park { .. }));

    let mut header = format!("t={:02}", report.tick);
    if parked {
        header.push_str(" (PARK)");
    } else if !report.events.is_empty() {
        let joined = report
            .events
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        header.push_str(" | ");
        header.push_str(&joined);
    }
    header
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
