//! Interface state: game mode, camera, loaded map extents, screen buffer.

use worldview_types::{CellCoord, TileCoord};

use crate::raws::PaletteColor;

/// Which game mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Fortress management.
    #[default]
    Fortress,
    /// Single-character adventure.
    Adventure,
}

/// Camera and cursor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewState {
    /// Top-left tile of the view.
    pub pos: TileCoord,
    /// View width in tiles.
    pub size_x: i32,
    /// View height in tiles.
    pub size_y: i32,
    /// Cursor position, `None` when hidden.
    pub cursor: Option<TileCoord>,
    /// Followed unit id, `-1` for none.
    pub follow_unit: i32,
    /// Followed item id, `-1` for none.
    pub follow_item: i32,
    /// Macro-region under the embark cursor, when the embark screen is up.
    pub embark_region: Option<(i32, i32)>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pos: TileCoord::default(),
            size_x: 80,
            size_y: 25,
            cursor: None,
            follow_unit: -1,
            follow_item: -1,
            embark_region: None,
        }
    }
}

/// One character cell of the interface screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenCell {
    /// Glyph.
    pub ch: u8,
    /// Foreground and background colour.
    pub color: PaletteColor,
}

/// RGB channels in `0.0..=1.0` for each of the 16 palette entries.
pub type Palette = [[f32; 3]; 16];

/// The stock 16-colour console palette.
pub const DEFAULT_PALETTE: Palette = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 0.5],
    [0.0, 0.5, 0.0],
    [0.0, 0.5, 0.5],
    [0.5, 0.0, 0.0],
    [0.5, 0.0, 0.5],
    [0.5, 0.5, 0.0],
    [0.75, 0.75, 0.75],
    [0.5, 0.5, 0.5],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
    [1.0, 1.0, 1.0],
];

/// The interface screen, stored column-major (`x * height + y`).
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    width: u32,
    height: u32,
    cells: Vec<ScreenCell>,
    palette: Palette,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Screen {
    /// Blank screen.
    pub fn new(width: u32, height: u32) -> Self {
        let len = usize::try_from(u64::from(width).saturating_mul(u64::from(height))).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![ScreenCell::default(); len],
            palette: DEFAULT_PALETTE,
        }
    }

    /// Colour palette used to render palette indices.
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replace the palette.
    pub const fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Width in characters.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in characters.
    pub const fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = u64::from(x)
            .checked_mul(u64::from(self.height))?
            .checked_add(u64::from(y))?;
        usize::try_from(i).ok()
    }

    /// Cell at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Option<ScreenCell> {
        self.index(x, y).and_then(|i| self.cells.get(i).copied())
    }

    /// Overwrite the cell at `(x, y)`. Out-of-range writes are ignored.
    pub fn put(&mut self, x: u32, y: u32, cell: ScreenCell) {
        if let Some(slot) = self.index(x, y).and_then(|i| self.cells.get_mut(i)) {
            *slot = cell;
        }
    }

    /// Write a string starting at `(x, y)`, clipped at the right edge.
    pub fn print(&mut self, x: u32, y: u32, text: &str, color: PaletteColor) {
        for (dx, ch) in (0_u32..).zip(text.bytes()) {
            let Some(cx) = x.checked_add(dx) else { break };
            self.put(cx, y, ScreenCell { ch, color });
        }
    }

    /// Cells in storage order.
    pub fn cells(&self) -> &[ScreenCell] {
        &self.cells
    }
}

/// Extent of the loaded local map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MapExtent {
    /// Size in cells along x.
    pub size_x: i32,
    /// Size in cells along y.
    pub size_y: i32,
    /// Number of levels.
    pub size_z: i32,
    /// Map origin in world cell coordinates.
    pub origin: CellCoord,
    /// Save folder name.
    pub save_name: String,
}

impl MapExtent {
    /// `true` if the cell lies inside the map.
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.z >= 0
            && cell.x < self.size_x
            && cell.y < self.size_y
            && cell.z < self.size_z
    }
}
