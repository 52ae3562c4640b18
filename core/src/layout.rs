use std::fmt;

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// How section offsets are expressed on the moving container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutUnits {
    /// `vw`/`vh`; the browser keeps offsets correct across resizes.
    #[default]
    ViewportPercent,
    /// Pixels computed from the current viewport; recomputed on resize.
    Pixels,
}

impl LayoutUnits {
    pub fn suffixes(self) -> (&'static str, &'static str) {
        match self {
            LayoutUnits::ViewportPercent => ("vw", "vh"),
            LayoutUnits::Pixels => ("px", "px"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
    pub units: LayoutUnits,
}

impl Translation {
    pub fn origin(units: LayoutUnits) -> Self {
        Self { x: 0.0, y: 0.0, units }
    }

    /// CSS `translate(...)` value for this offset.
    pub fn css_translate(&self) -> String {
        let (ux, uy) = self.units.suffixes();
        format!("translate({}{ux}, {}{uy})", self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutSpec {
    /// Sections run along the first row up to `turn_at`, drop one row,
    /// then continue along the second row.
    LShaped { turn_at: usize },
    /// One viewport width per index.
    Row,
    /// Explicit grid cell per section.
    Cells { cells: Vec<GridCell> },
}

pub const DEFAULT_TURN_AT: usize = 2;

impl Default for LayoutSpec {
    fn default() -> Self {
        LayoutSpec::LShaped {
            turn_at: DEFAULT_TURN_AT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    Empty,
    MissingCells { sections: usize, cells: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Empty => write!(f, "layout has no sections"),
            LayoutError::MissingCells { sections, cells } => {
                write!(f, "layout lists {cells} cells for {sections} sections")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

#[derive(Clone, Debug, PartialEq)]
pub struct LayoutTable {
    cells: Vec<GridCell>,
}

impl LayoutTable {
    pub fn build(spec: &LayoutSpec, section_count: usize) -> Result<Self, LayoutError> {
        if section_count == 0 {
            return Err(LayoutError::Empty);
        }
        let cells = match spec {
            LayoutSpec::LShaped { turn_at } => l_shaped_cells(section_count, *turn_at),
            LayoutSpec::Row => (0..section_count)
                .map(|idx| GridCell::new(idx as i32, 0))
                .collect(),
            LayoutSpec::Cells { cells } => {
                if cells.len() < section_count {
                    return Err(LayoutError::MissingCells {
                        sections: section_count,
                        cells: cells.len(),
                    });
                }
                cells[..section_count].to_vec()
            }
        };
        Ok(Self { cells })
    }

    pub fn cell(&self, index: usize) -> Option<GridCell> {
        self.cells.get(index).copied()
    }

    /// Where section `index` sits inside the moving container.
    pub fn section_origin(
        &self,
        index: usize,
        units: LayoutUnits,
        viewport: Viewport,
    ) -> Option<Translation> {
        let cell = self.cell(index)?;
        let (w, h) = unit_extent(units, viewport);
        Some(Translation {
            x: f64::from(cell.col) * w,
            y: f64::from(cell.row) * h,
            units,
        })
    }

    /// Container translation that brings section `index` into view.
    pub fn container_offset(
        &self,
        index: usize,
        units: LayoutUnits,
        viewport: Viewport,
    ) -> Option<Translation> {
        self.section_origin(index, units, viewport)
            .map(|origin| Translation {
                x: -origin.x,
                y: -origin.y,
                units,
            })
    }

    pub fn section_origins(&self, units: LayoutUnits, viewport: Viewport) -> Vec<Translation> {
        (0..self.cells.len())
            .filter_map(|idx| self.section_origin(idx, units, viewport))
            .collect()
    }
}

fn unit_extent(units: LayoutUnits, viewport: Viewport) -> (f64, f64) {
    match units {
        LayoutUnits::ViewportPercent => (100.0, 100.0),
        LayoutUnits::Pixels => (viewport.width.max(0.0), viewport.height.max(0.0)),
    }
}

fn l_shaped_cells(count: usize, turn_at: usize) -> Vec<GridCell> {
    // Index `turn_at` shares a column with its predecessor, one row down.
    (0..count)
        .map(|idx| {
            if idx < turn_at || turn_at == 0 {
                GridCell::new(idx as i32, 0)
            } else {
                GridCell::new(idx as i32 - 1, 1)
            }
        })
        .collect()
}
