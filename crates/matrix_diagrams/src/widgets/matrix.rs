//! Matrix widget - a grid of cells shaded by entry magnitude
//!
//! Each cell is filled along the colormap's hue with a lightness interpolated
//! between the map's bounds by `|value| / scale`. Per-cell and per-column
//! overrides let coloring figures paint structural groups instead.

use bitflags::bitflags;
use nalgebra::DMatrix;

use crate::color::{Color, ColorScale, MagnitudeColormap};
use crate::foundation::math::{max_abs, Vec2};
use crate::render::{DrawList, Stroke};
use crate::scene::{Drawable, HorizontalAlign};
use crate::sparsity::SparsityPattern;

bitflags! {
    /// Rendering options for [`MatrixGlyph`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MatrixFlags: u8 {
        /// Print each entry's value inside its cell
        const SHOW_VALUES = 0b0001;
        /// Outline every cell
        const GRID        = 0b0010;
        /// Draw square brackets left and right of the grid
        const BRACKETS    = 0b0100;
        /// Leave exact zeros unfilled
        const BLANK_ZEROS = 0b1000;
    }
}

impl Default for MatrixFlags {
    fn default() -> Self {
        Self::GRID | Self::BRACKETS
    }
}

/// Part of the grid to outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellHighlight {
    /// A whole row
    Row(usize),
    /// A whole column
    Column(usize),
    /// A single cell (row, column)
    Cell(usize, usize),
}

/// Matrix drawable
#[derive(Debug, Clone)]
pub struct MatrixGlyph {
    values: DMatrix<f64>,
    cell_size: f32,
    colormap: MagnitudeColormap,
    scale: ColorScale,
    flags: MatrixFlags,
    cell_colors: Option<Vec<Option<Color>>>,
    column_colors: Option<Vec<Color>>,
    highlights: Vec<(CellHighlight, Color)>,
    precision: usize,
    value_size: f32,
    grid_stroke: Stroke,
    bracket_stroke: Stroke,
}

impl MatrixGlyph {
    const BRACKET_MARGIN: f32 = 0.35;
    const HIGHLIGHT_WIDTH: f32 = 2.0;

    /// Create a matrix glyph with default styling
    pub fn new(values: DMatrix<f64>) -> Self {
        Self {
            values,
            cell_size: 20.0,
            colormap: MagnitudeColormap::default(),
            scale: ColorScale::Auto,
            flags: MatrixFlags::default(),
            cell_colors: None,
            column_colors: None,
            highlights: Vec::new(),
            precision: 1,
            value_size: 8.0,
            grid_stroke: Stroke::new(Color::rgb(0.6, 0.6, 0.6), 0.5),
            bracket_stroke: Stroke::new(Color::BLACK, 1.5),
        }
    }

    /// Render a sparsity pattern: structural nonzeros filled with `color`
    pub fn pattern(pattern: &SparsityPattern, color: Color) -> Self {
        let overrides = pattern
            .iter_row_major()
            .map(|nonzero| nonzero.then_some(color))
            .collect();
        Self::new(pattern.to_matrix())
            .with_flags(MatrixFlags::GRID | MatrixFlags::BRACKETS | MatrixFlags::BLANK_ZEROS)
            .with_cell_colors(overrides)
    }

    /// Set side length of a cell in points
    pub const fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set colormap
    pub const fn with_colormap(mut self, colormap: MagnitudeColormap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Set magnitude scale
    pub const fn with_scale(mut self, scale: ColorScale) -> Self {
        self.scale = scale;
        self
    }

    /// Replace rendering flags
    pub const fn with_flags(mut self, flags: MatrixFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Print values with `precision` decimals at `size` points
    pub const fn with_values(mut self, precision: usize, size: f32) -> Self {
        self.flags = self.flags.union(MatrixFlags::SHOW_VALUES);
        self.precision = precision;
        self.value_size = size;
        self
    }

    /// Per-cell fill overrides in row-major order; `None` keeps the colormap
    pub fn with_cell_colors(mut self, colors: Vec<Option<Color>>) -> Self {
        self.cell_colors = Some(colors);
        self
    }

    /// Fill each nonzero of column `j` with `colors[j]`
    pub fn with_column_colors(mut self, colors: &[Color]) -> Self {
        self.column_colors = Some(colors.to_vec());
        self
    }

    /// Outline a row
    pub fn highlight_row(mut self, row: usize, color: Color) -> Self {
        self.highlights.push((CellHighlight::Row(row), color));
        self
    }

    /// Outline a column
    pub fn highlight_column(mut self, column: usize, color: Color) -> Self {
        self.highlights.push((CellHighlight::Column(column), color));
        self
    }

    /// Outline a single cell
    pub fn highlight_cell(mut self, row: usize, column: usize, color: Color) -> Self {
        self.highlights.push((CellHighlight::Cell(row, column), color));
        self
    }

    /// Underlying values
    pub const fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Active flags
    pub const fn flags(&self) -> MatrixFlags {
        self.flags
    }

    /// Magnitude mapped to the darkest color
    pub fn resolved_scale(&self) -> f64 {
        self.scale.resolve(max_abs(&self.values))
    }

    fn bracket_margin(&self) -> f32 {
        if self.flags.contains(MatrixFlags::BRACKETS) {
            self.cell_size * Self::BRACKET_MARGIN
        } else {
            0.0
        }
    }

    /// Check if the matrix has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn grid_size(&self) -> Vec2 {
        if self.is_empty() {
            return Vec2::zeros();
        }
        Vec2::new(
            self.values.ncols() as f32 * self.cell_size,
            self.values.nrows() as f32 * self.cell_size,
        )
    }

    fn grid_origin(&self, center: Vec2) -> Vec2 {
        center - self.grid_size() / 2.0
    }

    /// Center of cell (row, column) when the glyph is centered on `center`
    pub fn cell_center(&self, center: Vec2, row: usize, column: usize) -> Vec2 {
        let origin = self.grid_origin(center);
        Vec2::new(
            origin.x + (column as f32 + 0.5) * self.cell_size,
            origin.y + (row as f32 + 0.5) * self.cell_size,
        )
    }

    /// Fill of cell (row, column), `None` when the cell stays blank
    pub fn cell_fill(&self, row: usize, column: usize) -> Option<Color> {
        let value = self.values[(row, column)];
        let index = row * self.values.ncols() + column;

        if let Some(color) = self
            .cell_colors
            .as_ref()
            .and_then(|colors| colors.get(index).copied().flatten())
        {
            return Some(color);
        }

        if value == 0.0 && self.flags.contains(MatrixFlags::BLANK_ZEROS) {
            return None;
        }

        if let Some(color) = self.column_colors.as_ref().and_then(|colors| colors.get(column)) {
            if value != 0.0 {
                return Some(*color);
            }
        }

        Some(self.colormap.color_for(value, self.resolved_scale()))
    }

    fn format_value(&self, value: f64) -> String {
        let text = format!("{value:.prec$}", prec = self.precision);
        // "-0.0" reads as noise in a figure
        if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
            text[1..].to_string()
        } else {
            text
        }
    }

    fn text_color_on(fill: Option<Color>) -> Color {
        match fill {
            Some(color) if color.to_hsl().2 < 0.5 => Color::WHITE,
            _ => Color::BLACK,
        }
    }

    fn draw_cells(&self, center: Vec2, list: &mut DrawList) {
        let origin = self.grid_origin(center);
        let cell = Vec2::new(self.cell_size, self.cell_size);
        let grid = self.flags.contains(MatrixFlags::GRID).then_some(self.grid_stroke);

        for row in 0..self.values.nrows() {
            for column in 0..self.values.ncols() {
                let min = origin + Vec2::new(column as f32 * self.cell_size, row as f32 * self.cell_size);
                let fill = self.cell_fill(row, column);

                if fill.is_some() || grid.is_some() {
                    list.push(crate::render::DrawCommand::Rect { min, size: cell, fill, stroke: grid });
                }

                if self.flags.contains(MatrixFlags::SHOW_VALUES) {
                    list.text(
                        min + cell / 2.0,
                        self.format_value(self.values[(row, column)]),
                        self.value_size,
                        Self::text_color_on(fill),
                        HorizontalAlign::Center,
                    );
                }
            }
        }
    }

    fn draw_brackets(&self, center: Vec2, list: &mut DrawList) {
        if self.is_empty() {
            return;
        }

        let grid = self.grid_size();
        let margin = self.bracket_margin();
        let arm = margin * 0.8;
        let top = center.y - grid.y / 2.0;
        let bottom = center.y + grid.y / 2.0;
        let left = center.x - grid.x / 2.0 - margin / 2.0;
        let right = center.x + grid.x / 2.0 + margin / 2.0;

        for (x, direction) in [(left, 1.0), (right, -1.0)] {
            list.line(Vec2::new(x, top), Vec2::new(x, bottom), self.bracket_stroke);
            list.line(Vec2::new(x, top), Vec2::new(x + direction * arm, top), self.bracket_stroke);
            list.line(Vec2::new(x, bottom), Vec2::new(x + direction * arm, bottom), self.bracket_stroke);
        }
    }

    fn draw_highlights(&self, center: Vec2, list: &mut DrawList) {
        if self.is_empty() {
            return;
        }
        let origin = self.grid_origin(center);
        let (rows, cols) = self.values.shape();
        let cell = self.cell_size;

        for (highlight, color) in &self.highlights {
            let (min, size) = match *highlight {
                CellHighlight::Row(row) if row < rows => (
                    origin + Vec2::new(0.0, row as f32 * cell),
                    Vec2::new(cols as f32 * cell, cell),
                ),
                CellHighlight::Column(column) if column < cols => (
                    origin + Vec2::new(column as f32 * cell, 0.0),
                    Vec2::new(cell, rows as f32 * cell),
                ),
                CellHighlight::Cell(row, column) if row < rows && column < cols => (
                    origin + Vec2::new(column as f32 * cell, row as f32 * cell),
                    Vec2::new(cell, cell),
                ),
                _ => {
                    log::warn!("Ignoring highlight {highlight:?} outside a {rows}x{cols} matrix");
                    continue;
                }
            };
            list.stroke_rect(min, size, Stroke::new(*color, Self::HIGHLIGHT_WIDTH));
        }
    }
}

impl Drawable for MatrixGlyph {
    fn size(&self) -> Vec2 {
        let grid = self.grid_size();
        Vec2::new(grid.x + 2.0 * self.bracket_margin(), grid.y)
    }

    fn draw(&self, center: Vec2, list: &mut DrawList) {
        self.draw_cells(center, list);
        if self.flags.contains(MatrixFlags::BRACKETS) {
            self.draw_brackets(center, list);
        }
        self.draw_highlights(center, list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawCommand;
    use approx::assert_relative_eq;

    fn sample() -> DMatrix<f64> {
        DMatrix::from_row_slice(2, 3, &[1.0, 0.0, -4.0, 2.0, -0.0, 0.5])
    }

    fn rect_count(list: &DrawList) -> usize {
        list.iter().filter(|c| matches!(c, DrawCommand::Rect { .. })).count()
    }

    #[test]
    fn test_size_without_brackets() {
        let glyph = MatrixGlyph::new(sample())
            .with_cell_size(10.0)
            .with_flags(MatrixFlags::GRID);
        assert_eq!(glyph.size(), Vec2::new(30.0, 20.0));
    }

    #[test]
    fn test_size_with_brackets() {
        let glyph = MatrixGlyph::new(sample()).with_cell_size(10.0);
        assert_relative_eq!(glyph.size().x, 37.0, epsilon = 1e-4);
        assert_relative_eq!(glyph.size().y, 20.0);
    }

    #[test]
    fn test_cell_center() {
        let glyph = MatrixGlyph::new(sample()).with_cell_size(10.0);
        assert_eq!(glyph.cell_center(Vec2::zeros(), 0, 0), Vec2::new(-10.0, -5.0));
        assert_eq!(glyph.cell_center(Vec2::zeros(), 1, 2), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_largest_magnitude_is_darkest() {
        let glyph = MatrixGlyph::new(sample());
        let map = MagnitudeColormap::default();
        let darkest = glyph.cell_fill(0, 2).unwrap();
        let lightest = glyph.cell_fill(0, 1).unwrap();
        assert_relative_eq!(darkest.to_hsl().2, map.lightness_min, epsilon = 1e-3);
        assert_relative_eq!(lightest.to_hsl().2, map.lightness_max, epsilon = 1e-3);
    }

    #[test]
    fn test_fixed_scale_lightens_cells() {
        let auto = MatrixGlyph::new(sample());
        let shared = MatrixGlyph::new(sample()).with_scale(ColorScale::Fixed(8.0));
        assert_eq!(shared.resolved_scale(), 8.0);
        assert!(shared.cell_fill(0, 2).unwrap().to_hsl().2 > auto.cell_fill(0, 2).unwrap().to_hsl().2);
    }

    #[test]
    fn test_blank_zeros() {
        let glyph = MatrixGlyph::new(sample()).with_flags(MatrixFlags::BLANK_ZEROS);
        assert!(glyph.cell_fill(0, 1).is_none());
        assert!(glyph.cell_fill(1, 1).is_none());
        assert!(glyph.cell_fill(0, 0).is_some());

        let mut list = DrawList::new();
        glyph.draw(Vec2::zeros(), &mut list);
        assert_eq!(rect_count(&list), 4);
    }

    #[test]
    fn test_override_beats_column_color() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let green = Color::rgb(0.0, 1.0, 0.0);
        let glyph = MatrixGlyph::new(sample())
            .with_column_colors(&[green, green, green])
            .with_cell_colors(vec![Some(red), None, None, None, None, None]);
        assert_eq!(glyph.cell_fill(0, 0), Some(red));
        assert_eq!(glyph.cell_fill(1, 0), Some(green));
        // Zeros fall back to the colormap
        assert_ne!(glyph.cell_fill(0, 1), Some(green));
    }

    #[test]
    fn test_values_are_printed() {
        let glyph = MatrixGlyph::new(sample()).with_values(1, 8.0);
        let mut list = DrawList::new();
        glyph.draw(Vec2::zeros(), &mut list);

        let texts: Vec<&str> = list
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["1.0", "0.0", "-4.0", "2.0", "0.0", "0.5"]);
    }

    #[test]
    fn test_brackets_and_highlights() {
        let glyph = MatrixGlyph::new(sample())
            .with_flags(MatrixFlags::BRACKETS)
            .highlight_column(1, Color::BLACK)
            .highlight_row(7, Color::BLACK);
        let mut list = DrawList::new();
        glyph.draw(Vec2::zeros(), &mut list);

        let lines = list.iter().filter(|c| matches!(c, DrawCommand::Line { .. })).count();
        assert_eq!(lines, 6);
        // Six cell fills plus one highlight; the out-of-range row is skipped
        assert_eq!(rect_count(&list), 7);
    }

    #[test]
    fn test_empty_matrix() {
        let glyph = MatrixGlyph::new(DMatrix::zeros(0, 0)).with_cell_size(10.0);
        let mut list = DrawList::new();
        glyph.draw(Vec2::zeros(), &mut list);
        assert!(list.is_empty());
        assert_relative_eq!(glyph.size().x, 7.0, epsilon = 1e-4);
        assert_eq!(glyph.size().y, 0.0);
    }

    #[test]
    fn test_matrix_with_one_empty_dimension() {
        for (rows, cols) in [(0, 3), (3, 0)] {
            let glyph = MatrixGlyph::new(DMatrix::zeros(rows, cols))
                .with_cell_size(20.0)
                .highlight_row(0, Color::BLACK);
            assert!(glyph.is_empty());
            assert_relative_eq!(glyph.size().x, 14.0, epsilon = 1e-4);
            assert_eq!(glyph.size().y, 0.0);

            let mut list = DrawList::new();
            glyph.draw(Vec2::zeros(), &mut list);
            assert!(list.is_empty(), "{rows}x{cols} drew {} commands", list.len());
        }
    }

    #[test]
    fn test_pattern_glyph() {
        let pattern = SparsityPattern::from_entries(2, 2, vec![true, false, false, true]).unwrap();
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let glyph = MatrixGlyph::pattern(&pattern, blue);
        assert_eq!(glyph.cell_fill(0, 0), Some(blue));
        assert_eq!(glyph.cell_fill(0, 1), None);
        assert_eq!(glyph.cell_fill(1, 1), Some(blue));
    }
}
