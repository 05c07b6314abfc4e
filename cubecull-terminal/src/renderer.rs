/// Character-cell surface for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor},
    QueueableCommand,
};
use cubecull_core::{Rgba, Surface};
use nalgebra::Point2;
use std::collections::HashSet;
use std::io::Write;

type Rgb = (u8, u8, u8);

/// A grid of coloured cells that polygons are scan-filled into.
///
/// Surface coordinates are divided by the cell size, so a cell stands in for
/// a `cell_width` x `cell_height` block of canvas pixels. There is no depth
/// buffer: later polygons blend over earlier ones.
pub struct CellSurface {
    width: usize,
    height: usize,
    cell_width: f32,
    cell_height: f32,
    cells: Vec<Rgb>,
}

impl CellSurface {
    pub fn new(width: usize, height: usize, cell_width: f32, cell_height: f32) -> Self {
        Self {
            width,
            height,
            cell_width,
            cell_height,
            cells: vec![(0, 0, 0); width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![(0, 0, 0); width * height];
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Surface extent in canvas units, for the core's viewport.
    pub fn extent(&self) -> (f32, f32) {
        (
            self.width as f32 * self.cell_width,
            self.height as f32 * self.cell_height,
        )
    }

    /// Colour of the cell at column `x`, row `y`, if it is on the grid.
    pub fn cell(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    fn to_cells(&self, p: &Point2<f32>) -> (f32, f32) {
        (p.x / self.cell_width, p.y / self.cell_height)
    }

    fn blend_cell(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        let (r, g, b) = self.cells[idx];
        self.cells[idx] = (
            blend(r, color.r, color.a),
            blend(g, color.g, color.a),
            blend(b, color.b, color.a),
        );
    }

    fn fill_convex(&mut self, coords: &[(f32, f32)], color: Rgba) {
        if coords.len() < 3 || color.a == 0 {
            return;
        }

        // Bounding box
        let min_x = coords.iter().map(|c| c.0).fold(f32::INFINITY, f32::min).floor() as i32;
        let max_x = coords.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;
        let min_y = coords.iter().map(|c| c.1).fold(f32::INFINITY, f32::min).floor() as i32;
        let max_y = coords.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                // Fan triangulation; each cell is blended at most once.
                let inside = (1..coords.len() - 1).any(|i| {
                    matches!(
                        barycentric(coords[0], coords[i], coords[i + 1], p),
                        Some((w0, w1, w2)) if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                    )
                });
                if inside {
                    self.blend_cell(x, y, color);
                }
            }
        }
    }

    /// Clip the segment `a -> b` to the grid box, returning the visible
    /// parameter range `[t0, t1]` (Liang-Barsky).
    fn clip_to_grid(&self, a: (f32, f32), b: (f32, f32)) -> Option<(f32, f32)> {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let (w, h) = (self.width as f32, self.height as f32);
        let mut t0 = 0.0f32;
        let mut t1 = 1.0f32;
        for (p, q) in [(-dx, a.0), (dx, w - a.0), (-dy, a.1), (dy, h - a.1)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    t0 = t0.max(r);
                } else {
                    t1 = t1.min(r);
                }
            }
        }
        (t0 <= t1).then_some((t0, t1))
    }

    fn stroke_closed(&mut self, coords: &[(f32, f32)], color: Rgba) {
        // Shared corners must not be blended twice.
        let mut touched = HashSet::new();
        for (i, &a) in coords.iter().enumerate() {
            let b = coords[(i + 1) % coords.len()];
            let Some((t0, t1)) = self.clip_to_grid(a, b) else {
                continue;
            };
            let start = (a.0 + (b.0 - a.0) * t0, a.1 + (b.1 - a.1) * t0);
            let end = (a.0 + (b.0 - a.0) * t1, a.1 + (b.1 - a.1) * t1);

            // Clipped, so the step count is bounded by the grid size.
            let span = (end.0 - start.0).abs().max((end.1 - start.1).abs());
            let steps = span.ceil().max(1.0) as usize;
            for s in 0..=steps {
                let t = s as f32 / steps as f32;
                let x = (start.0 + (end.0 - start.0) * t).floor() as i32;
                let y = (start.1 + (end.1 - start.1) * t).floor() as i32;
                if touched.insert((x, y)) {
                    self.blend_cell(x, y, color);
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let (r, g, b) = self.cells[y * self.width + x];
                if current != Some((r, g, b)) {
                    writer.queue(SetBackgroundColor(Color::Rgb { r, g, b }))?;
                    current = Some((r, g, b));
                }
                writer.queue(Print(' '))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for CellSurface {
    fn fill_background(&mut self, color: Rgba) {
        self.cells.fill((color.r, color.g, color.b));
    }

    fn draw_polygon(&mut self, points: &[Point2<f32>], fill: Rgba, outline: Rgba) {
        let coords: Vec<(f32, f32)> = points.iter().map(|p| self.to_cells(p)).collect();
        self.fill_convex(&coords, fill);
        self.stroke_closed(&coords, outline);
    }
}

/// Source-over blend of one 8-bit channel.
fn blend(dst: u8, src: u8, alpha: u8) -> u8 {
    let a = u16::from(alpha);
    ((u16::from(src) * a + u16::from(dst) * (255 - a)) / 255) as u8
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
