/// Unscaled cell edge in pixels
pub const CELL_SIZE: f32 = 15.0;
pub const GAP_SIZE: f32 = 1.0;
pub const BORDER_WIDTH: f32 = 2.0;

/// Share of the free area the grid may occupy
const FILL_RATIO: f32 = 0.95;
const MIN_SCALE: f32 = 0.5;
const MAX_SCALE: f32 = 1.0;

/// Where the grid sits on screen and how large it is drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub scale: f32,
    rows: usize,
    cols: usize,
}

impl Layout {
    /// Unscaled size of a `rows x cols` grid including gaps and border
    pub fn base_size(rows: usize, cols: usize) -> (f32, f32) {
        let span = |n: usize| n as f32 * (CELL_SIZE + GAP_SIZE) - GAP_SIZE + 2.0 * BORDER_WIDTH;
        (span(cols), span(rows))
    }

    /// Fit the grid into an area, centred. Scale never exceeds 1.0 and never drops below 0.5.
    pub fn fit(rows: usize, cols: usize, area_width: f32, area_height: f32) -> Self {
        let (width, height) = Self::base_size(rows, cols);
        let scale = (area_width * FILL_RATIO / width)
            .min(area_height * FILL_RATIO / height)
            .min(MAX_SCALE)
            .max(MIN_SCALE);

        Self {
            origin_x: (area_width - width * scale) / 2.0,
            origin_y: (area_height - height * scale) / 2.0,
            scale,
            rows,
            cols,
        }
    }

    /// Scaled outer rectangle `(x, y, width, height)`
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let (width, height) = Self::base_size(self.rows, self.cols);
        (self.origin_x, self.origin_y, width * self.scale, height * self.scale)
    }

    pub fn cell_size(&self) -> f32 {
        CELL_SIZE * self.scale
    }

    /// Screen position of a cell's top-left corner
    pub fn cell_origin(&self, row: usize, col: usize) -> (f32, f32) {
        let offset = |n: usize| (BORDER_WIDTH + n as f32 * (CELL_SIZE + GAP_SIZE)) * self.scale;
        (self.origin_x + offset(col), self.origin_y + offset(row))
    }

    /// Convert a screen position to the cell under it. Gaps and the border hit nothing.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let axis = |pos: f32, origin: f32, count: usize| -> Option<usize> {
            let local = (pos - origin) / self.scale - BORDER_WIDTH;
            if local < 0.0 {
                return None;
            }
            let pitch = CELL_SIZE + GAP_SIZE;
            let index = (local / pitch) as usize;
            let within = local - index as f32 * pitch;
            (index < count && within < CELL_SIZE).then_some(index)
        };
        Some((
            axis(y, self.origin_y, self.rows)?,
            axis(x, self.origin_x, self.cols)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_size_default_grid() {
        assert_eq!(Layout::base_size(30, 50), (803.0, 483.0));
    }

    #[test]
    fn test_scale_never_exceeds_one() {
        let layout = Layout::fit(30, 50, 4000.0, 4000.0);
        assert_eq!(layout.scale, 1.0);
        let (x, _, width, _) = layout.bounds();
        assert_eq!(x * 2.0 + width, 4000.0);
    }

    #[test]
    fn test_scale_floor() {
        let layout = Layout::fit(30, 50, 100.0, 100.0);
        assert_eq!(layout.scale, 0.5);
    }

    #[test]
    fn test_scale_follows_tighter_axis() {
        let (width, _) = Layout::base_size(30, 50);
        let layout = Layout::fit(30, 50, width * 0.8 / FILL_RATIO, 5000.0);
        assert!((layout.scale - 0.8).abs() < 1e-4);
    }

    #[test]
    fn test_cell_round_trip() {
        let layout = Layout::fit(30, 50, 1000.0, 700.0);
        let half = layout.cell_size() / 2.0;
        for &(row, col) in &[(0, 0), (29, 49), (12, 7)] {
            let (x, y) = layout.cell_origin(row, col);
            assert_eq!(layout.cell_at(x + half, y + half), Some((row, col)));
        }
    }

    #[test]
    fn test_cell_at_misses() {
        let layout = Layout::fit(30, 50, 2000.0, 2000.0);
        assert_eq!(layout.scale, 1.0);
        let (x, y) = layout.cell_origin(0, 0);
        // Border
        assert_eq!(layout.cell_at(x - 1.0, y + 1.0), None);
        // Gap between column 0 and 1
        assert_eq!(layout.cell_at(x + CELL_SIZE + 0.5, y + 1.0), None);
        // Past the last column
        let (last_x, _) = layout.cell_origin(0, 49);
        assert_eq!(layout.cell_at(last_x + CELL_SIZE + 5.0, y + 1.0), None);
    }
}
