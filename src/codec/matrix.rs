use crate::error::{QRError, QRResult};

// Module matrix produced by the codec
//------------------------------------------------------------------------------

/// Square grid of modules, `true` for dark. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleMatrix {
    grid: Box<[bool]>,
    w: usize,
}

impl ModuleMatrix {
    pub fn new(w: usize, grid: Vec<bool>) -> QRResult<Self> {
        if w == 0 || w > i16::MAX as usize {
            return Err(QRError::InvalidMatrix(format!("width {w} out of range")));
        }
        if grid.len() != w * w {
            return Err(QRError::InvalidMatrix(format!("{} modules for width {w}", grid.len())));
        }
        Ok(Self { grid: grid.into_boxed_slice(), w })
    }

    /// Builds a matrix from rows of `#` (dark) and `.` (light).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> QRResult<Self> {
        let w = rows.len();
        let mut grid = Vec::with_capacity(w * w);
        for row in rows {
            let row = row.as_ref();
            if row.chars().count() != w {
                return Err(QRError::InvalidMatrix(format!("row {row:?} is not {w} modules wide")));
            }
            for ch in row.chars() {
                match ch {
                    '#' => grid.push(true),
                    '.' => grid.push(false),
                    _ => return Err(QRError::InvalidMatrix(format!("unexpected module {ch:?}"))),
                }
            }
        }
        Self::new(w, grid)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&dark| dark).count()
    }

    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "row should be less than w");
        debug_assert!(-w <= c && c < w, "column should be less than w");

        let r = if r < 0 { r + w } else { r };
        let c = if c < 0 { c + w } else { c };
        (r as usize) * self.w + c as usize
    }

    /// Negative coordinates count from the far edge.
    pub fn get(&self, r: i16, c: i16) -> bool {
        self.grid[self.coord_to_index(r, c)]
    }

    /// Dark modules as `(row, col)` in row-major order.
    pub fn iter_dark(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.w;
        self.grid.iter().enumerate().filter(|&(_, &dark)| dark).map(move |(i, _)| (i / w, i % w))
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for row in self.grid.chunks(self.w) {
            res.extend(row.iter().map(|&dark| if dark { '#' } else { '.' }));
            res.push('\n');
        }
        res
    }
}
