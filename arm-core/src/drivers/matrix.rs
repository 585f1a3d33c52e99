//! Row/column button matrix scanner.

use crate::error::{Component, SetupReport};
use crate::hal::{DigitalIo, Level};

/// A pressed matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPress {
    pub row: u8,
    pub col: u8,
}

/// An `R` x `C` button matrix.
///
/// Rows are outputs idling high; columns are pulled-up inputs. A key
/// connects its row to its column, so driving a row low pulls the column of
/// every pressed key on that row low.
///
/// Scanning has no debounce and no edge detection: a held key is reported
/// on every [`read`](Self::read), and only the first pressed key in
/// row-major order is reported.
#[derive(Debug)]
pub struct ButtonMatrix<G, const R: usize, const C: usize> {
    rows: [G; R],
    cols: [G; C],
}

impl<G: DigitalIo, const R: usize, const C: usize> ButtonMatrix<G, R, C> {
    /// Create a matrix from its row outputs and column inputs.
    #[must_use]
    pub fn new(rows: [G; R], cols: [G; C]) -> Self {
        Self { rows, cols }
    }

    /// Set up every row and column, then park the rows high.
    pub fn setup(&mut self) -> Result<(), SetupReport> {
        let mut report = SetupReport::new();
        for (r, row) in (0u8..).zip(self.rows.iter_mut()) {
            let result = row.setup().and_then(|()| row.write(Level::High));
            report.record(Component::MatrixRow(r), result);
        }
        for (c, col) in (0u8..).zip(self.cols.iter_mut()) {
            report.record(Component::MatrixColumn(c), col.setup());
        }
        report.into_result()
    }

    /// Scan once and return the first pressed key, if any.
    ///
    /// Every row is back high when this returns. A column that fails to read
    /// counts as released; a row that cannot be driven low is skipped.
    pub fn read(&mut self) -> Option<KeyPress> {
        for (r, row) in (0u8..).zip(self.rows.iter_mut()) {
            if let Err(e) = row.write(Level::Low) {
                warn!("matrix row {} not driven: {:?}", r, e);
                if let Err(e) = row.write(Level::High) {
                    warn!("matrix row {} not restored: {:?}", r, e);
                }
                continue;
            }

            let hit = Self::scan_columns(&mut self.cols);

            if let Err(e) = row.write(Level::High) {
                warn!("matrix row {} not restored: {:?}", r, e);
            }

            if let Some(col) = hit {
                trace!("key press at ({}, {})", r, col);
                return Some(KeyPress { row: r, col });
            }
        }
        None
    }

    fn scan_columns(cols: &mut [G; C]) -> Option<u8> {
        for (c, col) in (0u8..).zip(cols.iter_mut()) {
            match col.read() {
                Ok(Level::Low) => return Some(c),
                Ok(Level::High) => {}
                Err(e) => warn!("matrix column {} unreadable: {:?}", c, e),
            }
        }
        None
    }
}
