//! VM Memory Model
//!
//! Flat, fixed-length array of integer cells addressed by index.
//! The caller owns the memory and lends it to the interpreter for a run;
//! every indexed access from bytecode goes through [`Memory::load`] and
//! [`Memory::store`], which are the only place bounds are enforced.

use crate::config::DEFAULT_MEMORY_SIZE;
use crate::error::Fault;

/// Integer memory cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i32>,
}

impl Memory {
    /// Zero-filled memory of `size` cells
    pub fn new(size: usize) -> Self {
        Memory {
            cells: vec![0; size],
        }
    }

    pub fn load(&self, index: i32) -> Result<i32, Fault> {
        let slot = self.slot(index)?;
        Ok(self.cells[slot])
    }

    pub fn store(&mut self, index: i32, value: i32) -> Result<(), Fault> {
        let slot = self.slot(index)?;
        self.cells[slot] = value;
        Ok(())
    }

    /// Host-side read, unaffected by the bytecode addressing rules.
    pub fn get(&self, index: usize) -> Option<i32> {
        self.cells.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.cells
    }

    /// Negative indices are rejected rather than reinterpreted as unsigned.
    fn slot(&self, index: i32) -> Result<usize, Fault> {
        usize::try_from(index)
            .ok()
            .filter(|&slot| slot < self.cells.len())
            .ok_or(Fault::OutOfBoundsMemoryAccess {
                index: i64::from(index),
                size: self.cells.len(),
            })
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new(DEFAULT_MEMORY_SIZE)
    }
}

impl From<Vec<i32>> for Memory {
    fn from(cells: Vec<i32>) -> Self {
        Memory { cells }
    }
}
