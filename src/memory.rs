use ls8lib::{Address, ByteCode, MEMORY_SIZE};

use crate::errors::{LoadError, LoadResult, VmError, VmResult};


/// Flat, zero-initialized machine memory. The stack lives at the top of it.
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {

    pub fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }


    pub fn read(&self, address: Address) -> VmResult<u8> {
        self.cells.get(address)
            .copied()
            .ok_or(VmError::OutOfBounds(address))
    }


    pub fn write(&mut self, address: Address, value: u8) -> VmResult<()> {
        let cell = self.cells.get_mut(address)
            .ok_or(VmError::OutOfBounds(address))?;
        *cell = value;
        Ok(())
    }


    /// Read without faulting. Only meant for diagnostics.
    pub fn peek(&self, address: Address) -> Option<u8> {
        self.cells.get(address).copied()
    }


    /// Copy a program image into memory starting at address 0.
    pub fn load(&mut self, image: ByteCode<'_>) -> LoadResult<()> {
        if image.len() > MEMORY_SIZE {
            return Err(LoadError::ProgramTooLarge { size: image.len(), capacity: MEMORY_SIZE });
        }
        self.cells[..image.len()].copy_from_slice(image);
        Ok(())
    }


    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
