use ls8lib::{DEFAULT_STACK_START, REGISTER_COUNT, STACK_POINTER};

use crate::errors::{VmError, VmResult};


/// General purpose registers R0..R7. R7 doubles as the stack pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    regs: [u8; REGISTER_COUNT],
}

impl Registers {

    /// All registers zeroed except the stack pointer, which starts at `stack_start`.
    pub fn new(stack_start: u8) -> Self {
        let mut regs = [0; REGISTER_COUNT];
        regs[STACK_POINTER] = stack_start;
        Self { regs }
    }


    pub fn get(&self, index: u8) -> VmResult<u8> {
        self.regs.get(index as usize)
            .copied()
            .ok_or(VmError::InvalidRegister(index))
    }


    pub fn set(&mut self, index: u8, value: u8) -> VmResult<()> {
        let reg = self.regs.get_mut(index as usize)
            .ok_or(VmError::InvalidRegister(index))?;
        *reg = value;
        Ok(())
    }


    pub fn stack_pointer(&self) -> u8 {
        self.regs[STACK_POINTER]
    }


    pub fn set_stack_pointer(&mut self, value: u8) {
        self.regs[STACK_POINTER] = value;
    }


    pub fn as_slice(&self) -> &[u8] {
        &self.regs
    }

}

impl Default for Registers {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_START)
    }
}
