use ls8lib::ByteCodes;

use crate::errors::{VmError, VmResult};
use crate::flags::Flags;
use crate::registers::Registers;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Mul,
    Cmp,
}

impl TryFrom<ByteCodes> for AluOp {
    type Error = VmError;

    fn try_from(instruction: ByteCodes) -> VmResult<Self> {
        match instruction {
            ByteCodes::Add => Ok(AluOp::Add),
            ByteCodes::Mul => Ok(AluOp::Mul),
            ByteCodes::Compare => Ok(AluOp::Cmp),
            other => Err(VmError::UnsupportedAluOp(other)),
        }
    }
}


/// Apply `op` to registers `a` and `b`. Arithmetic results land in `a` and wrap at 256.
pub fn execute(op: AluOp, regs: &mut Registers, flags: &mut Flags, a: u8, b: u8) -> VmResult<()> {
    let lhs = regs.get(a)?;
    let rhs = regs.get(b)?;

    match op {
        AluOp::Add => regs.set(a, lhs.wrapping_add(rhs)),
        AluOp::Mul => regs.set(a, lhs.wrapping_mul(rhs)),
        AluOp::Cmp => {
            flags.set_compare(lhs, rhs);
            Ok(())
        },
    }
}
