use std::fmt;
use std::mem;

use static_assertions::{const_assert, const_assert_eq};


/// Memory addresses are plain indices into the 256-byte memory.
pub type Address = usize;
pub type ByteCode<'a> = &'a [u8];

pub const MEMORY_SIZE: usize = 256;
pub const REGISTER_COUNT: usize = 8;
/// Index of the register that holds the stack pointer.
pub const STACK_POINTER: usize = 7;
/// Initial stack pointer. The stack grows downward from here.
pub const DEFAULT_STACK_START: u8 = 0xF4;
pub const INSTRUCTION_SIZE: usize = 1;
pub const EXIT_CODE_SIZE: usize = mem::size_of::<i32>();

const_assert_eq!(MEMORY_SIZE, u8::MAX as usize + 1);
const_assert!(STACK_POINTER < REGISTER_COUNT);


macro_rules! declare_instructions {
    ($($name:ident $asm_name:ident = $code:literal, $operands:literal),+ $(,)?) => {

/// LS-8 instructions. Each opcode is one byte, optionally followed by up to two operand bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ByteCodes {
    $($name = $code),+
}

impl ByteCodes {

    /// Every declared instruction, in declaration order.
    pub const ALL: &'static [ByteCodes] = &[$(ByteCodes::$name),+];


    /// Decode an opcode byte. Returns `None` for bytes that are not part of the instruction set.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            $($code => Some(Self::$name),)+
            _ => None
        }
    }


    /// Number of operand bytes following the opcode.
    pub const fn operand_count(self) -> usize {
        match self {
            $(Self::$name => $operands),+
        }
    }


    pub const fn mnemonic(self) -> &'static str {
        match self {
            $(Self::$name => stringify!($asm_name)),+
        }
    }

}

// The two high bits of every opcode encode its operand count.
$(const_assert_eq!($operands, $code >> 6);)+

    };
}

declare_instructions! {

    Halt HLT = 0b00000001, 0,
    LoadImmediate LDI = 0b10000010, 2,
    Print PRN = 0b01000111, 1,
    Mul MUL = 0b10100010, 2,
    Add ADD = 0b10100000, 2,
    Push PUSH = 0b01000101, 1,
    Pop POP = 0b01000110, 1,
    Call CALL = 0b01010000, 1,
    Return RET = 0b00010001, 0,
    Compare CMP = 0b10100111, 2,
    Jump JMP = 0b01010100, 1,
    JumpEqual JEQ = 0b01010101, 1,
    JumpNotEqual JNE = 0b01010110, 1,

}

const_assert!(mem::size_of::<ByteCodes>() == INSTRUCTION_SIZE);

impl ByteCodes {

    /// Total encoded width of the instruction, opcode included.
    pub const fn width(self) -> usize {
        INSTRUCTION_SIZE + self.operand_count()
    }


    /// Whether the instruction is executed by the ALU.
    pub const fn is_alu(self) -> bool {
        self as u8 & 0b0010_0000 != 0
    }

}

impl fmt::Display for ByteCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#010b})", self.mnemonic(), *self as u8)
    }
}


macro_rules! declare_exit_codes {
    ($($name:ident $value:literal),+ $(,)?) => {

/// Process exit status reported by the `ls8` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCodes {
    $($name = $value),+
}

impl fmt::Display for ExitCodes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            $(
                ExitCodes::$name => write!(f, "{} ({})", stringify!($name), ExitCodes::$name as i32)
            ),+
        }
    }
}

impl From<ExitCodes> for i32 {
    fn from(code: ExitCodes) -> Self {
        code as i32
    }
}

const_assert_eq!(mem::size_of::<ExitCodes>(), EXIT_CODE_SIZE);

    };
}

declare_exit_codes! {
    Success 0,
    Usage 1,
    FileNotFound 2,
    IllegalInstruction 3,
    MalformedProgram 4,
    MachineFault 5,
    IoError 6,
}


#[cfg(test)]
mod tests {

    use super::*;


    #[test]
    fn every_opcode_decodes_to_itself() {
        for &instruction in ByteCodes::ALL {
            assert_eq!(ByteCodes::from_byte(instruction as u8), Some(instruction));
        }
    }


    #[test]
    fn unknown_bytes_are_rejected() {
        assert_eq!(ByteCodes::from_byte(0b11111111), None);
        assert_eq!(ByteCodes::from_byte(0), None);
    }


    #[test]
    fn widths_follow_operand_counts() {
        assert_eq!(ByteCodes::Halt.width(), 1);
        assert_eq!(ByteCodes::Print.width(), 2);
        assert_eq!(ByteCodes::LoadImmediate.width(), 3);
        assert_eq!(ByteCodes::Return.width(), 1);
    }


    #[test]
    fn instruction_class_bits() {
        assert!(ByteCodes::Add.is_alu());
        assert!(ByteCodes::Mul.is_alu());
        assert!(ByteCodes::Compare.is_alu());
        assert!(!ByteCodes::LoadImmediate.is_alu());
    }


    #[test]
    fn exit_codes_display() {
        assert_eq!(ExitCodes::IllegalInstruction.to_string(), "IllegalInstruction (3)");
        assert_eq!(i32::from(ExitCodes::FileNotFound), 2);
    }

}
