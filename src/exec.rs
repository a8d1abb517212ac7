use std::io::Write;

use log::{debug, info};

use ls8lib::{Address, ByteCode, ByteCodes, DEFAULT_STACK_START};

use crate::alu::{self, AluOp};
use crate::errors::{LoadResult, VmError, VmResult};
use crate::flags::Flags;
use crate::memory::Memory;
use crate::registers::Registers;


/// An instruction handler. It performs the instruction's effect and moves the program counter,
/// either past the instruction or to a jump target.
pub type Handler<W> = fn(&mut VM<W>, ByteCodes) -> VmResult<()>;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}


#[derive(Debug, Clone, Copy)]
pub struct VmOptions {
    /// Initial value of the stack pointer.
    pub stack_start: u8,
    /// Write a trace line before executing each instruction.
    pub trace: bool,
}

impl Default for VmOptions {
    fn default() -> Self {
        Self {
            stack_start: DEFAULT_STACK_START,
            trace: false,
        }
    }
}


/// One slot for every possible opcode byte.
const OPCODE_COUNT: usize = u8::MAX as usize + 1;


/// Opcode-indexed handler lookup, filled once when the VM is created.
struct DispatchTable<W: Write> {
    entries: [Option<(ByteCodes, Handler<W>)>; OPCODE_COUNT],
}

impl<W: Write> DispatchTable<W> {

    fn new() -> Self {
        let mut entries: [Option<(ByteCodes, Handler<W>)>; OPCODE_COUNT] = [None; OPCODE_COUNT];
        for &instruction in ByteCodes::ALL {
            entries[instruction as usize] = Some((instruction, VM::<W>::handler_for(instruction)));
        }
        debug!("Dispatch table holds {} instructions", ByteCodes::ALL.len());
        Self { entries }
    }


    #[inline]
    fn lookup(&self, opcode: u8) -> Option<(ByteCodes, Handler<W>)> {
        self.entries[opcode as usize]
    }

}


pub struct VM<W: Write> {

    memory: Memory,
    registers: Registers,
    flags: Flags,
    /// Address of the next instruction to fetch.
    pc: Address,
    state: State,
    dispatch: DispatchTable<W>,
    /// Sink for `PRN` and trace lines.
    output: W,
    trace: bool,

}

impl<W: Write> VM<W> {

    pub fn new(options: VmOptions, output: W) -> Self {
        Self {
            memory: Memory::new(),
            registers: Registers::new(options.stack_start),
            flags: Flags::default(),
            pc: 0,
            state: State::Halted,
            dispatch: DispatchTable::new(),
            output,
            trace: options.trace,
        }
    }


    /// Copy a program image into memory at address 0.
    pub fn load(&mut self, code: ByteCode<'_>) -> LoadResult<()> {
        self.memory.load(code)?;
        debug!("Loaded {} program bytes", code.len());
        Ok(())
    }


    /// Execute instructions until `HLT` or the first fault. Every fault is fatal and halts the machine.
    pub fn run(&mut self) -> VmResult<()> {

        self.state = State::Running;

        while self.state == State::Running {
            if let Err(err) = self.step() {
                self.state = State::Halted;
                match self.memory.peek(self.pc).and_then(ByteCodes::from_byte) {
                    Some(instruction) => debug!("Machine fault at {:#04x} ({}): {}", self.pc, instruction.mnemonic(), err),
                    None => debug!("Machine fault at {:#04x}: {}", self.pc, err),
                }
                return Err(err);
            }
        }

        info!("Halted at {:#04x}", self.pc);
        Ok(())
    }


    /// Fetch, decode and execute a single instruction.
    pub fn step(&mut self) -> VmResult<()> {

        if self.trace {
            self.write_trace()?;
        }

        let opcode = self.memory.read(self.pc)?;

        let (instruction, handler) = self.dispatch.lookup(opcode)
            .ok_or(VmError::IllegalInstruction { opcode, pc: self.pc })?;

        log::trace!("{:#04x}: {}", self.pc, instruction.mnemonic());

        handler(self, instruction)
    }


    fn handler_for(instruction: ByteCodes) -> Handler<W> {
        match instruction {
            ByteCodes::Halt => Self::halt,
            ByteCodes::LoadImmediate => Self::load_immediate,
            ByteCodes::Print => Self::print,
            ByteCodes::Add
            | ByteCodes::Mul
            | ByteCodes::Compare => Self::alu,
            ByteCodes::Push => Self::push_register,
            ByteCodes::Pop => Self::pop_register,
            ByteCodes::Call => Self::call,
            ByteCodes::Return => Self::ret,
            ByteCodes::Jump => Self::jump,
            ByteCodes::JumpEqual => Self::jump_equal,
            ByteCodes::JumpNotEqual => Self::jump_not_equal,
        }
    }


    /// Operand `n` (1-based) of the instruction at the program counter.
    #[inline]
    fn operand(&self, n: usize) -> VmResult<u8> {
        self.memory.read(self.pc + n)
    }


    #[inline]
    fn advance(&mut self, instruction: ByteCodes) {
        self.pc += instruction.width();
    }


    fn push(&mut self, value: u8) -> VmResult<()> {
        let sp = self.registers.stack_pointer()
            .checked_sub(1)
            .ok_or(VmError::StackOverflow)?;
        self.memory.write(sp as Address, value)?;
        self.registers.set_stack_pointer(sp);
        Ok(())
    }


    fn pop(&mut self) -> VmResult<u8> {
        let sp = self.registers.stack_pointer();
        let value = self.memory.read(sp as Address)?;
        let sp = sp.checked_add(1).ok_or(VmError::StackUnderflow)?;
        self.registers.set_stack_pointer(sp);
        Ok(value)
    }


    fn halt(&mut self, _instruction: ByteCodes) -> VmResult<()> {
        self.state = State::Halted;
        Ok(())
    }


    fn load_immediate(&mut self, instruction: ByteCodes) -> VmResult<()> {
        let reg = self.operand(1)?;
        let value = self.operand(2)?;
        self.registers.set(reg, value)?;
        self.advance(instruction);
        Ok(())
    }


    fn print(&mut self, instruction: ByteCodes) -> VmResult<()> {
        let value = self.registers.get(self.operand(1)?)?;
        writeln!(self.output, "{}", value)?;
        self.output.flush()?;
        self.advance(instruction);
        Ok(())
    }


    fn alu(&mut self, instruction: ByteCodes) -> VmResult<()> {
        let op = AluOp::try_from(instruction)?;
        let a = self.operand(1)?;
        let b = self.operand(2)?;
        alu::execute(op, &mut self.registers, &mut self.flags, a, b)?;
        self.advance(instruction);
        Ok(())
    }


    fn push_register(&mut self, instruction: ByteCodes) -> VmResult<()> {
        let value = self.registers.get(self.operand(1)?)?;
        self.push(value)?;
        self.advance(instruction);
        Ok(())
    }


    fn pop_register(&mut self, instruction: ByteCodes) -> VmResult<()> {
        let reg = self.operand(1)?;
        let value = self.pop()?;
        self.registers.set(reg, value)?;
        self.advance(instruction);
        Ok(())
    }


    fn call(&mut self, instruction: ByteCodes) -> VmResult<()> {
        let target = self.registers.get(self.operand(1)?)?;
        let return_address = self.pc + instruction.width();
        let return_address = u8::try_from(return_address)
            .map_err(|_| VmError::OutOfBounds(return_address))?;
        self.push(return_address)?;
        self.pc = target as Address;
        Ok(())
    }


    fn ret(&mut self, _instruction: ByteCodes) -> VmResult<()> {
        self.pc = self.pop()? as Address;
        Ok(())
    }


    fn jump(&mut self, _instruction: ByteCodes) -> VmResult<()> {
        self.pc = self.registers.get(self.operand(1)?)? as Address;
        Ok(())
    }


    fn jump_if(&mut self, condition: bool, instruction: ByteCodes) -> VmResult<()> {
        let target = self.registers.get(self.operand(1)?)?;
        if condition {
            self.pc = target as Address;
        } else {
            self.advance(instruction);
        }
        Ok(())
    }


    fn jump_equal(&mut self, instruction: ByteCodes) -> VmResult<()> {
        self.jump_if(self.flags.is_equal(), instruction)
    }


    fn jump_not_equal(&mut self, instruction: ByteCodes) -> VmResult<()> {
        self.jump_if(!self.flags.is_equal(), instruction)
    }


    /// `TRACE: PC | next three bytes | R0..R7`, all in hex. Bytes past the end of memory show as `--`.
    fn write_trace(&mut self) -> VmResult<()> {
        let bytes: Vec<String> = (0..3)
            .map(|offset| match self.memory.peek(self.pc + offset) {
                Some(byte) => format!("{:02X}", byte),
                None => "--".to_string(),
            })
            .collect();

        write!(self.output, "TRACE: {:02X} | {} |", self.pc, bytes.join(" "))?;
        for reg in self.registers.as_slice() {
            write!(self.output, " {:02X}", reg)?;
        }
        writeln!(self.output)?;
        Ok(())
    }


    pub fn pc(&self) -> Address {
        self.pc
    }


    pub fn state(&self) -> State {
        self.state
    }


    pub fn registers(&self) -> &Registers {
        &self.registers
    }


    pub fn flags(&self) -> &Flags {
        &self.flags
    }


    pub fn memory(&self) -> &Memory {
        &self.memory
    }


    pub fn into_output(self) -> W {
        self.output
    }

}
