//! Lowering of decoded instructions into the assembler AST

use crate::arch::avr::{IndexMode, Instruction, Register};
use crate::ast::{Instruction as inst, Operand as op};

/// Mnemonic and operands of a two register instruction.
fn rr(opcode: &str, d: Register, r: Register) -> inst {
    inst::new(opcode, vec![d.into_operand(), r.into_operand()])
}

fn r(opcode: &str, d: Register) -> inst {
    inst::new(opcode, vec![d.into_operand()])
}

fn rk(opcode: &str, d: Register, k: u8) -> inst {
    inst::new(opcode, vec![d.into_operand(), op::int(k)])
}

fn ab(opcode: &str, a: u8, b: u8) -> inst {
    inst::new(opcode, vec![op::addr(a), op::int(b)])
}

/// `lac`, `las`, `lat`, and `xch` all operate on the byte at Z.
fn z_rmw(opcode: &str, d: Register) -> inst {
    inst::new(opcode, vec![op::sym("Z"), d.into_operand()])
}

fn program_load(opcode: &str, operands: Option<(Register, IndexMode)>) -> inst {
    match operands {
        Some((d, mode)) => inst::new(opcode, vec![d.into_operand(), mode.into_operand()]),
        None => inst::new(opcode, vec![]),
    }
}

impl Instruction {
    /// Produce the assembly form of this instruction.
    ///
    /// Code targets are emitted as literal pointers; it is up to a later pass
    /// to swap them out for labels.
    pub fn into_ast(self) -> inst {
        use Instruction::*;

        match self {
            AddCarry(d, s) => rr("adc", d, s),
            RotateLeft(d) => r("rol", d),
            Add(d, s) => rr("add", d, s),
            ShiftLeft(d) => r("lsl", d),
            AddWord(p, k) => inst::new("adiw", vec![p.into_operand(), op::int(k)]),
            And(d, s) => rr("and", d, s),
            Test(d) => r("tst", d),
            AndConst(d, k) => rk("andi", d, k),
            ShiftRightArithmetic(d) => r("asr", d),
            BitLoad(d, b) => rk("bld", d, b),
            BitStore(d, b) => rk("bst", d, b),
            Branch(cond, target) => inst::new(cond.mnemonic(), vec![op::cptr(target)]),
            CallRelative(target) => inst::new("rcall", vec![op::cptr(target)]),
            JumpRelative(target) => inst::new("rjmp", vec![op::cptr(target)]),
            Call(target) => inst::new("call", vec![op::cptr(target)]),
            Jump(target) => inst::new("jmp", vec![op::cptr(target)]),
            Break => inst::new("break", vec![]),
            ClearIoBit(a, b) => ab("cbi", a, b),
            ClearFlag(flag) => inst::new(&format!("cl{}", flag.letter()), vec![]),
            Complement(d) => r("com", d),
            Compare(d, s) => rr("cp", d, s),
            CompareCarry(d, s) => rr("cpc", d, s),
            CompareConst(d, k) => rk("cpi", d, k),
            CompareSkipEqual(d, s) => rr("cpse", d, s),
            Decrement(d) => r("dec", d),
            DesRound(k) => inst::new("des", vec![op::addr(k)]),
            ExtendedCallIndirect => inst::new("eicall", vec![]),
            ExtendedJumpIndirect => inst::new("eijmp", vec![]),
            ExtendedLoadProgram(operands) => program_load("elpm", operands),
            ExclusiveOr(d, s) => rr("eor", d, s),
            Clear(d) => r("clr", d),
            FractionalMultiply(d, s) => rr("fmul", d, s),
            FractionalMultiplySigned(d, s) => rr("fmuls", d, s),
            FractionalMultiplySignedUnsigned(d, s) => rr("fmulsu", d, s),
            CallIndirect => inst::new("icall", vec![]),
            JumpIndirect => inst::new("ijmp", vec![]),
            In(d, a) => inst::new("in", vec![d.into_operand(), op::addr(a)]),
            Increment(d) => r("inc", d),
            LoadAndClear(d) => z_rmw("lac", d),
            LoadAndSet(d) => z_rmw("las", d),
            LoadAndToggle(d) => z_rmw("lat", d),
            Load(d, mode) if mode.has_displacement() => {
                inst::new("ldd", vec![d.into_operand(), mode.into_operand()])
            }
            Load(d, mode) => inst::new("ld", vec![d.into_operand(), mode.into_operand()]),
            LoadConst(d, k) => rk("ldi", d, k),
            LoadDirect(d, k) => inst::new("lds", vec![d.into_operand(), op::addr(k)]),
            LoadProgram(operands) => program_load("lpm", operands),
            ShiftRight(d) => r("lsr", d),
            Move(d, s) => rr("mov", d, s),
            MoveWord(d, s) => inst::new("movw", vec![d.into_operand(), s.into_operand()]),
            Multiply(d, s) => rr("mul", d, s),
            MultiplySigned(d, s) => rr("muls", d, s),
            MultiplySignedUnsigned(d, s) => rr("mulsu", d, s),
            Negate(d) => r("neg", d),
            Nop => inst::new("nop", vec![]),
            Or(d, s) => rr("or", d, s),
            OrConst(d, k) => rk("ori", d, k),
            Out(a, s) => inst::new("out", vec![op::addr(a), s.into_operand()]),
            Pop(d) => r("pop", d),
            Push(s) => r("push", s),
            Return => inst::new("ret", vec![]),
            ReturnFromInterrupt => inst::new("reti", vec![]),
            RotateRight(d) => r("ror", d),
            SubtractCarry(d, s) => rr("sbc", d, s),
            SubtractCarryConst(d, k) => rk("sbci", d, k),
            SetIoBit(a, b) => ab("sbi", a, b),
            SkipIoBitClear(a, b) => ab("sbic", a, b),
            SkipIoBitSet(a, b) => ab("sbis", a, b),
            SubtractWord(p, k) => inst::new("sbiw", vec![p.into_operand(), op::int(k)]),
            SkipBitClear(s, b) => rk("sbrc", s, b),
            SkipBitSet(s, b) => rk("sbrs", s, b),
            SetFlag(flag) => inst::new(&format!("se{}", flag.letter()), vec![]),
            Sleep => inst::new("sleep", vec![]),
            StoreProgram => inst::new("spm", vec![]),
            Store(mode, s) if mode.has_displacement() => {
                inst::new("std", vec![mode.into_operand(), s.into_operand()])
            }
            Store(mode, s) => inst::new("st", vec![mode.into_operand(), s.into_operand()]),
            StoreDirect(k, s) => inst::new("sts", vec![op::addr(k), s.into_operand()]),
            Subtract(d, s) => rr("sub", d, s),
            SubtractConst(d, k) => rk("subi", d, k),
            Swap(d) => r("swap", d),
            WatchdogReset => inst::new("wdr", vec![]),
            Exchange(d) => z_rmw("xch", d),
        }
    }
}
