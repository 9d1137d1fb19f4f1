//! Instruction enumeration

use crate::analysis::{Error, Flow, Result};
use crate::arch::avr::{Condition, Flag, IndexMode, Register, RegisterPair};
use crate::memory::Image;
use std::collections::HashMap;

/// All AVR instructions.
///
/// Branch, jump, and call variants hold their resolved target as a word
/// address rather than the encoded offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// ADC Rd, Rr
    AddCarry(Register, Register),

    /// ROL Rd, which is ADC Rd, Rd
    RotateLeft(Register),

    /// ADD Rd, Rr
    Add(Register, Register),

    /// LSL Rd, which is ADD Rd, Rd
    ShiftLeft(Register),

    /// ADIW Rd+1:Rd, K
    AddWord(RegisterPair, u8),

    /// AND Rd, Rr
    And(Register, Register),

    /// TST Rd, which is AND Rd, Rd
    Test(Register),

    /// ANDI Rd, K
    AndConst(Register, u8),

    /// ASR Rd
    ShiftRightArithmetic(Register),

    /// BLD Rd, b
    BitLoad(Register, u8),

    /// BST Rd, b
    BitStore(Register, u8),

    /// BRxx k
    Branch(Condition, u32),

    /// RCALL k
    CallRelative(u32),

    /// RJMP k
    JumpRelative(u32),

    /// CALL k (32-bit)
    Call(u32),

    /// JMP k (32-bit)
    Jump(u32),

    Break,

    /// CBI A, b
    ClearIoBit(u8, u8),

    /// CLC, CLH, CLI, etc.
    ClearFlag(Flag),

    /// COM Rd
    Complement(Register),

    /// CP Rd, Rr
    Compare(Register, Register),

    /// CPC Rd, Rr
    CompareCarry(Register, Register),

    /// CPI Rd, K
    CompareConst(Register, u8),

    /// CPSE Rd, Rr
    CompareSkipEqual(Register, Register),

    /// DEC Rd
    Decrement(Register),

    /// DES K
    DesRound(u8),

    /// EICALL
    ExtendedCallIndirect,

    /// EIJMP
    ExtendedJumpIndirect,

    /// ELPM, or ELPM Rd, Z / Z+ when an operand pair is present
    ExtendedLoadProgram(Option<(Register, IndexMode)>),

    /// EOR Rd, Rr
    ExclusiveOr(Register, Register),

    /// CLR Rd, which is EOR Rd, Rd
    Clear(Register),

    /// FMUL Rd, Rr
    FractionalMultiply(Register, Register),

    /// FMULS Rd, Rr
    FractionalMultiplySigned(Register, Register),

    /// FMULSU Rd, Rr
    FractionalMultiplySignedUnsigned(Register, Register),

    /// ICALL
    CallIndirect,

    /// IJMP
    JumpIndirect,

    /// IN Rd, A
    In(Register, u8),

    /// INC Rd
    Increment(Register),

    /// LAC Z, Rd
    LoadAndClear(Register),

    /// LAS Z, Rd
    LoadAndSet(Register),

    /// LAT Z, Rd
    LoadAndToggle(Register),

    /// LD Rd, (X|Y|Z) and LDD Rd, (Y|Z)+q
    Load(Register, IndexMode),

    /// LDI Rd, K
    LoadConst(Register, u8),

    /// LDS Rd, k
    LoadDirect(Register, u16),

    /// LPM, or LPM Rd, Z / Z+ when an operand pair is present
    LoadProgram(Option<(Register, IndexMode)>),

    /// LSR Rd
    ShiftRight(Register),

    /// MOV Rd, Rr
    Move(Register, Register),

    /// MOVW Rd+1:Rd, Rr+1:Rr
    MoveWord(RegisterPair, RegisterPair),

    /// MUL Rd, Rr
    Multiply(Register, Register),

    /// MULS Rd, Rr
    MultiplySigned(Register, Register),

    /// MULSU Rd, Rr
    MultiplySignedUnsigned(Register, Register),

    /// NEG Rd
    Negate(Register),

    Nop,

    /// OR Rd, Rr
    Or(Register, Register),

    /// ORI Rd, K
    OrConst(Register, u8),

    /// OUT A, Rr
    Out(u8, Register),

    /// POP Rd
    Pop(Register),

    /// PUSH Rr
    Push(Register),

    /// RET
    Return,

    /// RETI
    ReturnFromInterrupt,

    /// ROR Rd
    RotateRight(Register),

    /// SBC Rd, Rr
    SubtractCarry(Register, Register),

    /// SBCI Rd, K
    SubtractCarryConst(Register, u8),

    /// SBI A, b
    SetIoBit(u8, u8),

    /// SBIC A, b
    SkipIoBitClear(u8, u8),

    /// SBIS A, b
    SkipIoBitSet(u8, u8),

    /// SBIW Rd+1:Rd, K
    SubtractWord(RegisterPair, u8),

    /// SBRC Rr, b
    SkipBitClear(Register, u8),

    /// SBRS Rr, b
    SkipBitSet(Register, u8),

    /// SEC, SEH, SEI, etc.
    SetFlag(Flag),

    Sleep,

    /// SPM
    StoreProgram,

    /// ST (X|Y|Z), Rr and STD (Y|Z)+q, Rr
    Store(IndexMode, Register),

    /// STS k, Rr
    StoreDirect(u16, Register),

    /// SUB Rd, Rr
    Subtract(Register, Register),

    /// SUBI Rd, K
    SubtractConst(Register, u8),

    /// SWAP Rd
    Swap(Register),

    /// WDR
    WatchdogReset,

    /// XCH Z, Rd
    Exchange(Register),
}

lazy_static! {
    /// Instructions which take no operands, by their one and only encoding.
    ///
    /// None of these encodings fall inside any operand-carrying instruction's
    /// encoding space, so they can be looked up before any pattern is tried.
    static ref IMPLIED: HashMap<u16, Instruction> = {
        use Instruction::*;

        let mut implied = HashMap::new();

        implied.insert(0x0000, Nop);
        implied.insert(0x9598, Break);
        implied.insert(0x9488, ClearFlag(Flag::Carry));
        implied.insert(0x94d8, ClearFlag(Flag::HalfCarry));
        implied.insert(0x94f8, ClearFlag(Flag::Interrupt));
        implied.insert(0x94a8, ClearFlag(Flag::Negative));
        implied.insert(0x94c8, ClearFlag(Flag::Sign));
        implied.insert(0x94e8, ClearFlag(Flag::Transfer));
        implied.insert(0x94b8, ClearFlag(Flag::Overflow));
        implied.insert(0x9498, ClearFlag(Flag::Zero));
        implied.insert(0x9408, SetFlag(Flag::Carry));
        implied.insert(0x9458, SetFlag(Flag::HalfCarry));
        implied.insert(0x9478, SetFlag(Flag::Interrupt));
        implied.insert(0x9428, SetFlag(Flag::Negative));
        implied.insert(0x9448, SetFlag(Flag::Sign));
        implied.insert(0x9468, SetFlag(Flag::Transfer));
        implied.insert(0x9438, SetFlag(Flag::Overflow));
        implied.insert(0x9418, SetFlag(Flag::Zero));
        implied.insert(0x9519, ExtendedCallIndirect);
        implied.insert(0x9419, ExtendedJumpIndirect);
        implied.insert(0x95d8, ExtendedLoadProgram(None));
        implied.insert(0x9509, CallIndirect);
        implied.insert(0x9409, JumpIndirect);
        implied.insert(0x95c8, LoadProgram(None));
        implied.insert(0x9508, Return);
        implied.insert(0x9518, ReturnFromInterrupt);
        implied.insert(0x9588, Sleep);
        implied.insert(0x95e8, StoreProgram);
        implied.insert(0x95a8, WatchdogReset);

        implied
    };
}

/// Destination (or source) register in bits 4-8.
fn reg_d(word: u16) -> Register {
    Register(((word & 0x01f0) >> 4) as u8)
}

/// Source register in bits 0-3 and 9.
fn reg_r(word: u16) -> Register {
    Register((((word & 0x0200) >> 5) | (word & 0x000f)) as u8)
}

/// One of r16-r31 in bits 4-7.
fn reg_upper(word: u16) -> Register {
    Register((((word & 0x00f0) >> 4) + 16) as u8)
}

/// 8-bit immediate split across bits 0-3 and 8-11.
fn imm8(word: u16) -> u8 {
    (((word & 0x0f00) >> 4) | (word & 0x000f)) as u8
}

/// 6-bit immediate of the word arithmetic instructions.
fn imm6(word: u16) -> u8 {
    (((word & 0x00c0) >> 2) | (word & 0x000f)) as u8
}

/// One of the pairs r24, r26, r28, r30 in bits 4-5.
fn pair_upper(word: u16) -> RegisterPair {
    RegisterPair((((word & 0x0030) >> 4) * 2 + 24) as u8)
}

fn bit(word: u16) -> u8 {
    (word & 0x0007) as u8
}

/// 5-bit I/O address of the bit instructions.
fn io5(word: u16) -> u8 {
    ((word & 0x00f8) >> 3) as u8
}

/// 6-bit I/O address of IN and OUT.
fn io6(word: u16) -> u8 {
    (((word & 0x0600) >> 5) | (word & 0x000f)) as u8
}

/// 6-bit displacement of LDD and STD.
fn displacement(word: u16) -> u8 {
    (((word & 0x2000) >> 8) | ((word & 0x0c00) >> 7) | (word & 0x0007)) as u8
}

/// Pointer mode of the register-indirect LD and ST encodings.
fn index_mode(word: u16) -> Option<IndexMode> {
    match word & 0x000f {
        0x0c => Some(IndexMode::X),
        0x0d => Some(IndexMode::XPostIncrement),
        0x0e => Some(IndexMode::XPreDecrement),
        0x09 => Some(IndexMode::YPostIncrement),
        0x0a => Some(IndexMode::YPreDecrement),
        0x01 => Some(IndexMode::ZPostIncrement),
        0x02 => Some(IndexMode::ZPreDecrement),
        _ => None,
    }
}

/// Pointer mode of the displacement LDD and STD encodings.
fn displacement_mode(word: u16) -> IndexMode {
    if word & 0x0008 != 0 {
        IndexMode::y_plus(displacement(word))
    } else {
        IndexMode::z_plus(displacement(word))
    }
}

/// Target of a conditional branch: a 7-bit signed offset in bits 3-9.
fn branch_target(address: u32, word: u16) -> u32 {
    let offset = (((word & 0x03f8) << 6) as i16) >> 9;

    relative_target(address, offset)
}

/// Target of RJMP and RCALL: a 12-bit signed offset.
fn long_branch_target(address: u32, word: u16) -> u32 {
    let offset = (((word & 0x0fff) << 4) as i16) >> 4;

    relative_target(address, offset)
}

fn relative_target(address: u32, offset: i16) -> u32 {
    address.wrapping_add(offset as i32 as u32).wrapping_add(1)
}

/// Target of the 32-bit JMP and CALL: 6 high bits in the opcode, 16 low bits
/// in the second word.
fn absolute_target(word: u16, next: u16) -> u32 {
    let high = u32::from(((word & 0x01f0) >> 3) | (word & 0x0001));

    high << 16 | u32::from(next)
}

impl Instruction {
    /// Decode the instruction at a given address.
    ///
    /// `next` is the word following the opcode, if there is one; it is only
    /// consulted by the 32-bit encodings. If successful, returns the decoded
    /// instruction and its size in words.
    ///
    /// Patterns are tried in a fixed order and the first match wins. This
    /// matters, as a number of the encodings overlap.
    pub fn decode(address: u32, word: u16, next: Option<u16>) -> Result<(Self, u32)> {
        use Instruction::*;

        if let Some(instr) = IMPLIED.get(&word) {
            return Ok((*instr, 1));
        }

        let second = || next.ok_or(Error::TruncatedInstruction(address));

        let (d, r) = (reg_d(word), reg_r(word));
        let condition = Condition::from_pattern(word & 0xfc07);
        let load_mode = index_mode(word).filter(|_| word & 0xfe00 == 0x9000);
        let store_mode = index_mode(word).filter(|_| word & 0xfe00 == 0x9200);

        let instr = match (word, condition, load_mode, store_mode) {
            (w, ..) if w & 0xfc00 == 0x1c00 => match d == r {
                true => RotateLeft(d),
                false => AddCarry(d, r),
            },
            (w, ..) if w & 0xfc00 == 0x0c00 => match d == r {
                true => ShiftLeft(d),
                false => Add(d, r),
            },
            (w, ..) if w & 0xff00 == 0x9600 => AddWord(pair_upper(w), imm6(w)),
            (w, ..) if w & 0xfc00 == 0x2000 => match d == r {
                true => Test(d),
                false => And(d, r),
            },
            (w, ..) if w & 0xf000 == 0x7000 => AndConst(reg_upper(w), imm8(w)),
            (w, ..) if w & 0xfe0f == 0x9405 => ShiftRightArithmetic(d),
            (w, ..) if w & 0xfe08 == 0xf800 => BitLoad(d, bit(w)),
            (w, ..) if w & 0xfe08 == 0xfa00 => BitStore(d, bit(w)),
            (w, Some(cond), ..) => Branch(cond, branch_target(address, w)),
            (w, ..) if w & 0xf000 == 0xd000 => CallRelative(long_branch_target(address, w)),
            (w, ..) if w & 0xf000 == 0xc000 => JumpRelative(long_branch_target(address, w)),
            (w, ..) if w & 0xfe0e == 0x940e => return Ok((Call(absolute_target(w, second()?)), 2)),
            (w, ..) if w & 0xfe0e == 0x940c => return Ok((Jump(absolute_target(w, second()?)), 2)),
            (w, ..) if w & 0xff00 == 0x9800 => ClearIoBit(io5(w), bit(w)),
            (w, ..) if w & 0xfe0f == 0x9400 => Complement(d),
            (w, ..) if w & 0xfc00 == 0x1400 => Compare(d, r),
            (w, ..) if w & 0xfc00 == 0x0400 => CompareCarry(d, r),
            (w, ..) if w & 0xf000 == 0x3000 => CompareConst(reg_upper(w), imm8(w)),
            (w, ..) if w & 0xfc00 == 0x1000 => CompareSkipEqual(d, r),
            (w, ..) if w & 0xfe0f == 0x940a => Decrement(d),
            (w, ..) if w & 0xff0f == 0x940b => DesRound(((w & 0x00f0) >> 4) as u8),
            (w, ..) if w & 0xfe0f == 0x9006 => ExtendedLoadProgram(Some((d, IndexMode::Z))),
            (w, ..) if w & 0xfe0f == 0x9007 => {
                ExtendedLoadProgram(Some((d, IndexMode::ZPostIncrement)))
            }
            (w, ..) if w & 0xfc00 == 0x2400 => match d == r {
                true => Clear(d),
                false => ExclusiveOr(d, r),
            },
            (w, ..) if w & 0xff88 == 0x0308 => FractionalMultiply(reg_upper3(w), reg_upper_low3(w)),
            (w, ..) if w & 0xff88 == 0x0380 => {
                FractionalMultiplySigned(reg_upper3(w), reg_upper_low3(w))
            }
            (w, ..) if w & 0xff88 == 0x0388 => {
                FractionalMultiplySignedUnsigned(reg_upper3(w), reg_upper_low3(w))
            }
            (w, ..) if w & 0xf800 == 0xb000 => In(d, io6(w)),
            (w, ..) if w & 0xfe0f == 0x9403 => Increment(d),
            (w, ..) if w & 0xfe0f == 0x9206 => LoadAndClear(d),
            (w, ..) if w & 0xfe0f == 0x9205 => LoadAndSet(d),
            (w, ..) if w & 0xfe0f == 0x9207 => LoadAndToggle(d),
            (_, _, Some(mode), _) => Load(d, mode),
            (w, ..) if w & 0xd208 == 0x8008 || w & 0xd208 == 0x8000 => {
                Load(d, displacement_mode(w))
            }
            (w, ..) if w & 0xf000 == 0xe000 => LoadConst(reg_upper(w), imm8(w)),
            (w, ..) if w & 0xfe0f == 0x9000 => return Ok((LoadDirect(d, second()?), 2)),
            (w, ..) if w & 0xf800 == 0xa000 => LoadDirect(reg_upper(w), short_direct(w)),
            (w, ..) if w & 0xfe0f == 0x9004 => LoadProgram(Some((d, IndexMode::Z))),
            (w, ..) if w & 0xfe0f == 0x9005 => LoadProgram(Some((d, IndexMode::ZPostIncrement))),
            (w, ..) if w & 0xfe0f == 0x9406 => ShiftRight(d),
            (w, ..) if w & 0xfc00 == 0x2c00 => Move(d, r),
            (w, ..) if w & 0xff00 == 0x0100 => MoveWord(
                RegisterPair((((w & 0x00f0) >> 4) * 2) as u8),
                RegisterPair(((w & 0x000f) * 2) as u8),
            ),
            (w, ..) if w & 0xfc00 == 0x9c00 => Multiply(d, r),
            (w, ..) if w & 0xff00 == 0x0200 => {
                MultiplySigned(reg_upper(w), Register(((w & 0x000f) + 16) as u8))
            }
            (w, ..) if w & 0xff88 == 0x0300 => {
                MultiplySignedUnsigned(reg_upper3(w), reg_upper_low3(w))
            }
            (w, ..) if w & 0xfe0f == 0x9401 => Negate(d),
            (w, ..) if w & 0xfc00 == 0x2800 => Or(d, r),
            (w, ..) if w & 0xf000 == 0x6000 => OrConst(reg_upper(w), imm8(w)),
            (w, ..) if w & 0xf800 == 0xb800 => Out(io6(w), d),
            (w, ..) if w & 0xfe0f == 0x900f => Pop(d),
            (w, ..) if w & 0xfe0f == 0x920f => Push(d),
            (w, ..) if w & 0xfe0f == 0x9407 => RotateRight(d),
            (w, ..) if w & 0xfc00 == 0x0800 => SubtractCarry(d, r),
            (w, ..) if w & 0xf000 == 0x4000 => SubtractCarryConst(reg_upper(w), imm8(w)),
            (w, ..) if w & 0xff00 == 0x9a00 => SetIoBit(io5(w), bit(w)),
            (w, ..) if w & 0xff00 == 0x9900 => SkipIoBitClear(io5(w), bit(w)),
            (w, ..) if w & 0xff00 == 0x9b00 => SkipIoBitSet(io5(w), bit(w)),
            (w, ..) if w & 0xff00 == 0x9700 => SubtractWord(pair_upper(w), imm6(w)),
            (w, ..) if w & 0xfe08 == 0xfc00 => SkipBitClear(d, bit(w)),
            (w, ..) if w & 0xfe08 == 0xfe00 => SkipBitSet(d, bit(w)),
            (.., Some(mode)) => Store(mode, d),
            (w, ..) if w & 0xd208 == 0x8208 || w & 0xd208 == 0x8200 => {
                Store(displacement_mode(w), d)
            }
            (w, ..) if w & 0xfe0f == 0x9200 => return Ok((StoreDirect(second()?, d), 2)),
            (w, ..) if w & 0xf800 == 0xa800 => StoreDirect(short_direct(w), reg_upper(w)),
            (w, ..) if w & 0xfc00 == 0x1800 => Subtract(d, r),
            (w, ..) if w & 0xf000 == 0x5000 => SubtractConst(reg_upper(w), imm8(w)),
            (w, ..) if w & 0xfe0f == 0x9402 => Swap(d),
            (w, ..) if w & 0xfe0f == 0x9204 => Exchange(d),
            _ => return Err(Error::InvalidInstruction),
        };

        Ok((instr, 1))
    }

    /// Decode the instruction stored at a given index of a program image.
    pub fn from_image(image: &Image, index: usize) -> Result<(Self, u32)> {
        let word = image.get(index).ok_or(Error::InvalidInstruction)?;
        let next = image.get(index + 1).map(|w| w.value);

        Self::decode(word.address, word.value, next)
    }

    /// Determine how control leaves this instruction.
    pub fn flow(&self) -> Flow {
        use Instruction::*;

        match self {
            Branch(_, _) => Flow::Branching(true),
            JumpRelative(_) | Jump(_) | JumpIndirect | ExtendedJumpIndirect => {
                Flow::Branching(false)
            }
            CallRelative(_) | Call(_) | CallIndirect | ExtendedCallIndirect => Flow::Calling,
            Return | ReturnFromInterrupt => Flow::Returning,
            CompareSkipEqual(_, _)
            | SkipIoBitClear(_, _)
            | SkipIoBitSet(_, _)
            | SkipBitClear(_, _)
            | SkipBitSet(_, _) => Flow::Skipping,
            _ => Flow::Normal,
        }
    }

    /// The statically known code address this instruction refers to.
    pub fn target(&self) -> Option<u32> {
        use Instruction::*;

        match self {
            Branch(_, target) | CallRelative(target) | JumpRelative(target) | Call(target)
            | Jump(target) => Some(*target),
            _ => None,
        }
    }
}

/// One of r16-r23 in bits 4-6.
fn reg_upper3(word: u16) -> Register {
    Register((((word & 0x0070) >> 4) + 16) as u8)
}

/// One of r16-r23 in bits 0-2.
fn reg_upper_low3(word: u16) -> Register {
    Register(((word & 0x0007) + 16) as u8)
}

/// 7-bit data address of the 16-bit LDS and STS.
fn short_direct(word: u16) -> u16 {
    ((word & 0x0700) >> 4) | (word & 0x000f)
}
