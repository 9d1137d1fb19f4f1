//! Types used in modeling the AVR

use crate::ast::Operand;
use std::fmt;

/// One of the 32 general purpose registers.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Register(pub u8);

impl Register {
    pub fn into_operand(self) -> Operand {
        Operand::sym(&self.to_string())
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A pair of adjacent registers, named by the lower (even) register.
///
/// Pairs are written high register first, as in `r25:r24`.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct RegisterPair(pub u8);

impl RegisterPair {
    pub fn low(self) -> Register {
        Register(self.0)
    }

    pub fn high(self) -> Register {
        Register(self.0 + 1)
    }

    pub fn into_operand(self) -> Operand {
        Operand::sym(&self.to_string())
    }
}

impl fmt::Display for RegisterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.high(), self.low())
    }
}

/// Addressing modes of the X, Y, and Z pointer registers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexMode {
    X,
    XPostIncrement,
    XPreDecrement,
    Y,
    YPostIncrement,
    YPreDecrement,

    /// Y plus a nonzero displacement
    YDisplacement(u8),
    Z,
    ZPostIncrement,
    ZPreDecrement,

    /// Z plus a nonzero displacement
    ZDisplacement(u8),
}

impl IndexMode {
    /// Y with displacement; zero is the plain register.
    pub fn y_plus(q: u8) -> Self {
        match q {
            0 => IndexMode::Y,
            q => IndexMode::YDisplacement(q),
        }
    }

    /// Z with displacement; zero is the plain register.
    pub fn z_plus(q: u8) -> Self {
        match q {
            0 => IndexMode::Z,
            q => IndexMode::ZDisplacement(q),
        }
    }

    pub fn has_displacement(self) -> bool {
        matches!(self, IndexMode::YDisplacement(_) | IndexMode::ZDisplacement(_))
    }

    pub fn into_operand(self) -> Operand {
        use IndexMode::*;

        match self {
            X => Operand::sym("X"),
            XPostIncrement => Operand::sym("X+"),
            XPreDecrement => Operand::sym("-X"),
            Y => Operand::sym("Y"),
            YPostIncrement => Operand::sym("Y+"),
            YPreDecrement => Operand::sym("-Y"),
            YDisplacement(q) => Operand::add(Operand::sym("Y"), Operand::int(q)),
            Z => Operand::sym("Z"),
            ZPostIncrement => Operand::sym("Z+"),
            ZPreDecrement => Operand::sym("-Z"),
            ZDisplacement(q) => Operand::add(Operand::sym("Z"), Operand::int(q)),
        }
    }
}

/// Status register flag tested by a conditional branch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    CarryClear,
    CarrySet,
    Equal,
    GreaterOrEqual,
    HalfCarryClear,
    HalfCarrySet,
    InterruptsDisabled,
    InterruptsEnabled,
    LessThan,
    Minus,
    NotEqual,
    Plus,
    TransferClear,
    TransferSet,
    OverflowClear,
    OverflowSet,
}

impl Condition {
    /// Decode the condition of a conditional branch.
    ///
    /// `pattern` is the branch opcode with its offset field masked off.
    pub fn from_pattern(pattern: u16) -> Option<Self> {
        use Condition::*;

        match pattern {
            0xf400 => Some(CarryClear),
            0xf000 => Some(CarrySet),
            0xf001 => Some(Equal),
            0xf404 => Some(GreaterOrEqual),
            0xf405 => Some(HalfCarryClear),
            0xf005 => Some(HalfCarrySet),
            0xf407 => Some(InterruptsDisabled),
            0xf007 => Some(InterruptsEnabled),
            0xf004 => Some(LessThan),
            0xf002 => Some(Minus),
            0xf401 => Some(NotEqual),
            0xf402 => Some(Plus),
            0xf406 => Some(TransferClear),
            0xf006 => Some(TransferSet),
            0xf403 => Some(OverflowClear),
            0xf003 => Some(OverflowSet),
            _ => None,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        use Condition::*;

        match self {
            CarryClear => "brcc",
            CarrySet => "brcs",
            Equal => "breq",
            GreaterOrEqual => "brge",
            HalfCarryClear => "brhc",
            HalfCarrySet => "brhs",
            InterruptsDisabled => "brid",
            InterruptsEnabled => "brie",
            LessThan => "brlt",
            Minus => "brmi",
            NotEqual => "brne",
            Plus => "brpl",
            TransferClear => "brtc",
            TransferSet => "brts",
            OverflowClear => "brvc",
            OverflowSet => "brvs",
        }
    }
}

/// Status register flags with dedicated set and clear instructions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flag {
    Carry,
    HalfCarry,
    Interrupt,
    Negative,
    Sign,
    Transfer,
    Overflow,
    Zero,
}

impl Flag {
    /// The letter used in the `clX` and `seX` mnemonics.
    pub fn letter(self) -> char {
        use Flag::*;

        match self {
            Carry => 'c',
            HalfCarry => 'h',
            Interrupt => 'i',
            Negative => 'n',
            Sign => 's',
            Transfer => 't',
            Overflow => 'v',
            Zero => 'z',
        }
    }
}
