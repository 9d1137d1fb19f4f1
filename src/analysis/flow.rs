//! Analysis of instruction control flow

/// Indicates what kind of control flow a particular instruction involves.
///
/// Control flow determines in what order instructions are executed within a
/// subroutine. This implies the notion of a "next" instruction, present at the
/// address after the given instruction, and one or more possible alternative
/// instructions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Normal control flow.
    ///
    /// Instruction control predictably flows from the current instruction to
    /// the following instruction.
    Normal,

    /// Skipping control flow.
    ///
    /// The following instruction may be stepped over. Both it and the one
    /// after it can execute next.
    Skipping,

    /// Branching control flow.
    ///
    /// Instruction control diverges at this point with a number of possible
    /// continuing branches. The boolean parameter indicates whether or not the
    /// next instruction is included as one of the possible branches.
    Branching(bool),

    /// Calling control flow.
    ///
    /// Execution enters a subroutine, which is expected to return to the
    /// next instruction.
    Calling,

    /// Returning control flow.
    ///
    /// Instruction control flow for this subroutine ends.
    Returning,
}

impl Flow {
    /// Whether execution may continue into the next instruction.
    pub fn is_nonfinal(self) -> bool {
        use Flow::*;

        match self {
            Normal | Skipping | Calling => true,
            Branching(with_next) => with_next,
            Returning => false,
        }
    }

    pub fn is_skipping(self) -> bool {
        matches!(self, Flow::Skipping)
    }
}
