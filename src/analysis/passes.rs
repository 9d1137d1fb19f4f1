//! Analysis passes responsible for producing and transforming AST output
//! from the disassembler.

use crate::analysis::{AddressRange, Error, LabelTable, RangeSet};
use crate::arch::avr::Instruction;
use crate::ast::{Directive, Operand, Section};
use crate::memory::Image;

/// Disassemble an entire image.
///
/// Words inside a data region are emitted as data, unless an enabled range
/// covers them. Words that fail to decode are also emitted as data; if that
/// happened because a 32-bit instruction was cut off by the end of the
/// image, the error is returned alongside the section.
pub fn disassemble_image(
    image: &Image,
    regions: &RangeSet,
    enabled: &[AddressRange],
) -> (Section, Vec<Error>) {
    let mut asm = Section::new();
    let mut errors = Vec::new();
    let mut index = 0;

    while let Some(word) = image.get(index) {
        let forced = enabled.iter().any(|r| r.contains(word.address));

        if regions.contains(word.address) && !forced {
            asm.append_directive(Directive::EmitData(word.value), word.address);
            index += 1;
            continue;
        }

        match Instruction::from_image(image, index) {
            Ok((instr, size)) => {
                let end = index + size as usize;

                asm.append_directive(
                    Directive::EmitInstr(instr.into_ast(), image.words(index, end).to_vec()),
                    word.address,
                );
                index = end;
            }
            Err(e) => {
                if let Error::TruncatedInstruction(_) = e {
                    errors.push(e);
                }

                asm.append_directive(Directive::EmitData(word.value), word.address);
                index += 1;
            }
        }
    }

    (asm, errors)
}

/// Given an operand, replace code pointers with their labels.
///
/// Pointers with no label are left as they are.
pub fn replace_operand_with_label(src_operand: Operand, labels: &LabelTable) -> Operand {
    match src_operand.code_pointer().and_then(|p| labels.label(p)) {
        Some(label) => Operand::clbl(label.clone()),
        None => src_operand,
    }
}

/// Given a section, replace all code pointers with their equivalent labels.
pub fn replace_labels(src_assembly: Section, labels: &LabelTable) -> Section {
    let mut dst_assembly = Section::new();

    for (directive, loc) in src_assembly {
        let directive = match directive {
            Directive::EmitInstr(mut instr, words) => {
                for operand in instr.iter_operands_mut() {
                    *operand = replace_operand_with_label(operand.clone(), labels);
                }

                Directive::EmitInstr(instr, words)
            }
            directive => directive,
        };

        dst_assembly.append_directive(directive, loc);
    }

    dst_assembly
}

/// Given a section, declare each label at the directive it names.
pub fn inject_labels(src_assembly: Section, labels: &LabelTable) -> Section {
    let mut dst_assembly = Section::new();

    for (directive, loc) in src_assembly {
        if directive.size() > 0 {
            if let Some(label) = labels.label(loc) {
                dst_assembly.append_directive(Directive::DeclareLabel(label.clone()), loc);
            }
        }

        dst_assembly.append_directive(directive, loc);
    }

    dst_assembly
}

/// Given a section, add `.org` directives before the first directive and
/// wherever the address does not follow on from the last word of the
/// previous one.
pub fn inject_orgs(src_assembly: Section) -> Section {
    let mut dst_assembly = Section::new();
    let mut next_loc = None;

    for (directive, loc) in src_assembly {
        if next_loc != Some(loc) {
            dst_assembly.append_directive(Directive::DeclareOrg(loc), loc);
        }

        next_loc = Some(directive.next_loc(loc));
        dst_assembly.append_directive(directive, loc);
    }

    dst_assembly
}
