//! Assembly output test suite

use crate::analysis::{
    classify, disassemble_image, inject_labels, inject_orgs, replace_labels, AddressRange,
    LabelTable,
};
use crate::arch::avr::{IndexMode, Instruction, Register, RegisterPair};
use crate::asm::avra::{format_section, Avra};
use crate::ast::{Directive, Section};
use crate::memory::{Image, Word};
use std::collections::BTreeMap;

/// Run an image through the whole disassembly pipeline.
fn render(image: &Image, enabled: &[AddressRange], listing: bool) -> String {
    let (labels, regions) = classify(image, enabled);
    let (asm, _errors) = disassemble_image(image, &regions, enabled);
    let asm = inject_orgs(inject_labels(replace_labels(asm, &labels), &labels));

    format_section(&Avra::new(listing, &labels), &asm)
}

fn render_instr(instr: Instruction) -> String {
    let mut section = Section::new();
    section.append_directive(Directive::EmitInstr(instr.into_ast(), vec![Word::new(0, 0)]), 0);

    format_section(&Avra::new(false, &LabelTable::default()), &section)
}

#[test]
fn avra_source() {
    let image = Image::test_rom(0, &[0x0000, 0xc002, 0xffff, 0xffff, 0x9508]);

    assert_eq!(
        render(&image, &[], false),
        ".org 0x0000\n    nop\n    rjmp L0\n    .dw 0xffff\n    .dw 0xffff\nL0: ret\n"
    );
}

#[test]
fn avra_listing() {
    let image = Image::test_rom(0, &[0x0000, 0xc002, 0xffff, 0xffff, 0x9508]);

    assert_eq!(
        render(&image, &[], true),
        "00000: 0000     nop\n\
         00001: c002     rjmp L0\n\
         00002: ffff     .dw 0xffff\n\
         00003: ffff     .dw 0xffff\n\
         00004: 9508 L0: ret\n"
    );
}

#[test]
fn avra_long_instruction() {
    let image = Image::test_rom(0, &[0x940c, 0x0002, 0x9508]);

    assert_eq!(render(&image, &[], false), ".org 0x0000\n    jmp L0\nL0: ret\n");
    assert_eq!(
        render(&image, &[], true),
        "00000: 940c     jmp L0\n00001: 0002\n00002: 9508 L0: ret\n"
    );
}

#[test]
fn avra_discontinuity() {
    let image = Image::new(vec![Word::new(0x0, 0x0000), Word::new(0x10, 0x0000)]);

    assert_eq!(
        render(&image, &[], false),
        ".org 0x0000\n    nop\n.org 0x0010\n    nop\n"
    );
    assert_eq!(
        render(&image, &[], true),
        "00000: 0000     nop\n00010: 0000     nop\n"
    );
}

#[test]
fn avra_long_instruction_across_gap() {
    let image = Image::new(vec![
        Word::new(0x10, 0x940c),
        Word::new(0x20, 0x0030),
        Word::new(0x21, 0x0000),
    ]);

    assert_eq!(render(&image, &[], false), ".org 0x0010\n    jmp L0\n    nop\n");
    assert_eq!(
        render(&image, &[], true),
        "00010: 940c     jmp L0\n00020: 0030\n00021: 0000     nop\n"
    );
}

#[test]
fn avra_enabled_range_is_decoded() {
    let image = Image::test_rom(0, &[0x0000, 0xc002, 0x0000, 0x0000, 0x9508]);
    let enabled = [AddressRange::new(2, 2).unwrap()];

    assert_eq!(
        render(&image, &enabled, false),
        ".org 0x0000\n    nop\n    rjmp L0\n    nop\n    .dw 0x0000\nL0: ret\n"
    );
}

#[test]
fn avra_unlabelled_target() {
    let mut section = Section::new();
    section.append_directive(
        Directive::EmitInstr(
            Instruction::JumpRelative(0x11).into_ast(),
            vec![Word::new(0x10, 0xc000)],
        ),
        0x10,
    );

    assert_eq!(
        format_section(&Avra::new(false, &LabelTable::default()), &section),
        "    rjmp 0x0011\n"
    );
}

#[test]
fn avra_label_width() {
    let width = |targets: &BTreeMap<u32, u32>| {
        Avra::new(false, &LabelTable::from_targets(targets.clone())).label_width()
    };
    let mut targets = BTreeMap::new();
    assert_eq!(width(&targets), 4);

    targets.insert(0x10, 0x0);
    assert_eq!(width(&targets), 4);

    for t in 0..10 {
        targets.insert(0x100 + t, 0x0);
    }
    assert_eq!(width(&targets), 8);
}

#[test]
fn avra_wide_label_column() {
    // Eleven calls to the eleven addresses following them
    let mut words = vec![0xd00a; 11];
    words.push(0x9508);

    let out = render(&Image::test_rom(0, &words), &[], false);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[1], "        rcall L0");
    assert_eq!(lines[11], "        rcall L10");
    assert_eq!(lines[12], "L0:     ret");
}

#[test]
fn avra_operands() {
    use Instruction::*;

    let cases = vec![
        (Load(Register(24), IndexMode::YDisplacement(1)), "ldd r24, Y+1"),
        (Store(IndexMode::ZPreDecrement, Register(0)), "st -Z, r0"),
        (AddWord(RegisterPair(24), 1), "adiw r25:r24, 1"),
        (In(Register(24), 0x3f), "in r24, 0x3f"),
        (ClearIoBit(0x1f, 7), "cbi 0x1f, 7"),
        (LoadConst(Register(16), 0xff), "ldi r16, 255"),
        (LoadDirect(Register(16), 0x100), "lds r16, 0x100"),
        (Exchange(Register(3)), "xch Z, r3"),
        (DesRound(0x0f), "des 0x0f"),
        (
            LoadProgram(Some((Register(1), IndexMode::ZPostIncrement))),
            "lpm r1, Z+",
        ),
        (
            MoveWord(RegisterPair(24), RegisterPair(30)),
            "movw r25:r24, r31:r30",
        ),
    ];

    for (instr, text) in cases {
        assert_eq!(render_instr(instr), format!("    {}\n", text));
    }
}
