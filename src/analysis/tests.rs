//! Analysis test suite

use crate::analysis::{
    classify, disassemble_image, inject_labels, inject_orgs, replace_labels, AddressRange, Error,
    LabelTable, RangeSet,
};
use crate::ast::{Directive, Label, Operand};
use crate::memory::{Image, Word};
use std::str::FromStr;

fn range(begin: u32, end: u32) -> AddressRange {
    AddressRange::new(begin, end).unwrap()
}

fn regions_of(set: &RangeSet) -> Vec<AddressRange> {
    set.iter().cloned().collect()
}

fn targets_of(labels: &LabelTable) -> Vec<(u32, String, u32)> {
    labels
        .iter()
        .map(|(addr, e)| (addr, e.label().name().to_string(), e.referenced_from()))
        .collect()
}

#[test]
fn address_range_parse() {
    assert_eq!(AddressRange::from_str("0x100:0x1ff"), Ok(range(0x100, 0x1ff)));
    assert_eq!(AddressRange::from_str("100:1FF"), Ok(range(0x100, 0x1ff)));
    assert_eq!(AddressRange::from_str("5:5"), Ok(range(5, 5)));
    assert_eq!(AddressRange::from_str("200:100"), Err(()));
    assert_eq!(AddressRange::from_str("1:2:3"), Err(()));
    assert_eq!(AddressRange::from_str("zz:1"), Err(()));
    assert_eq!(AddressRange::from_str("100"), Err(()));
    assert_eq!(range(0x100, 0x1ff).to_string(), "0x0100:0x01ff");
}

#[test]
fn range_set_insert() {
    let mut set = RangeSet::new();

    assert!(set.insert(range(10, 20)));
    assert!(set.insert(range(0, 5)));
    assert!(set.insert(range(21, 21)));
    assert!(!set.insert(range(5, 9)));
    assert!(!set.insert(range(15, 30)));
    assert!(!set.insert(range(0, 100)));

    assert_eq!(regions_of(&set), vec![range(0, 5), range(10, 20), range(21, 21)]);
    assert_eq!(set.containing(15), Some(range(10, 20)));
    assert_eq!(set.containing(7), None);
    assert!(set.contains(21));
    assert!(!set.contains(22));
}

#[test]
fn range_set_split() {
    let mut set = RangeSet::new();
    set.insert(range(10, 20));
    set.insert(range(30, 40));

    assert_eq!(set.split_at(15), Some(range(15, 20)));
    assert_eq!(set.split_at(30), Some(range(30, 40)));
    assert_eq!(set.split_at(25), None);

    assert_eq!(regions_of(&set), vec![range(10, 14)]);
}

#[test]
fn terminator_opens_region_until_label() {
    // nop; breq 5; rjmp 0; two words of junk; ret
    let image = Image::test_rom(0, &[0x0000, 0xf019, 0xcffd, 0x1111, 0x2222, 0x9508]);
    let (labels, regions) = classify(&image, &[]);

    assert_eq!(regions_of(&regions), vec![range(3, 4)]);
    assert_eq!(
        targets_of(&labels),
        vec![(0, "L0".to_string(), 2), (5, "L1".to_string(), 1)]
    );
}

#[test]
fn long_jump_opens_region_after_second_word() {
    // nop; jmp 5; two words of junk; ret
    let image = Image::test_rom(0, &[0x0000, 0x940c, 0x0005, 0xffff, 0xffff, 0x9508]);
    let (labels, regions) = classify(&image, &[]);

    assert_eq!(regions_of(&regions), vec![range(3, 4)]);
    assert_eq!(targets_of(&labels), vec![(5, "L0".to_string(), 1)]);
}

#[test]
fn every_unconditional_transfer_opens_region() {
    // ret, reti, ijmp, eijmp
    for &terminator in &[0x9508, 0x9518, 0x9409, 0x9419] {
        let image = Image::test_rom(0, &[0x0000, terminator, 0xffff, 0xffff]);
        let (labels, regions) = classify(&image, &[]);

        assert_eq!(regions_of(&regions), vec![range(2, 3)], "{:04x}", terminator);
        assert!(labels.is_empty());
    }
}

#[test]
fn skipped_long_jump_opens_nothing() {
    // nop; sbrc r0, 0; jmp 6; junk; nop; ret
    let image = Image::test_rom(
        0,
        &[0x0000, 0xfc00, 0x940c, 0x0006, 0xffff, 0x0000, 0x9508],
    );
    let (labels, regions) = classify(&image, &[]);

    assert!(regions.is_empty());
    assert_eq!(targets_of(&labels), vec![(6, "L0".to_string(), 2)]);
}

#[test]
fn region_runs_to_end_of_image() {
    // nop; rjmp 0; junk; ret
    let image = Image::test_rom(0, &[0x0000, 0xcffe, 0xffff, 0x9508]);
    let (_labels, regions) = classify(&image, &[]);

    assert_eq!(regions_of(&regions), vec![range(2, 3)]);
}

#[test]
fn late_target_splits_region() {
    // nop; rjmp 5; junk; nop; ret; rjmp 3
    let image = Image::test_rom(0, &[0x0000, 0xc003, 0xffff, 0x0000, 0x9508, 0xcffd]);
    let (labels, regions) = classify(&image, &[]);

    assert_eq!(regions_of(&regions), vec![range(2, 2)]);
    assert_eq!(
        targets_of(&labels),
        vec![(3, "L0".to_string(), 5), (5, "L1".to_string(), 1)]
    );
}

#[test]
fn split_rescan_finds_more_targets() {
    // nop; rjmp 6; junk; rcall 2; junk; nop; rjmp 3
    let image = Image::test_rom(
        0,
        &[0x0000, 0xc004, 0xffff, 0xdffe, 0xffff, 0x0000, 0xcffc],
    );
    let (labels, regions) = classify(&image, &[]);

    // The rjmp at 6 reopens 3 onwards, where the rcall reopens 2 as well.
    assert!(regions.is_empty());
    assert_eq!(
        labels.iter().map(|(a, _)| a).collect::<Vec<_>>(),
        vec![2, 3, 6]
    );
}

#[test]
fn skip_protects_following_terminator() {
    // nop; sbrs r0, 0; rjmp 0; junk; ret
    let image = Image::test_rom(0, &[0x0000, 0xfe00, 0xcffd, 0xffff, 0x9508]);
    let (_labels, regions) = classify(&image, &[]);
    assert!(regions.is_empty());

    // The same without the skip
    let image = Image::test_rom(0, &[0x0000, 0x0000, 0xcffd, 0xffff, 0x9508]);
    let (_labels, regions) = classify(&image, &[]);
    assert_eq!(regions_of(&regions), vec![range(3, 4)]);
}

#[test]
fn first_instruction_never_opens_region() {
    let image = Image::test_rom(0, &[0xc001, 0xffff, 0x9508]);
    let (_labels, regions) = classify(&image, &[]);

    assert!(regions.is_empty());
}

#[test]
fn terminator_at_end_opens_nothing() {
    let image = Image::test_rom(0, &[0x0000, 0x9508]);
    let (labels, regions) = classify(&image, &[]);

    assert!(regions.is_empty());
    assert!(labels.is_empty());
}

#[test]
fn enabled_range_targets_split_regions() {
    // nop; rjmp 6; nop; rcall 5; junk; nop; ret
    let image = Image::test_rom(
        0,
        &[0x0000, 0xc004, 0x0000, 0xd001, 0xffff, 0x0000, 0x9508],
    );

    let (labels, regions) = classify(&image, &[]);
    assert_eq!(regions_of(&regions), vec![range(2, 5)]);
    assert_eq!(labels.len(), 1);

    let (labels, regions) = classify(&image, &[range(3, 3)]);
    assert_eq!(regions_of(&regions), vec![range(2, 4)]);
    assert_eq!(
        labels.iter().map(|(a, _)| a).collect::<Vec<_>>(),
        vec![5, 6]
    );
}

#[test]
fn targets_outside_image_are_labelled() {
    let image = Image::test_rom(0x10, &[0xc000]);
    let (labels, _regions) = classify(&image, &[]);

    assert_eq!(labels.label(0x11), Some(&Label::new("L0")));
}

#[test]
fn classification_is_deterministic() {
    let image = Image::test_rom(
        0,
        &[0x0000, 0xc004, 0xffff, 0xdffe, 0xffff, 0x0000, 0xcffc, 0xf3f1, 0x9508],
    );

    assert_eq!(classify(&image, &[]), classify(&image, &[]));
}

#[test]
fn regions_stay_disjoint() {
    let image = Image::test_rom(
        0,
        &[
            0x0000, 0xc002, 0xffff, 0x1111, 0xc003, 0xffff, 0xffff, 0x9508, 0xcff9, 0x9508,
            0xffff,
        ],
    );
    let (_labels, regions) = classify(&image, &[]);
    let ranges = regions_of(&regions);

    for pair in ranges.windows(2) {
        assert!(pair[0].end() < pair[1].begin());
    }
}

#[test]
fn truncated_instruction_becomes_data() {
    let image = Image::test_rom(0, &[0x0000, 0x9000]);
    let (asm, errors) = disassemble_image(&image, &RangeSet::new(), &[]);

    assert_eq!(errors, vec![Error::TruncatedInstruction(1)]);
    assert_eq!(
        asm.iter_directives().last(),
        Some(&(Directive::EmitData(0x9000), 1))
    );
}

#[test]
fn label_passes() {
    let image = Image::test_rom(0x10, &[0xc000, 0x9508]);
    let (labels, regions) = classify(&image, &[]);
    let (asm, _) = disassemble_image(&image, &regions, &[]);
    let asm = inject_orgs(inject_labels(replace_labels(asm, &labels), &labels));
    let directives: Vec<_> = asm.iter_directives().cloned().collect();

    assert_eq!(directives.len(), 4);
    assert_eq!(directives[0], (Directive::DeclareOrg(0x10), 0x10));
    match &directives[1] {
        (Directive::EmitInstr(instr, words), 0x10) => {
            assert_eq!(instr.opcode(), "rjmp");
            assert_eq!(
                instr.iter_operands().next(),
                Some(&Operand::clbl(Label::new("L0")))
            );
            assert_eq!(words, &vec![Word::new(0x10, 0xc000)]);
        }
        other => panic!("unexpected directive {:?}", other),
    }
    assert_eq!(directives[2], (Directive::DeclareLabel(Label::new("L0")), 0x11));
}

#[test]
fn long_instruction_across_gap_needs_no_org() {
    let image = Image::new(vec![
        Word::new(0x10, 0x940c),
        Word::new(0x20, 0x0030),
        Word::new(0x21, 0x0000),
    ]);
    let (labels, regions) = classify(&image, &[]);
    let (asm, _) = disassemble_image(&image, &regions, &[]);
    let asm = inject_orgs(inject_labels(replace_labels(asm, &labels), &labels));
    let orgs: Vec<_> = asm
        .iter_directives()
        .filter_map(|(d, _)| match d {
            Directive::DeclareOrg(org) => Some(*org),
            _ => None,
        })
        .collect();

    assert_eq!(orgs, vec![0x10]);
}
