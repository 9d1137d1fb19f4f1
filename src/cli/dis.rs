//! Disassembly of a whole image

use crate::asm::avra::Avra;
use crate::asm::Assembler;
use crate::cli::common::load_image;
use crate::{analysis, project};
use std::io;
use std::io::Write;

pub fn dis(prog: &project::Program) -> io::Result<()> {
    let image = load_image(prog)?;
    let enabled = prog.enabled_ranges();

    let (labels, regions) = analysis::classify(&image, enabled);
    let (orig_asm, errors) = analysis::disassemble_image(&image, &regions, enabled);

    for e in errors {
        eprintln!("WARN: {}", e);
    }

    let labeled_asm = analysis::replace_labels(orig_asm, &labels);
    let injected_asm = analysis::inject_labels(labeled_asm, &labels);
    let orgd_asm = analysis::inject_orgs(injected_asm);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    Avra::new(prog.is_listing(), &labels).emit_section(&mut out, &orgd_asm)?;
    out.flush()?;

    if !regions.is_empty() {
        eprintln!("Presumed data regions:");

        for region in regions.iter() {
            eprintln!("{}", region);
        }
    }

    Ok(())
}
