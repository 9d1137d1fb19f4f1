//! Label and data region listing

use crate::analysis::{LabelTable, RangeSet};
use crate::cli::common::load_image;
use crate::{analysis, project};
use std::io;
use std::io::Write;

/// Write out every label, with where it was first referenced from, and every
/// presumed data region.
fn write_scan(stream: &mut dyn Write, labels: &LabelTable, regions: &RangeSet) -> io::Result<()> {
    writeln!(stream, "Labels:")?;

    for (address, entry) in labels.iter() {
        writeln!(
            stream,
            "{} 0x{:04x} ; from 0x{:04x}",
            entry.label(),
            address,
            entry.referenced_from()
        )?;
    }

    writeln!(stream, "Data regions:")?;

    for region in regions.iter() {
        writeln!(stream, "{}", region)?;
    }

    Ok(())
}

pub fn scan(prog: &project::Program) -> io::Result<()> {
    let image = load_image(prog)?;
    let (labels, regions) = analysis::classify(&image, prog.enabled_ranges());

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_scan(&mut out, &labels, &regions)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::write_scan;
    use crate::analysis::classify;
    use crate::memory::Image;

    #[test]
    fn scan_output() {
        let image = Image::test_rom(0, &[0x0000, 0xf019, 0xcffd, 0x1111, 0x2222, 0x9508]);
        let (labels, regions) = classify(&image, &[]);
        let mut out = Vec::new();

        write_scan(&mut out, &labels, &regions).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Labels:\n\
             L0 0x0000 ; from 0x0002\n\
             L1 0x0005 ; from 0x0001\n\
             Data regions:\n\
             0x0003:0x0004\n"
        );
    }
}
