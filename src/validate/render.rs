use core::fmt;

use super::report::ValidationReport;
use crate::table::descriptor::SizeClassDescriptor;

/// Renders a table in the commented column layout tables are published in:
///
/// ```text
/// //  bytes pages batch   cap    class  objs  waste     inc
///   {     0,    0,    0,    0},  //  0     0  0.00%   0.00%
///   {     8,    1,   32, 2048},  //  0  1024  0.58%   0.00%
/// ```
///
/// The trailing comment numbers real classes from zero. Waste is truncated
/// to two decimals, growth rounded.
pub struct TableListing<'a> {
    classes: &'a [SizeClassDescriptor],
    report: &'a ValidationReport,
}

impl<'a> TableListing<'a> {
    /// Pairs a table with its validation report.
    #[must_use]
    pub fn new(classes: &'a [SizeClassDescriptor], report: &'a ValidationReport) -> Self {
        Self { classes, report }
    }
}

impl fmt::Display for TableListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "//  bytes pages batch   cap    class  objs  waste     inc")?;
        let mut metrics = self.report.classes.iter().peekable();
        for (class, row) in self.classes.iter().enumerate() {
            let (objects, growth) = metrics
                .next_if(|m| m.class == class)
                .map_or((0, 0.0), |m| (m.objects_per_span, m.growth_pct));
            let waste = row
                .geometry(self.report.page_size)
                .map_or(0.0, |span| truncated_pct(span.waste_bytes, span.span_bytes));
            writeln!(
                f,
                "  {{{:>6},{:>5},{:>5},{:>5}}},  // {:>2} {:>5} {:>5.2}% {:>6.2}%",
                row.size_bytes,
                row.pages_per_span,
                row.transfer_batch,
                row.cache_capacity,
                class.saturating_sub(1),
                objects,
                waste,
                growth,
            )?;
        }
        Ok(())
    }
}

/// `part / whole` as a percentage truncated to two decimals.
#[allow(clippy::cast_precision_loss)]
fn truncated_pct(part: usize, whole: usize) -> f64 {
    let hundredths = (part as u128 * 10_000) / (whole as u128).max(1);
    hundredths as f64 / 100.0
}
