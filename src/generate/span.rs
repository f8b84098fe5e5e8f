use crate::table::config::ClassTableConfig;
use crate::table::metrics::SpanGeometry;
use crate::table::page::pages_for;

/// Picks the span for objects of `size` bytes.
///
/// Among page counts from the fewest that fit one object up to the cap, the
/// fewest pages whose waste is within `tolerance_bps` of the best achievable
/// and within the waste ceiling win. `None` when no span qualifies.
pub(crate) fn select_span(
    size: usize,
    config: &ClassTableConfig,
    tolerance_bps: u32,
) -> Option<SpanGeometry> {
    let first = pages_for(size, config.page_size).max(1);
    if first > config.max_pages_per_span {
        return None;
    }
    let spans: Vec<SpanGeometry> = (first..=config.max_pages_per_span)
        .filter_map(|pages| SpanGeometry::new(size, pages, config.page_size))
        .collect();
    let best = *spans.iter().min_by(|a, b| a.cmp_waste(b))?;
    spans.into_iter().find(|span| {
        span.within_tolerance_of(&best, tolerance_bps)
            && span.waste_within(config.waste_ceiling_bps)
    })
}
