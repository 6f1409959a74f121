//! Run-wide totals over normalized records.

use crate::parser::schema::FlatRecord;
use log::debug;

/// Totals across every record of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfitTotals {
    pub rows: usize,
    pub revenue: f64,
    pub payout: f64,
    pub profit: f64,
    pub conversions: f64,
    pub clicks: f64,
}

impl ProfitTotals {
    /// Profit as a percentage of revenue (0 when there is no revenue)
    pub fn margin_percentage(&self) -> f64 {
        if self.revenue != 0.0 {
            (self.profit / self.revenue) * 100.0
        } else {
            0.0
        }
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Rows: {} | Revenue: {:.2} | Payout: {:.2} | Profit: {:.2} ({:.1}%) | Conversions: {} | Clicks: {}",
            self.rows,
            self.revenue,
            self.payout,
            self.profit,
            self.margin_percentage(),
            self.conversions,
            self.clicks
        )
    }
}

/// Sum every metric over the records
///
/// **Public** - provides summary statistics
pub fn calculate_totals(records: &[FlatRecord]) -> ProfitTotals {
    debug!("Calculating totals over {} records", records.len());

    records.iter().fold(ProfitTotals::default(), |mut totals, record| {
        totals.rows += 1;
        totals.revenue += record.revenue;
        totals.payout += record.payout;
        totals.profit += record.profit;
        totals.conversions += record.cv;
        totals.clicks += record.total_click;
        totals
    })
}
