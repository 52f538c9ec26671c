use crate::error::AnalyticsError;
use core_types::{EnrichedSummaryRow, VendorSummaryRow};
use rust_decimal::Decimal;

/// A stateless transform from raw vendor summary rows to enriched rows.
#[derive(Debug, Default)]
pub struct MetricEnricher {}

impl MetricEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cleans every row and appends the derived metrics.
    ///
    /// Output order matches input order. Fails on the first row whose Volume
    /// cannot be read as a number.
    pub fn enrich(&self, rows: &[VendorSummaryRow]) -> Result<Vec<EnrichedSummaryRow>, AnalyticsError> {
        rows.iter().map(|row| self.enrich_row(row)).collect()
    }

    /// Enriches a single row:
    ///
    /// 1. Volume is coerced to a float (absent → 0).
    /// 2. Absent numeric fields become zero. Absent text becomes empty.
    /// 3. VendorName and Description are trimmed.
    /// 4. GrossProfit, ProfitMargin, StockTurnover and SalesToPurchaseRatio
    ///    are derived; a ratio with a zero denominator is `None`.
    pub fn enrich_row(&self, row: &VendorSummaryRow) -> Result<EnrichedSummaryRow, AnalyticsError> {
        let volume = coerce_volume(row)?;

        let total_purchase_quantity = row.total_purchase_quantity.unwrap_or_default();
        let total_purchase_dollars = row.total_purchase_dollars.unwrap_or_default();
        let total_sales_dollars = row.total_sales_dollars.unwrap_or_default();
        let total_sales_quantity = row.total_sales_quantity.unwrap_or_default();

        let gross_profit = total_sales_dollars
            .checked_sub(total_purchase_dollars)
            .ok_or_else(|| AnalyticsError::Overflow("GrossProfit".to_string()))?;

        let profit_margin = ratio(gross_profit, total_sales_dollars, "ProfitMargin")?
            .map(|r| {
                r.checked_mul(Decimal::ONE_HUNDRED)
                    .ok_or_else(|| AnalyticsError::Overflow("ProfitMargin".to_string()))
            })
            .transpose()?;
        let stock_turnover = ratio(total_sales_quantity, total_purchase_quantity, "StockTurnover")?;
        let sales_to_purchase_ratio =
            ratio(total_sales_dollars, total_purchase_dollars, "SalesToPurchaseRatio")?;

        Ok(EnrichedSummaryRow {
            vendor_number: row.vendor_number,
            vendor_name: clean_text(row.vendor_name.as_deref()),
            brand: row.brand,
            description: clean_text(row.description.as_deref()),
            purchase_price: row.purchase_price,
            actual_price: row.actual_price.unwrap_or_default(),
            volume,
            total_purchase_quantity,
            total_purchase_dollars,
            total_sales_dollars,
            total_sales_price: row.total_sales_price.unwrap_or_default(),
            total_sales_quantity,
            total_excise_tax: row.total_excise_tax.unwrap_or_default(),
            freight_cost: row.freight_cost.unwrap_or_default(),
            gross_profit,
            profit_margin,
            stock_turnover,
            sales_to_purchase_ratio,
        })
    }
}

fn coerce_volume(row: &VendorSummaryRow) -> Result<f64, AnalyticsError> {
    let Some(raw) = row.volume.as_deref() else {
        return Ok(0.0);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AnalyticsError::InvalidVolume {
            vendor_number: row.vendor_number,
            brand: row.brand,
            value: raw.to_string(),
        })
}

fn clean_text(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// `numerator / denominator`, or `None` when the denominator is zero.
fn ratio(numerator: Decimal, denominator: Decimal, metric: &str) -> Result<Option<Decimal>, AnalyticsError> {
    if denominator.is_zero() {
        return Ok(None);
    }
    numerator
        .checked_div(denominator)
        .map(Some)
        .ok_or_else(|| AnalyticsError::Overflow(metric.to_string()))
}
