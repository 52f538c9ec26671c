use crate::error::CoreError;
use crate::table::{CellValue, Column, ColumnType, Table};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// One (vendor, brand) row produced by the summary aggregation.
///
/// Fields coming from the left-joined sales and freight summaries are `None`
/// when no matching row exists. Volume is kept as the raw stored text; coercing
/// it is part of enrichment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorSummaryRow {
    pub vendor_number: i64,
    pub vendor_name: Option<String>,
    pub brand: i64,
    pub description: Option<String>,
    pub purchase_price: Decimal,
    pub actual_price: Option<Decimal>,
    pub volume: Option<String>,
    pub total_purchase_quantity: Option<Decimal>,
    pub total_purchase_dollars: Option<Decimal>,
    pub total_sales_dollars: Option<Decimal>,
    pub total_sales_price: Option<Decimal>,
    pub total_sales_quantity: Option<Decimal>,
    pub total_excise_tax: Option<Decimal>,
    pub freight_cost: Option<Decimal>,
}

/// A cleaned summary row with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedSummaryRow {
    pub vendor_number: i64,
    pub vendor_name: String,
    pub brand: i64,
    pub description: String,
    pub purchase_price: Decimal,
    pub actual_price: Decimal,
    pub volume: f64,
    pub total_purchase_quantity: Decimal,
    pub total_purchase_dollars: Decimal,
    pub total_sales_dollars: Decimal,
    pub total_sales_price: Decimal,
    pub total_sales_quantity: Decimal,
    pub total_excise_tax: Decimal,
    pub freight_cost: Decimal,

    pub gross_profit: Decimal,
    pub profit_margin: Option<Decimal>, // None when total sales dollars is zero
    pub stock_turnover: Option<Decimal>, // None when total purchase quantity is zero
    pub sales_to_purchase_ratio: Option<Decimal>, // None when total purchase dollars is zero
}

/// Column layout of the persisted vendor summary table, in storage order.
pub const VENDOR_SUMMARY_COLUMNS: [(&str, ColumnType); 18] = [
    ("VendorNumber", ColumnType::Integer),
    ("VendorName", ColumnType::Text),
    ("Brand", ColumnType::Integer),
    ("Description", ColumnType::Text),
    ("PurchasePrice", ColumnType::Real),
    ("ActualPrice", ColumnType::Real),
    ("Volume", ColumnType::Real),
    ("TotalPurchaseQuantity", ColumnType::Real),
    ("TotalPurchaseDollars", ColumnType::Real),
    ("TotalSalesDollars", ColumnType::Real),
    ("TotalSalesPrice", ColumnType::Real),
    ("TotalSalesQuantity", ColumnType::Real),
    ("TotalExciseTax", ColumnType::Real),
    ("FreightCost", ColumnType::Real),
    ("GrossProfit", ColumnType::Real),
    ("ProfitMargin", ColumnType::Real),
    ("StockTurnover", ColumnType::Real),
    ("SalesToPurchaseRatio", ColumnType::Real),
];

impl EnrichedSummaryRow {
    /// Flattens the row into cells matching `VENDOR_SUMMARY_COLUMNS`.
    pub fn to_cells(&self) -> Vec<CellValue> {
        let real = |d: Decimal| CellValue::from(d.to_f64());
        let optional = |d: Option<Decimal>| CellValue::from(d.and_then(|v| v.to_f64()));

        vec![
            CellValue::Integer(self.vendor_number),
            CellValue::Text(self.vendor_name.clone()),
            CellValue::Integer(self.brand),
            CellValue::Text(self.description.clone()),
            real(self.purchase_price),
            real(self.actual_price),
            CellValue::Real(self.volume),
            real(self.total_purchase_quantity),
            real(self.total_purchase_dollars),
            real(self.total_sales_dollars),
            real(self.total_sales_price),
            real(self.total_sales_quantity),
            real(self.total_excise_tax),
            real(self.freight_cost),
            real(self.gross_profit),
            optional(self.profit_margin),
            optional(self.stock_turnover),
            optional(self.sales_to_purchase_ratio),
        ]
    }

    /// Builds the table that the persister writes.
    pub fn to_table(table_name: &str, rows: &[EnrichedSummaryRow]) -> Result<Table, CoreError> {
        let columns = VENDOR_SUMMARY_COLUMNS
            .iter()
            .map(|(name, column_type)| Column::new(*name, *column_type))
            .collect();
        let mut table = Table::new(table_name, columns);
        for row in rows {
            table.push_row(row.to_cells())?;
        }
        Ok(table)
    }
}
