use crate::DbError;
use core_types::{CellValue, EnrichedSummaryRow, Table, VendorSummaryRow};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool, SqliteRow};
use sqlx::Row;

/// The raw tables the vendor summary is aggregated from.
pub const SOURCE_TABLES: [&str; 4] = ["purchases", "purchase_prices", "sales", "vendor_invoice"];

/// Builds one row per (vendor, brand) from purchases, joined to list prices,
/// with sales and freight totals left-joined in.
///
/// Output columns are cast to fixed storage classes so decoding does not depend
/// on the types inferred for the source CSVs. Ties on purchase dollars are
/// broken by vendor and brand to keep the order deterministic.
const VENDOR_SUMMARY_QUERY: &str = r#"
    WITH FreightSummary AS (
        SELECT
            VendorNumber,
            SUM(Freight) AS FreightCost
        FROM vendor_invoice
        GROUP BY VendorNumber
    ),

    PurchaseSummary AS (
        SELECT
            p.VendorNumber,
            p.VendorName,
            p.Brand,
            p.Description,
            p.PurchasePrice,
            pp.Price AS ActualPrice,
            pp.Volume,
            SUM(p.Quantity) AS TotalPurchaseQuantity,
            SUM(p.Dollars) AS TotalPurchaseDollars
        FROM purchases p
        JOIN purchase_prices pp ON p.Brand = pp.Brand
        WHERE p.PurchasePrice > 0
        GROUP BY
            p.VendorNumber, p.VendorName, p.Brand,
            p.Description, p.PurchasePrice, pp.Price, pp.Volume
    ),

    SalesSummary AS (
        SELECT
            VendorNo,
            Brand,
            SUM(SalesDollars) AS TotalSalesDollars,
            SUM(SalesPrice) AS TotalSalesPrice,
            SUM(SalesQuantity) AS TotalSalesQuantity,
            SUM(ExciseTax) AS TotalExciseTax
        FROM sales
        GROUP BY VendorNo, Brand
    )

    SELECT
        CAST(ps.VendorNumber AS INTEGER) AS VendorNumber,
        CAST(ps.VendorName AS TEXT) AS VendorName,
        CAST(ps.Brand AS INTEGER) AS Brand,
        CAST(ps.Description AS TEXT) AS Description,
        CAST(ps.PurchasePrice AS REAL) AS PurchasePrice,
        CAST(ps.ActualPrice AS REAL) AS ActualPrice,
        CAST(ps.Volume AS TEXT) AS Volume,
        CAST(ps.TotalPurchaseQuantity AS REAL) AS TotalPurchaseQuantity,
        CAST(ps.TotalPurchaseDollars AS REAL) AS TotalPurchaseDollars,
        CAST(ss.TotalSalesDollars AS REAL) AS TotalSalesDollars,
        CAST(ss.TotalSalesPrice AS REAL) AS TotalSalesPrice,
        CAST(ss.TotalSalesQuantity AS REAL) AS TotalSalesQuantity,
        CAST(ss.TotalExciseTax AS REAL) AS TotalExciseTax,
        CAST(fs.FreightCost AS REAL) AS FreightCost
    FROM PurchaseSummary ps
    LEFT JOIN SalesSummary ss
        ON ps.VendorNumber = ss.VendorNo AND ps.Brand = ss.Brand
    LEFT JOIN FreightSummary fs
        ON ps.VendorNumber = fs.VendorNumber
    ORDER BY ps.TotalPurchaseDollars DESC, ps.VendorNumber ASC, ps.Brand ASC
"#;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

impl DbRepository {
    /// Creates a new `DbRepository` over an open connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Closes the underlying pool, waiting for the connection to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Replaces `table.name` in the store with the contents of `table`.
    ///
    /// The drop, create and inserts run in one transaction: either the new
    /// table fully replaces the old one or the store is left unchanged.
    /// Returns the number of rows written.
    pub async fn replace_table(&self, table: &Table) -> Result<u64, DbError> {
        let table_ident = quote_ident(&table.name)?;
        if table.columns.is_empty() {
            return Err(DbError::EmptySchema(table.name.clone()));
        }

        let column_defs = table
            .columns
            .iter()
            .map(|c| Ok(format!("{} {}", quote_ident(&c.name)?, c.column_type.sql_name())))
            .collect::<Result<Vec<_>, DbError>>()?;
        let placeholders = vec!["?"; table.columns.len()].join(", ");
        let insert_sql = format!("INSERT INTO {table_ident} VALUES ({placeholders})");

        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!("DROP TABLE IF EXISTS {table_ident}"))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&format!("CREATE TABLE {table_ident} ({})", column_defs.join(", ")))
            .execute(&mut *tx)
            .await?;

        for row in table.rows() {
            let query = row
                .iter()
                .fold(sqlx::query(&insert_sql), |query, cell| bind_cell(query, cell));
            query.execute(&mut *tx).await?; // Note: must use the transaction object `tx` here
        }

        tx.commit().await?;

        tracing::debug!(table = %table.name, rows = table.row_count(), "Replaced table.");
        Ok(table.row_count() as u64)
    }

    /// Returns whether a table with this exact name exists.
    pub async fn table_exists(&self, name: &str) -> Result<bool, DbError> {
        let found: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(found.is_some())
    }

    /// Counts the rows of an existing table.
    pub async fn count_rows(&self, name: &str) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", quote_ident(name)?))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Runs the vendor summary aggregation over the raw source tables.
    ///
    /// Read-only and deterministic: the same source tables always produce the
    /// same rows in the same order (descending total purchase dollars).
    pub async fn build_vendor_summary(&self) -> Result<Vec<VendorSummaryRow>, DbError> {
        for name in SOURCE_TABLES {
            if !self.table_exists(name).await? {
                return Err(DbError::MissingTable(name.to_string()));
            }
        }

        let rows = sqlx::query(VENDOR_SUMMARY_QUERY)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(summary_row_from).collect()
    }

    /// Writes the enriched summary to `table_name`, replacing any previous version.
    pub async fn save_vendor_summary(
        &self,
        table_name: &str,
        rows: &[EnrichedSummaryRow],
    ) -> Result<u64, DbError> {
        let table = EnrichedSummaryRow::to_table(table_name, rows)?;
        self.replace_table(&table).await
    }

    /// Reads a persisted vendor summary back, in stored order.
    /// `limit` of `None` returns every row.
    pub async fn load_vendor_summary(
        &self,
        table_name: &str,
        limit: Option<u32>,
    ) -> Result<Vec<EnrichedSummaryRow>, DbError> {
        if !self.table_exists(table_name).await? {
            return Err(DbError::MissingTable(table_name.to_string()));
        }

        let sql = format!(
            r#"
            SELECT
                VendorNumber, VendorName, Brand, Description, PurchasePrice, ActualPrice,
                Volume, TotalPurchaseQuantity, TotalPurchaseDollars, TotalSalesDollars,
                TotalSalesPrice, TotalSalesQuantity, TotalExciseTax, FreightCost,
                GrossProfit, ProfitMargin, StockTurnover, SalesToPurchaseRatio
            FROM {}
            ORDER BY rowid ASC
            LIMIT ?
            "#,
            quote_ident(table_name)?
        );

        // SQLite treats a negative LIMIT as "no limit".
        let rows = sqlx::query(&sql)
            .bind(limit.map_or(-1, i64::from))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(enriched_row_from).collect()
    }
}

/// Quotes an identifier for interpolation into SQL.
fn quote_ident(name: &str) -> Result<String, DbError> {
    if name.trim().is_empty() || name.contains('\0') {
        return Err(DbError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

fn bind_cell<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    cell: &'q CellValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match cell {
        CellValue::Null => query.bind(None::<i64>),
        CellValue::Integer(v) => query.bind(*v),
        CellValue::Real(v) => query.bind(*v),
        CellValue::Text(s) => query.bind(s.as_str()),
    }
}

fn optional_decimal(row: &SqliteRow, column: &str) -> Result<Option<Decimal>, DbError> {
    let value: Option<f64> = row.try_get(column)?;
    value
        .map(|v| {
            Decimal::from_f64(v).ok_or_else(|| DbError::Decode {
                column: column.to_string(),
                value: v.to_string(),
            })
        })
        .transpose()
}

fn decimal(row: &SqliteRow, column: &str) -> Result<Decimal, DbError> {
    optional_decimal(row, column)?.ok_or_else(|| DbError::UnexpectedNull(column.to_string()))
}

fn summary_row_from(row: &SqliteRow) -> Result<VendorSummaryRow, DbError> {
    Ok(VendorSummaryRow {
        vendor_number: row.try_get("VendorNumber")?,
        vendor_name: row.try_get("VendorName")?,
        brand: row.try_get("Brand")?,
        description: row.try_get("Description")?,
        purchase_price: decimal(row, "PurchasePrice")?,
        actual_price: optional_decimal(row, "ActualPrice")?,
        volume: row.try_get("Volume")?,
        total_purchase_quantity: optional_decimal(row, "TotalPurchaseQuantity")?,
        total_purchase_dollars: optional_decimal(row, "TotalPurchaseDollars")?,
        total_sales_dollars: optional_decimal(row, "TotalSalesDollars")?,
        total_sales_price: optional_decimal(row, "TotalSalesPrice")?,
        total_sales_quantity: optional_decimal(row, "TotalSalesQuantity")?,
        total_excise_tax: optional_decimal(row, "TotalExciseTax")?,
        freight_cost: optional_decimal(row, "FreightCost")?,
    })
}

fn enriched_row_from(row: &SqliteRow) -> Result<EnrichedSummaryRow, DbError> {
    Ok(EnrichedSummaryRow {
        vendor_number: row.try_get("VendorNumber")?,
        vendor_name: row.try_get("VendorName")?,
        brand: row.try_get("Brand")?,
        description: row.try_get("Description")?,
        purchase_price: decimal(row, "PurchasePrice")?,
        actual_price: decimal(row, "ActualPrice")?,
        volume: row.try_get("Volume")?,
        total_purchase_quantity: decimal(row, "TotalPurchaseQuantity")?,
        total_purchase_dollars: decimal(row, "TotalPurchaseDollars")?,
        total_sales_dollars: decimal(row, "TotalSalesDollars")?,
        total_sales_price: decimal(row, "TotalSalesPrice")?,
        total_sales_quantity: decimal(row, "TotalSalesQuantity")?,
        total_excise_tax: decimal(row, "TotalExciseTax")?,
        freight_cost: decimal(row, "FreightCost")?,
        gross_profit: decimal(row, "GrossProfit")?,
        profit_margin: optional_decimal(row, "ProfitMargin")?,
        stock_turnover: optional_decimal(row, "StockTurnover")?,
        sales_to_purchase_ratio: optional_decimal(row, "SalesToPurchaseRatio")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::DatabaseSettings;
    use core_types::{Column, ColumnType};
    use rust_decimal_macros::dec;

    async fn memory_repo() -> DbRepository {
        let settings = DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            ..DatabaseSettings::default()
        };
        DbRepository::new(crate::connect(&settings).await.unwrap())
    }

    fn table(name: &str, columns: &[(&str, ColumnType)], rows: Vec<Vec<CellValue>>) -> Table {
        let mut table = Table::new(
            name,
            columns.iter().map(|(n, t)| Column::new(*n, *t)).collect(),
        );
        for row in rows {
            table.push_row(row).unwrap();
        }
        table
    }

    fn int(v: i64) -> CellValue {
        CellValue::Integer(v)
    }

    fn real(v: f64) -> CellValue {
        CellValue::Real(v)
    }

    fn text(v: &str) -> CellValue {
        CellValue::Text(v.to_string())
    }

    /// (vendor, name, brand, description, purchase price, quantity, dollars)
    fn purchases(rows: &[(i64, &str, i64, &str, f64, i64, f64)]) -> Table {
        table(
            "purchases",
            &[
                ("VendorNumber", ColumnType::Integer),
                ("VendorName", ColumnType::Text),
                ("Brand", ColumnType::Integer),
                ("Description", ColumnType::Text),
                ("PurchasePrice", ColumnType::Real),
                ("Quantity", ColumnType::Integer),
                ("Dollars", ColumnType::Real),
            ],
            rows.iter()
                .map(|(v, n, b, d, p, q, dol)| {
                    vec![int(*v), text(n), int(*b), text(d), real(*p), int(*q), real(*dol)]
                })
                .collect(),
        )
    }

    fn purchase_prices(rows: &[(i64, f64, &str)]) -> Table {
        table(
            "purchase_prices",
            &[
                ("Brand", ColumnType::Integer),
                ("Price", ColumnType::Real),
                ("Volume", ColumnType::Text),
            ],
            rows.iter()
                .map(|(b, p, v)| vec![int(*b), real(*p), text(v)])
                .collect(),
        )
    }

    /// (vendor, brand, sales dollars, sales price, sales quantity, excise tax)
    fn sales(rows: &[(i64, i64, f64, f64, i64, f64)]) -> Table {
        table(
            "sales",
            &[
                ("VendorNo", ColumnType::Integer),
                ("Brand", ColumnType::Integer),
                ("SalesDollars", ColumnType::Real),
                ("SalesPrice", ColumnType::Real),
                ("SalesQuantity", ColumnType::Integer),
                ("ExciseTax", ColumnType::Real),
            ],
            rows.iter()
                .map(|(v, b, d, p, q, t)| vec![int(*v), int(*b), real(*d), real(*p), int(*q), real(*t)])
                .collect(),
        )
    }

    fn vendor_invoice(rows: &[(i64, f64)]) -> Table {
        table(
            "vendor_invoice",
            &[("VendorNumber", ColumnType::Integer), ("Freight", ColumnType::Real)],
            rows.iter().map(|(v, f)| vec![int(*v), real(*f)]).collect(),
        )
    }

    async fn seed_sources(repo: &DbRepository) {
        repo.replace_table(&purchases(&[
            (1, "ALPHA SPIRITS ", 100, "Vodka 750", 10.0, 4, 40.0),
            (1, "ALPHA SPIRITS ", 100, "Vodka 750", 10.0, 6, 60.0),
            (1, "ALPHA SPIRITS ", 200, "Gin", 5.0, 10, 50.0),
            (2, "BETA IMPORTS", 300, "Rum", 12.5, 20, 250.0),
            // Free goods never reach the summary.
            (2, "BETA IMPORTS", 300, "Rum", 0.0, 5, 0.0),
            (3, "GAMMA WINES", 400, "Merlot", -1.0, 3, 9.0),
            // Brand without a price list entry is dropped by the inner join.
            (3, "GAMMA WINES", 999, "Mystery", 8.0, 1, 8.0),
        ]))
        .await
        .unwrap();
        repo.replace_table(&purchase_prices(&[
            (100, 14.99, "750"),
            (200, 7.99, "1000"),
            (300, 18.0, "1750"),
            (400, 11.0, "750"),
        ]))
        .await
        .unwrap();
        repo.replace_table(&sales(&[
            (1, 100, 90.0, 14.99, 6, 0.5),
            (1, 100, 60.0, 14.99, 2, 0.25),
            (2, 300, 300.0, 18.0, 15, 1.5),
        ]))
        .await
        .unwrap();
        repo.replace_table(&vendor_invoice(&[(1, 3.5), (1, 1.5), (3, 2.0)]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn replace_table_writes_rows_and_schema() {
        let repo = memory_repo().await;
        let written = repo
            .replace_table(&vendor_invoice(&[(1, 3.5), (2, 1.0)]))
            .await
            .unwrap();

        assert_eq!(written, 2);
        assert!(repo.table_exists("vendor_invoice").await.unwrap());
        assert!(!repo.table_exists("sales").await.unwrap());
        assert_eq!(repo.count_rows("vendor_invoice").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn replacing_a_table_twice_does_not_append() {
        let repo = memory_repo().await;
        repo.replace_table(&vendor_invoice(&[(1, 3.5), (2, 1.0), (3, 9.0)]))
            .await
            .unwrap();
        repo.replace_table(&vendor_invoice(&[(7, 2.0)])).await.unwrap();

        assert_eq!(repo.count_rows("vendor_invoice").await.unwrap(), 1);
        let vendor: i64 = sqlx::query_scalar("SELECT VendorNumber FROM vendor_invoice")
            .fetch_one(&repo.pool)
            .await
            .unwrap();
        assert_eq!(vendor, 7);
    }

    #[tokio::test]
    async fn replace_table_stores_nulls_and_quoted_names() {
        let repo = memory_repo().await;
        let t = table(
            "odd \"name\"",
            &[("Sales Dollars", ColumnType::Real), ("Note", ColumnType::Text)],
            vec![vec![CellValue::Null, text("x")], vec![real(1.5), CellValue::Null]],
        );
        repo.replace_table(&t).await.unwrap();

        let nulls: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM "odd ""name""" WHERE "Sales Dollars" IS NULL OR Note IS NULL"#,
        )
        .fetch_one(&repo.pool)
        .await
        .unwrap();
        assert_eq!(nulls, 2);
    }

    #[tokio::test]
    async fn replace_table_rejects_bad_schemas() {
        let repo = memory_repo().await;
        let no_columns = Table::new("empty", vec![]);
        assert!(matches!(
            repo.replace_table(&no_columns).await,
            Err(DbError::EmptySchema(_))
        ));

        let blank_name = Table::new("  ", vec![Column::new("a", ColumnType::Integer)]);
        assert!(matches!(
            repo.replace_table(&blank_name).await,
            Err(DbError::InvalidIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn summary_requires_all_source_tables() {
        let repo = memory_repo().await;
        repo.replace_table(&purchases(&[])).await.unwrap();

        let err = repo.build_vendor_summary().await.unwrap_err();
        assert!(matches!(err, DbError::MissingTable(ref t) if t == "purchase_prices"));
    }

    #[tokio::test]
    async fn summary_aggregates_filters_and_left_joins() {
        let repo = memory_repo().await;
        seed_sources(&repo).await;

        let rows = repo.build_vendor_summary().await.unwrap();

        // (1,100), (1,200), (2,300); vendor 3 has no positive-price purchase with a price entry.
        assert_eq!(rows.len(), 3);
        let keys: Vec<(i64, i64)> = rows.iter().map(|r| (r.vendor_number, r.brand)).collect();
        assert_eq!(keys, vec![(2, 300), (1, 100), (1, 200)]);

        let rum = &rows[0];
        assert_eq!(rum.total_purchase_dollars, Some(dec!(250)));
        assert_eq!(rum.total_purchase_quantity, Some(dec!(20)));
        assert_eq!(rum.purchase_price, dec!(12.5));
        assert_eq!(rum.total_sales_dollars, Some(dec!(300)));
        // Vendor 2 has no invoices.
        assert_eq!(rum.freight_cost, None);

        let vodka = &rows[1];
        assert_eq!(vodka.vendor_name.as_deref(), Some("ALPHA SPIRITS "));
        assert_eq!(vodka.volume.as_deref(), Some("750"));
        assert_eq!(vodka.total_purchase_quantity, Some(dec!(10)));
        assert_eq!(vodka.total_purchase_dollars, Some(dec!(100)));
        assert_eq!(vodka.total_sales_dollars, Some(dec!(150)));
        assert_eq!(vodka.total_sales_quantity, Some(dec!(8)));
        assert_eq!(vodka.total_excise_tax, Some(dec!(0.75)));
        assert_eq!(vodka.freight_cost, Some(dec!(5)));

        let gin = &rows[2];
        assert_eq!(gin.total_sales_dollars, None);
        assert_eq!(gin.total_sales_quantity, None);
        assert_eq!(gin.freight_cost, Some(dec!(5)));
    }

    #[tokio::test]
    async fn summary_is_deterministic_and_ordered() {
        let repo = memory_repo().await;
        seed_sources(&repo).await;

        let first = repo.build_vendor_summary().await.unwrap();
        let second = repo.build_vendor_summary().await.unwrap();
        assert_eq!(first, second);

        for pair in first.windows(2) {
            assert!(pair[0].total_purchase_dollars >= pair[1].total_purchase_dollars);
        }
    }

    #[tokio::test]
    async fn summary_breaks_ties_by_vendor_then_brand() {
        let repo = memory_repo().await;
        repo.replace_table(&purchases(&[
            (5, "E", 20, "b", 1.0, 1, 10.0),
            (4, "D", 30, "c", 1.0, 1, 10.0),
            (5, "E", 10, "a", 1.0, 1, 10.0),
        ]))
        .await
        .unwrap();
        repo.replace_table(&purchase_prices(&[(10, 1.0, "750"), (20, 1.0, "750"), (30, 1.0, "750")]))
            .await
            .unwrap();
        repo.replace_table(&sales(&[])).await.unwrap();
        repo.replace_table(&vendor_invoice(&[])).await.unwrap();

        let keys: Vec<(i64, i64)> = repo
            .build_vendor_summary()
            .await
            .unwrap()
            .iter()
            .map(|r| (r.vendor_number, r.brand))
            .collect();
        assert_eq!(keys, vec![(4, 30), (5, 10), (5, 20)]);
    }

    #[tokio::test]
    async fn saved_summary_reads_back_in_order() {
        let repo = memory_repo().await;
        let row = |vendor: i64, dollars: Decimal, margin: Option<Decimal>| EnrichedSummaryRow {
            vendor_number: vendor,
            vendor_name: "ALPHA".to_string(),
            brand: 100,
            description: "Vodka".to_string(),
            purchase_price: dec!(10),
            actual_price: dec!(14.5),
            volume: 750.0,
            total_purchase_quantity: dec!(10),
            total_purchase_dollars: dollars,
            total_sales_dollars: dec!(0),
            total_sales_price: dec!(0),
            total_sales_quantity: dec!(0),
            total_excise_tax: dec!(0),
            freight_cost: dec!(2.5),
            gross_profit: -dollars,
            profit_margin: margin,
            stock_turnover: Some(dec!(0)),
            sales_to_purchase_ratio: Some(dec!(0)),
        };
        let rows = vec![row(1, dec!(200), None), row(2, dec!(100), Some(dec!(12.5)))];

        let written = repo.save_vendor_summary("vendor_sales_summary", &rows).await.unwrap();
        assert_eq!(written, 2);

        let all = repo.load_vendor_summary("vendor_sales_summary", None).await.unwrap();
        assert_eq!(all, rows);

        let head = repo.load_vendor_summary("vendor_sales_summary", Some(1)).await.unwrap();
        assert_eq!(head.len(), 1);
        assert_eq!(head[0].vendor_number, 1);
        assert_eq!(head[0].profit_margin, None);
    }

    #[tokio::test]
    async fn saving_an_empty_summary_creates_an_empty_table() {
        let repo = memory_repo().await;

        let written = repo.save_vendor_summary("vendor_sales_summary", &[]).await.unwrap();

        assert_eq!(written, 0);
        assert!(repo.table_exists("vendor_sales_summary").await.unwrap());
        assert!(repo.load_vendor_summary("vendor_sales_summary", None).await.unwrap().is_empty());
    }

    #[test]
    fn row_width_errors_surface_as_db_errors() {
        let err: DbError = core_types::CoreError::RowWidth {
            table: "vendor_sales_summary".to_string(),
            row: 1,
            expected: 18,
            found: 17,
        }
        .into();
        assert!(matches!(err, DbError::Core(_)));
        assert!(err.to_string().contains("expected 18"));
    }

    #[tokio::test]
    async fn loading_a_missing_summary_fails() {
        let repo = memory_repo().await;
        assert!(matches!(
            repo.load_vendor_summary("vendor_sales_summary", Some(5)).await,
            Err(DbError::MissingTable(_))
        ));
    }
}
