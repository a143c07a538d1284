use crate::domain::model::{Catalog, Item};
use crate::domain::money::{Money, ProfitRate};
use crate::domain::ports::SourceColumns;
use crate::utils::error::{OptimizerError, Result};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

struct ColumnIndex {
    name: usize,
    cost: usize,
    profit: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, columns: &SourceColumns) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| OptimizerError::MissingColumn {
                    column: column.to_string(),
                })
        };

        Ok(Self {
            name: find(&columns.name)?,
            cost: find(&columns.cost)?,
            profit: find(&columns.profit)?,
        })
    }
}

/// Turns one record into an item, rejecting anything the solvers must not see.
fn parse_record(record: &csv::StringRecord, index: &ColumnIndex) -> std::result::Result<Item, String> {
    let field = |i: usize| record.get(i).unwrap_or("").trim();

    let name = field(index.name);
    if name.is_empty() {
        return Err("empty name".to_string());
    }

    let cost = Money::parse(field(index.cost)).map_err(|e| e.to_string())?;
    if !cost.is_positive() {
        return Err(format!("non-positive cost {}", cost));
    }

    let rate = ProfitRate::parse(field(index.profit)).map_err(|e| e.to_string())?;
    if rate.is_zero() {
        return Err("non-positive profit rate".to_string());
    }

    Item::new(name, cost, rate).map_err(|e| e.to_string())
}

/// Reads a header-first CSV into a catalog, keeping source order.
///
/// With `skip_invalid` bad rows are logged and dropped, otherwise the first
/// one aborts the load. Short or unreadable records count as bad rows. Row
/// numbers are 1-based and count the header.
pub fn parse_catalog(
    data: &[u8],
    columns: &SourceColumns,
    skip_invalid: bool,
) -> Result<(Catalog, LoadReport)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let index = ColumnIndex::resolve(&headers, columns)?;

    let mut catalog = Catalog::new();
    let mut report = LoadReport::default();
    let mut seen = HashSet::new();

    for (offset, record) in reader.records().enumerate() {
        let row = offset + 2;
        // 欄位不足的列會得到空字串，照一般無效列處理
        let parsed = record
            .map_err(|e| e.to_string())
            .and_then(|record| parse_record(&record, &index));

        match parsed {
            Ok(item) => {
                if !seen.insert(item.name().to_string()) {
                    tracing::debug!("Duplicate name '{}' at row {}, kept as a separate item", item.name(), row);
                }
                catalog.push(item);
                report.loaded += 1;
            }
            Err(reason) if skip_invalid => {
                tracing::warn!("Skipping row {}: {}", row, reason);
                report.skipped += 1;
            }
            Err(reason) => return Err(OptimizerError::InvalidItem { row, reason }),
        }
    }

    tracing::debug!(
        "Loaded {} items, skipped {} invalid rows",
        report.loaded,
        report.skipped
    );
    Ok((catalog, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "name,cost,profit\nShare-A,20,5\nShare-B,30.5,10\nShare-C,0,15\nShare-D,-4,12\nShare-E,12,0\n";

    #[test]
    fn test_parse_skips_invalid_rows() {
        let (catalog, report) = parse_catalog(SAMPLE.as_bytes(), &SourceColumns::default(), true).unwrap();
        assert_eq!(report, LoadReport { loaded: 2, skipped: 3 });
        assert_eq!(catalog.items()[1].name(), "Share-B");
        assert_eq!(catalog.items()[1].cost(), Money::from_cents(3050));
    }

    #[test]
    fn test_parse_strict_reports_row() {
        let err = parse_catalog(SAMPLE.as_bytes(), &SourceColumns::default(), false).unwrap_err();
        assert!(matches!(err, OptimizerError::InvalidItem { row: 4, .. }));
    }

    #[test]
    fn test_custom_columns() {
        let data = "Action,Price,Rate\nX, 10 , 7.5%\n";
        let columns = SourceColumns {
            name: "Action".to_string(),
            cost: "Price".to_string(),
            profit: "Rate".to_string(),
        };
        let (catalog, _) = parse_catalog(data.as_bytes(), &columns, false).unwrap();
        assert_eq!(catalog.items()[0].profit_rate(), ProfitRate::from_basis_points(750));
    }

    #[test]
    fn test_missing_column() {
        let err = parse_catalog(b"name,price\nA,1\n", &SourceColumns::default(), true).unwrap_err();
        assert!(matches!(err, OptimizerError::MissingColumn { ref column } if column == "cost"));
    }

    #[test]
    fn test_short_rows_follow_skip_policy() {
        let data = "name,cost,profit\nA,10,5\nB,20\nC,30,7\n";

        let (catalog, report) = parse_catalog(data.as_bytes(), &SourceColumns::default(), true).unwrap();
        assert_eq!(report, LoadReport { loaded: 2, skipped: 1 });
        assert_eq!(catalog.items()[1].name(), "C");

        let err = parse_catalog(data.as_bytes(), &SourceColumns::default(), false).unwrap_err();
        assert!(matches!(err, OptimizerError::InvalidItem { row: 3, .. }));
    }

    #[test]
    fn test_unreadable_record_is_skipped() {
        let mut data = b"name,cost,profit\nA,10,5\n".to_vec();
        data.extend_from_slice(b"\xff\xfe,20,5\n");
        data.extend_from_slice(b"C,30,7\n");

        let (_, report) = parse_catalog(&data, &SourceColumns::default(), true).unwrap();
        assert_eq!(report, LoadReport { loaded: 2, skipped: 1 });

        let err = parse_catalog(&data, &SourceColumns::default(), false).unwrap_err();
        assert!(matches!(err, OptimizerError::InvalidItem { row: 3, .. }));
    }

    #[test]
    fn test_french_headers() {
        let data = "Action,Coût,Bénéfice\nAction-1,20,5\nAction-2,30,10\n";
        let columns = SourceColumns {
            name: "Action".to_string(),
            cost: "Coût".to_string(),
            profit: "Bénéfice".to_string(),
        };
        let (catalog, report) = parse_catalog(data.as_bytes(), &columns, false).unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(catalog.items()[1].cost(), Money::from_cents(3000));
        assert_eq!(catalog.items()[1].profit_rate(), ProfitRate::from_basis_points(1000));
    }
}
