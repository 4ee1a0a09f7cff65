// src/export.rs
// CardRecord → delimited rows. Column order is fixed; which columns appear is
// decided by the caller (full list per deck, populated superset when combined).

use std::io::Write;

use crate::config::options::ExportFormat;
use crate::model::CardRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    DeckId,
    DeckTitle,
    DeckSource,
    Category,
    Count,
    Name,
    Type,
    Cmc,
    Price,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::DeckId,
        Column::DeckTitle,
        Column::DeckSource,
        Column::Category,
        Column::Count,
        Column::Name,
        Column::Type,
        Column::Cmc,
        Column::Price,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::DeckId => "deck_id",
            Column::DeckTitle => "deck_title",
            Column::DeckSource => "deck_source",
            Column::Category => "category",
            Column::Count => "count",
            Column::Name => "name",
            Column::Type => "type",
            Column::Cmc => "cmc",
            Column::Price => "price",
        }
    }

    /// Always emitted, even when every record would leave them empty.
    pub fn is_required(&self) -> bool {
        matches!(self, Column::DeckId | Column::Count | Column::Name)
    }

    pub fn value(&self, rec: &CardRecord) -> Option<String> {
        match self {
            Column::DeckId => Some(rec.deck_id.clone()),
            Column::DeckTitle => rec.deck_title.clone(),
            Column::DeckSource => rec.deck_source.clone(),
            Column::Category => rec.category.clone(),
            Column::Count => Some(rec.effective_count().to_string()),
            Column::Name => Some(rec.name.clone()),
            Column::Type => rec.card_type.map(|t| s!(t.as_str())),
            Column::Cmc => rec.cmc.map(|n| n.to_string()),
            Column::Price => rec.price.clone(),
        }
    }
}

pub fn headers(cols: &[Column]) -> Vec<&'static str> {
    cols.iter().map(Column::header).collect()
}

/// Absent values become empty cells.
pub fn build_row(rec: &CardRecord, cols: &[Column]) -> Vec<String> {
    cols.iter().map(|c| c.value(rec).unwrap_or_default()).collect()
}

/// Header line plus one row per record.
pub fn write_records<W: Write>(
    w: W,
    cols: &[Column],
    records: &[CardRecord],
    format: ExportFormat,
) -> Result<(), csv::Error> {
    let mut out = writer(w, format);
    out.write_record(headers(cols))?;
    for rec in records {
        out.write_record(build_row(rec, cols))?;
    }
    out.flush()?;
    Ok(())
}

/// Generic table: header line plus already-shaped rows.
pub fn write_table<W: Write>(
    w: W,
    headers: &[String],
    rows: &[Vec<String>],
    format: ExportFormat,
) -> Result<(), csv::Error> {
    let mut out = writer(w, format);
    out.write_record(headers)?;
    for r in rows {
        out.write_record(r)?;
    }
    out.flush()?;
    Ok(())
}

fn writer<W: Write>(w: W, format: ExportFormat) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(format.delim())
        .flexible(false)
        .from_writer(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CardType;

    fn bolt() -> CardRecord {
        CardRecord {
            deck_id: s!("d1"),
            category: Some(s!("Instants")),
            count: Some(2),
            name: s!("Lightning Bolt"),
            card_type: Some(CardType::Instant),
            price: Some(s!("$0.50")),
            ..CardRecord::default()
        }
    }

    #[test]
    fn absent_fields_are_empty_cells() {
        let row = build_row(&bolt(), &Column::ALL);
        assert_eq!(row, ["d1", "", "", "Instants", "2", "Lightning Bolt", "Instant", "", "$0.50"]);
    }

    #[test]
    fn absent_count_exports_one() {
        let rec = CardRecord { deck_id: s!("d"), name: s!("Sol Ring"), ..CardRecord::default() };
        assert_eq!(build_row(&rec, &[Column::Count, Column::Name]), ["1", "Sol Ring"]);
    }

    #[test]
    fn csv_quotes_and_tsv_tabs() {
        let mut rec = bolt();
        rec.name = s!("Borrowing 100,000 Arrows");

        let mut buf = Vec::new();
        write_records(&mut buf, &[Column::Name, Column::Price], &[rec.clone()], ExportFormat::Csv).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "name,price\n\"Borrowing 100,000 Arrows\",$0.50\n");

        let mut buf = Vec::new();
        write_records(&mut buf, &[Column::Name, Column::Price], &[rec], ExportFormat::Tsv).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "name\tprice\nBorrowing 100,000 Arrows\t$0.50\n");
    }

    #[test]
    fn header_only_when_no_records() {
        let mut buf = Vec::new();
        write_records(&mut buf, &[Column::DeckId, Column::Name], &[], ExportFormat::Csv).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "deck_id,name\n");
    }
}
