//! Expense ledger: CSV input into a group, settlement report out.
//!
//! Input rows are applied in order. Invalid rows are logged and skipped so a
//! single bad line does not discard the rest of the ledger.

use crate::error::Result;
use crate::expense::ExpenseRecord;
use crate::group::Group;
use crate::settlement::Report;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{Read, Write};

/// Builds a [`Group`] from expense rows.
///
/// # Row Semantics
///
/// The first row naming a participant adds them to the group, so group
/// order (and therefore settlement order) is first-appearance order.
/// Later rows append expenses to that participant.
#[derive(Debug, Default)]
pub struct Ledger {
    group: Group,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger {
            group: Group::new(),
        }
    }

    /// Continues from an existing group snapshot.
    pub fn from_group(group: Group) -> Self {
        Ledger { group }
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn into_group(self) -> Group {
        self.group
    }

    /// Reads `name,amount,label` rows from a CSV reader.
    ///
    /// Invalid records are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<ExpenseRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                    continue;
                }
            };

            let parsed = match record.parse() {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Row {}: {}, skipping", row_num, e);
                    continue;
                }
            };

            match self.group.record(&parsed.name, parsed.entry) {
                Ok(true) => debug!("Row {}: Added participant {}", row_num, parsed.name),
                Ok(false) => debug!("Row {}: Recorded expense for {}", row_num, parsed.name),
                Err(e) => warn!("Row {}: {}, skipping", row_num, e),
            }
        }

        Ok(())
    }

    /// Computes the report for the current group.
    pub fn report(&self) -> Report {
        Report::from_group(&self.group)
    }

    /// Writes the settlement report as CSV.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        write_report(&self.report(), writer)
    }
}

/// Writes a report as three CSV tables separated by blank lines:
/// `total,average`, then `name,paid,delta`, then `from,to,amount`.
///
/// All monetary values are formatted with exactly 2 decimal places.
pub fn write_report<W: Write>(report: &Report, mut writer: W) -> Result<()> {
    write_table(
        &mut writer,
        ["total", "average"],
        [[
            report.summary.total.to_string(),
            report.summary.average.to_string(),
        ]],
    )?;
    writer.write_all(b"\n")?;

    write_table(
        &mut writer,
        ["name", "paid", "delta"],
        report
            .contributions
            .iter()
            .map(|c| [c.name.clone(), c.paid.to_string(), c.delta.to_string()]),
    )?;
    writer.write_all(b"\n")?;

    write_table(
        &mut writer,
        ["from", "to", "amount"],
        report
            .transfers
            .iter()
            .map(|t| [t.from.clone(), t.to.clone(), t.amount.to_string()]),
    )?;

    writer.flush()?;
    Ok(())
}

fn write_table<W, const N: usize>(
    writer: &mut W,
    header: [&str; N],
    rows: impl IntoIterator<Item = [String; N]>,
) -> Result<()>
where
    W: Write,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(header)?;
    for row in rows {
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn process_csv_str(csv: &str) -> Ledger {
        let mut ledger = Ledger::new();
        ledger.process_csv(Cursor::new(csv)).unwrap();
        ledger
    }

    fn output_of(ledger: &Ledger) -> String {
        let mut output = Vec::new();
        ledger.write_output(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_rows_accumulate_per_participant() {
        let csv = r#"name,amount,label
A,100,dinner
B,50,taxi
A,200,hotel"#;

        let ledger = process_csv_str(csv);
        let group = ledger.group();
        assert_eq!(group.len(), 2);
        assert_eq!(group.get("A").unwrap().total_paid().to_string(), "300.00");
        assert_eq!(group.get("A").unwrap().expenses()[1].label(), "hotel");
        assert_eq!(group.get("B").unwrap().total_paid().to_string(), "50.00");
    }

    #[test]
    fn test_label_column_is_optional() {
        let csv = r#"name,amount
A,10
B,20"#;

        let ledger = process_csv_str(csv);
        assert_eq!(ledger.group().len(), 2);
        assert_eq!(ledger.group().get("B").unwrap().expenses()[0].label(), "");
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let csv = r#"name,amount,label
A,300,rent
,10,nobody
B,abc,typo
C,-5,refund
B
C,"#;

        let ledger = process_csv_str(csv);
        let group = ledger.group();
        let names: Vec<&str> = group.participants().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(group.get("B").unwrap().expenses().is_empty());
        assert!(group.get("C").unwrap().expenses().is_empty());
    }

    #[test]
    fn test_oversized_amounts_are_skipped() {
        let csv = r#"name,amount,label
A,50000000000000000000000000000,
A,50000000000000000000000000000,
A,1_000,
A,100,
B,0,"#;

        let ledger = process_csv_str(csv);
        let group = ledger.group();
        assert_eq!(group.get("A").unwrap().expenses().len(), 1);

        let report = ledger.report();
        assert_eq!(report.summary.total.to_string(), "100.00");
        assert_eq!(report.transfers.len(), 1);
        assert_eq!(report.transfers[0].to_string(), "B pays A 50.00");
    }

    #[test]
    fn test_largest_accepted_amounts_settle() {
        let csv = r#"name,amount
A,1000000000000000
A,1000000000000000
B,1000000000000000
C,0"#;

        let report = process_csv_str(csv).report();
        assert_eq!(report.summary.total.to_string(), "3000000000000000.00");
        assert_eq!(
            report
                .transfers
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>(),
            ["C pays A 1000000000000000.00"]
        );
    }

    #[test]
    fn test_whitespace_handling() {
        let csv = r#"name, amount, label
 A , 10.5 , snacks
B, 4.5,"#;

        let ledger = process_csv_str(csv);
        assert_eq!(
            ledger.group().get("A").unwrap().total_paid().to_string(),
            "10.50"
        );
        assert_eq!(
            ledger.group().get("B").unwrap().total_paid().to_string(),
            "4.50"
        );
    }

    #[test]
    fn test_from_group_continues_existing_snapshot() {
        let first = process_csv_str("name,amount\nA,10\n");
        let mut ledger = Ledger::from_group(first.into_group());
        ledger.process_csv(Cursor::new("name,amount\nA,5\nB,0\n")).unwrap();
        assert_eq!(
            ledger.group().get("A").unwrap().total_paid().to_string(),
            "15.00"
        );
        assert_eq!(ledger.group().len(), 2);
    }

    #[test]
    fn test_output_format() {
        let csv = r#"name,amount,label
A,150,
B,90,
C,60,"#;

        let output = output_of(&process_csv_str(csv));
        let expected = "total,average\n\
                        300.00,100.00\n\
                        \n\
                        name,paid,delta\n\
                        A,150.00,50.00\n\
                        B,90.00,-10.00\n\
                        C,60.00,-40.00\n\
                        \n\
                        from,to,amount\n\
                        B,A,10.00\n\
                        C,A,40.00\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_output_for_empty_ledger() {
        let output = output_of(&Ledger::new());
        assert_eq!(
            output,
            "total,average\n0.00,0.00\n\nname,paid,delta\n\nfrom,to,amount\n"
        );
    }

    #[test]
    fn test_output_quotes_names_with_commas() {
        let csv = "name,amount\n\"Smith, J\",20\nLee,0\n";
        let output = output_of(&process_csv_str(csv));
        assert!(output.contains("Lee,\"Smith, J\",10.00"));
    }
}
