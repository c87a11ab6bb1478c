//! Record writers

use crate::prelude::{println, *};
use colored::Colorize;
use jira_ingest_core::record::Record;
use jira_ingest_core::schema::Schema;

/// Render one record per line as a JSON object keyed by column name
pub fn json_lines(schema: &Schema, records: &[Record]) -> Result<Vec<String>> {
    records
        .iter()
        .map(|record| {
            serde_json::to_string(&serde_json::Value::Object(record.to_json_object(schema)))
                .map_err(|e| eyre!("Failed to serialize record: {}", e))
        })
        .collect()
}

/// Print records as JSON lines on stdout
pub fn write_json_lines(schema: &Schema, records: &[Record]) -> Result<()> {
    for line in json_lines(schema, records)? {
        println!("{line}");
    }
    Ok(())
}

/// Print records as a table, one column per schema column
pub fn print_table(schema: &Schema, records: &[Record]) {
    let mut table = new_table();

    table.add_row(prettytable::Row::new(
        schema
            .columns()
            .iter()
            .map(|c| prettytable::Cell::new(&c.name.bold().cyan().to_string()))
            .collect(),
    ));

    for record in records {
        table.add_row(prettytable::Row::new(
            record
                .values()
                .iter()
                .map(|v| {
                    if v.is_null() {
                        prettytable::Cell::new(&"null".bright_black().to_string())
                    } else {
                        prettytable::Cell::new(&v.to_string())
                    }
                })
                .collect(),
        ));
    }

    table.printstd();
}
