use std::path::PathBuf;

use tabled::builder::Builder;

use crate::{
    error, success,
    table::{CellValue, QuerySet, Table},
    warning,
};

/// Prints the rows of a JSON table containing any (or, with `all`, every)
/// of `values`.
///
/// The file holds `{"columns": [...], "rows": [[...], ...]}`; list cells are
/// collections and all cells must share the same shape.
pub async fn filter(path: PathBuf, values: Vec<String>, all: bool) {
    let content = match async_fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => error!("Cannot read {}. Err: {}", path.display(), e),
    };

    let table = match Table::from_json(&content) {
        Ok(table) => table,
        Err(e) => error!("Cannot load table {}. Err: {}", path.display(), e),
    };

    let query: QuerySet = values.iter().map(|v| CellValue::parse(v)).collect();
    let mask = if all {
        table.contains_all(query)
    } else {
        table.contains_any(query)
    };

    let rows = table.select(&mask);
    if rows.is_empty() {
        warning!("No row matches.");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().cloned());
    for row in &rows {
        builder.push_record(row.iter().map(|cell| cell.to_string()));
    }
    println!("{}", builder.build());

    success!("{} of {} rows match.", rows.len(), table.len());
}
