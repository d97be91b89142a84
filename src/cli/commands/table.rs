use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::Table;
use rusqlite::params;

/// Handle the `table` command: pretty-print PRAGMA table_info for a table.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Table { table } = cmd {
        let pool = DbPool::new(&cfg.database_file()?)?;

        let mut stmt = pool.conn.prepare(
            "SELECT cid, name, type, \"notnull\" FROM pragma_table_info(?1) ORDER BY cid",
        )?;
        let rows = stmt.query_map(params![table], |row| {
            Ok(vec![
                row.get::<_, i64>(0)?.to_string(),
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?.to_string(),
            ])
        })?;

        let mut out = Table::new(&["id", "name", "type", "nn"]);
        for r in rows {
            out.add_row(r?);
        }

        if out.rows.is_empty() {
            println!("Table does not exist.");
        } else {
            print!("{}", out.render());
        }
    }

    Ok(())
}
