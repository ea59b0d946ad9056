//! Gradescope roster built from an NYU Classes roster

use tracing::{debug, warn};

use crate::error::Result;
use crate::nyuclasses::ClassesRoster;
use crate::table::{Cell, Table};

pub const FULL_NAME_COLUMN: &str = "Full Name";
pub const EMAIL_COLUMN: &str = "Email";
pub const NETID_COLUMN: &str = "NetID";

/// `Last, First` becomes `First Last`. Other names are returned unchanged.
pub fn display_name(roster_name: &str) -> Option<String> {
    let (last, first) = roster_name.split_once(", ")?;
    Some(format!("{} {}", first.trim(), last.trim()))
}

/// Build the `Full Name,Email,NetID` roster Gradescope imports.
///
/// The NetID is the NYU Classes `Student ID` and the email address is
/// `<NetID>@<email_domain>`.
pub fn roster_table(roster: &ClassesRoster, email_domain: &str) -> Result<Table> {
    let mut table = Table::new(vec![
        FULL_NAME_COLUMN.to_string(),
        EMAIL_COLUMN.to_string(),
        NETID_COLUMN.to_string(),
    ]);
    for (row, (netid, name)) in roster.identities().enumerate() {
        let name = name.unwrap_or_default();
        let full_name = display_name(&name).unwrap_or_else(|| {
            warn!(row = row + 1, %name, "student name is not \"Last, First\"");
            name.clone()
        });
        let (email, netid) = match netid {
            Some(netid) => (Cell::Text(format!("{}@{}", netid, email_domain)), Cell::Text(netid)),
            None => {
                warn!(row = row + 1, %name, "student has no ID");
                (Cell::Empty, Cell::Empty)
            }
        };
        table.push_row(vec![Cell::parse(&full_name), email, netid])?;
    }
    debug!(students = table.len(), "built Gradescope roster");
    Ok(table)
}
