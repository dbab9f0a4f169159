//! What `deploy` would change, decided from the live table state.

use super::schema::UsersTable;
use super::state::TableState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    CreateTable(UsersTable),
    AddEmailIndex(UsersTable),
    DeleteTable(UsersTable),
    UpToDate(UsersTable),
    AlreadyGone(UsersTable),
}

impl Plan {
    /// An existing table is never recreated, only completed.
    pub fn deploy(current: Option<&TableState>, table: &UsersTable) -> Self {
        match current {
            None => Plan::CreateTable(table.clone()),
            Some(state) if !state.has_index(&table.email_index) => {
                Plan::AddEmailIndex(table.clone())
            }
            Some(_) => Plan::UpToDate(table.clone()),
        }
    }

    pub fn destroy(current: Option<&TableState>, table: &UsersTable) -> Self {
        match current {
            Some(_) => Plan::DeleteTable(table.clone()),
            None => Plan::AlreadyGone(table.clone()),
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Plan::UpToDate(_) | Plan::AlreadyGone(_))
    }

    /// Prompt shown before applying, and whether it defaults to yes.
    pub fn confirmation(&self) -> Option<(&'static str, bool)> {
        match self {
            Plan::CreateTable(_) | Plan::AddEmailIndex(_) => Some(("Apply these changes?", true)),
            Plan::DeleteTable(_) => Some((
                "Are you sure you want to delete this table? ALL DATA WILL BE LOST",
                false,
            )),
            Plan::UpToDate(_) | Plan::AlreadyGone(_) => None,
        }
    }

    /// Human readable lines; `+`, `~` and `-` prefix additions, updates and
    /// deletions.
    pub fn describe(&self) -> Vec<String> {
        match self {
            Plan::CreateTable(table) => vec![
                format!("+ Create table: {}", table.table_name),
                "  Partition key: id (N)".to_string(),
                format!("  + GSI: {}", table.email_index),
                "    Partition key: email (S)".to_string(),
                "    Projection: INCLUDE username".to_string(),
                "  Billing: PAY_PER_REQUEST".to_string(),
            ],
            Plan::AddEmailIndex(table) => vec![
                format!("~ Update table: {}", table.table_name),
                format!("  + Add GSI: {}", table.email_index),
            ],
            Plan::DeleteTable(table) => vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table.table_name
            )],
            Plan::UpToDate(table) => vec![format!("= Table '{}' is up to date", table.table_name)],
            Plan::AlreadyGone(table) => {
                vec![format!("= Table '{}' does not exist", table.table_name)]
            }
        }
    }
}
