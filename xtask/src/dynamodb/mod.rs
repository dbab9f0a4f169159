//! Tasks for the users table: `deploy` creates or destroys it, `seed` fills it
//! with demo users.
//!
//! Region, endpoint and table names are read the same way the server reads
//! them (`userstore::config::Config`), so both always talk to the same table.

mod apply;
mod error;
mod plan;
mod schema;
mod seed;
mod state;

use dialoguer::Confirm;
use error::{DynamodbError, Result};
use userstore::config::Config;
use userstore::storage::dynamodb::{create_client, target_display};

use crate::prelude::*;
use crate::Output;
use plan::Plan;
use schema::UsersTable;

#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Create the users table, or destroy it with --destroy.
    Deploy(DeployCommand),

    /// Insert demo users into the users table.
    Seed(SeedCommand),
}

/// Table and index names given on the command line win over the environment.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TableNames {
    /// Users table [default: DYNAMODB_TABLE_NAME or "Users"]
    #[arg(long)]
    pub table_name: Option<String>,

    /// Email index [default: DYNAMODB_EMAIL_INDEX or "EmailIndex"]
    #[arg(long)]
    pub email_index: Option<String>,
}

impl TableNames {
    fn apply_to(self, mut config: Config) -> Config {
        if let Some(table_name) = self.table_name {
            config.table_name = table_name;
        }
        if let Some(email_index) = self.email_index {
            config.email_index = email_index;
        }
        config
    }
}

#[derive(Debug, clap::Parser)]
#[command(long_about = "Create or destroy the users table.

Without --destroy the table is created keyed on a numeric `id`, with a
Global Secondary Index on `email` that carries `username` but never
`password`. An existing table that lacks the index gets it added.

A plan is printed first and applied only after confirmation.

Environment variables:
  AWS_ENDPOINT_URL      - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION            - AWS region (defaults to us-east-1)
  DYNAMODB_TABLE_NAME   - Users table (defaults to Users)
  DYNAMODB_EMAIL_INDEX  - Email index (defaults to EmailIndex)")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Delete the table and all of its users.
    #[arg(long)]
    pub destroy: bool,

    #[command(flatten)]
    pub names: TableNames,
}

#[derive(Debug, clap::Parser)]
#[command(long_about = "Generate and insert demo users.

Usernames and emails are unique within one run. Users are written in
batches of up to 25 items.")]
pub struct SeedCommand {
    /// Number of users to generate.
    #[arg(long, default_value = "10")]
    pub count: u32,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub names: TableNames,
}

pub async fn run(command: DynamodbCommand, output: Output) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(cmd) => {
            let config = cmd.names.apply_to(Config::from_env());
            deploy(&config, cmd.destroy, cmd.force, output).await
        }
        DynamodbAction::Seed(cmd) => {
            let config = cmd.names.apply_to(Config::from_env());
            seed(&config, cmd.count, cmd.force, output).await
        }
    }
}

fn confirm(prompt: &str, default: bool) -> Result<()> {
    if Confirm::new().with_prompt(prompt).default(default).interact()? {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}

async fn deploy(config: &Config, destroy: bool, force: bool, output: Output) -> Result<()> {
    let table = UsersTable::from_config(config);
    let client = create_client(config).await;
    let current = state::fetch(&client, &table.table_name).await?;

    let plan = if destroy {
        Plan::destroy(current.as_ref(), &table)
    } else {
        Plan::deploy(current.as_ref(), &table)
    };

    if !output.quiet {
        aprintln!("{} {}", p_b("Target:"), target_display(config));
        aprintln!();
        aprintln!("{}", p_c("Plan:"));
        for line in plan.describe() {
            let marker = line.chars().next();
            let painted = match marker {
                Some('+') => p_g(&line),
                Some('~') => p_y(&line),
                Some('-') => p_r(&line),
                _ => line,
            };
            aprintln!("  {}", painted);
        }
        aprintln!();
    }

    let Some((prompt, default)) = plan.confirmation() else {
        if !output.quiet {
            aprintln!("{}", p_g("Nothing to do."));
        }
        return Ok(());
    };

    if !force {
        confirm(prompt, default)?;
    }

    apply::apply(&client, &plan).await?;

    if !output.quiet {
        aprintln!("{}", p_g("Done."));
    }
    Ok(())
}

async fn seed(config: &Config, count: u32, force: bool, output: Output) -> Result<()> {
    let client = create_client(config).await;

    if state::fetch(&client, &config.table_name).await?.is_none() {
        return Err(DynamodbError::TableNotFound {
            table_name: config.table_name.clone(),
        });
    }

    let users = seed::generate_seed_users(count);

    if !output.quiet {
        aprintln!("{} {}", p_b("Target:"), target_display(config));
        aprintln!("{} {}", p_b("Table:"), config.table_name);
        aprintln!("{} {}", p_b("User count:"), users.len());
        aprintln!();
    }
    if output.verbose {
        for user in &users {
            aprintln!("  {} - {} <{}>", user.id, user.username, user.email);
        }
        aprintln!();
    }

    if !force {
        confirm(&format!("Insert {} users?", users.len()), true)?;
    }

    let inserted = seed::seed_users(&client, &config.table_name, &users).await?;

    if !output.quiet {
        aprintln!("{} {} users inserted.", p_g("Success:"), inserted);
    }
    Ok(())
}
