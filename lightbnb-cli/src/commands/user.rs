//! `lightbnb user` - look up and create users

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{NewUser, Store};

use super::Outcome;

#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Find a user by exact email
    Email {
        /// Email address to look up
        email: String,
    },
    /// Find a user by id
    Id {
        /// User id
        id: i32,
    },
    /// Create a user
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address (must not already be registered)
        #[arg(long)]
        email: String,
        /// Password, as it should be stored
        #[arg(long, env = "LIGHTBNB_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

pub async fn run<S: Store + ?Sized>(store: &S, args: UserArgs) -> Result<Outcome> {
    match args.command {
        UserCommands::Email { email } => {
            let user = store
                .get_user_with_email(&email)
                .await
                .context("user lookup failed")?;
            Outcome::found_or(user, || format!("no user with email '{email}'"))
        }
        UserCommands::Id { id } => {
            let user = store
                .get_user_with_id(id)
                .await
                .context("user lookup failed")?;
            Outcome::found_or(user, || format!("no user with id {id}"))
        }
        UserCommands::Add {
            name,
            email,
            password,
        } => {
            let user = store
                .add_user(&NewUser {
                    name,
                    email,
                    password,
                })
                .await
                .context("failed to add user")?;
            tracing::info!(user_id = user.id, "user added");
            Outcome::json(&user)
        }
    }
}
