//! `lightbnb reservations` - a guest's upcoming and past stays

use anyhow::{Context, Result};
use clap::Parser;
use lightbnb_db::{Store, DEFAULT_LIMIT};

use super::Outcome;

#[derive(Parser, Debug)]
pub struct ReservationsArgs {
    /// Guest user id
    pub guest_id: i32,

    /// Maximum number of reservations to return
    #[arg(long, short = 'n', default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

pub async fn run<S: Store + ?Sized>(store: &S, args: ReservationsArgs) -> Result<Outcome> {
    let reservations = store
        .get_all_reservations(args.guest_id, args.limit)
        .await
        .with_context(|| format!("failed to list reservations for guest {}", args.guest_id))?;
    Outcome::json(&reservations)
}
