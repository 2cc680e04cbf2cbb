//! Subcommand handlers

use anyhow::{bail, Context, Result};
use lightbnb_db::{
    migrate as run_migrations, Limit, NewProperty, NewUser, PgPool, PropertyFilter, PropertyRepo,
    ReservationRepo, UserRepo,
};
use serde::Serialize;
use tracing::info;

use crate::{PropertyArgs, PropertyCommand, ReservationsArgs, SearchArgs, UserArgs, UserCommand};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn migrate(pool: &PgPool) -> Result<()> {
    run_migrations(pool).await.context("Migration failed")?;
    info!("Schema is up to date");
    Ok(())
}

pub async fn user(pool: &PgPool, args: UserArgs) -> Result<()> {
    let repo = UserRepo::new(pool);

    match args.command {
        UserCommand::Email { email } => match repo.find_by_email(&email).await? {
            Some(user) => print_json(&user),
            None => bail!("No user with email {}", email),
        },
        UserCommand::Id { id } => match repo.find_by_id(id).await? {
            Some(user) => print_json(&user),
            None => bail!("No user with id {}", id),
        },
        UserCommand::Create {
            name,
            email,
            password,
        } => {
            let new_user = NewUser::new(name, email, password)?;
            let user = repo
                .create(&new_user)
                .await
                .context("Failed to create user")?;
            info!(user_id = user.id, "Created user");
            print_json(&user)
        }
    }
}

pub async fn reservations(pool: &PgPool, args: ReservationsArgs) -> Result<()> {
    let rows = ReservationRepo::new(pool)
        .list_for_guest(args.guest_id, Limit::from(args.limit))
        .await?;
    print_json(&rows)
}

pub async fn search(pool: &PgPool, args: SearchArgs) -> Result<()> {
    let filter = PropertyFilter {
        city: args.city,
        minimum_price_per_night: args.min_price,
        maximum_price_per_night: args.max_price,
        owner_id: args.owner_id,
        minimum_rating: args.min_rating,
    };

    let rows = PropertyRepo::new(pool)
        .search(&filter, Limit::from(args.limit))
        .await?;
    info!(count = rows.len(), "Search complete");
    print_json(&rows)
}

pub async fn property(pool: &PgPool, args: PropertyArgs) -> Result<()> {
    match args.command {
        PropertyCommand::Add { file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let listing: NewProperty = serde_json::from_str(&contents)
                .with_context(|| format!("Invalid listing in {}", file.display()))?;

            let property = PropertyRepo::new(pool)
                .create(&listing)
                .await
                .context("Failed to create property")?;
            info!(property_id = property.id, "Created property");
            print_json(&property)
        }
    }
}
