use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use std::collections::BTreeSet;

use teslo::cli::create_user;
use teslo_config::PasswordConfig;
use teslo_core::PasswordHasher;
use teslo_db::{PgUserStore, init_db_pool};
use teslo_models::Role;

#[derive(Parser)]
#[command(name = "teslo-cli")]
#[command(about = "Teslo CLI - Administrative tools for the Teslo auth service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user with an explicit role set
    CreateUser {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Role to grant: user, admin or super-user. Repeat for several.
        #[arg(short = 'r', long = "role")]
        roles: Vec<Role>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateUser {
            email,
            full_name,
            password,
            roles,
        } => handle_create_user(email, full_name, password, roles).await,
    }
}

async fn handle_create_user(
    email: Option<String>,
    full_name: Option<String>,
    password: Option<String>,
    roles: Vec<Role>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let full_name = match full_name {
        Some(full_name) => full_name,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    let store = PgUserStore::new(pool);

    let hasher = PasswordHasher::new(PasswordConfig::from_env().bcrypt_cost).map_err(|e| e.error)?;
    let roles: BTreeSet<Role> = roles.into_iter().collect();

    match create_user(&store, &hasher, &email, &full_name, &password, roles).await {
        Ok(user) => {
            let roles: Vec<&str> = user.roles.iter().map(Role::as_str).collect();
            println!("\n✅ User created successfully!");
            println!("   Id: {}", user.id);
            println!("   Email: {}", user.email);
            println!("   Roles: {}", roles.join(", "));
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating user: {}", e);
            std::process::exit(1);
        }
    }
}
