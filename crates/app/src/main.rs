//! Shopfront Application CLI

use std::{process, sync::Arc};

use clap::{Args, Parser, Subcommand};
use shopfront_app::{
    auth::{DEFAULT_TOKEN_TTL, TokenKeys},
    database::{self, Db},
    domain::users::{
        PgUsersService, UsersService,
        data::NewUser,
        records::Role,
    },
};

#[derive(Debug, Parser)]
#[command(name = "shopfront-app", about = "Shopfront CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(DbCommand),
    User(UserCommand),
}

#[derive(Debug, Args)]
struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending migrations
    Migrate,
}

#[derive(Debug, Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(CreateUserArgs),
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum RoleArg {
    Buyer,
    Seller,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Buyer => Self::Buyer,
            RoleArg::Seller => Self::Seller,
        }
    }
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    #[arg(long)]
    email: String,

    /// Initial password; read from the environment to keep it out of shell history
    #[arg(long, env = "SHOPFRONT_USER_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long, value_enum, default_value = "buyer")]
    role: RoleArg,

    #[arg(long)]
    location: Option<String>,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let database_url = cli
        .database_url
        .ok_or_else(|| "DATABASE_URL must be set".to_string())?;

    match cli.command {
        Commands::Db(DbCommand {
            command: DbSubcommand::Migrate,
        }) => migrate(&database_url).await,
        Commands::User(UserCommand {
            command: UserSubcommand::Create(args),
        }) => create_user(&database_url, args).await,
    }
}

async fn migrate(database_url: &str) -> Result<(), String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to run migrations: {error}"))?;

    println!("migrations applied");

    Ok(())
}

async fn create_user(database_url: &str, args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    // Registration never signs tokens, so any non-empty key will do.
    let keys = TokenKeys::from_secret("cli", DEFAULT_TOKEN_TTL)
        .map_err(|error| format!("failed to build token keys: {error}"))?;

    let service = PgUsersService::new(Db::new(pool), Arc::new(keys));

    let user = NewUser {
        email: args.email,
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
        role: args.role.into(),
        gender: None,
        location: args.location,
    }
    .normalized();

    garde::Validate::validate(&user).map_err(|report| format!("invalid user: {report}"))?;

    let user = service
        .register(user)
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("role: {}", user.role);

    Ok(())
}
