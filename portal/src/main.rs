use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use portal::app::{App, NavigationOutcome};
use portal::config::PortalConfig;
use portal::debug::{config::DebugConfig, logger};
use portal::services::api::{products, users};
use portal::services::session;
use portal::storage::FileStore;
use portal::AppError;
use shared::{ProductCreate, UserCreate};

#[derive(Parser, Debug)]
#[command(name = "portal", about = "Route-guarded client for the auth, user and product services")]
struct Cli {
    /// Overrides PORTAL_API_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session
    Login {
        username: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Drop the persisted session
    Logout,
    /// Show the cached profile of the logged-in user
    Whoami,
    /// Navigate to a route and print where the guard lets you land
    Navigate { path: String },
    Users(UsersCommand),
    Products(ProductsCommand),
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List,
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },
    /// Products owned by a user
    Products {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProductsSubcommand {
    List,
    Get {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        user_id: i64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let _log_guard = logger::init(&DebugConfig::from_env());

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = PortalConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
        config.validate()?;
    }

    let store = Arc::new(FileStore::open(&config.storage_path)?);
    let app = App::new(&config, store)?;

    let result = dispatch(&app, cli.command).await;

    if app.process_pending_events() > 0 {
        eprintln!("session expired; run `portal login <username>` again");
    }
    result
}

async fn dispatch(app: &App, command: Command) -> Result<(), AppError> {
    match command {
        Command::Login { username, password } => {
            let user = session::login(&app.api, &username, &password).await?;
            print_json(&user)
        }
        Command::Logout => {
            session::logout(&app.api);
            println!("logged out");
            Ok(())
        }
        Command::Whoami => match session::current_user(&app.api) {
            Some(user) => print_json(&user),
            None => {
                println!("not logged in");
                Ok(())
            }
        },
        Command::Navigate { path } => {
            match app.router.navigate(&path).await? {
                NavigationOutcome::Completed(route) => {
                    let title = route.page().map(|p| p.title()).unwrap_or("Not Found");
                    println!("{} ({})", route.path, title);
                }
                NavigationOutcome::Superseded => println!("navigation superseded"),
            }
            Ok(())
        }
        Command::Users(cmd) => match cmd.command {
            UsersSubcommand::List => print_json(&users::get_users(&app.api).await?),
            UsersSubcommand::Get { id } => print_json(&users::get_user(&app.api, id).await?),
            UsersSubcommand::Create { username, email, name } => {
                let user = UserCreate { username, email, name };
                print_json(&users::create_user(&app.api, &user).await?)
            }
            UsersSubcommand::Products { id } => {
                print_json(&users::get_user_products(&app.api, id).await?)
            }
        },
        Command::Products(cmd) => match cmd.command {
            ProductsSubcommand::List => print_json(&products::get_products(&app.api).await?),
            ProductsSubcommand::Get { id } => print_json(&products::get_product(&app.api, id).await?),
            ProductsSubcommand::Create { name, price, user_id } => {
                let product = ProductCreate { name, price, user_id };
                print_json(&products::create_product(&app.api, &product).await?)
            }
        },
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", render_json(value)?);
    Ok(())
}

fn render_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Output(e.to_string()))
}
