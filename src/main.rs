use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use admin::api::{HttpAdminClient, ResourceApi};
use admin::config::ApiConfig;
use admin::error::AppError;
use admin::export::{self, ExportFormat, Report};
use admin::listing::SortSpec;
use admin::models::{Category, Course, Enrollment, LoginRequest, RegisterRequest, Resource, User};
use admin::render::render_table;
use admin::services::{AuthService, Confirm, DashboardService, Screen, Severity};
use admin::session::{FileSessionStore, SessionStore};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser, Debug)]
#[command(name = "admin", about = "Course platform administration console")]
struct Cli {
    /// Overrides ADMIN_API_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Overrides ADMIN_SESSION_FILE
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value_t = 1)]
        role_id: i64,
    },
    Logout,
    Whoami,
    Dashboard,
    Courses {
        #[command(subcommand)]
        action: EntityAction,
    },
    Categories {
        #[command(subcommand)]
        action: EntityAction,
    },
    Enrollments {
        #[command(subcommand)]
        action: EntityAction,
    },
    Users {
        #[command(subcommand)]
        action: EntityAction,
    },
}

#[derive(Subcommand, Debug)]
enum EntityAction {
    List {
        #[command(flatten)]
        query: QueryArgs,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 5)]
        per_page: usize,
    },
    Show {
        id: i64,
    },
    Create {
        /// Draft JSON file, or `-` for stdin
        #[arg(long)]
        json: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        json: String,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    Export {
        /// print, pdf, word, excel, csv or json
        #[arg(long)]
        format: ExportFormat,
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct QueryArgs {
    #[arg(long)]
    search: Option<String>,
    #[arg(long, default_value = "id")]
    sort: String,
    #[arg(long)]
    desc: bool,
}

struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

#[tokio::main]
async fn main() -> CliResult {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "admin=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ApiConfig::new_from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(session_file) = cli.session_file {
        config.session_file = session_file;
    }
    info!("Using API at {}", config.base_url);

    let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(config.session_file.clone()));
    let client = Arc::new(HttpAdminClient::new(config, session.clone())?);

    match cli.command {
        Command::Login { email, password } => {
            let auth = AuthService::new(client, session);
            let user = auth
                .login(LoginRequest { email, password })
                .await
                .map_err(|e| e.auth_message())?;
            println!("Logged in as {}", user.full_name.unwrap_or_default());
        }
        Command::Register {
            full_name,
            email,
            phone,
            password,
            role_id,
        } => {
            let auth = AuthService::new(client, session);
            let req = RegisterRequest {
                full_name,
                email,
                phone_number: phone,
                password,
                role_id,
            };
            let user = auth.register(req).await.map_err(|e| e.auth_message())?;
            println!("Registered and logged in as {}", user.full_name.unwrap_or_default());
        }
        Command::Logout => {
            AuthService::new(client, session).logout()?;
            println!("Logged out");
        }
        Command::Whoami => {
            let user = AuthService::new(client, session).current_user()?;
            println!("Name:  {}", user.full_name.unwrap_or_default());
            println!("Email: {}", user.email.unwrap_or_default());
            println!("Phone: {}", user.phone_number.unwrap_or_default());
            println!("Role:  {}", user.role_name.unwrap_or_default());
        }
        Command::Dashboard => {
            let service = DashboardService::new(
                client.clone(),
                client.clone(),
                client.clone(),
                client,
                session,
            );
            let dashboard = service.load().await?;
            println!(
                "Welcome, {}",
                dashboard.user.full_name.as_deref().unwrap_or("Admin")
            );
            println!("Courses:     {}", dashboard.stats.courses);
            println!("Categories:  {}", dashboard.stats.categories);
            println!("Enrollments: {}", dashboard.stats.enrollments);
            println!("Users:       {}", dashboard.stats.users);
        }
        Command::Courses { action } => run_entity::<Course>(client, session, action).await?,
        Command::Categories { action } => run_entity::<Category>(client, session, action).await?,
        Command::Enrollments { action } => run_entity::<Enrollment>(client, session, action).await?,
        Command::Users { action } => run_entity::<User>(client, session, action).await?,
    }

    Ok(())
}

async fn run_entity<R: Resource>(
    api: Arc<dyn ResourceApi<R>>,
    session: Arc<dyn SessionStore>,
    action: EntityAction,
) -> CliResult {
    let mut screen = Screen::<R>::new(api, session.clone());
    let result = run_action(&mut screen, session, action).await;
    print_notifications(&mut screen);
    result
}

async fn run_action<R: Resource>(
    screen: &mut Screen<R>,
    session: Arc<dyn SessionStore>,
    action: EntityAction,
) -> CliResult {
    screen.load().await?;

    match action {
        EntityAction::List {
            query,
            page,
            per_page,
        } => {
            apply_query(screen, &query);
            screen.list_state_mut().set_per_page(per_page)?;
            screen.list_state_mut().set_page(page.saturating_sub(1));
            print!("{}", render_table(&screen.view()));
        }
        EntityAction::Show { id } => {
            let record = screen.find(id).ok_or(AppError::NotFound)?;
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        EntityAction::Create { json } => {
            let draft: R::Draft = serde_json::from_str(&read_input(&json)?)?;
            if let Some(created) = screen.create(draft).await? {
                println!("{}", serde_json::to_string_pretty(&created)?);
            }
        }
        EntityAction::Update { id, json } => {
            let draft: R::Draft = serde_json::from_str(&read_input(&json)?)?;
            screen.update(id, draft).await?;
        }
        EntityAction::Delete { id, yes } => {
            let deleted = if yes {
                screen.delete(id, &|_: &str| true).await?
            } else {
                screen.delete(id, &StdinConfirm).await?
            };
            if !deleted {
                println!("Cancelled");
            }
        }
        EntityAction::Export { format, query, out } => {
            apply_query(screen, &query);
            let user = session.load()?.map(|s| s.user).unwrap_or_default();
            let report = Report::from_view(&screen.view(), &user, Local::now());
            let result = export::export(&report, format)?;
            let path = out.unwrap_or_else(|| PathBuf::from(&result.filename));
            fs::write(&path, &result.data)?;
            println!("Wrote {} rows to {}", result.row_count, path.display());
        }
    }

    Ok(())
}

fn apply_query<R: Resource>(screen: &mut Screen<R>, query: &QueryArgs) {
    let state = screen.list_state_mut();
    if let Some(term) = &query.search {
        state.set_search(term.as_str());
    }
    let sort = if query.desc {
        SortSpec::descending(query.sort.as_str())
    } else {
        SortSpec::ascending(query.sort.as_str())
    };
    state.set_sort(sort);
}

fn read_input(source: &str) -> Result<String, AppError> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(fs::read_to_string(source)?)
}

fn print_notifications<R: Resource>(screen: &mut Screen<R>) {
    for note in screen.take_notifications() {
        match note.severity {
            Severity::Error => eprintln!("{}", note.message),
            Severity::Info | Severity::Success => println!("{}", note.message),
        }
    }
}
