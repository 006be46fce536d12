
mod navigator;
mod storage;
mod transport;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use session::auth::{Authenticator, Landing};
use session::endpoints::{
    DismissNotification, GetProfile, ListNotifications, MarkAllNotificationsRead, MarkNotificationRead,
    ProfileUpdate,
};
use session::forms::{FormStatus, LoginForm, ResetForm, SignupForm, ValidationErrors, validate_contact};
use session::shell::{ShellController, greeting, nav_links};
use session::{ApiConfig, ConfigError, GateError, RequestGate, Screen, Session, SessionStore};
use tracing_subscriber::EnvFilter;

use crate::navigator::TerminalNavigator;
use crate::storage::FileStore;
use crate::transport::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Gate(#[from] GateError),
    #[error("invalid input:\n{}", describe(.0))]
    Invalid(ValidationErrors),
    #[error("invalid input: {0}")]
    InvalidArgument(&'static str),
    #[error("{0}")]
    Failed(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Error for a form that did not complete: its field errors, else the
/// form-level message.
fn form_failure(status: &FormStatus) -> CliError {
    if status.errors().is_empty() {
        CliError::Failed(status.message().unwrap_or("request failed").to_owned())
    } else {
        CliError::Invalid(status.errors().clone())
    }
}

/// One `field: message` line per validation failure.
fn describe(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|(field, error)| format!("  {}: {error}", field.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Parser, Debug)]
#[command(name = "exam-cli", about = "Exam-prep account and session CLI")]
struct Cli {
    #[arg(long, env = "EXAM_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "EXAM_SESSION_FILE", help = "Session storage file [default: <config dir>/exam-prep/session.json]")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "EXAM_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Signup(SignupArgs),
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    Logout,
    Whoami,
    Profile(ProfileCommand),
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    Notifications(NotificationsCommand),
}

#[derive(Args, Debug)]
struct SignupArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "EXAM_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long, default_value_t = false)]
    accept_terms: bool,
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
    },
}

#[derive(Args, Debug)]
struct NotificationsCommand {
    #[command(subcommand)]
    command: NotificationsSubcommand,
}

#[derive(Subcommand, Debug)]
enum NotificationsSubcommand {
    List,
    Read { id: String },
    ReadAll,
    Dismiss { id: String },
}

struct CliContext {
    gate: Arc<RequestGate>,
    auth: Authenticator,
    shell: ShellController,
}

impl CliContext {
    fn build(base_url: Option<&str>, session_file: Option<PathBuf>) -> Result<Self, CliError> {
        let mut config = ApiConfig::from_env()?;
        if let Some(url) = base_url {
            config = config.with_base_url(url)?;
        }
        let storage = FileStore::open(session_file.unwrap_or_else(storage::default_path));
        tracing::debug!(path = %storage.path().display(), base_url = %config.base_url, "cli context");
        let store = Arc::new(SessionStore::rehydrate(Arc::new(storage)));
        let transport = Arc::new(ReqwestTransport::new(config.request_timeout)?);
        let gate = Arc::new(RequestGate::new(config, store, transport, Arc::new(TerminalNavigator)));
        Ok(Self { auth: Authenticator::new(gate.clone()), shell: ShellController::new(gate.clone()), gate })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = CliContext::build(cli.base_url.as_deref(), cli.session_file)?;

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, email, password).await,
        Command::Signup(args) => run_signup(&ctx, args).await,
        Command::ForgotPassword { email } => run_forgot_password(&ctx, email).await,
        Command::Logout => run_logout(&ctx).await,
        Command::Whoami => print_json(&whoami(&ctx.shell.session())),
        Command::Profile(profile) => run_profile(&ctx, profile).await,
        Command::Contact { name, email, message } => run_contact(&ctx, &name, &email, &message).await,
        Command::Notifications(notifications) => run_notifications(&ctx, notifications).await,
    }
}

async fn run_login(ctx: &CliContext, email: String, password: String) -> Result<(), CliError> {
    let mut form = LoginForm::new();
    form.set_email(email);
    form.set_password(password);
    let landing = ctx.auth.submit_login(&mut form, |_| ctx.gate.navigator().navigate(Screen::Home)).await;
    match landing {
        Some(Landing::Admin) => tracing::info!("admin account signed in"),
        Some(Landing::Callback) => {}
        None => return Err(form_failure(form.status())),
    }
    print_json(&whoami(&ctx.shell.session()))
}

async fn run_signup(ctx: &CliContext, args: SignupArgs) -> Result<(), CliError> {
    let mut form = SignupForm::new();
    form.set_name(args.name);
    form.set_email(args.email);
    form.set_confirm_password(args.password.clone());
    form.set_password(args.password);
    form.set_accept_terms(args.accept_terms);
    let Some(session) = ctx.auth.submit_signup(&mut form, |_| ctx.gate.navigator().navigate(Screen::Home)).await
    else {
        return Err(form_failure(form.status()));
    };
    print_json(&whoami(&session))
}

async fn run_forgot_password(ctx: &CliContext, email: String) -> Result<(), CliError> {
    let mut form = ResetForm::new();
    form.set_email(email);
    if !ctx.auth.submit_password_reset(&mut form).await {
        return Err(form_failure(form.status()));
    }
    println!("{}", form.status().message().unwrap_or_default());
    Ok(())
}

async fn run_logout(ctx: &CliContext) -> Result<(), CliError> {
    match ctx.shell.logout() {
        Some(sign_out) => {
            sign_out.send().await;
            println!("signed out");
        }
        None => println!("not signed in"),
    }
    Ok(())
}

async fn run_profile(ctx: &CliContext, profile: ProfileCommand) -> Result<(), CliError> {
    match profile.command {
        ProfileSubcommand::Show => {
            let envelope = ctx.gate.send(&GetProfile).await?;
            print_json(&envelope.profile)
        }
        ProfileSubcommand::Update { name, phone, bio, avatar_url } => {
            let update = ProfileUpdate { name, phone, bio, avatar_url };
            if update == ProfileUpdate::default() {
                return Err(CliError::InvalidArgument("pass at least one field to update"));
            }
            let saved = ctx.auth.save_profile(update).await?;
            print_json(&saved)
        }
    }
}

async fn run_contact(ctx: &CliContext, name: &str, email: &str, message: &str) -> Result<(), CliError> {
    let submission = validate_contact(name, email, message).map_err(CliError::Invalid)?;
    let reply = ctx.gate.send(&submission).await?;
    print_json(&reply)
}

async fn run_notifications(ctx: &CliContext, notifications: NotificationsCommand) -> Result<(), CliError> {
    match notifications.command {
        NotificationsSubcommand::List => print_json(&ctx.gate.send(&ListNotifications).await?),
        NotificationsSubcommand::Read { id } => print_json(&ctx.gate.send(&MarkNotificationRead { id }).await?),
        NotificationsSubcommand::ReadAll => print_json(&ctx.gate.send(&MarkAllNotificationsRead).await?),
        NotificationsSubcommand::Dismiss { id } => print_json(&ctx.gate.send(&DismissNotification { id }).await?),
    }
}

#[derive(Debug, Serialize)]
struct WhoAmI {
    authenticated: bool,
    name: Option<String>,
    email: Option<String>,
    role: &'static str,
    screens: Vec<&'static str>,
}

fn whoami(session: &Session) -> WhoAmI {
    WhoAmI {
        authenticated: session.is_authenticated(),
        name: greeting(session),
        email: session.user().map(|u| u.email.clone()),
        role: session.role().as_str(),
        screens: nav_links(session).iter().map(|link| link.screen.path()).collect(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
