//! Command-line client for the VidSync API.
//!
//! Drives the same auth gateway as the browser frontend, with tokens kept in
//! a JSON file instead of cookies. Diagnostics go to stderr via `tracing`;
//! command output goes to stdout as pretty JSON.

mod http;
mod store;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use session::api::{IdentifierKind, SortType};
use session::config::ConfigError;
use session::guard::{self, GuardDecision, RouteClass};
use session::{
    ApiConfig, ApiError, AuthFailure, AuthGateway, HydrationStep, LoginForm, SessionHydrator, SignupForm,
    StorageError, TokenStore, ValidationError, VideoQuery,
};

use crate::http::HttpApi;
use crate::store::{FileTokenStore, TOKEN_FILE_VAR, default_token_path};

type Gateway = AuthGateway<HttpApi, FileTokenStore>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("{}", .0.user_message())]
    Auth(#[from] AuthFailure),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("invalid input: {}", field_messages(.0))]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("not signed in; run `vidsync-cli login`")]
    SignedOut,
    #[error("no home directory; pass --token-file or set {TOKEN_FILE_VAR}")]
    NoTokenPath,
    #[error("profile request timed out; try again")]
    Timeout,
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "vidsync-cli", about = "VidSync account and video CLI")]
struct Cli {
    /// Token file; defaults to `~/.vidsync/tokens.json`.
    #[arg(long, env = TOKEN_FILE_VAR)]
    token_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the token pair.
    Login(LoginArgs),
    /// End the session remotely and locally.
    Logout,
    /// Create an account (does not sign in).
    Register(RegisterArgs),
    /// Print the signed-in profile.
    Whoami,
    /// List uploads, newest first by default.
    Videos(VideosArgs),
    /// Show one video.
    Video {
        video_id: String,
        /// Count a view for the signed-in user.
        #[arg(long, default_value_t = false)]
        record_view: bool,
    },
    /// Show what the navigation guard does for a path with the stored session.
    Route { path: String },
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long, required_unless_present = "username", conflicts_with = "username")]
    email: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long, env = "VIDSYNC_PASSWORD", hide_env_values = true)]
    password: String,
}

impl LoginArgs {
    fn into_form(self) -> LoginForm {
        let (kind, identifier) = match (self.email, self.username) {
            (Some(email), _) => (IdentifierKind::Email, email),
            (None, Some(username)) => (IdentifierKind::Username, username),
            (None, None) => (IdentifierKind::Email, String::new()),
        };
        LoginForm { kind, identifier, password: self.password }
    }
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    full_name: String,
    #[arg(long, env = "VIDSYNC_PASSWORD", hide_env_values = true)]
    password: String,
    /// Defaults to `--password`.
    #[arg(long)]
    confirm_password: Option<String>,
}

impl RegisterArgs {
    fn into_form(self) -> SignupForm {
        let confirm_password = self.confirm_password.unwrap_or_else(|| self.password.clone());
        SignupForm {
            username: self.username,
            email: self.email,
            password: self.password,
            confirm_password,
            full_name: self.full_name,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortType {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Asc => Self::Asc,
            SortArg::Desc => Self::Desc,
        }
    }
}

#[derive(Args, Debug)]
struct VideosArgs {
    #[arg(long, default_value = "createdAt")]
    sort_by: String,
    #[arg(long, value_enum, default_value_t = SortArg::Desc)]
    sort_type: SortArg,
    /// Defaults to the signed-in user.
    #[arg(long)]
    user_id: Option<String>,
}

fn field_messages(validation: &ValidationError) -> String {
    validation.errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ApiConfig::from_env()?;
    let token_path = cli.token_file.or_else(default_token_path).ok_or(CliError::NoTokenPath)?;
    let store = FileTokenStore::new(token_path);

    if let Command::Route { path } = &cli.command {
        return print_json(&route_report(path, store.load().is_some()));
    }

    let token_path = store.path().to_owned();
    let gateway = Gateway::new(HttpApi::new(&config)?, store).with_logout_policy(config.logout_policy);

    match cli.command {
        Command::Login(args) => {
            let credentials = args.into_form().into_credentials()?;
            gateway.login(&credentials.identifier, &credentials.password, credentials.kind).await?;
            eprintln!("signed in; tokens saved to {}", token_path.display());
            Ok(())
        }
        Command::Logout => {
            gateway.logout().await?;
            eprintln!("signed out");
            Ok(())
        }
        Command::Register(args) => {
            let registration = args.into_form().into_registration()?;
            gateway.register(&registration).await?;
            eprintln!("account created; run `vidsync-cli login` to sign in");
            Ok(())
        }
        Command::Whoami => {
            hydrate(&gateway).await?;
            let state = gateway.session().snapshot();
            print_json(&serde_json::to_value(state.current_user())?)
        }
        Command::Videos(args) => {
            let user_id = match args.user_id {
                Some(user_id) => user_id,
                None => hydrate(&gateway).await?,
            };
            let query = VideoQuery { sort_type: args.sort_type.into(), sort_by: args.sort_by, user_id };
            let videos = gateway.list_videos(&query).await?;
            print_json(&serde_json::to_value(videos)?)
        }
        Command::Video { video_id, record_view } => {
            let detail = gateway.video(&video_id).await?;
            if record_view {
                hydrate(&gateway).await?;
                let counted = gateway.record_view(&video_id).await?;
                tracing::info!(%video_id, counted, "view recorded");
            }
            print_json(&serde_json::to_value(detail)?)
        }
        Command::Route { .. } => Ok(()),
    }
}

/// Load the profile for the stored session and return the user id.
async fn hydrate(gateway: &Gateway) -> Result<String, CliError> {
    let hydrator = SessionHydrator::new();
    match hydrator.run(gateway, || true).await {
        HydrationStep::TimedOut => return Err(CliError::Timeout),
        HydrationStep::Redirect(_) => return Err(CliError::SignedOut),
        _ => {}
    }
    gateway.session().snapshot().current_user().map(|user| user.id.clone()).ok_or(CliError::SignedOut)
}

fn route_report(path: &str, has_session: bool) -> Value {
    let class = match guard::classify(path) {
        RouteClass::PublicOnly => "public-only",
        RouteClass::Protected => "protected",
        RouteClass::Asset => "asset",
    };
    let (decision, target) = match guard::decide(path, has_session) {
        GuardDecision::Allow => ("allow", None),
        GuardDecision::Redirect(target) => ("redirect", Some(target)),
    };
    serde_json::json!({
        "path": path,
        "class": class,
        "signedIn": has_session,
        "decision": decision,
        "target": target,
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
