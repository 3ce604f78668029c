//! `swimdesk` command-line interface.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dialoguer::{Input, Password};
use swimdesk_core::{ListQuery, Page};

use crate::modules::{
    ApplicationService, CourseService, InstructorService, MessageService, NewsService,
    StudentService,
};
use crate::realtime::{ConnectionState, RealtimeEvent};
use crate::state::AppContext;

#[derive(Parser)]
#[command(name = "swimdesk")]
#[command(about = "SwimDesk CLI - Work with a SwimDesk branch from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        /// Email address (prompted if not provided)
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Clear the stored session and tenant
    Logout,
    /// Show the logged-in user and session state
    Whoami,
    /// Manage the selected tenant (branch)
    Tenant {
        #[command(subcommand)]
        action: TenantAction,
    },
    /// Students of the selected tenant
    Students {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Instructors of the selected tenant
    Instructors {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Courses of the selected tenant
    Courses {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Conversations with participant names
    Conversations(ListArgs),
    /// Course applications
    Applications {
        #[command(subcommand)]
        action: ListOnly,
    },
    /// News items
    News {
        #[command(subcommand)]
        action: ListOnly,
    },
    /// Show where the route guard sends the current session for a path
    Guard {
        path: String,
    },
    /// Print realtime notifications until Ctrl-C
    Listen,
}

#[derive(Subcommand)]
pub enum TenantAction {
    Set { tenant_id: String },
    Show,
    Clear,
}

#[derive(Subcommand)]
pub enum ResourceAction {
    List(ListArgs),
    Show { id: String },
}

#[derive(Subcommand)]
pub enum ListOnly {
    List(ListArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<i64>,

    #[arg(long)]
    pub limit: Option<i64>,

    #[arg(short = 's', long)]
    pub search: Option<String>,
}

impl From<ListArgs> for ListQuery {
    fn from(args: ListArgs) -> Self {
        ListQuery {
            page: args.page,
            limit: args.limit,
            search: args.search,
        }
    }
}

pub async fn run(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => handle_login(ctx, email, password).await,
        Commands::Logout => {
            ctx.logout()?;
            println!("✅ Logged out");
            Ok(())
        }
        Commands::Whoami => handle_whoami(ctx),
        Commands::Tenant { action } => handle_tenant(ctx, action),
        Commands::Students { action } => handle_students(ctx, action).await,
        Commands::Instructors { action } => handle_instructors(ctx, action).await,
        Commands::Courses { action } => handle_courses(ctx, action).await,
        Commands::Conversations(args) => handle_conversations(ctx, args).await,
        Commands::Applications {
            action: ListOnly::List(args),
        } => {
            let page =
                ApplicationService::list_applications(&ctx.api, &ctx.auth(), &args.into()).await?;
            for application in &page.items {
                println!(
                    "{}  {:<30}  {:?}",
                    application.id,
                    application.applicant_name.as_deref().unwrap_or("-"),
                    application.status
                );
            }
            print_footer(&page);
            Ok(())
        }
        Commands::News {
            action: ListOnly::List(args),
        } => {
            let page = NewsService::list_news(&ctx.api, &ctx.auth(), &args.into()).await?;
            for item in &page.items {
                println!("{}  {}", item.id, item.title.as_deref().unwrap_or("-"));
            }
            print_footer(&page);
            Ok(())
        }
        Commands::Guard { path } => {
            let navigation = ctx.navigator().navigate(&path);
            match navigation.location {
                None => println!("allow {path}"),
                Some(location) => println!("redirect {location}"),
            }
            Ok(())
        }
        Commands::Listen => handle_listen(ctx).await,
    }
}

async fn handle_login(
    ctx: &AppContext,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read password")?,
    };

    let user = ctx.login(&email, &password).await?;

    println!("\n✅ Logged in as {}", user.display_name());
    println!("   Role: {}", user.role);
    match ctx.tenants.tenant() {
        Some(tenant) => println!("   Tenant: {tenant}"),
        None => println!("   No tenant selected, run `swimdesk tenant set <id>`"),
    }
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    let Some(user) = ctx.sessions.user() else {
        bail!(
            "Not logged in ({:?}), run `swimdesk login`",
            ctx.sessions.token_status()
        );
    };

    println!("{} <{}>", user.display_name(), user.email.as_deref().unwrap_or("-"));
    println!("   Id: {}", user.id);
    println!("   Role: {}", user.role);
    println!(
        "   Tenant: {}",
        ctx.tenants.tenant().as_deref().unwrap_or("(none)")
    );
    Ok(())
}

fn handle_tenant(ctx: &AppContext, action: TenantAction) -> Result<()> {
    match action {
        TenantAction::Set { tenant_id } => {
            ctx.tenants.set_tenant(&tenant_id)?;
            println!("✅ Tenant set to {}", tenant_id.trim());
        }
        TenantAction::Show => match ctx.tenants.tenant() {
            Some(tenant) => println!("{tenant}"),
            None => println!("(none)"),
        },
        TenantAction::Clear => {
            ctx.tenants.clear_tenant()?;
            println!("✅ Tenant cleared");
        }
    }
    Ok(())
}

async fn handle_students(ctx: &AppContext, action: ResourceAction) -> Result<()> {
    let auth = ctx.auth();
    match action {
        ResourceAction::List(args) => {
            let page = StudentService::list_students(&ctx.api, &auth, &args.into()).await?;
            for student in &page.items {
                println!(
                    "{}  {:<30}  {}",
                    student.id,
                    student.display_name(),
                    student.level.as_deref().unwrap_or("-")
                );
            }
            print_footer(&page);
        }
        ResourceAction::Show { id } => {
            let student = StudentService::get_student(&ctx.api, &auth, &id)
                .await?
                .with_context(|| format!("Student {id} not found"))?;
            println!("{}", serde_json::to_string_pretty(&student)?);
        }
    }
    Ok(())
}

async fn handle_instructors(ctx: &AppContext, action: ResourceAction) -> Result<()> {
    let auth = ctx.auth();
    match action {
        ResourceAction::List(args) => {
            let page = InstructorService::list_instructors(&ctx.api, &auth, &args.into()).await?;
            for instructor in &page.items {
                println!("{}  {}", instructor.id, instructor.display_name());
            }
            print_footer(&page);
        }
        ResourceAction::Show { id } => {
            let instructor = InstructorService::get_instructor(&ctx.api, &auth, &id)
                .await?
                .with_context(|| format!("Instructor {id} not found"))?;
            println!("{}", serde_json::to_string_pretty(&instructor)?);
        }
    }
    Ok(())
}

async fn handle_courses(ctx: &AppContext, action: ResourceAction) -> Result<()> {
    let auth = ctx.auth();
    match action {
        ResourceAction::List(args) => {
            let page = CourseService::list_courses(&ctx.api, &auth, &args.into()).await?;
            for course in &page.items {
                println!(
                    "{}  {:<30}  {}",
                    course.id,
                    course.name.as_deref().unwrap_or("-"),
                    course.level.as_deref().unwrap_or("-")
                );
            }
            print_footer(&page);
        }
        ResourceAction::Show { id } => {
            let course = CourseService::get_course(&ctx.api, &auth, &id)
                .await?
                .with_context(|| format!("Course {id} not found"))?;
            println!("{}", serde_json::to_string_pretty(&course)?);
        }
    }
    Ok(())
}

async fn handle_conversations(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let page =
        MessageService::conversations_with_user_details(&ctx.api, &ctx.auth(), &args.into())
            .await?;
    for entry in &page.items {
        let names: Vec<String> = entry
            .user_details
            .iter()
            .map(|user| user.display_name())
            .collect();
        println!(
            "{}  {:<24}  {}",
            entry.conversation.id,
            entry.conversation.title.as_deref().unwrap_or("-"),
            names.join(", ")
        );
    }
    print_footer(&page);
    Ok(())
}

async fn handle_listen(ctx: &AppContext) -> Result<()> {
    let Some(token) = ctx.sessions.token() else {
        bail!("Not logged in, run `swimdesk login`");
    };

    let client = ctx.notification_client();
    let mut states = client.watch_state();
    let mut events = client.subscribe();
    client.init(&token).await;

    println!(
        "Listening for notifications{} (Ctrl-C to stop)",
        if client.is_mock() { " in mock mode" } else { "" }
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                match state {
                    ConnectionState::TokenExpired(message) => {
                        client.close().await;
                        bail!("{message}");
                    }
                    ConnectionState::ConnectionError(message) => eprintln!("⚠️  {message}"),
                    other => println!("· {other:?}"),
                }
            }
            event = events.recv() => match event {
                Ok(RealtimeEvent::Notification(payload)) => println!("🔔 {payload}"),
                Ok(RealtimeEvent::Message(payload)) => println!("💬 {payload}"),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    eprintln!("⚠️  Skipped {skipped} events");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    client.close().await;
    Ok(())
}

fn print_footer<T>(page: &Page<T>) {
    if page.is_empty() {
        println!("(no results)");
        return;
    }
    println!(
        "-- page {} of {}, {} total",
        page.meta.page.max(1),
        page.meta.total_pages.max(1),
        page.meta.total
    );
}
