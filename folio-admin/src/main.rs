use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_admin::{Backend, BackendConfig, Portfolio};
use folio_shared::{
    group_skills, image_mime_for, parse_tech_stack, ImageUpload, NewProject, NewSkill,
    ProjectCategory, ProjectPatch, DEFAULT_SKILL_CATEGORY,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage portfolio projects and skills", long_about = None)]
struct Args {
    #[command(flatten)]
    backend: BackendConfig,

    /// Admin email, needed for anything that writes
    #[arg(long, env = "FOLIO_ADMIN_EMAIL")]
    email: Option<String>,

    /// Admin password
    #[arg(long, env = "FOLIO_ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List, add, edit or remove projects
    #[command(subcommand)]
    Projects(ProjectCommand),

    /// List, add or remove skills
    #[command(subcommand)]
    Skills(SkillCommand),

    /// Upload a project thumbnail and print its public URL
    Upload {
        file: std::path::PathBuf,
    },

    /// Show the signed-in admin user
    Whoami,
}

#[derive(Subcommand, Debug)]
enum ProjectCommand {
    List {
        #[arg(long)]
        category: Option<ProjectCategory>,
    },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Comma separated, e.g. "React, Python, FastAPI"
        #[arg(long, default_value = "")]
        tech: String,
        #[arg(long, default_value = "frontend")]
        category: ProjectCategory,
        #[arg(long, default_value = "")]
        image_url: String,
        #[arg(long, default_value = "")]
        live_url: String,
        #[arg(long, default_value = "")]
        github_url: String,
    },
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        tech: Option<String>,
        #[arg(long)]
        category: Option<ProjectCategory>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        live_url: Option<String>,
        #[arg(long)]
        github_url: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum SkillCommand {
    List,
    Add {
        name: String,
        level: i64,
        #[arg(long, default_value = DEFAULT_SKILL_CATEGORY)]
        category: String,
    },
    Delete {
        id: String,
    },
}

impl Command {
    fn needs_session(&self) -> bool {
        !matches!(
            self,
            Command::Projects(ProjectCommand::List { .. }) | Command::Skills(SkillCommand::List)
        )
    }
}

async fn sign_in(portfolio: &mut Portfolio, args: &Args) -> Result<()> {
    let email = args
        .email
        .as_deref()
        .context("--email or FOLIO_ADMIN_EMAIL is required for this command")?;
    let password = args
        .password
        .as_deref()
        .context("--password or FOLIO_ADMIN_PASSWORD is required for this command")?;

    portfolio
        .sign_in(email, password)
        .await
        .context("Sign in failed")?;
    Ok(())
}

async fn run_projects(portfolio: &Portfolio, command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::List { category } => {
            let projects = portfolio.projects().await?;
            for project in folio_shared::filter_projects(&projects, category) {
                println!(
                    "{}\t{}\t[{}]\t{}",
                    project.id,
                    project.title,
                    project.category,
                    project.tech_stack.join(", ")
                );
            }
        }
        ProjectCommand::Add {
            title,
            description,
            tech,
            category,
            image_url,
            live_url,
            github_url,
        } => {
            let project = NewProject {
                title,
                description,
                tech_stack: parse_tech_stack(&tech),
                category,
                image_url,
                live_url,
                github_url,
            };
            let created = portfolio.create_project(&project).await?;
            println!("{}", created.id);
        }
        ProjectCommand::Update {
            id,
            title,
            description,
            tech,
            category,
            image_url,
            live_url,
            github_url,
        } => {
            let patch = ProjectPatch {
                title,
                description,
                tech_stack: tech.as_deref().map(parse_tech_stack),
                category,
                image_url,
                live_url,
                github_url,
            };
            let updated = portfolio.update_project(&id, &patch).await?;
            println!("{}\t{}", updated.id, updated.title);
        }
        ProjectCommand::Delete { id } => {
            portfolio.delete_project(&id).await?;
        }
    }
    Ok(())
}

async fn run_skills(portfolio: &Portfolio, command: SkillCommand) -> Result<()> {
    match command {
        SkillCommand::List => {
            let skills = portfolio.skills().await?;
            for (category, members) in group_skills(&skills) {
                println!("{category}");
                for skill in members {
                    println!("  {}\t{}\t{}%", skill.id, skill.name, skill.level);
                }
            }
        }
        SkillCommand::Add {
            name,
            level,
            category,
        } => {
            let skill = NewSkill::new(name, level, category)?;
            let created = portfolio.create_skill(&skill).await?;
            println!("{}", created.id);
        }
        SkillCommand::Delete { id } => {
            portfolio.delete_skill(&id).await?;
        }
    }
    Ok(())
}

async fn upload(portfolio: &Portfolio, file: &std::path::Path) -> Result<()> {
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .context("Upload path has no usable file name")?;
    let content_type = image_mime_for(file_name)
        .with_context(|| format!("{} does not look like an image", file.display()))?;
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let upload = ImageUpload::new(file_name, content_type, bytes)?;
    let url = portfolio.upload_thumbnail(&upload).await?;
    println!("{url}");
    Ok(())
}

async fn whoami(portfolio: &Portfolio) -> Result<()> {
    let user = portfolio.whoami().await?;
    println!("{}\t{}", user.id, user.email.unwrap_or_default());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Backend: {}", args.backend.url);

    let backend = Backend::new(args.backend.clone()).context("Failed to initialize client")?;
    let mut portfolio = Portfolio::new(backend);

    if args.command.needs_session() {
        sign_in(&mut portfolio, &args).await?;
    }

    let result = match args.command {
        Command::Projects(command) => run_projects(&portfolio, command).await,
        Command::Skills(command) => run_skills(&portfolio, command).await,
        Command::Upload { ref file } => upload(&portfolio, file).await,
        Command::Whoami => whoami(&portfolio).await,
    };

    if portfolio.is_signed_in() {
        if let Err(e) = portfolio.sign_out().await {
            log::warn!("Failed to sign out: {}", e);
        }
    }

    result
}
