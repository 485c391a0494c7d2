mod models;
mod query;
mod remote;
mod store;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use models::{ApplicationPatch, JobApplication, NewApplication, Status};
use query::{StatusFilter, filter_applications};
use remote::RemoteStore;
use store::{ApplicationStore, MemoryStore, StoreError};

#[derive(Parser)]
#[command(name = "apptrack")]
#[command(about = "Track job applications - record, search, and review them")]
struct Cli {
    /// Base URL of a backend API (overrides APPTRACK_API_URL); without one,
    /// records live in a local snapshot file
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new application
    Add {
        /// Position title
        #[arg(short, long)]
        title: String,

        /// Company name
        #[arg(short, long)]
        company: String,

        /// Where the listing was found (LinkedIn, Indeed, ...)
        #[arg(short, long, default_value = "manual")]
        site: String,

        /// Application date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Initial status
        #[arg(long, value_enum, default_value_t = Status::Submitted)]
        status: Status,

        /// Listing URL
        #[arg(short, long)]
        url: Option<String>,

        /// Free-text notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// File containing the job posting text
        #[arg(long)]
        posting_file: Option<PathBuf>,
    },

    /// List applications, most recent first
    List {
        /// Filter by status
        #[arg(short, long, value_enum)]
        status: Option<Status>,

        /// Search titles, companies, and tags
        #[arg(short = 'q', long)]
        search: Option<String>,
    },

    /// Show application details
    Show {
        /// Application ID
        id: String,
    },

    /// Edit an application (only the given fields change)
    Edit {
        /// Application ID
        id: String,

        /// New position title
        #[arg(short, long)]
        title: Option<String>,

        /// New company name
        #[arg(short, long)]
        company: Option<String>,

        /// New listing source
        #[arg(short, long)]
        site: Option<String>,

        /// New application date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// New status
        #[arg(long, value_enum)]
        status: Option<Status>,

        /// New listing URL
        #[arg(short, long)]
        url: Option<String>,

        /// New free-text notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Schedule an interview (YYYY-MM-DD)
        #[arg(long)]
        interview: Option<NaiveDate>,

        /// Remove a scheduled interview
        #[arg(long, conflicts_with = "interview")]
        clear_interview: bool,

        /// Replace the tag list (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete an application
    Delete {
        /// Application ID
        id: String,
    },

    /// Load sample applications into an empty local store
    Seed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Seed = cli.command {
        // Seeding targets the local snapshot file, never a backend.
        let mut store = MemoryStore::open()?;
        if !store.is_empty() {
            println!("Store already has applications; not seeding.");
            return Ok(());
        }
        let samples = sample_applications();
        let count = samples.len();
        for sample in samples {
            store.create(sample)?;
        }
        println!("Seeded {} sample application(s).", count);
        return Ok(());
    }

    let api_url = cli
        .api_url
        .or_else(|| std::env::var("APPTRACK_API_URL").ok());
    let mut store: Box<dyn ApplicationStore> = match api_url {
        Some(url) => Box::new(RemoteStore::new(&url)),
        None => Box::new(MemoryStore::open()?),
    };
    run_command(store.as_mut(), cli.command)
}

fn run_command(store: &mut dyn ApplicationStore, command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            title,
            company,
            site,
            date,
            status,
            url,
            notes,
            tags,
            posting_file,
        } => {
            let job_posting_text = match posting_file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read posting file: {}", path.display()))?,
                None => String::new(),
            };

            let created = store.create(NewApplication {
                site,
                position_title: title,
                company,
                application_date: date,
                status,
                response_notes: notes.unwrap_or_default(),
                interview_date: None,
                job_posting_text,
                job_url: url,
                tags,
            })?;
            println!("Added application #{}", created.id);
        }

        Commands::List { status, search } => {
            let snapshot = store.list()?;
            let filter = status.map_or(StatusFilter::All, StatusFilter::Only);
            let results =
                filter_applications(&snapshot, filter, search.as_deref().unwrap_or(""));

            if results.is_empty() {
                println!("No applications found.");
            } else {
                println!(
                    "{:<6} {:<14} {:<30} {:<22} {:>12}",
                    "ID", "STATUS", "POSITION", "COMPANY", "DATE"
                );
                println!("{}", "-".repeat(88));
                for job in results {
                    println!(
                        "{:<6} {:<14} {:<30} {:<22} {:>12}",
                        job.id,
                        job.status,
                        truncate(&job.position_title, 28),
                        truncate(&job.company, 20),
                        job.effective_date().to_string()
                    );
                }
            }
        }

        Commands::Show { id } => match store.get(&id)? {
            Some(job) => print_application(&job),
            None => println!("Application #{} not found.", id),
        },

        Commands::Edit {
            id,
            title,
            company,
            site,
            date,
            status,
            url,
            notes,
            interview,
            clear_interview,
            tags,
        } => {
            let interview_date = if clear_interview {
                Some(None)
            } else {
                interview.map(Some)
            };
            let patch = ApplicationPatch {
                site,
                position_title: title,
                company,
                application_date: date,
                status,
                response_notes: notes,
                interview_date,
                job_posting_text: None,
                job_url: url,
                tags: if tags.is_empty() { None } else { Some(tags) },
            };

            match store.update(&id, patch) {
                Ok(job) => println!("Updated application #{} ({})", job.id, job.status),
                Err(StoreError::NotFound(id)) => println!("Application #{} not found.", id),
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Delete { id } => match store.delete(&id) {
            Ok(()) => println!("Deleted application #{}", id),
            Err(StoreError::NotFound(id)) => println!("Application #{} not found.", id),
            Err(e) => return Err(e.into()),
        },

        // handled in main before a store is opened
        Commands::Seed => unreachable!(),
    }

    Ok(())
}

fn print_application(job: &JobApplication) {
    println!("Application #{}", job.id);
    println!("Position: {}", job.position_title);
    println!("Company: {}", job.company);
    println!("Site: {}", job.site);
    println!("Status: {}", job.status);
    if let Some(date) = job.application_date {
        println!("Applied: {}", date);
    }
    if let Some(date) = job.interview_date {
        println!("Interview: {}", date);
    }
    if let Some(url) = &job.job_url {
        println!("URL: {}", url);
    }
    if !job.tags.is_empty() {
        println!("Tags: {}", job.tags.join(", "));
    }
    println!("Updated: {}", job.last_updated);
    if !job.response_notes.is_empty() {
        println!("\nNotes: {}", job.response_notes);
    }
    if !job.job_posting_text.is_empty() {
        println!("\n--- Posting ---\n{}", job.job_posting_text);
    }
}

fn sample_applications() -> Vec<NewApplication> {
    vec![
        NewApplication {
            site: "LinkedIn".to_string(),
            position_title: "Frontend Developer".to_string(),
            company: "TechCorp".to_string(),
            application_date: "2025-01-10".parse().ok(),
            status: Status::Interview,
            response_notes: "Positive reply; interview set for January 20.".to_string(),
            interview_date: "2025-01-20".parse().ok(),
            job_posting_text: "Frontend Developer - TechCorp\n\n\
                Looking for a frontend developer with React and TypeScript \
                experience to join our product team."
                .to_string(),
            job_url: Some("https://linkedin.com/jobs/frontend-developer-techcorp".to_string()),
            tags: vec![
                "react".to_string(),
                "typescript".to_string(),
                "remote".to_string(),
            ],
        },
        NewApplication {
            site: "Indeed".to_string(),
            position_title: "Full Stack Developer".to_string(),
            company: "StartupXYZ".to_string(),
            application_date: "2025-01-08".parse().ok(),
            status: Status::UnderReview,
            response_notes: "Waiting for a reply.".to_string(),
            interview_date: None,
            job_posting_text: "Full Stack Developer - StartupXYZ\n\n\
                SaaS startup hiring across the stack: React, Node.js, PostgreSQL, AWS."
                .to_string(),
            job_url: Some("https://indeed.com/jobs/fullstack-developer-startupxyz".to_string()),
            tags: vec![
                "fullstack".to_string(),
                "node.js".to_string(),
                "react".to_string(),
            ],
        },
        NewApplication {
            site: "Company website".to_string(),
            position_title: "React Developer".to_string(),
            company: "Digital Solutions".to_string(),
            application_date: "2025-01-05".parse().ok(),
            status: Status::Rejected,
            response_notes: "Rejection email; profile not a match for current needs.".to_string(),
            interview_date: None,
            job_posting_text: String::new(),
            job_url: None,
            tags: vec!["react".to_string(), "frontend".to_string()],
        },
    ]
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
