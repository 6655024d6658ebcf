use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::env;
use std::path::{Path, PathBuf};

use remindme::commands;
use remindme::commands::add::DueSpec;
use remindme::commands::update::UpdateArgs;
use remindme::config::{db_path, load_timetable, resolve_dir, resolve_today};
use remindme::{logging, AssignmentStore, Database, Timetable};

/// About a century either way.
const MAX_WEEK_OFFSET: i64 = 5200;

#[derive(Parser)]
#[command(name = "remindme")]
#[command(about = "School assignment reminders on a two-week board")]
#[command(version)]
struct Cli {
    /// Project directory holding .remindme (default: search upwards from cwd)
    #[arg(long, global = true, env = "REMINDME_DIR")]
    dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, env = "REMINDME_TODAY")]
    today: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize remindme in the current directory
    Init {
        /// Also write the built-in timetable to .remindme/timetable.json
        #[arg(long)]
        timetable: bool,
        /// Overwrite an existing timetable.json
        #[arg(short, long, requires = "timetable")]
        force: bool,
    },

    /// Add an assignment
    Add {
        /// Assignment title
        title: String,
        /// Subject code from the timetable (e.g. MAT)
        subject: String,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "on")]
        due: Option<String>,
        /// Due at the subject's lesson on this weekday (Mon-Fri)
        #[arg(long)]
        on: Option<String>,
        /// Any date in the week to pick from (with --on)
        #[arg(short, long, requires = "on")]
        week: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Pin to the top of the list
        #[arg(short, long)]
        pin: bool,
    },

    /// List upcoming assignments
    List {
        /// Only assignments due on this date (YYYY-MM-DD)
        #[arg(long)]
        on: Option<String>,
        /// Include finished assignments
        #[arg(short, long)]
        all: bool,
    },

    /// Show assignment details
    Show {
        /// Assignment id or unique prefix
        id: String,
    },

    /// Update an assignment
    Update {
        /// Assignment id or unique prefix
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New subject code
        #[arg(short, long)]
        subject: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(short, long, conflicts_with = "on")]
        due: Option<String>,
        /// Move to the subject's lesson on this weekday
        #[arg(long)]
        on: Option<String>,
        /// Any date in the week to pick from (with --on)
        #[arg(short, long, requires = "on")]
        week: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
        /// Remove the notes
        #[arg(long, conflicts_with = "notes")]
        clear_notes: bool,
        /// Pin to the top of the list
        #[arg(long, conflicts_with = "unpin")]
        pin: bool,
        /// Unpin
        #[arg(long)]
        unpin: bool,
    },

    /// Mark an assignment as done
    Done {
        /// Assignment id or unique prefix
        id: String,
    },

    /// Delete an assignment
    Delete {
        /// Assignment id or unique prefix
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show the two-week board
    Board {
        /// Weeks to move the board forward (negative to go back)
        #[arg(
            short,
            long,
            default_value_t = 0,
            allow_hyphen_values = true,
            value_parser = clap::value_parser!(i64).range(-MAX_WEEK_OFFSET..=MAX_WEEK_OFFSET)
        )]
        weeks: i64,
        /// Focus the list on this date (YYYY-MM-DD); naming it again clears the focus
        #[arg(long)]
        on: Vec<String>,
    },

    /// Show which days of a week a subject is taught
    Pick {
        /// Subject code
        subject: String,
        /// Any date in the week to show
        #[arg(long)]
        week: Option<String>,
        /// Weeks to move forward from that week (negative to go back)
        #[arg(
            short,
            long,
            default_value_t = 0,
            allow_hyphen_values = true,
            value_parser = clap::value_parser!(i64).range(-MAX_WEEK_OFFSET..=MAX_WEEK_OFFSET)
        )]
        next: i64,
    },

    /// List timetable subjects with their colours and days
    Subjects,

    /// Export assignments
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
    },
}

fn due_spec<'a>(
    due: &'a Option<String>,
    on: &'a Option<String>,
    week: &'a Option<String>,
) -> Option<DueSpec<'a>> {
    match (due, on) {
        (Some(date), _) => Some(DueSpec::Date(date.as_str())),
        (None, Some(day)) => Some(DueSpec::Lesson {
            day: day.as_str(),
            week: week.as_deref(),
        }),
        (None, None) => None,
    }
}

fn open_store(dir: Option<&Path>) -> Result<(AssignmentStore<Database>, Timetable)> {
    let remindme_dir = resolve_dir(dir)?;
    let timetable = load_timetable(&remindme_dir)?;
    let db = Database::open(&db_path(&remindme_dir)).context("Failed to open database")?;
    let store = AssignmentStore::load(db).with_subjects(timetable.subject_set());
    Ok((store, timetable))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    let dir = cli.dir.as_deref();
    let today = resolve_today(cli.today.as_deref())?;

    match cli.command {
        Commands::Init { timetable, force } => {
            let root = match dir {
                Some(d) => d.to_path_buf(),
                None => env::current_dir()?,
            };
            commands::init::run(&root, timetable, force)
        }

        Commands::Add {
            title,
            subject,
            due,
            on,
            week,
            notes,
            pin,
        } => {
            let (mut store, timetable) = open_store(dir)?;
            commands::add::run(
                &mut store,
                &timetable,
                &title,
                &subject,
                due_spec(&due, &on, &week),
                notes.as_deref(),
                pin,
                today,
            )
        }

        Commands::List { on, all } => {
            let (store, _) = open_store(dir)?;
            commands::list::run(&store, today, on.as_deref(), all)
        }

        Commands::Show { id } => {
            let (store, timetable) = open_store(dir)?;
            commands::show::run(&store, &timetable, &id, today)
        }

        Commands::Update {
            id,
            title,
            subject,
            due,
            on,
            week,
            notes,
            clear_notes,
            pin,
            unpin,
        } => {
            let (mut store, timetable) = open_store(dir)?;
            let pinned = match (pin, unpin) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let args = UpdateArgs {
                title: title.as_deref(),
                subject: subject.as_deref(),
                due: due_spec(&due, &on, &week),
                notes: notes.as_deref(),
                clear_notes,
                pinned,
            };
            commands::update::run(&mut store, &timetable, &id, args, today)
        }

        Commands::Done { id } => {
            let (mut store, _) = open_store(dir)?;
            commands::done::run(&mut store, &id)
        }

        Commands::Delete { id, force } => {
            let (mut store, _) = open_store(dir)?;
            commands::delete::run(&mut store, &id, force)
        }

        Commands::Board { weeks, on } => {
            let (store, timetable) = open_store(dir)?;
            commands::board::run(&store, &timetable, today, weeks, &on)
        }

        Commands::Pick {
            subject,
            week,
            next,
        } => {
            let (_, timetable) = open_store(dir)?;
            commands::pick::run(&timetable, &subject, today, week.as_deref(), next)
        }

        Commands::Subjects => {
            let (_, timetable) = open_store(dir)?;
            commands::subjects::run(&timetable)
        }

        Commands::Export { output, format } => {
            let (store, _) = open_store(dir)?;
            match format {
                ExportFormat::Json => commands::export::run_json(&store, output.as_deref()),
                ExportFormat::Markdown => {
                    commands::export::run_markdown(&store, output.as_deref())
                }
            }
        }
    }
}
