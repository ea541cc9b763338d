use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_catalog::config::Config;
use library_catalog::models::{BookId, MemberId, NewBook, NewMember, TransactionId};
use library_catalog::services::{self, availability_service::today};
use library_catalog::{DomainError, JsonFileStore, LibraryDb};

/// Manage a small lending library from the command line
#[derive(Parser, Debug)]
#[command(name = "library-catalog", version, about)]
struct Args {
    /// Store profile (overrides PROFILE)
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Directory holding the store (overrides LIBRARY_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a book to the catalogue
    AddBook {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        isbn: String,
        #[arg(long, default_value_t = 1)]
        copies: u32,
    },
    /// Register a member
    AddMember {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Lend a book to a member
    Borrow {
        #[arg(long)]
        book: String,
        #[arg(long)]
        member: String,
        /// Defaults to today
        #[arg(long, value_name = "YYYY-MM-DD")]
        borrow_date: Option<NaiveDate>,
        /// Defaults to the borrow date plus LOAN_PERIOD_DAYS
        #[arg(long, value_name = "YYYY-MM-DD")]
        due_date: Option<NaiveDate>,
    },
    /// Close a loan
    Return {
        #[arg(long)]
        transaction: String,
        /// Defaults to today
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
    /// List books with available copies
    Books {
        /// Only books whose title, author or isbn contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// List members with their active borrows
    Members,
    /// List transactions
    Transactions,
    /// Show the dashboard figures
    Summary,
}

fn main() -> ExitCode {
    // Load configuration, .env may set RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(profile) = args.profile {
        config.profile = profile;
    }
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    match run(&config, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, command: Command) -> Result<(), DomainError> {
    let store = JsonFileStore::new(config.store_path());
    let mut db = LibraryDb::open(Box::new(store))?;

    match command {
        Command::AddBook {
            title,
            author,
            isbn,
            copies,
        } => {
            let book = services::add_book(
                &mut db,
                NewBook {
                    title,
                    author,
                    isbn,
                    copies,
                },
            )?;
            println!("{}", book.id);
        }
        Command::AddMember { name, email, phone } => {
            let member = services::add_member(&mut db, NewMember { name, email, phone })?;
            println!("{}", member.id);
        }
        Command::Borrow {
            book,
            member,
            borrow_date,
            due_date,
        } => {
            let borrow_date = borrow_date.unwrap_or_else(today);
            let due_date = due_date.unwrap_or_else(|| {
                services::default_due_date(borrow_date, config.loan_period_days)
            });
            let transaction = services::borrow(
                &mut db,
                &BookId::from(book),
                &MemberId::from(member),
                borrow_date,
                due_date,
            )?;
            println!("{}\tdue {}", transaction.id, transaction.due_date);
        }
        Command::Return { transaction, date } => {
            let transaction = services::return_book(
                &mut db,
                &TransactionId::from(transaction),
                date.unwrap_or_else(today),
            )?;
            println!("{}\t{}", transaction.id, transaction.status.as_str());
        }
        Command::Books { search } => {
            let term = search.unwrap_or_default();
            for book in services::search_books(&db, &term) {
                let available = services::available_copies_for(&db, &book.id)?;
                println!(
                    "{}\t{}\t{}\t{}\t{}/{}",
                    book.id, book.title, book.author, book.isbn, available, book.copies
                );
            }
        }
        Command::Members => {
            for row in services::list_members(&db) {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    row.member.id,
                    row.member.name,
                    row.member.email,
                    row.member.phone.as_deref().unwrap_or("N/A"),
                    row.active_borrows
                );
            }
        }
        Command::Transactions => {
            let today = today();
            for row in services::list_transactions(&db) {
                let t = &row.transaction;
                let returned = t
                    .return_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "Not returned".to_string());
                let status = if services::is_overdue(t, today) {
                    "overdue"
                } else {
                    t.status.as_str()
                };
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    t.id, row.member_name, row.book_title, t.borrow_date, t.due_date, returned, status
                );
            }
        }
        Command::Summary => {
            let summary = services::dashboard_summary(&db);
            println!("Total copies:   {}", summary.total_copies);
            println!("Total members:  {}", summary.total_members);
            println!("Borrowed:       {}", summary.total_borrowed);
            println!("Overdue:        {}", summary.total_overdue);
        }
    }

    Ok(())
}
