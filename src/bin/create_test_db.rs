use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use pocketbook_rs::{
    CategoryName, NewCurrency, Transaction, create_category, create_currency, create_transaction,
    initialize_db,
};

/// A utility for creating a test database for the pocketbook_rs server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating currencies...");
    let euro = create_currency(NewCurrency::new("EUR", "Euro", "€")?, &conn)?;
    create_currency(NewCurrency::new("NZD", "New Zealand dollar", "$")?, &conn)?;
    create_currency(NewCurrency::new("GBP", "British pound", "£")?, &conn)?;

    println!("Creating categories...");
    let groceries = create_category(CategoryName::new("Groceries")?, &conn)?;
    let rent = create_category(CategoryName::new("Rent")?, &conn)?;
    create_category(CategoryName::new("Travel")?, &conn)?;

    println!("Creating transactions...");
    let today = OffsetDateTime::now_utc().date();

    for day in 0..120 {
        let date = today - Duration::days(day);
        let category_id = match day % 3 {
            0 => Some(groceries.id),
            1 => None,
            _ if day % 30 == 2 => Some(rent.id),
            _ => None,
        };

        create_transaction(
            Transaction::build(-(12.5 + day as f64), date, &format!("Purchase #{day}"), euro.id)
                .sort_order(day % 2)
                .category_id(category_id),
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
