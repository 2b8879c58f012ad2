// Entry point and high-level CLI flow.
//
// - Option [1] loads the sales export and resolves its format, printing
//   diagnostics.
// - Option [2] generates the summary: a JSON file plus Markdown previews of
//   the top items, top categories, and insights.
// - After generating the summary, the user can choose to go back to the
//   selection menu or exit.
use menu_report::output::{self, category_preview_rows, item_preview_rows};
use menu_report::{parse_sales_table, summarize_table, util, SalesTable, SummaryOptions};
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_EXPORT_PATH: &str = "menu_breakdown.csv";
const SUMMARY_PATH: &str = "summary.json";

// Simple in-memory app state so we only parse the export once but can
// generate the summary multiple times in a single run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { table: None }));

struct AppState {
    table: Option<SalesTable>,
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the selection menu after generating
/// the summary.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Selection Menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        let resp = buf.trim().to_uppercase();
        match resp.as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: read the export and resolve it into a typed table.
///
/// On success, we store the `SalesTable` in `APP_STATE` and print a short
/// textual summary of what happened.
fn handle_load(path: &str) {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read {}: {}\n", path, e);
            return;
        }
    };
    match parse_sales_table(&text) {
        Ok(table) => {
            println!(
                "Processing export... ({} rows, {} format)",
                util::format_int(table.len() as i64),
                table.format_name()
            );
            println!("");
            let mut state = APP_STATE.lock().unwrap();
            state.table = Some(table);
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Handle option [2]: generate the summary and the JSON export.
fn handle_generate_summary() {
    let table = {
        let state = APP_STATE.lock().unwrap();
        state.table.clone()
    };
    let Some(table) = table else {
        println!("Error: No data loaded. Please load the sales export first (option 1).\n");
        return;
    };

    println!("Generating summary...\n");
    let summary = summarize_table(&table, &SummaryOptions::default());

    if let Err(e) = output::write_json(SUMMARY_PATH, &summary) {
        eprintln!("Write error: {}", e);
    }

    if let Some(range) = &summary.date_range {
        println!("Date range: {} to {}\n", range.start, range.end);
    }

    println!("Top Items");
    output::preview_table_rows(&item_preview_rows(&summary.top_items), summary.top_items.len());

    println!("Top Categories");
    output::preview_table_rows(
        &category_preview_rows(&summary.top_categories),
        summary.top_categories.len(),
    );

    println!("Insights");
    for insight in &summary.insights {
        println!("- {}", insight.text);
    }
    println!("\n(Summary exported to {})\n", SUMMARY_PATH);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_EXPORT_PATH.to_string());
    loop {
        println!("Menu Sales Summary:");
        println!("[1] Load the sales export");
        println!("[2] Generate summary\n");
        match read_choice().as_str() {
            "1" => {
                handle_load(&path);
            }
            "2" => {
                println!("");
                handle_generate_summary();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 or 2.\n");
            }
        }
    }
}
