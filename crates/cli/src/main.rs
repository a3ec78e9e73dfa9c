use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use data_loader::UserId;
use stats::SessionModel;
use std::io::{self, Write};
use std::path::PathBuf;

/// ReelRanks - movie catalog statistics and recommendations
#[derive(Parser)]
#[command(name = "reel-ranks")]
#[command(about = "Rank movies and genres from pipe-delimited catalogs", long_about = None)]
struct Cli {
    /// Path to the movies file (genre|movieId|movieName); prompts if omitted
    #[arg(long)]
    movies: Option<PathBuf>,

    /// Path to the ratings file (movieName|rating|userId); prompts if omitted
    #[arg(long)]
    ratings: Option<PathBuf>,
}

/// What an interactive step asks the surrounding loop to do next.
enum Flow {
    Continue,
    Quit,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    println!("{}", "ReelRanks - Movie Catalog Statistics".bold().blue());
    println!();

    let mut model = SessionModel::new();

    // Non-interactive preload when both paths are given on the command line
    if let (Some(movies), Some(ratings)) = (&cli.movies, &cli.ratings) {
        spinner("Loading movies...");
        if let Err(e) = model.load_movies(movies) {
            println!("{} {e}", "[Error]".red());
        } else {
            spinner("Loading ratings...");
            if let Err(e) = model.load_ratings(ratings) {
                println!("{} {e}", "[Error]".red());
                model.clear();
            }
        }
    }

    if !model.is_ready() {
        if let Flow::Quit = load_with_prompt(&mut model)? {
            return Ok(());
        }
    }
    println!("{}", "Data loaded successfully.".green());
    println!();

    main_menu(&mut model)
}

/// Prompt for both files until a full load succeeds or the user quits.
fn load_with_prompt(model: &mut SessionModel) -> Result<Flow> {
    loop {
        let movies_path = match prompt("Enter path to MOVIES file (or 'q' to quit): ")? {
            Reply::Quit | Reply::Back => return Ok(Flow::Quit),
            Reply::Value(path) => path,
        };

        spinner("Loading movies...");
        model.clear();
        if let Err(e) = model.load_movies(movies_path.as_ref()) {
            println!("{} {e}", "[Error]".red());
            continue;
        }

        loop {
            let ratings_path = match prompt("Enter path to RATINGS file (or 'q' to quit): ")? {
                Reply::Quit | Reply::Back => return Ok(Flow::Quit),
                Reply::Value(path) => path,
            };

            spinner("Loading ratings...");
            if let Err(e) = model.load_ratings(ratings_path.as_ref()) {
                // the model keeps the catalog and no partial ratings
                println!("{} {e}", "[Error]".red());
                continue;
            }
            return Ok(Flow::Continue);
        }
    }
}

fn main_menu(model: &mut SessionModel) -> Result<()> {
    loop {
        println!("{}", "=== Main Menu ===".bold());
        println!("1) Movie popularity (all)");
        println!("2) Movie popularity in a genre");
        println!("3) Genre popularity");
        println!("4) User preference for genre");
        println!("5) Recommend movies");
        println!("6) Reload data");
        println!("7) Quit");

        let choice = match prompt("Choose an option (1-7), or 'q' to quit: ")? {
            Reply::Quit => return Ok(()),
            Reply::Back => continue,
            Reply::Value(s) => s,
        };

        let flow = match parse_menu_number(&choice) {
            Some(1) => movie_popularity(model)?,
            Some(2) => movie_popularity_in_genre(model)?,
            Some(3) => genre_popularity(model)?,
            Some(4) => user_preference(model)?,
            Some(5) => recommend_movies(model)?,
            Some(6) => reload_data(model)?,
            Some(7) => Flow::Quit,
            _ => {
                println!("Invalid choice. Please select 1-7 (or 'q' to quit).");
                println!();
                Flow::Continue
            }
        };
        if let Flow::Quit = flow {
            return Ok(());
        }
    }
}

fn movie_popularity(model: &SessionModel) -> Result<Flow> {
    println!();
    println!("{}", "=== Movie Popularity (All) ===".bold().blue());
    let ranked = model.ranked_movies();
    if ranked.is_empty() {
        println!("No movies found.");
    }
    for (idx, name) in ranked.iter().enumerate() {
        let (avg, count) = movie_line_stats(model, name);
        let genre = model
            .catalog()
            .and_then(|c| c.movie(name))
            .map(|m| m.genre_display.clone())
            .unwrap_or_default();
        println!(
            "{}) {} - Avg: {:.2} (Count: {}) - Genre: {}",
            idx + 1,
            name,
            avg,
            count,
            genre
        );
    }
    println!();
    back_or_quit()
}

fn movie_popularity_in_genre(model: &SessionModel) -> Result<Flow> {
    println!();
    println!("{}", "=== Movie Popularity by Genre ===".bold().blue());

    let mut genres: Vec<(String, String)> = model
        .catalog()
        .map(|c| {
            c.genres()
                .map(|(key, entry)| (key.to_string(), entry.display.clone()))
                .collect()
        })
        .unwrap_or_default();
    if genres.is_empty() {
        println!("No genres available.");
        println!();
        return back_or_quit();
    }
    genres.sort_by_key(|(_, display)| display.to_lowercase());

    loop {
        println!("Available genres:");
        for (idx, (_, display)) in genres.iter().enumerate() {
            println!("{}) {display}", idx + 1);
        }

        let choice = match prompt("\nSelect a genre by number, or 'b' to go back, or 'q' to quit: ")? {
            Reply::Quit => return Ok(Flow::Quit),
            Reply::Back => return Ok(Flow::Continue),
            Reply::Value(s) => s,
        };

        let Some(idx) = parse_menu_number(&choice)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|&n| (1..=genres.len()).contains(&n))
        else {
            println!("Invalid selection. Please choose a listed number, or 'b'/'q'.");
            println!();
            continue;
        };

        let (key, display) = &genres[idx - 1];
        println!();
        println!("{}", format!("--- {display} ---").bold());
        let ranked = model.ranked_movies_in_genre(key);
        if ranked.is_empty() {
            println!("No movies in this genre.");
        }
        for (i, name) in ranked.iter().enumerate() {
            let (avg, count) = movie_line_stats(model, name);
            println!("{}) {} - Avg: {:.2} (Count: {})", i + 1, name, avg, count);
        }
        println!();
        return back_or_quit();
    }
}

fn genre_popularity(model: &SessionModel) -> Result<Flow> {
    println!();
    println!("{}", "=== Genre Popularity ===".bold().blue());
    let ranked = model.ranked_genres();
    if ranked.is_empty() {
        println!("No rated genres found.");
        println!();
        return back_or_quit();
    }

    for (idx, key) in ranked.iter().enumerate() {
        let display = model
            .catalog()
            .map(|c| c.genre_display(key).to_string())
            .unwrap_or_else(|| key.clone());
        if let Some(stats) = model.genre_stats(key) {
            println!(
                "{}) {} - Avg of averages: {:.2} (Total ratings: {})",
                idx + 1,
                display,
                stats.avg_of_movie_averages,
                stats.total_ratings
            );
        }
    }
    println!();
    back_or_quit()
}

fn user_preference(model: &SessionModel) -> Result<Flow> {
    println!();
    println!("{}", "=== User Preference for Genre ===".bold().blue());
    let Some(user) = select_user(model)? else {
        return Ok(Flow::Continue);
    };
    if user == SELECT_QUIT {
        return Ok(Flow::Quit);
    }

    match model.user_top_genre(user) {
        Some(top) => {
            let display = model
                .catalog()
                .map(|c| c.genre_display(&top.genre_key).to_string())
                .unwrap_or_else(|| top.genre_key.clone());
            println!();
            println!(
                "Top genre for user {}: {} - Avg: {:.2} (Count: {})",
                user,
                display.bold(),
                top.average,
                top.count
            );
        }
        None => println!("No data for this user."),
    }
    println!();
    back_or_quit()
}

fn recommend_movies(model: &SessionModel) -> Result<Flow> {
    println!();
    println!("{}", "=== Recommend Movies ===".bold().blue());
    let Some(user) = select_user(model)? else {
        return Ok(Flow::Continue);
    };
    if user == SELECT_QUIT {
        return Ok(Flow::Quit);
    }

    let Some(top) = model.user_top_genre(user) else {
        println!("No data: this user has no ratings.");
        println!();
        return back_or_quit();
    };
    let display = model
        .catalog()
        .map(|c| c.genre_display(&top.genre_key).to_string())
        .unwrap_or_else(|| top.genre_key.clone());
    println!();
    println!(
        "Preferred genre for user {}: {} - Avg: {:.2} (Count: {})",
        user,
        display.bold(),
        top.average,
        top.count
    );

    let recs = model.recommend(user);
    if recs.is_empty() {
        println!("No unseen movies to recommend in this genre.");
        println!();
        return back_or_quit();
    }

    println!();
    println!("{}", "Top recommendations:".bold());
    for (idx, name) in recs.iter().enumerate() {
        let (avg, count) = movie_line_stats(model, name);
        println!("{}) {} - Avg: {:.2} (Count: {})", idx + 1, name, avg, count);
    }
    println!();
    back_or_quit()
}

fn reload_data(model: &mut SessionModel) -> Result<Flow> {
    println!();
    println!("{}", "=== Reload Data ===".bold().blue());
    loop {
        let answer =
            match prompt("Are you sure you want to reload? This will clear current data. (Y/N): ")? {
                Reply::Quit => return Ok(Flow::Quit),
                Reply::Back => return Ok(Flow::Continue),
                Reply::Value(s) => s.to_lowercase(),
            };
        match answer.as_str() {
            "y" | "yes" => {
                spinner("Clearing data...");
                model.clear();
                if let Flow::Quit = load_with_prompt(model)? {
                    return Ok(Flow::Quit);
                }
                println!("{}", "Data loaded successfully.".green());
                println!();
                return Ok(Flow::Continue);
            }
            "n" | "no" => {
                println!("Reload canceled.");
                println!();
                return Ok(Flow::Continue);
            }
            _ => println!("Please enter Y/N (or 'b' to go back, 'q' to quit)."),
        }
    }
}

// Sentinel for select_user's quit case; user ids are validated non-negative
// i64 on load, so this value can never collide with a real user.
const SELECT_QUIT: UserId = u64::MAX;

/// Print the roster and prompt for a user id. `None` means back;
/// `SELECT_QUIT` means quit.
fn select_user(model: &SessionModel) -> Result<Option<UserId>> {
    let users: Vec<UserId> = model
        .ratings()
        .map(|r| r.users().to_vec())
        .unwrap_or_default();
    if users.is_empty() {
        println!("No user ratings available.");
        return Ok(None);
    }
    print_user_list(&users);

    loop {
        let choice = match prompt("\nEnter a user ID, or 'b' to go back, or 'q' to quit: ")? {
            Reply::Quit => return Ok(Some(SELECT_QUIT)),
            Reply::Back => return Ok(None),
            Reply::Value(s) => s,
        };
        match parse_menu_number(&choice) {
            Some(id) if id >= 0 && model.ratings().is_some_and(|r| r.contains_user(id as UserId)) => {
                return Ok(Some(id as UserId));
            }
            _ => println!("Invalid user ID. Please choose an ID from the list, or 'b'/'q'."),
        }
    }
}

/// Print user ids in compact rows of twelve.
fn print_user_list(users: &[UserId]) {
    println!("Available user IDs:");
    for chunk in users.chunks(12) {
        let row: Vec<String> = chunk.iter().map(|u| u.to_string()).collect();
        println!("  {}", row.join(", "));
    }
}

fn movie_line_stats(model: &SessionModel, name: &str) -> (f64, u32) {
    model
        .movie_stats(name)
        .map(|s| (s.average, s.count))
        .unwrap_or((0.0, 0))
}

/// Hold the feature's output on screen until the user moves on.
fn back_or_quit() -> Result<Flow> {
    loop {
        match prompt("Press 'b' to go back or 'q' to quit: ")? {
            Reply::Quit => return Ok(Flow::Quit),
            Reply::Back => return Ok(Flow::Continue),
            Reply::Value(_) => println!("Invalid input. Please press 'b' or 'q'."),
        }
    }
}

enum Reply {
    Quit,
    Back,
    Value(String),
}

/// Read one trimmed line; `q`/`b` (any case) are intercepted. EOF quits.
fn prompt(label: &str) -> Result<Reply> {
    print!("{label}");
    io::stdout().flush()?;

    let mut buffer = String::new();
    if io::stdin().read_line(&mut buffer)? == 0 {
        return Ok(Reply::Quit);
    }
    let text = buffer.trim();
    Ok(match text.to_lowercase().as_str() {
        "q" => Reply::Quit,
        "b" => Reply::Back,
        _ => Reply::Value(text.to_string()),
    })
}

/// Accept "1" or "1." style menu input.
fn parse_menu_number(text: &str) -> Option<i64> {
    let text = text.trim();
    let text = text.strip_suffix('.').unwrap_or(text);
    text.parse().ok()
}

/// Short one-line loading animation.
fn spinner(label: &str) {
    let frames = ['|', '/', '-', '\\'];
    for i in 0..10 {
        print!("\r{label} {}", frames[i % frames.len()]);
        let _ = io::stdout().flush();
        std::thread::sleep(std::time::Duration::from_millis(60));
    }
    print!("\r{}\r", " ".repeat(label.len() + 2));
    let _ = io::stdout().flush();
}
