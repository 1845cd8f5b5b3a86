//! book_search CLI: 書籍検索と保存済み書籍管理のクライアント。
//! サブコマンド無しで対話シェルを起動します。シェルの起動から終了までが
//! 1 セッションで、終了時に保存済み ID キャッシュを書き戻します。

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use scopeguard::guard;
use tokio::io::{AsyncBufReadExt, BufReader};

use book_search::application::{
    RemoveOutcome, SaveOutcome, SearchSession, ServiceContainer, UserFeedback,
};
use book_search::cli::{Cli, Cmd, ConfigCmd, ConfigField};
use book_search::domain::book::Book;
use book_search::error::BookSearchError;
use book_search::infrastructure::config::AppConfig;
use book_search::utils::config::EnvConfig;
use book_search::utils::env::load_env;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env();
    EnvConfig::init()?;

    let cli = Cli::parse();

    match cli.cmd {
        Some(Cmd::Search { query }) => run_search(query.join(" ")).await?,
        Some(Cmd::Saved) => run_saved().await?,
        Some(Cmd::Remove { book_id }) => run_remove(&book_id).await?,
        Some(Cmd::Me) => run_me().await?,
        Some(Cmd::Config { action }) => run_config(action)?,
        None => run_shell().await?,
    }

    Ok(())
}

/// 1 回の検索を実行して結果を表示する
async fn run_search(query: String) -> Result<(), Box<dyn std::error::Error>> {
    let container = ServiceContainer::new()?;
    let mut session = guard(container.session, |mut s| s.close());

    session.set_search_input(query);
    match session.submit_search().await {
        Ok(_) => println!("{}", session.render_results()),
        Err(e) => report_error(&e),
    }
    Ok(())
}

/// アカウントの保存済み書籍一覧を表示する
async fn run_saved() -> Result<(), Box<dyn std::error::Error>> {
    let container = ServiceContainer::new()?;
    let session = guard(container.session, |mut s| s.close());

    show_saved(&session).await;
    Ok(())
}

/// 保存済み書籍を 1 冊削除する
async fn run_remove(book_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let container = ServiceContainer::new()?;
    let mut session = guard(container.session, |mut s| s.close());

    remove_saved(&mut session, book_id).await;
    Ok(())
}

/// ログイン中ユーザーのプロフィールを表示する
async fn run_me() -> Result<(), Box<dyn std::error::Error>> {
    let container = ServiceContainer::new()?;
    let session = guard(container.session, |mut s| s.close());

    show_me(&session).await;
    Ok(())
}

/// 設定操作
fn run_config(action: ConfigCmd) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigCmd::Set { field } => match field {
            ConfigField::CachePath { path } => {
                let mut config = AppConfig::load();
                config.set_cache_path(PathBuf::from(path))?;
                println!("✅ cache-path updated: {}", config.cache_path().display());
            }
        },
    }
    Ok(())
}

/// 対話シェル。起動から終了までが 1 セッション。
async fn run_shell() -> Result<(), Box<dyn std::error::Error>> {
    let container = ServiceContainer::new()?;
    // どの経路で抜けてもセッションを閉じてキャッシュを書き戻す
    let mut session = guard(container.session, |mut s| s.close());

    println!("{}", session.render_results());
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break, // EOF
        };

        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(command) => command,
            None => continue,
        };
        let rest: Vec<&str> = parts.collect();

        match command {
            "search" => {
                session.set_search_input(rest.join(" "));
                match session.submit_search().await {
                    Ok(_) => println!("{}", session.render_results()),
                    Err(e) => report_error(&e),
                }
            }
            "save" => match rest.first() {
                Some(target) => save_from_results(&mut session, target).await,
                None => println!("Usage: save <n|bookId>"),
            },
            "list" => println!("{}", session.render_results()),
            "saved" => show_saved(&session).await,
            "remove" => match rest.first() {
                Some(book_id) => remove_saved(&mut session, book_id).await,
                None => println!("Usage: remove <bookId>"),
            },
            "me" => show_me(&session).await,
            "help" => print_help(),
            "quit" | "exit" => break,
            _ => println!("Unknown command. Type 'help' for the command list."),
        }
    }

    Ok(())
}

/// 検索結果から 1 冊選んで保存する。保存済みカードの操作は無効。
async fn save_from_results(session: &mut SearchSession, target: &str) {
    let book = match resolve_book(session, target) {
        Some(book) => book,
        None => {
            println!("{}", UserFeedback::unknown_book(target));
            return;
        }
    };

    if session.is_saved(&book.book_id) {
        // 保存ボタンの disabled 相当
        println!("{}", UserFeedback::already_saved(&book.title));
        return;
    }

    match session.save_book(&book.book_id).await {
        Ok(SaveOutcome::Saved) => println!("{}", UserFeedback::book_saved(&book.title)),
        Ok(SaveOutcome::UnknownBook) => println!("{}", UserFeedback::unknown_book(&book.book_id)),
        Ok(SaveOutcome::NotLoggedIn) => println!("{}", UserFeedback::login_required()),
        Err(e) => report_error(&e),
    }
}

async fn remove_saved(session: &mut SearchSession, book_id: &str) {
    match session.remove_book(book_id).await {
        Ok(RemoveOutcome::Removed) => println!("{}", UserFeedback::book_removed(book_id)),
        Ok(RemoveOutcome::NotLoggedIn) => println!("{}", UserFeedback::login_required()),
        Err(e) => report_error(&e),
    }
}

async fn show_saved(session: &SearchSession) {
    match session.profile().await {
        Ok(Some(profile)) => {
            println!(
                "{}",
                UserFeedback::profile_summary(&profile.username, profile.saved_books.len())
            );
            for book in &profile.saved_books {
                println!(
                    "  [{}] {} ({})",
                    book.book_id,
                    book.title,
                    book.authors.join(", ")
                );
            }
        }
        Ok(None) => println!("{}", UserFeedback::login_required()),
        Err(e) => report_error(&e),
    }
}

async fn show_me(session: &SearchSession) {
    match session.profile().await {
        Ok(Some(profile)) => {
            println!("{} <{}>", profile.username, profile.email);
            println!(
                "{}",
                UserFeedback::profile_summary(&profile.username, profile.saved_books.len())
            );
        }
        Ok(None) => println!("{}", UserFeedback::login_required()),
        Err(e) => report_error(&e),
    }
}

/// 行番号（1 始まり）または bookId で検索結果を引く
fn resolve_book(session: &SearchSession, target: &str) -> Option<Book> {
    if let Ok(index) = target.parse::<usize>() {
        if index == 0 {
            return None;
        }
        return session.searched_books().get(index - 1).cloned();
    }
    session
        .searched_books()
        .iter()
        .find(|b| b.book_id == target)
        .cloned()
}

fn report_error(e: &BookSearchError) {
    eprintln!("Error: {}", e);
    if e.is_retryable() {
        eprintln!("💡 Check your network connection and try again.");
    }
}

fn print_help() {
    println!("Commands:");
    println!("  search <words>    Search for books");
    println!("  save <n|bookId>   Save a result to your account");
    println!("  list              Show the current results");
    println!("  saved             Show your saved books");
    println!("  remove <bookId>   Remove a saved book");
    println!("  me                Show the logged-in profile");
    println!("  help              Show this help");
    println!("  quit              Exit and flush the saved-book cache");
}
