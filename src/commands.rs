//! Per-subcommand run functions for the Newsstand CLI

use std::io::Write;
use std::path::Path;

use newsstand::ui::{self, Icons};
use newsstand::{QueryEngine, SqliteStore, config};

use crate::OutputMode;

/// Resolve the database path: CLI flag wins, then newsstand.toml, then default
pub fn resolve_database(
    flag: Option<std::path::PathBuf>,
    config_path: Option<&Path>,
) -> anyhow::Result<std::path::PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(cfg) = config::load_config(config_path)? {
        if let Some(db) = cfg.database {
            return Ok(std::path::PathBuf::from(db));
        }
    }
    Ok(config::default_database_path())
}

fn open_store(db: &Path) -> anyhow::Result<SqliteStore> {
    config::ensure_db_dir(db)?;
    tracing::debug!("Opening database at {}", db.display());
    Ok(SqliteStore::open(db)?)
}

fn emit_json(op: &str, data: serde_json::Value) -> anyhow::Result<()> {
    let envelope = serde_json::json!({ "ok": true, "op": op, "data": data });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

// ========== Insert Commands ==========

pub fn run_add_author(db: &Path, mode: OutputMode, name: &str) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let id = store.create_author(name)?;
    tracing::info!("Created author {} ({})", id, name);
    if mode.is_human() {
        ui::success(&format!("Created author #{}: {}", id, name));
    } else {
        emit_json("add-author", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_add_magazine(
    db: &Path,
    mode: OutputMode,
    name: &str,
    category: &str,
) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let id = store.create_magazine(name, category)?;
    tracing::info!("Created magazine {} ({})", id, name);
    if mode.is_human() {
        ui::success(&format!("Created magazine #{}: {} [{}]", id, name, category));
    } else {
        emit_json("add-magazine", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

pub fn run_add_article(
    db: &Path,
    mode: OutputMode,
    title: &str,
    content: &str,
    author_id: i64,
    magazine_id: i64,
) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let id = store.create_article(title, content, author_id, magazine_id)?;
    tracing::info!("Created article {} ({})", id, title);
    if mode.is_human() {
        ui::success(&format!("Created article #{}: {}", id, title));
    } else {
        emit_json("add-article", serde_json::json!({ "id": id }))?;
    }
    Ok(())
}

// ========== Query Commands ==========

pub fn run_author_of(db: &Path, mode: OutputMode, article_id: i64) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let engine = QueryEngine::new(&store);
    let author = engine.author_of_article(article_id)?;
    if mode.is_human() {
        match &author {
            Some(author) => println!("{} #{} {}", Icons::PERSON, author.id(), author.name()),
            None => println!("{} No such article.", Icons::EMPTY),
        }
    } else {
        emit_json("author-of", serde_json::json!({ "author": author }))?;
    }
    Ok(())
}

pub fn run_magazine_of(db: &Path, mode: OutputMode, article_id: i64) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let engine = QueryEngine::new(&store);
    let magazine = engine.magazine_of_article(article_id)?;
    if mode.is_human() {
        match &magazine {
            Some(mag) => println!(
                "{} #{} {} [{}]",
                Icons::BOOK,
                mag.id(),
                mag.name(),
                mag.category()
            ),
            None => println!("{} No such article.", Icons::EMPTY),
        }
    } else {
        emit_json("magazine-of", serde_json::json!({ "magazine": magazine }))?;
    }
    Ok(())
}

pub fn run_articles_by_author(db: &Path, mode: OutputMode, author_id: i64) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let engine = QueryEngine::new(&store);
    let articles = engine.articles_of_author(author_id)?;
    if mode.is_human() {
        if articles.is_empty() {
            println!("{} No articles found.", Icons::EMPTY);
        } else {
            for article in &articles {
                println!(
                    "{} #{} {} (magazine #{})",
                    Icons::FILE,
                    article.id(),
                    article.title(),
                    article.magazine_id()
                );
            }
        }
    } else {
        emit_json("articles-by-author", serde_json::json!({ "articles": articles }))?;
    }
    Ok(())
}

pub fn run_articles_in_magazine(
    db: &Path,
    mode: OutputMode,
    magazine_id: i64,
) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let engine = QueryEngine::new(&store);
    let articles = engine.articles_of_magazine(magazine_id)?;
    if mode.is_human() {
        if articles.is_empty() {
            println!("{} No articles found.", Icons::EMPTY);
        } else {
            for article in &articles {
                println!(
                    "{} #{} {} (author #{})",
                    Icons::FILE,
                    article.id(),
                    article.title(),
                    article.author_id()
                );
            }
        }
    } else {
        emit_json(
            "articles-in-magazine",
            serde_json::json!({ "articles": articles }),
        )?;
    }
    Ok(())
}

pub fn run_authors_in_magazine(
    db: &Path,
    mode: OutputMode,
    magazine_id: i64,
) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let engine = QueryEngine::new(&store);
    let authors = engine.authors_of_magazine(magazine_id)?;
    if mode.is_human() {
        if authors.is_empty() {
            println!("{} No authors found.", Icons::EMPTY);
        } else {
            for author in &authors {
                println!("{} #{} {}", Icons::PERSON, author.id(), author.name());
            }
        }
    } else {
        emit_json("authors-in-magazine", serde_json::json!({ "authors": authors }))?;
    }
    Ok(())
}

pub fn run_magazines_by_author(db: &Path, mode: OutputMode, author_id: i64) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let engine = QueryEngine::new(&store);
    let magazines = engine.magazines_of_author(author_id)?;
    if mode.is_human() {
        if magazines.is_empty() {
            println!("{} No magazines found.", Icons::EMPTY);
        } else {
            for mag in &magazines {
                println!(
                    "{} #{} {} [{}]",
                    Icons::BOOK,
                    mag.id(),
                    mag.name(),
                    mag.category()
                );
            }
        }
    } else {
        emit_json(
            "magazines-by-author",
            serde_json::json!({ "magazines": magazines }),
        )?;
    }
    Ok(())
}

pub fn run_titles(db: &Path, mode: OutputMode, magazine_id: i64) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let engine = QueryEngine::new(&store);
    let titles = engine.article_titles_of_magazine(magazine_id)?;
    if mode.is_human() {
        match &titles {
            Some(titles) => {
                for title in titles {
                    println!("{}", title);
                }
            }
            None => println!("{} This magazine has no articles.", Icons::EMPTY),
        }
    } else {
        emit_json("titles", serde_json::json!({ "titles": titles }))?;
    }
    Ok(())
}

pub fn run_contributors(db: &Path, mode: OutputMode, magazine_id: i64) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let engine = QueryEngine::new(&store);
    let authors = engine.contributing_authors(magazine_id)?;
    if mode.is_human() {
        match &authors {
            Some(authors) => {
                for author in authors {
                    println!("{} #{} {}", Icons::PERSON, author.id(), author.name());
                }
            }
            None => println!("No authors have more than 2 articles in this magazine."),
        }
    } else {
        emit_json("contributors", serde_json::json!({ "authors": authors }))?;
    }
    Ok(())
}

pub fn run_stats(db: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let stats = store.stats()?;
    if mode.is_human() {
        ui::header(&format!("Newsstand Statistics ({})", db.display()));
        let table = ui::stats_table(&[
            ("Authors", &stats.authors.to_string()),
            ("Magazines", &stats.magazines.to_string()),
            ("Articles", &stats.articles.to_string()),
        ]);
        println!("{}", table);
    } else {
        emit_json(
            "stats",
            serde_json::json!({
                "authors": stats.authors,
                "magazines": stats.magazines,
                "articles": stats.articles,
            }),
        )?;
    }
    Ok(())
}

// ========== Interactive Menu ==========

fn prompt(label: &str) -> anyhow::Result<Option<String>> {
    print!("{}", label);
    std::io::stdout().flush()?;
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_id(label: &str) -> anyhow::Result<Option<i64>> {
    loop {
        let Some(line) = prompt(label)? else {
            return Ok(None);
        };
        match line.parse::<i64>() {
            Ok(id) => return Ok(Some(id)),
            Err(_) => ui::warn("Please enter an integer id."),
        }
    }
}

/// Interactive loop: seed one author/magazine/article via prompts, then run
/// numbered relationship queries until option 9 or end of input.
pub fn run_menu(db: &Path) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let engine = QueryEngine::new(&store);

    // Seed one record per table
    let Some(author_name) = prompt("Enter author's name: ")? else {
        return Ok(());
    };
    let Some(magazine_name) = prompt("Enter magazine name: ")? else {
        return Ok(());
    };
    let Some(magazine_category) = prompt("Enter magazine category: ")? else {
        return Ok(());
    };
    let Some(article_title) = prompt("Enter article title: ")? else {
        return Ok(());
    };
    let Some(article_content) = prompt("Enter article content: ")? else {
        return Ok(());
    };

    let author_id = store.create_author(&author_name)?;
    let magazine_id = store.create_magazine(&magazine_name, &magazine_category)?;
    store.create_article(&article_title, &article_content, author_id, magazine_id)?;

    println!("\nMagazines:");
    for mag in store.list_magazines()? {
        println!("{}", mag);
    }
    println!("\nAuthors:");
    for author in store.list_authors()? {
        println!("{}", author);
    }
    println!("\nArticles:");
    for article in store.list_articles()? {
        println!("{}", article);
    }

    loop {
        println!("\nOptions:");
        println!("1. Get Author of Article");
        println!("2. Get Magazine of Article");
        println!("3. Get Articles of Author");
        println!("4. Get Articles of Magazine");
        println!("5. Get Authors of Magazine");
        println!("6. Get Article Titles of Magazine");
        println!("7. Get Magazines of Author");
        println!("8. Get Contributing Authors");
        println!("9. Exit");

        let Some(choice) = prompt("Select an option: ")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some(id) = prompt_id("Enter article ID: ")? else {
                    break;
                };
                match engine.author_of_article(id)? {
                    Some(author) => println!("{}", author),
                    None => println!("None"),
                }
            }
            "2" => {
                let Some(id) = prompt_id("Enter article ID: ")? else {
                    break;
                };
                match engine.magazine_of_article(id)? {
                    Some(mag) => println!("{}", mag),
                    None => println!("None"),
                }
            }
            "3" => {
                let Some(id) = prompt_id("Enter author ID: ")? else {
                    break;
                };
                for article in engine.articles_of_author(id)? {
                    println!("{}", article);
                }
            }
            "4" => {
                let Some(id) = prompt_id("Enter magazine ID: ")? else {
                    break;
                };
                for article in engine.articles_of_magazine(id)? {
                    println!("{}", article);
                }
            }
            "5" => {
                let Some(id) = prompt_id("Enter magazine ID: ")? else {
                    break;
                };
                for author in engine.authors_of_magazine(id)? {
                    println!("{}", author);
                }
            }
            "6" => {
                let Some(id) = prompt_id("Enter magazine ID: ")? else {
                    break;
                };
                match engine.article_titles_of_magazine(id)? {
                    Some(titles) => {
                        for title in titles {
                            println!("{}", title);
                        }
                    }
                    None => println!("This magazine has no articles."),
                }
            }
            "7" => {
                let Some(id) = prompt_id("Enter author ID: ")? else {
                    break;
                };
                for mag in engine.magazines_of_author(id)? {
                    println!("{}", mag);
                }
            }
            "8" => {
                let Some(id) = prompt_id("Enter magazine ID: ")? else {
                    break;
                };
                match engine.contributing_authors(id)? {
                    Some(authors) => {
                        for author in authors {
                            println!("{}", author);
                        }
                    }
                    None => {
                        println!("No authors have more than 2 articles in this magazine.")
                    }
                }
            }
            "9" => break,
            _ => println!("Invalid choice, please select again."),
        }
    }

    Ok(())
}
