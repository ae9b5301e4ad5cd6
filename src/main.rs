use book_catalog::config::{self, Command};
use book_catalog::core::review_verifier::Verdict;
use book_catalog::core::BookRepository;
use book_catalog::utils::{logger, validation::Validate};
use book_catalog::{
    BookSynchronization, BookSynchronizationListener, CatalogConfig, CatalogError, CliConfig,
    Database, NewReview, OpenLibraryApiClient, ReviewService, ReviewVerifier,
    SqliteBookRepository, SqliteReviewRepository,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match config::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    if config.logging.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("❌ Command failed: {} (retryable: {})", e, e.is_retryable());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(command: Command, config: &CatalogConfig) -> Result<(), CatalogError> {
    match command {
        Command::Verify { text } => {
            match ReviewVerifier::new().verify(&text) {
                Verdict::Accepted => println!("✅ Review meets the quality standards"),
                Verdict::Rejected(reason) => println!("❌ Review rejected: {}", reason),
            }
            Ok(())
        }
        Command::Sync { isbn } => synchronize(config, BookSynchronization::new(isbn)).await,
        Command::SyncMessage { payload } => {
            let request = BookSynchronization::from_message(&payload)?;
            synchronize(config, request).await
        }
        Command::Stats => {
            let pool = Database::connect(&config.database.url).await?;
            let service = ReviewService::new(
                SqliteBookRepository::new(pool.clone()),
                SqliteReviewRepository::new(pool.clone()),
            );

            let statistics = service.statistics().await?;
            if statistics.is_empty() {
                println!("No reviews stored yet");
            }
            for stat in statistics {
                println!(
                    "#{:<4} {}  ratings: {:<4} avg: {}",
                    stat.id,
                    stat.isbn,
                    stat.ratings,
                    stat.avg_display()
                );
            }

            pool.close().await;
            Ok(())
        }
        Command::Reviews { isbn } => {
            let pool = Database::connect(&config.database.url).await?;
            let service = ReviewService::new(
                SqliteBookRepository::new(pool.clone()),
                SqliteReviewRepository::new(pool.clone()),
            );

            let reviews = service.reviews_for_book(&isbn).await?;
            if reviews.is_empty() {
                println!("No reviews for ISBN {}", isbn);
            }
            for review in reviews {
                println!(
                    "#{:<4} {}/5  {}  {}",
                    review.id.unwrap_or_default(),
                    review.rating,
                    review.user_id.as_deref().unwrap_or("anonymous"),
                    review.content
                );
            }

            pool.close().await;
            Ok(())
        }
        Command::Review {
            isbn,
            rating,
            content,
            title,
            user,
        } => {
            let pool = Database::connect(&config.database.url).await?;
            let service = ReviewService::new(
                SqliteBookRepository::new(pool.clone()),
                SqliteReviewRepository::new(pool.clone()),
            );

            let new_review = NewReview {
                rating,
                title,
                content,
                user_id: user,
            };
            let id = service.create_review(&isbn, new_review).await?;
            println!("✅ Stored review #{} for ISBN {}", id, isbn);

            pool.close().await;
            Ok(())
        }
    }
}

async fn synchronize(config: &CatalogConfig, request: BookSynchronization) -> Result<(), CatalogError> {
    let pool = Database::connect(&config.database.url).await?;
    let client =
        OpenLibraryApiClient::new(config.open_library.base_url.clone(), config.request_timeout())?;
    let listener = BookSynchronizationListener::new(SqliteBookRepository::new(pool.clone()), client);

    let isbn = request.isbn.clone();
    listener.consume_book_updates(request).await?;

    match listener.book_repository().find_by_isbn(&isbn).await? {
        Some(book) => println!("📚 {} -> {} (id {:?})", book.isbn, book.title, book.id),
        None => println!("⚠️  ISBN {:?} was not synchronized", isbn),
    }

    pool.close().await;
    Ok(())
}
