use cinemood_client::{
    models::ImageSize,
    services::{AiService, HealthService, MovieService},
    views::HomePage,
    ApiClient, Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let client = ApiClient::from_config(&config)?;

    if let Err(e) = HealthService::new(client.clone()).check().await {
        tracing::warn!(error = %e, "Health check failed, continuing anyway");
    }

    let home = HomePage::new(MovieService::new(client.clone()), AiService::new(client));
    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    if query.trim().is_empty() {
        if let Some(handle) = home.mount() {
            handle.await?;
        }
        println!("Popular movies:");
        for movie in home.popular_movies() {
            let rating = movie
                .vote_average
                .map(|r| format!("{:.1}", r))
                .unwrap_or_else(|| "N/A".to_string());
            println!("  {} ({}) ⭐ {}", movie.title, year_label(movie.release_year()), rating);
        }
        return Ok(());
    }

    home.submit_query(&query).await?;

    if let Some(intent) = home.intent() {
        if let Some(mood) = &intent.mood {
            println!("Mood: {}", mood);
        }
        if let Some(genres) = intent.genres.as_ref().filter(|g| !g.is_empty()) {
            println!("Genres: {}", genres.join(", "));
        }
        if let Some(keywords) = intent.keywords.as_ref().filter(|k| !k.is_empty()) {
            println!("Keywords: {}", keywords.join(", "));
        }
    }

    let recommendations = home.recommendations();
    println!("{} recommendations for \"{}\":", recommendations.len(), query);
    for rec in recommendations {
        println!(
            "  {} ({}) {}% [{}]",
            rec.movie.title,
            year_label(rec.movie.release_year()),
            rec.similarity_percent(),
            rec.movie.genre_names().join(", ")
        );
        if let Some(reason) = &rec.reason {
            println!("    {}", reason);
        }
        if let Some(url) = rec.movie.poster_url(&config.image_base_url, ImageSize::W500) {
            println!("    {}", url);
        }
    }

    Ok(())
}

fn year_label(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "N/A".to_string())
}
