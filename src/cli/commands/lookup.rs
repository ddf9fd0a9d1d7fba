use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_location(config: Config, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let location = state.lookup_service.resolve_location(query).await?;

    println!("{}", serde_json::to_string_pretty(&location)?);
    Ok(())
}

pub async fn cmd_weather(config: Config, latitude: &str, longitude: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let forecast = state
        .lookup_service
        .resolve_weather(latitude, longitude)
        .await?;

    if forecast.is_empty() {
        println!("No forecast available for {latitude},{longitude}");
        return Ok(());
    }

    for day in &forecast {
        println!("{}  {}", day.time, day.forecast);
    }
    Ok(())
}

pub async fn cmd_movies(config: Config, query: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let movies = state.lookup_service.resolve_movies(query).await?;

    if movies.is_empty() {
        println!("No movies found for '{query}'");
        return Ok(());
    }

    println!("{:-<60}", "");
    for movie in &movies {
        let released = if movie.released_on.is_empty() {
            "unreleased"
        } else {
            movie.released_on.as_str()
        };
        println!("• {} ({released})", movie.title);
        println!(
            "  Rating: {:.1} ({} votes) | Popularity: {:.1}",
            movie.average_votes, movie.total_votes, movie.popularity
        );
    }
    Ok(())
}
