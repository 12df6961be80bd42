use checkin::check_in_for_all;
use config::Config;

use logger::init_default_logger;

mod checkin;
mod config;
mod constants;
mod error;
mod graphql;
mod logger;
mod siwe;
mod utils;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _guard = init_default_logger();

    let config = Config::read_default().await;

    check_in_for_all(config).await?;

    Ok(())
}
