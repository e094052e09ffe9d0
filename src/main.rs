use std::sync::Arc;

use poem::{listener::TcpListener, Server};

use admin_console_backend::api;
use admin_console_backend::config::{self, ApplicationSettings};
use admin_console_backend::AppData;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();
    config::init_logging();

    let settings = ApplicationSettings::from_env().expect("invalid configuration");

    let app_data = AppData::init(settings)
        .await
        .expect("failed to initialize application data");

    let address = format!("0.0.0.0:{}", app_data.settings.server.port);
    tracing::info!("starting server on {}", address);

    let app = api::routes(Arc::new(app_data));

    Server::new(TcpListener::bind(address)).run(app).await
}
