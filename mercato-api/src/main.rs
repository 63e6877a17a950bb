use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mercato_api::{app, AppState};
use mercato_order::engine::FulfillmentEngine;
use mercato_order::notify::{NotificationChannels, NotificationDispatcher};
use mercato_order::revenue::RevenueAttributor;
use mercato_store::{LoggingEmailSender, LoggingMessageSender, MemoryStore};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mercato_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = mercato_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Mercato API on port {}", config.server.port);

    let store = Arc::new(MemoryStore::new());

    let notifier = Arc::new(NotificationDispatcher::new(
        Arc::new(LoggingEmailSender),
        Arc::new(LoggingMessageSender),
        store.clone(),
        NotificationChannels {
            sender_email: config.notifications.sender_email.clone(),
            message_sender_id: config.notifications.message_sender_id.clone(),
        },
    ));
    let attributor = Arc::new(RevenueAttributor::new(store.clone(), store.clone()));
    let engine = Arc::new(FulfillmentEngine::new(
        store.clone(),
        notifier,
        attributor.clone(),
        config.platform.brand_name.clone(),
    ));

    let app_state = AppState {
        engine,
        store,
        attributor,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
