//! User Service Library
//!
//! User records with personal details, their storage, and their mapping to
//! the wire messages through a shared converter registry. The binary exposes
//! migrations and a few inspection commands.

pub mod config;
pub mod infra;
pub mod mappers;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::{AppError, AppResult};
use prost::Message;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database.url).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Turn a service failure into the message shown on the command line.
///
/// Server-side failures are logged by `AppError::user_message`.
fn report(err: AppError) -> Box<dyn std::error::Error> {
    format!("{}: {}", err.code(), err.user_message()).into()
}

/// Build the user service on top of a live database.
pub async fn connect_service(
    config: &UserServiceConfig,
) -> Result<Arc<dyn UserService>, Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    db.ping().await?;

    let repo = Arc::new(UserStore::new(db.get_connection()));
    let converters = Arc::new(mappers::default_registry());

    Ok(Arc::new(UserManager::new(repo, converters)))
}

/// Create a user and print its id.
pub async fn create_user(email: String) -> Result<(), Box<dyn std::error::Error>> {
    let service = connect_service(&UserServiceConfig::from_env()).await?;
    let user = service.create_user(email).await.map_err(report)?;

    println!("{}", user.id);
    Ok(())
}

/// Print the wire form of a user and its encoded size.
pub async fn show_user(email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let service = connect_service(&UserServiceConfig::from_env()).await?;
    let message = wire_user_by_email(service.as_ref(), email)
        .await
        .map_err(report)?;

    println!("{:#?}", message);
    println!("encoded size: {} bytes", message.encoded_len());
    Ok(())
}

/// Look a user up by email and convert it to wire form.
async fn wire_user_by_email(service: &dyn UserService, email: &str) -> AppResult<proto::User> {
    let user = service.get_user_by_email(email).await?;
    service.to_wire(&user)
}

/// List every registered converter pair after resolving them all.
pub fn list_converters() {
    let registry = mappers::default_registry();
    let created = registry.warm_up();

    for key in registry.registered() {
        println!("{}", key);
    }
    info!(registered = registry.len(), created, "Converter registry ready");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use domain::User;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use uuid::Uuid;

    /// Counts every event emitted while it is the default subscriber.
    struct EventCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for EventCounter {
        fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn events_while_reporting(err: AppError) -> (String, usize) {
        let events = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(EventCounter(events.clone()));

        let message = tracing::subscriber::with_default(subscriber, || report(err).to_string());
        (message, events.load(Ordering::SeqCst))
    }

    #[test]
    fn test_report_logs_server_errors_once() {
        let (message, events) = events_while_reporting(AppError::internal("pool exhausted"));

        assert_eq!(message, "INTERNAL_ERROR: An internal error occurred");
        assert_eq!(events, 1);
    }

    #[test]
    fn test_report_client_errors_are_not_logged() {
        let (message, events) = events_while_reporting(AppError::NotFound);

        assert_eq!(message, "NOT_FOUND: Resource not found");
        assert_eq!(events, 0);
    }

    #[tokio::test]
    async fn test_wire_user_by_email_loads_once() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(User::new(Uuid::new_v4(), email.to_string()))));
        repo.expect_find_by_id().never();

        let service = UserManager::new(Arc::new(repo), Arc::new(mappers::default_registry()));
        let message = wire_user_by_email(&service, "user@example.com").await.unwrap();

        assert_eq!(message.email, "user@example.com");
        assert!(message.personal_details.is_none());
    }
}
