//! Admin request command handlers for the CLI.
//!
//! Every handler opens the file store in `HH_DATA_DIR`, so a missing or
//! unreadable request list is reseeded exactly as the server would.

use clap::Subcommand;
use hh_core::{AdminRequest, AdminRequestForm, AdminRequestStatus, AppConfig, CoordinateInput};
use hh_store::{AdminRequestRepository, FileStore, KeyValueStore, StoreConfig};

/// Sub-commands available under `requests`.
#[derive(Debug, Subcommand)]
pub enum RequestsCommands {
    /// List every request
    List,
    /// List pending requests
    Pending,
    /// Submit a new request
    Submit {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        shop_name: String,
        /// Latitude as typed; unparseable values are stored as 0
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<String>,
        /// Longitude as typed; unparseable values are stored as 0
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<String>,
        /// Map link used when coordinates are not known
        #[arg(long)]
        map_url: Option<String>,
    },
    /// Approve a pending request
    Approve { id: String },
    /// Reject a pending request
    Reject { id: String },
}

pub(crate) fn open_repository(
    config: &AppConfig,
) -> anyhow::Result<AdminRequestRepository<FileStore>> {
    let store = FileStore::open(&config.data_dir)?;
    Ok(AdminRequestRepository::open(
        store,
        &StoreConfig::from_app_config(config),
    )?)
}

/// # Errors
///
/// Returns an error if the store cannot be opened or the command fails.
pub(crate) fn run(config: &AppConfig, command: RequestsCommands) -> anyhow::Result<()> {
    let mut repo = open_repository(config)?;
    match command {
        RequestsCommands::List => print_requests(repo.requests().iter()),
        RequestsCommands::Pending => print_requests(repo.pending().into_iter()),
        RequestsCommands::Submit {
            user_id,
            email,
            shop_name,
            lat,
            lng,
            map_url,
        } => {
            let form = AdminRequestForm {
                user_id,
                user_email: email,
                shop_name,
                location_lat: lat.map(CoordinateInput::Text),
                location_lng: lng.map(CoordinateInput::Text),
                manual_location_url: map_url,
            };
            let created = submit(&mut repo, form)?;
            println!("submitted {} ({})", created.id, created.status);
        }
        RequestsCommands::Approve { id } => {
            let updated = decide(&mut repo, &id, AdminRequestStatus::Approved)?;
            println!("{} is now {}", updated.id, updated.status);
        }
        RequestsCommands::Reject { id } => {
            let updated = decide(&mut repo, &id, AdminRequestStatus::Rejected)?;
            println!("{} is now {}", updated.id, updated.status);
        }
    }
    Ok(())
}

/// Validate and append a request, refusing a second pending request for the
/// same user.
///
/// # Errors
///
/// Returns an error if the form is incomplete, the user already has a
/// pending request, or the list cannot be written.
pub(crate) fn submit<S: KeyValueStore>(
    repo: &mut AdminRequestRepository<S>,
    form: AdminRequestForm,
) -> anyhow::Result<AdminRequest> {
    let new = form.validate()?;
    if repo.has_pending_for(&new.user_id) {
        anyhow::bail!("user '{}' already has a pending request", new.user_id);
    }
    Ok(repo.submit(new)?)
}

/// # Errors
///
/// Returns an error if the id is unknown, the request was already decided,
/// or the list cannot be written.
pub(crate) fn decide<S: KeyValueStore>(
    repo: &mut AdminRequestRepository<S>,
    id: &str,
    status: AdminRequestStatus,
) -> anyhow::Result<AdminRequest> {
    repo.update_status(id, status)?
        .ok_or_else(|| anyhow::anyhow!("request '{id}' not found"))
}

fn print_requests<'a>(requests: impl Iterator<Item = &'a AdminRequest>) {
    let mut requests = requests.peekable();
    if requests.peek().is_none() {
        println!("no requests");
        return;
    }

    println!(
        "{:<38}{:<10}{:<16}{:<26}{:<18}LOCATION",
        "ID", "STATUS", "USER", "SHOP", "CREATED"
    );
    for r in requests {
        let location = r.manual_location_url.clone().unwrap_or_else(|| {
            format!("{:.4}, {:.4}", r.location_lat, r.location_lng)
        });
        println!(
            "{:<38}{:<10}{:<16}{:<26}{:<18}{}",
            r.id,
            r.status.as_str(),
            r.user_id,
            r.shop_name,
            r.created_at.format("%Y-%m-%d %H:%M").to_string(),
            location
        );
    }
}

#[cfg(test)]
mod tests {
    use hh_store::{seed_requests, MemoryStore};

    use super::*;

    fn repo() -> AdminRequestRepository<MemoryStore> {
        AdminRequestRepository::open(MemoryStore::new(), &StoreConfig::default()).unwrap()
    }

    fn form(user_id: &str) -> AdminRequestForm {
        AdminRequestForm {
            user_id: user_id.to_string(),
            user_email: format!("{user_id}@example.com"),
            shop_name: "Warung A".to_string(),
            location_lat: Some(CoordinateInput::Text("-6.2".to_string())),
            location_lng: Some(CoordinateInput::Text("106.8".to_string())),
            manual_location_url: None,
        }
    }

    #[test]
    fn submit_appends_pending_request() {
        let mut repo = repo();
        let created = submit(&mut repo, form("user-9")).unwrap();
        assert!(created.is_pending());
        assert!((created.location_lat + 6.2).abs() < f64::EPSILON);
        assert_eq!(repo.pending().len(), 3);
    }

    #[test]
    fn submit_refuses_second_pending_request() {
        let mut repo = repo();
        let err = submit(&mut repo, form("user-1")).unwrap_err();
        assert!(err.to_string().contains("already has a pending request"));
        assert_eq!(repo.requests().len(), 2);
    }

    #[test]
    fn submit_rejects_incomplete_form() {
        let mut repo = repo();
        let mut incomplete = form("user-9");
        incomplete.location_lat = None;
        assert!(submit(&mut repo, incomplete).is_err());
        assert_eq!(repo.requests().len(), 2);
    }

    #[test]
    fn decide_unknown_id_is_an_error_without_changes() {
        let mut repo = repo();
        let err = decide(&mut repo, "req_missing", AdminRequestStatus::Approved).unwrap_err();
        assert!(err.to_string().contains("not found"));
        assert_eq!(repo.requests(), seed_requests().as_slice());
    }

    #[test]
    fn decide_approves_pending_request() {
        let mut repo = repo();
        let id = seed_requests()[0].id.clone();
        let updated = decide(&mut repo, &id, AdminRequestStatus::Approved).unwrap();
        assert_eq!(updated.status, AdminRequestStatus::Approved);
        assert_eq!(updated.created_at, seed_requests()[0].created_at);
    }

    #[test]
    fn open_repository_seeds_data_dir() {
        let dir = std::env::temp_dir().join(format!("hh-cli-{}", uuid::Uuid::new_v4()));
        let config = AppConfig {
            env: hh_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "info".to_string(),
            data_dir: dir.clone(),
            catalog_path: "../../config/catalog.yaml".into(),
            requests_key: "requests".to_string(),
            opening_key: "opening".to_string(),
            default_province: "jakarta".to_string(),
            weather_base_url: "http://127.0.0.1:9".to_string(),
            weather_timeout_secs: 1,
        };

        let repo = open_repository(&config).unwrap();
        assert_eq!(repo.requests(), seed_requests().as_slice());
        assert!(dir.join(&config.requests_key).is_file());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
