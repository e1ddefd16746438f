//! # Shop
//!
//! Simulated shop clients sharing one catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Shop                                       │
//! │                                                                         │
//! │  CatalogConfig::load ──► load_catalog ──► Arc<CatalogStore>            │
//! │                                               │                         │
//! │                          ReportAssembler ◄────┘                         │
//! │                                │                                        │
//! │         ┌──────────────────────┼──────────────────────┐                │
//! │         ▼                      ▼                      ▼                 │
//! │     Client 1               Client 2      ...      Client N              │
//! │   (at most `pool` run at once, each on a blocking thread)              │
//! │                                                                         │
//! │  Client: random id + locale → discounts → review(FourStar) → report    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! cargo run -p catalog-shop
//! cargo run -p catalog-shop -- --clients 10 --pool 4 --config ./catalog.toml
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use catalog_core::{ProductId, Rating};
use catalog_store::{
    load_catalog, CatalogConfig, ReportAssembler, ReportSink, DEFAULT_LANGUAGE_TAG,
};
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Clients started by default.
const DEFAULT_CLIENTS: usize = 5;

/// Clients allowed to run at the same time.
const DEFAULT_POOL_SIZE: usize = 3;

/// Product ids clients pick from. Some of them may not exist.
const ID_RANGE: std::ops::Range<u32> = 10..25;

const REVIEW_COMMENT: &str = "Another review";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut clients = DEFAULT_CLIENTS;
    let mut pool = DEFAULT_POOL_SIZE;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--clients" | "-n" => {
                if i + 1 < args.len() {
                    clients = args[i + 1].parse().unwrap_or(DEFAULT_CLIENTS);
                    i += 1;
                }
            }
            "--pool" | "-p" => {
                if i + 1 < args.len() {
                    pool = args[i + 1].parse().unwrap_or(DEFAULT_POOL_SIZE);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    let config = CatalogConfig::load(config_path)?;
    info!(
        data = %config.paths.data_folder.display(),
        reports = %config.paths.reports_folder.display(),
        locale = %config.locale.default_tag,
        "Configuration loaded"
    );

    let store = Arc::new(load_catalog(&config)?);
    info!(products = store.len(), "Catalog loaded");

    let reports = Arc::new(ReportAssembler::from_config(store, &config)?);

    for log in run_clients(reports, clients, pool.max(1)).await {
        println!("{}", log);
    }

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_ids(true)
        .init();
}

/// Runs `clients` clients, at most `pool` at a time.
///
/// Returns the logs of the clients that finished, in client order.
async fn run_clients<S>(reports: Arc<ReportAssembler<S>>, clients: usize, pool: usize) -> Vec<String>
where
    S: ReportSink + 'static,
{
    let permits = Arc::new(Semaphore::new(pool));
    let mut tasks = JoinSet::new();

    for number in 1..=clients {
        let reports = Arc::clone(&reports);
        let permits = Arc::clone(&permits);

        tasks.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| e.to_string())?;

            let client = format!("Client {}", number);
            let log = tokio::task::spawn_blocking(move || {
                run_client(&reports, &client, &mut rand::thread_rng())
            })
            .await
            .map_err(|e| e.to_string())?;

            Ok::<_, String>((number, log))
        });
    }

    let mut logs = Vec::with_capacity(clients);
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(entry)) => logs.push(entry),
            Ok(Err(e)) => error!(error = %e, "Client failed"),
            Err(e) => error!(error = %e, "Client task failed"),
        }
    }

    logs.sort_by_key(|(number, _)| *number);
    logs.into_iter().map(|(_, log)| log).collect()
}

/// One client visit: discount table, a review, a report.
fn run_client<S, R>(reports: &ReportAssembler<S>, client: &str, rng: &mut R) -> String
where
    S: ReportSink,
    R: Rng,
{
    let id = ProductId::new(rng.gen_range(ID_RANGE));
    let tag = reports
        .supported_locales()
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_LANGUAGE_TAG);

    let thread = std::thread::current();
    let mut log = format!(
        "{} {}\n-\tstart of log\t-\n",
        client,
        thread.name().unwrap_or("unnamed")
    );

    let discounts: Vec<String> = reports
        .discounts(tag)
        .into_iter()
        .map(|(stars, amount)| format!("{}\t{}", stars, amount))
        .collect();
    log.push_str(&discounts.join("\n"));
    log.push_str("\n-\tend of log\t-\n");

    match reports.store().review(id, Rating::FourStar, REVIEW_COMMENT) {
        Ok(_) => log.push_str(&format!("\nProduct {} reviewed\n", id)),
        Err(_) => log.push_str(&format!("\nProduct {} doesn't exist\n", id)),
    }

    match reports.print_product_report(id, tag, client) {
        Ok(_) => log.push_str(&format!("{} generated report for {} product", client, id)),
        Err(_) => log.push_str(&format!("{} could not generate report for {} product", client, id)),
    }

    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Money;
    use catalog_store::{CatalogStore, Formatters, StoreResult};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySink {
        written: Mutex<Vec<(ProductId, String)>>,
    }

    impl ReportSink for MemorySink {
        fn write_report(&self, id: ProductId, client: &str, _: &str) -> StoreResult<PathBuf> {
            self.written.lock().unwrap().push((id, client.to_string()));
            Ok(PathBuf::from(client))
        }
    }

    fn full_catalog() -> Arc<ReportAssembler<MemorySink>> {
        let store = CatalogStore::new();
        for n in ID_RANGE {
            store
                .create_drink(ProductId::new(n), &format!("Drink {}", n), Money::from_cents(100), Rating::NotRated)
                .unwrap();
        }
        Arc::new(ReportAssembler::new(
            Arc::new(store),
            Formatters::new(),
            MemorySink::default(),
        ))
    }

    #[test]
    fn test_client_log() {
        let reports = full_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        let log = run_client(&reports, "Client 1", &mut rng);

        assert!(log.starts_with("Client 1 "));
        assert!(log.contains("-\tstart of log\t-\n"));
        assert!(log.contains("-\tend of log\t-\n"));
        assert!(log.contains("reviewed"));
        assert!(log.ends_with("product"));
        assert_eq!(reports.sink_len(), 1);
    }

    #[test]
    fn test_client_with_missing_product() {
        let reports = Arc::new(ReportAssembler::new(
            Arc::new(CatalogStore::new()),
            Formatters::new(),
            MemorySink::default(),
        ));
        let mut rng = StdRng::seed_from_u64(1);

        let log = run_client(&reports, "Client 9", &mut rng);

        assert!(log.contains("doesn't exist"));
        assert!(log.contains("Client 9 could not generate report"));
        assert_eq!(reports.sink_len(), 0);
    }

    #[tokio::test]
    async fn test_run_clients_in_order() {
        let reports = full_catalog();

        let logs = run_clients(Arc::clone(&reports), 5, 3).await;

        assert_eq!(logs.len(), 5);
        for (n, log) in logs.iter().enumerate() {
            assert!(log.starts_with(&format!("Client {} ", n + 1)));
        }

        let reviews: usize = ID_RANGE
            .map(|n| reports.store().reviews_of(ProductId::new(n)).unwrap().len())
            .sum();
        assert_eq!(reviews, 5);
        assert_eq!(reports.sink_len(), 5);
    }

    trait SinkLen {
        fn sink_len(&self) -> usize;
    }

    impl SinkLen for ReportAssembler<MemorySink> {
        fn sink_len(&self) -> usize {
            self.sink().written.lock().unwrap().len()
        }
    }
}
