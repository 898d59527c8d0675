use chrono::Utc;
use clap::Parser;
use crm_core::adapters::http::RemoteCollection;
use crm_core::core::snapshot::load_snapshot;
use crm_core::core::stats::{dashboard_stats, pipeline_summary, recent_activity_feed};
use crm_core::domain::model::{Activity, Contact, Deal};
use crm_core::utils::{logger, validation::Validate};
use crm_core::CliConfig;
use reqwest::{Client, Url};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting crm-dashboard");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let base = Url::parse(&config.base_url)?;
    let client = Client::new();

    let contacts = RemoteCollection::<Contact>::new(client.clone(), base.clone());
    let deals = RemoteCollection::<Deal>::new(client.clone(), base.clone());
    let activities = RemoteCollection::<Activity>::new(client, base);

    let snapshot = match load_snapshot(&contacts, &deals, &activities).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to load CRM data: {}", e);
            eprintln!("❌ Failed to load CRM data: {}", e);
            std::process::exit(1);
        }
    };

    let stats = dashboard_stats(&snapshot, Utc::now());
    println!("📊 Dashboard");
    println!("  Total contacts:    {}", stats.total_contacts);
    println!("  Active deals:      {}", stats.active_deals);
    println!("  Pipeline value:    ${:.0}", stats.total_deal_value);
    println!("  Conversion rate:   {:.1}%", stats.conversion_rate);
    println!("  Recent activities: {}", stats.recent_activities);

    println!("\n🧭 Pipeline");
    for summary in pipeline_summary(&snapshot.deals) {
        println!(
            "  {:12} {:3} deals  ${:.0}",
            summary.stage.title(),
            summary.count,
            summary.value
        );
    }

    println!("\n🕓 Recent activity");
    let feed = recent_activity_feed(&snapshot.activities, &snapshot.contacts, config.feed_limit);
    if feed.is_empty() {
        println!("  (no activity yet)");
    }
    for entry in feed {
        println!(
            "  {} [{}] {} ({})",
            entry.activity.date.format("%Y-%m-%d %H:%M"),
            entry.activity.kind,
            entry.activity.subject,
            entry.contact_name
        );
    }

    tracing::info!("✅ Dashboard rendered");
    Ok(())
}
