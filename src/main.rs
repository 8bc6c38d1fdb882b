use chrono::NaiveDate;
use finab::error::{FinabError, Result};
use finab::finwise::FinWiseApi;
use finab::ynab::YnabApi;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    dotenv::dotenv().ok();

    println!("Hello from finab!");

    // Report window used by both pipelines.
    let start_date = NaiveDate::from_ymd_opt(2026, 1, 1);
    let end_date = NaiveDate::from_ymd_opt(2026, 12, 31);

    // The two pipelines are independent: a failure in one must not prevent
    // the other from running.
    run_finwise_pipeline(start_date, end_date).await;
    run_ynab_pipeline(start_date, end_date).await;
}

async fn run_finwise_pipeline(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) {
    println!("Fetching transactions via FinWiseApi...");

    let api = match build_finwise_api() {
        Ok(api) => api,
        Err(e) => {
            error!("Error creating FinWiseApi: {:#?}", e);
            println!("Error fetching FinWise transactions: {e}");
            return;
        }
    };

    match api.get_transactions(start_date, end_date).await {
        Ok(transactions) => {
            info!("Fetched {} transactions from FinWise.", transactions.len());
            println!("Found {} transactions.", transactions.len());
            if let Some(first) = transactions.first() {
                println!("First transaction: {first:?}");
            }
        }
        Err(e) => {
            error!("Error fetching FinWise transactions: {:#?}", e);
            println!("Error fetching FinWise transactions: {e}");
        }
    }
}

async fn run_ynab_pipeline(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) {
    println!("Fetching budgets via YnabApi...");

    let api = match build_ynab_api() {
        Ok(api) => api,
        Err(e) => {
            error!("Error creating YnabApi: {:#?}", e);
            println!("Error fetching YNAB data: {e}");
            return;
        }
    };

    let budgets = match api.get_budgets().await {
        Ok(budgets) => budgets,
        Err(e) => {
            error!("Error fetching YNAB budgets: {:#?}", e);
            println!("Error fetching YNAB data: {e}");
            return;
        }
    };

    info!("Fetched {} budgets from YNAB.", budgets.len());
    println!("Found {} budgets.", budgets.len());

    // An explicit budget id wins; otherwise use the first listed budget.
    let budget_id = dotenv::var("YNAB_BUDGET_ID")
        .ok()
        .or_else(|| budgets.first().map(|b| b.id.clone()));
    let Some(budget_id) = budget_id else {
        println!("No YNAB budget available, skipping transactions.");
        return;
    };

    match api.get_transactions(&budget_id, start_date, end_date).await {
        Ok(transactions) => {
            info!(
                "Fetched {} transactions from YNAB budget {}.",
                transactions.len(),
                budget_id
            );
            println!("Found {} transactions in budget {budget_id}.", transactions.len());
            if let Some(first) = transactions.first() {
                println!("First transaction: {first}");
            }
        }
        Err(e) => {
            error!("Error fetching YNAB transactions: {:#?}", e);
            println!("Error fetching YNAB data: {e}");
        }
    }
}

// Environment/secret sources are read only here; the API clients take
// explicit values.
fn build_finwise_api() -> Result<FinWiseApi> {
    let domain = dotenv::var("FINWISE_APP_DOMAIN").map_err(|_| {
        FinabError::Configuration("FINWISE_APP_DOMAIN environment variable is not set".to_string())
    })?;
    let token = dotenv::var("FINWISE_TOKEN").map_err(|_| {
        FinabError::Configuration("FINWISE_TOKEN environment variable is not set".to_string())
    })?;
    FinWiseApi::new(domain, token)
}

fn build_ynab_api() -> Result<YnabApi> {
    let token = dotenv::var("YNAB_ACCESS_TOKEN").map_err(|_| {
        FinabError::Configuration("YNAB_ACCESS_TOKEN environment variable is not set".to_string())
    })?;
    YnabApi::new(token)
}
