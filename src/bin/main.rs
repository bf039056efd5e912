use digital_banking_assistant::{
    banking::{BankingService, TransferForm},
    config::AppConfig,
    BankingError,
};
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  login <email> <password>
  dashboard
  transfer <amount> <iban> [recipient name...]
  ask <question...>
  messages
  logout
  help
  quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    let service = BankingService::from_config(&config)?;

    info!("Digital banking terminal starting");
    println!("RAKBANK | Simply Better");
    println!("{}", HELP);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let (command, rest) = match line.trim().split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line.trim(), ""),
        };

        let outcome = match command {
            "" => Ok(()),
            "quit" | "exit" => break,
            "help" => {
                println!("{}", HELP);
                Ok(())
            }
            "login" => login(&service, rest).await,
            "dashboard" => dashboard(&service).await,
            "transfer" => transfer(&service, rest).await,
            "ask" => ask(&service, rest).await,
            "messages" => messages(&service).await,
            "logout" => {
                service.sign_out().await;
                println!("Signed out.");
                Ok(())
            }
            other => {
                println!("Unknown command '{}'. Type 'help'.", other);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("! {}", e);
        }
    }

    Ok(())
}

async fn login(service: &BankingService, args: &str) -> Result<(), BankingError> {
    let mut parts = args.split_whitespace();
    let email = parts.next().unwrap_or_default();
    let password = parts.next().unwrap_or_default();

    service.login(email, password).await?;
    let messages = service.assistant_messages().await?;
    if let Some(welcome) = messages.first() {
        println!("assistant: {}", welcome.text);
    }
    dashboard(service).await
}

async fn dashboard(service: &BankingService) -> Result<(), BankingError> {
    let summary = service.dashboard().await?;

    println!("{}", summary.greeting);
    println!("Balance: AED {}", summary.balance_display);
    println!("Credit score: {}", summary.credit_score);
    println!("Recent transactions:");
    for line in &summary.transactions {
        println!(
            "  {:<14} {:<32} {:>14}  {}",
            line.date,
            line.merchant,
            line.amount,
            line.category.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

async fn transfer(service: &BankingService, args: &str) -> Result<(), BankingError> {
    let mut parts = args.splitn(3, char::is_whitespace);
    let form = TransferForm {
        amount: parts.next().unwrap_or_default().to_string(),
        iban: parts.next().unwrap_or_default().to_string(),
        recipient_name: parts.next().map(str::to_string),
    };

    let tx = service.execute_transfer(&form).await?;
    println!("Transfer successful: {} (AED {}) [{}]", tx.merchant, tx.amount, tx.id);
    Ok(())
}

async fn ask(service: &BankingService, question: &str) -> Result<(), BankingError> {
    let exchange = service.ask_assistant(question).await?;
    println!("assistant: {}", exchange.reply.text);
    Ok(())
}

async fn messages(service: &BankingService) -> Result<(), BankingError> {
    for message in service.assistant_messages().await? {
        println!("{}: {}", message.role, message.text);
    }
    Ok(())
}
