use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use casabot_core::admin::{draft_translation, save_prompts};
use casabot_core::config::{CompletionConfig, MailConfig, StorageConfig};
use casabot_core::error::SessionError;
use casabot_core::lead::{Lead, LeadNotifier, SmtpNotifier};
use casabot_core::locale::{ui_strings, Language};
use casabot_core::provider;
use casabot_core::session::store::SessionManager;
use casabot_core::session::PromptSet;
use casabot_core::storage::{self, PromptStore, RestPromptStore};
use casabot_core::translate::GoogleTranslator;

#[derive(Parser)]
#[command(
    name = "casabot",
    about = format!("{} casabot - Solmar Estates AI assistant", casabot_core::LOGO),
    version = casabot_core::VERSION,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant as a visitor
    Chat {
        /// Starting language (english or spanish)
        #[arg(short, long, default_value = "english")]
        language: String,
    },
    /// Operator console: edit the stored prompt records
    Admin,
    /// Show configuration status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("casabot=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { language } => cmd_chat(language).await?,
        Commands::Admin => cmd_admin().await?,
        Commands::Status => cmd_status()?,
    }

    Ok(())
}

// ====== Commands ======

/// Busy indicator shown while a blocking external call is in flight.
fn busy(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut input = String::new();
    if std::io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Read lines until a single `.` on its own line.
fn read_multiline() -> Result<String> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed == "." {
            break;
        }
        lines.push(trimmed.to_string());
    }
    Ok(lines.join("\n").trim().to_string())
}

async fn cmd_chat(language: String) -> Result<()> {
    let language: Language = language.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    // The chat page needs both the completion service and the lead mail
    // transport; missing configuration fails here, before any input.
    let completion_cfg = CompletionConfig::from_env()?;
    let mail_cfg = MailConfig::from_env()?;
    let llm = provider::create_provider(&completion_cfg);
    let notifier = SmtpNotifier::new(mail_cfg);

    // Stored prompts are optional for visitors: fall back to the built-in
    // text when the record backend is not configured or unreachable.
    let prompts = match StorageConfig::from_env() {
        Ok(cfg) => PromptSet::load(&RestPromptStore::new(cfg)).await,
        Err(e) => {
            tracing::warn!("Prompt storage not configured ({}), using built-in prompts", e);
            PromptSet::builtin()
        }
    };

    let mut sessions = SessionManager::new(language, prompts, completion_cfg);
    let session_key = format!("visitor:{}", uuid::Uuid::new_v4());

    {
        let ui = ui_strings(sessions.get_or_create(&session_key).language());
        println!("{} {}\n", casabot_core::LOGO, ui.title);
        println!("{}\n", ui.intro);
        println!("Commands: /language  /history  /lead  /quit\n");
    }

    loop {
        let placeholder = {
            let session = sessions.get_or_create(&session_key);
            ui_strings(session.language()).chat_placeholder
        };

        let Some(input) = read_line(&format!("{placeholder} "))? else {
            break;
        };
        if input.is_empty() {
            continue;
        }

        match input.as_str() {
            "/quit" | "/exit" => break,
            "/language" => {
                let session = sessions.get_or_create(&session_key);
                let lang = session.toggle_language();
                println!("→ {lang}\n");
            }
            "/history" => {
                let session = sessions.get_or_create(&session_key);
                let ui = ui_strings(session.language());
                println!("\n{}", ui.history_title);
                for turn in session.transcript() {
                    println!("  You: {}", turn.question);
                    println!("  {} {}", casabot_core::LOGO, turn.answer);
                }
                println!();
            }
            "/lead" => {
                let lang = sessions.get_or_create(&session_key).language();
                run_lead_form(&notifier, lang).await?;
            }
            question => {
                let session = sessions.get_or_create(&session_key);
                let ui = ui_strings(session.language());

                if session.is_limit_reached() {
                    println!("\n{}\n", ui.limit_warning);
                    continue;
                }

                let spinner = busy(ui.thinking);
                let result = session.submit_question(llm.as_ref(), question).await;
                spinner.finish_and_clear();

                match result {
                    Ok(reply) => {
                        println!("\n{} {}\n", casabot_core::LOGO, reply);
                        if session.is_limit_reached() {
                            println!("{}\n", ui.limit_warning);
                        }
                    }
                    Err(SessionError::LimitReached) => println!("\n{}\n", ui.limit_warning),
                    Err(SessionError::EmptyQuestion) => continue,
                    Err(SessionError::Completion(e)) => {
                        tracing::error!("Completion failed: {}", e);
                        println!("\n{}\n", ui.completion_error);
                    }
                }
            }
        }
    }

    let ui = ui_strings(sessions.get_or_create(&session_key).language());
    println!("\n{}\n", ui.disclaimer);
    Ok(())
}

/// One-shot lead form: collect contact details, mail them to the broker,
/// report success or failure. There is no retry; the visitor may submit
/// the form again.
async fn run_lead_form(notifier: &dyn LeadNotifier, language: Language) -> Result<()> {
    let ui = ui_strings(language);
    println!("\n{}", ui.lead_title);

    let Some(name) = read_line(&format!("  {}: ", ui.name_label))? else {
        return Ok(());
    };
    let Some(email) = read_line(&format!("  {}: ", ui.email_label))? else {
        return Ok(());
    };
    let Some(phone) = read_line(&format!("  {}: ", ui.phone_label))? else {
        return Ok(());
    };

    let lead = match Lead::new(name, email, Some(phone)) {
        Ok(lead) => lead,
        Err(e) => {
            tracing::warn!("Incomplete lead: {}", e);
            println!("  {}\n", ui.lead_error);
            return Ok(());
        }
    };

    let spinner = busy(ui.submit_label);
    let result = notifier.notify(&lead).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => println!("  {}\n", ui.lead_success),
        Err(e) => {
            tracing::error!("Lead mail failed: {}", e);
            println!("  {}\n", ui.lead_error);
        }
    }

    Ok(())
}

async fn cmd_admin() -> Result<()> {
    let storage_cfg = StorageConfig::from_env()?;

    println!("{} Solmar Estates prompt console\n", casabot_core::LOGO);

    let Some(email) = read_line("Email: ")? else {
        return Ok(());
    };
    let Some(password) = read_line("Password: ")? else {
        return Ok(());
    };

    // Fail closed: nothing past this point runs without a sign-in.
    let spinner = busy("Signing in...");
    let auth = storage::sign_in(&storage_cfg, &email, &password).await;
    spinner.finish_and_clear();
    let auth = match auth {
        Ok(auth) => auth,
        Err(e) => {
            eprintln!("Login failed: {e}");
            std::process::exit(1);
        }
    };
    println!("Signed in as {}\n", auth.user_email);

    let store = RestPromptStore::with_auth(storage_cfg, &auth);

    // Without the base record there is nothing to edit.
    let record = match store.fetch(Language::English).await {
        Ok(record) => record,
        Err(e) => {
            eprintln!("Could not load the English prompt: {e}");
            std::process::exit(1);
        }
    };

    println!("Current English prompt:\n\n{}\n", record.prompt);
    println!("Enter the new English prompt, finishing with a single '.' line");
    println!("(leave empty to keep the current text):");
    let edited = read_multiline()?;
    let english = if edited.is_empty() {
        record.prompt
    } else {
        edited
    };

    let spinner = busy("Translating...");
    let draft = draft_translation(&GoogleTranslator, &english).await;
    spinner.finish_and_clear();

    if draft.failed {
        println!("Warning: translation failed; the Spanish prompt will not be updated.\n");
    } else {
        println!("Auto-translated Spanish prompt:\n\n{}\n", draft.spanish);
    }

    let Some(confirm) = read_line("Save prompts? [y/N]: ")? else {
        return Ok(());
    };
    if !confirm.eq_ignore_ascii_case("y") {
        println!("Nothing saved.");
        return Ok(());
    }

    let spinner = busy("Saving...");
    let outcome = save_prompts(&store, &english, &draft.spanish).await;
    spinner.finish_and_clear();

    if outcome.all_saved() {
        println!("Prompts saved.");
    } else if outcome.inconsistent() {
        // The writes are independent; a partial failure leaves the records
        // out of sync until the next successful save.
        eprintln!("English prompt saved, but the Spanish update failed: records are out of sync.");
    } else if let Err(e) = &outcome.english {
        eprintln!("Failed to save the English prompt: {e}");
    }

    Ok(())
}

fn cmd_status() -> Result<()> {
    println!("{} casabot status\n", casabot_core::LOGO);

    let set = |var: &str| {
        if std::env::var(var).map(|v| !v.is_empty()).unwrap_or(false) {
            "✓"
        } else {
            "✗"
        }
    };

    println!("Completion:");
    println!("  OPENAI_API_KEY   {}", set("OPENAI_API_KEY"));
    match CompletionConfig::from_env() {
        Ok(cfg) => println!("  model            {}", cfg.model),
        Err(e) => println!("  {e}"),
    }

    println!("Mail:");
    println!("  EMAIL_SENDER     {}", set("EMAIL_SENDER"));
    println!("  EMAIL_PASSWORD   {}", set("EMAIL_PASSWORD"));
    println!("  BROKER_EMAIL     {}", set("BROKER_EMAIL"));

    println!("Prompt storage:");
    println!("  SUPABASE_URL     {}", set("SUPABASE_URL"));
    println!("  SUPABASE_KEY     {}", set("SUPABASE_KEY"));

    Ok(())
}
