// UI layer: the interactive session. Prompting goes through the
// `Console` trait so the whole flow can be driven by scripted input in
// tests; the terminal implementation sits on top of `dialoguer`.

use crate::api::ApiClient;
use crate::error::Error;
use anyhow::Result;
use dialoguer::{Confirm, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::time::Duration;

/// The command menu, shown before every prompt. Commands are accepted
/// by number or by name.
const MENU: &str = "Now what?\n\t1 Wallet\n\t2 Address\n\t3 Balance\n\t4 Send\n\t5 Keystore\n\t6 Exit";

/// Input/output boundary for the interactive session.
pub trait Console {
    /// Prompt for one line of input. An empty reply is allowed; callers
    /// decide what blank means.
    fn prompt_line(&mut self, prompt: &str) -> Result<String>;

    /// Prompt for a secret. Input must not echo to the terminal.
    fn prompt_secret(&mut self, prompt: &str) -> Result<String>;

    /// Ask a yes/no question. An empty reply counts as no.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Show a line to the operator.
    fn print(&mut self, line: &str);
}

/// Terminal console used by the binary.
pub struct TermConsole;

impl Console for TermConsole {
    fn prompt_line(&mut self, prompt: &str) -> Result<String> {
        // `Input::interact_text()` prompts the user for input and returns it.
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }

    fn prompt_secret(&mut self, prompt: &str) -> Result<String> {
        // `Password` hides input in terminal for secrets.
        Ok(Password::new().with_prompt(prompt).interact()?)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    fn print(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Run one full session: login, dispatch loop, logout. Blocks until
/// the operator exits.
///
/// A rejected login propagates out before the loop is entered, so
/// logout is never attempted for a session that never started.
pub fn run(api: &ApiClient, console: &mut dyn Console) -> Result<()> {
    let password = console.prompt_secret("Please login. Enter password")?;
    api.login(&password)?;
    console.print("Logged in.");

    command_loop(api, console)?;

    api.logout()?;
    console.print("Logged out.");
    Ok(())
}

/// Dispatch loop. Iterative on purpose: a long interactive session
/// must not grow the call stack.
fn command_loop(api: &ApiClient, console: &mut dyn Console) -> Result<()> {
    loop {
        console.print(MENU);
        let line = console.prompt_line(">")?;
        let command = line.trim().to_lowercase();
        let outcome = match command.as_str() {
            "1" | "wallet" => show_wallet(api, console),
            "2" | "address" => show_address(api, console),
            "3" | "balance" => show_balance(api, console),
            "4" | "send" => send_funds(api, console),
            "5" | "keystore" => update_keystore(api, console),
            "6" | "exit" => break,
            unknown => {
                console.print(&format!("Unknown command {}.", unknown));
                Ok(())
            }
        };
        // Client errors (bad input, failed request) are reported and the
        // menu comes back; anything else (e.g. the terminal went away)
        // aborts the session.
        if let Err(err) = outcome {
            if err.downcast_ref::<Error>().is_none() {
                return Err(err);
            }
            console.print(&err.to_string());
        }
    }
    Ok(())
}

/// Fetch and pretty-print the wallet summary.
fn show_wallet(api: &ApiClient, console: &mut dyn Console) -> Result<()> {
    let wallet = api.get_wallet()?;
    console.print(&serde_json::to_string_pretty(&wallet)?);
    Ok(())
}

fn show_address(api: &ApiClient, console: &mut dyn Console) -> Result<()> {
    let (protocol, address_index) = prompt_protocol_and_index(console)?;
    let address = api.get_address(&protocol, address_index)?;
    console.print(&address);
    Ok(())
}

fn show_balance(api: &ApiClient, console: &mut dyn Console) -> Result<()> {
    let (protocol, address_index) = prompt_protocol_and_index(console)?;
    let asset = prompt_asset(console)?;
    let balance = api.get_balance(&protocol, address_index, asset.as_deref())?;
    console.print(&render(&balance));
    Ok(())
}

/// The send flow: resolve protocol/index/asset, show the source address
/// and its balance as context, then collect amount and destination and
/// submit. Amount must parse as a float before any request goes out;
/// the destination format is the service's concern.
fn send_funds(api: &ApiClient, console: &mut dyn Console) -> Result<()> {
    let (protocol, address_index) = prompt_protocol_and_index(console)?;
    let asset = prompt_asset(console)?;

    let address = api.get_address(&protocol, address_index)?;
    let balance = api.get_balance(&protocol, address_index, asset.as_deref())?;
    console.print(&format!(
        "\nBalance: {} (asset={}) - Address: {}\n",
        render(&balance),
        asset.as_deref().unwrap_or("native"),
        address
    ));

    let amount: f64 = console
        .prompt_line("Enter amount")?
        .trim()
        .parse()
        .map_err(|_| Error::Validation("Invalid amount".into()))?;
    let destination = console.prompt_line("Enter destination")?;

    // Spinner while the submission is in flight.
    let spinner = spinner("Submitting transaction...");
    let submitted = api.send(&protocol, &destination, amount, address_index, asset.as_deref());
    spinner.finish_and_clear();

    console.print(&serde_json::to_string_pretty(&submitted?)?);
    Ok(())
}

/// Replace the service-held keystore. Requires an explicit yes before
/// any secret is collected or any request is made.
fn update_keystore(api: &ApiClient, console: &mut dyn Console) -> Result<()> {
    console.print("Really update your keystore?");
    console.print(
        "If you have a mnemonic saved, it will be ERASED - be sure you are not losing anything important!",
    );
    if !console.confirm("Are you sure?")? {
        return Ok(());
    }

    // Secrets live only for the duration of this call.
    let mnemonic = console.prompt_secret("Enter your mnemonic phrase")?;
    let password = console.prompt_secret("Enter your password")?;
    api.update_keystore(&mnemonic, &password)?;
    console.print("Keystore updated.");
    Ok(())
}

/// Protocol is required; the index is optional and defaults to 0.
// TODO: list which protocols the service supports; the API has no
// discovery endpoint for that yet.
fn prompt_protocol_and_index(console: &mut dyn Console) -> Result<(String, u32)> {
    let protocol = console.prompt_line("Protocol?")?.trim().to_string();
    if protocol.is_empty() {
        return Err(Error::Validation("Protocol is required.".into()).into());
    }

    let raw = console.prompt_line("Address index? (default 0)")?;
    let raw = raw.trim();
    let address_index: u32 = if raw.is_empty() {
        0
    } else {
        raw.parse().map_err(|_| {
            Error::Validation("Address index must be a non-negative integer".into())
        })?
    };
    Ok((protocol, address_index))
}

/// Blank means the chain's native token.
fn prompt_asset(console: &mut dyn Console) -> Result<Option<String>> {
    let asset = console.prompt_line("Asset? (default native token on chain)")?;
    let asset = asset.trim();
    Ok(if asset.is_empty() {
        None
    } else {
        Some(asset.to_string())
    })
}

/// Balances come back as either a bare string or a number; show both
/// without JSON quoting.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn spinner(msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(msg);
    spinner
}
