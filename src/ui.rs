// UI layer: a simple interactive menu using `dialoguer`. Each entry maps to
// one client call or one exercise function; results are printed as-is.

use crate::api::{ApiResponse, DiskApiClient};
use crate::config::{PollConfig, Token};
use crate::error::Error;
use crate::exercises::{check_age, check_auth, get_cost};
use anyhow::{Context, Result};
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Main interactive menu. Receives a configured `DiskApiClient` and runs a
/// select loop until the user chooses "Exit".
pub fn main_menu(api: DiskApiClient) -> Result<()> {
    let items = [
        "Create folder",
        "List folders",
        "Wait for folder",
        "Delete folder",
        "Check age",
        "Check login",
        "Shipping cost",
        "Exit",
    ];
    loop {
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_create(&api)?,
            1 => handle_list(&api)?,
            2 => handle_wait(&api)?,
            3 => handle_delete(&api)?,
            4 => {
                let age: u32 = Input::new().with_prompt("Age").interact_text()?;
                println!("{}", check_age(age));
            }
            5 => {
                let login: String = Input::new().with_prompt("Login").interact_text()?;
                let password: String = Password::new().with_prompt("Password").interact()?;
                println!("{}", check_auth(&login, &password));
            }
            6 => {
                let weight: u32 = Input::new().with_prompt("Weight, kg").interact_text()?;
                println!("{}", get_cost(weight));
            }
            7 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Ask for a token with hidden input and store it at `path` so the next run
/// picks it up from the file.
pub fn prompt_token(path: &Path) -> Result<Token> {
    println!("No token found in '{}'.", path.display());
    let raw: String = Password::new().with_prompt("OAuth token").interact()?;
    let token = Token::new(raw)?;
    persist_token(path, &token)?;
    Ok(token)
}

fn persist_token(path: &Path, token: &Token) -> Result<()> {
    std::fs::write(path, token.as_str())
        .with_context(|| format!("Failed to write token to '{}'", path.display()))
}

fn handle_create(api: &DiskApiClient) -> Result<()> {
    let path: String = Input::new()
        .with_prompt("Folder path")
        .allow_empty(true)
        .interact_text()?;
    let spinner = spinner("Creating folder...")?;
    let result = api.create_folder(&path);
    spinner.finish_and_clear();

    match result {
        Ok(response) => print_response("Create", &response),
        Err(e) => println!("Create failed: {}", e),
    }
    Ok(())
}

fn handle_list(api: &DiskApiClient) -> Result<()> {
    let spinner = spinner("Listing folders...")?;
    let result = api.list_folders();
    spinner.finish_and_clear();

    match result {
        Ok(folders) if folders.is_empty() => println!("Nothing listed."),
        Ok(folders) => {
            for folder in folders {
                println!("{:<5} {}", folder.kind.as_deref().unwrap_or("?"), folder.name);
            }
        }
        Err(e) => println!("List failed: {}", e),
    }
    Ok(())
}

fn handle_wait(api: &DiskApiClient) -> Result<()> {
    let name: String = Input::new().with_prompt("Folder name").interact_text()?;
    let spinner = spinner("Waiting for the folder to be listed...")?;
    let result = api.wait_for_folder(&name, &PollConfig::default());
    spinner.finish_and_clear();

    match result {
        Ok(_) => println!("Folder '{}' is listed.", name),
        Err(Error::Timeout { waited, .. }) => {
            println!("Folder '{}' still not listed after {:?}.", name, waited)
        }
        Err(e) => println!("Wait failed: {}", e),
    }
    Ok(())
}

fn handle_delete(api: &DiskApiClient) -> Result<()> {
    let path: String = Input::new().with_prompt("Folder path").interact_text()?;
    let spinner = spinner("Deleting folder...")?;
    let result = api.delete_folder(&path);
    spinner.finish_and_clear();

    match result {
        Ok(response) => print_response("Delete", &response),
        Err(e) => println!("Delete failed: {}", e),
    }
    Ok(())
}

fn print_response(action: &str, response: &ApiResponse) {
    match response.api_error() {
        Some(error) => println!(
            "{} answered {}: {} ({})",
            action,
            response.status(),
            error.message,
            error.error
        ),
        None => println!("{} answered {}", action, response.status()),
    }
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
