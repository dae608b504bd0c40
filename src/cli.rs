use std::env;
use std::fs;

use crate::backend::BackendClient;
use crate::rewards::form::RewardTierForm;
use crate::rewards::submit::assemble;
use crate::rewards::validate::validate;
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Validate,
    Preview,
    Submit,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("validate") => Some(Command::Validate),
        Some("preview") => Some(Command::Preview),
        Some("submit") => Some(Command::Submit),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Preview) => handle_preview(args),
        Some(Command::Submit) => handle_submit(args),
        None => {
            eprintln!("usage: podium <serve|validate|preview|submit>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("PODIUM_BIND").unwrap_or_else(|_| "127.0.0.1:4000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn load_form(args: &[String], command: &str) -> Result<RewardTierForm, i32> {
    let Some(path) = args.get(2) else {
        eprintln!("usage: podium {command} <path-to-form.json>");
        return Err(2);
    };
    let raw = fs::read_to_string(path).map_err(|err| {
        eprintln!("unable to read '{path}': {err}");
        1
    })?;
    let mut form: RewardTierForm = serde_json::from_str(&raw).map_err(|err| {
        eprintln!("unable to parse form '{path}': {err}");
        1
    })?;
    form.recalculate_totals();
    Ok(form)
}

fn handle_validate(args: &[String]) -> i32 {
    let form = match load_form(args, "validate") {
        Ok(form) => form,
        Err(code) => return code,
    };
    let snapshot = validate(&form);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(payload) => println!("{payload}"),
        Err(err) => {
            eprintln!("failed to serialize validation snapshot: {err}");
            return 1;
        }
    }
    if snapshot.valid {
        0
    } else {
        1
    }
}

/// Print the flattened create request without sending it; the dry-run the
/// builder UI shows before submitting.
fn handle_preview(args: &[String]) -> i32 {
    let form = match load_form(args, "preview") {
        Ok(form) => form,
        Err(code) => return code,
    };
    match assemble(&form) {
        Ok(submission) => {
            for (key, value) in submission.form_fields() {
                println!("{key}: {value}");
            }
            0
        }
        Err(block) => {
            eprintln!("submission blocked: {block}");
            1
        }
    }
}

fn handle_submit(args: &[String]) -> i32 {
    let form = match load_form(args, "submit") {
        Ok(form) => form,
        Err(code) => return code,
    };
    let submission = match assemble(&form) {
        Ok(submission) => submission,
        Err(block) => {
            eprintln!("submission blocked: {block}");
            return 1;
        }
    };
    let client = match BackendClient::from_env() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("backend not available: {err}");
            return 1;
        }
    };
    match client.create_reward_tier(&submission) {
        Ok(envelope) => {
            let status = if envelope.status.is_success() {
                "ok"
            } else {
                "error"
            };
            println!("{status}: {}", envelope.message);
            if envelope.status.is_success() {
                0
            } else {
                1
            }
        }
        Err(err) => {
            eprintln!("create reward tier failed: {err}");
            1
        }
    }
}
