//! Submit the waitlist and contact forms.

use std::io::IsTerminal;

use anyhow::Result;
use dialoguer::Input;
use landing_data::FetchClient;
use landing_forms::{Field, FormSubmissionController, SubmissionOutcome, TokioTimer};
use landing_observability::{LogFormat, LogLevel, StructuredLogger};

use super::{ContactArgs, WaitlistArgs};
use crate::context::Context;
use crate::terminal::TerminalForm;

/// Run the waitlist command.
pub async fn waitlist(args: WaitlistArgs, ctx: &Context) -> Result<SubmissionOutcome> {
    let form = TerminalForm::new(ctx.output.clone(), "Joining waitlist...");
    form.set(Field::WaitlistEmail, prompt_if_missing(args.email, "Email", ctx)?);
    form.set(Field::WaitlistName, args.name);
    form.set(Field::WaitlistProfession, args.profession);
    form.set_checked(Field::NotifyIos, args.notify_ios);
    form.set_checked(Field::InterestedAndroid, args.interested_android);

    let outcome = controller(ctx).submit_waitlist(&form).await;
    report(&outcome, ctx);
    Ok(outcome)
}

/// Run the contact command.
pub async fn contact(args: ContactArgs, ctx: &Context) -> Result<SubmissionOutcome> {
    let form = TerminalForm::new(ctx.output.clone(), "Sending message...");
    form.set(Field::ContactName, prompt_if_missing(args.name, "Name", ctx)?);
    form.set(Field::ContactEmail, prompt_if_missing(args.email, "Email", ctx)?);
    form.set(Field::ContactMessage, prompt_if_missing(args.message, "Message", ctx)?);

    let outcome = controller(ctx).submit_contact(&form).await;
    report(&outcome, ctx);
    Ok(outcome)
}

fn controller(ctx: &Context) -> FormSubmissionController {
    ctx.output.debug(&format!("Backend: {}", ctx.config.backend.base_url));

    FormSubmissionController::new(&ctx.config, FetchClient::new(), TokioTimer)
        .with_logger(form_logger(StructuredLogger::new(), ctx.output.is_verbose()))
}

/// Controller log lines go out through tracing; `--verbose` lets the debug
/// entries through as well.
fn form_logger(base: StructuredLogger, verbose: bool) -> StructuredLogger {
    let logger = base.with_format(LogFormat::Human);
    if verbose {
        logger.with_min_level(LogLevel::Debug)
    } else {
        logger
    }
}

/// Ask for a value the page would require, unless it was given or there is
/// nobody to ask. Empty answers are passed through for validation to report.
fn prompt_if_missing(value: Option<String>, prompt: &str, ctx: &Context) -> Result<Option<String>> {
    if value.is_some() || ctx.output.is_json() || !std::io::stdin().is_terminal() {
        return Ok(value);
    }

    let answer: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(Some(answer))
}

fn report(outcome: &SubmissionOutcome, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(outcome);
        return;
    }

    if let SubmissionOutcome::NetworkError { cause, .. } = outcome {
        ctx.output.debug(cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_core::LandingConfig;
    use landing_observability::MemorySink;

    use crate::output::Output;

    async fn submit_empty_waitlist(verbose: bool) -> MemorySink {
        let sink = MemorySink::new();
        let controller = FormSubmissionController::new(
            &LandingConfig::default(),
            FetchClient::new(),
            TokioTimer,
        )
        .with_logger(form_logger(StructuredLogger::with_sink(sink.clone()), verbose));

        let form = TerminalForm::new(Output::new(verbose, true), "Joining waitlist...");
        form.set(Field::WaitlistEmail, Some(String::new()));

        let outcome = controller.submit_waitlist(&form).await;
        assert!(matches!(outcome, SubmissionOutcome::Rejected { .. }));
        sink
    }

    #[tokio::test]
    async fn test_verbose_lets_controller_debug_through() {
        let sink = submit_empty_waitlist(true).await;

        let debug = sink.at(LogLevel::Debug);
        assert!(debug.iter().any(|line| line.contains("submission rejected")));
        assert!(debug.iter().all(|line| line.starts_with("[DEBUG] waitlist")));
    }

    #[tokio::test]
    async fn test_quiet_run_drops_controller_debug() {
        let sink = submit_empty_waitlist(false).await;

        assert!(sink.at(LogLevel::Debug).is_empty());
    }
}
