//! Headless mode runner - scripted calls without the TUI
//!
//! Each expression goes through the same path as a form in the TUI: the
//! values land in the method's inputs, the form is invoked and the result
//! is read back from the application state.

use std::sync::Arc;

use callpane_app::config::Settings;
use callpane_app::{AppPhase, AppState, Console, ConsoleKind, Engine, Message, ResultPane};
use callpane_core::prelude::*;
use callpane_core::{parse_call, IdlValue, ServiceInterface};
use callpane_service::ServiceProxy;

use super::HeadlessEvent;

/// What happened to the expressions of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub completed: usize,
    pub failed: usize,
    pub rejected: usize,
}

impl HeadlessSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0 && self.rejected == 0
    }
}

/// Run `calls` in order, one at a time, emitting an event per call
pub async fn run_headless(
    service: Arc<dyn ServiceProxy>,
    settings: Settings,
    calls: &[String],
) -> Result<HeadlessSummary> {
    info!("Callpane starting in HEADLESS mode ({} call(s))", calls.len());

    let mut engine = Engine::new(service, settings);
    engine.start();

    let result = run_calls(&mut engine, calls).await;

    engine.shutdown();
    info!("Callpane headless mode exiting");
    result
}

async fn run_calls(engine: &mut Engine, calls: &[String]) -> Result<HeadlessSummary> {
    let mut summary = HeadlessSummary::default();

    wait_for(engine, |s| s.phase != AppPhase::Loading).await?;
    match engine.state.phase {
        AppPhase::Failed => {
            let reason = engine
                .state
                .load_error
                .clone()
                .unwrap_or_else(|| "unknown error".to_string());
            HeadlessEvent::interface_failed(&engine.state.service_label, &reason).emit();
            return Err(Error::interface(reason));
        }
        AppPhase::Quitting => return Ok(summary),
        _ => {}
    }
    HeadlessEvent::interface_loaded(&engine.state.service_label, engine.state.methods.len())
        .emit();

    let interface = loaded_interface(&engine.state);

    for expression in calls {
        if engine.should_quit() {
            info!("Quit requested, skipping remaining calls");
            break;
        }

        let (signature, args) = match parse_call(&interface, expression) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Rejected {:?}: {}", expression, e);
                HeadlessEvent::call_rejected(expression, e.to_string()).emit();
                summary.rejected += 1;
                continue;
            }
        };
        let Some(method) = engine
            .state
            .methods
            .iter()
            .position(|entry| entry.signature.name == signature.name)
        else {
            HeadlessEvent::call_rejected(expression, Error::unknown_method(&signature.name).to_string())
                .emit();
            summary.rejected += 1;
            continue;
        };

        fill_form(&mut engine.state, method, &args);
        engine.process_message(Message::Invoke {
            method,
            random: false,
        });

        // The form re-validates; a value that does not survive its text form stops here
        if engine.state.methods[method].result != ResultPane::Waiting {
            let reason = engine.state.methods[method]
                .form
                .inputs
                .iter()
                .find_map(|input| input.rejection().map(str::to_string))
                .unwrap_or_else(|| "input rejected".to_string());
            HeadlessEvent::call_rejected(expression, reason).emit();
            summary.rejected += 1;
            continue;
        }

        wait_for(engine, |s| s.in_flight == 0 || s.should_quit()).await?;

        match &engine.state.methods[method].result {
            ResultPane::Ready(rendered) => {
                let (call, result) = last_console_pair(&engine.state.console);
                HeadlessEvent::call_completed(
                    expression,
                    &signature.name,
                    call,
                    result,
                    rendered.elapsed.as_secs_f64(),
                )
                .emit();
                summary.completed += 1;
            }
            ResultPane::Failed(message) => {
                HeadlessEvent::call_failed(expression, &signature.name, message).emit();
                summary.failed += 1;
            }
            // Quit while waiting
            ResultPane::Waiting | ResultPane::Hidden => break,
        }
    }

    Ok(summary)
}

/// Process messages until `done` holds
async fn wait_for(engine: &mut Engine, done: impl Fn(&AppState) -> bool) -> Result<()> {
    while !done(&engine.state) {
        match engine.next_message().await {
            Some(msg) => engine.process_message(msg),
            None => return Err(Error::ChannelClosed),
        }
    }
    Ok(())
}

/// The method list as the state holds it, for parsing expressions
fn loaded_interface(state: &AppState) -> ServiceInterface {
    ServiceInterface {
        name: state.interface_name.clone(),
        methods: state
            .methods
            .iter()
            .map(|entry| entry.signature.clone())
            .collect(),
    }
}

/// Put parsed argument values into the method's inputs
fn fill_form(state: &mut AppState, method: usize, args: &[IdlValue]) {
    if let Some(entry) = state.methods.get_mut(method) {
        for (input, value) in entry.form.inputs.iter_mut().zip(args) {
            input.show(value);
        }
    }
}

/// The newest call line and result line of the console
fn last_console_pair(console: &Console) -> (Option<String>, Option<String>) {
    let mut recent = console.entries().iter().rev();
    let result = recent
        .next()
        .filter(|entry| entry.kind == ConsoleKind::Result)
        .map(|entry| entry.text.clone());
    let call = recent
        .next()
        .filter(|entry| entry.kind == ConsoleKind::Call)
        .map(|entry| entry.text.clone());
    (call, result)
}
